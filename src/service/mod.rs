//! Question service client
//!
//! The service answers four requests, each wrapped in an `{"Ok": ..}` /
//! `{"Err": ..}` envelope. Every call resolves exactly once with either the
//! payload or an error; there is no retry, timeout, or cancellation.

pub mod envelope;
pub mod http;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use envelope::Envelope;
pub use http::HttpQuestionService;

/// Opaque identifier of a stored question.
///
/// The server currently sends integers, but nothing on this side depends on
/// that, so string identifiers are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(u64),
    Text(String),
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Number(n) => write!(f, "{}", n),
            QuestionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for QuestionId {
    fn from(value: u64) -> Self {
        QuestionId::Number(value)
    }
}

/// One entry of a similarity search result. Scores are unbounded and arrive
/// in whatever order the server chose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: QuestionId,
    pub score: f64,
}

/// Acknowledgement returned by `submit_question`. Its shape is not part of the
/// contract, so it is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmitReceipt(pub serde_json::Value);

#[derive(Error, Debug)]
pub enum ServiceError {
    /// The server answered with an `Err` envelope.
    #[error("{0}")]
    Rejected(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// The four operations the client needs from the backend.
///
/// Futures are `'static` so they can be moved straight into background tasks.
pub trait QuestionService: Send + Sync + 'static {
    fn all_questions(&self) -> BoxFuture<'static, ServiceResult<Vec<String>>>;

    fn similar(&self, question: &str) -> BoxFuture<'static, ServiceResult<Vec<Candidate>>>;

    /// `Ok(None)` means the server knows nothing about `id`.
    fn question_text(&self, id: &QuestionId) -> BoxFuture<'static, ServiceResult<Option<String>>>;

    fn submit(&self, question: &str) -> BoxFuture<'static, ServiceResult<SubmitReceipt>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_id_accepts_numbers_and_strings() {
        let n: QuestionId = serde_json::from_str("7").unwrap();
        let s: QuestionId = serde_json::from_str("\"q-7\"").unwrap();
        assert_eq!(n, QuestionId::Number(7));
        assert_eq!(s, QuestionId::Text("q-7".to_string()));
        assert_eq!(n.to_string(), "7");
        assert_eq!(s.to_string(), "q-7");
    }

    #[test]
    fn test_candidate_decodes_server_shape() {
        let c: Candidate = serde_json::from_str(r#"{"id":11,"score":12.5}"#).unwrap();
        assert_eq!(c.id, QuestionId::from(11));
        assert_eq!(c.score, 12.5);
    }

    #[test]
    fn test_rejected_displays_bare_message() {
        let err = ServiceError::Rejected("backend down".to_string());
        assert_eq!(err.to_string(), "backend down");
    }
}
