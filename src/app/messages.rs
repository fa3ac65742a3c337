use crate::search::Resolution;
use crate::service::Candidate;

/// Messages from background tasks to the main UI thread
#[derive(Debug)]
pub enum BackgroundMessage {
    /// A similarity search finished. Sent exactly once per issued search,
    /// whatever the outcome.
    SimilarFinished {
        seq: u64,
        query: String,
        result: Result<Vec<Candidate>, String>,
    },
    /// Display text for one row of a search result
    QuestionResolved(Resolution),
    /// Full question list refreshed
    AllQuestions(Result<Vec<String>, String>),
    /// Question submission finished
    Submitted {
        question: String,
        result: Result<(), String>,
    },
    /// Generic error (background task crashed)
    Error(String),
}
