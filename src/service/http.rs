use super::envelope;
use super::{Candidate, QuestionId, QuestionService, ServiceError, ServiceResult, SubmitReceipt};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use url::Url;

const ALL_QUESTIONS_PATH: &str = "get_all_questions";
const SIMILAR_PATH: &str = "get_similar";
const QUESTION_PATH: &str = "get_question";
const SUBMIT_PATH: &str = "submit_question";

/// JSON-over-HTTP implementation of [`QuestionService`].
///
/// The underlying client has no request timeout.
#[derive(Clone)]
pub struct HttpQuestionService {
    client: reqwest::Client,
    base: Url,
}

#[derive(Serialize)]
struct Publish {
    data: String,
}

impl HttpQuestionService {
    pub fn new(base: Url) -> ServiceResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("simq/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> ServiceResult<Url> {
        Ok(self.base.join(path)?)
    }

    pub(crate) fn similar_url(&self, question: &str) -> ServiceResult<Url> {
        let mut url = self.endpoint(SIMILAR_PATH)?;
        url.query_pairs_mut().append_pair("question", question);
        Ok(url)
    }

    pub(crate) fn question_url(&self, id: &QuestionId) -> ServiceResult<Url> {
        let mut url = self.endpoint(QUESTION_PATH)?;
        url.query_pairs_mut().append_pair("id", &id.to_string());
        Ok(url)
    }
}

async fn read_envelope<T>(response: reqwest::Response) -> ServiceResult<T>
where
    T: for<'de> Deserialize<'de>,
{
    let status = response.status();
    let body = response.bytes().await?;
    match envelope::decode(&body) {
        Err(ServiceError::Decode(_)) if !status.is_success() => {
            Err(ServiceError::Decode(format!("HTTP {}", status)))
        }
        other => other,
    }
}

async fn get_json<T>(client: reqwest::Client, url: ServiceResult<Url>) -> ServiceResult<T>
where
    T: for<'de> Deserialize<'de>,
{
    let url = url?;
    tracing::trace!(url = url.as_str(), "GET");
    let response = client.get(url).send().await?;
    read_envelope(response).await
}

impl QuestionService for HttpQuestionService {
    fn all_questions(&self) -> BoxFuture<'static, ServiceResult<Vec<String>>> {
        get_json(self.client.clone(), self.endpoint(ALL_QUESTIONS_PATH)).boxed()
    }

    fn similar(&self, question: &str) -> BoxFuture<'static, ServiceResult<Vec<Candidate>>> {
        get_json(self.client.clone(), self.similar_url(question)).boxed()
    }

    fn question_text(&self, id: &QuestionId) -> BoxFuture<'static, ServiceResult<Option<String>>> {
        get_json(self.client.clone(), self.question_url(id)).boxed()
    }

    fn submit(&self, question: &str) -> BoxFuture<'static, ServiceResult<SubmitReceipt>> {
        let client = self.client.clone();
        let url = self.endpoint(SUBMIT_PATH);
        let body = Publish {
            data: question.to_string(),
        };
        async move {
            let url = url?;
            tracing::trace!(url = url.as_str(), "POST");
            // `.json` sets `Content-Type: application/json`
            let response = client.post(url).json(&body).send().await?;
            read_envelope(response).await
        }
        .boxed()
    }
}
