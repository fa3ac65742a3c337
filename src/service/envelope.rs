use serde::{Deserialize, Serialize};

use super::{ServiceError, ServiceResult};

/// Wire wrapper around every response body: exactly one of `Ok` or `Err`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Envelope<T> {
    Ok(T),
    Err(String),
}

impl<T> Envelope<T> {
    pub fn into_result(self) -> ServiceResult<T> {
        match self {
            Envelope::Ok(value) => Ok(value),
            Envelope::Err(message) => Err(ServiceError::Rejected(message)),
        }
    }
}

/// Decode a raw response body into the payload or the server's error.
pub fn decode<T>(body: &[u8]) -> ServiceResult<T>
where
    T: for<'de> Deserialize<'de>,
{
    let envelope: Envelope<T> =
        serde_json::from_slice(body).map_err(|e| ServiceError::Decode(e.to_string()))?;
    envelope.into_result()
}
