use serde::{Deserialize, Serialize};

/// Envelope for single-object responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct Response<T> {
    pub result: T,
}

/// Envelope for list responses. `total` is only sent by paged endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub total: Option<i64>,
}
