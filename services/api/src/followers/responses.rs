use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status_code: u16,
    pub message: String,
}

impl StatusResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IsFollowingResponse {
    pub following: bool,
    pub message: String,
}
