// JSON error body for plain HTTP replies (e.g. refusing an upgrade).

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
