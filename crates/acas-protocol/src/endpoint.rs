/// HTTP endpoint paths.
pub mod endpoints {
    pub const HEALTH: &str = "/v1/health";
    pub const INFO: &str = "/v1/info";
    pub const INVOKE: &str = "/v1/invoke";

    /// Header carrying the caller's transaction (correlation) id.
    pub const TX_ID_HEADER: &str = "x-transaction-id";

    /// Content type of framed request and response bodies.
    pub const FRAME_CONTENT_TYPE: &str = "application/x-acas-frame";
}

/// Health check response.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub protocol_version: u32,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            protocol_version: super::message::PROTOCOL_VERSION,
        }
    }
}
