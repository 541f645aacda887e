use std::sync::Arc;

use acas_dispatch::{Dispatcher, TxContext, PANIC_MESSAGE};
use acas_protocol::endpoints::{FRAME_CONTENT_TYPE, TX_ID_HEADER};
use acas_protocol::{AcasCodec, HealthResponse, Response as Envelope, WireMessage};
use acas_types::TxId;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use bytes::Bytes;
use serde_json::json;
use tracing::{debug, error};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let mut functions: Vec<&str> = state.dispatcher.function_names().collect();
    functions.sort_unstable();
    Json(json!({
        "name": "acas-server",
        "version": env!("CARGO_PKG_VERSION"),
        "protocol_version": acas_protocol::PROTOCOL_VERSION,
        "functions": functions,
    }))
}

/// Decode one framed `Invoke`, run it on the blocking pool, and answer
/// with a framed `Result` whose HTTP status mirrors the envelope.
pub async fn invoke_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let invocation = match AcasCodec::decode(&body) {
        Ok((WireMessage::Invoke(invocation), consumed)) if consumed == body.len() => invocation,
        Ok((WireMessage::Invoke(_), consumed)) => {
            return bad_request(format!(
                "{} trailing bytes after frame",
                body.len() - consumed
            ))
        }
        Ok((other, _)) => {
            return bad_request(format!("expected Invoke frame, got {}", other.type_name()))
        }
        Err(e) => return bad_request(e.to_string()),
    };

    let ctx = tx_context(&headers);
    let dispatcher = Arc::clone(&state.dispatcher);
    let envelope =
        match tokio::task::spawn_blocking(move || dispatcher.invoke(&ctx, &invocation.args)).await
        {
            Ok(envelope) => envelope,
            Err(e) => {
                error!("invoke task failed: {e}");
                Envelope::error(PANIC_MESSAGE)
            }
        };
    encode_result(envelope)
}

/// Caller-supplied transaction id, or a fresh one.
pub(crate) fn tx_context(headers: &HeaderMap) -> TxContext {
    headers
        .get(TX_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| TxId::new(s).ok())
        .map(TxContext::new)
        .unwrap_or_else(TxContext::generate)
}

fn bad_request(message: String) -> Response {
    debug!("rejecting request: {message}");
    (StatusCode::BAD_REQUEST, message).into_response()
}

fn encode_result(envelope: Envelope) -> Response {
    let status =
        StatusCode::from_u16(envelope.status.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match AcasCodec::encode(&WireMessage::Result(envelope)) {
        Ok(frame) => (status, [(header::CONTENT_TYPE, FRAME_CONTENT_TYPE)], frame).into_response(),
        Err(e) => {
            error!("failed to encode result: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
