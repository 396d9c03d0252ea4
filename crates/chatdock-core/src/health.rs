//! "API reachable" indicator.
//!
//! `GET /health/live` answers with a loosely typed payload (the backend sends
//! `{"status": "ok"}`, older builds a bare `true`). The indicator only cares
//! whether the payload is truthy; request failures read as unreachable and
//! are never reported as errors.

use serde_json::Value;

use crate::api::WidgetApi;

/// Whether the backend answered its liveness probe with a truthy payload.
pub async fn is_reachable<A: WidgetApi>(api: &A) -> bool {
    match api.health().await {
        Ok(payload) => is_truthy(&payload),
        Err(err) => {
            tracing::debug!(error = %err, "health probe failed");
            false
        }
    }
}

/// JavaScript-style truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
