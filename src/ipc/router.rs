use super::handlers;
use super::types::{AppState, Request};
use crate::ipc::error::err;

pub fn handle_request(state: &mut AppState, req: Request) -> serde_json::Value {
    log::debug!("event=request method={} id={}", req.method, req.id);

    if let Some(resp) = handlers::core::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::temporal::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::duplicate::try_handle(state, &req) {
        return resp;
    }

    log::warn!("event=request status=unknown_method method={}", req.method);
    err(
        &req.id,
        "not_implemented",
        format!("unknown method: {}", req.method),
        None,
    )
}
