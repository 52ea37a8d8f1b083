use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{opt_i64, opt_instant};
use crate::ipc::types::{AppState, Request};
use crate::temporal::{shift_by_weeks, weeks_between};
use serde_json::json;

// About a century either way; anything larger is a caller bug.
const MAX_WEEK_SHIFT: i64 = 5200;

fn handle_weeks_between(state: &mut AppState, req: &Request) -> serde_json::Value {
    let a = match opt_instant(req, "a") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let b = match opt_instant(req, "b") {
        Ok(v) => v,
        Err(e) => return e,
    };
    ok(&req.id, json!({ "weeks": weeks_between(a, b, state.now()) }))
}

fn handle_shift_by_weeks(state: &mut AppState, req: &Request) -> serde_json::Value {
    let original = match opt_instant(req, "original") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let weeks = match opt_i64(req, "weeks") {
        Ok(Some(v)) if !(-MAX_WEEK_SHIFT..=MAX_WEEK_SHIFT).contains(&v) => {
            return err(
                &req.id,
                "bad_params",
                format!("weeks must be in -{0}..={0}", MAX_WEEK_SHIFT),
                None,
            )
        }
        Ok(v) => v,
        Err(e) => return e,
    };
    ok(
        &req.id,
        json!({ "instant": shift_by_weeks(original, weeks, state.now()) }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "temporal.weeksBetween" => Some(handle_weeks_between(state, req)),
        "temporal.shiftByWeeks" => Some(handle_shift_by_weeks(state, req)),
        _ => None,
    }
}
