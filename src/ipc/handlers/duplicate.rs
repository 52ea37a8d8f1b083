use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{opt_i64, param_or_default, required_instant, required_param};
use crate::ipc::types::{AppState, Request};
use crate::rebase::{prepare_submission, rebase, suggest_duplicate_course, validate, ValidationVerdict};
use crate::schedule::{AssignmentSchedule, CourseSchedule, DuplicateDraft};
use chrono::Datelike;
use serde_json::json;

fn verdict_json(verdict: &ValidationVerdict) -> serde_json::Value {
    if verdict.is_valid() {
        return json!({ "valid": true, "code": verdict.code() });
    }
    json!({
        "valid": false,
        "code": verdict.code(),
        "assignment": verdict.assignment_name(),
        "title": verdict.title(),
        "message": verdict.message()
    })
}

fn handle_suggest(state: &mut AppState, req: &Request) -> serde_json::Value {
    let course: CourseSchedule = match param_or_default(req, "course") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let draft = suggest_duplicate_course(&course, state.now());
    match serde_json::to_value(&draft) {
        Ok(v) => ok(&req.id, json!({ "course": v })),
        Err(e) => err(&req.id, "encode_failed", e.to_string(), None),
    }
}

fn handle_rebase(state: &mut AppState, req: &Request) -> serde_json::Value {
    let course: CourseSchedule = match param_or_default(req, "course") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let assignments: Vec<AssignmentSchedule> = match param_or_default(req, "assignments") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let proposed_start = match required_instant(req, "proposedStart") {
        Ok(v) => v,
        Err(e) => return e,
    };

    let year = match opt_i64(req, "year") {
        Ok(None) => state.now().year(),
        Ok(Some(v)) => match i32::try_from(v) {
            Ok(y) => y,
            Err(_) => return err(&req.id, "bad_params", "year out of range", None),
        },
        Err(e) => return e,
    };

    let result = rebase(&course, &assignments, proposed_start, year);
    if result.is_empty() {
        log::info!("event=duplicate_rebase status=no_anchor");
    }
    match serde_json::to_value(&result) {
        Ok(v) => ok(&req.id, v),
        Err(e) => err(&req.id, "encode_failed", e.to_string(), None),
    }
}

fn handle_validate(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let draft: DuplicateDraft = match required_param(req, "draft") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let verdict = validate(&draft);
    if !verdict.is_valid() {
        log::warn!("event=duplicate_validate status=invalid code={}", verdict.code());
    }
    ok(&req.id, verdict_json(&verdict))
}

fn handle_prepare(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let draft: DuplicateDraft = match required_param(req, "draft") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let submission = match prepare_submission(&draft) {
        Ok(v) => v,
        Err(verdict) => {
            log::warn!("event=duplicate_prepare status=invalid code={}", verdict.code());
            return err(
                &req.id,
                "validation_failed",
                verdict.message(),
                Some(verdict_json(&verdict)),
            );
        }
    };
    match serde_json::to_value(&submission) {
        Ok(v) => ok(&req.id, json!({ "submission": v })),
        Err(e) => err(&req.id, "encode_failed", e.to_string(), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "duplicate.suggest" => Some(handle_suggest(state, req)),
        "duplicate.rebase" => Some(handle_rebase(state, req)),
        "duplicate.validate" => Some(handle_validate(state, req)),
        "duplicate.prepare" => Some(handle_prepare(state, req)),
        _ => None,
    }
}
