use crate::ipc::error::err;
use crate::ipc::types::Request;
use crate::temporal::parse_instant;
use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

pub fn opt_instant(req: &Request, key: &str) -> Result<Option<NaiveDateTime>, JsonValue> {
    match req.params.get(key) {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => {
            let raw = v.as_str().ok_or_else(|| {
                err(&req.id, "bad_params", format!("{} must be string or null", key), None)
            })?;
            if raw.trim().is_empty() {
                return Ok(None);
            }
            parse_instant(raw).map(Some).ok_or_else(|| {
                err(
                    &req.id,
                    "bad_params",
                    format!("{} must be YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS", key),
                    None,
                )
            })
        }
    }
}

pub fn required_instant(req: &Request, key: &str) -> Result<NaiveDateTime, JsonValue> {
    opt_instant(req, key)?
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

pub fn opt_i64(req: &Request, key: &str) -> Result<Option<i64>, JsonValue> {
    match req.params.get(key) {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => v.as_i64().map(Some).ok_or_else(|| {
            err(&req.id, "bad_params", format!("{} must be integer or null", key), None)
        }),
    }
}

/// Typed view of `params[key]`; serde's message goes into `details`.
pub fn required_param<T: DeserializeOwned>(req: &Request, key: &str) -> Result<T, JsonValue> {
    let Some(raw) = req.params.get(key).filter(|v| !v.is_null()) else {
        return Err(err(&req.id, "bad_params", format!("missing {}", key), None));
    };
    serde_json::from_value(raw.clone()).map_err(|e| {
        err(
            &req.id,
            "bad_params",
            format!("invalid {}", key),
            Some(serde_json::json!({ "reason": e.to_string() })),
        )
    })
}

/// Like [`required_param`], but a missing or null key yields `T::default()`.
pub fn param_or_default<T: DeserializeOwned + Default>(
    req: &Request,
    key: &str,
) -> Result<T, JsonValue> {
    match req.params.get(key) {
        None => Ok(T::default()),
        Some(v) if v.is_null() => Ok(T::default()),
        Some(_) => required_param(req, key),
    }
}
