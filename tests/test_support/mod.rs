#![allow(dead_code)]

use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// Clock every sidecar under test runs with. A Friday; its ISO week starts
/// on 2026-10-12.
pub const PINNED_NOW: &str = "2026-10-16T11:20:00";

pub fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    spawn_sidecar_with_env(&[("TERMSHIFTD_NOW", PINNED_NOW)])
}

pub fn spawn_sidecar_with_env(envs: &[(&str, &str)]) -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_termshiftd"));
    cmd.env_remove("TERMSHIFTD_NOW")
        .env("TERMSHIFTD_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null());
    for (k, v) in envs {
        cmd.env(k, v);
    }
    let mut child = cmd.spawn().expect("spawn termshiftd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

pub fn send_line(stdin: &mut ChildStdin, reader: &mut BufReader<ChildStdout>, line: &str) -> Value {
    writeln!(stdin, "{}", line).expect("write request");
    stdin.flush().expect("flush request");
    let mut out = String::new();
    reader.read_line(&mut out).expect("read response");
    serde_json::from_str(&out).expect("response json")
}

pub fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: Value,
) -> Value {
    let req = json!({ "id": id, "method": method, "params": params });
    let resp = send_line(stdin, reader, &req.to_string());
    assert_eq!(resp.get("id").and_then(|v| v.as_str()), Some(id), "{resp}");
    resp
}

pub fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: Value,
) -> Value {
    let resp = request(stdin, reader, id, method, params);
    assert_eq!(resp.get("ok").and_then(|v| v.as_bool()), Some(true), "{method}: {resp}");
    resp.get("result").cloned().unwrap_or(Value::Null)
}

/// Returns the `error` object of a failed response.
pub fn request_err(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: Value,
) -> Value {
    let resp = request(stdin, reader, id, method, params);
    assert_eq!(resp.get("ok").and_then(|v| v.as_bool()), Some(false), "{method}: {resp}");
    resp.get("error").cloned().expect("error object")
}

/// Source course and assignments shared by the duplicate tests: a course
/// starting Monday 2017-01-02 23:00 with one plain assignment and one with
/// a comparison period.
pub fn source_course() -> Value {
    json!({
        "term": "Winter",
        "startDate": "2017-01-02T23:00:00",
        "endDate": "2017-04-28T23:00:00"
    })
}

pub fn source_assignments() -> Value {
    json!([
        {
            "id": "1abcABC123-abcABC123_Z",
            "name": "1234567",
            "answerStart": "2017-03-25T14:00:00",
            "answerEnd": "2017-04-09T13:59:00",
            "compareStart": null,
            "compareEnd": null
        },
        {
            "id": "2abcABC123-abcABC123_Z",
            "name": "1234567890",
            "answerStart": "2017-03-06T15:00:00",
            "answerEnd": "2017-03-16T13:59:00",
            "compareStart": "2017-03-17T15:00:00",
            "compareEnd": "2017-03-25T13:59:00"
        }
    ])
}

pub fn str_at<'a>(v: &'a Value, pointer: &str) -> Option<&'a str> {
    v.pointer(pointer).and_then(|x| x.as_str())
}
