mod config;
mod ipc;
mod logging;
mod rebase;
mod schedule;
mod temporal;

use std::io::{self, BufRead, Write};

fn main() {
    let config = match config::SidecarConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("termshiftd: {e:#}");
            std::process::exit(2);
        }
    };
    if let Err(e) = logging::init_logging(&config.log_level) {
        eprintln!("termshiftd: {e:#}");
        std::process::exit(2);
    }

    let mut state = ipc::AppState::new(config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                log::error!("event=stdin_read status=failed error={}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("event=request status=bad_json");
                let _ = writeln!(stdout, "{}", ipc::bad_json(e.to_string()));
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }

    log::info!("event=app_stop module=sidecar status=ok");
}
