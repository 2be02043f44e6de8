use std::fs::OpenOptions;
use std::path::Path;

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

use crate::eval::Verdict;

/// Install a file logger under ~/.local/share/bashgate/.
/// Best-effort: failures are silently ignored (logging must never block the hook).
pub fn init() {
    let Some(home) = std::env::var_os("HOME") else {
        return;
    };
    let log_dir = Path::new(&home).join(".local/share/bashgate");
    let _ = std::fs::create_dir_all(&log_dir);

    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("bashgate.log"))
    else {
        return;
    };

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let _ = WriteLogger::init(LevelFilter::Debug, config, file);
}

/// Record a verdict through the log facade.
pub fn log_verdict(command: &str, verdict: &Verdict) {
    // Compact single-line form (replace newlines with "; ")
    let reason_oneline = verdict.reason.replace('\n', "; ");
    let cmd_truncated: String = command.chars().take(200).collect();
    log::info!(
        "{decision}\t{cmd_truncated}\t{reason_oneline}",
        decision = verdict.decision.label(),
    );
}
