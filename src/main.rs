//! bashgate: PreToolUse hook binary.
//!
//! Reads the hook JSON from stdin, classifies the Bash command, and writes
//! a permission decision to stdout. Non-Bash tools and calls without a
//! command field are deferred (exit 0, no output).

use serde::Deserialize;
use std::io::Read;

use bashgate::eval::{Decision, Verdict};
use bashgate::{config, eval, logging};

#[derive(Deserialize)]
struct HookInput {
    tool_name: Option<String>,
    tool_input: Option<ToolInput>,
}

#[derive(Deserialize)]
struct ToolInput {
    command: Option<String>,
}

fn main() {
    logging::init();

    let mut input = String::new();
    if std::io::stdin().read_to_string(&mut input).is_err() {
        eprintln!("failed to read stdin");
        std::process::exit(1);
    }

    let hook_input: HookInput = match serde_json::from_str(&input) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("JSON parse error: {e}");
            std::process::exit(1);
        }
    };

    if hook_input.tool_name.as_deref() != Some("Bash") {
        std::process::exit(0);
    }

    let Some(command) = hook_input.tool_input.and_then(|t| t.command) else {
        std::process::exit(0);
    };

    let verdict = match config::Config::load().and_then(|c| c.compile()) {
        Ok(patterns) => eval::decide(&command, &patterns),
        // Broken config means the operator's intent is unknown: escalate.
        Err(e) => Verdict::ask(format!("configuration error: {e}")),
    };

    logging::log_verdict(&command, &verdict);

    let mut hook_output = serde_json::json!({
        "hookEventName": "PreToolUse",
        "permissionDecision": verdict.decision.as_str(),
    });
    if verdict.decision != Decision::Allow {
        hook_output["permissionDecisionReason"] = serde_json::json!(verdict.reason);
    }

    let output = serde_json::json!({ "hookSpecificOutput": hook_output });
    println!("{output}");
}
