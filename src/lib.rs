//! bashgate: a PreToolUse hook that statically classifies Bash commands.
//!
//! Given one command string proposed by an automated agent, the crate
//! returns one of three decisions: [`eval::Decision::Allow`],
//! [`eval::Decision::Ask`], or [`eval::Decision::Deny`]. The command is
//! parsed into a syntax tree, the tree is checked for filesystem-escape
//! and structural risks, and every simple command in it must match an
//! administrator-approved pattern. Anything the analysis cannot vouch for
//! is escalated to a human; nothing is ever executed or expanded.
//!
//! # Architecture
//!
//! - **[`parse`]** — Hand-written recursive-descent shell parser producing [`parse::SyntaxNode`] trees.
//! - **[`analyze`]** — Path-safety and structural-risk scans over the tree.
//! - **[`pattern`]** — Approved-pattern compilation and matching.
//! - **[`eval`]** — Decision aggregation: conjunctive, fail-closed.
//! - **[`config`]** — Embedded default patterns + user overlay merge.
//! - **[`logging`]** — Verdict logging to `~/.local/share/bashgate/bashgate.log`.

/// Path-safety and structural-risk analyzers.
pub mod analyze;
/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Decision aggregation: verdict types, invocation view, the classifier.
pub mod eval;
/// File-based verdict logging.
pub mod logging;
/// Shell command parsing: recursive-descent scanner and syntax tree.
pub mod parse;
/// Approved command patterns.
pub mod pattern;

use eval::Verdict;

/// Classify a command against the loaded configuration
/// (embedded defaults merged with the user overlay).
pub fn classify(command: &str) -> Result<Verdict, config::ConfigError> {
    let patterns = config::Config::load()?.compile()?;
    Ok(eval::decide(command, &patterns))
}

/// Classify a command against the embedded default patterns only.
///
/// This is the main entry point for tests and simple usage.
pub fn evaluate(command: &str) -> Verdict {
    let patterns = config::Config::default_config()
        .compile()
        .expect("embedded default patterns must parse");
    eval::decide(command, &patterns)
}
