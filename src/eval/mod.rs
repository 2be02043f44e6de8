//! Decision aggregation.
//!
//! Combines the control-character scan, the parser, both analyzers, and the
//! pattern matcher into one verdict. Composition is conjunctive: every
//! command in a compound input must independently pass, and the first
//! finding anywhere decides the whole input. A majority of harmless
//! commands never outvotes one risky one.

pub mod context;
pub mod decision;

pub use context::CommandInvocation;
pub use decision::{Decision, Verdict};

use crate::analyze::{check_control_characters, check_paths, check_structure};
use crate::parse::{self, SyntaxNode};
use crate::pattern::{ApprovedPattern, matches_any};

/// Flags that delegate execution of arbitrary commands to an otherwise
/// harmless program (`find -exec`, interpreter `--eval`/`--command`).
/// An approved pattern cannot vouch for what these run.
const EXEC_FLAGS: &[&str] = &["-exec", "--exec", "--execute", "--eval", "--command"];

/// Classify one raw command string against the approved pattern set.
///
/// Deterministic and pure in its two inputs. Ask is the only possible
/// outcome for anything suspicious; Deny is reserved for input that is not
/// a command at all.
pub fn decide(command: &str, patterns: &[ApprovedPattern]) -> Verdict {
    if command.trim().is_empty() {
        return Verdict::deny("empty command");
    }

    if let Some(reason) = check_control_characters(command) {
        log::debug!("control character: {reason}");
        return Verdict::ask(reason);
    }

    let ast = match parse::parse(command) {
        Ok(ast) => ast,
        Err(e) => {
            log::debug!("parse failure: {e}");
            return Verdict::ask(format!("unparseable command: {e}"));
        }
    };

    if let Some(reason) = check_structure(&ast) {
        log::debug!("structural risk: {reason}");
        return Verdict::ask(reason);
    }

    if let Some(reason) = check_paths(&ast) {
        log::debug!("path risk: {reason}");
        return Verdict::ask(reason);
    }

    for children in collect_commands(&ast) {
        let Some(invocation) = CommandInvocation::from_command(children) else {
            return Verdict::ask("redirection without a command");
        };
        if let Some(flag) = exec_flag(&invocation) {
            log::debug!("execution flag: {flag}");
            return Verdict::ask(format!(
                "'{}' uses execution flag ({flag})",
                invocation.program
            ));
        }
        if !matches_any(&invocation, patterns) {
            return Verdict::ask(format!("'{invocation}' not in approved list"));
        }
    }

    Verdict::allow("all commands approved")
}

/// Find an execution-delegating flag among the invocation's arguments,
/// in bare (`-exec`) or assignment (`--eval=...`) form.
fn exec_flag(invocation: &CommandInvocation) -> Option<&'static str> {
    for arg in &invocation.args {
        for &flag in EXEC_FLAGS {
            if arg == flag || arg.strip_prefix(flag).is_some_and(|rest| rest.starts_with('=')) {
                return Some(flag);
            }
        }
    }
    None
}

/// Collect every Command node's children, in source order, descending
/// through pipelines, lists, and compounds. Substitutions do not appear
/// here: the structural pass has already rejected any tree containing one.
fn collect_commands(nodes: &[SyntaxNode]) -> Vec<&[SyntaxNode]> {
    let mut out = Vec::new();
    walk_commands(nodes, &mut out);
    out
}

fn walk_commands<'a>(nodes: &'a [SyntaxNode], out: &mut Vec<&'a [SyntaxNode]>) {
    for node in nodes {
        match node {
            SyntaxNode::Command(children) => out.push(children.as_slice()),
            SyntaxNode::Pipeline(children)
            | SyntaxNode::List(children)
            | SyntaxNode::Compound(children) => walk_commands(children, out),
            SyntaxNode::Word { .. }
            | SyntaxNode::Parameter { .. }
            | SyntaxNode::CommandSubstitution(_)
            | SyntaxNode::ProcessSubstitution(_)
            | SyntaxNode::Redirect { .. }
            | SyntaxNode::Operator(_)
            | SyntaxNode::Pipe
            | SyntaxNode::ReservedWord(_) => {}
        }
    }
}
