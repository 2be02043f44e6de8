//! Path safety analysis.
//!
//! Scans every token of the tree for filesystem-escape indicators: absolute
//! paths, parent-directory traversal, home-directory references, and git
//! metadata. Works on literal token text only; expansions are the structure
//! analyzer's problem.

use crate::parse::SyntaxNode;

/// Filenames that guard repository state and must never be touched.
const PROTECTED_FILES: &[&str] = &[".git", ".gitignore"];

/// Scan a parsed command tree for unsafe path references.
///
/// Visits Words (including Words nested in redirect targets and
/// substitutions) in source order and returns the first finding.
pub fn check_paths(nodes: &[SyntaxNode]) -> Option<String> {
    for node in nodes {
        let found = match node {
            SyntaxNode::Command(children)
            | SyntaxNode::Pipeline(children)
            | SyntaxNode::List(children)
            | SyntaxNode::Compound(children)
            | SyntaxNode::CommandSubstitution(children)
            | SyntaxNode::ProcessSubstitution(children) => check_paths(children),
            SyntaxNode::Word { text, parts } => {
                check_token(text).or_else(|| check_paths(parts))
            }
            SyntaxNode::Redirect { target, .. } => {
                check_paths(std::slice::from_ref(target.as_ref()))
            }
            SyntaxNode::Parameter { .. }
            | SyntaxNode::Operator(_)
            | SyntaxNode::Pipe
            | SyntaxNode::ReservedWord(_) => None,
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

/// Check one token's literal text. Findings are ordered by severity:
/// absolute path, then `..`, then `~`, then protected metadata.
fn check_token(text: &str) -> Option<String> {
    if is_absolute(text) {
        return Some(format!("'{text}' uses absolute path"));
    }
    if text.contains("..") {
        return Some(format!("'{text}' references parent directory (..)"));
    }
    if text.contains('~') {
        return Some(format!("'{text}' references home directory (~)"));
    }
    // .git / .gitignore as a path component or the whole filename
    for component in text.split('/') {
        if PROTECTED_FILES.contains(&component) {
            return Some(format!("'{text}' accesses protected file ({component})"));
        }
    }
    None
}

/// A token is an absolute-path reference when it starts with `/` or contains
/// whitespace followed by `/` (a path smuggled into a larger token, e.g. a
/// quoted `-exec rm /etc` payload).
fn is_absolute(text: &str) -> bool {
    if text.starts_with('/') {
        return true;
    }
    let mut prev_space = false;
    for c in text.chars() {
        if prev_space && c == '/' {
            return true;
        }
        prev_space = c.is_whitespace();
    }
    false
}
