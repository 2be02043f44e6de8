//! Approved command patterns.
//!
//! Patterns come from configuration as strings:
//!
//! - `"prog"` — prog invoked with no arguments
//! - `"prog arg1 arg2"` — prog with exactly these arguments
//! - `"prog:*"` — prog with any arguments
//! - `"prog arg1:*"` — prog with arguments beginning `arg1`
//!
//! The argument part is tokenized with shlex, so quoted arguments with
//! spaces work: `"git commit -m:*"`.

use thiserror::Error;

use crate::eval::CommandInvocation;

/// A pattern string that could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("empty pattern")]
    Empty,
    #[error("unbalanced quoting in pattern")]
    BadQuoting,
}

/// How a pattern constrains the argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgSpec {
    /// Arguments must equal this list string-for-string.
    Exact(Vec<String>),
    /// Arguments must begin with this list; anything may follow.
    Prefix(Vec<String>),
}

/// One administrator-approved invocation shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovedPattern {
    pub program: String,
    pub args: ArgSpec,
}

impl ApprovedPattern {
    /// Compile a textual pattern.
    pub fn parse(text: &str) -> Result<Self, PatternError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PatternError::Empty);
        }

        let (body, wildcard) = match text.strip_suffix(":*") {
            Some(body) => (body.trim_end(), true),
            None => (text, false),
        };

        let mut tokens = shlex::split(body).ok_or(PatternError::BadQuoting)?;
        if tokens.is_empty() {
            return Err(PatternError::Empty);
        }
        let program = tokens.remove(0);

        let args = if wildcard {
            ArgSpec::Prefix(tokens)
        } else {
            ArgSpec::Exact(tokens)
        };
        Ok(Self { program, args })
    }

    /// Does this pattern cover the invocation? Comparison is case-sensitive
    /// and string-exact; no globbing inside individual arguments.
    pub fn matches(&self, invocation: &CommandInvocation) -> bool {
        if self.program != invocation.program {
            return false;
        }
        match &self.args {
            ArgSpec::Exact(expected) => invocation.args == *expected,
            ArgSpec::Prefix(prefix) => invocation.args.starts_with(prefix),
        }
    }
}

/// True iff at least one pattern covers the invocation. Order of the set is
/// irrelevant.
pub fn matches_any(invocation: &CommandInvocation, patterns: &[ApprovedPattern]) -> bool {
    patterns.iter().any(|p| p.matches(invocation))
}
