//! Shell command parsing.

mod ast;
mod shell;

pub use ast::{ControlOp, MAX_DEPTH, ParseError, SyntaxNode};
pub use shell::parse;
