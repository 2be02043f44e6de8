//! Syntax tree produced by the shell parser and consumed by the analyzers.

use thiserror::Error;

/// Hard cap on parser/analyzer recursion depth.
///
/// Input is attacker-controlled, so nesting (`$($($(...)))`, `((((...))))`)
/// must be bounded regardless of input length. Exceeding the cap is a
/// [`ParseError::DepthExceeded`], which callers treat like any other parse
/// failure (fail closed to Ask).
pub const MAX_DEPTH: usize = 40;

/// List-level control operator separating consecutive statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlOp {
    /// `&&` — run next only if previous succeeded
    And,
    /// `||` — run next only if previous failed
    Or,
    /// `;` — run next unconditionally
    Semi,
    /// `&` — run previous in the background
    Background,
}

/// One node of the parsed command tree.
///
/// The tree is acyclic and finite: children are owned, and the parser
/// enforces [`MAX_DEPTH`]. Every analyzer matches exhaustively on this
/// enum, so adding a kind is a compile error until each analyzer handles it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    /// One program invocation. Children are its argument [`SyntaxNode::Word`]s
    /// and [`SyntaxNode::Redirect`]s, in source order.
    Command(Vec<SyntaxNode>),
    /// Commands connected by `|` / `|&`. Children interleave Command-like
    /// nodes with [`SyntaxNode::Pipe`] markers.
    Pipeline(Vec<SyntaxNode>),
    /// Statements connected by `;`, `&&`, `||`, or `&`. Children interleave
    /// command-like nodes with [`SyntaxNode::Operator`] markers.
    List(Vec<SyntaxNode>),
    /// A grouping or control construct: `( )`, `{ }`, `if`/`for`/`while`.
    /// Children are [`SyntaxNode::ReservedWord`] markers, the inner
    /// statements, loop-header [`SyntaxNode::Word`]s, and any trailing
    /// [`SyntaxNode::Redirect`]s.
    Compound(Vec<SyntaxNode>),
    /// One token. `text` is the literal text with quotes resolved and
    /// expansion spans elided; `parts` holds the expansions that were
    /// embedded in the token, in source order.
    Word {
        text: String,
        parts: Vec<SyntaxNode>,
    },
    /// Parameter expansion: `$NAME` or `${NAME}`.
    Parameter { name: String },
    /// Command substitution: `$( )` or backticks. Children are the parsed
    /// statements of the embedded command.
    CommandSubstitution(Vec<SyntaxNode>),
    /// Process substitution: `<( )` or `>( )`. Children are the parsed
    /// statements of the embedded command.
    ProcessSubstitution(Vec<SyntaxNode>),
    /// A redirection. `op` is the operator as written, including any fd
    /// prefix (`>`, `>>`, `2>`, `>&`, `&>`); `target` is the target Word
    /// (for fd duplication, the fd number or `-`).
    Redirect {
        op: String,
        target: Box<SyntaxNode>,
    },
    /// Control operator between list statements.
    Operator(ControlOp),
    /// `|` or `|&` between pipeline stages.
    Pipe,
    /// A shell keyword inside a Compound (`if`, `then`, `do`, `done`, ...).
    ReservedWord(String),
}

/// Why a command string could not be parsed.
///
/// Every variant fails closed: the aggregator maps any parse failure to Ask,
/// never Allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unterminated single-quoted string")]
    UnterminatedSingleQuote,
    #[error("unterminated double-quoted string")]
    UnterminatedDoubleQuote,
    #[error("unterminated command or process substitution")]
    UnterminatedSubstitution,
    #[error("unterminated backtick substitution")]
    UnterminatedBacktick,
    #[error("unterminated parameter expansion")]
    UnterminatedParameter,
    #[error("unbalanced `{0}`")]
    Unbalanced(char),
    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("missing `{0}` keyword")]
    MissingKeyword(&'static str),
    #[error("redirection `{0}` has no target")]
    MissingRedirectTarget(String),
    #[error("unsupported shell construct `{0}`")]
    Unsupported(String),
    #[error("nesting depth exceeds {MAX_DEPTH}")]
    DepthExceeded,
}

impl SyntaxNode {
    /// Convenience constructor for a plain word with no embedded expansions.
    pub fn plain_word(text: impl Into<String>) -> Self {
        SyntaxNode::Word {
            text: text.into(),
            parts: Vec::new(),
        }
    }
}
