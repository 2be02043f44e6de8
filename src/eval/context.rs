use crate::parse::SyntaxNode;

/// The program-plus-arguments view of one Command node, the unit the
/// pattern matcher reasons about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// The program name (the command's first word).
    pub program: String,
    /// The remaining argument words, in order.
    pub args: Vec<String>,
}

impl CommandInvocation {
    /// Build an invocation from a Command node's children. Redirects are
    /// skipped; they are not arguments. Returns None when the command has
    /// no words at all (a bare redirection like `> file`).
    pub fn from_command(children: &[SyntaxNode]) -> Option<Self> {
        let mut words = children.iter().filter_map(|c| match c {
            SyntaxNode::Word { text, .. } => Some(text.clone()),
            _ => None,
        });
        let program = words.next()?;
        Some(Self {
            program,
            args: words.collect(),
        })
    }
}

impl std::fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
