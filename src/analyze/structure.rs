//! Structural risk analysis.
//!
//! Flags constructs that defeat static reasoning: anything whose runtime
//! value or effect cannot be read off the tree (expansions, substitutions)
//! and anything that detaches from supervision (background execution).
//! Also scans the raw input for control characters, which works even when
//! parsing failed.

use crate::parse::{ControlOp, SyntaxNode};

/// Scan the raw command string for control characters.
///
/// Runs before and independent of the parser, so a command that smuggles a
/// second line past a reviewer is caught even if it parses cleanly.
pub fn check_control_characters(raw: &str) -> Option<String> {
    if raw.contains('\0') {
        return Some("command contains a null byte".into());
    }
    if raw.contains('\u{1b}') {
        return Some("command contains an escape character".into());
    }
    if raw.contains('\n') || raw.contains('\r') {
        return Some("command contains a literal newline".into());
    }
    if has_ansi_c_newline(raw) {
        return Some("command encodes a newline ($'\\n')".into());
    }
    None
}

/// Detect escapes inside an ANSI-C `$'...'` string that decode to LF or CR.
fn has_ansi_c_newline(raw: &str) -> bool {
    let mut rest = raw;
    while let Some(start) = rest.find("$'") {
        let body = &rest[start + 2..];
        let end = body.find('\'').unwrap_or(body.len());
        if encodes_newline(&body[..end]) {
            return true;
        }
        rest = &body[end.min(body.len())..];
        if rest.is_empty() {
            break;
        }
        rest = &rest[1..];
    }
    false
}

/// Whether an ANSI-C quote body contains an escape sequence that the shell
/// would expand to a newline or carriage return. Covers the mnemonic (`\n`,
/// `\r`), hex (`\x0a`), octal (`\012`), and control-char (`\cJ`) spellings.
fn encodes_newline(body: &str) -> bool {
    let chars: Vec<char> = body.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '\\' {
            i += 1;
            continue;
        }
        i += 1;
        match chars.get(i) {
            Some('n' | 'r') => return true,
            Some('x') => {
                let mut value = 0u32;
                let mut digits = 0;
                while digits < 2
                    && let Some(d) = chars.get(i + 1 + digits).and_then(|c| c.to_digit(16))
                {
                    value = value * 16 + d;
                    digits += 1;
                }
                if digits > 0 && (value == 0x0a || value == 0x0d) {
                    return true;
                }
                i += 1 + digits;
            }
            Some('0'..='7') => {
                let mut value = 0u32;
                let mut digits = 0;
                while digits < 3
                    && let Some(d) = chars.get(i + digits).and_then(|c| c.to_digit(8))
                {
                    value = value * 8 + d;
                    digits += 1;
                }
                if value == 0o12 || value == 0o15 {
                    return true;
                }
                i += digits;
            }
            Some('c') => {
                // \cX yields X ^ 0x40: ctrl-J is LF, ctrl-M is CR
                if let Some(c) = chars.get(i + 1)
                    && matches!(c.to_ascii_uppercase(), 'J' | 'M')
                {
                    return true;
                }
                i += 2;
            }
            Some(_) => i += 1,
            None => break,
        }
    }
    false
}

/// Scan a parsed command tree for constructs that cannot be statically
/// vetted. First finding in source order wins.
pub fn check_structure(nodes: &[SyntaxNode]) -> Option<String> {
    for node in nodes {
        let found = match node {
            SyntaxNode::Operator(ControlOp::Background) => {
                Some("contains backgrounded task (& operator)".into())
            }
            SyntaxNode::Operator(_) | SyntaxNode::Pipe | SyntaxNode::ReservedWord(_) => None,
            SyntaxNode::Parameter { name } => {
                Some(format!("contains variable expansion (${name})"))
            }
            // runtime output cannot be vetted statically, so any
            // substitution is rejected outright
            SyntaxNode::CommandSubstitution(_) => {
                Some("contains command substitution ($( ) or backticks)".into())
            }
            SyntaxNode::ProcessSubstitution(_) => {
                Some("contains process substitution (<( ) or >( ))".into())
            }
            SyntaxNode::Word { parts, .. } => check_structure(parts),
            SyntaxNode::Redirect { target, .. } => {
                check_structure(std::slice::from_ref(target.as_ref()))
            }
            SyntaxNode::Command(children)
            | SyntaxNode::Pipeline(children)
            | SyntaxNode::List(children)
            | SyntaxNode::Compound(children) => check_structure(children),
        };
        if found.is_some() {
            return found;
        }
    }
    None
}
