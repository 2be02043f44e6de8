//! Recursive-descent shell parser.
//!
//! Converts one raw command string into a list of [`SyntaxNode`] statements,
//! respecting single/double quotes and backslash escapes. The parser is
//! purely syntactic: it never expands variables and never executes
//! substitutions. Embedded `$( )`, backtick, and `<( )`/`>( )` bodies are
//! parsed into subtrees, nothing more.
//!
//! Anything the grammar does not recognize (heredocs, `case`, function
//! definitions, stray keywords, unbalanced quoting) is a [`ParseError`] so
//! the caller can fail closed.

use super::ast::{ControlOp, MAX_DEPTH, ParseError, SyntaxNode};

/// Shell keywords that open a supported compound construct.
const COMPOUND_OPENERS: &[&str] = &["if", "for", "while", "until"];

/// Shell keywords that only make sense inside a compound construct.
const COMPOUND_INNER: &[&str] = &["then", "elif", "else", "fi", "do", "done", "esac", "in"];

/// Constructs we recognize but deliberately refuse to model.
const UNSUPPORTED: &[&str] = &["case", "function", "select", "coproc", "time"];

/// Parse a full command string into its top-level statements.
///
/// The result is a list rather than a single node: sibling statements can
/// appear without an explicit separator (`sleep 100 & ls` yields the
/// backgrounded job, the `&` operator, and the trailing command).
pub fn parse(command: &str) -> Result<Vec<SyntaxNode>, ParseError> {
    parse_at_depth(command, 0)
}

/// Parse an embedded command string at the given nesting depth.
fn parse_at_depth(input: &str, depth: usize) -> Result<Vec<SyntaxNode>, ParseError> {
    if depth >= MAX_DEPTH {
        return Err(ParseError::DepthExceeded);
    }
    let mut cur = Cursor::new(input);
    let items = parse_list(&mut cur, depth, &[])?;
    cur.skip_spaces();
    if let Some(c) = cur.peek() {
        return Err(ParseError::UnexpectedToken(c.to_string()));
    }
    Ok(items)
}

// ─── Cursor ──────────────────────────────────────────

struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.pos += 1;
        }
    }

    fn skip_blank(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\n' | '\r')) {
            self.pos += 1;
        }
    }

    /// Read ahead one bare (unquoted, expansion-free) word without consuming.
    /// Returns None when the next token is not a bare word.
    fn peek_bare_word(&self) -> Option<String> {
        let mut word = String::new();
        let mut i = self.pos;
        while let Some(&c) = self.chars.get(i) {
            match c {
                ' ' | '\t' | '\n' | '\r' | ';' | '&' | '|' | '<' | '>' | '(' | ')' => break,
                '\'' | '"' | '\\' | '$' | '`' => return None,
                _ => {
                    word.push(c);
                    i += 1;
                }
            }
        }
        if word.is_empty() { None } else { Some(word) }
    }

    /// Consume a word previously returned by `peek_bare_word`.
    fn consume_bare_word(&mut self, word: &str) {
        self.pos += word.chars().count();
    }
}

// ─── Lists and pipelines ─────────────────────────────

fn last_is_operator(items: &[SyntaxNode]) -> bool {
    matches!(items.last(), Some(SyntaxNode::Operator(_)))
}

/// Parse a sequence of statements separated by `;`, `&&`, `||`, `&`, or
/// newlines, stopping at `)`, at `}` (when requested), or at any keyword
/// in `stop`.
fn parse_list(
    cur: &mut Cursor,
    depth: usize,
    stop: &[&str],
) -> Result<Vec<SyntaxNode>, ParseError> {
    let mut items: Vec<SyntaxNode> = Vec::new();

    loop {
        cur.skip_spaces();
        match cur.peek() {
            None => break,
            Some(')') => break,
            Some('}') if stop.contains(&"}") => break,
            Some('\n' | '\r') => {
                cur.bump();
                if !items.is_empty() && !last_is_operator(&items) {
                    items.push(SyntaxNode::Operator(ControlOp::Semi));
                }
            }
            Some(';') => {
                cur.bump();
                // `cmd & ; more` — the `;` after `&` is redundant, not an error
                if matches!(
                    items.last(),
                    Some(SyntaxNode::Operator(ControlOp::Background))
                ) {
                    continue;
                }
                if items.is_empty() || last_is_operator(&items) {
                    return Err(ParseError::UnexpectedToken(";".into()));
                }
                items.push(SyntaxNode::Operator(ControlOp::Semi));
            }
            Some('&') if cur.peek_at(1) == Some('>') => {
                // `&>` is a redirect, handled by the command parser
                push_command(&mut items, parse_pipeline(cur, depth, stop)?)?;
            }
            Some('&') => {
                if items.is_empty() || last_is_operator(&items) {
                    return Err(ParseError::UnexpectedToken("&".into()));
                }
                cur.bump();
                let op = if cur.eat('&') {
                    ControlOp::And
                } else {
                    ControlOp::Background
                };
                items.push(SyntaxNode::Operator(op));
            }
            Some('|') if cur.peek_at(1) == Some('|') => {
                if items.is_empty() || last_is_operator(&items) {
                    return Err(ParseError::UnexpectedToken("||".into()));
                }
                cur.bump();
                cur.bump();
                items.push(SyntaxNode::Operator(ControlOp::Or));
            }
            Some('|') => {
                // a pipe can only follow a command, and the pipeline parser
                // consumes those itself
                return Err(ParseError::UnexpectedToken("|".into()));
            }
            Some(_) => {
                if let Some(word) = cur.peek_bare_word()
                    && stop.contains(&word.as_str())
                {
                    break;
                }
                push_command(&mut items, parse_pipeline(cur, depth, stop)?)?;
            }
        }
    }

    // `a &&` / `a ||` with nothing after is incomplete input
    if matches!(
        items.last(),
        Some(SyntaxNode::Operator(ControlOp::And | ControlOp::Or))
    ) {
        return Err(ParseError::UnexpectedEnd);
    }

    Ok(items)
}

/// Append a command to a statement list, rejecting two commands with no
/// separator between them (e.g. `(ls) pwd`).
fn push_command(items: &mut Vec<SyntaxNode>, cmd: SyntaxNode) -> Result<(), ParseError> {
    if let Some(last) = items.last()
        && !matches!(last, SyntaxNode::Operator(_))
    {
        return Err(ParseError::UnexpectedToken("command".into()));
    }
    items.push(cmd);
    Ok(())
}

/// Parse one pipeline: commands connected by `|` or `|&`.
fn parse_pipeline(
    cur: &mut Cursor,
    depth: usize,
    stop: &[&str],
) -> Result<SyntaxNode, ParseError> {
    let mut items = vec![parse_command(cur, depth, stop)?];

    loop {
        cur.skip_spaces();
        if cur.peek() == Some('|') && cur.peek_at(1) != Some('|') {
            cur.bump();
            // `|&` pipes stdout+stderr; the `&` belongs to the pipe, not a
            // background operator
            cur.eat('&');
            items.push(SyntaxNode::Pipe);
            cur.skip_blank();
            items.push(parse_command(cur, depth, stop)?);
        } else {
            break;
        }
    }

    if items.len() == 1 {
        items.pop().ok_or(ParseError::UnexpectedEnd)
    } else {
        Ok(SyntaxNode::Pipeline(items))
    }
}

// ─── Commands ────────────────────────────────────────

/// Parse one command: a `( )` / `{ }` group, an `if`/`for`/`while` compound,
/// or a simple command.
fn parse_command(
    cur: &mut Cursor,
    depth: usize,
    stop: &[&str],
) -> Result<SyntaxNode, ParseError> {
    if depth >= MAX_DEPTH {
        return Err(ParseError::DepthExceeded);
    }
    cur.skip_spaces();

    match cur.peek() {
        None => Err(ParseError::UnexpectedEnd),
        Some('(') => {
            cur.bump();
            let inner = parse_list(cur, depth + 1, &[])?;
            cur.skip_blank();
            if !cur.eat(')') {
                return Err(ParseError::Unbalanced('('));
            }
            if inner.is_empty() {
                return Err(ParseError::UnexpectedToken(")".into()));
            }
            finish_compound(cur, depth, group_body(inner))
        }
        Some('{') if matches!(cur.peek_at(1), Some(' ' | '\t' | '\n')) => {
            cur.bump();
            let inner = parse_list(cur, depth + 1, &["}"])?;
            cur.skip_blank();
            if !cur.eat('}') {
                return Err(ParseError::Unbalanced('{'));
            }
            if inner.is_empty() {
                return Err(ParseError::UnexpectedToken("}".into()));
            }
            finish_compound(cur, depth, group_body(inner))
        }
        Some(_) => {
            if let Some(word) = cur.peek_bare_word() {
                let w = word.as_str();
                if COMPOUND_OPENERS.contains(&w) {
                    return parse_keyword_compound(cur, depth, word);
                }
                if UNSUPPORTED.contains(&w) {
                    return Err(ParseError::Unsupported(word));
                }
                if COMPOUND_INNER.contains(&w) && !stop.contains(&w) {
                    return Err(ParseError::UnexpectedToken(word));
                }
            }
            parse_simple_command(cur, depth, stop)
        }
    }
}

/// A group body with several statements becomes one List child, so the
/// Compound's own children stay flat.
fn group_body(inner: Vec<SyntaxNode>) -> Vec<SyntaxNode> {
    if inner.len() == 1 {
        inner
    } else {
        vec![SyntaxNode::List(inner)]
    }
}

/// Attach any trailing redirects to a group's children and wrap them.
fn finish_compound(
    cur: &mut Cursor,
    depth: usize,
    mut children: Vec<SyntaxNode>,
) -> Result<SyntaxNode, ParseError> {
    loop {
        cur.skip_spaces();
        if at_redirect(cur) {
            children.push(parse_redirect(cur, depth)?);
        } else {
            break;
        }
    }
    Ok(SyntaxNode::Compound(children))
}

/// True when the cursor sits on a redirection operator
/// (`>`, `>>`, `<`, `>&`, `&>`, or a digit-prefixed form), and not on a
/// process substitution.
fn at_redirect(cur: &Cursor) -> bool {
    match cur.peek() {
        Some('>') => cur.peek_at(1) != Some('('),
        Some('<') => cur.peek_at(1) != Some('('),
        Some('&') => cur.peek_at(1) == Some('>'),
        Some(c) if c.is_ascii_digit() => {
            let mut i = 1;
            while matches!(cur.peek_at(i), Some(d) if d.is_ascii_digit()) {
                i += 1;
            }
            matches!(cur.peek_at(i), Some('>' | '<'))
        }
        _ => false,
    }
}

/// Parse one simple command: words and redirects up to the next control
/// operator or terminator.
fn parse_simple_command(
    cur: &mut Cursor,
    depth: usize,
    stop: &[&str],
) -> Result<SyntaxNode, ParseError> {
    let mut children: Vec<SyntaxNode> = Vec::new();

    loop {
        cur.skip_spaces();
        match cur.peek() {
            None | Some(';' | '\n' | '\r' | ')') => break,
            Some('}') if stop.contains(&"}") && children.is_empty() => break,
            Some('&') if cur.peek_at(1) != Some('>') => break,
            Some('|') => break,
            Some('(') => return Err(ParseError::UnexpectedToken("(".into())),
            Some('<' | '>') if cur.peek_at(1) == Some('(') => {
                children.push(parse_word(cur, depth)?);
            }
            Some(_) if at_redirect(cur) => {
                children.push(parse_redirect(cur, depth)?);
            }
            Some(_) => {
                children.push(parse_word(cur, depth)?);
            }
        }
    }

    if children.is_empty() {
        return Err(ParseError::UnexpectedEnd);
    }
    Ok(SyntaxNode::Command(children))
}

// ─── Redirects ───────────────────────────────────────

/// Parse a redirection operator and its target.
fn parse_redirect(cur: &mut Cursor, depth: usize) -> Result<SyntaxNode, ParseError> {
    let mut op = String::new();

    // fd prefix, e.g. the 2 in 2>
    while matches!(cur.peek(), Some(c) if c.is_ascii_digit()) {
        if let Some(d) = cur.bump() {
            op.push(d);
        }
    }

    match cur.peek() {
        Some('>') => {
            cur.bump();
            op.push('>');
            if cur.eat('>') {
                op.push('>');
            } else if cur.peek() == Some('&') {
                cur.bump();
                op.push('&');
                if let Some(target) = fd_dup_target(cur) {
                    return Ok(SyntaxNode::Redirect {
                        op,
                        target: Box::new(target),
                    });
                }
                // `>&word` falls through: both streams to a file
            }
        }
        Some('<') => {
            cur.bump();
            op.push('<');
            if cur.peek() == Some('<') {
                // heredocs and herestrings are beyond static reasoning
                return Err(ParseError::Unsupported("<<".into()));
            }
            if cur.peek() == Some('&') {
                cur.bump();
                op.push('&');
                if let Some(target) = fd_dup_target(cur) {
                    return Ok(SyntaxNode::Redirect {
                        op,
                        target: Box::new(target),
                    });
                }
            }
        }
        Some('&') => {
            // &> or &>> — both streams to a file
            cur.bump();
            op.push('&');
            if !cur.eat('>') {
                return Err(ParseError::UnexpectedToken("&".into()));
            }
            op.push('>');
            if cur.eat('>') {
                op.push('>');
            }
        }
        _ => return Err(ParseError::UnexpectedToken(op)),
    }

    cur.skip_spaces();
    match cur.peek() {
        None | Some(';' | '&' | '|' | '\n' | '\r' | ')' | '<' | '>') => {
            Err(ParseError::MissingRedirectTarget(op))
        }
        Some(_) => {
            let target = parse_word(cur, depth)?;
            Ok(SyntaxNode::Redirect {
                op,
                target: Box::new(target),
            })
        }
    }
}

/// Consume the target of an fd duplication (`2>&1`, `>&-`), if present.
fn fd_dup_target(cur: &mut Cursor) -> Option<SyntaxNode> {
    match cur.peek() {
        Some('-') => {
            cur.bump();
            Some(SyntaxNode::plain_word("-"))
        }
        Some(c) if c.is_ascii_digit() => {
            let mut fd = String::new();
            while matches!(cur.peek(), Some(d) if d.is_ascii_digit()) {
                if let Some(d) = cur.bump() {
                    fd.push(d);
                }
            }
            Some(SyntaxNode::plain_word(fd))
        }
        _ => None,
    }
}

// ─── Words and expansions ────────────────────────────

/// Parse one word: literal text plus any embedded Parameter,
/// CommandSubstitution, or ProcessSubstitution nodes. The returned Word's
/// `text` holds the literal characters with expansion spans elided, so a
/// path fragment glued to a substitution (`$(pwd)/etc`) stays visible to
/// the path analyzer.
fn parse_word(cur: &mut Cursor, depth: usize) -> Result<SyntaxNode, ParseError> {
    let mut text = String::new();
    let mut parts: Vec<SyntaxNode> = Vec::new();

    loop {
        let Some(c) = cur.peek() else { break };
        match c {
            '<' | '>' if cur.peek_at(1) == Some('(') && text.is_empty() && parts.is_empty() => {
                cur.bump();
                cur.bump();
                let inner = take_balanced(cur)?;
                let nodes = parse_at_depth(inner.trim(), depth + 1)?;
                parts.push(SyntaxNode::ProcessSubstitution(nodes));
            }
            ' ' | '\t' | '\n' | '\r' | ';' | '&' | '|' | '<' | '>' | '(' | ')' => break,
            '\'' => {
                cur.bump();
                loop {
                    match cur.bump() {
                        None => return Err(ParseError::UnterminatedSingleQuote),
                        Some('\'') => break,
                        Some(ch) => text.push(ch),
                    }
                }
            }
            '"' => {
                cur.bump();
                loop {
                    match cur.peek() {
                        None => return Err(ParseError::UnterminatedDoubleQuote),
                        Some('"') => {
                            cur.bump();
                            break;
                        }
                        Some('\\') => {
                            cur.bump();
                            match cur.bump() {
                                None => return Err(ParseError::UnterminatedDoubleQuote),
                                Some(ch) => text.push(ch),
                            }
                        }
                        // $ and backticks stay active inside double quotes
                        Some('$') => scan_dollar(cur, depth, &mut text, &mut parts)?,
                        Some('`') => scan_backtick(cur, depth, &mut parts)?,
                        Some(ch) => {
                            cur.bump();
                            text.push(ch);
                        }
                    }
                }
            }
            '\\' => {
                cur.bump();
                match cur.bump() {
                    None => text.push('\\'),
                    Some(ch) => text.push(ch),
                }
            }
            '$' => scan_dollar(cur, depth, &mut text, &mut parts)?,
            '`' => scan_backtick(cur, depth, &mut parts)?,
            _ => {
                cur.bump();
                text.push(c);
            }
        }
    }

    Ok(SyntaxNode::Word { text, parts })
}

/// Scan a `$`-introduced expansion. The cursor sits on the `$`.
fn scan_dollar(
    cur: &mut Cursor,
    depth: usize,
    text: &mut String,
    parts: &mut Vec<SyntaxNode>,
) -> Result<(), ParseError> {
    cur.bump(); // $
    match cur.peek() {
        Some('(') => {
            cur.bump();
            let inner = take_balanced(cur)?;
            let nodes = parse_at_depth(inner.trim(), depth + 1)?;
            parts.push(SyntaxNode::CommandSubstitution(nodes));
        }
        Some('{') => {
            cur.bump();
            let inner = take_braced(cur)?;
            parts.push(SyntaxNode::Parameter { name: inner });
        }
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            let mut name = String::new();
            while matches!(cur.peek(), Some(n) if n.is_ascii_alphanumeric() || n == '_') {
                if let Some(n) = cur.bump() {
                    name.push(n);
                }
            }
            parts.push(SyntaxNode::Parameter { name });
        }
        Some(c) if c.is_ascii_digit() || "?!#@*-$".contains(c) => {
            cur.bump();
            parts.push(SyntaxNode::Parameter {
                name: c.to_string(),
            });
        }
        Some('\'') => {
            // ANSI-C quoting $'...' — keep the escapes encoded in the text;
            // the control-character scan on the raw input catches them
            cur.bump();
            loop {
                match cur.bump() {
                    None => return Err(ParseError::UnterminatedSingleQuote),
                    Some('\'') => break,
                    Some('\\') => {
                        text.push('\\');
                        match cur.bump() {
                            None => return Err(ParseError::UnterminatedSingleQuote),
                            Some(ch) => text.push(ch),
                        }
                    }
                    Some(ch) => text.push(ch),
                }
            }
        }
        _ => text.push('$'),
    }
    Ok(())
}

/// Scan a backtick command substitution. The cursor sits on the opening
/// backtick.
fn scan_backtick(
    cur: &mut Cursor,
    depth: usize,
    parts: &mut Vec<SyntaxNode>,
) -> Result<(), ParseError> {
    cur.bump(); // `
    let mut inner = String::new();
    loop {
        match cur.bump() {
            None => return Err(ParseError::UnterminatedBacktick),
            Some('`') => break,
            Some('\\') => match cur.bump() {
                None => return Err(ParseError::UnterminatedBacktick),
                // \` \\ \$ are escapes inside backticks
                Some(ch @ ('`' | '\\' | '$')) => inner.push(ch),
                Some(ch) => {
                    inner.push('\\');
                    inner.push(ch);
                }
            },
            Some(ch) => inner.push(ch),
        }
    }
    let nodes = parse_at_depth(inner.trim(), depth + 1)?;
    parts.push(SyntaxNode::CommandSubstitution(nodes));
    Ok(())
}

/// Collect text up to the parenthesis matching an already-consumed `(`,
/// respecting quotes and escapes.
fn take_balanced(cur: &mut Cursor) -> Result<String, ParseError> {
    let mut depth: u32 = 1;
    let mut inner = String::new();
    let (mut sq, mut dq) = (false, false);

    loop {
        let Some(c) = cur.bump() else {
            return Err(ParseError::UnterminatedSubstitution);
        };
        if c == '\\' && !sq {
            inner.push(c);
            match cur.bump() {
                None => return Err(ParseError::UnterminatedSubstitution),
                Some(n) => inner.push(n),
            }
            continue;
        }
        if c == '\'' && !dq {
            sq = !sq;
            inner.push(c);
            continue;
        }
        if c == '"' && !sq {
            dq = !dq;
            inner.push(c);
            continue;
        }
        if !sq && !dq {
            if c == '(' {
                depth += 1;
            } else if c == ')' {
                depth -= 1;
                if depth == 0 {
                    return Ok(inner);
                }
            }
        }
        inner.push(c);
    }
}

/// Collect the body of `${...}` up to the matching brace.
fn take_braced(cur: &mut Cursor) -> Result<String, ParseError> {
    let mut depth: u32 = 1;
    let mut inner = String::new();
    loop {
        let Some(c) = cur.bump() else {
            return Err(ParseError::UnterminatedParameter);
        };
        match c {
            '{' => {
                depth += 1;
                inner.push(c);
            }
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(inner);
                }
                inner.push(c);
            }
            _ => inner.push(c),
        }
    }
}

// ─── Keyword compounds ───────────────────────────────

/// Parse an `if`/`for`/`while`/`until` construct. The opener has been peeked
/// but not consumed.
fn parse_keyword_compound(
    cur: &mut Cursor,
    depth: usize,
    opener: String,
) -> Result<SyntaxNode, ParseError> {
    cur.consume_bare_word(&opener);
    let mut children = vec![SyntaxNode::ReservedWord(opener.clone())];

    match opener.as_str() {
        "if" => loop {
            let cond = parse_list(cur, depth + 1, &["then"])?;
            if cond.is_empty() {
                return Err(ParseError::MissingKeyword("then"));
            }
            children.extend(cond);
            expect_keyword(cur, "then")?;
            children.push(SyntaxNode::ReservedWord("then".into()));

            let body = parse_list(cur, depth + 1, &["elif", "else", "fi"])?;
            if body.is_empty() {
                return Err(ParseError::MissingKeyword("fi"));
            }
            children.extend(body);

            cur.skip_blank();
            match cur.peek_bare_word().as_deref() {
                Some("fi") => {
                    cur.consume_bare_word("fi");
                    children.push(SyntaxNode::ReservedWord("fi".into()));
                    break;
                }
                Some("else") => {
                    cur.consume_bare_word("else");
                    children.push(SyntaxNode::ReservedWord("else".into()));
                    let alt = parse_list(cur, depth + 1, &["fi"])?;
                    if alt.is_empty() {
                        return Err(ParseError::MissingKeyword("fi"));
                    }
                    children.extend(alt);
                    expect_keyword(cur, "fi")?;
                    children.push(SyntaxNode::ReservedWord("fi".into()));
                    break;
                }
                Some("elif") => {
                    cur.consume_bare_word("elif");
                    children.push(SyntaxNode::ReservedWord("elif".into()));
                }
                _ => return Err(ParseError::MissingKeyword("fi")),
            }
        },
        "while" | "until" => {
            let cond = parse_list(cur, depth + 1, &["do"])?;
            if cond.is_empty() {
                return Err(ParseError::MissingKeyword("do"));
            }
            children.extend(cond);
            expect_keyword(cur, "do")?;
            children.push(SyntaxNode::ReservedWord("do".into()));
            let body = parse_list(cur, depth + 1, &["done"])?;
            if body.is_empty() {
                return Err(ParseError::MissingKeyword("done"));
            }
            children.extend(body);
            expect_keyword(cur, "done")?;
            children.push(SyntaxNode::ReservedWord("done".into()));
        }
        "for" => {
            // header: loop variable and the optional `in word...` list
            loop {
                cur.skip_spaces();
                match cur.peek() {
                    None => return Err(ParseError::MissingKeyword("do")),
                    Some('(') => return Err(ParseError::Unsupported("for ((".into())),
                    Some(';' | '\n' | '\r') => {
                        cur.bump();
                        continue;
                    }
                    Some(_) => {}
                }
                if let Some(w) = cur.peek_bare_word() {
                    if w == "do" {
                        break;
                    }
                    if w == "in" {
                        cur.consume_bare_word("in");
                        children.push(SyntaxNode::ReservedWord("in".into()));
                        continue;
                    }
                }
                children.push(parse_word(cur, depth)?);
            }
            expect_keyword(cur, "do")?;
            children.push(SyntaxNode::ReservedWord("do".into()));
            let body = parse_list(cur, depth + 1, &["done"])?;
            if body.is_empty() {
                return Err(ParseError::MissingKeyword("done"));
            }
            children.extend(body);
            expect_keyword(cur, "done")?;
            children.push(SyntaxNode::ReservedWord("done".into()));
        }
        _ => return Err(ParseError::Unsupported(opener)),
    }

    finish_compound(cur, depth, children)
}

fn expect_keyword(cur: &mut Cursor, keyword: &'static str) -> Result<(), ParseError> {
    cur.skip_blank();
    match cur.peek_bare_word() {
        Some(w) if w == keyword => {
            cur.consume_bare_word(keyword);
            Ok(())
        }
        _ => Err(ParseError::MissingKeyword(keyword)),
    }
}

// ─── Tests ───────────────────────────────────────────
