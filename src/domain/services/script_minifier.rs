//! Script minification
//!
//! A conservative single-pass JavaScript minifier:
//!
//! - strips `//` and `/* */` comments (keeps `/*! ... */` license banners)
//! - collapses whitespace runs, keeping a newline wherever removing it could
//!   change automatic semicolon insertion
//! - copies string, template and regular-expression literals verbatim
//!
//! Identifiers are never renamed. Output is deterministic.

/// Characters after which whitespace never matters
const NO_SPACE_AFTER: &[char] = &[
    '(', '[', '{', ',', ';', ':', '=', '*', '%', '&', '|', '^', '!', '~', '<', '>', '?',
    '.', '+', '-', '/',
];

/// Characters before which whitespace never matters
const NO_SPACE_BEFORE: &[char] = &[
    ')', ']', '}', ',', ';', ':', '=', '*', '%', '&', '|', '^', '!', '~', '<', '>', '?',
    '.', '(', '[', '{', '+', '-', '/',
];

/// After these a newline can be dropped without affecting ASI
const JOIN_AFTER_NEWLINE: &[char] = &[
    '(', '[', '{', ',', ';', ':', '=', '*', '%', '&', '|', '^', '!', '~', '<', '>', '?',
];

/// Before these a newline can be dropped without affecting ASI
const JOIN_BEFORE_NEWLINE: &[char] = &[')', ']', '}', ',', ';', '.', '?', ':', '='];

/// Keywords after which `/` starts a regular expression
const REGEX_KEYWORDS: &[&str] = &[
    "return",
    "typeof",
    "instanceof",
    "in",
    "of",
    "new",
    "delete",
    "void",
    "throw",
    "case",
    "do",
    "else",
    "yield",
    "await",
];

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

struct Minifier<'a> {
    chars: &'a [char],
    pos: usize,
    out: String,
    /// Pending whitespace: `Some(true)` if it contained a line break
    pending: Option<bool>,
    after_regex: bool,
}

impl<'a> Minifier<'a> {
    fn new(chars: &'a [char]) -> Self {
        Self {
            chars,
            pos: 0,
            out: String::with_capacity(chars.len()),
            pending: None,
            after_regex: false,
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// Line number of `pos`; only computed when reporting an error
    fn line_at(&self, pos: usize) -> usize {
        let end = pos.min(self.chars.len());
        1 + self.chars[..end].iter().filter(|c| **c == '\n').count()
    }

    fn add_whitespace(&mut self, newline: bool) {
        self.pending = Some(self.pending.unwrap_or(false) || newline);
    }

    /// Emit the separator (if any) required before `next`.
    fn flush_whitespace(&mut self, next: char) {
        let Some(newline) = self.pending.take() else {
            return;
        };
        let Some(prev) = self.out.chars().last() else {
            return;
        };
        if prev == '\n' {
            return;
        }

        if newline && !self.can_drop_newline(prev, next) {
            self.out.push('\n');
            return;
        }

        if self.needs_space(prev, next) {
            self.out.push(' ');
        }
    }

    fn can_drop_newline(&self, prev: char, next: char) -> bool {
        if self.out.ends_with("++") || self.out.ends_with("--") {
            return false;
        }
        if self.after_regex {
            return false;
        }
        JOIN_AFTER_NEWLINE.contains(&prev) || JOIN_BEFORE_NEWLINE.contains(&next)
    }

    fn needs_space(&self, prev: char, next: char) -> bool {
        if self.after_regex && is_word_char(next) {
            return true;
        }
        // `a + +b`, `a - -b`, `x / /re/`
        if (prev == '+' || prev == '-' || prev == '/') && prev == next {
            return true;
        }
        // `1 .toString()`
        if prev.is_ascii_digit() && next == '.' {
            return true;
        }
        if NO_SPACE_AFTER.contains(&prev) || NO_SPACE_BEFORE.contains(&next) {
            return false;
        }
        (is_word_char(prev) && is_word_char(next))
            || (is_word_char(prev) && matches!(next, '"' | '\'' | '`'))
            || (matches!(prev, '"' | '\'' | '`') && is_word_char(next))
    }

    fn regex_allowed(&self) -> bool {
        let trimmed = self.out.trim_end();
        let Some(last) = trimmed.chars().last() else {
            return true;
        };
        // `i++ / 2`
        if trimmed.ends_with("++") || trimmed.ends_with("--") {
            return false;
        }
        if is_word_char(last) {
            let word: String = trimmed
                .chars()
                .rev()
                .take_while(|c| is_word_char(*c))
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            return REGEX_KEYWORDS.contains(&word.as_str());
        }
        !matches!(last, ')' | ']' | '"' | '\'' | '`')
    }

    fn push(&mut self, ch: char) {
        self.out.push(ch);
        self.after_regex = false;
    }

    fn run(mut self) -> Result<String, String> {
        while let Some(ch) = self.peek(0) {
            match ch {
                c if c.is_whitespace() => {
                    self.add_whitespace(c == '\n' || c == '\r');
                    self.pos += 1;
                }
                '/' if self.peek(1) == Some('/') => self.skip_line_comment(),
                '/' if self.peek(1) == Some('*') => self.block_comment()?,
                '"' | '\'' => {
                    self.flush_whitespace(ch);
                    self.string_literal(ch)?;
                }
                '`' => {
                    self.flush_whitespace(ch);
                    self.template_literal()?;
                }
                '/' if self.regex_allowed() => {
                    self.flush_whitespace(ch);
                    self.regex_literal()?;
                }
                _ => {
                    self.flush_whitespace(ch);
                    self.push(ch);
                    self.pos += 1;
                }
            }
        }
        Ok(self.out.trim().to_string())
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek(0) {
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.pos += 1;
        }
        self.add_whitespace(false);
    }

    fn block_comment(&mut self) -> Result<(), String> {
        let start = self.pos;
        self.pos += 2;
        let mut newline = false;
        loop {
            match self.peek(0) {
                None => {
                    return Err(format!(
                        "unterminated comment starting at line {}",
                        self.line_at(start)
                    ));
                }
                Some('*') if self.peek(1) == Some('/') => {
                    self.pos += 2;
                    break;
                }
                Some(c) => {
                    newline |= c == '\n' || c == '\r';
                    self.pos += 1;
                }
            }
        }

        if self.chars.get(start + 2) == Some(&'!') {
            self.flush_whitespace('/');
            if !self.out.is_empty() && !self.out.ends_with('\n') {
                self.out.push('\n');
            }
            self.out.extend(&self.chars[start..self.pos]);
            self.out.push('\n');
            self.after_regex = false;
        } else {
            self.add_whitespace(newline);
        }
        Ok(())
    }

    fn string_literal(&mut self, quote: char) -> Result<(), String> {
        let start = self.pos;
        self.push(quote);
        self.pos += 1;
        loop {
            match self.peek(0) {
                None | Some('\n') => {
                    return Err(format!(
                        "unterminated string starting at line {}",
                        self.line_at(start)
                    ));
                }
                Some('\\') => {
                    self.out.push('\\');
                    if let Some(escaped) = self.peek(1) {
                        self.out.push(escaped);
                    }
                    self.pos += 2;
                }
                Some(c) => {
                    self.out.push(c);
                    self.pos += 1;
                    if c == quote {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn template_literal(&mut self) -> Result<(), String> {
        let start = self.pos;
        self.push('`');
        self.pos += 1;
        loop {
            match self.peek(0) {
                None => {
                    return Err(format!(
                        "unterminated template literal starting at line {}",
                        self.line_at(start)
                    ));
                }
                Some('$') if self.peek(1) == Some('{') => {
                    self.out.push_str("${");
                    self.pos += 2;
                    self.substitution(start)?;
                }
                Some('\\') => {
                    self.out.push('\\');
                    if let Some(escaped) = self.peek(1) {
                        self.out.push(escaped);
                    }
                    self.pos += 2;
                }
                Some(c) => {
                    self.out.push(c);
                    self.pos += 1;
                    if c == '`' {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Copy a `${ ... }` body verbatim up to its closing brace. Nested
    /// strings and templates are copied whole so their braces and backticks
    /// do not count.
    fn substitution(&mut self, template_start: usize) -> Result<(), String> {
        let mut depth = 1usize;
        loop {
            match self.peek(0) {
                None => {
                    return Err(format!(
                        "unterminated template literal starting at line {}",
                        self.line_at(template_start)
                    ));
                }
                Some(quote @ ('"' | '\'')) => self.string_literal(quote)?,
                Some('`') => self.template_literal()?,
                Some(c) => {
                    self.out.push(c);
                    self.pos += 1;
                    match c {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                return Ok(());
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    fn regex_literal(&mut self) -> Result<(), String> {
        let start = self.pos;
        self.push('/');
        self.pos += 1;
        let mut in_class = false;
        loop {
            match self.peek(0) {
                None | Some('\n') => {
                    return Err(format!(
                        "unterminated regular expression starting at line {}",
                        self.line_at(start)
                    ));
                }
                Some('\\') => {
                    self.out.push('\\');
                    if let Some(escaped) = self.peek(1) {
                        self.out.push(escaped);
                    }
                    self.pos += 2;
                }
                Some(c) => {
                    self.out.push(c);
                    self.pos += 1;
                    match c {
                        '[' => in_class = true,
                        ']' => in_class = false,
                        '/' if !in_class => break,
                        _ => {}
                    }
                }
            }
        }
        while let Some(flag) = self.peek(0) {
            if !flag.is_ascii_alphabetic() {
                break;
            }
            self.out.push(flag);
            self.pos += 1;
        }
        self.after_regex = true;
        Ok(())
    }
}

/// Minify a JavaScript source string.
pub fn minify_script(input: &str) -> Result<String, String> {
    let chars: Vec<char> = input.chars().collect();
    Minifier::new(&chars).run()
}
