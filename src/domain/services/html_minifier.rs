//! HTML whitespace collapsing
//!
//! Collapses whitespace in text nodes the way a `collapseWhitespace` HTML
//! minifier does: runs become a single space, and whitespace next to
//! block-level tags, comments or the document edges is removed. Comments
//! are kept (build markers live in them). `<script>`, `<style>`,
//! `<textarea>` and `<pre>` contents are copied verbatim.

/// Elements whose surrounding whitespace is significant
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "b", "bdi", "bdo", "big", "button", "cite", "code", "del", "dfn",
    "em", "font", "i", "img", "input", "ins", "kbd", "label", "mark", "math", "nobr", "object",
    "q", "rp", "rt", "rtc", "ruby", "s", "samp", "select", "small", "span", "strike", "strong",
    "sub", "sup", "svg", "textarea", "time", "tt", "u", "var",
];

/// Elements whose content is not parsed as markup
const RAW_TEXT_TAGS: &[&str] = &["script", "style", "textarea"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    /// Text that must be emitted unchanged
    Verbatim(String),
    Tag {
        name: String,
        markup: String,
    },
    Comment(String),
}

impl Node {
    fn is_inline(&self) -> bool {
        match self {
            Node::Tag { name, .. } => INLINE_TAGS.contains(&name.as_str()),
            Node::Text(_) | Node::Verbatim(_) => true,
            Node::Comment(_) => false,
        }
    }
}

struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    nodes: Vec<Node>,
    pre_depth: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            nodes: Vec::new(),
            pre_depth: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn line_at(&self, offset: usize) -> usize {
        1 + self.src[..offset].matches('\n').count()
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.pre_depth > 0 {
            self.nodes.push(Node::Verbatim(text.to_string()));
        } else if let Some(Node::Text(prev)) = self.nodes.last_mut() {
            prev.push_str(text);
        } else {
            self.nodes.push(Node::Text(text.to_string()));
        }
    }

    fn run(mut self) -> Result<Vec<Node>, String> {
        while self.pos < self.src.len() {
            let rest = self.rest();
            let Some(lt) = rest.find('<') else {
                self.push_text(rest);
                self.pos = self.src.len();
                break;
            };
            if lt > 0 {
                self.push_text(&rest[..lt]);
                self.pos += lt;
                continue;
            }

            if rest.starts_with("<!--") {
                self.comment()?;
            } else if starts_tag(rest) {
                self.tag()?;
            } else {
                self.push_text("<");
                self.pos += 1;
            }
        }
        Ok(self.nodes)
    }

    fn comment(&mut self) -> Result<(), String> {
        let start = self.pos;
        let Some(end) = self.rest()[4..].find("-->") else {
            return Err(format!(
                "unterminated comment starting at line {}",
                self.line_at(start)
            ));
        };
        let stop = self.pos + 4 + end + 3;
        self.nodes
            .push(Node::Comment(self.src[start..stop].to_string()));
        self.pos = stop;
        Ok(())
    }

    fn tag(&mut self) -> Result<(), String> {
        let start = self.pos;
        let Some(len) = tag_length(self.rest()) else {
            return Err(format!(
                "unterminated tag starting at line {}",
                self.line_at(start)
            ));
        };
        let raw = &self.src[start..start + len];
        self.pos += len;

        let closing = raw.starts_with("</");
        let name = tag_name(raw);
        let markup = normalize_tag(raw);

        if name == "pre" {
            if closing {
                self.pre_depth = self.pre_depth.saturating_sub(1);
            } else {
                self.pre_depth += 1;
            }
        }

        self.nodes.push(Node::Tag {
            name: name.clone(),
            markup,
        });

        let self_closing = raw.ends_with("/>");
        if !closing && !self_closing && RAW_TEXT_TAGS.contains(&name.as_str()) {
            self.raw_text(&name)?;
        }
        Ok(())
    }

    fn raw_text(&mut self, name: &str) -> Result<(), String> {
        let start = self.pos;
        let needle = format!("</{name}");
        let lower = self.rest().to_ascii_lowercase();
        let Some(end) = lower.find(&needle) else {
            return Err(format!(
                "unclosed <{name}> starting at line {}",
                self.line_at(start)
            ));
        };
        let content = &self.src[start..start + end];
        if !content.is_empty() {
            self.nodes.push(Node::Verbatim(content.to_string()));
        }
        self.pos += end;
        Ok(())
    }
}

fn starts_tag(rest: &str) -> bool {
    let mut chars = rest.chars().skip(1);
    match chars.next() {
        Some('/') => chars.next().is_some_and(|c| c.is_ascii_alphabetic()),
        Some('!') => true,
        Some(c) => c.is_ascii_alphabetic(),
        None => false,
    }
}

/// Byte length of the tag at the start of `rest`, honouring quoted values.
fn tag_length(rest: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, ch) in rest.char_indices().skip(1) {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(ch),
            (None, '>') => return Some(i + 1),
            _ => {}
        }
    }
    None
}

fn tag_name(raw: &str) -> String {
    raw.trim_start_matches('<')
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '!')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Collapse whitespace between attributes; quoted values are untouched.
fn normalize_tag(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut quote: Option<char> = None;
    let mut pending_space = false;
    for ch in raw.chars() {
        if let Some(q) = quote {
            out.push(ch);
            if ch == q {
                quote = None;
            }
            continue;
        }
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && ch != '>' {
            out.push(' ');
        }
        pending_space = false;
        if ch == '"' || ch == '\'' {
            quote = Some(ch);
        }
        out.push(ch);
    }
    out
}

fn collapse(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

/// Collapse insignificant whitespace in an HTML document.
pub fn collapse_whitespace(input: &str) -> Result<String, String> {
    let nodes = Tokenizer::new(input).run()?;
    let mut out = String::with_capacity(input.len());

    for (i, node) in nodes.iter().enumerate() {
        match node {
            Node::Text(text) => {
                let mut collapsed = collapse(text);
                let trim_start = i == 0 || !nodes[i - 1].is_inline();
                let trim_end = !matches!(nodes.get(i + 1), Some(next) if next.is_inline());
                if trim_start {
                    collapsed = collapsed.trim_start().to_string();
                }
                if trim_end {
                    collapsed = collapsed.trim_end().to_string();
                }
                out.push_str(&collapsed);
            }
            Node::Verbatim(text) | Node::Comment(text) => out.push_str(text),
            Node::Tag { markup, .. } => out.push_str(markup),
        }
    }

    Ok(out)
}
