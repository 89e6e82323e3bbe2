//! Path rewriting for generated HTML
//!
//! Turns development-time references into production output paths with an
//! ordered table of rules:
//!
//! - literal substitutions (`href="src/styles/styles.scss"` → compiled path)
//! - prefix substitutions (`src="node_modules/` → `src="libs/`)
//! - script blocks (`<!-- build:js --> … <!-- endbuild -->`) replaced with
//!   one `<script>` tag per reference
//!
//! Matching is exact. The outcome records how often each rule fired, which
//! required markers were absent and which raw references survived, so the
//! caller can fail loudly instead of shipping stale paths.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum RuleKind {
    Literal { from: String, to: String },
    Block { name: String, references: Vec<String> },
}

/// One rewrite rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    kind: RuleKind,
    required: bool,
}

impl RewriteRule {
    /// The marker text this rule looks for
    pub fn marker(&self) -> String {
        match &self.kind {
            RuleKind::Literal { from, .. } => from.clone(),
            RuleKind::Block { name, .. } => format!("<!-- build:{name} -->"),
        }
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

impl fmt::Display for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RuleKind::Literal { from, to } => write!(f, "{from} -> {to}"),
            RuleKind::Block { name, references } => {
                write!(f, "build:{name} -> {} reference(s)", references.len())
            }
        }
    }
}

/// How often a rule matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedRule {
    pub marker: String,
    pub count: usize,
}

/// Result of rewriting one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub document: String,
    pub applied: Vec<AppliedRule>,
    /// Required markers that were not found
    pub missing: Vec<String>,
    /// Raw references still present after rewriting
    pub unrewritten: Vec<String>,
}

impl RewriteOutcome {
    /// Total substitutions performed
    pub fn substitutions(&self) -> usize {
        self.applied.iter().map(|a| a.count).sum()
    }
}

/// Ordered rule table
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    rules: Vec<RewriteRule>,
    forbidden: Vec<String>,
}

impl Rewriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every occurrence of `from` with `to`
    pub fn literal(mut self, from: impl Into<String>, to: impl Into<String>, required: bool) -> Self {
        self.rules.push(RewriteRule {
            kind: RuleKind::Literal {
                from: from.into(),
                to: to.into(),
            },
            required,
        });
        self
    }

    /// Replace the `build:<name>` block with script tags for `references`
    pub fn script_block(mut self, name: impl Into<String>, references: Vec<String>, required: bool) -> Self {
        self.rules.push(RewriteRule {
            kind: RuleKind::Block {
                name: name.into(),
                references,
            },
            required,
        });
        self
    }

    /// Text that must not survive rewriting (e.g. `="node_modules/`)
    pub fn forbid(mut self, needle: impl Into<String>) -> Self {
        self.forbidden.push(needle.into());
        self
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Apply every rule in order.
    pub fn apply(&self, document: &str) -> RewriteOutcome {
        let mut current = document.to_string();
        let mut outcome = RewriteOutcome::default();

        for rule in &self.rules {
            let (next, count) = match &rule.kind {
                RuleKind::Literal { from, to } => replace_literal(&current, from, to),
                RuleKind::Block { name, references } => {
                    replace_block(&current, name, references)
                }
            };
            current = next;
            if count == 0 && rule.required {
                outcome.missing.push(rule.marker());
            }
            outcome.applied.push(AppliedRule {
                marker: rule.marker(),
                count,
            });
        }

        for needle in &self.forbidden {
            outcome
                .unrewritten
                .extend(find_references(&current, needle));
        }

        outcome.document = current;
        outcome
    }
}

fn replace_literal(document: &str, from: &str, to: &str) -> (String, usize) {
    if from.is_empty() {
        return (document.to_string(), 0);
    }
    let count = document.matches(from).count();
    if count == 0 {
        return (document.to_string(), 0);
    }
    (document.replace(from, to), count)
}

/// Locate the next `<!-- … -->` whose trimmed body satisfies `accept`.
///
/// Returns the byte range of the whole comment.
fn find_comment(document: &str, from: usize, accept: impl Fn(&str) -> bool) -> Option<(usize, usize)> {
    let mut cursor = from;
    while let Some(offset) = document[cursor..].find("<!--") {
        let start = cursor + offset;
        let body_start = start + 4;
        let close = document[body_start..].find("-->")?;
        let end = body_start + close + 3;
        if accept(document[body_start..body_start + close].trim()) {
            return Some((start, end));
        }
        cursor = end;
    }
    None
}

fn script_tags(references: &[String], indent: &str) -> String {
    references
        .iter()
        .map(|r| format!("{indent}<script src=\"{r}\"></script>"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn line_indent(document: &str, at: usize) -> &str {
    let line_start = document[..at].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let prefix = &document[line_start..at];
    if prefix.chars().all(|c| c == ' ' || c == '\t') {
        prefix
    } else {
        ""
    }
}

fn replace_block(document: &str, name: &str, references: &[String]) -> (String, usize) {
    let opening = format!("build:{name}");
    let mut out = String::with_capacity(document.len());
    let mut cursor = 0;
    let mut count = 0;

    while let Some((start, open_end)) = find_comment(document, cursor, |body| body == opening) {
        let Some((_, close_end)) = find_comment(document, open_end, |body| body == "endbuild") else {
            break;
        };
        let indent = line_indent(document, start);
        out.push_str(&document[cursor..start]);
        out.push_str(script_tags(references, indent).trim_start());
        cursor = close_end;
        count += 1;
    }

    out.push_str(&document[cursor..]);
    (out, count)
}

/// Collect each `needle…"` reference (up to the closing quote) left in the document.
fn find_references(document: &str, needle: &str) -> Vec<String> {
    if needle.is_empty() {
        return Vec::new();
    }
    document
        .match_indices(needle)
        .map(|(i, _)| {
            let rest = &document[i + needle.len()..];
            let end = rest.find(['"', '\'', ' ', '>']).unwrap_or(rest.len());
            format!("{needle}{}", &rest[..end])
        })
        .collect()
}
