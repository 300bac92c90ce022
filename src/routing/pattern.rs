//! Path template compilation.
//!
//! # Syntax
//! - literal text matches itself (case-sensitive)
//! - `:name` captures one non-empty segment (`[^/]+`)
//! - `:name(re)` captures with a custom regular expression
//! - `(re)` captures with a custom regular expression under a positional name
//! - `*` matches the rest of the path, possibly empty, under a positional name
//! - a group may be followed by a modifier: `?` optional, `+` one or more,
//!   `*` zero or more; a `/` right before a modified group belongs to it,
//!   so `/books/:id?` matches both `/books` and `/books/42`
//! - `{...}` groups text without capturing and accepts the same modifiers
//! - `\` takes the next character literally
//!
//! Positional names are `"0"`, `"1"`, ... in order of appearance among the
//! unnamed groups. Templates are compiled into one anchored [`Regex`] at
//! registration time; matching is a single `captures` call.
//!
//! # Design Decisions
//! - Whole-path match: `/a` does not match `/a/` or `/a/b`
//! - Capture groups are named internally (`p0`, `p1`, ...) so user supplied
//!   groups inside `:name(re)` never shift parameter indices
//! - Literal characters that never appear raw in a request path (non-ASCII,
//!   spaces, `#`, ...) are percent-encoded before matching
//! - A stray `?` or `+`, or an unbalanced `{ }`, fails compilation

use std::collections::HashSet;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use regex::Regex;

use crate::error::RouterError;
use crate::routing::params::Params;

const DEFAULT_SEGMENT: &str = "[^/]+";
const WILDCARD: &str = ".*";

/// A compiled path template.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
    /// Parameter name for internal group `p{index}`.
    names: Vec<String>,
}

impl Pattern {
    /// Compile a path template.
    pub fn compile(source: &str) -> Result<Self, RouterError> {
        let mut compiler = Compiler::new(source);
        let mut chars = source.chars().peekable();
        compiler.parse(&mut chars, false)?;

        let regex = Regex::new(&format!("^{}$", compiler.body))
            .map_err(|e| RouterError::pattern(source, e.to_string()))?;

        Ok(Self {
            source: source.to_string(),
            regex,
            names: compiler.names,
        })
    }

    /// Match `path` against this pattern, returning the captured parameters.
    ///
    /// Optional groups that did not participate are left out.
    pub fn captures(&self, path: &str) -> Option<Params> {
        let caps = self.regex.captures(path)?;
        let mut params = Params::with_capacity(self.names.len());
        for (index, name) in self.names.iter().enumerate() {
            if let Some(value) = caps.name(&format!("p{index}")) {
                params.insert(name.clone(), value.as_str().to_string());
            }
        }
        Some(params)
    }

    /// Returns true if `path` matches, without collecting parameters.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// The template this pattern was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Parameter names in order of appearance.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Group modifier following a parameter, regex group, wildcard or `{ }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    Optional,
    OneOrMore,
    ZeroOrMore,
}

impl Modifier {
    fn take(chars: &mut Peekable<Chars<'_>>) -> Option<Self> {
        let modifier = match chars.peek()? {
            '?' => Modifier::Optional,
            '+' => Modifier::OneOrMore,
            '*' => Modifier::ZeroOrMore,
            _ => return None,
        };
        chars.next();
        Some(modifier)
    }

    fn suffix(self) -> &'static str {
        match self {
            Modifier::Optional => "?",
            Modifier::OneOrMore => "+",
            Modifier::ZeroOrMore => "*",
        }
    }
}

struct Compiler<'a> {
    source: &'a str,
    body: String,
    names: Vec<String>,
    seen: HashSet<String>,
    positional: usize,
    /// Offset in `body` of an unescaped `/` that was the last thing pushed.
    slash_at: Option<usize>,
}

impl<'a> Compiler<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            body: String::with_capacity(source.len() * 2),
            names: Vec::new(),
            seen: HashSet::new(),
            positional: 0,
            slash_at: None,
        }
    }

    fn error(&self, reason: impl Into<String>) -> RouterError {
        RouterError::pattern(self.source, reason)
    }

    /// Compile template text until the end of input, or until the closing
    /// `}` when `in_brace` is set.
    fn parse(
        &mut self,
        chars: &mut Peekable<Chars<'_>>,
        in_brace: bool,
    ) -> Result<(), RouterError> {
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    let escaped = chars.next().ok_or_else(|| self.error("trailing `\\`"))?;
                    self.literal(escaped);
                }
                ':' => {
                    let name = self.param_name(chars)?;
                    let expr = if chars.peek() == Some(&'(') {
                        chars.next();
                        read_group(self.source, chars)?
                    } else {
                        DEFAULT_SEGMENT.to_string()
                    };
                    self.group(name, &expr, chars);
                }
                '(' => {
                    let expr = read_group(self.source, chars)?;
                    let name = self.next_positional();
                    self.group(name, &expr, chars);
                }
                '*' => {
                    let name = self.next_positional();
                    self.group(name, WILDCARD, chars);
                }
                '{' => {
                    if in_brace {
                        return Err(self.error("nested `{`"));
                    }
                    self.slash_at = None;
                    let start = self.body.len();
                    self.parse(chars, true)?;
                    let inner = self.body.split_off(start);
                    let suffix = Modifier::take(chars).map_or("", Modifier::suffix);
                    self.body.push_str(&format!("(?:{inner}){suffix}"));
                    self.slash_at = None;
                }
                '}' if in_brace => return Ok(()),
                '}' => return Err(self.error("unbalanced `}`")),
                ')' => return Err(self.error("unbalanced `)`")),
                '?' | '+' => {
                    return Err(self.error(format!(
                        "modifier `{c}` must follow a parameter, a group or `{{ }}`"
                    )));
                }
                '/' => {
                    self.slash_at = Some(self.body.len());
                    self.body.push('/');
                }
                other => self.literal(other),
            }
        }

        if in_brace {
            return Err(self.error("unbalanced `{`"));
        }
        Ok(())
    }

    fn param_name(&mut self, chars: &mut Peekable<Chars<'_>>) -> Result<String, RouterError> {
        let mut name = String::new();
        while let Some(&n) = chars.peek() {
            if n.is_ascii_alphanumeric() || n == '_' {
                name.push(n);
                chars.next();
            } else {
                break;
            }
        }
        if name.is_empty() {
            return Err(self.error("expected a parameter name after `:`"));
        }
        if name.starts_with(|ch: char| ch.is_ascii_digit()) {
            return Err(self.error(format!(
                "parameter name `{name}` must not start with a digit"
            )));
        }
        if !self.seen.insert(name.clone()) {
            return Err(self.error(format!("duplicate parameter name `{name}`")));
        }
        Ok(name)
    }

    fn next_positional(&mut self) -> String {
        let name = self.positional.to_string();
        self.positional += 1;
        name
    }

    fn literal(&mut self, c: char) {
        self.slash_at = None;
        let mut buf = [0u8; 4];
        let text: &str = c.encode_utf8(&mut buf);
        if needs_encoding(c) {
            self.body.push_str(&regex::escape(&urlencoding::encode(text)));
        } else {
            self.body.push_str(&regex::escape(text));
        }
    }

    fn group(&mut self, name: String, expr: &str, chars: &mut Peekable<Chars<'_>>) {
        let modifier = Modifier::take(chars);
        let prefixed = match (self.slash_at.take(), modifier) {
            (Some(at), Some(_)) => {
                self.body.truncate(at);
                true
            }
            _ => false,
        };

        let index = self.names.len();
        let fragment = match (modifier, prefixed) {
            (None, _) => format!("(?P<p{index}>{expr})"),
            (Some(Modifier::Optional), true) => format!("(?:/(?P<p{index}>{expr}))?"),
            (Some(Modifier::Optional), false) => format!("(?P<p{index}>{expr})?"),
            (Some(Modifier::OneOrMore), true) => {
                format!("/(?P<p{index}>(?:{expr})(?:/(?:{expr}))*)")
            }
            (Some(Modifier::OneOrMore), false) => format!("(?P<p{index}>(?:{expr})+)"),
            (Some(Modifier::ZeroOrMore), true) => {
                format!("(?:/(?P<p{index}>(?:{expr})(?:/(?:{expr}))*))?")
            }
            (Some(Modifier::ZeroOrMore), false) => format!("(?P<p{index}>(?:{expr})*)"),
        };
        self.body.push_str(&fragment);
        self.names.push(name);
    }
}

/// Characters a client always sends percent-encoded in a path.
fn needs_encoding(c: char) -> bool {
    !c.is_ascii()
        || c.is_ascii_control()
        || matches!(c, ' ' | '"' | '#' | '<' | '>' | '?' | '`' | '{' | '}')
}

/// Read a parenthesised expression. The opening `(` is already consumed.
fn read_group(source: &str, chars: &mut Peekable<Chars<'_>>) -> Result<String, RouterError> {
    let mut expr = String::new();
    let mut depth = 1usize;
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                expr.push(c);
                let escaped = chars
                    .next()
                    .ok_or_else(|| RouterError::pattern(source, "trailing `\\`"))?;
                expr.push(escaped);
                continue;
            }
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            '(' if !in_class => depth += 1,
            ')' if !in_class => {
                depth -= 1;
                if depth == 0 {
                    if expr.is_empty() {
                        return Err(RouterError::pattern(source, "empty `()` group"));
                    }
                    return Ok(expr);
                }
            }
            _ => {}
        }
        expr.push(c);
    }

    Err(RouterError::pattern(source, "unbalanced `(`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_pattern_matches_exactly() {
        let p = Pattern::compile("/books").unwrap();
        assert!(p.is_match("/books"));
        assert!(!p.is_match("/books/"));
        assert!(!p.is_match("/Books"));
        assert!(!p.is_match("/books/1"));
    }

    #[test]
    fn named_segment_is_captured() {
        let p = Pattern::compile("/books/:id").unwrap();
        let params = p.captures("/books/42").unwrap();
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.len(), 1);

        assert!(p.captures("/books/").is_none());
        assert!(p.captures("/books/42/pages").is_none());
    }

    #[test]
    fn multiple_segments_keep_order() {
        let p = Pattern::compile("/users/:user/posts/:post").unwrap();
        let params = p.captures("/users/ada/posts/7").unwrap();
        let collected: Vec<_> = params.iter().collect();
        assert_eq!(collected, vec![("user", "ada"), ("post", "7")]);
        assert_eq!(p.param_names().collect::<Vec<_>>(), vec!["user", "post"]);
    }

    #[test]
    fn segment_can_be_part_of_a_segment() {
        let p = Pattern::compile("/files/:name.json").unwrap();
        let params = p.captures("/files/report.json").unwrap();
        assert_eq!(params.get("name"), Some("report"));
    }

    #[test]
    fn custom_regex_restricts_segment() {
        let p = Pattern::compile(r"/books/:id(\d+)").unwrap();
        assert_eq!(p.captures("/books/12").unwrap().get("id"), Some("12"));
        assert!(p.captures("/books/abc").is_none());
    }

    #[test]
    fn inner_groups_do_not_shift_params() {
        let p = Pattern::compile(r"/v/:version(v(1|2))/:rest").unwrap();
        let params = p.captures("/v/v2/items").unwrap();
        assert_eq!(params.get("version"), Some("v2"));
        assert_eq!(params.get("rest"), Some("items"));
    }

    #[test]
    fn wildcard_captures_remainder_positionally() {
        let p = Pattern::compile("/static/*").unwrap();
        assert_eq!(p.captures("/static/css/site.css").unwrap().get("0"), Some("css/site.css"));
        assert_eq!(p.captures("/static/").unwrap().get("0"), Some(""));
        assert!(p.captures("/static").is_none());
    }

    #[test]
    fn anonymous_groups_share_the_positional_counter() {
        let p = Pattern::compile(r"/(\d+)/:slug/*").unwrap();
        let params = p.captures("/2024/hello/a/b").unwrap();
        assert_eq!(params.get("0"), Some("2024"));
        assert_eq!(params.get("slug"), Some("hello"));
        assert_eq!(params.get("1"), Some("a/b"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let p = Pattern::compile(r"/a.b\+c").unwrap();
        assert!(p.is_match("/a.b+c"));
        assert!(!p.is_match("/axbbc"));

        let escaped = Pattern::compile(r"/price\:usd").unwrap();
        assert!(escaped.is_match("/price:usd"));
        assert_eq!(escaped.param_names().count(), 0);
    }

    #[test]
    fn malformed_templates_are_rejected() {
        for bad in [
            "/books/:",
            "/books/:/x",
            "/books/:1st",
            "/a/:id/:id",
            "/a/:id(",
            "/a/:id()",
            "/a)",
            r"/a\",
            "/a/:id([)",
            "/books?",
            "/a+",
            "/book{s",
            "/books}",
            "/a{b{c}}",
        ] {
            let err = Pattern::compile(bad).unwrap_err();
            match err {
                RouterError::Pattern { pattern, .. } => assert_eq!(pattern, bad),
            }
        }
    }

    #[test]
    fn optional_parameter_takes_the_preceding_slash() {
        let p = Pattern::compile("/books/:id?").unwrap();
        assert!(p.captures("/books").unwrap().is_empty());
        assert_eq!(p.captures("/books/42").unwrap().get("id"), Some("42"));
        assert!(p.captures("/books/").is_none());
        assert!(p.captures("/books/42/7").is_none());
    }

    #[test]
    fn repeated_parameter_spans_segments() {
        let any = Pattern::compile("/files/:path*").unwrap();
        let params = any.captures("/files/a/b/c").unwrap();
        assert_eq!(params.iter().collect::<Vec<_>>(), vec![("path", "a/b/c")]);
        assert!(any.captures("/files").unwrap().is_empty());

        let some = Pattern::compile("/files/:path+").unwrap();
        assert_eq!(some.captures("/files/a/b").unwrap().get("path"), Some("a/b"));
        assert!(some.captures("/files").is_none());
        assert!(some.captures("/files/").is_none());
    }

    #[test]
    fn modifier_applies_to_custom_regex_groups() {
        let p = Pattern::compile(r"/page/:n(\d+)?").unwrap();
        assert!(p.is_match("/page"));
        assert_eq!(p.captures("/page/3").unwrap().get("n"), Some("3"));
        assert!(!p.is_match("/page/x"));
    }

    #[test]
    fn braces_group_without_capturing() {
        let plural = Pattern::compile("/book{s}?").unwrap();
        assert!(plural.is_match("/book"));
        assert!(plural.is_match("/books"));
        assert!(!plural.is_match("/bookss"));
        assert_eq!(plural.param_names().count(), 0);

        let legacy = Pattern::compile("{/v1}?/users/:id").unwrap();
        assert_eq!(legacy.captures("/v1/users/7").unwrap().get("id"), Some("7"));
        assert_eq!(legacy.captures("/users/7").unwrap().get("id"), Some("7"));
    }

    #[test]
    fn non_ascii_literals_match_encoded_paths() {
        let p = Pattern::compile("/caf\u{e9}/:item").unwrap();
        assert_eq!(p.captures("/caf%C3%A9/tea").unwrap().get("item"), Some("tea"));
        assert!(!p.is_match("/caf\u{e9}/tea"));

        let spaced = Pattern::compile("/my docs").unwrap();
        assert!(spaced.is_match("/my%20docs"));
    }

    #[test]
    fn escaped_modifiers_are_literal() {
        let p = Pattern::compile(r"/what\?").unwrap();
        assert!(p.is_match("/what%3F"));
    }

    #[test]
    fn display_is_the_source() {
        let p = Pattern::compile("/books/:id").unwrap();
        assert_eq!(p.to_string(), "/books/:id");
        assert_eq!(p.as_str(), "/books/:id");
    }
}
