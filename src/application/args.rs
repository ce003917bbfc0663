//! Template tag argument parsing
//!
//! Grammars:
//!
//! ```text
//! get_tag_list        [for <scope-or-var>] [limit <n>] as <var>
//! get_tag_cloud       [for <scope-or-var>] [limit <n>] as <var>
//! get_similar_objects to <obj> as <var> [for <app.model>]
//! include_tag_list    [<scope-or-var>]
//! include_tag_cloud   [<scope-or-var>]
//! ```
//!
//! Keyword clauses may come in any order but only once each.

use crate::application::context::is_identifier;
use crate::domain::{ContentType, Scope};
use crate::error::{Result, TagCloudError};

/// One whitespace-separated argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub quoted: bool,
}

impl Token {
    fn is_keyword(&self, keyword: &str) -> bool {
        !self.quoted && self.text == keyword
    }
}

/// Split raw tag arguments on whitespace, keeping quoted strings whole
pub fn split_args(tag: &str, raw: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = raw.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c == '"' || c == '\'' {
            chars.next();
            let mut text = String::new();
            loop {
                match chars.next() {
                    Some(q) if q == c => break,
                    Some(other) => text.push(other),
                    None => {
                        return Err(TagCloudError::syntax(
                            tag,
                            format!("has an unterminated string: {}{}", c, text),
                        ))
                    }
                }
            }
            tokens.push(Token { text, quoted: true });
        } else {
            let mut text = String::new();
            while let Some(&next) = chars.peek() {
                if next.is_whitespace() {
                    break;
                }
                text.push(next);
                chars.next();
            }
            tokens.push(Token {
                text,
                quoted: false,
            });
        }
    }

    Ok(tokens)
}

/// Where a tag list gets its scope from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceArg {
    /// Quoted scope such as `"blog.entry"`, parsed when the tag compiles
    Literal { raw: String, scope: Scope },
    /// Context variable resolved at render time
    Variable(String),
}

impl SourceArg {
    fn from_token(tag: &str, token: &Token) -> Result<Self> {
        if token.quoted {
            let scope = Scope::parse(&token.text).map_err(|e| {
                TagCloudError::syntax(tag, format!("has an invalid scope: {}", scope_reason(e)))
            })?;
            Ok(SourceArg::Literal {
                raw: token.text.clone(),
                scope,
            })
        } else if is_identifier(&token.text) {
            Ok(SourceArg::Variable(token.text.clone()))
        } else {
            Err(TagCloudError::syntax(
                tag,
                format!(
                    "expects a quoted scope or a variable name, got '{}'",
                    token.text
                ),
            ))
        }
    }
}

fn scope_reason(err: TagCloudError) -> String {
    match err {
        TagCloudError::Lookup(msg) => msg,
        other => other.to_string(),
    }
}

/// Arguments of `get_tag_list` and `get_tag_cloud`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagListArgs {
    pub source: Option<SourceArg>,
    pub limit: Option<usize>,
    pub target: String,
}

/// Arguments of `get_similar_objects`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarArgs {
    pub object: String,
    pub target: String,
    pub model: Option<ContentType>,
}

/// Walks `keyword operand` pairs, rejecting repeats
struct Clauses<'a> {
    tag: &'a str,
    tokens: &'a [Token],
    pos: usize,
    seen: Vec<&'a str>,
}

impl<'a> Clauses<'a> {
    fn new(tag: &'a str, tokens: &'a [Token]) -> Self {
        Clauses {
            tag,
            tokens,
            pos: 0,
            seen: Vec::new(),
        }
    }

    /// Next `(keyword, operand)` pair, if any
    fn next_clause(&mut self, keywords: &[&'a str]) -> Result<Option<(&'a str, &'a Token)>> {
        let Some(token) = self.tokens.get(self.pos) else {
            return Ok(None);
        };

        let keyword = keywords
            .iter()
            .copied()
            .find(|k| token.is_keyword(k))
            .ok_or_else(|| {
                TagCloudError::syntax(self.tag, format!("got unexpected argument '{}'", token.text))
            })?;

        if self.seen.contains(&keyword) {
            return Err(TagCloudError::syntax(
                self.tag,
                format!("takes '{}' only once", keyword),
            ));
        }
        self.seen.push(keyword);

        let operand = self.tokens.get(self.pos + 1).ok_or_else(|| {
            TagCloudError::syntax(self.tag, format!("expects a value after '{}'", keyword))
        })?;
        self.pos += 2;
        Ok(Some((keyword, operand)))
    }
}

fn target_name(tag: &str, token: &Token) -> Result<String> {
    if token.quoted || !is_identifier(&token.text) {
        return Err(TagCloudError::syntax(
            tag,
            format!("'as' needs a variable name, got '{}'", token.text),
        ));
    }
    Ok(token.text.clone())
}

fn parse_limit(tag: &str, token: &Token) -> Result<usize> {
    let invalid = || {
        TagCloudError::syntax(
            tag,
            format!("limit must be a positive integer, got '{}'", token.text),
        )
    };
    if token.quoted {
        return Err(invalid());
    }
    match token.text.parse::<i64>() {
        Ok(n) if n > 0 => usize::try_from(n).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

impl TagListArgs {
    pub fn parse(tag: &str, tokens: &[Token]) -> Result<Self> {
        let mut source = None;
        let mut limit = None;
        let mut target = None;

        let mut clauses = Clauses::new(tag, tokens);
        while let Some((keyword, operand)) = clauses.next_clause(&["for", "limit", "as"])? {
            match keyword {
                "for" => source = Some(SourceArg::from_token(tag, operand)?),
                "limit" => limit = Some(parse_limit(tag, operand)?),
                _ => target = Some(target_name(tag, operand)?),
            }
        }

        let target =
            target.ok_or_else(|| TagCloudError::syntax(tag, "requires 'as <variable>'"))?;
        Ok(TagListArgs {
            source,
            limit,
            target,
        })
    }
}

impl SimilarArgs {
    pub fn parse(tag: &str, tokens: &[Token]) -> Result<Self> {
        let mut object = None;
        let mut target = None;
        let mut model = None;

        let mut clauses = Clauses::new(tag, tokens);
        while let Some((keyword, operand)) = clauses.next_clause(&["to", "as", "for"])? {
            match keyword {
                "to" => {
                    if operand.quoted || !is_identifier(&operand.text) {
                        return Err(TagCloudError::syntax(
                            tag,
                            format!("'to' needs a variable name, got '{}'", operand.text),
                        ));
                    }
                    object = Some(operand.text.clone());
                }
                "as" => target = Some(target_name(tag, operand)?),
                _ => {
                    let content_type = operand.text.parse::<ContentType>().map_err(|_| {
                        TagCloudError::syntax(
                            tag,
                            format!("'for' needs a model like app_label.model, got '{}'", operand.text),
                        )
                    })?;
                    model = Some(content_type);
                }
            }
        }

        Ok(SimilarArgs {
            object: object.ok_or_else(|| TagCloudError::syntax(tag, "requires 'to <object>'"))?,
            target: target.ok_or_else(|| TagCloudError::syntax(tag, "requires 'as <variable>'"))?,
            model,
        })
    }
}

/// Argument of the inclusion tags: an optional scope
pub fn parse_include_args(tag: &str, tokens: &[Token]) -> Result<Option<SourceArg>> {
    match tokens {
        [] => Ok(None),
        [token] => SourceArg::from_token(tag, token).map(Some),
        _ => Err(TagCloudError::syntax(tag, "takes at most one argument")),
    }
}
