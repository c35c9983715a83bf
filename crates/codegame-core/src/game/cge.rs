//! Extraction of event and command names from CGE (CodeGame Events) files
//!
//! Only the top level of a CGE file matters here:
//!
//! ```text
//! name tic_tac_toe
//! cge 0.5
//!
//! // Place a mark.
//! command mark { row: int, column: int }
//! event board { board: list<list<string>> }
//! type field { ... }
//! ```

use anyhow::Result;

/// Names declared by a CGE file, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CgeDefinitions {
    /// Value of the `cge` version header
    pub version: String,
    /// Game name from the `name` header, if present
    pub name: Option<String>,
    pub events: Vec<String>,
    pub commands: Vec<String>,
}

/// Parse the top-level declarations of a CGE file
pub fn parse_cge(source: &str) -> Result<CgeDefinitions> {
    let stripped = strip_comments(source);
    let mut definitions = CgeDefinitions::default();
    let mut version = None;

    let mut depth: usize = 0;
    let mut tokens = tokenize(&stripped).into_iter().peekable();
    while let Some(token) = tokens.next() {
        match token.as_str() {
            "{" | "<" | "(" => depth += 1,
            "}" | ">" | ")" => depth = depth.saturating_sub(1),
            keyword if depth == 0 => {
                let target = match keyword {
                    "cge" => &mut version,
                    "name" => &mut definitions.name,
                    "event" | "command" => {
                        let Some(name) = tokens.next_if(|t| is_identifier(t)) else {
                            anyhow::bail!("Expected a name after '{}' in CGE file", keyword);
                        };
                        if keyword == "event" {
                            definitions.events.push(name);
                        } else {
                            definitions.commands.push(name);
                        }
                        continue;
                    }
                    _ => continue,
                };
                if target.is_none() {
                    *target = tokens.next_if(|t| !is_punctuation(t));
                }
            }
            _ => {}
        }
    }

    definitions.version =
        version.ok_or_else(|| anyhow::anyhow!("CGE file is missing the 'cge <version>' header"))?;
    Ok(definitions)
}

fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '/' && chars.peek() == Some(&'/') {
            for next in chars.by_ref() {
                if next == '\n' {
                    out.push('\n');
                    break;
                }
            }
        } else if c == '/' && chars.peek() == Some(&'*') {
            chars.next();
            let mut previous = '\0';
            for next in chars.by_ref() {
                if previous == '*' && next == '/' {
                    break;
                }
                previous = next;
            }
            out.push(' ');
        } else {
            out.push(c);
        }
    }

    out
}

fn is_punctuation(token: &str) -> bool {
    matches!(token, "{" | "}" | "<" | ">" | "(" | ")" | "," | ":" | "?")
}

fn is_identifier(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn tokenize(source: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in source.chars() {
        if c.is_whitespace() || is_punctuation(&c.to_string()) {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            if !c.is_whitespace() {
                tokens.push(c.to_string());
            }
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
