//! Named-placeholder query templates.
//!
//! Templates carry `{placeholder}` markers that must be substituted with
//! concrete literals before execution. Substitution is strict in both
//! directions: supplying a parameter whose placeholder does not occur in the
//! template fails, and so does rendering that leaves any placeholder
//! unresolved. A malformed template can therefore never reach the warehouse
//! with its defaults silently intact.

use board_core::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{[a-z][a-z0-9_]*\}").expect("valid regex"))
}

/// A query template with named `{placeholder}` markers.
#[derive(Debug, Clone)]
pub struct QueryTemplate {
    text: String,
}

impl QueryTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Names of all placeholders present in the template, in order of first
    /// occurrence.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for m in placeholder_pattern().find_iter(&self.text) {
            let name = &self.text[m.start() + 1..m.end() - 1];
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
        seen
    }

    /// Substitute every named parameter, requiring each to occur in the
    /// template and leaving no placeholder unresolved.
    pub fn render(&self, params: &[(&str, &str)]) -> Result<String> {
        let mut rendered = self.text.clone();

        for (name, value) in params {
            let marker = format!("{{{}}}", name);
            if !rendered.contains(&marker) {
                return Err(Error::MissingPlaceholder((*name).to_string()));
            }
            rendered = rendered.replace(&marker, value);
        }

        let leftover: Vec<&str> = placeholder_pattern()
            .find_iter(&rendered)
            .map(|m| m.as_str())
            .collect();
        if !leftover.is_empty() {
            return Err(Error::UnresolvedPlaceholders(leftover.join(", ")));
        }

        Ok(rendered)
    }
}
