//! Code to label translation.
//!
//! Model and tech codes resolve differently when a code is unknown: a model
//! code passes through unchanged, while an unknown tech code is dropped from
//! the output.

use tracing::trace;

use crate::model::{Data, DataDetail, Reference, DESCRIPTION_PLACEHOLDER, TECH_SEPARATOR};

/// Read-only view over the two reference tables.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    models: &'a [Reference],
    techs: &'a [Reference],
}

impl<'a> Translator<'a> {
    /// Create a translator over the given tables.
    #[must_use]
    pub fn new(models: &'a [Reference], techs: &'a [Reference]) -> Self {
        Self { models, techs }
    }

    /// Label for a model code, or the code itself when unknown.
    #[must_use]
    pub fn model(&self, code: &str) -> String {
        match lookup(self.models, code) {
            Some(label) => label.to_string(),
            None => {
                trace!(code, "Unknown model code, passing through");
                code.to_string()
            }
        }
    }

    /// Labels for a `", "`-separated tech list. Unknown codes are dropped.
    #[must_use]
    pub fn tech(&self, codes: &str) -> Vec<String> {
        codes
            .split(TECH_SEPARATOR)
            .filter_map(|code| {
                let label = lookup(self.techs, code);
                if label.is_none() {
                    trace!(code, "Unknown tech code, dropping");
                }
                label.map(str::to_string)
            })
            .collect()
    }

    /// Build the enriched view of a record.
    #[must_use]
    pub fn detail(&self, data: &Data) -> DataDetail {
        DataDetail {
            code: data.code.clone(),
            name: data.name.clone(),
            description: DESCRIPTION_PLACEHOLDER.to_string(),
            model: self.model(&data.model),
            tech: self.tech(&data.tech).join(TECH_SEPARATOR),
            status: title_case(&data.status),
        }
    }
}

/// First entry wins.
fn lookup<'r>(table: &'r [Reference], key: &str) -> Option<&'r str> {
    table
        .iter()
        .find(|r| r.key == key)
        .map(|r| r.value.as_str())
}

/// Uppercase the first letter of every word, leaving the rest untouched.
///
/// Among ASCII characters, letters, digits and `_` belong to a word and
/// everything else is a boundary. Outside ASCII only whitespace is a
/// boundary, so `"a—b"` stays one word.
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_boundary = true;
    for c in s.chars() {
        if at_boundary {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_boundary = is_separator(c);
    }
    out
}

fn is_separator(c: char) -> bool {
    if c.is_ascii() {
        !(c.is_ascii_alphanumeric() || c == '_')
    } else {
        c.is_whitespace()
    }
}
