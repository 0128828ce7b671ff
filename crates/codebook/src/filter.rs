//! Record filtering by model and tech.
//!
//! A record matches when its model equals the requested model (if any) and
//! its tech list contains every requested tech code. Record tokens are
//! trimmed before comparison; requested values are compared as given.

use crate::model::Data;

/// Query key for the model filter.
pub const MODEL_PARAM: &str = "model";

/// Query key for the tech filter. May repeat.
pub const TECH_PARAM: &str = "tech";

/// Conjunctive filter over records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Required model code. `None` accepts any model.
    pub model: Option<String>,
    /// Tech codes that must all be present.
    pub techs: Vec<String>,
}

impl RecordFilter {
    /// A filter that accepts every record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the given model code. An empty code clears the requirement.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.model = (!model.is_empty()).then_some(model);
        self
    }

    /// Require the given tech code in addition to any already required.
    #[must_use]
    pub fn with_tech(mut self, tech: impl Into<String>) -> Self {
        self.techs.push(tech.into());
        self
    }

    /// Build a filter from decoded query pairs.
    ///
    /// The first `model` value wins. Every `tech` value is kept, in order.
    /// Unrelated keys are ignored.
    pub fn from_query<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut model = None;
        let mut filter = Self::new();
        for (key, value) in pairs {
            match key.as_ref() {
                MODEL_PARAM if model.is_none() => model = Some(value.into()),
                TECH_PARAM => filter.techs.push(value.into()),
                _ => {}
            }
        }
        match model {
            Some(model) => filter.with_model(model),
            None => filter,
        }
    }

    /// Whether no constraint is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.model.is_none() && self.techs.is_empty()
    }

    /// Check a single record.
    #[must_use]
    pub fn matches(&self, data: &Data) -> bool {
        if let Some(model) = &self.model {
            if data.model != *model {
                return false;
            }
        }

        self.techs
            .iter()
            .all(|wanted| data.tech_codes().any(|token| token.trim() == wanted))
    }

    /// Apply the filter to a sequence, keeping order.
    pub fn apply<'a, I>(&'a self, records: I) -> impl Iterator<Item = &'a Data> + 'a
    where
        I: IntoIterator<Item = &'a Data>,
        I::IntoIter: 'a,
    {
        records.into_iter().filter(move |d| self.matches(d))
    }
}
