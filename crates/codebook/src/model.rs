//! Record and reference types.
//!
//! Records keep raw codes; display labels only appear in [`DataDetail`],
//! which is produced at read time by the translator.
//!
//! Records, references and the seed document bind from JSON objects only.
//! Keys match case-insensitively, `null` leaves a field as it was, and
//! unknown keys are skipped. A later duplicate key overwrites an earlier one.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder served in place of a record's own description.
pub const DESCRIPTION_PLACEHOLDER: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua";

/// Separator between tech codes in [`Data::tech`].
pub const TECH_SEPARATOR: &str = ", ";

/// A catalog record.
///
/// Fields missing from JSON input bind to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Data {
    /// Identifier. Expected unique, not enforced.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Model code, a key into the model reference table.
    pub model: String,
    /// Tech codes joined by `", "`, each a key into the tech reference table.
    pub tech: String,
    /// Free-form status.
    pub status: String,
    /// Optional description. Never served on the detail view.
    #[serde(skip_serializing_if = "is_blank")]
    pub description: Option<String>,
}

fn is_blank(description: &Option<String>) -> bool {
    description.as_deref().map_or(true, str::is_empty)
}

impl Data {
    /// Split the tech list into its raw tokens.
    pub fn tech_codes(&self) -> impl Iterator<Item = &str> {
        self.tech.split(TECH_SEPARATOR)
    }
}

/// A key to label mapping entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Internal code.
    pub key: String,
    /// Display label.
    pub value: String,
}

impl Reference {
    /// Create a reference entry.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Entry in the model reference table.
pub type ModelReference = Reference;

/// Entry in the tech reference table.
pub type TechReference = Reference;

/// The enriched single-record view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataDetail {
    /// Record code.
    pub code: String,
    /// Record name.
    pub name: String,
    /// Always [`DESCRIPTION_PLACEHOLDER`].
    pub description: String,
    /// Translated model label.
    pub model: String,
    /// Translated tech labels joined by `", "`.
    pub tech: String,
    /// Title-cased status.
    pub status: String,
}

/// The startup document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Seed {
    /// Records, in load order.
    pub data: Vec<Data>,
    /// Model code labels.
    pub model_references: Vec<ModelReference>,
    /// Tech code labels.
    pub tech_references: Vec<TechReference>,
}

/// Read the next value into `slot` unless it is `null`.
fn assign<'de, A, T>(map: &mut A, slot: &mut T) -> Result<(), A::Error>
where
    A: MapAccess<'de>,
    T: Deserialize<'de>,
{
    if let Some(value) = map.next_value::<Option<T>>()? {
        *slot = value;
    }
    Ok(())
}

/// A type bound field by field from a JSON object.
trait ObjectFields: Default {
    /// Lowercase field names, indexed by [`ObjectFields::bind_field`].
    const FIELDS: &'static [&'static str];

    fn bind_field<'de, A: MapAccess<'de>>(
        &mut self,
        index: usize,
        map: &mut A,
    ) -> Result<(), A::Error>;
}

/// Binds a JSON object onto a default value, one key at a time.
///
/// Sequences, scalars and `null` fall through to serde's default visitor
/// methods and fail with "expected a JSON object".
struct ObjectVisitor<T>(PhantomData<T>);

impl<'de, T: ObjectFields> Visitor<'de> for ObjectVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<T, A::Error> {
        let mut value = T::default();
        while let Some(key) = map.next_key::<String>()? {
            let key = key.to_lowercase();
            match T::FIELDS.iter().position(|field| *field == key) {
                Some(index) => value.bind_field(index, &mut map)?,
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(value)
    }
}

fn deserialize_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: ObjectFields,
{
    deserializer.deserialize_map(ObjectVisitor(PhantomData))
}

impl ObjectFields for Data {
    const FIELDS: &'static [&'static str] =
        &["code", "name", "model", "tech", "status", "description"];

    fn bind_field<'de, A: MapAccess<'de>>(
        &mut self,
        index: usize,
        map: &mut A,
    ) -> Result<(), A::Error> {
        match index {
            0 => assign(map, &mut self.code),
            1 => assign(map, &mut self.name),
            2 => assign(map, &mut self.model),
            3 => assign(map, &mut self.tech),
            4 => assign(map, &mut self.status),
            _ => {
                if let Some(description) = map.next_value::<Option<String>>()? {
                    self.description = Some(description);
                }
                Ok(())
            }
        }
    }
}

impl ObjectFields for Reference {
    const FIELDS: &'static [&'static str] = &["key", "value"];

    fn bind_field<'de, A: MapAccess<'de>>(
        &mut self,
        index: usize,
        map: &mut A,
    ) -> Result<(), A::Error> {
        match index {
            0 => assign(map, &mut self.key),
            _ => assign(map, &mut self.value),
        }
    }
}

impl ObjectFields for Seed {
    const FIELDS: &'static [&'static str] = &["data", "model_references", "tech_references"];

    fn bind_field<'de, A: MapAccess<'de>>(
        &mut self,
        index: usize,
        map: &mut A,
    ) -> Result<(), A::Error> {
        match index {
            0 => assign(map, &mut self.data),
            1 => assign(map, &mut self.model_references),
            _ => assign(map, &mut self.tech_references),
        }
    }
}

impl<'de> Deserialize<'de> for Data {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_object(deserializer)
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_object(deserializer)
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_object(deserializer)
    }
}
