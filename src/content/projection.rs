//! Field projection over content records

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::ContentRecord;

/// Reserved field name carrying the derived slug
pub const SLUG_FIELD: &str = "slug";
/// Reserved field name carrying the raw markdown body
pub const CONTENT_FIELD: &str = "content";

/// A narrowed, read-only view of a post holding only the requested fields
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProjectedRecord {
    fields: IndexMap<String, Value>,
}

impl ProjectedRecord {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// String value of a field, if present and a string
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Deserialize the projection into a typed view such as [`super::Post`]
    pub fn into_typed<T: DeserializeOwned>(self) -> serde_json::Result<T> {
        let map = self.fields.into_iter().collect::<serde_json::Map<_, _>>();
        serde_json::from_value(Value::Object(map))
    }
}

/// Project a record onto the requested field names
///
/// `slug` and `content` are synthetic; every other name is looked up in the
/// header and silently omitted when absent.
pub fn project<S: AsRef<str>>(record: &ContentRecord, fields: &[S]) -> ProjectedRecord {
    let mut projected = IndexMap::with_capacity(fields.len());

    for name in fields {
        let name = name.as_ref();
        let value = match name {
            SLUG_FIELD => Some(Value::String(record.slug().to_string())),
            CONTENT_FIELD => Some(Value::String(record.body().to_string())),
            _ => record
                .front_matter()
                .get(name)
                .and_then(|v| yaml_to_json(record.slug(), name, v)),
        };

        if let Some(value) = value {
            projected.insert(name.to_string(), value);
        }
    }

    ProjectedRecord { fields: projected }
}

fn yaml_to_json(slug: &str, name: &str, value: &serde_yaml::Value) -> Option<Value> {
    match serde_json::to_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Skipping field `{}` of {}: {}", name, slug, e);
            None
        }
    }
}
