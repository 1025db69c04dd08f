pub mod build_results;

use serde_json::{json, Map, Value};

pub use build_results::BuildResults;

/// A single field in an index mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// Full-text field, optionally indexed a second time under `fields`.
    Text { fields: Mapping },
    Keyword,
    Date,
}

impl Field {
    pub fn text() -> Self {
        Field::Text {
            fields: Mapping::default(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Field::Text { .. } => "text",
            Field::Keyword => "keyword",
            Field::Date => "date",
        }
    }

    pub fn to_value(&self) -> Value {
        let mut body = Map::new();
        body.insert("type".to_string(), json!(self.type_name()));
        if let Field::Text { fields } = self {
            if !fields.is_empty() {
                body.insert("fields".to_string(), fields.properties());
            }
        }
        Value::Object(body)
    }
}

/// Named fields. Replacing a field keeps its position in `names`; rendered
/// properties are keyed and come out sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    fields: Vec<(String, Field)>,
}

impl Mapping {
    /// Adds `field` under `name`, replacing any field already there.
    pub fn field(mut self, name: &str, field: Field) -> Self {
        self.insert(name, field);
        self
    }

    pub fn insert(&mut self, name: &str, field: Field) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = field,
            None => self.fields.push((name.to_string(), field)),
        }
    }

    /// Merges every field of `other` into `self`; fields of `other` win.
    pub fn update(&mut self, other: Mapping) {
        for (name, field) in other.fields {
            self.insert(&name, field);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn properties(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(name, field)| (name.clone(), field.to_value()))
                .collect(),
        )
    }

    /// Renders the `mappings` body of an index, `{}` when there are no fields.
    pub fn to_value(&self) -> Value {
        if self.is_empty() {
            return json!({});
        }
        json!({ "properties": self.properties() })
    }
}

/// A document type stored in an index.
pub trait Document {
    fn mapping() -> Mapping;
}
