use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{json, Map, Value};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::error::Error;
use crate::schema::{BuildResults, Document, Mapping};

pub const DEFAULT_TEMPLATE_NAME: &str = "template";

/// Template version derived from the package version, `1.2.3` becomes `10203`.
///
/// Elasticsearch only accepts integers for
/// <https://www.elastic.co/guide/en/elasticsearch/reference/current/indices-templates-v1.html#versioning-templates>.
pub fn template_version() -> u64 {
    let part = |s: &str| s.parse::<u64>().unwrap_or(0);
    part(env!("CARGO_PKG_VERSION_MAJOR")) * 10_000
        + part(env!("CARGO_PKG_VERSION_MINOR")) * 100
        + part(env!("CARGO_PKG_VERSION_PATCH"))
}

#[derive(Debug, Clone)]
pub struct Index {
    name: String,
    mapping: Mapping,
}

impl Index {
    pub fn new(name: &str) -> Self {
        Index {
            name: name.to_string(),
            mapping: Mapping::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers `D` with the index, merging its fields into the mapping.
    pub fn document<D: Document>(mut self) -> Self {
        self.mapping.update(D::mapping());
        self
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    /// Wraps the index in a legacy template matching `pattern`, or the index
    /// name itself when no pattern is given.
    pub fn as_template(self, template_name: &str, pattern: Option<&str>) -> IndexTemplate {
        let pattern = pattern.unwrap_or(&self.name).to_string();
        IndexTemplate {
            name: template_name.to_string(),
            pattern,
            index: self,
            order: None,
            version: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IndexTemplate {
    name: String,
    pattern: String,
    index: Index,
    order: Option<i64>,
    version: Option<u64>,
}

impl IndexTemplate {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_order(mut self, order: Option<i64>) -> Self {
        self.order = order;
        self
    }

    pub fn with_version(mut self, version: u64) -> Self {
        self.version = Some(version);
        self
    }

    /// Body for `PUT _template/<name>`.
    pub fn to_value(&self) -> Value {
        let mut body = Map::new();
        body.insert("index_patterns".to_string(), json!([self.pattern]));
        let mappings = self.index.mapping().to_value();
        if mappings.as_object().map_or(false, |m| !m.is_empty()) {
            body.insert("mappings".to_string(), mappings);
        }
        if let Some(order) = self.order {
            body.insert("order".to_string(), json!(order));
        }
        if let Some(version) = self.version {
            body.insert("version".to_string(), json!(version));
        }
        Value::Object(body)
    }
}

/// Builds the versioned `BuildResults` template for `index_name`.
pub fn generate_template(
    index_name: &str,
    template_name: &str,
    pattern: Option<&str>,
    order: Option<i64>,
) -> IndexTemplate {
    Index::new(index_name)
        .document::<BuildResults>()
        .as_template(template_name, pattern)
        .with_order(order)
        .with_version(template_version())
}

/// Rebuilds `value` with object keys in lexicographic order. `Map` is only
/// sorted while serde_json's `preserve_order` feature stays off, and any crate
/// in the build can turn it on.
fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            Value::Object(
                keys.into_iter()
                    .map(|k| (k.clone(), sort_keys(&map[k])))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// Serializes `value` with keys sorted at every depth and a four space indent.
pub fn to_json(value: &Value) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    sort_keys(value).serialize(&mut ser)?;
    Ok(buf)
}

/// Writes the rendered template to `output`, or to stdout followed by a
/// newline when no file is given.
pub fn write_template(value: &Value, output: Option<&Path>) -> Result<(), Error> {
    let rendered = to_json(value)?;
    match output {
        Some(path) => fs::write(path, &rendered)?,
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            out.write_all(&rendered)?;
            out.write_all(b"\n")?;
        }
    }
    Ok(())
}
