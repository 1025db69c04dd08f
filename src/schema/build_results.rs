use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Document, Field, Mapping};

/// Outcome of a single CI build as stored in Elasticsearch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildResults {
    pub job_name: Option<String>,
    pub job_link: Option<String>,
    pub build_date_time: Option<DateTime<Utc>>,
    pub build_id: Option<String>,
}

impl BuildResults {
    pub fn new(
        job_name: Option<String>,
        job_link: Option<String>,
        build_date_time: Option<DateTime<Utc>>,
        build_id: Option<String>,
    ) -> Self {
        BuildResults {
            job_name,
            job_link,
            build_date_time,
            build_id,
        }
    }
}

impl Document for BuildResults {
    fn mapping() -> Mapping {
        Mapping::default()
            .field(
                "job_name",
                Field::Text {
                    fields: Mapping::default().field("keyword", Field::Keyword),
                },
            )
            .field("job_link", Field::Keyword)
            .field("build_date_time", Field::Date)
            .field("build_id", Field::Keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::Value;

    #[test]
    fn serialized_fields_match_mapping() {
        let build = BuildResults::new(
            Some("nightly".to_string()),
            Some("https://ci.example.com/job/nightly/42".to_string()),
            Some(Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap()),
            Some("42".to_string()),
        );
        let value = serde_json::to_value(&build).unwrap();
        let object = value.as_object().unwrap();

        let mapping = BuildResults::mapping();
        let mut mapped: Vec<&str> = mapping.names().collect();
        let mut serialized: Vec<&str> = object.keys().map(String::as_str).collect();
        mapped.sort_unstable();
        serialized.sort_unstable();
        assert_eq!(mapped, serialized);
    }

    #[test]
    fn dates_serialize_as_rfc3339() {
        let build = BuildResults {
            build_date_time: Some(Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap()),
            ..BuildResults::default()
        };
        let value = serde_json::to_value(&build).unwrap();
        assert_eq!(
            value["build_date_time"],
            Value::String("2021-03-04T05:06:07Z".to_string())
        );
        assert_eq!(value["job_name"], Value::Null);
    }

    #[test]
    fn roundtrips_through_json() {
        let raw = r#"{"job_name":"pr","job_link":null,"build_date_time":"2021-03-04T05:06:07Z","build_id":"7"}"#;
        let build: BuildResults = serde_json::from_str(raw).unwrap();
        assert_eq!(build.job_name.as_deref(), Some("pr"));
        assert_eq!(build.job_link, None);
        assert_eq!(build.build_id.as_deref(), Some("7"));
    }
}
