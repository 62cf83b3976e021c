use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names tried, in order, when normalizing a map-shaped provider record.
const COMPANY_FIELD: &str = "company_name";
const TITLE_FIELDS: [&str; 2] = ["job_position", "title"];
const LINK_FIELDS: [&str; 3] = ["job_link", "link", "url"];
const LOCATION_FIELDS: [&str; 2] = ["location", "job_location"];

/// A job posting normalized from any provider.
///
/// Only `title` and `company_name` are ever inspected by the matcher. Everything
/// a provider sends beyond the four typed fields rides along in `extra` and is
/// flattened back into the JSON response untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    pub company_name: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub location: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Job {
    /// Normalizes one provider element into a `Job`.
    ///
    /// Returns `None` when the element is not an object, has no string
    /// `company_name`, or has neither `job_position` nor `title` as a string.
    /// Such records cannot be judged a match and are dropped by callers.
    pub fn from_provider_value(value: Value) -> Option<Job> {
        let Value::Object(mut fields) = value else {
            return None;
        };

        let company_name = fields.get(COMPANY_FIELD)?.as_str()?.to_string();
        let title_key = TITLE_FIELDS
            .iter()
            .find(|key| fields.get(**key).is_some_and(Value::is_string))?;
        let title = fields.get(*title_key)?.as_str()?.to_string();

        fields.remove(COMPANY_FIELD);
        fields.remove(*title_key);
        let link = take_first_string(&mut fields, &LINK_FIELDS);
        let location = take_first_string(&mut fields, &LOCATION_FIELDS);

        // A leftover key that collides with a typed field would serialize twice.
        for key in ["title", "company_name", "link", "location"] {
            fields.remove(key);
        }

        Some(Job {
            title,
            company_name,
            link: link.unwrap_or_default(),
            location: location.unwrap_or_default(),
            extra: fields,
        })
    }
}

fn take_first_string(fields: &mut Map<String, Value>, keys: &[&str]) -> Option<String> {
    let key = keys
        .iter()
        .find(|key| fields.get(**key).is_some_and(Value::is_string))?;
    match fields.remove(*key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}
