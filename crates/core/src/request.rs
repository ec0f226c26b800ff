//! Framework-neutral view of an incoming web request.

use serde_json::Value;

use crate::schema::Fields;

/// The two string-keyed mappings a converter reads from a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestData {
    /// Parsed body (JSON object or form fields).
    pub data: Fields,
    /// Query-string parameters.
    pub query_params: Fields,
}

impl RequestData {
    pub fn new(data: Fields, query_params: Fields) -> Self {
        Self { data, query_params }
    }

    /// Build query parameters from raw key/value pairs. A repeated key keeps its last value.
    pub fn query<I, K, V>(pairs: I) -> Fields
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), Value::String(v.into())))
            .collect()
    }

    /// The body when it has content, otherwise the query parameters.
    pub fn source(&self) -> &Fields {
        if self.data.is_empty() {
            &self.query_params
        } else {
            &self.data
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn source_prefers_body() {
        let mut data = Fields::new();
        data.insert("username".into(), json!("johndoe"));
        let req = RequestData::new(data.clone(), RequestData::query([("username", "other")]));
        assert_eq!(req.source(), &data);
    }

    #[test]
    fn source_falls_back_to_query() {
        let req = RequestData::new(Fields::new(), RequestData::query([("a", "1"), ("a", "2")]));
        assert_eq!(req.source()["a"], json!("2"));
    }
}
