use indexmap::IndexMap;
use serde::Serialize;
use url::form_urlencoded;

use crate::errors::EditPageError;

/// Page parameter carrying the entity identifier
pub const PARAM_ID: &str = "id";

/// Page parameter switching a page to print/view mode
pub const PARAM_VIEW_MODE: &str = "view";

/// Ordered request parameters of a page
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PageParameters {
    values: IndexMap<String, String>,
}

impl PageParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl ToString) {
        self.values.insert(name.into(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Blank values count as absent, anything else must parse as an integer
    pub fn get_i64(&self, name: &str) -> Result<Option<i64>, EditPageError> {
        match self.get(name).map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<i64>()
                .map(Some)
                .map_err(|_| EditPageError::InvalidParameter {
                    name: name.to_string(),
                    value: raw.to_string(),
                }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether the page was requested in print/view mode
    pub fn is_view_mode(&self) -> bool {
        matches!(self.get(PARAM_VIEW_MODE), Some("print") | Some("true"))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PageParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// A destination page, addressed by path
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageLink {
    path: String,
}

impl PageLink {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// URL of the page with the given parameters appended as a query string
    pub fn url(&self, parameters: Option<&PageParameters>) -> String {
        match parameters.filter(|params| !params.is_empty()) {
            Some(params) => {
                let mut query = form_urlencoded::Serializer::new(String::new());
                for (key, value) in params.iter() {
                    query.append_pair(key, value);
                }
                format!("{}?{}", self.path, query.finish())
            }
            None => self.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_blank_id_are_absent() {
        let params = PageParameters::new();
        assert_eq!(params.get_i64(PARAM_ID).unwrap(), None);

        let params = PageParameters::new().with(PARAM_ID, " ");
        assert_eq!(params.get_i64(PARAM_ID).unwrap(), None);
    }

    #[test]
    fn test_numeric_id_is_parsed() {
        let params = PageParameters::new().with(PARAM_ID, "42");
        assert_eq!(params.get_i64(PARAM_ID).unwrap(), Some(42));
    }

    #[test]
    fn test_non_numeric_id_is_rejected() {
        let params = PageParameters::new().with(PARAM_ID, "abc");
        let err = params.get_i64(PARAM_ID).unwrap_err();
        assert_eq!(err.http_status_code(), 400);
    }

    #[test]
    fn test_link_url_encodes_parameters() {
        let link = PageLink::new("/persons");
        assert_eq!(link.url(None), "/persons");

        let params = PageParameters::new().with("group", 3).with("q", "a b&c");
        assert_eq!(link.url(Some(&params)), "/persons?group=3&q=a+b%26c");
    }

    #[test]
    fn test_link_url_encodes_non_ascii_values() {
        let link = PageLink::new("/groups/edit");
        let params = PageParameters::new().with("name", "Grün=1");
        assert_eq!(link.url(Some(&params)), "/groups/edit?name=Gr%C3%BCn%3D1");
    }

    #[test]
    fn test_view_mode() {
        assert!(PageParameters::new().with(PARAM_VIEW_MODE, "print").is_view_mode());
        assert!(!PageParameters::new().is_view_mode());
    }
}
