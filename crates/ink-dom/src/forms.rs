//! Form Data
//!
//! Submission data collected from a form's participating controls.

use url::form_urlencoded;

/// Form data for submission
///
/// Ordered name/value text entries; the same name may appear more than once.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    /// Create empty form data
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Get the first value for a name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get all values for a name
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Check if a name is present
    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in collection order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Serialize as application/x-www-form-urlencoded
    pub fn to_url_encoded(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.entries {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_get() {
        let mut data = FormData::new();
        data.append("title", "Notes");
        data.append("body", "<p>hi</p>");

        assert_eq!(data.get("title"), Some("Notes"));
        assert!(data.has("body"));
        assert_eq!(data.get("missing"), None);
    }

    #[test]
    fn test_repeated_names() {
        let mut data = FormData::new();
        data.append("tag", "a");
        data.append("tag", "b");

        assert_eq!(data.get("tag"), Some("a"));
        assert_eq!(data.get_all("tag"), vec!["a", "b"]);
    }

    #[test]
    fn test_url_encoding() {
        let mut data = FormData::new();
        data.append("q", "hello world");
        assert_eq!(data.to_url_encoded(), "q=hello+world");
    }
}
