// src/params.rs

use url::form_urlencoded;

/// Decoded `key=value` pairs from a query string or an urlencoded form body.
/// Keeps repeated keys (checkbox groups submit one pair per checked box).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn parse(raw: &str) -> Self {
        Self(form_urlencoded::parse(raw.as_bytes()).into_owned().collect())
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// First value for `key`, as submitted.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First non-blank value for `key`, trimmed.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.raw(key).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Checkbox semantics: present and not explicitly off.
    pub fn is_checked(&self, key: &str) -> bool {
        self.get_all(key)
            .any(|v| !matches!(v, "" | "off" | "false" | "0"))
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn without(mut self, keys: &[&str]) -> Self {
        self.0.retain(|(k, _)| !keys.contains(&k.as_str()));
        self
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }
}

/// Encode one path segment of a console URL. Uses the same form encoding as
/// query strings, so `decode_segment` is its exact inverse.
pub fn encode_segment(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

/// Inverse of [`encode_segment`]. A raw `&` or `=` never comes out of the
/// encoder, so such segments are taken literally.
pub fn decode_segment(raw: &str) -> String {
    if raw.contains(['&', '=']) {
        return raw.to_string();
    }
    form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(segment, _)| segment.into_owned())
        .unwrap_or_default()
}

/// Console path for an action on one proposal, e.g. `/proposals/{id}/status`.
pub fn proposal_path(id: &str, action: &str) -> String {
    format!("/proposals/{}/{action}", encode_segment(id))
}
