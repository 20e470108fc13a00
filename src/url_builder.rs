use crate::error::Result;
use url::Url;
use urlencoding::encode;

/// How a query value is written to the query string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueEncoding {
    /// Percent-encode everything outside the unreserved set
    Standard,
    /// Like `Standard`, but `+` is written as is so the server decodes it as a space
    KeepPlus,
}

/// Builder for request URLs against a configured base URL
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base_url: String,
    path: String,
    params: Vec<(String, String, ValueEncoding)>,
}

impl UrlBuilder {
    /// Create a new URL builder for `path` below `base_url`
    pub fn new(base_url: &str, path: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            path: path.to_string(),
            params: Vec::new(),
        }
    }

    /// Append a query parameter
    #[must_use]
    pub fn param<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.params
            .push((key.into(), value.to_string(), ValueEncoding::Standard));
        self
    }

    /// Append a query parameter only when a value is present
    #[must_use]
    pub fn optional_param<K: Into<String>>(self, key: K, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Append a query parameter whose `+` characters must reach the server unescaped
    #[must_use]
    pub fn param_keep_plus<K: Into<String>>(mut self, key: K, value: &str) -> Self {
        self.params
            .push((key.into(), value.to_string(), ValueEncoding::KeepPlus));
        self
    }

    /// Build the complete URL
    pub fn build(&self) -> Result<String> {
        let mut full_url = utils::join(&self.base_url, &self.path);
        let query = self.query_string();
        if !query.is_empty() {
            full_url.push('?');
            full_url.push_str(&query);
        }

        // Reject anything reqwest would fail on later
        Url::parse(&full_url)?;
        Ok(full_url)
    }

    /// Encoded query string without the leading `?`
    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(key, value, encoding)| {
                let value = match encoding {
                    ValueEncoding::Standard => encode(value).into_owned(),
                    ValueEncoding::KeepPlus => utils::encode_keep_plus(value),
                };
                format!("{}={}", encode(key), value)
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Utility functions for URL handling
pub mod utils {
    use urlencoding::encode;

    /// Join a base URL and an endpoint path, ignoring trailing slashes on the base
    pub fn join(base_url: &str, path: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), path)
    }

    /// Percent-encode `value` but leave `+` untouched
    pub fn encode_keep_plus(value: &str) -> String {
        value
            .split('+')
            .map(|part| encode(part).into_owned())
            .collect::<Vec<_>>()
            .join("+")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_ignored() {
        let with_slash = UrlBuilder::new("http://localhost:1331/proxy/", "/v2/organisasjoner")
            .build()
            .unwrap();
        let without_slash = UrlBuilder::new("http://localhost:1331/proxy", "/v2/organisasjoner")
            .build()
            .unwrap();

        assert_eq!(with_slash, "http://localhost:1331/proxy/v2/organisasjoner");
        assert_eq!(with_slash, without_slash);
    }

    #[test]
    fn test_query_parameters_are_encoded_in_order() {
        let url = UrlBuilder::new("http://altinn", "/reportees")
            .param("ForceEIAuthentication", "")
            .param("$top", 500)
            .param("$skip", 0)
            .optional_param("serviceCode", Some("3403"))
            .optional_param("serviceEdition", None)
            .param("$filter", "Type ne 'Person'")
            .build()
            .unwrap();

        assert_eq!(
            url,
            "http://altinn/reportees?ForceEIAuthentication=&%24top=500&%24skip=0&serviceCode=3403&%24filter=Type%20ne%20%27Person%27"
        );
    }

    #[test]
    fn test_plus_is_kept_literally() {
        let builder = UrlBuilder::new("http://altinn", "/reportees")
            .param_keep_plus("$filter", "Type+ne+'Person'+and+Status+eq+'Active'");

        let query = builder.query_string();
        assert_eq!(query, "%24filter=Type+ne+%27Person%27+and+Status+eq+%27Active%27");
        assert!(!query.contains("%2B"));

        let standard = UrlBuilder::new("http://altinn", "/reportees").param("$filter", "a+b");
        assert_eq!(standard.query_string(), "%24filter=a%2Bb");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(UrlBuilder::new("not-a-url", "/v2/organisasjoner").build().is_err());
    }
}
