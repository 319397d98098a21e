//! Request construction for the LocationIQ search endpoint

use std::fmt;

use url::Url;

use crate::error::GeocodingFault;

/// A single search request, built per lookup and never stored
#[derive(Clone)]
pub struct GeocodeQuery {
    search: String,
    api_key: String,
    format: String,
}

impl fmt::Debug for GeocodeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocodeQuery")
            .field("search", &self.search)
            .field("api_key", &"[REDACTED]")
            .field("format", &self.format)
            .finish()
    }
}

impl GeocodeQuery {
    /// Assemble a query from its parts
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingFault::EmptyQuery`] for blank search text and
    /// [`GeocodingFault::Configuration`] when no credential is available.
    pub fn new(
        search: &str,
        api_key: Option<&str>,
        format: &str,
    ) -> Result<Self, GeocodingFault> {
        let search = search.trim();
        if search.is_empty() {
            return Err(GeocodingFault::EmptyQuery);
        }

        let api_key = api_key.ok_or_else(|| {
            GeocodingFault::Configuration("LocationIQ API key is not configured".to_string())
        })?;

        Ok(Self {
            search: search.to_string(),
            api_key: api_key.to_string(),
            format: format.to_string(),
        })
    }

    /// The trimmed search text
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Build the request URL against `base_url`
    ///
    /// Produces `<base>?key=<key>&q=<search>&format=<format>` with every
    /// value form-urlencoded.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingFault::Configuration`] if `base_url` is not a valid
    /// absolute URL that can carry a query string.
    pub fn to_url(&self, base_url: &str) -> Result<Url, GeocodingFault> {
        let mut url = Url::parse(base_url).map_err(|e| {
            GeocodingFault::Configuration(format!("malformed endpoint '{base_url}': {e}"))
        })?;

        if url.cannot_be_a_base() {
            return Err(GeocodingFault::Configuration(format!(
                "endpoint '{base_url}' cannot carry a query string"
            )));
        }

        url.query_pairs_mut()
            .clear()
            .append_pair("key", &self.api_key)
            .append_pair("q", &self.search)
            .append_pair("format", &self.format);

        Ok(url)
    }
}

/// Render a request URL with the `key` parameter masked, for logging
#[must_use]
pub fn redact_url(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == "key" {
                "[REDACTED]".to_string()
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();

    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
