//! Runtime settings loaded from flat `.properties` text.
//!
//! The record server owns configuration files and their discovery; this crate
//! only interprets the already-read text. A missing or unusable file degrades
//! to defaults and a logged note, never a startup failure.

/// Property key supplying the path segment appended to the discovered
/// order-station base URL.
pub const ORDER_CREATE_API_PATH_KEY: &str = "dxorder.create.api.path";

/// Property key passed through to the record server's search-result cache.
/// Not interpreted here beyond numeric parsing.
pub const REUSE_CACHED_SEARCH_KEY: &str = "ReuseCachedSearchResultsForMillis";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub order_create_api_path: String,
    pub reuse_cached_search_millis: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            order_create_api_path: "/DxOrder/create".to_string(),
            reuse_cached_search_millis: None,
        }
    }
}

impl Settings {
    /// Build settings from properties text. Unknown keys are ignored; an
    /// absent, zero or non-numeric cache duration means "not configured".
    pub fn from_properties(text: &str) -> Self {
        let mut settings = Self::default();

        for (key, value) in parse_properties(text) {
            match key.as_str() {
                ORDER_CREATE_API_PATH_KEY => {
                    if !value.is_empty() {
                        settings.order_create_api_path = value;
                    }
                }
                REUSE_CACHED_SEARCH_KEY => {
                    settings.reuse_cached_search_millis = match value.parse::<u64>() {
                        Ok(0) | Err(_) => None,
                        Ok(millis) => Some(millis),
                    };
                }
                _ => {}
            }
        }

        tracing::info!(
            api_path = %settings.order_create_api_path,
            "settings load completed"
        );
        settings
    }

    pub fn with_order_create_api_path(mut self, path: impl Into<String>) -> Self {
        self.order_create_api_path = path.into();
        self
    }

    pub fn with_reuse_cached_search_millis(mut self, millis: Option<u64>) -> Self {
        self.reuse_cached_search_millis = millis;
        self
    }
}

/// Parse Java-style properties text into `(key, value)` pairs.
///
/// Lines are trimmed; empty lines and `#`/`!` comments are skipped. A line
/// without `=` yields the whole line as a key with an empty value, which is
/// how constraint entries are declared (the value is ignored there).
pub fn parse_properties(text: &str) -> Vec<(String, String)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .map(|line| match line.split_once('=') {
            Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
            None => (line.to_string(), String::new()),
        })
        .collect()
}
