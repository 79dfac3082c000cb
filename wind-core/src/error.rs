/// Errors produced while resolving a city and fetching its forecast.
#[derive(Debug, thiserror::Error)]
pub enum WindError {
    /// The geocoding service returned no match for the query.
    #[error("City not found: {query}")]
    NotFound { query: String },

    /// Network failure, non-success status, or an unparsable response body.
    #[error("Failed to fetch weather: {0}")]
    Transport(String),

    /// The forecast payload parsed but does not hold a usable 7-day series.
    #[error("Malformed forecast payload: {0}")]
    MalformedPayload(String),
}

impl WindError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, WindError::NotFound { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, WindError::Transport(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, WindError::MalformedPayload(_))
    }
}

impl From<reqwest::Error> for WindError {
    fn from(err: reqwest::Error) -> Self {
        WindError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for WindError {
    fn from(err: serde_json::Error) -> Self {
        WindError::Transport(format!("invalid JSON response: {err}"))
    }
}
