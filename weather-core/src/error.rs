use std::fmt;

use thiserror::Error;

/// Which upstream call produced an HTTP failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Geocode,
    Weather,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Geocode => "geocode",
            Endpoint::Weather => "weather",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw failure of a single search.
///
/// Carries enough structure (variant, endpoint, status) for [`SearchError::kind`]
/// to classify it without looking at any message text.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("no API key configured")]
    MissingCredential,

    #[error("geocoding returned no match")]
    CityNotFound,

    #[error("{endpoint} request failed with HTTP status {status}")]
    Http { endpoint: Endpoint, status: u16 },

    #[error("{endpoint} request could not reach the provider: {source}")]
    Network {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed {endpoint} response: {reason}")]
    MalformedResponse { endpoint: Endpoint, reason: String },

    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
}

impl SearchError {
    /// Wrap a `reqwest` failure, separating "never reached the provider" from
    /// everything else (body read errors, redirects, builder errors).
    ///
    /// The request URL is dropped: it carries `appid` in its query string.
    pub fn from_reqwest(endpoint: Endpoint, source: reqwest::Error) -> Self {
        let source = source.without_url();
        if source.is_connect() || source.is_timeout() || source.is_request() {
            SearchError::Network { endpoint, source }
        } else {
            SearchError::Transport { endpoint, source }
        }
    }

    pub fn malformed(endpoint: Endpoint, reason: impl Into<String>) -> Self {
        SearchError::MalformedResponse {
            endpoint,
            reason: reason.into(),
        }
    }

    /// Classify into the user-facing disposition.
    ///
    /// HTTP 401/429 are bucketed the same way regardless of endpoint.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::EmptyQuery => ErrorKind::EmptyQuery,
            SearchError::MissingCredential => ErrorKind::MissingCredential,
            SearchError::CityNotFound => ErrorKind::CityNotFound,
            SearchError::Http { status: 401, .. } => ErrorKind::InvalidCredential,
            SearchError::Http { status: 429, .. } => ErrorKind::RateLimited,
            SearchError::Http { status, .. } => ErrorKind::HttpFailure(*status),
            SearchError::Network { .. } => ErrorKind::Network,
            SearchError::MalformedResponse { .. } | SearchError::Transport { .. } => {
                ErrorKind::Unknown
            }
        }
    }
}

/// Fixed set of user-facing failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyQuery,
    MissingCredential,
    CityNotFound,
    InvalidCredential,
    RateLimited,
    HttpFailure(u16),
    Network,
    Unknown,
}

impl ErrorKind {
    /// The single message shown to the user for this disposition.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyQuery => "Skriv venligst et bynavn først.".to_string(),
            Self::MissingCredential => "Din API-nøgle mangler. Sæt OPENWEATHER_API_KEY eller kør \
                                        `weather configure`, og start igen."
                .to_string(),
            Self::CityNotFound => "Byen blev ikke fundet.".to_string(),
            Self::InvalidCredential => {
                "401: API-nøglen er ugyldig/deaktiveret. Forny nøglen hos OpenWeather.".to_string()
            }
            Self::RateLimited => "429: For mange forespørgsler. Prøv igen senere.".to_string(),
            Self::HttpFailure(code) => format!("Forespørgslen fejlede (HTTP {code}). Prøv igen."),
            Self::Network => "Netværksfejl. Tjek internetforbindelse/firewall/VPN.".to_string(),
            Self::Unknown => "Der opstod en fejl. Prøv igen.".to_string(),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(endpoint: Endpoint, status: u16) -> SearchError {
        SearchError::Http { endpoint, status }
    }

    #[test]
    fn status_401_is_invalid_credential_for_both_endpoints() {
        assert_eq!(http(Endpoint::Geocode, 401).kind(), ErrorKind::InvalidCredential);
        assert_eq!(http(Endpoint::Weather, 401).kind(), ErrorKind::InvalidCredential);
    }

    #[test]
    fn status_429_is_rate_limited_for_both_endpoints() {
        assert_eq!(http(Endpoint::Geocode, 429).kind(), ErrorKind::RateLimited);
        assert_eq!(http(Endpoint::Weather, 429).kind(), ErrorKind::RateLimited);
    }

    #[test]
    fn other_status_keeps_the_code() {
        let kind = http(Endpoint::Weather, 503).kind();
        assert_eq!(kind, ErrorKind::HttpFailure(503));
        assert!(kind.user_message().contains("503"));
    }

    #[test]
    fn malformed_response_is_unknown() {
        let err = SearchError::malformed(Endpoint::Weather, "not JSON");
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert!(err.to_string().contains("weather"));
    }

    #[test]
    fn messages_are_distinct() {
        let kinds = [
            ErrorKind::EmptyQuery,
            ErrorKind::MissingCredential,
            ErrorKind::CityNotFound,
            ErrorKind::InvalidCredential,
            ErrorKind::RateLimited,
            ErrorKind::HttpFailure(500),
            ErrorKind::Network,
            ErrorKind::Unknown,
        ];
        let mut messages: Vec<String> = kinds.iter().map(ErrorKind::user_message).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), kinds.len());
    }
}
