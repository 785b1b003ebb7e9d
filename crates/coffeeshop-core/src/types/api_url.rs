//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated base address for the coffee shop API.
///
/// Only `http` and `https` are accepted. Plain HTTP is allowed for any host
/// because shop backends commonly run on a LAN address; [`ApiUrl::is_secure`]
/// reports whether traffic to this address is protected.
///
/// # Example
///
/// ```
/// use coffeeshop_core::ApiUrl;
///
/// let api = ApiUrl::new("http://localhost:5001").unwrap();
/// assert_eq!(api.endpoint("/coffee/"), "http://localhost:5001/coffee/");
/// assert!(api.is_secure());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the full URL for an API path such as `/coffee/` or `/coffee/3`.
    pub fn endpoint(&self, path: &str) -> String {
        // The URL crate always adds a trailing slash to root paths
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns true for HTTPS, or HTTP to a loopback address.
    pub fn is_secure(&self) -> bool {
        self.0.scheme() == "https" || self.is_loopback()
    }

    /// Returns true if the host is a loopback address.
    pub fn is_loopback(&self) -> bool {
        self.0
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]")
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        if scheme != "https" && scheme != "http" {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must use http or https".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let api = ApiUrl::new("https://coffee.example.com").unwrap();
        assert_eq!(api.host(), Some("coffee.example.com"));
        assert!(api.is_secure());
    }

    #[test]
    fn lan_http_is_accepted_but_not_secure() {
        let api = ApiUrl::new("http://192.168.1.20:5001").unwrap();
        assert!(!api.is_secure());
    }

    #[test]
    fn endpoint_construction() {
        let api = ApiUrl::new("http://localhost:5001").unwrap();
        assert_eq!(api.endpoint("/auth/login"), "http://localhost:5001/auth/login");
        assert_eq!(api.endpoint("coffee/7"), "http://localhost:5001/coffee/7");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let api = ApiUrl::new("https://example.com/api/").unwrap();
        assert_eq!(api.endpoint("/purchase/"), "https://example.com/api/purchase/");
    }

    #[test]
    fn invalid_scheme() {
        assert!(ApiUrl::new("ftp://example.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/coffee/").is_err());
    }

    #[test]
    fn invalid_with_query() {
        assert!(ApiUrl::new("https://example.com/?x=1").is_err());
    }

    #[test]
    fn deserializes_from_string() {
        let api: ApiUrl = serde_json::from_str("\"https://example.com\"").unwrap();
        assert_eq!(api.host(), Some("example.com"));
    }
}
