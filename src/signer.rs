use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use percent_encoding::percent_decode_str;
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use url::{form_urlencoded, Url};

use crate::client::Config;
use crate::error::{Result, ValenceError};

type HmacSha256 = Hmac<Sha256>;

/// Turns an API route and HTTP method into a fully authenticated URI.
pub trait RequestSigner {
    fn create_authenticated_uri(&self, route: &str, method: &str) -> Result<String>;
}

/// UserContext signs requests on behalf of one application/user key pair
/// using the vendor's ID/key scheme.
#[derive(Clone)]
pub struct UserContext {
    base_url: String,
    app_id: String,
    app_key: String,
    user_id: String,
    user_key: String,
}

impl UserContext {
    /// Create a new UserContext for the given host and credentials
    pub fn new(
        base_url: impl Into<String>,
        app_id: impl Into<String>,
        app_key: impl Into<String>,
        user_id: impl Into<String>,
        user_key: impl Into<String>,
    ) -> Self {
        UserContext {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            app_id: app_id.into(),
            app_key: app_key.into(),
            user_id: user_id.into(),
            user_key: user_key.into(),
        }
    }

    /// Create a UserContext from the session configuration
    pub fn from_config(config: &Config) -> Self {
        UserContext::new(
            config.base_url(),
            config.app_id.clone(),
            config.app_key.clone(),
            config.user_id.clone(),
            config.user_key.clone(),
        )
    }

    /// Build the authenticated URI for a fixed timestamp (seconds since epoch)
    ///
    /// The signed string is `METHOD&path&timestamp` where the path is
    /// percent-decoded and lowercased and excludes the query string.
    pub fn authenticated_uri_at(&self, route: &str, method: &str, timestamp: u64) -> Result<String> {
        if !route.starts_with('/') {
            return Err(ValenceError::RequestBuild(format!(
                "route must be absolute: {}",
                route
            )));
        }

        let (path, query) = match route.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (route, None),
        };

        let decoded_path = percent_decode_str(path).decode_utf8_lossy().to_lowercase();
        let signature_base = format!("{}&{}&{}", method.to_uppercase(), decoded_path, timestamp);

        let app_signature = sign(&self.app_key, &signature_base)?;
        let user_signature = sign(&self.user_key, &signature_base)?;

        let auth_query = form_urlencoded::Serializer::new(String::new())
            .append_pair("x_a", &self.app_id)
            .append_pair("x_b", &self.user_id)
            .append_pair("x_c", &app_signature)
            .append_pair("x_d", &user_signature)
            .append_pair("x_t", &timestamp.to_string())
            .finish();

        let uri = match query {
            Some(query) if !query.is_empty() => {
                format!("{}{}?{}&{}", self.base_url, path, query, auth_query)
            }
            _ => format!("{}{}?{}", self.base_url, path, auth_query),
        };

        // Catch a malformed host before the transport does
        Url::parse(&uri)?;

        Ok(uri)
    }
}

impl RequestSigner for UserContext {
    fn create_authenticated_uri(&self, route: &str, method: &str) -> Result<String> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| ValenceError::Other(format!("system clock before epoch: {}", e)))?
            .as_secs();

        self.authenticated_uri_at(route, method, timestamp)
    }
}

/// HMAC-SHA256 of `data` keyed by `key`, base64url encoded without padding
fn sign(key: &str, data: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|e| ValenceError::RequestBuild(format!("invalid signing key: {}", e)))?;
    mac.update(data.as_bytes());

    Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
}

// Implement Debug manually to avoid exposing the keys
impl std::fmt::Debug for UserContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserContext")
            .field("base_url", &self.base_url)
            .field("app_id", &self.app_id)
            .field("user_id", &self.user_id)
            .field("keys", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> UserContext {
        UserContext::new("https://lms.example.edu/", "app-id", "app-key", "user-id", "user-key")
    }

    #[test]
    fn test_signature_is_deterministic() {
        let uri = context()
            .authenticated_uri_at("/d2l/api/lp/1.30/users/whoami", "GET", 1_700_000_000)
            .unwrap();

        assert_eq!(
            uri,
            "https://lms.example.edu/d2l/api/lp/1.30/users/whoami?x_a=app-id&x_b=user-id\
             &x_c=xot5KSjc19fKwgELnGR9Xpq82XnWiznCGIldaTSbHHg\
             &x_d=AQV2pMO1egkMVY-HenGH5g69zEwjXBvy3ObIYasc73w&x_t=1700000000"
        );
    }

    #[test]
    fn test_query_is_kept_but_not_signed() {
        let uri = context()
            .authenticated_uri_at(
                "/d2l/api/lp/1.30/orgstructure/?orgUnitType=3&exactOrgUnitCode=MATH%20101",
                "get",
                1_700_000_000,
            )
            .unwrap();

        assert!(uri.starts_with(
            "https://lms.example.edu/d2l/api/lp/1.30/orgstructure/?orgUnitType=3&exactOrgUnitCode=MATH%20101&x_a=app-id"
        ));
        assert!(uri.contains("&x_c=xiza72ZOMQzS5y2Kapy8WTkJf0rzSO-p4P63hz6oVWs&"));
    }

    #[test]
    fn test_path_case_does_not_change_signature() {
        let ctx = context();
        let lower = ctx
            .authenticated_uri_at("/d2l/api/lp/1.30/users/whoami", "GET", 1_700_000_000)
            .unwrap();
        let upper = ctx
            .authenticated_uri_at("/D2L/api/lp/1.30/users/WhoAmI", "GET", 1_700_000_000)
            .unwrap();

        let sig = |uri: &str| uri.split("x_c=").nth(1).map(|s| s.to_string());
        assert_eq!(sig(&lower), sig(&upper));
    }

    #[test]
    fn test_relative_route_is_rejected() {
        let err = context()
            .authenticated_uri_at("d2l/api/versions/", "GET", 1)
            .unwrap_err();
        assert!(matches!(err, ValenceError::RequestBuild(_)));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let printed = format!("{:?}", context());
        assert!(!printed.contains("app-key"));
        assert!(!printed.contains("user-key"));
    }
}
