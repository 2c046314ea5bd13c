//! Profile-endpoint identity resolution.

use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use super::{EXTERNAL_TARGET, ExternalError, IdentityResolver, UserProfile};

/// Resolves tokens with `GET {profile_url}?access_token=<token>`.
#[derive(Debug, Clone)]
pub struct HttpIdentityResolver {
    client: Client,
    profile_url: Url,
}

impl HttpIdentityResolver {
    /// Creates a resolver for the given profile endpoint.
    #[must_use]
    pub const fn new(client: Client, profile_url: Url) -> Self {
        Self {
            client,
            profile_url,
        }
    }

    fn request_url(&self, token: &str) -> Url {
        let mut url = self.profile_url.clone();
        url.query_pairs_mut().append_pair("access_token", token);
        url
    }
}

impl IdentityResolver for HttpIdentityResolver {
    fn resolve(&self, token: &str) -> Result<UserProfile, ExternalError> {
        let url = self.request_url(token);
        debug!(
            target: EXTERNAL_TARGET,
            endpoint = %self.profile_url,
            "resolving bearer token"
        );

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| ExternalError::transport(&url, source))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExternalError::status(&url, status));
        }

        let bytes = response
            .bytes()
            .map_err(|source| ExternalError::body(&url, source))?;
        serde_json::from_slice(&bytes).map_err(|source| ExternalError::body(&url, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_token_in_query() {
        let resolver = HttpIdentityResolver::new(
            Client::new(),
            Url::parse("https://api.example/user/profile").expect("parse url"),
        );
        let url = resolver.request_url("Atza|a b&c");
        assert_eq!(
            url.as_str(),
            "https://api.example/user/profile?access_token=Atza%7Ca+b%26c"
        );
    }

    #[test]
    fn parses_profile_body() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"user_id":"amzn1.account.X","name":"Ada","email":"ada@example.com"}"#,
        )
        .expect("parse profile");
        assert_eq!(profile.user_id, "amzn1.account.X");
        assert_eq!(profile.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn profile_tolerates_missing_optional_fields() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"user_id":"u1"}"#).expect("parse minimal profile");
        assert_eq!(profile.email, None);
    }
}
