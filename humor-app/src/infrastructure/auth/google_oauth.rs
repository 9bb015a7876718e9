use crate::domain::Profile;
use humor_errors::AppError;
use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::Deserialize;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    pub sub: String,
    pub email: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

impl GoogleUserInfo {
    pub fn into_profile(self) -> Profile {
        Profile::new(self.sub, self.email, self.given_name, self.family_name)
    }
}

type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    oauth2::EndpointSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointSet,
>;

#[derive(Clone)]
pub struct GoogleOAuth {
    client: ConfiguredClient,
    redirect_uri: RedirectUrl,
    token_http: oauth2::reqwest::Client,
    http_client: reqwest::Client,
}

impl GoogleOAuth {
    pub fn new(client_id: &str, client_secret: &str, redirect_uri: &str) -> Result<Self, AppError> {
        let config = |e: String| AppError::Config(e);
        let auth_url = AuthUrl::new(GOOGLE_AUTH_URL.to_string()).map_err(|e| config(e.to_string()))?;
        let token_url =
            TokenUrl::new(GOOGLE_TOKEN_URL.to_string()).map_err(|e| config(e.to_string()))?;
        let redirect =
            RedirectUrl::new(redirect_uri.to_string()).map_err(|e| config(e.to_string()))?;

        let client = BasicClient::new(ClientId::new(client_id.to_string()))
            .set_client_secret(ClientSecret::new(client_secret.to_string()))
            .set_auth_uri(auth_url)
            .set_token_uri(token_url);

        // Token requests must not follow redirects.
        let token_http = oauth2::reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            redirect_uri: redirect,
            token_http,
            http_client: reqwest::Client::new(),
        })
    }

    /// Authorization URL plus the CSRF state and PKCE verifier to keep in the session.
    pub fn authorize_url(&self) -> (String, CsrfToken, PkceCodeVerifier) {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_token) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .set_redirect_uri(std::borrow::Cow::Borrowed(&self.redirect_uri))
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        (auth_url.to_string(), csrf_token, pkce_verifier)
    }

    pub async fn exchange_code(
        &self,
        code: &str,
        pkce_verifier: PkceCodeVerifier,
    ) -> Result<GoogleUserInfo, AppError> {
        let token_result = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_redirect_uri(std::borrow::Cow::Borrowed(&self.redirect_uri))
            .set_pkce_verifier(pkce_verifier)
            .request_async(&self.token_http)
            .await
            .map_err(|e| AppError::Auth(format!("token exchange failed: {:?}", e)))?;

        let access_token = token_result.access_token().secret();

        self.http_client
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("failed to fetch user info: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::Auth(format!("user info rejected: {}", e)))?
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| AppError::Auth(format!("failed to parse user info: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_url_carries_pkce_and_state() {
        let oauth = GoogleOAuth::new("client-id", "secret", "http://127.0.0.1:3000/auth/callback")
            .unwrap();
        let (url, csrf, _verifier) = oauth.authorize_url();
        assert!(url.starts_with(GOOGLE_AUTH_URL));
        assert!(url.contains("code_challenge="));
        assert!(url.contains("code_challenge_method=S256"));
        assert!(url.contains(&format!("state={}", csrf.secret())));
    }

    #[test]
    fn test_invalid_redirect_is_config_error() {
        let err = GoogleOAuth::new("id", "secret", "not a url").err().unwrap();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_user_info_into_profile() {
        let info: GoogleUserInfo = serde_json::from_str(
            r#"{"sub":"1234","email":"ada@example.com","given_name":"Ada"}"#,
        )
        .unwrap();
        let profile = info.into_profile();
        assert_eq!(profile.google_sub, "1234");
        assert_eq!(profile.email.as_deref(), Some("ada@example.com"));
        assert_eq!(profile.first_name.as_deref(), Some("Ada"));
        assert_eq!(profile.last_name, None);
    }
}
