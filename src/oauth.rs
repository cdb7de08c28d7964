use oauth2::{
    basic::BasicClient, AuthType, AuthorizationCode, ClientId, ClientSecret, EndpointNotSet,
    EndpointSet, RedirectUrl, TokenUrl,
};

use crate::{
    config::Config,
    error::{AppError, ConfigError},
};

/// OAuth2 client with only the token endpoint configured.
pub type OAuth2Client =
    BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let token_url = TokenUrl::new(config.token_url.clone())
        .map_err(|e| ConfigError::invalid("token url", &config.token_url, e))?;
    let redirect_url = RedirectUrl::new(config.redirect_url())
        .map_err(|e| ConfigError::invalid("BASE_URL", &config.base_url, e))?;

    Ok(BasicClient::new(ClientId::new(config.client_id.clone()))
        .set_client_secret(ClientSecret::new(config.client_secret.clone()))
        // Discord takes the credentials as form fields.
        .set_auth_type(AuthType::RequestBody)
        .set_token_uri(token_url)
        .set_redirect_uri(redirect_url))
}

/// Client for the token request. Redirects stay disabled so the code can't be
/// forwarded somewhere else.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    Ok(reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?)
}

/// Trades an authorization code for an access token.
///
/// The token itself is not kept; a successful exchange is all the callback
/// page reports.
pub async fn exchange_code(
    oauth_client: &OAuth2Client,
    http_client: &reqwest::Client,
    code: String,
) -> Result<(), AppError> {
    oauth_client
        .exchange_code(AuthorizationCode::new(code))
        .request_async(http_client)
        .await
        .map_err(|e| AppError::TokenExchange(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::test_config;

    #[test]
    fn malformed_base_url_is_a_config_error() {
        let mut config = test_config();
        config.base_url = "not a url".to_string();

        let err = setup_oauth_client(&config).err().unwrap();

        assert!(matches!(
            err,
            AppError::ConfigErr(ConfigError::InvalidValue { ref key, .. }) if key == "BASE_URL"
        ));
    }

    #[test]
    fn default_config_builds_client() {
        assert!(setup_oauth_client(&test_config()).is_ok());
    }
}
