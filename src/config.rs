//! Deserializable per-provider application settings.

// std
use std::time::Duration as StdDuration;
// self
use crate::{
	_prelude::*,
	auth::{AppCredentials, TokenSecret},
	error::ConfigError,
	http::DEFAULT_TIMEOUT,
	provider::ProviderKind,
};
#[cfg(feature = "reqwest")]
use crate::{
	flows::ReqwestOAuth2Client, http::ReqwestHttpClient, transport::ReqwestTransportErrorMapper,
};

/// Application settings for one built-in provider, as loaded from configuration.
///
/// ```
/// let config: oauth2_social::config::ProviderConfig = serde_json::from_str(
/// 	r#"{ "provider": "github", "app_id": "app", "app_secret": "s3cret" }"#,
/// )
/// .unwrap();
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
	/// Provider id (`github`, `foursquare`, `instagram`, `mailru`, `odnoklassniki`,
	/// `vkontakte`, `yandex`).
	pub provider: String,
	/// Application id.
	pub app_id: String,
	/// Application secret.
	pub app_secret: TokenSecret,
	/// Public application key, required by Odnoklassniki.
	#[serde(default)]
	pub app_public_key: Option<String>,
	/// Per-request timeout in seconds; defaults to [`DEFAULT_TIMEOUT`].
	#[serde(default)]
	pub request_timeout_secs: Option<u64>,
}
impl ProviderConfig {
	/// Resolves the provider id against the built-in catalog.
	pub fn kind(&self) -> Result<ProviderKind, ConfigError> {
		self.provider.parse()
	}

	/// Application credentials carried by this configuration.
	pub fn credentials(&self) -> AppCredentials {
		AppCredentials {
			app_id: self.app_id.clone(),
			app_secret: self.app_secret.clone(),
			app_public_key: self.app_public_key.clone(),
		}
	}

	/// Effective request timeout.
	pub fn timeout(&self) -> Result<StdDuration, ConfigError> {
		match self.request_timeout_secs {
			Some(0) => Err(ConfigError::ZeroTimeout),
			Some(secs) => Ok(StdDuration::from_secs(secs)),
			None => Ok(DEFAULT_TIMEOUT),
		}
	}

	/// Checks everything that can be checked without building a client.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let descriptor = self.kind()?.descriptor()?;
		let credentials = self.credentials();

		credentials.validate()?;

		if descriptor.requires_public_key() && credentials.public_key().is_none() {
			return Err(ConfigError::MissingPublicKey { provider: self.provider.clone() });
		}

		self.timeout().map(|_| ())
	}
}

#[cfg(feature = "reqwest")]
impl ReqwestOAuth2Client {
	/// Builds a reqwest-backed client from configuration.
	pub fn from_config(config: &ProviderConfig) -> Result<Self, ConfigError> {
		let descriptor = config.kind()?.descriptor()?;
		let http_client = ReqwestHttpClient::with_timeout(config.timeout()?)?;

		Self::with_http_client(
			descriptor,
			config.credentials(),
			http_client,
			ReqwestTransportErrorMapper,
		)
	}
}
