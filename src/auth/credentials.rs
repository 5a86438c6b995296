//! Application credentials registered with a provider.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// App id, app secret, and the optional public key issued by the provider's developer console.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppCredentials {
	/// Application (client) id sent as `client_id`.
	pub app_id: String,
	/// Application secret; used as `client_secret` and as signing material.
	pub app_secret: TokenSecret,
	/// Public application key (Odnoklassniki `application_key`).
	#[serde(default)]
	pub app_public_key: Option<String>,
}
impl AppCredentials {
	/// Creates credentials from an app id and secret.
	pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
		Self { app_id: app_id.into(), app_secret: TokenSecret::new(app_secret), app_public_key: None }
	}

	/// Attaches the public application key.
	pub fn with_public_key(mut self, key: impl Into<String>) -> Self {
		self.app_public_key = Some(key.into());

		self
	}

	/// Returns the public key when it is present and non-empty.
	pub fn public_key(&self) -> Option<&str> {
		self.app_public_key.as_deref().filter(|key| !key.is_empty())
	}

	/// Rejects empty app ids and secrets.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.app_id.is_empty() {
			return Err(ConfigError::EmptyAppId);
		}
		if self.app_secret.is_empty() {
			return Err(ConfigError::EmptyAppSecret);
		}

		Ok(())
	}
}
impl Debug for AppCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppCredentials")
			.field("app_id", &self.app_id)
			.field("app_secret", &self.app_secret)
			.field("app_public_key", &self.app_public_key)
			.finish()
	}
}
