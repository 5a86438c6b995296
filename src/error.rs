//! Client-level error types shared across login steps, descriptors, and transports.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type JsonPathError = serde_path_to_error::Error<serde_json::Error>;

/// Canonical error exposed by public APIs.
///
/// A provider rejecting the authorization code and a provider answering with garbage surface as
/// the same step-level kind; provider error bodies are not interpreted.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem detected before any network call.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Code-for-token exchange failed.
	#[error(transparent)]
	TokenExchange(#[from] TokenExchangeError),
	/// Profile request failed or returned an unusable document.
	#[error(transparent)]
	ProfileFetch(#[from] ProfileFetchError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
}
impl Error {
	/// Stable label naming the failure kind, used in metrics and spans.
	///
	/// Transport timeouts are labeled `timeout`; every other transport failure is `transport`.
	pub const fn kind(&self) -> &'static str {
		match self {
			Self::Config(_) => "config",
			Self::TokenExchange(_) => "token_exchange",
			Self::ProfileFetch(_) => "profile_fetch",
			Self::Transport(TransportError::Timeout { .. }) => "timeout",
			Self::Transport(_) => "transport",
		}
	}
}

/// Configuration and validation failures raised while constructing clients or requests.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Application id is empty.
	#[error("Application id must not be empty.")]
	EmptyAppId,
	/// Application secret is empty.
	#[error("Application secret must not be empty.")]
	EmptyAppSecret,
	/// Descriptor signs or parameterizes requests with a public key that was not supplied.
	#[error("Provider `{provider}` requires a non-empty public application key.")]
	MissingPublicKey {
		/// Provider identifier string.
		provider: String,
	},
	/// Configuration names a provider the catalog does not know.
	#[error("Unknown provider `{provider}`.")]
	UnknownProvider {
		/// Provider identifier string as supplied.
		provider: String,
	},
	/// Profile endpoint could not be resolved into a valid URL.
	#[error("Profile endpoint `{endpoint}` is not a valid URL.")]
	InvalidProfileEndpoint {
		/// Endpoint after placeholder substitution.
		endpoint: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Configured request timeout is zero.
	#[error("Request timeout must be greater than zero.")]
	ZeroTimeout,
	/// Provider descriptor failed validation.
	#[error(transparent)]
	Descriptor(#[from] crate::provider::ProviderDescriptorError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures raised while exchanging an authorization code for an access token.
#[derive(Debug, ThisError)]
pub enum TokenExchangeError {
	/// Token endpoint answered with an empty body.
	#[error("Token endpoint returned an empty response.")]
	EmptyResponse {
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint answered with a non-success status.
	#[error("Token endpoint returned HTTP {status}.")]
	UnexpectedStatus {
		/// HTTP status code.
		status: u16,
		/// Truncated response body.
		body_preview: String,
	},
	/// Token endpoint body was not a JSON document.
	#[error("Token endpoint returned malformed JSON.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token response lacks a non-empty `access_token`.
	#[error("Token endpoint response is missing access_token.")]
	MissingAccessToken,
	/// Token response lacks the subject id the provider's profile call depends on.
	#[error("Token endpoint response is missing the subject id at `{path}`.")]
	MissingSubject {
		/// Field path the descriptor expected the subject id at.
		path: String,
	},
}

/// Failures raised while fetching and normalizing the user profile.
#[derive(Debug, ThisError)]
pub enum ProfileFetchError {
	/// Profile endpoint answered with an empty body.
	#[error("Profile endpoint returned an empty response.")]
	EmptyResponse {
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Profile endpoint answered with a non-success status.
	#[error("Profile endpoint returned HTTP {status}.")]
	UnexpectedStatus {
		/// HTTP status code.
		status: u16,
		/// Truncated response body.
		body_preview: String,
	},
	/// Profile endpoint body was not a JSON document.
	#[error("Profile endpoint returned malformed JSON.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// A field the login cannot proceed without is absent.
	#[error("Profile response is missing `{path}`.")]
	MissingField {
		/// Field path that failed to resolve.
		path: String,
	},
	/// Profile request needs the subject id, but the grant carries none.
	#[error("Access grant carries no subject id, but the profile request needs one.")]
	MissingSubject,
	/// Access grant was issued for a different provider than this client serves.
	#[error("Access grant belongs to provider `{grant}`, not `{client}`.")]
	ProviderMismatch {
		/// Provider that issued the grant.
		grant: String,
		/// Provider this client is configured for.
		client: String,
	},
}

/// Transport-level failures (network, IO, timeout).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the {endpoint} endpoint.")]
	Network {
		/// Endpoint label (`token` or `profile`).
		endpoint: &'static str,
		/// HTTP status observed before the failure, if any.
		status: Option<u16>,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request did not complete within the configured timeout.
	#[error("Request to the {endpoint} endpoint timed out.")]
	Timeout {
		/// Endpoint label (`token` or `profile`).
		endpoint: &'static str,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling a provider endpoint.")]
	Io(#[from] std::io::Error),
	/// Transport failed in a way it could only describe as text.
	#[error("HTTP client error occurred while calling the {endpoint} endpoint: {message}.")]
	Other {
		/// Endpoint label (`token` or `profile`).
		endpoint: &'static str,
		/// HTTP status observed before the failure, if any.
		status: Option<u16>,
		/// Transport-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		endpoint: &'static str,
		status: Option<u16>,
		src: impl 'static + Send + Sync + StdError,
	) -> Self {
		Self::Network { endpoint, status, source: Box::new(src) }
	}

	/// Returns the HTTP status observed before the failure, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Network { status, .. } | Self::Other { status, .. } => *status,
			Self::Timeout { .. } | Self::Io(_) => None,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn kinds_follow_the_failing_step() {
		assert_eq!(Error::from(ConfigError::ZeroTimeout).kind(), "config");
		assert_eq!(Error::from(TokenExchangeError::MissingAccessToken).kind(), "token_exchange");
		assert_eq!(Error::from(ProfileFetchError::MissingSubject).kind(), "profile_fetch");
		assert_eq!(Error::from(TransportError::Timeout { endpoint: "token" }).kind(), "timeout");
		assert_eq!(
			Error::from(TransportError::Other {
				endpoint: "profile",
				status: Some(502),
				message: "reset".into(),
			})
			.kind(),
			"transport"
		);
	}
}
