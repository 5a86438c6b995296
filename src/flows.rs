//! Login orchestration: one client drives every provider through its descriptor.

mod exchange;
mod login;
mod profile;

pub use exchange::*;
pub use login::*;

// self
use crate::{
	_prelude::*,
	auth::{AppCredentials, ProviderId},
	error::ConfigError,
	http::ProviderHttpClient,
	obs::{self, LoginStep, StepOutcome, StepSpan},
	provider::ProviderDescriptor,
	transport::TransportErrorMapper,
};
#[cfg(feature = "reqwest")]
use crate::{
	http::ReqwestHttpClient, provider::ProviderKind, transport::ReqwestTransportErrorMapper,
};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestOAuth2Client = OAuth2Client<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Drives the authorization-code login against a single provider descriptor.
///
/// The client owns the HTTP client, the descriptor, and the application credentials. It keeps
/// no per-login state: whatever the token step learns travels in the returned [`AccessGrant`],
/// so one client can serve any number of concurrent logins.
pub struct OAuth2Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Provider descriptor that defines endpoints and dialect.
	pub descriptor: ProviderDescriptor,
	/// Application credentials registered with the provider.
	pub credentials: AppCredentials,
}
impl<C, M> OAuth2Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	///
	/// Fails before any network call when the descriptor is invalid, the credentials are empty,
	/// or the descriptor needs a public key the credentials lack.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		credentials: AppCredentials,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Result<Self, ConfigError> {
		descriptor.validate()?;
		credentials.validate()?;

		if descriptor.requires_public_key() && credentials.public_key().is_none() {
			return Err(ConfigError::MissingPublicKey { provider: descriptor.id.to_string() });
		}

		Ok(Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			descriptor,
			credentials,
		})
	}

	/// Provider this client logs users in with.
	pub fn provider(&self) -> &ProviderId {
		&self.descriptor.id
	}

	async fn observe<T, Fut>(&self, step: LoginStep, fut: Fut) -> Result<T>
	where
		Fut: Future<Output = Result<T>>,
	{
		let span = StepSpan::new(&self.descriptor.id, step);

		obs::record_step_outcome(step, StepOutcome::Attempt);

		let result = span.instrument(fut).await;

		let outcome = obs::record_step_result(step, &self.descriptor.id, &result);

		span.record_outcome(outcome, result.as_ref().err());

		result
	}
}
#[cfg(feature = "reqwest")]
impl OAuth2Client<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client backed by its own reqwest transport with the default timeout.
	pub fn new(
		descriptor: ProviderDescriptor,
		credentials: AppCredentials,
	) -> Result<Self, ConfigError> {
		Self::with_http_client(
			descriptor,
			credentials,
			ReqwestHttpClient::default_timeout()?,
			ReqwestTransportErrorMapper,
		)
	}

	/// Creates a client for one of the built-in providers.
	pub fn for_provider(
		kind: ProviderKind,
		credentials: AppCredentials,
	) -> Result<Self, ConfigError> {
		Self::new(kind.descriptor()?, credentials)
	}
}
impl<C, M> Clone for OAuth2Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			transport_mapper: Arc::clone(&self.transport_mapper),
			descriptor: self.descriptor.clone(),
			credentials: self.credentials.clone(),
		}
	}
}
impl<C, M> Debug for OAuth2Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuth2Client")
			.field("descriptor", &self.descriptor)
			.field("credentials", &self.credentials)
			.finish()
	}
}
