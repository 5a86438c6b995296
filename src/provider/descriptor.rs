//! Provider descriptor data structures and helpers shared by all login steps.
//!
//! The module exposes validated metadata, supporting builder utilities, and the request and
//! mapping shapes so providers can describe their dialect in a transport-agnostic way.

/// Builder API for assembling provider descriptors.
pub mod builder;
/// Profile field maps and name splitting.
pub mod mapping;
/// Provider-specific quirk toggles.
pub mod quirks;
/// Token and profile request shapes.
pub mod request;

pub use builder::*;
pub use mapping::*;
pub use quirks::*;
pub use request::*;

// self
use crate::{_prelude::*, auth::ProviderId, error::ConfigError, extract::FieldPath};

/// Placeholder in profile endpoint templates that is replaced by the captured subject id.
pub const SUBJECT_PLACEHOLDER: &str = "{user-id}";

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Authorization endpoint users are redirected to.
	pub authorization: Url,
	/// Token endpoint used for the code exchange.
	pub token: Url,
	/// Profile endpoint template; may contain [`SUBJECT_PLACEHOLDER`].
	pub profile: String,
}

/// Immutable provider descriptor consumed by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Descriptor identifier.
	pub id: ProviderId,
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
	/// Extra authorization URL parameters appended after the standard ones (e.g. `scope`).
	#[serde(default)]
	pub login_params: Vec<(String, String)>,
	/// How the code exchange parameters travel to the token endpoint.
	#[serde(default)]
	pub token_request: TokenRequestStyle,
	/// Token response path holding a subject id the profile call depends on.
	#[serde(default)]
	pub subject: Option<FieldPath>,
	/// Shape of the profile request.
	pub profile_request: ProfileRequest,
	/// Mapping from the provider's profile envelope to the normalized profile.
	pub profile_map: ProfileFieldMap,
	/// Provider-specific quirks.
	#[serde(default)]
	pub quirks: ProviderQuirks,
}
impl ProviderDescriptor {
	/// Creates a new builder for the provided identifier.
	pub fn builder(id: ProviderId) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(id)
	}

	/// Returns true when the profile request needs the app's public key.
	pub fn requires_public_key(&self) -> bool {
		self.profile_request.references(&ParamValue::AppPublicKey)
	}

	/// Returns true when the profile call cannot be built without a captured subject id.
	pub fn requires_subject(&self) -> bool {
		self.endpoints.profile.contains(SUBJECT_PLACEHOLDER)
			|| self.profile_request.references(&ParamValue::Subject)
	}

	/// Resolves the profile endpoint template into a URL.
	pub fn profile_url(&self, subject: Option<&str>) -> Result<Url, ConfigError> {
		let endpoint = match subject {
			Some(subject) =>
				self.endpoints.profile.replace(SUBJECT_PLACEHOLDER, &crate::query::escape(subject)),
			None => self.endpoints.profile.clone(),
		};

		Url::parse(&endpoint)
			.map_err(|source| ConfigError::InvalidProfileEndpoint { endpoint, source })
	}
}
