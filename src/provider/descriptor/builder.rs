// self
use crate::{
	_prelude::*,
	auth::{IdentifierError, ProviderId},
	extract::FieldPath,
	provider::{
		ParamValue, ProfileFieldMap, ProfileParam, ProfileRequest, ProviderDescriptor,
		ProviderEndpoints, ProviderQuirks, SUBJECT_PLACEHOLDER, TokenRequestStyle,
	},
	signature::SIGNATURE_PARAM,
};

/// Login URL parameters the client always sets itself.
const RESERVED_LOGIN_PARAMS: [&str; 3] = ["client_id", "response_type", "redirect_uri"];

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum ProviderDescriptorError {
	/// Identifier failed validation.
	#[error("Invalid provider identifier.")]
	InvalidId(#[from] IdentifierError),
	/// Authorization endpoint is required.
	#[error("Missing authorization endpoint.")]
	MissingAuthorizationEndpoint,
	/// Token endpoint is required.
	#[error("Missing token endpoint.")]
	MissingTokenEndpoint,
	/// Profile endpoint is required.
	#[error("Missing profile endpoint.")]
	MissingProfileEndpoint,
	/// Profile request shape is required.
	#[error("Missing profile request.")]
	MissingProfileRequest,
	/// Profile field map is required.
	#[error("Missing profile field map.")]
	MissingProfileMap,
	/// Endpoint does not parse as a URL.
	#[error("The {endpoint} endpoint is not a valid URL: {url}.")]
	InvalidEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint text that failed validation.
		url: String,
	},
	/// Endpoints must use HTTP or HTTPS.
	#[error("The {endpoint} endpoint must use HTTP or HTTPS: {url}.")]
	UnsupportedScheme {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Profile call depends on a subject id the token response is never asked for.
	#[error("The profile request uses the subject id, but no subject path is configured.")]
	SubjectNotCaptured,
	/// Login extras must not override the standard authorization parameters.
	#[error("Login parameter `{name}` is set by the client and cannot be overridden.")]
	ReservedLoginParam {
		/// Offending parameter name.
		name: String,
	},
	/// Profile parameters must not collide with the signature parameter.
	#[error("Profile parameter `sig` is reserved for the request signature.")]
	ReservedSignatureParam,
	/// Profile request never sends the access token.
	#[error("The profile request must carry the access token.")]
	MissingAccessTokenParam,
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	/// Identifier for the descriptor being constructed.
	pub id: ProviderId,
	/// Authorization endpoint.
	pub authorization_endpoint: Option<Url>,
	/// Token endpoint.
	pub token_endpoint: Option<Url>,
	/// Profile endpoint template.
	pub profile_endpoint: Option<String>,
	/// Extra login URL parameters.
	pub login_params: Vec<(String, String)>,
	/// Token request encoding.
	pub token_request: TokenRequestStyle,
	/// Token response path of the subject id.
	pub subject: Option<FieldPath>,
	/// Profile request shape.
	pub profile_request: Option<ProfileRequest>,
	/// Profile field map.
	pub profile_map: Option<ProfileFieldMap>,
	/// Provider-specific quirks.
	pub quirks: ProviderQuirks,
}
impl ProviderDescriptorBuilder {
	/// Creates a new builder seeded with the provided identifier.
	pub fn new(id: ProviderId) -> Self {
		Self {
			id,
			authorization_endpoint: None,
			token_endpoint: None,
			profile_endpoint: None,
			login_params: Vec::new(),
			token_request: TokenRequestStyle::default(),
			subject: None,
			profile_request: None,
			profile_map: None,
			quirks: ProviderQuirks::default(),
		}
	}

	/// Sets the authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Sets the profile endpoint template.
	pub fn profile_endpoint(mut self, template: impl Into<String>) -> Self {
		self.profile_endpoint = Some(template.into());

		self
	}

	/// Appends an extra login URL parameter.
	pub fn login_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.login_params.push((name.into(), value.into()));

		self
	}

	/// Overrides the token request encoding.
	pub fn token_request(mut self, style: TokenRequestStyle) -> Self {
		self.token_request = style;

		self
	}

	/// Captures a subject id from the token response at `path`.
	pub fn subject(mut self, path: impl Into<FieldPath>) -> Self {
		self.subject = Some(path.into());

		self
	}

	/// Sets the profile request shape.
	pub fn profile_request(mut self, request: ProfileRequest) -> Self {
		self.profile_request = Some(request);

		self
	}

	/// Sets the profile field map.
	pub fn profile_map(mut self, map: ProfileFieldMap) -> Self {
		self.profile_map = Some(map);

		self
	}

	/// Overrides the provider quirks.
	pub fn quirks(mut self, quirks: ProviderQuirks) -> Self {
		self.quirks = quirks;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let authorization = self
			.authorization_endpoint
			.ok_or(ProviderDescriptorError::MissingAuthorizationEndpoint)?;
		let token = self.token_endpoint.ok_or(ProviderDescriptorError::MissingTokenEndpoint)?;
		let profile =
			self.profile_endpoint.ok_or(ProviderDescriptorError::MissingProfileEndpoint)?;
		let profile_request =
			self.profile_request.ok_or(ProviderDescriptorError::MissingProfileRequest)?;
		let profile_map = self.profile_map.ok_or(ProviderDescriptorError::MissingProfileMap)?;
		let descriptor = ProviderDescriptor {
			id: self.id,
			endpoints: ProviderEndpoints { authorization, token, profile },
			login_params: self.login_params,
			token_request: self.token_request,
			subject: self.subject,
			profile_request,
			profile_map,
			quirks: self.quirks,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ProviderDescriptor {
	/// Validates invariants for the descriptor.
	///
	/// Descriptors deserialized from configuration should be passed through this before use;
	/// the client does so on construction.
	pub fn validate(&self) -> Result<(), ProviderDescriptorError> {
		validate_endpoint("authorization", &self.endpoints.authorization)?;
		validate_endpoint("token", &self.endpoints.token)?;

		let sample = self.endpoints.profile.replace(SUBJECT_PLACEHOLDER, "0");
		let profile = Url::parse(&sample).map_err(|_| ProviderDescriptorError::InvalidEndpoint {
			endpoint: "profile",
			url: self.endpoints.profile.clone(),
		})?;

		validate_endpoint("profile", &profile)?;

		if self.requires_subject() && self.subject.is_none() {
			return Err(ProviderDescriptorError::SubjectNotCaptured);
		}
		if let Some((name, _)) = self
			.login_params
			.iter()
			.find(|(name, _)| RESERVED_LOGIN_PARAMS.contains(&name.as_str()))
		{
			return Err(ProviderDescriptorError::ReservedLoginParam { name: name.clone() });
		}

		validate_profile_request(&self.profile_request)
	}
}

/// Parses a static endpoint, reporting which endpoint failed.
pub fn parse_endpoint(endpoint: &'static str, url: &str) -> Result<Url, ProviderDescriptorError> {
	Url::parse(url)
		.map_err(|_| ProviderDescriptorError::InvalidEndpoint { endpoint, url: url.to_owned() })
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ProviderDescriptorError> {
	match url.scheme() {
		"http" | "https" => Ok(()),
		_ =>
			Err(ProviderDescriptorError::UnsupportedScheme { endpoint: name, url: url.to_string() }),
	}
}

fn validate_profile_request(request: &ProfileRequest) -> Result<(), ProviderDescriptorError> {
	if request.params.iter().any(|ProfileParam { name, .. }| name == SIGNATURE_PARAM) {
		return Err(ProviderDescriptorError::ReservedSignatureParam);
	}
	// Signed requests still send the token next to the signature.
	if !request.references(&ParamValue::AccessToken) {
		return Err(ProviderDescriptorError::MissingAccessTokenParam);
	}

	Ok(())
}
