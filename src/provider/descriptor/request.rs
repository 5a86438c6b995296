// self
use crate::{_prelude::*, signature::SignatureScheme};

/// Encoding of the code exchange request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenRequestStyle {
	/// Parameters in the token URL's query, POST with an empty body.
	#[default]
	QueryOnEmptyBody,
	/// Parameters form-encoded in the POST body.
	FormBody,
}

/// Source of a profile request parameter's value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParamValue {
	/// Fixed value.
	Literal(String),
	/// The access token obtained from the exchange.
	AccessToken,
	/// The application id.
	AppId,
	/// The public application key.
	AppPublicKey,
	/// The subject id captured from the token response.
	Subject,
	/// Today's UTC date as `YYYYMMDD` (Foursquare API versioning).
	VersionDate,
}

/// One named profile request parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileParam {
	/// Query parameter name.
	pub name: String,
	/// Where the value comes from.
	pub value: ParamValue,
}
impl ProfileParam {
	/// Creates a parameter.
	pub fn new(name: impl Into<String>, value: ParamValue) -> Self {
		Self { name: name.into(), value }
	}

	/// Shorthand for a fixed-value parameter.
	pub fn literal(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self::new(name, ParamValue::Literal(value.into()))
	}
}

/// Shape of the GET request that fetches the user's profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRequest {
	/// Parameters in the order they are sent.
	pub params: Vec<ProfileParam>,
	/// Signature appended as `sig` after the other parameters.
	#[serde(default)]
	pub signature: Option<SignatureScheme>,
}
impl ProfileRequest {
	/// Bearer-style request sending only the access token under `token_param`.
	pub fn bearer(token_param: impl Into<String>) -> Self {
		Self { params: vec![ProfileParam::new(token_param, ParamValue::AccessToken)], signature: None }
	}

	/// Returns true when any parameter draws its value from `value`.
	pub fn references(&self, value: &ParamValue) -> bool {
		self.params.iter().any(|param| &param.value == value)
	}
}
