//! Request dispatch through a [`ProviderHttpClient`], transport error mapping, and response body
//! decoding shared by the token and profile steps.

pub use oauth2;

// crates.io
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
	http::{
		Method,
		header::{ACCEPT, CONTENT_TYPE, HeaderValue},
	},
};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, ProfileFetchError, TokenExchangeError, TransportError},
	http::{ProviderHttpClient, ResponseMetadata, ResponseMetadataSlot},
};

const BODY_PREVIEW_LIMIT: usize = 256;
const MIME_JSON: &str = "application/json";
const MIME_FORM: &str = "application/x-www-form-urlencoded";

/// Provider endpoint a request is addressed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// Code exchange endpoint.
	Token,
	/// User profile endpoint.
	Profile,
}
impl Endpoint {
	/// Returns a stable label suitable for errors, spans, and metrics.
	pub const fn as_str(self) -> &'static str {
		match self {
			Endpoint::Token => "token",
			Endpoint::Profile => "profile",
		}
	}
}
impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Maps HTTP transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a crate error.
	fn map_transport_error(
		&self,
		endpoint: Endpoint,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		endpoint: Endpoint,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(endpoint, meta, *inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => map_generic_transport_error(endpoint, meta, message),
			_ => map_generic_transport_error(endpoint, meta, "unrecognized transport failure"),
		}
	}
}

/// Failure to turn a provider response into a JSON document.
#[derive(Debug)]
pub(crate) enum BodyError {
	Status { status: u16, body_preview: String },
	Empty { status: Option<u16> },
	Parse { source: serde_path_to_error::Error<serde_json::Error>, status: Option<u16> },
}
impl BodyError {
	pub(crate) fn into_token_exchange(self) -> TokenExchangeError {
		match self {
			Self::Status { status, body_preview } =>
				TokenExchangeError::UnexpectedStatus { status, body_preview },
			Self::Empty { status } => TokenExchangeError::EmptyResponse { status },
			Self::Parse { source, status } => TokenExchangeError::Parse { source, status },
		}
	}

	pub(crate) fn into_profile_fetch(self) -> ProfileFetchError {
		match self {
			Self::Status { status, body_preview } =>
				ProfileFetchError::UnexpectedStatus { status, body_preview },
			Self::Empty { status } => ProfileFetchError::EmptyResponse { status },
			Self::Parse { source, status } => ProfileFetchError::Parse { source, status },
		}
	}
}

/// Builds a bare `GET` request; profile endpoints get no extra headers.
pub(crate) fn get(url: &Url) -> Result<HttpRequest, ConfigError> {
	Ok(oauth2::http::Request::builder().method(Method::GET).uri(url.as_str()).body(Vec::new())?)
}

/// Builds a `POST` request.
///
/// `form` is sent as an URL-encoded body; `None` sends an empty body. `accept_json` adds the
/// `Accept: application/json` header.
pub(crate) fn post(
	url: &Url,
	form: Option<String>,
	accept_json: bool,
) -> Result<HttpRequest, ConfigError> {
	let mut builder = oauth2::http::Request::builder().method(Method::POST).uri(url.as_str());

	if accept_json {
		builder = builder.header(ACCEPT, HeaderValue::from_static(MIME_JSON));
	}

	let body = match form {
		Some(form) => {
			builder = builder.header(CONTENT_TYPE, HeaderValue::from_static(MIME_FORM));

			form.into_bytes()
		},
		None => Vec::new(),
	};

	Ok(builder.body(body)?)
}

/// Sends `request`, returning the response and whatever metadata the transport captured.
pub(crate) async fn send<C, M>(
	http_client: &C,
	mapper: &M,
	endpoint: Endpoint,
	request: HttpRequest,
) -> Result<HttpResponse>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	let meta = ResponseMetadataSlot::default();
	let handle = http_client.with_metadata(meta.clone());

	match handle.call(request).await {
		Ok(response) => Ok(response),
		Err(err) => Err(mapper.map_transport_error(endpoint, meta.take().as_ref(), err)),
	}
}

/// Decodes a provider response into a JSON document.
///
/// Non-success statuses are reported before the body is inspected. Bodies holding only
/// whitespace count as empty.
pub(crate) fn decode_json(response: &HttpResponse) -> Result<Value, BodyError> {
	let status = response.status();
	let body = response.body().as_slice();

	if !status.is_success() {
		return Err(BodyError::Status {
			status: status.as_u16(),
			body_preview: truncate_preview(&String::from_utf8_lossy(body)),
		});
	}

	let status = Some(status.as_u16());
	let body = body.trim_ascii();

	if body.is_empty() {
		return Err(BodyError::Empty { status });
	}

	let de = &mut serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(de).map_err(|source| BodyError::Parse { source, status })
}

fn truncate_preview(body: &str) -> String {
	if body.chars().count() <= BODY_PREVIEW_LIMIT {
		return body.to_owned();
	}

	let mut buf = body.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	buf
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(
	endpoint: Endpoint,
	meta: Option<&ResponseMetadata>,
	err: ReqwestError,
) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransportError::Timeout { endpoint: endpoint.as_str() }.into();
	}

	let status = meta_status(meta).or_else(|| err.status().map(|code| code.as_u16()));

	TransportError::network(endpoint.as_str(), status, err).into()
}

#[cfg(feature = "reqwest")]
fn map_generic_transport_error(
	endpoint: Endpoint,
	meta: Option<&ResponseMetadata>,
	message: impl Display,
) -> Error {
	TransportError::Other {
		endpoint: endpoint.as_str(),
		status: meta_status(meta),
		message: message.to_string(),
	}
	.into()
}

#[cfg(feature = "reqwest")]
fn meta_status(meta: Option<&ResponseMetadata>) -> Option<u16> {
	meta.and_then(|value| value.status)
}
