// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
	sync::Arc,
};
// crates.io
use parking_lot::Mutex;
// self
use oauth2_social::{
	auth::AppCredentials,
	error::{ConfigError, Error, TokenExchangeError, TransportError},
	flows::OAuth2Client,
	http::{ProviderHttpClient, ResponseMetadata, ResponseMetadataSlot},
	provider::ProviderKind,
	transport::{
		Endpoint, TransportErrorMapper,
		oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse},
	},
	url::Url,
};

#[derive(Debug)]
enum FakeTransportError {
	Refused,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Refused => write!(f, "Connection refused."),
		}
	}
}
impl StdError for FakeTransportError {}

/// Scripted transport: answers every request with one canned outcome and records the requests.
#[derive(Clone, Default)]
struct FakeHttpClient {
	reply: Option<(u16, &'static str)>,
	requests: Arc<Mutex<Vec<(String, String, Vec<u8>)>>>,
}
impl FakeHttpClient {
	fn replying(status: u16, body: &'static str) -> Self {
		Self { reply: Some((status, body)), ..Default::default() }
	}

	fn refusing() -> Self {
		Self::default()
	}

	fn recorded(&self) -> Vec<(String, String, Vec<u8>)> {
		self.requests.lock().clone()
	}
}
impl ProviderHttpClient for FakeHttpClient {
	type Handle = FakeHttpHandle;
	type TransportError = FakeTransportError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		FakeHttpHandle { slot, client: self.clone() }
	}
}

struct FakeHttpHandle {
	slot: ResponseMetadataSlot,
	client: FakeHttpClient,
}
impl<'a> AsyncHttpClient<'a> for FakeHttpHandle {
	type Error = HttpClientError<FakeTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, request: HttpRequest) -> Self::Future {
		let slot = self.slot.clone();
		let client = self.client.clone();

		Box::pin(async move {
			assert!(
				slot.take().is_none(),
				"ResponseMetadataSlot must be clear before dispatching a request."
			);

			client.requests.lock().push((
				request.method().to_string(),
				request.uri().to_string(),
				request.body().clone(),
			));

			let Some((status, body)) = client.reply else {
				slot.store(ResponseMetadata { status: None });

				return Err(HttpClientError::Reqwest(Box::new(FakeTransportError::Refused)));
			};
			let mut response = HttpResponse::new(body.as_bytes().to_vec());

			*response.status_mut() = status.try_into().expect("Fake status should be valid.");

			slot.store(ResponseMetadata { status: Some(status) });

			Ok(response)
		})
	}
}

#[derive(Clone, Default)]
struct RecordingTransportErrorMapper {
	endpoints: Arc<Mutex<Vec<Endpoint>>>,
}
impl TransportErrorMapper<FakeTransportError> for RecordingTransportErrorMapper {
	fn map_transport_error(
		&self,
		endpoint: Endpoint,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<FakeTransportError>,
	) -> Error {
		self.endpoints.lock().push(endpoint);

		match err {
			HttpClientError::Reqwest(inner) => TransportError::network(
				endpoint.as_str(),
				meta.and_then(|value| value.status),
				*inner,
			)
			.into(),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			other => TransportError::Other {
				endpoint: endpoint.as_str(),
				status: None,
				message: format!("{other:?}"),
			}
			.into(),
		}
	}
}

type FakeClient = OAuth2Client<FakeHttpClient, RecordingTransportErrorMapper>;

fn build_client(
	kind: ProviderKind,
	http_client: FakeHttpClient,
	mapper: RecordingTransportErrorMapper,
) -> FakeClient {
	OAuth2Client::with_http_client(
		kind.descriptor().expect("Built-in descriptor should build."),
		AppCredentials::new("app", "s3cret"),
		http_client,
		mapper,
	)
	.expect("Client over the fake transport should build.")
}

fn return_url() -> Url {
	Url::parse("https://app.example.com/callback").expect("Return URL should parse.")
}

#[tokio::test]
async fn fake_transport_drives_the_token_exchange() {
	let http_client = FakeHttpClient::replying(200, "{\"access_token\":\"fake-token\"}");
	let client = build_client(ProviderKind::GitHub, http_client.clone(), Default::default());
	let grant = client
		.exchange_code(&return_url(), "c0de")
		.await
		.expect("Exchange over the fake transport should succeed.");

	assert_eq!(grant.access_token.expose(), "fake-token");

	let requests = http_client.recorded();

	assert_eq!(requests.len(), 1);
	assert_eq!(requests[0].0, "POST");
	assert!(requests[0].1.starts_with("https://github.com/login/oauth/access_token?client_id=app"));
	assert!(requests[0].2.is_empty());
}

#[tokio::test]
async fn fake_transport_failures_go_through_the_mapper() {
	let mapper = RecordingTransportErrorMapper::default();
	let client = build_client(ProviderKind::Yandex, FakeHttpClient::refusing(), mapper.clone());
	let err = client
		.exchange_code(&return_url(), "c0de")
		.await
		.expect_err("Refused connection should fail.");

	assert!(
		matches!(err, Error::Transport(TransportError::Network { endpoint: "token", .. })),
		"Unexpected error: {err:?}."
	);
	assert!(std::error::Error::source(&err).is_some());
	assert_eq!(mapper.endpoints.lock().clone(), vec![Endpoint::Token]);
}

#[tokio::test]
async fn fake_transport_status_is_reported_per_step() {
	let client = build_client(
		ProviderKind::Foursquare,
		FakeHttpClient::replying(500, "upstream exploded"),
		Default::default(),
	);
	let err = client
		.exchange_code(&return_url(), "c0de")
		.await
		.expect_err("Server error should fail the exchange.");

	assert!(matches!(
		err,
		Error::TokenExchange(TokenExchangeError::UnexpectedStatus { status: 500, .. })
	));
}
