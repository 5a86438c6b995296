#![allow(dead_code)]

// std
use std::time::Duration as StdDuration;
// crates.io
use httpmock::MockServer;
// self
use oauth2_social::{
	auth::AppCredentials,
	flows::ReqwestOAuth2Client,
	http::ReqwestHttpClient,
	provider::{ProviderDescriptor, ProviderKind},
	transport::ReqwestTransportErrorMapper,
	url::Url,
};

pub const APP_ID: &str = "1";
pub const APP_SECRET: &str = "s3cret";
pub const PUBLIC_KEY: &str = "CBA";
pub const RETURN_URL: &str = "https://app.example.com/login/callback";

pub fn return_url() -> Url {
	Url::parse(RETURN_URL).expect("Return URL should parse.")
}

pub fn credentials() -> AppCredentials {
	AppCredentials::new(APP_ID, APP_SECRET).with_public_key(PUBLIC_KEY)
}

/// Path component of a profile endpoint template, placeholder included.
pub fn profile_path(template: &str) -> String {
	let authority = template.split_once("://").map(|(_, rest)| rest).unwrap_or(template);

	authority.find('/').map(|idx| authority[idx..].to_owned()).unwrap_or_else(|| "/".into())
}

/// Points a built-in descriptor at the mock server, keeping its paths.
pub fn rebase_descriptor(kind: ProviderKind, server: &MockServer) -> ProviderDescriptor {
	let mut descriptor = kind.descriptor().expect("Built-in descriptor should build.");

	descriptor.endpoints.authorization =
		Url::parse(&server.url("/authorize")).expect("Mock authorization URL should parse.");
	descriptor.endpoints.token =
		Url::parse(&server.url("/token")).expect("Mock token URL should parse.");
	descriptor.endpoints.profile = server.url(profile_path(&descriptor.endpoints.profile));

	descriptor
}

pub fn client_with_timeout(
	kind: ProviderKind,
	server: &MockServer,
	timeout: StdDuration,
) -> ReqwestOAuth2Client {
	let http_client =
		ReqwestHttpClient::with_timeout(timeout).expect("Test HTTP client should build.");

	ReqwestOAuth2Client::with_http_client(
		rebase_descriptor(kind, server),
		credentials(),
		http_client,
		ReqwestTransportErrorMapper,
	)
	.expect("Test client should build.")
}

pub fn client(kind: ProviderKind, server: &MockServer) -> ReqwestOAuth2Client {
	client_with_timeout(kind, server, StdDuration::from_secs(5))
}
