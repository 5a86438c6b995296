//! Login URL construction.

// self
use crate::{
	_prelude::*,
	auth::ProviderId,
	flows::OAuth2Client,
	http::ProviderHttpClient,
	obs::{self, LoginStep, StepOutcome, StepSpan},
	query,
	transport::TransportErrorMapper,
};

/// Login redirect handed to the hosting application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationRequest {
	/// Provider the user is sent to.
	pub provider: ProviderId,
	/// Callback the provider redirects back to with the authorization code.
	pub return_url: Url,
	/// Provider login URL the user agent should be redirected to.
	pub login_url: Url,
}

impl<C, M> OAuth2Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Builds the provider login URL.
	///
	/// The query carries `client_id`, `response_type=code`, and `redirect_uri` in that order,
	/// followed by the descriptor's extras. The app secret never appears in it.
	pub fn build_login_url(&self, return_url: &Url) -> Url {
		const STEP: LoginStep = LoginStep::Login;

		let _guard = StepSpan::new(&self.descriptor.id, STEP).entered();

		obs::record_step_outcome(STEP, StepOutcome::Attempt);

		let mut url = self.descriptor.endpoints.authorization.clone();
		let standard = [
			("client_id", self.credentials.app_id.as_str()),
			("response_type", "code"),
			("redirect_uri", return_url.as_str()),
		];
		let extras =
			self.descriptor.login_params.iter().map(|(name, value)| (name.as_str(), value.as_str()));

		query::append_pairs(&mut url, standard.into_iter().chain(extras));
		obs::record_step_outcome(STEP, StepOutcome::Success);

		url
	}

	/// Builds the login URL and pairs it with the return URL it was built for.
	pub fn authorization_request(&self, return_url: Url) -> AuthorizationRequest {
		let login_url = self.build_login_url(&return_url);

		AuthorizationRequest { provider: self.descriptor.id.clone(), return_url, login_url }
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::{auth::AppCredentials, flows::ReqwestOAuth2Client, provider::ProviderKind};

	fn client(kind: ProviderKind) -> ReqwestOAuth2Client {
		ReqwestOAuth2Client::for_provider(
			kind,
			AppCredentials::new("app 1", "s3cret").with_public_key("CBA"),
		)
		.expect("Client should build.")
	}

	fn return_url() -> Url {
		Url::parse("https://example.com/cb?x=1").expect("Return URL should parse.")
	}

	#[test]
	fn github_login_url_matches_expected_query() {
		let url = client(ProviderKind::GitHub).build_login_url(&return_url());

		assert_eq!(
			url.as_str(),
			"https://github.com/login/oauth/authorize?client_id=app%201&response_type=code\
			 &redirect_uri=https%3A%2F%2Fexample.com%2Fcb%3Fx%3D1&scope=user%2Cuser%3Aemail"
		);
	}

	#[test]
	fn every_provider_sends_standard_parameters_first() {
		for kind in ProviderKind::ALL {
			let url = client(kind).build_login_url(&return_url());
			let pairs = url.query_pairs().collect::<Vec<_>>();

			assert_eq!(pairs[0], ("client_id".into(), "app 1".into()));
			assert_eq!(pairs[1], ("response_type".into(), "code".into()));
			assert_eq!(pairs[2], ("redirect_uri".into(), "https://example.com/cb?x=1".into()));
			assert!(!url.as_str().contains("s3cret"));
		}
	}

	#[test]
	fn odnoklassniki_scope_is_percent_encoded() {
		let request = client(ProviderKind::Odnoklassniki).authorization_request(return_url());

		assert!(request.login_url.as_str().ends_with("&scope=VALUABLE%20ACCESS"));
		assert_eq!(request.return_url, return_url());
		assert_eq!(request.provider.as_ref(), "odnoklassniki");
	}
}
