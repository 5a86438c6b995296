//! Authorization code exchange.

// self
use crate::{
	_prelude::*,
	auth::{ProviderId, TokenSecret},
	error::TokenExchangeError,
	extract::{self, FieldPath},
	flows::OAuth2Client,
	http::ProviderHttpClient,
	obs::LoginStep,
	provider::TokenRequestStyle,
	query,
	transport::{self, Endpoint, TransportErrorMapper},
};

const ACCESS_TOKEN_FIELD: &str = "access_token";
const GRANT_TYPE: &str = "authorization_code";

/// Access token issued by the token endpoint, plus the subject id some providers return with it.
///
/// Only [`OAuth2Client::exchange_code`] produces grants and [`OAuth2Client::fetch_profile`]
/// consumes them, so the subject id never lives in client state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
	/// Provider that issued the token.
	pub provider: ProviderId,
	/// Access token (redacted in `Debug`).
	pub access_token: TokenSecret,
	/// Provider user id returned next to the token (VKontakte `user_id`, Instagram `user.id`).
	#[serde(default)]
	pub subject: Option<String>,
}

impl<C, M> OAuth2Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges the authorization code for an [`AccessGrant`].
	///
	/// `return_url` must be the URL the login was started with. A provider that rejects the code
	/// and a provider that answers with garbage both surface as [`TokenExchangeError`].
	pub async fn exchange_code(&self, return_url: &Url, code: &str) -> Result<AccessGrant> {
		self.observe(LoginStep::Exchange, async move {
			let request = self.token_request(return_url, code)?;
			let response = transport::send(
				self.http_client.as_ref(),
				self.transport_mapper.as_ref(),
				Endpoint::Token,
				request,
			)
			.await?;
			let document = transport::decode_json(&response)
				.map_err(transport::BodyError::into_token_exchange)?;

			self.grant_from_document(&document).map_err(Error::from)
		})
		.await
	}

	fn token_params<'a>(&'a self, return_url: &'a Url, code: &'a str) -> Vec<(&'a str, &'a str)> {
		let mut params = vec![
			("client_id", self.credentials.app_id.as_str()),
			("client_secret", self.credentials.app_secret.expose()),
		];

		if self.descriptor.quirks.send_grant_type {
			params.push(("grant_type", GRANT_TYPE));
		}

		params.push(("code", code));
		params.push(("redirect_uri", return_url.as_str()));

		params
	}

	fn token_request(&self, return_url: &Url, code: &str) -> Result<oauth2::HttpRequest> {
		let params = self.token_params(return_url, code);
		let accept_json = self.descriptor.quirks.accept_json;
		let request = match self.descriptor.token_request {
			TokenRequestStyle::QueryOnEmptyBody => {
				let mut url = self.descriptor.endpoints.token.clone();

				query::append_pairs(&mut url, params);

				transport::post(&url, None, accept_json)?
			},
			TokenRequestStyle::FormBody => transport::post(
				&self.descriptor.endpoints.token,
				Some(query::encode_pairs(params)),
				accept_json,
			)?,
		};

		Ok(request)
	}

	fn grant_from_document(&self, document: &Value) -> Result<AccessGrant, TokenExchangeError> {
		let access_token = extract::extract_string(document, &FieldPath::new(ACCESS_TOKEN_FIELD))
			.ok_or(TokenExchangeError::MissingAccessToken)?;
		let subject = match &self.descriptor.subject {
			Some(path) => Some(
				extract::extract_string(document, path)
					.ok_or_else(|| TokenExchangeError::MissingSubject { path: path.to_string() })?,
			),
			None => None,
		};

		Ok(AccessGrant {
			provider: self.descriptor.id.clone(),
			access_token: TokenSecret::new(access_token),
			subject,
		})
	}
}
