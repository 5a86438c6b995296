//! Profile retrieval, request signing, and the combined login.

// crates.io
use time::Date;
// self
use crate::{
	_prelude::*,
	auth::{AuthenticationResult, UserProfile},
	error::{ConfigError, ProfileFetchError},
	flows::{AccessGrant, OAuth2Client},
	http::ProviderHttpClient,
	obs::LoginStep,
	provider::{ParamValue, ProfileParam},
	query,
	signature::SIGNATURE_PARAM,
	transport::{self, BodyError, Endpoint, TransportErrorMapper},
};

impl<C, M> OAuth2Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches and normalizes the profile of the user `grant` was issued for.
	///
	/// A document without a user id, such as an error body sent with HTTP 200, fails with
	/// [`ProfileFetchError::MissingField`].
	pub async fn fetch_profile(&self, grant: &AccessGrant) -> Result<UserProfile> {
		self.observe(LoginStep::Profile, async move {
			let url = self.profile_url(grant, OffsetDateTime::now_utc().date())?;
			let request = transport::get(&url)?;
			let response = transport::send(
				self.http_client.as_ref(),
				self.transport_mapper.as_ref(),
				Endpoint::Profile,
				request,
			)
			.await?;
			let document =
				transport::decode_json(&response).map_err(BodyError::into_profile_fetch)?;

			self.descriptor.profile_map.extract(&document).map_err(Error::from)
		})
		.await
	}

	/// Exchanges `code` and fetches the profile in one go.
	///
	/// The profile must carry an `id`; it becomes the provider user id. The user name is the
	/// display name, else the e-mail address, else the id.
	pub async fn complete_login(
		&self,
		return_url: &Url,
		code: &str,
	) -> Result<AuthenticationResult> {
		let grant = self.exchange_code(return_url, code).await?;
		let profile = self.fetch_profile(&grant).await?;
		let provider_user_id = profile
			.id()
			.map(ToOwned::to_owned)
			.ok_or_else(|| ProfileFetchError::MissingField { path: "id".into() })?;
		let user_name = profile
			.display_name()
			.or_else(|| profile.email().map(ToOwned::to_owned))
			.unwrap_or_else(|| provider_user_id.clone());

		Ok(AuthenticationResult {
			provider: grant.provider,
			provider_user_id,
			user_name,
			extra_data: profile,
		})
	}

	/// Resolves the full profile URL, signature included.
	fn profile_url(&self, grant: &AccessGrant, today: Date) -> Result<Url> {
		if grant.provider != self.descriptor.id {
			return Err(ProfileFetchError::ProviderMismatch {
				grant: grant.provider.to_string(),
				client: self.descriptor.id.to_string(),
			}
			.into());
		}
		if self.descriptor.requires_subject() && grant.subject.is_none() {
			return Err(ProfileFetchError::MissingSubject.into());
		}

		let mut url = self.descriptor.profile_url(grant.subject.as_deref())?;
		let params = self.profile_params(grant, today)?;
		let request = &self.descriptor.profile_request;

		match request.signature {
			Some(scheme) => {
				let sig = scheme.sign(
					&params,
					grant.access_token.expose(),
					self.credentials.app_secret.expose(),
				);
				let unsigned = scheme.unsigned_params();
				let (trailing, signed): (Vec<_>, Vec<_>) =
					params.into_iter().partition(|(name, _)| unsigned.contains(&name.as_str()));

				query::append_pairs(
					&mut url,
					signed
						.into_iter()
						.chain([(SIGNATURE_PARAM.to_owned(), sig)])
						.chain(trailing),
				);
			},
			None => query::append_pairs(&mut url, params),
		}

		Ok(url)
	}

	fn profile_params(&self, grant: &AccessGrant, today: Date) -> Result<Vec<(String, String)>> {
		self.descriptor
			.profile_request
			.params
			.iter()
			.map(|ProfileParam { name, value }| -> Result<(String, String)> {
				let value = match value {
					ParamValue::Literal(literal) => literal.clone(),
					ParamValue::AccessToken => grant.access_token.expose().to_owned(),
					ParamValue::AppId => self.credentials.app_id.clone(),
					ParamValue::AppPublicKey => self
						.credentials
						.public_key()
						.map(ToOwned::to_owned)
						.ok_or_else(|| ConfigError::MissingPublicKey {
							provider: self.descriptor.id.to_string(),
						})?,
					ParamValue::Subject =>
						grant.subject.clone().ok_or(ProfileFetchError::MissingSubject)?,
					ParamValue::VersionDate => version_date(today),
				};

				Ok((name.clone(), value))
			})
			.collect()
	}
}

/// `YYYYMMDD`, the API version pin Foursquare expects in `v`.
fn version_date(date: Date) -> String {
	format!("{:04}{:02}{:02}", date.year(), u8::from(date.month()), date.day())
}
