//! Built-in descriptors for the supported providers.
//!
//! Each provider is one data value; adding a provider means adding a variant here (or building a
//! [`ProviderDescriptor`] elsewhere), never touching the client.

// self
use crate::{
	_prelude::*,
	auth::ProviderId,
	error::ConfigError,
	extract::FieldPath,
	provider::{
		NameSource, ParamValue, ProfileFieldMap, ProfileParam, ProfileRequest, ProviderDescriptor,
		ProviderDescriptorError, ProviderQuirks, SUBJECT_PLACEHOLDER, TokenRequestStyle,
		parse_endpoint,
	},
	signature::SignatureScheme,
};

/// Providers shipped with the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
	/// GitHub.
	GitHub,
	/// Foursquare.
	Foursquare,
	/// Instagram (legacy v1 API).
	Instagram,
	/// Mail.Ru.
	MailRu,
	/// Odnoklassniki.
	Odnoklassniki,
	/// VKontakte.
	VKontakte,
	/// Yandex.
	Yandex,
}
impl ProviderKind {
	/// Every built-in provider.
	pub const ALL: [ProviderKind; 7] = [
		ProviderKind::GitHub,
		ProviderKind::Foursquare,
		ProviderKind::Instagram,
		ProviderKind::MailRu,
		ProviderKind::Odnoklassniki,
		ProviderKind::VKontakte,
		ProviderKind::Yandex,
	];

	/// Returns the provider identifier string.
	pub const fn as_str(self) -> &'static str {
		match self {
			ProviderKind::GitHub => "github",
			ProviderKind::Foursquare => "foursquare",
			ProviderKind::Instagram => "instagram",
			ProviderKind::MailRu => "mailru",
			ProviderKind::Odnoklassniki => "odnoklassniki",
			ProviderKind::VKontakte => "vkontakte",
			ProviderKind::Yandex => "yandex",
		}
	}

	/// Builds the provider's descriptor.
	pub fn descriptor(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		match self {
			ProviderKind::GitHub => github(),
			ProviderKind::Foursquare => foursquare(),
			ProviderKind::Instagram => instagram(),
			ProviderKind::MailRu => mailru(),
			ProviderKind::Odnoklassniki => odnoklassniki(),
			ProviderKind::VKontakte => vkontakte(),
			ProviderKind::Yandex => yandex(),
		}
	}
}
impl Display for ProviderKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for ProviderKind {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		ProviderKind::ALL
			.into_iter()
			.find(|kind| kind.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| ConfigError::UnknownProvider { provider: s.to_owned() })
	}
}

fn builder(
	kind: ProviderKind,
	authorization: &str,
	token: &str,
	profile: &str,
) -> Result<crate::provider::ProviderDescriptorBuilder, ProviderDescriptorError> {
	Ok(ProviderDescriptor::builder(ProviderId::new(kind.as_str())?)
		.authorization_endpoint(parse_endpoint("authorization", authorization)?)
		.token_endpoint(parse_endpoint("token", token)?)
		.profile_endpoint(profile))
}

fn separate(first: &str, last: &str) -> NameSource {
	NameSource::Separate { first: first.into(), last: last.into() }
}

fn full_name(path: &str, fallback: &str) -> NameSource {
	NameSource::FullName { path: path.into(), fallback: Some(fallback.into()) }
}

fn github() -> Result<ProviderDescriptor, ProviderDescriptorError> {
	builder(
		ProviderKind::GitHub,
		"https://github.com/login/oauth/authorize",
		"https://github.com/login/oauth/access_token",
		"https://api.github.com/user",
	)?
	.login_param("scope", "user,user:email")
	.quirks(ProviderQuirks { accept_json: true, send_grant_type: false })
	.profile_request(ProfileRequest::bearer("access_token"))
	.profile_map(ProfileFieldMap {
		root: FieldPath::root(),
		id: "id".into(),
		name: full_name("name", "login"),
		email: Some("email".into()),
	})
	.build()
}

fn foursquare() -> Result<ProviderDescriptor, ProviderDescriptorError> {
	builder(
		ProviderKind::Foursquare,
		"https://foursquare.com/oauth2/authorize",
		"https://foursquare.com/oauth2/access_token",
		"https://api.foursquare.com/v2/users/self",
	)?
	.profile_request(ProfileRequest {
		params: vec![
			ProfileParam::new("oauth_token", ParamValue::AccessToken),
			ProfileParam::new("v", ParamValue::VersionDate),
		],
		signature: None,
	})
	.profile_map(ProfileFieldMap {
		root: "response.user".into(),
		id: "id".into(),
		name: separate("firstName", "lastName"),
		email: Some("contact.email".into()),
	})
	.build()
}

fn instagram() -> Result<ProviderDescriptor, ProviderDescriptorError> {
	builder(
		ProviderKind::Instagram,
		"https://api.instagram.com/oauth/authorize",
		"https://api.instagram.com/oauth/access_token",
		&format!("https://api.instagram.com/v1/users/{SUBJECT_PLACEHOLDER}/"),
	)?
	.token_request(TokenRequestStyle::FormBody)
	.subject("user.id")
	.profile_request(ProfileRequest::bearer("access_token"))
	.profile_map(ProfileFieldMap {
		root: "data".into(),
		id: "id".into(),
		name: full_name("full_name", "username"),
		email: None,
	})
	.build()
}

fn mailru() -> Result<ProviderDescriptor, ProviderDescriptorError> {
	builder(
		ProviderKind::MailRu,
		"https://connect.mail.ru/oauth/authorize",
		"https://connect.mail.ru/oauth/token",
		"http://www.appsmail.ru/platform/api",
	)?
	.profile_request(ProfileRequest {
		params: vec![
			ProfileParam::new("app_id", ParamValue::AppId),
			ProfileParam::literal("method", "users.getInfo"),
			ProfileParam::literal("secure", "1"),
			ProfileParam::new("session_key", ParamValue::AccessToken),
		],
		signature: Some(SignatureScheme::MailRu),
	})
	.profile_map(ProfileFieldMap {
		root: "0".into(),
		id: "uid".into(),
		name: separate("first_name", "last_name"),
		email: Some("email".into()),
	})
	.build()
}

fn odnoklassniki() -> Result<ProviderDescriptor, ProviderDescriptorError> {
	builder(
		ProviderKind::Odnoklassniki,
		"http://www.odnoklassniki.ru/oauth/authorize",
		"http://api.odnoklassniki.ru/oauth/token.do",
		"http://api.odnoklassniki.ru/fb.do",
	)?
	.login_param("scope", "VALUABLE ACCESS")
	.profile_request(ProfileRequest {
		params: vec![
			ProfileParam::new("application_key", ParamValue::AppPublicKey),
			ProfileParam::literal("method", "users.getCurrentUser"),
			ProfileParam::new("access_token", ParamValue::AccessToken),
		],
		signature: Some(SignatureScheme::Odnoklassniki),
	})
	.profile_map(ProfileFieldMap {
		root: FieldPath::root(),
		id: "uid".into(),
		name: separate("first_name", "last_name"),
		email: None,
	})
	.build()
}

fn vkontakte() -> Result<ProviderDescriptor, ProviderDescriptorError> {
	builder(
		ProviderKind::VKontakte,
		"http://oauth.vk.com/authorize",
		"https://oauth.vk.com/access_token",
		"https://api.vk.com/method/users.get",
	)?
	.quirks(ProviderQuirks { send_grant_type: false, ..ProviderQuirks::default() })
	.subject("user_id")
	.profile_request(ProfileRequest {
		params: vec![
			ProfileParam::new("uids", ParamValue::Subject),
			ProfileParam::literal("fields", "uid,first_name,last_name,photo"),
			ProfileParam::new("access_token", ParamValue::AccessToken),
		],
		signature: None,
	})
	.profile_map(ProfileFieldMap {
		root: "response.0".into(),
		id: "uid".into(),
		name: separate("first_name", "last_name"),
		email: None,
	})
	.build()
}

fn yandex() -> Result<ProviderDescriptor, ProviderDescriptorError> {
	builder(
		ProviderKind::Yandex,
		"https://oauth.yandex.ru/authorize",
		"https://oauth.yandex.ru/token",
		"https://login.yandex.ru/info",
	)?
	.profile_request(ProfileRequest::bearer("oauth_token"))
	.profile_map(ProfileFieldMap {
		root: FieldPath::root(),
		id: "id".into(),
		name: full_name("real_name", "display_name"),
		email: Some("default_email".into()),
	})
	.build()
}
