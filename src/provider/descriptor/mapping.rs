// self
use crate::{
	_prelude::*,
	auth::{ProfileField, UserProfile},
	error::ProfileFetchError,
	extract::{self, FieldPath},
};

/// How `firstName` and `lastName` are derived.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NameSource {
	/// Provider supplies separate fields.
	Separate {
		/// Given name path.
		first: FieldPath,
		/// Family name path.
		last: FieldPath,
	},
	/// Provider supplies a single display name that is split on whitespace.
	FullName {
		/// Full name path.
		path: FieldPath,
		/// Handle used as `firstName` when the full name is missing or blank.
		#[serde(default)]
		fallback: Option<FieldPath>,
	},
}

/// Mapping from a provider's profile envelope to [`UserProfile`].
///
/// Field paths are relative to `root`, which must resolve to a JSON object holding a non-empty
/// `id`; every other field is optional.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFieldMap {
	/// Envelope holding the user object (`response.user`, `data`, `0`, ...).
	#[serde(default = "FieldPath::root")]
	pub root: FieldPath,
	/// User id path.
	pub id: FieldPath,
	/// Name derivation.
	pub name: NameSource,
	/// E-mail path, for providers that expose one.
	#[serde(default)]
	pub email: Option<FieldPath>,
}
impl ProfileFieldMap {
	/// Normalizes a parsed profile document.
	pub fn extract(&self, document: &Value) -> Result<UserProfile, ProfileFetchError> {
		let user = self
			.root
			.resolve(document)
			.filter(|node| node.is_object())
			.ok_or_else(|| ProfileFetchError::MissingField { path: self.root.to_string() })?;
		let id = extract::extract_string(user, &self.id)
			.ok_or_else(|| ProfileFetchError::MissingField { path: self.id_path() })?;
		let (first, last) = match &self.name {
			NameSource::Separate { first, last } =>
				(extract::extract_string(user, first), extract::extract_string(user, last)),
			NameSource::FullName { path, fallback } => split_full_name(
				extract::extract_string(user, path).as_deref(),
				fallback.as_ref().and_then(|fallback| extract::extract_string(user, fallback)),
			),
		};
		let mut profile = UserProfile::default();

		profile.insert_if_not_empty(ProfileField::Id, Some(id));
		profile.insert_if_not_empty(ProfileField::FirstName, first);
		profile.insert_if_not_empty(ProfileField::LastName, last);
		profile.insert_if_not_empty(
			ProfileField::Email,
			self.email.as_ref().and_then(|email| extract::extract_string(user, email)),
		);

		Ok(profile)
	}

	/// Document-relative path of the user id, as reported in errors.
	fn id_path(&self) -> String {
		if self.root.is_root() { self.id.to_string() } else { format!("{}.{}", self.root, self.id) }
	}
}

/// Splits a display name into `(firstName, lastName)`.
///
/// The first token is the given name and the last token the family name, the latter only when
/// there is more than one token. A missing or blank name yields the fallback as given name.
pub fn split_full_name(
	name: Option<&str>,
	fallback: Option<String>,
) -> (Option<String>, Option<String>) {
	let tokens = name.map(|name| name.split_whitespace().collect::<Vec<_>>()).unwrap_or_default();

	match tokens.as_slice() {
		[] => (fallback, None),
		[only] => (Some((*only).to_owned()), None),
		[first, .., last] => (Some((*first).to_owned()), Some((*last).to_owned())),
	}
}
