//! Normalized user profile and the combined login outcome.

// self
use crate::{_prelude::*, auth::ProviderId};

/// Keys a [`UserProfile`] may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileField {
	/// Provider-scoped user id.
	Id,
	/// Given name.
	FirstName,
	/// Family name.
	LastName,
	/// Primary e-mail address.
	Email,
}
impl ProfileField {
	/// Every field in output order.
	pub const ALL: [ProfileField; 4] =
		[ProfileField::Id, ProfileField::FirstName, ProfileField::LastName, ProfileField::Email];

	/// Returns the mapping key used in [`UserProfile`].
	pub const fn as_str(self) -> &'static str {
		match self {
			ProfileField::Id => "id",
			ProfileField::FirstName => "firstName",
			ProfileField::LastName => "lastName",
			ProfileField::Email => "email",
		}
	}
}
impl Display for ProfileField {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Provider-independent profile: a mapping from `id`/`firstName`/`lastName`/`email` to
/// non-empty strings. Absent values are never represented as empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(BTreeMap<String, String>);
impl UserProfile {
	/// Stores `value` under `field` unless it is missing or empty.
	pub fn insert_if_not_empty(&mut self, field: ProfileField, value: Option<String>) {
		if let Some(value) = value.filter(|v| !v.is_empty()) {
			self.0.insert(field.as_str().to_owned(), value);
		}
	}

	/// Looks up a field.
	pub fn get(&self, field: ProfileField) -> Option<&str> {
		self.0.get(field.as_str()).map(String::as_str)
	}

	/// Provider-scoped user id.
	pub fn id(&self) -> Option<&str> {
		self.get(ProfileField::Id)
	}

	/// Given name.
	pub fn first_name(&self) -> Option<&str> {
		self.get(ProfileField::FirstName)
	}

	/// Family name.
	pub fn last_name(&self) -> Option<&str> {
		self.get(ProfileField::LastName)
	}

	/// Primary e-mail address.
	pub fn email(&self) -> Option<&str> {
		self.get(ProfileField::Email)
	}

	/// Number of populated fields.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when the provider supplied nothing usable.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over populated `(key, value)` pairs in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Human-readable name: `firstName lastName`, whichever parts exist.
	pub fn display_name(&self) -> Option<String> {
		match (self.first_name(), self.last_name()) {
			(Some(first), Some(last)) => Some(format!("{first} {last}")),
			(Some(part), None) | (None, Some(part)) => Some(part.to_owned()),
			(None, None) => None,
		}
	}
}

/// Outcome of a completed login handed back to the hosting application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationResult {
	/// Provider the user authenticated with.
	pub provider: ProviderId,
	/// Provider-scoped user id.
	pub provider_user_id: String,
	/// Display name, falling back to the e-mail address and then the user id.
	pub user_name: String,
	/// Full normalized profile.
	pub extra_data: UserProfile,
}
