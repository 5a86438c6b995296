// self
use crate::_prelude::*;

/// Provider-specific quirks that influence how the code exchange is sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderQuirks {
	/// Sends `Accept: application/json` with the token request; GitHub answers form-encoded
	/// otherwise.
	pub accept_json: bool,
	/// Sends `grant_type=authorization_code`; GitHub and VKontakte do not expect it.
	pub send_grant_type: bool,
}
impl Default for ProviderQuirks {
	fn default() -> Self {
		Self { accept_json: false, send_grant_type: true }
	}
}
