//! MD5 request signing used by Mail.Ru and Odnoklassniki profile calls.
//!
//! Both schemes concatenate `key=value` for every parameter in lexicographic key order, with no
//! separators, and hash the result together with secret material. Ordering by key is what makes
//! the signature independent of the order parameters were added in; providers reject anything
//! hashed in insertion order.

// crates.io
use md5::{Digest, Md5};
// self
use crate::_prelude::*;

/// Query parameter that carries the signature.
pub const SIGNATURE_PARAM: &str = "sig";

/// Parameter set to be signed, kept sorted by key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignatureContext {
	params: BTreeMap<String, String>,
}
impl SignatureContext {
	/// Collects parameters; later duplicates of a key replace earlier ones.
	pub fn new<I, K, V>(params: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self { params: params.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
	}

	/// Adds or replaces a parameter.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.params.insert(key.into(), value.into());
	}

	/// Drops a parameter from the signed set.
	pub fn remove(&mut self, key: &str) {
		self.params.remove(key);
	}

	/// `k1=v1k2=v2...` in key order, excluding the signature parameter itself.
	pub fn concat(&self) -> String {
		self.params
			.iter()
			.filter(|(key, _)| key.as_str() != SIGNATURE_PARAM)
			.map(|(key, value)| format!("{key}={value}"))
			.collect()
	}
}

/// Signature algorithms a descriptor can request for its profile call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureScheme {
	/// `md5(params + oauth_token=<token> + app_secret)`.
	MailRu,
	/// `md5(params without access_token + md5(access_token + app_secret))`.
	Odnoklassniki,
}
impl SignatureScheme {
	/// Computes the signature for the final outgoing parameter set.
	///
	/// `params` is the request's parameter list as it will be sent (the `sig` entry, if any, is
	/// ignored). Mail.Ru additionally hashes a synthetic `oauth_token` entry that is never sent;
	/// Odnoklassniki leaves `access_token` out of the concatenation and folds it into the
	/// nested digest instead.
	pub fn sign(self, params: &[(String, String)], access_token: &str, app_secret: &str) -> String {
		let mut ctx = SignatureContext::new(params.iter().cloned());

		match self {
			SignatureScheme::MailRu => {
				ctx.insert("oauth_token", access_token);

				mailru_signature(&ctx, app_secret)
			},
			SignatureScheme::Odnoklassniki => {
				ctx.remove("access_token");

				odnoklassniki_signature(&ctx, access_token, app_secret)
			},
		}
	}

	/// Parameters sent with the request but kept out of the signed string.
	///
	/// They are placed after the signature in the outgoing query.
	pub const fn unsigned_params(self) -> &'static [&'static str] {
		match self {
			SignatureScheme::MailRu => &[],
			SignatureScheme::Odnoklassniki => &["access_token"],
		}
	}

	/// Returns a stable label for logs.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignatureScheme::MailRu => "mail_ru",
			SignatureScheme::Odnoklassniki => "odnoklassniki",
		}
	}
}
impl Display for SignatureScheme {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Lower-case hex MD5 of the UTF-8 bytes of `input`.
pub fn md5_hex(input: &str) -> String {
	hex::encode(Md5::digest(input.as_bytes()))
}

/// `md5(concat_sorted(params) + secret)`.
pub fn mailru_signature(ctx: &SignatureContext, app_secret: &str) -> String {
	let mut material = ctx.concat();

	material.push_str(app_secret);

	md5_hex(&material)
}

/// `md5(concat_sorted(params) + md5(access_token + secret))`.
pub fn odnoklassniki_signature(
	ctx: &SignatureContext,
	access_token: &str,
	app_secret: &str,
) -> String {
	let mut material = ctx.concat();

	material.push_str(&md5_hex(&format!("{access_token}{app_secret}")));

	md5_hex(&material)
}
