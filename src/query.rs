//! RFC 3986 query-string encoding.
//!
//! Everything outside the unreserved set (`A-Z a-z 0-9 - . _ ~`) is percent-encoded, which
//! includes the `! * ' ( )` characters that form encoders commonly leave alone. Spaces become
//! `%20`, never `+`. Providers that sign requests compare against this exact encoding.

// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
// self
use crate::_prelude::*;

const RFC3986_RESERVED: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encodes a single key or value.
pub fn escape(value: &str) -> String {
	utf8_percent_encode(value, RFC3986_RESERVED).to_string()
}

/// Encodes pairs into `k1=v1&k2=v2`, preserving the given order.
pub fn encode_pairs<I, K, V>(pairs: I) -> String
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	let mut buf = String::new();

	for (key, value) in pairs {
		if !buf.is_empty() {
			buf.push('&');
		}

		buf.push_str(&escape(key.as_ref()));
		buf.push('=');
		buf.push_str(&escape(value.as_ref()));
	}

	buf
}

/// Appends pairs to the URL's query, keeping any query the URL already carries.
pub fn append_pairs<I, K, V>(url: &mut Url, pairs: I)
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	let encoded = encode_pairs(pairs);

	if encoded.is_empty() {
		return;
	}

	let query = match url.query() {
		Some(existing) if !existing.is_empty() => format!("{existing}&{encoded}"),
		_ => encoded,
	};

	url.set_query(Some(&query));
}

#[cfg(test)]
mod tests {
	// crates.io
	use percent_encoding::percent_decode_str;
	// self
	use super::*;

	fn decode(value: &str) -> String {
		percent_decode_str(value).decode_utf8().expect("Encoded value should be UTF-8.").into_owned()
	}

	#[test]
	fn escapes_sub_delims_left_alone_by_form_encoders() {
		assert_eq!(escape("!*'()"), "%21%2A%27%28%29");
		assert_eq!(escape("a b&c=d?"), "a%20b%26c%3Dd%3F");
		assert_eq!(escape("A-z.0_9~"), "A-z.0_9~");
		assert_eq!(escape("Привет"), "%D0%9F%D1%80%D0%B8%D0%B2%D0%B5%D1%82");
	}

	#[test]
	fn encoded_pairs_decode_back_to_the_input() {
		let key = "we!rd*key'(x)";
		let value = "v&a=l?u e!*'()";
		let encoded = encode_pairs([(key, value)]);
		let (raw_key, raw_value) =
			encoded.split_once('=').expect("Encoded pair should contain one separator.");

		assert!(!raw_value.contains('='));
		assert!(!raw_value.contains('&'));
		assert_eq!(decode(raw_key), key);
		assert_eq!(decode(raw_value), value);
	}

	#[test]
	fn pairs_keep_insertion_order() {
		assert_eq!(encode_pairs([("b", "2"), ("a", "1")]), "b=2&a=1");
		assert_eq!(encode_pairs(Vec::<(&str, &str)>::new()), "");
	}

	#[test]
	fn append_preserves_existing_query() {
		let mut url = Url::parse("https://example.com/auth?display=popup")
			.expect("Fixture URL should parse.");

		append_pairs(&mut url, [("redirect_uri", "https://app.example.com/cb?x=1")]);

		assert_eq!(
			url.as_str(),
			"https://example.com/auth?display=popup&redirect_uri=https%3A%2F%2Fapp.example.com%2Fcb%3Fx%3D1"
		);

		let mut bare = Url::parse("https://example.com/auth").expect("Fixture URL should parse.");

		append_pairs(&mut bare, Vec::<(&str, &str)>::new());

		assert_eq!(bare.query(), None);
	}
}
