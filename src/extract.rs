//! Defensive string extraction from provider JSON documents.
//!
//! A [`FieldPath`] is a dotted path such as `response.user.id`; numeric segments index arrays
//! (`response.0.uid`). A missing intermediate, a `null` leaf, an empty string, or a container
//! leaf all resolve to `None`. Numbers and booleans render as their JSON text so numeric ids come
//! back as `"7"`.

// self
use crate::_prelude::*;

/// Parsed dotted path into a JSON document.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FieldPath(Vec<String>);
impl FieldPath {
	/// Parses a dotted path; empty segments are dropped, so `""` addresses the document root.
	pub fn new(path: impl AsRef<str>) -> Self {
		Self(path.as_ref().split('.').filter(|s| !s.is_empty()).map(str::to_owned).collect())
	}

	/// Path addressing the document itself.
	pub fn root() -> Self {
		Self(Vec::new())
	}

	/// Returns true when the path addresses the document itself.
	pub fn is_root(&self) -> bool {
		self.0.is_empty()
	}

	/// Resolves the path, returning the node it points at.
	pub fn resolve<'a>(&self, document: &'a Value) -> Option<&'a Value> {
		self.0.iter().try_fold(document, |node, segment| match node {
			Value::Object(map) => map.get(segment),
			Value::Array(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
			_ => None,
		})
	}
}
impl From<&str> for FieldPath {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
impl From<String> for FieldPath {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}
impl From<FieldPath> for String {
	fn from(value: FieldPath) -> Self {
		value.0.join(".")
	}
}
impl Debug for FieldPath {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "FieldPath({self})")
	}
}
impl Display for FieldPath {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		if self.is_root() { f.write_str("<root>") } else { f.write_str(&self.0.join(".")) }
	}
}

/// Extracts a non-empty scalar at `path`, rendered as a string.
pub fn extract_string(document: &Value, path: &FieldPath) -> Option<String> {
	match path.resolve(document)? {
		Value::String(s) if !s.is_empty() => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		_ => None,
	}
}
