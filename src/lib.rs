//! OAuth 2.0 authorization-code logins for seven social identity providers, driven by one
//! provider-agnostic client and a small data-only descriptor per provider.
//!
//! The three login steps are [`flows::OAuth2Client::build_login_url`],
//! [`flows::OAuth2Client::exchange_code`], and [`flows::OAuth2Client::fetch_profile`].
//! Provider dialects (token request encoding, signed profile calls, profile envelopes) live in
//! [`provider::ProviderDescriptor`] values built by [`provider::ProviderKind`].

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod flows;
pub mod http;
pub mod obs;
pub mod provider;
pub mod query;
pub mod signature;
pub mod transport;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _, tokio as _};
