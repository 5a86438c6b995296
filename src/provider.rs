//! Provider-facing descriptors (data) and the built-in provider catalog.
//!
//! `descriptor` exposes validated metadata (`ProviderDescriptor`) covering endpoints, login
//! extras, token request encoding, the profile request shape and its signing scheme, and the
//! field map that normalizes the provider's profile envelope. `catalog` builds descriptors for
//! the seven supported providers. The client never branches on which provider it talks to; every
//! difference lives in these values.

pub mod catalog;
pub mod descriptor;

pub use catalog::*;
pub use descriptor::*;
