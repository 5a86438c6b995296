//! Optional observability helpers for login steps.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth2_social.step` with the `provider` and
//!   `step` fields; `outcome` and `error` (the [`Error::kind`] label) are filled in when the step
//!   ends, and failures log a `warn` event.
//! - Enable `metrics` to increment the `oauth2_social_step_total` counter for every
//!   attempt/success/failure, labeled by `step` + `outcome`, and
//!   `oauth2_social_step_failure_total`, labeled by `step`, `provider`, and `error`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Login steps observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoginStep {
	/// Login URL construction.
	Login,
	/// Authorization code exchange.
	Exchange,
	/// Profile retrieval.
	Profile,
}
impl LoginStep {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			LoginStep::Login => "login",
			LoginStep::Exchange => "exchange",
			LoginStep::Profile => "profile",
		}
	}
}
impl Display for LoginStep {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepOutcome {
	/// Entry to a login step.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl StepOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StepOutcome::Attempt => "attempt",
			StepOutcome::Success => "success",
			StepOutcome::Failure => "failure",
		}
	}
}
impl Display for StepOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
