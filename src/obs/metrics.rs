// self
use crate::{
	_prelude::*,
	obs::{LoginStep, StepOutcome},
};

/// Records a step outcome via the global metrics recorder (when enabled).
///
/// Increments `oauth2_social_step_total{step, outcome}`.
pub fn record_step_outcome(step: LoginStep, outcome: StepOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_social_step_total",
			"step" => step.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (step, outcome);
	}
}

/// Records why a step failed.
///
/// Increments `oauth2_social_step_failure_total{step, provider, error}`, where `error` is
/// [`Error::kind`].
pub fn record_step_failure(step: LoginStep, provider: &str, error: &Error) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_social_step_failure_total",
			"step" => step.as_str(),
			"provider" => provider.to_owned(),
			"error" => error.kind()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (step, provider, error);
	}
}

/// Records the terminal outcome of `result`, failures labeled with their kind.
pub fn record_step_result<T>(step: LoginStep, provider: &str, result: &Result<T>) -> StepOutcome {
	match result {
		Ok(_) => {
			record_step_outcome(step, StepOutcome::Success);

			StepOutcome::Success
		},
		Err(err) => {
			record_step_outcome(step, StepOutcome::Failure);
			record_step_failure(step, provider, err);

			StepOutcome::Failure
		},
	}
}
