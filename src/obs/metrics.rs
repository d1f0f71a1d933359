// self
use crate::obs::FulfillOutcome;

/// Records a fulfillment outcome via the global metrics recorder (when enabled).
pub fn record_fulfill_outcome(outcome: FulfillOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("rest_courier_fulfill_total", "outcome" => outcome.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_fulfill_outcome_noop_without_metrics() {
		record_fulfill_outcome(FulfillOutcome::Failure);
	}
}
