// self
use crate::obs::{FlowKind, FlowOutcome};

/// Counter incremented once per flow attempt and once per terminal outcome.
pub const FLOW_COUNTER: &str = "nadeo_client_flow_total";
/// Counter incremented once per response cache lookup.
pub const CACHE_COUNTER: &str = "nadeo_client_cache_total";

/// Result of a response cache lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheLookup {
	/// A live entry was returned.
	Hit,
	/// No entry, or an expired one that was evicted.
	Miss,
}
impl CacheLookup {
	/// Returns the `outcome` label used on [`CACHE_COUNTER`].
	pub const fn as_str(self) -> &'static str {
		match self {
			CacheLookup::Hit => "hit",
			CacheLookup::Miss => "miss",
		}
	}
}
impl From<bool> for CacheLookup {
	fn from(hit: bool) -> Self {
		if hit { Self::Hit } else { Self::Miss }
	}
}

/// Increments [`FLOW_COUNTER`] labeled by `flow` and `outcome`.
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(FLOW_COUNTER, "flow" => kind.as_str(), "outcome" => outcome.as_str())
		.increment(1);

	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome);
}

/// Increments [`CACHE_COUNTER`] labeled by `outcome`.
pub fn record_cache_lookup(lookup: CacheLookup) {
	#[cfg(feature = "metrics")]
	metrics::counter!(CACHE_COUNTER, "outcome" => lookup.as_str()).increment(1);

	#[cfg(not(feature = "metrics"))]
	let _ = lookup;
}
