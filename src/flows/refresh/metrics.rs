// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Something that happened while keeping a session's tokens fresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefreshEvent {
	/// A refresh exchange was sent to the service.
	Attempt,
	/// An exchange installed a new token pair.
	Success,
	/// An exchange failed; the previous pair stayed installed.
	Failure,
	/// A due check found the deadline already pushed back by a concurrent refresh.
	Coalesced,
}
impl RefreshEvent {
	const fn slot(self) -> usize {
		match self {
			RefreshEvent::Attempt => 0,
			RefreshEvent::Success => 1,
			RefreshEvent::Failure => 2,
			RefreshEvent::Coalesced => 3,
		}
	}
}

/// Point-in-time copy of the refresh counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshSnapshot {
	/// Exchanges sent.
	pub attempts: u64,
	/// Exchanges that installed a new pair.
	pub successes: u64,
	/// Exchanges that failed.
	pub failures: u64,
	/// Due checks satisfied by another caller's refresh.
	pub coalesced: u64,
}

/// Refresh counters shared by every clone of a session.
#[derive(Debug, Default)]
pub struct RefreshMetrics([AtomicU64; 4]);
impl RefreshMetrics {
	/// Reads every counter.
	pub fn snapshot(&self) -> RefreshSnapshot {
		RefreshSnapshot {
			attempts: self.count(RefreshEvent::Attempt),
			successes: self.count(RefreshEvent::Success),
			failures: self.count(RefreshEvent::Failure),
			coalesced: self.count(RefreshEvent::Coalesced),
		}
	}

	/// Number of times `event` has been recorded.
	pub fn count(&self, event: RefreshEvent) -> u64 {
		self.0[event.slot()].load(Ordering::Relaxed)
	}

	/// Refresh exchanges sent to the service.
	pub fn attempts(&self) -> u64 {
		self.count(RefreshEvent::Attempt)
	}

	/// Refresh exchanges that installed a new token pair.
	pub fn successes(&self) -> u64 {
		self.count(RefreshEvent::Success)
	}

	/// Refresh exchanges that failed.
	pub fn failures(&self) -> u64 {
		self.count(RefreshEvent::Failure)
	}

	/// Due checks satisfied by a refresh another caller had just finished.
	pub fn coalesced(&self) -> u64 {
		self.count(RefreshEvent::Coalesced)
	}

	pub(crate) fn record(&self, event: RefreshEvent) {
		self.0[event.slot()].fetch_add(1, Ordering::Relaxed);
	}
}
