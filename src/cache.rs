//! Short-lived response cache keyed by request target.
//!
//! Entries expire a fixed TTL after insertion. Expired entries are evicted lazily on read and
//! proactively by a sweep thread that wakes on a fixed interval. The sweep thread holds only a
//! weak reference to the entries and exits as soon as the last cache handle is dropped.

// std
use std::{
	sync::{
		Weak,
		mpsc::{self, RecvTimeoutError, Sender},
	},
	thread,
};
// self
use crate::{_prelude::*, error::ConfigError, obs};

type EntryMap = HashMap<String, CacheEntry>;

#[derive(Clone, Debug)]
struct CacheEntry {
	body: String,
	expires_at: OffsetDateTime,
}

#[derive(Debug)]
struct CacheShared {
	entries: Mutex<EntryMap>,
	// Dropping the sender disconnects the sweep thread.
	_shutdown: Sender<()>,
}
impl CacheShared {
	fn purge_expired_at(&self, now: OffsetDateTime) -> usize {
		let mut entries = self.entries.lock();
		let before = entries.len();

		entries.retain(|_, entry| entry.expires_at > now);

		before - entries.len()
	}
}

/// Thread-safe response cache shared by every clone of a session.
#[derive(Clone, Debug)]
pub struct ResponseCache {
	shared: Arc<CacheShared>,
	ttl: Duration,
}
impl ResponseCache {
	/// Default time-to-live applied to inserted entries.
	pub const DEFAULT_TTL: Duration = Duration::minutes(1);
	/// Default interval between proactive sweeps.
	pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::minutes(5);

	/// Creates a cache and spawns its sweep thread.
	pub fn new(ttl: Duration, sweep_interval: Duration) -> Result<Self, ConfigError> {
		let (shutdown, signal) = mpsc::channel::<()>();
		let shared = Arc::new(CacheShared { entries: Mutex::default(), _shutdown: shutdown });
		let weak = Arc::downgrade(&shared);
		let interval = if sweep_interval.is_positive() {
			sweep_interval.unsigned_abs()
		} else {
			Self::DEFAULT_SWEEP_INTERVAL.unsigned_abs()
		};

		thread::Builder::new()
			.name("nadeo-cache-sweep".into())
			.spawn(move || sweep_loop(weak, signal, interval))
			.map_err(ConfigError::SweeperSpawn)?;

		Ok(Self { shared, ttl })
	}

	/// Time-to-live applied to inserted entries.
	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Returns the cached body for `key` if it has not expired.
	pub fn get(&self, key: &str) -> Option<String> {
		self.get_at(key, OffsetDateTime::now_utc())
	}

	/// Returns the cached body for `key` if it has not expired at `now`, evicting it otherwise.
	pub fn get_at(&self, key: &str, now: OffsetDateTime) -> Option<String> {
		let mut entries = self.shared.entries.lock();
		let hit = match entries.get(key) {
			Some(entry) if entry.expires_at > now => Some(entry.body.clone()),
			Some(_) => {
				entries.remove(key);

				None
			},
			None => None,
		};

		obs::record_cache_lookup(hit.is_some().into());

		hit
	}

	/// Stores `body` under `key` with the default TTL.
	pub fn insert(&self, key: impl Into<String>, body: impl Into<String>) {
		self.insert_at(key, body, OffsetDateTime::now_utc());
	}

	/// Stores `body` under `key`, expiring one TTL after `now`.
	pub fn insert_at(&self, key: impl Into<String>, body: impl Into<String>, now: OffsetDateTime) {
		let entry = CacheEntry { body: body.into(), expires_at: now + self.ttl };

		self.shared.entries.lock().insert(key.into(), entry);
	}

	/// Drops the entry stored under `key`.
	pub fn remove(&self, key: &str) -> Option<String> {
		self.shared.entries.lock().remove(key).map(|entry| entry.body)
	}

	/// Drops every entry.
	pub fn clear(&self) {
		self.shared.entries.lock().clear();
	}

	/// Number of stored entries, including expired ones not yet evicted.
	pub fn len(&self) -> usize {
		self.shared.entries.lock().len()
	}

	/// Returns `true` when no entries are stored.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Evicts entries that have expired at `now`, returning how many were removed.
	pub fn purge_expired_at(&self, now: OffsetDateTime) -> usize {
		self.shared.purge_expired_at(now)
	}
}

fn sweep_loop(cache: Weak<CacheShared>, signal: mpsc::Receiver<()>, interval: std::time::Duration) {
	loop {
		match signal.recv_timeout(interval) {
			Err(RecvTimeoutError::Timeout) => {
				let Some(shared) = cache.upgrade() else { return };

				shared.purge_expired_at(OffsetDateTime::now_utc());
			},
			Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
		}
	}
}
