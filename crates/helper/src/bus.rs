//! Process-wide publish/subscribe event bus.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Handle identifying one subscription.
///
/// Ownership of listener keys belongs to the subscriber, who presents them
/// back for bulk release via [`EventBus::release_listeners`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerKey(u64);

/// Event delivered to subscribers: the dispatch name plus its payload.
#[derive(Debug, Clone)]
pub struct Event {
	pub name: Box<str>,
	pub data: serde_json::Value,
}

type Listener = Arc<dyn Fn(&Event) + Send + Sync>;

/// Synchronous fan-out bus for named events.
///
/// No queuing, no priority, no cancellation: [`EventBus::dispatch`] notifies
/// every current subscriber of the name before returning. Fan-out operates
/// on a snapshot of the subscriber list taken at dispatch time, so listeners
/// may subscribe or dispatch reentrantly.
#[derive(Default)]
pub struct EventBus {
	next_key: AtomicU64,
	channels: RwLock<FxHashMap<Box<str>, Vec<(ListenerKey, Listener)>>>,
}

impl EventBus {
	pub fn new() -> Self {
		Self::default()
	}

	/// Subscribes `listener` to events dispatched under `name`.
	pub fn subscribe(
		&self,
		name: &str,
		listener: impl Fn(&Event) + Send + Sync + 'static,
	) -> ListenerKey {
		let key = ListenerKey(self.next_key.fetch_add(1, Ordering::Relaxed));
		self.channels
			.write()
			.entry(name.into())
			.or_default()
			.push((key, Arc::new(listener)));
		key
	}

	/// Removes one subscription. Returns whether the key was live; unknown
	/// keys are a no-op.
	pub fn unsubscribe(&self, key: ListenerKey) -> bool {
		let mut channels = self.channels.write();
		for listeners in channels.values_mut() {
			if let Some(pos) = listeners.iter().position(|(k, _)| *k == key) {
				listeners.remove(pos);
				return true;
			}
		}
		false
	}

	/// Synchronously notifies all current subscribers of `name` with
	/// `Event { name, data }`.
	pub fn dispatch(&self, name: &str, data: serde_json::Value) {
		let snapshot: Vec<Listener> = {
			let channels = self.channels.read();
			match channels.get(name) {
				Some(listeners) => listeners.iter().map(|(_, l)| l.clone()).collect(),
				None => return,
			}
		};
		let event = Event { name: name.into(), data };
		tracing::debug!(name, listeners = snapshot.len(), "event dispatched");
		for listener in snapshot {
			listener(&event);
		}
	}

	/// Releases every key in `keys` exactly once and logs the released
	/// count (and `context`, when given).
	///
	/// Always returns the empty vec: call sites reset their listener list to
	/// the return value, so no dangling key is ever reused. Unknown keys are
	/// skipped, which makes a repeated release with the same list a no-op.
	pub fn release_listeners(
		&self,
		keys: &[ListenerKey],
		context: Option<&str>,
	) -> Vec<ListenerKey> {
		let released = keys.iter().filter(|key| self.unsubscribe(**key)).count();
		match context {
			Some(context) => tracing::debug!(released, context, "listeners released"),
			None => tracing::debug!(released, "listeners released"),
		}
		Vec::new()
	}
}
