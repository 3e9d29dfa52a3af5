//! Instance registry: named component lookup with required/optional
//! semantics.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::capability::{Component, MountPoint};
use crate::error::HelperError;

/// Shared handle to a registered component.
pub type SharedComponent = Arc<dyn Component>;

/// Occupancy state of a registry key.
///
/// `Vacant` distinguishes "registered but not yet constructed" from a key
/// that was never registered at all.
#[derive(Clone)]
enum Slot {
	Vacant,
	Ready(SharedComponent),
}

enum Lookup {
	Ready(SharedComponent),
	Vacant,
	Absent,
}

/// Mapping from string key to component handle.
///
/// Registration never fails the caller: a duplicate key is a logged anomaly,
/// and the prior reference is discarded (last write wins). Callers are
/// expected to register during the single-threaded startup phase, before
/// event-driven usage begins.
#[derive(Default)]
pub struct ComponentRegistry {
	slots: RwLock<FxHashMap<Box<str>, Slot>>,
}

impl ComponentRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `instance` under `key`, reporting an error when the key
	/// already holds a live component.
	pub fn register(&self, key: &str, instance: SharedComponent) {
		self.register_with(key, instance, false);
	}

	/// Stores `instance` under `key`. With `overwrite` set, replacing a live
	/// component is expected and not reported.
	pub fn register_with(&self, key: &str, instance: SharedComponent, overwrite: bool) {
		let prior = self.slots.write().insert(key.into(), Slot::Ready(instance));
		match prior {
			Some(Slot::Ready(_)) if !overwrite => {
				tracing::error!(key, "component registered twice without overwrite; replacing");
				tracing::debug!(key, "component replaced");
			}
			Some(Slot::Ready(_)) => tracing::debug!(key, "component replaced"),
			Some(Slot::Vacant) => tracing::debug!(key, "vacant slot filled"),
			None => tracing::debug!(key, "component registered"),
		}
	}

	/// Marks `key` as registered but not yet constructed.
	pub fn reserve(&self, key: &str) {
		self.slots.write().insert(key.into(), Slot::Vacant);
		tracing::debug!(key, "slot reserved");
	}

	/// Optional lookup: absent and vacant keys collapse to `None`.
	///
	/// An absent key is still reported as an error (it usually means a
	/// module forgot to register itself); a vacant key only warns.
	pub fn get(&self, key: &str) -> Option<SharedComponent> {
		match self.lookup(key) {
			Lookup::Ready(component) => Some(component),
			Lookup::Vacant | Lookup::Absent => None,
		}
	}

	/// Required lookup: an absent key is fatal to the calling operation and
	/// must be propagated, not swallowed.
	///
	/// A vacant key still resolves to `Ok(None)` — the component exists but
	/// has not been constructed yet.
	pub fn get_required(&self, key: &str) -> Result<Option<SharedComponent>, HelperError> {
		match self.lookup(key) {
			Lookup::Ready(component) => Ok(Some(component)),
			Lookup::Vacant => Ok(None),
			Lookup::Absent => Err(HelperError::RequiredMissing { key: key.into() }),
		}
	}

	/// Silent probe for optional capabilities: no logging, absence is an
	/// expected outcome here.
	pub fn peek(&self, key: &str) -> Option<SharedComponent> {
		match self.slots.read().get(key) {
			Some(Slot::Ready(component)) => Some(component.clone()),
			_ => None,
		}
	}

	/// True when `key` currently resolves to a live component.
	pub fn contains(&self, key: &str) -> bool {
		matches!(self.slots.read().get(key), Some(Slot::Ready(_)))
	}

	/// Resolves `key` optionally and hands `mount` to the component's
	/// decorate contract. Returns the resolved handle for chaining.
	pub fn decorate(
		&self,
		key: &str,
		mount: &dyn MountPoint,
		prefix: &str,
	) -> Option<SharedComponent> {
		let component = self.get(key)?;
		component.decorate(mount, prefix);
		Some(component)
	}

	/// [`Self::decorate`] with required-lookup semantics.
	pub fn decorate_required(
		&self,
		key: &str,
		mount: &dyn MountPoint,
		prefix: &str,
	) -> Result<Option<SharedComponent>, HelperError> {
		let resolved = self.get_required(key)?;
		if let Some(component) = &resolved {
			component.decorate(mount, prefix);
		}
		Ok(resolved)
	}

	fn lookup(&self, key: &str) -> Lookup {
		match self.slots.read().get(key) {
			Some(Slot::Ready(component)) => Lookup::Ready(component.clone()),
			Some(Slot::Vacant) => {
				tracing::warn!(key, "component registered but not yet constructed");
				Lookup::Vacant
			}
			None => {
				tracing::error!(key, "component was never registered");
				Lookup::Absent
			}
		}
	}
}
