//! Layered feature-flag store.
//!
//! Flags live in four groups: the general namespace plus one group per
//! detection layer (platform, host application, scripting runtime). Each
//! layer is probed by an external [`FeatureDetector`] and cached here;
//! lookups afterwards are plain value reads with no re-detection.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// The value of a feature flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
	/// Boolean switch.
	Bool(bool),
	/// String capability descriptor (for example a backend name).
	Str(String),
}

impl FlagValue {
	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			FlagValue::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string value if this is a `Str` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			FlagValue::Str(v) => Some(v),
			_ => None,
		}
	}

	/// Loose truthiness: `Bool` is itself, `Str` is true when non-empty.
	pub fn is_truthy(&self) -> bool {
		match self {
			FlagValue::Bool(v) => *v,
			FlagValue::Str(v) => !v.is_empty(),
		}
	}
}

impl From<bool> for FlagValue {
	fn from(v: bool) -> Self {
		FlagValue::Bool(v)
	}
}

impl From<String> for FlagValue {
	fn from(v: String) -> Self {
		FlagValue::Str(v)
	}
}

impl From<&str> for FlagValue {
	fn from(v: &str) -> Self {
		FlagValue::Str(v.to_string())
	}
}

/// Detection layer (or the general namespace) a flag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlagGroup {
	/// Default namespace for application-set flags.
	#[default]
	General,
	/// Browser/platform capabilities.
	Platform,
	/// Host-application capabilities.
	Host,
	/// Scripting-runtime capabilities.
	Scripting,
}

impl FlagGroup {
	/// The three detected layers, in detection order.
	pub const DETECTED: [FlagGroup; 3] = [FlagGroup::Platform, FlagGroup::Host, FlagGroup::Scripting];
}

/// Collaborator probing the environment for capability flags.
///
/// Probing runs outside the store; the store only caches what a pass found.
pub trait FeatureDetector: Send + Sync {
	/// Probes one detection layer, returning the flags it found.
	fn detect(&self, layer: FlagGroup) -> Vec<(String, FlagValue)>;
}

/// Grouped boolean/string flag store.
///
/// Overwrites are silent in every group — detection refines flags over time
/// and the last write wins.
#[derive(Default)]
pub struct FeatureFlags {
	flags: RwLock<FxHashMap<(FlagGroup, Box<str>), FlagValue>>,
}

impl FeatureFlags {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores a flag in the general group.
	pub fn set(&self, name: &str, value: impl Into<FlagValue>) {
		self.set_in(FlagGroup::General, name, value);
	}

	/// Stores a flag in `group`.
	pub fn set_in(&self, group: FlagGroup, name: &str, value: impl Into<FlagValue>) {
		self.flags.write().insert((group, name.into()), value.into());
	}

	/// Stored value of the general-group flag, or `Bool(false)` when absent.
	/// Absence is never an error here, only a default-off policy.
	pub fn check(&self, name: &str) -> FlagValue {
		self.check_in(FlagGroup::General, name)
	}

	/// Stored value of the flag in `group`, or `Bool(false)` when absent.
	pub fn check_in(&self, group: FlagGroup, name: &str) -> FlagValue {
		self.flags
			.read()
			.get(&(group, Box::from(name)))
			.cloned()
			.unwrap_or(FlagValue::Bool(false))
	}

	/// Truthiness of the general-group flag.
	pub fn enabled(&self, name: &str) -> bool {
		self.check(name).is_truthy()
	}

	/// Repopulates the three detection layers from `detector`.
	///
	/// Safe to call repeatedly; each flag is last-write-wins.
	pub fn detect(&self, detector: &dyn FeatureDetector) {
		for layer in FlagGroup::DETECTED {
			let found = detector.detect(layer);
			tracing::debug!(?layer, count = found.len(), "feature detection pass");
			let mut flags = self.flags.write();
			for (name, value) in found {
				flags.insert((layer, name.into_boxed_str()), value);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct StaticDetector {
		webgl: bool,
	}

	impl FeatureDetector for StaticDetector {
		fn detect(&self, layer: FlagGroup) -> Vec<(String, FlagValue)> {
			match layer {
				FlagGroup::Platform => vec![
					("webgl".to_string(), FlagValue::Bool(self.webgl)),
					("audio-backend".to_string(), FlagValue::Str("webaudio".to_string())),
				],
				FlagGroup::Host => vec![("serial-port".to_string(), FlagValue::Bool(true))],
				FlagGroup::Scripting => vec![("await".to_string(), FlagValue::Bool(true))],
				FlagGroup::General => Vec::new(),
			}
		}
	}

	/// Missing flags default to off; set-then-check round-trips the value.
	#[test]
	fn test_default_off() {
		let flags = FeatureFlags::new();
		assert_eq!(flags.check("missing-flag"), FlagValue::Bool(false));
		assert!(!flags.enabled("missing-flag"));

		flags.set("f", true);
		assert_eq!(flags.check("f"), FlagValue::Bool(true));
		assert!(flags.enabled("f"));
	}

	/// Overwrites are silent; the same name is independent across groups.
	#[test]
	fn test_overwrite_and_grouping() {
		let flags = FeatureFlags::new();
		flags.set("mode", "simple");
		flags.set("mode", "advanced");
		assert_eq!(flags.check("mode").as_str(), Some("advanced"));

		flags.set_in(FlagGroup::Host, "mode", true);
		assert_eq!(flags.check("mode").as_str(), Some("advanced"));
		assert_eq!(flags.check_in(FlagGroup::Host, "mode"), FlagValue::Bool(true));
	}

	/// String flags are truthy when non-empty.
	#[test]
	fn test_string_truthiness() {
		let flags = FeatureFlags::new();
		flags.set("backend", "webaudio");
		assert!(flags.enabled("backend"));
		flags.set("backend", "");
		assert!(!flags.enabled("backend"));
	}

	/// Detection populates all three layers; a repeated pass is last write
	/// wins.
	#[test]
	fn test_detection_layers() {
		let flags = FeatureFlags::new();
		flags.detect(&StaticDetector { webgl: true });

		assert_eq!(flags.check_in(FlagGroup::Platform, "webgl"), FlagValue::Bool(true));
		assert_eq!(
			flags.check_in(FlagGroup::Platform, "audio-backend").as_str(),
			Some("webaudio")
		);
		assert_eq!(flags.check_in(FlagGroup::Host, "serial-port"), FlagValue::Bool(true));
		assert_eq!(flags.check_in(FlagGroup::Scripting, "await"), FlagValue::Bool(true));

		// Detection results never leak into the general namespace.
		assert_eq!(flags.check("webgl"), FlagValue::Bool(false));

		flags.detect(&StaticDetector { webgl: false });
		assert_eq!(flags.check_in(FlagGroup::Platform, "webgl"), FlagValue::Bool(false));
	}
}
