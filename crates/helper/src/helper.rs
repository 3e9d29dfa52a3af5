//! The `Helper` context object.
//!
//! One `Helper` is constructed per application session and passed by
//! reference to every module at startup; it is the only way modules reach
//! each other. There are no hidden globals: tear the object down and the
//! session's wiring is gone.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::bus::{EventBus, ListenerKey};
use crate::capability::{
	AccountProvider, DialogProvider, FileAssociation, FileState, HostManifest, LanguageProvider,
	MessageSink, MountPoint, ToggleProvider, keys,
};
use crate::config::HelperConfig;
use crate::error::HelperError;
use crate::features::{FeatureDetector, FeatureFlags, FlagGroup, FlagValue};
use crate::registry::{ComponentRegistry, SharedComponent};

struct Prefixes {
	general: String,
	style: String,
}

/// Runtime component registry wiring the editor shell together.
///
/// Composes the instance registry, the event bus, the feature-flag store and
/// the prefix state, plus the derived accessors built on top of them. All
/// registration is expected during the single-threaded startup phase.
pub struct Helper {
	components: ComponentRegistry,
	events: EventBus,
	features: FeatureFlags,
	prefixes: RwLock<Prefixes>,
	detector: Option<Arc<dyn FeatureDetector>>,
	manifest: Option<Arc<dyn HostManifest>>,
}

impl Helper {
	/// Builds a helper from static configuration, with no detector and no
	/// host packaging metadata installed.
	pub fn new(config: HelperConfig) -> Self {
		Self {
			components: ComponentRegistry::new(),
			events: EventBus::new(),
			features: FeatureFlags::new(),
			prefixes: RwLock::new(Prefixes {
				general: config.prefix,
				style: config.style_prefix,
			}),
			detector: None,
			manifest: None,
		}
	}

	/// Installs the feature-detection collaborator.
	pub fn with_detector(mut self, detector: Arc<dyn FeatureDetector>) -> Self {
		self.detector = Some(detector);
		self
	}

	/// Installs the host packaging metadata source.
	pub fn with_manifest(mut self, manifest: Arc<dyn HostManifest>) -> Self {
		self.manifest = Some(manifest);
		self
	}

	/// The instance registry.
	pub fn components(&self) -> &ComponentRegistry {
		&self.components
	}

	/// The process-wide event bus.
	pub fn events(&self) -> &EventBus {
		&self.events
	}

	/// The grouped flag store.
	pub fn features(&self) -> &FeatureFlags {
		&self.features
	}

	// Instance registry surface, forwarded for call-site convenience.

	/// Registers `instance` under `key`; see [`ComponentRegistry::register`].
	pub fn register(&self, key: &str, instance: SharedComponent) {
		self.components.register(key, instance);
	}

	/// Registers with an explicit overwrite flag.
	pub fn register_with(&self, key: &str, instance: SharedComponent, overwrite: bool) {
		self.components.register_with(key, instance, overwrite);
	}

	/// Marks `key` as registered but not yet constructed.
	pub fn reserve(&self, key: &str) {
		self.components.reserve(key);
	}

	/// Optional lookup of `key`.
	pub fn get(&self, key: &str) -> Option<SharedComponent> {
		self.components.get(key)
	}

	/// Required lookup of `key`; absence is fatal to the calling operation.
	pub fn get_required(&self, key: &str) -> Result<Option<SharedComponent>, HelperError> {
		self.components.get_required(key)
	}

	/// Resolves `key` and decorates `mount` with it, namespacing with
	/// `prefix_override` or the current general prefix.
	pub fn decorate(
		&self,
		key: &str,
		mount: &dyn MountPoint,
		prefix_override: Option<&str>,
	) -> Option<SharedComponent> {
		let prefix = self.decoration_prefix(prefix_override);
		self.components.decorate(key, mount, &prefix)
	}

	/// [`Self::decorate`] with required-lookup semantics.
	pub fn decorate_required(
		&self,
		key: &str,
		mount: &dyn MountPoint,
		prefix_override: Option<&str>,
	) -> Result<Option<SharedComponent>, HelperError> {
		let prefix = self.decoration_prefix(prefix_override);
		self.components.decorate_required(key, mount, &prefix)
	}

	fn decoration_prefix(&self, prefix_override: Option<&str>) -> String {
		match prefix_override {
			Some(prefix) => prefix.to_string(),
			None => self.prefix(),
		}
	}

	// Event bus surface.

	/// Dispatches a named event to all current subscribers.
	pub fn dispatch(&self, name: &str, data: serde_json::Value) {
		self.events.dispatch(name, data);
	}

	/// Bulk-releases listener keys; see [`EventBus::release_listeners`].
	pub fn release_listeners(
		&self,
		keys: &[ListenerKey],
		context: Option<&str>,
	) -> Vec<ListenerKey> {
		self.events.release_listeners(keys, context)
	}

	// Feature-flag surface.

	/// Stores a flag in the general group; silent overwrite.
	pub fn set_feature(&self, name: &str, value: impl Into<FlagValue>) {
		self.features.set(name, value);
	}

	/// Stores a flag in `group`.
	pub fn set_feature_in(&self, group: FlagGroup, name: &str, value: impl Into<FlagValue>) {
		self.features.set_in(group, name, value);
	}

	/// General-group flag value, `Bool(false)` when absent.
	pub fn check_feature(&self, name: &str) -> FlagValue {
		self.features.check(name)
	}

	/// Flag value in `group`, `Bool(false)` when absent.
	pub fn check_feature_in(&self, group: FlagGroup, name: &str) -> FlagValue {
		self.features.check_in(group, name)
	}

	/// Truthiness of the general-group flag.
	pub fn feature_enabled(&self, name: &str) -> bool {
		self.features.enabled(name)
	}

	/// Browser/platform capability flag.
	pub fn check_platform_feature(&self, name: &str) -> FlagValue {
		self.features.check_in(FlagGroup::Platform, name)
	}

	/// Host-application capability flag.
	pub fn check_host_feature(&self, name: &str) -> FlagValue {
		self.features.check_in(FlagGroup::Host, name)
	}

	/// Scripting-runtime capability flag.
	pub fn check_scripting_feature(&self, name: &str) -> FlagValue {
		self.features.check_in(FlagGroup::Scripting, name)
	}

	/// Runs a fresh detection pass across all three layers through the
	/// installed detector. Idempotent; without a detector this is a no-op.
	pub fn detect_features(&self) {
		match &self.detector {
			Some(detector) => self.features.detect(detector.as_ref()),
			None => tracing::debug!("no feature detector installed; detection skipped"),
		}
	}

	// Prefix state.

	/// Current general namespace prefix.
	pub fn prefix(&self) -> String {
		self.prefixes.read().general.clone()
	}

	/// `prefix + extra + "-"`: namespaces a sub-scope of generated ids.
	pub fn prefix_for(&self, extra: &str) -> String {
		let mut prefixed = self.prefix();
		prefixed.push_str(extra);
		prefixed.push('-');
		prefixed
	}

	/// Replaces the general prefix. An empty value collapses to the empty
	/// string (no prefixing).
	pub fn set_prefix(&self, prefix: &str) {
		self.prefixes.write().general = prefix.to_string();
	}

	/// Current style/CSS namespace prefix.
	pub fn style_prefix(&self) -> String {
		self.prefixes.read().style.clone()
	}

	/// Replaces the style prefix.
	pub fn set_style_prefix(&self, prefix: &str) {
		self.prefixes.write().style = prefix.to_string();
	}

	// Derived accessors over the host manifest.

	/// Version of the packaged host build.
	///
	/// Without packaging metadata this falls back to the current wall-clock
	/// timestamp rendered as a string: "unversioned build" semantics. The
	/// fallback is unstable across calls and must never be compared or
	/// persisted as a real version.
	pub fn app_version(&self) -> String {
		if let Some(version) = self.manifest.as_ref().and_then(|m| m.version()) {
			return version;
		}
		chrono::Utc::now().timestamp_millis().to_string()
	}

	/// File-extension associations declared by the host package, empty when
	/// unpackaged.
	pub fn file_associations(&self) -> Vec<FileAssociation> {
		self.manifest
			.as_ref()
			.map(|m| m.file_associations())
			.unwrap_or_default()
	}

	// Typed accessors over the well-known keys. Each resolves the key and
	// applies the capability view: `None` when the key is absent, vacant, or
	// the registered component has the wrong shape. The last case warns —
	// it means a module registered under a contract it does not honor.

	/// The file-state provider, when a well-shaped `file` component exists.
	pub fn file_state(&self) -> Option<Arc<dyn FileState>> {
		self.typed(keys::FILE, |c| c.as_file_state())
	}

	/// The dialog provider, when a well-shaped `dialog` component exists.
	pub fn dialog(&self) -> Option<Arc<dyn DialogProvider>> {
		self.typed(keys::DIALOG, |c| c.as_dialog())
	}

	/// The message sink, when a well-shaped `message` component exists.
	pub fn message_sink(&self) -> Option<Arc<dyn MessageSink>> {
		self.typed(keys::MESSAGE, |c| c.as_message_sink())
	}

	/// The debug switch provider.
	pub fn debug_toggles(&self) -> Option<Arc<dyn ToggleProvider>> {
		self.typed(keys::DEBUG, |c| c.as_toggle())
	}

	/// The experimental switch provider.
	pub fn experimental_toggles(&self) -> Option<Arc<dyn ToggleProvider>> {
		self.typed(keys::EXPERIMENTAL, |c| c.as_toggle())
	}

	/// The account module.
	pub fn account(&self) -> Option<Arc<dyn AccountProvider>> {
		self.typed(keys::ACCOUNT, |c| c.as_account())
	}

	/// The localization module.
	pub fn language(&self) -> Option<Arc<dyn LanguageProvider>> {
		self.typed(keys::I18N, |c| c.as_language())
	}

	fn typed<T: ?Sized>(
		&self,
		key: &str,
		view: impl FnOnce(SharedComponent) -> Option<Arc<T>>,
	) -> Option<Arc<T>> {
		let component = self.components.peek(key)?;
		let resolved = view(component);
		if resolved.is_none() {
			tracing::warn!(key, "component lacks the contract expected under this key");
		}
		resolved
	}

	// Null-safe passthroughs to optional well-known components. None of
	// these fail when the module behind them was never installed.

	/// Localized string table from the i18n module, `{}` when absent.
	pub fn localized_data(&self) -> serde_json::Value {
		match self.language() {
			Some(language) => language.language_data(),
			None => serde_json::Value::Object(Default::default()),
		}
	}

	/// True when the debug module reports `name` enabled.
	pub fn debug_enabled(&self, name: &str) -> bool {
		self.debug_toggles().is_some_and(|t| t.is_enabled(name))
	}

	/// True when the experimental module reports `name` enabled.
	pub fn experimental_enabled(&self, name: &str) -> bool {
		self.experimental_toggles().is_some_and(|t| t.is_enabled(name))
	}

	/// True when the account module is present and a user is signed in.
	pub fn account_enabled(&self) -> bool {
		self.account().is_some_and(|a| a.is_authenticated())
	}

	// Message routing. Falls back to log-only output when the messaging
	// module is unpopulated; the reporting path itself never fails.

	/// Shows an error to the user.
	pub fn show_error(&self, text: &str) {
		match self.message_sink() {
			Some(sink) => sink.error(text),
			None => tracing::error!("{text}"),
		}
	}

	/// Shows a warning to the user.
	pub fn show_warning(&self, text: &str) {
		match self.message_sink() {
			Some(sink) => sink.warning(text),
			None => tracing::warn!("{text}"),
		}
	}

	/// Shows an informational message to the user.
	pub fn show_info(&self, text: &str) {
		match self.message_sink() {
			Some(sink) => sink.info(text),
			None => tracing::info!("{text}"),
		}
	}

	/// Shows a success message to the user.
	pub fn show_success(&self, text: &str) {
		match self.message_sink() {
			Some(sink) => sink.success(text),
			None => tracing::info!("{text}"),
		}
	}
}

impl Default for Helper {
	fn default() -> Self {
		Self::new(HelperConfig::default())
	}
}
