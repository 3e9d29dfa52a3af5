//! Runtime component registry for the Atrium editor shell.
//!
//! Independently-constructed UI and protocol modules are wired together
//! through one explicitly-constructed [`Helper`] context object instead of
//! holding direct references to each other. Four responsibilities cooperate
//! inside it:
//!
//! - [`ComponentRegistry`] — named lookup with required/optional semantics
//!   and a decorate convenience handing a mount point to a component
//! - [`EventBus`] — process-wide synchronous publish/subscribe
//! - [`FeatureFlags`] — grouped flags layered over platform, host and
//!   scripting-runtime detection
//! - [`Helper::guard_unsaved_changes`] — the confirmation gate run before
//!   destructive navigation while unsaved changes exist
//!
//! The helper never calls into components beyond the fixed capability
//! contracts in [`capability`]. It performs no dependency ordering, no
//! lifecycle teardown, and keeps no state across process restarts.

pub mod bus;
pub mod capability;
pub mod config;
pub mod error;
pub mod features;
mod guard;
pub mod helper;
pub mod registry;

pub use bus::{Event, EventBus, ListenerKey};
pub use capability::{
	AccountProvider, BoxFutureStatic, Component, DialogProvider, FileAssociation, FileState,
	HostManifest, LanguageProvider, MessageSink, MountPoint, ToggleProvider, keys,
};
pub use config::HelperConfig;
pub use error::HelperError;
pub use features::{FeatureDetector, FeatureFlags, FlagGroup, FlagValue};
pub use helper::Helper;
pub use registry::{ComponentRegistry, SharedComponent};
