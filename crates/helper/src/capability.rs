//! Capability contracts registered components satisfy.
//!
//! Components stored under a well-known key must expose that key's role
//! contract; everything else about a registered value stays opaque to the
//! helper. Role views are reached through [`Component`]'s accessor methods
//! rather than downcasting, so lookups never guess at shapes.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A pinned, boxed future that is required to be Send and 'static.
pub type BoxFutureStatic<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Registry keys with fixed capability contracts.
pub mod keys {
	/// File loader/saver state; must expose [`super::FileState`].
	pub const FILE: &str = "file";
	/// Modal dialog provider; must expose [`super::DialogProvider`].
	pub const DIALOG: &str = "dialog";
	/// User-facing message sink; must expose [`super::MessageSink`].
	pub const MESSAGE: &str = "message";
	/// Debug switch provider; must expose [`super::ToggleProvider`].
	pub const DEBUG: &str = "debug";
	/// Experimental switch provider; must expose [`super::ToggleProvider`].
	pub const EXPERIMENTAL: &str = "experimental";
	/// Account module; must expose [`super::AccountProvider`].
	pub const ACCOUNT: &str = "account";
	/// Localization module; must expose [`super::LanguageProvider`].
	pub const I18N: &str = "i18n";
}

/// A DOM-like mount target handed to components that render.
pub trait MountPoint: Send + Sync {
	/// Identifier of the node the component attaches to.
	fn id(&self) -> &str;
}

/// Base contract every registered component satisfies.
///
/// Role views default to `None`; a component opts into a well-known role by
/// overriding the matching accessor to hand back itself:
///
/// ```ignore
/// impl Component for Loader {
/// 	fn as_file_state(self: Arc<Self>) -> Option<Arc<dyn FileState>> {
/// 		Some(self)
/// 	}
/// }
/// ```
pub trait Component: Send + Sync {
	/// Attaches the component's UI to `mount`, namespacing generated ids and
	/// classes with `prefix`.
	///
	/// Components without a rendered surface keep the default no-op.
	fn decorate(&self, mount: &dyn MountPoint, prefix: &str) {
		let _ = (mount, prefix);
	}

	/// View of this component as the file-state provider.
	fn as_file_state(self: Arc<Self>) -> Option<Arc<dyn FileState>> {
		None
	}

	/// View of this component as the dialog provider.
	fn as_dialog(self: Arc<Self>) -> Option<Arc<dyn DialogProvider>> {
		None
	}

	/// View of this component as the message sink.
	fn as_message_sink(self: Arc<Self>) -> Option<Arc<dyn MessageSink>> {
		None
	}

	/// View of this component as a named-switch provider.
	fn as_toggle(self: Arc<Self>) -> Option<Arc<dyn ToggleProvider>> {
		None
	}

	/// View of this component as the account module.
	fn as_account(self: Arc<Self>) -> Option<Arc<dyn AccountProvider>> {
		None
	}

	/// View of this component as the localization module.
	fn as_language(self: Arc<Self>) -> Option<Arc<dyn LanguageProvider>> {
		None
	}
}

/// State of the currently-open file, provided by the loader/saver module.
pub trait FileState: Send + Sync {
	/// Display name of the open file.
	fn file_title(&self) -> String;

	/// True when the open file has unsaved changes.
	fn is_modified(&self) -> bool;
}

/// Modal yes/no confirmation, provided by the dialog module.
pub trait DialogProvider: Send + Sync {
	/// Asks the user a yes/no question; the future resolves when they answer.
	///
	/// The future may never resolve (the dialog can sit unanswered for the
	/// rest of the session); callers must not block on it.
	fn show_yes_no(&self, title: &str, body: &str) -> BoxFutureStatic<bool>;
}

/// User-visible message output, provided by the messaging module.
pub trait MessageSink: Send + Sync {
	fn error(&self, text: &str);
	fn warning(&self, text: &str);
	fn info(&self, text: &str);
	fn success(&self, text: &str);
}

/// Named on/off switches (the `debug` and `experimental` modules).
pub trait ToggleProvider: Send + Sync {
	/// True when the switch `name` is enabled.
	fn is_enabled(&self, name: &str) -> bool;
}

/// Account/session state, provided by the account module.
pub trait AccountProvider: Send + Sync {
	/// True when a user is signed in.
	fn is_authenticated(&self) -> bool;
}

/// Localized UI strings, provided by the i18n module.
pub trait LanguageProvider: Send + Sync {
	/// String table for the active language.
	fn language_data(&self) -> serde_json::Value;
}

/// Read-only host packaging metadata.
///
/// Absent or partial metadata must degrade gracefully; see
/// [`crate::Helper::app_version`].
pub trait HostManifest: Send + Sync {
	/// Version string of the packaged build, when one exists.
	fn version(&self) -> Option<String>;

	/// File-extension associations declared by the package.
	fn file_associations(&self) -> Vec<FileAssociation> {
		Vec::new()
	}
}

/// A file-extension association from the host package manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAssociation {
	/// Extension without the leading dot.
	pub extension: String,
	/// Human-readable description shown by the host shell.
	pub description: String,
}
