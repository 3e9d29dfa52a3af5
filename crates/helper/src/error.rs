/// Fatal conditions raised by the helper.
///
/// Everything else the helper can complain about (duplicate registration,
/// optional lookups that find nothing, vacant slots) is logged and degraded,
/// never returned as an error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HelperError {
	/// A required lookup found no registration at all — the application
	/// cannot proceed in this configuration.
	#[error("required component missing: {key:?}")]
	RequiredMissing {
		/// The registry key that failed to resolve.
		key: Box<str>,
	},
}
