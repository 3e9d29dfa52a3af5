//! Static construction-time configuration.

use serde::{Deserialize, Serialize};

/// Configuration the helper is constructed from.
///
/// The prefixes namespace generated DOM ids and style classes so multiple
/// editor shells can coexist on one page without collisions. Both can be
/// replaced later through [`crate::Helper::set_prefix`] and
/// [`crate::Helper::set_style_prefix`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelperConfig {
	/// General namespace prefix applied to generated ids.
	pub prefix: String,
	/// Style/CSS namespace prefix applied to generated class names.
	pub style_prefix: String,
}

impl Default for HelperConfig {
	fn default() -> Self {
		Self {
			prefix: "atrium-".to_string(),
			style_prefix: "atrium-".to_string(),
		}
	}
}
