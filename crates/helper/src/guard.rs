//! Unsaved-changes confirmation gate.

use std::sync::Arc;

use crate::helper::Helper;

impl Helper {
	/// Defers `continuation` until the user confirms discarding unsaved
	/// changes, when any exist.
	///
	/// With no well-shaped file-state component registered, or an unmodified
	/// file, the continuation runs synchronously before this returns.
	/// Otherwise the dialog round-trip is spawned on the ambient tokio
	/// runtime: an affirmative answer runs the continuation, a negative
	/// answer drops it.
	///
	/// Fire-and-forget: there is no cancellation, no timeout, and no way to
	/// observe the outcome except through the continuation's own effects. A
	/// dialog left unanswered means the continuation never runs. A modified
	/// file with no dialog component fails closed — bypassing the user would
	/// silently discard their work.
	pub fn guard_unsaved_changes(self: &Arc<Self>, continuation: impl FnOnce() + Send + 'static) {
		let Some(state) = self.file_state() else {
			continuation();
			return;
		};
		if !state.is_modified() {
			continuation();
			return;
		}

		let title = state.file_title();
		let Some(provider) = self.dialog() else {
			tracing::warn!("unsaved changes present but no dialog component; action dropped");
			return;
		};

		let answer =
			provider.show_yes_no(&title, "There are unsaved changes. Discard them and continue?");
		tokio::spawn(async move {
			if answer.await {
				continuation();
			} else {
				tracing::debug!("unsaved changes kept; action dropped");
			}
		});
	}
}
