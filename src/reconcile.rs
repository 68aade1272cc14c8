//! Replacing or patching a [`RenderTarget`]'s content.
//!
//! # Correct Use
//!
//! [`patch`] pairs old and new elements purely by their position in document order.
//! It never inserts, removes or reorders elements and never removes attributes.
//! Use [`replace`] whenever the shape of the rendered content may have changed (for example when a list changed length),
//! and [`patch`] only when the same template renders a structurally identical state (counters, icon toggles).
//!
//! Text is only compared for elements whose new first child is non-blank text.
//! `<p>Page <b>1</b> of 3</p>` is kept up to date as a whole, but in `<p><b>1</b> of 3</p>` the trailing ` of 3` is never patched.
//! Wrap such text in its own element.

use crate::{error::RenderError, target::RenderTarget, tree::RenderTree};
use tracing::{error, instrument, trace, trace_span, warn};

/// What a [`patch`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchReport {
	/// Element pairs that were compared.
	pub paired: usize,
	/// Old elements beyond the end of the new markup. Left untouched.
	pub surplus_old: usize,
	/// New elements beyond the end of the old content. Not inserted.
	pub surplus_new: usize,
	pub text_updates: usize,
	pub attribute_updates: usize,
}
impl PatchReport {
	/// Number of writes to the target.
	#[must_use]
	pub fn mutations(&self) -> usize {
		self.text_updates + self.attribute_updates
	}

	/// Whether both sides had the same number of elements.
	#[must_use]
	pub fn is_aligned(&self) -> bool {
		self.surplus_old == 0 && self.surplus_new == 0
	}
}

/// Clears `target` and inserts `markup` as its new content.
///
/// # Errors
///
/// Iff the target rejected the markup. The target is empty in that case.
#[instrument(skip(target, markup))]
pub fn replace<T: RenderTarget>(target: &mut T, markup: &str) -> Result<(), RenderError> {
	target.clear();
	target.insert_markup(markup)
}

/// Updates text and attributes of `target`'s current elements in place to match `markup`.
///
/// For each positional pair `(old, new)`:
///
/// - If `new`'s leading text is not blank and `new`'s text content differs from `old`'s, `old`'s text content is overwritten with `new`'s.
///   Note that this replaces all children of `old`.
/// - Every attribute of `new` whose value differs on `old` is written onto `old`.
///
/// Writing the same markup twice in a row performs no writes the second time.
#[instrument(skip(target, markup))]
pub fn patch<T: RenderTarget>(target: &mut T, markup: &str) -> PatchReport {
	let new_tree = RenderTree::parse(markup);
	let new_elements = new_tree.elements();
	let old_elements = target.elements();

	let paired = old_elements.len().min(new_elements.len());
	let mut report = PatchReport {
		paired,
		surplus_old: old_elements.len() - paired,
		surplus_new: new_elements.len() - paired,
		..PatchReport::default()
	};

	if !report.is_aligned() {
		warn!(
			"Patching {} existing element(s) with {} new one(s). Surplus elements are ignored; use `replace` for structural changes.",
			old_elements.len(),
			new_elements.len()
		);
	}

	for (old, &new) in old_elements.iter().zip(&new_elements) {
		let new_node = match new_tree.get(new) {
			Some(node) => node,
			None => continue,
		};
		let span = trace_span!("Patching element", tag = new_node.tag.as_str());
		let _enter = span.enter();

		if new_node.leading_text().map_or(false, |leading| !leading.trim().is_empty()) {
			let text = new_tree.text_content(new);
			if target.text_content(old) != text {
				trace!("Updating text to {:?}.", text);
				target.set_text_content(old, &text);
				report.text_updates += 1;
			}
		}

		for (name, value) in &new_node.attributes {
			if target.attribute(old, name).as_deref() == Some(value.as_str()) {
				continue;
			}
			match target.set_attribute(old, name, value) {
				Ok(()) => report.attribute_updates += 1,
				Err(error) => error!("Could not update attribute {:?}={:?}: {}", name, value, error),
			}
		}
	}

	trace!(?report, "Patch complete.");
	report
}
