//! Live structures the reconciliation engine can write into.

use crate::{
	error::RenderError,
	tree::{NodeId, RenderTree},
};
use tracing::{error, instrument};
use wasm_bindgen::JsCast;

/// A container whose content can be replaced wholesale or patched element by element.
///
/// Element handles returned by [`elements`](`RenderTarget::elements`) must stay usable for the duration of one patch,
/// even if an earlier write in that patch detached them.
pub trait RenderTarget {
	type Element;

	fn clear(&mut self);

	/// Inserts `markup` before the current content (`afterbegin`).
	///
	/// # Errors
	///
	/// Iff the markup could not be inserted.
	fn insert_markup(&mut self, markup: &str) -> Result<(), RenderError>;

	/// All descendant elements of the container in document order.
	fn elements(&self) -> Vec<Self::Element>;

	/// Concatenated text of all of `element`'s descendant text nodes, like `Node.textContent`.
	fn text_content(&self, element: &Self::Element) -> String;

	fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

	fn set_text_content(&mut self, element: &Self::Element, text: &str);

	/// # Errors
	///
	/// Iff the attribute could not be written, e.g. because `name` is not a valid attribute name.
	fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str) -> Result<(), RenderError>;
}

impl RenderTarget for RenderTree {
	type Element = NodeId;

	fn clear(&mut self) {
		RenderTree::clear(self);
	}

	fn insert_markup(&mut self, markup: &str) -> Result<(), RenderError> {
		RenderTree::insert_markup(self, markup);
		Ok(())
	}

	fn elements(&self) -> Vec<NodeId> {
		RenderTree::elements(self)
	}

	fn text_content(&self, element: &NodeId) -> String {
		RenderTree::text_content(self, *element)
	}

	fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
		RenderTree::attribute(self, *element, name).map(str::to_owned)
	}

	fn set_text_content(&mut self, element: &NodeId, text: &str) {
		RenderTree::set_text_content(self, *element, text);
	}

	fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) -> Result<(), RenderError> {
		RenderTree::set_attribute(self, *element, name, value);
		Ok(())
	}
}

/// The container's [***childNodes***](https://developer.mozilla.org/en-US/docs/Web/API/Node/childNodes) are the rendered content.
///
/// The element itself and its own [***Attr***](https://developer.mozilla.org/en-US/docs/Web/API/Attr)ibutes are never touched.
impl RenderTarget for web_sys::Element {
	type Element = web_sys::Element;

	#[instrument]
	fn clear(&mut self) {
		self.set_inner_html("");
	}

	#[instrument(skip(markup))]
	fn insert_markup(&mut self, markup: &str) -> Result<(), RenderError> {
		self.insert_adjacent_html("afterbegin", markup).map_err(|error| {
			error!("Failed to insert markup: {:?}", error);
			RenderError::Insert(format!("{:?}", error))
		})
	}

	fn elements(&self) -> Vec<web_sys::Element> {
		let node_list = match self.query_selector_all("*") {
			Ok(node_list) => node_list,
			Err(error) => {
				error!("Failed to list descendant elements: {:?}", error);
				return Vec::new();
			}
		};
		(0..node_list.length()).filter_map(|i| node_list.get(i)).filter_map(|node| node.dyn_into::<web_sys::Element>().ok()).collect()
	}

	fn text_content(&self, element: &web_sys::Element) -> String {
		web_sys::Node::text_content(element).unwrap_or_default()
	}

	fn attribute(&self, element: &web_sys::Element, name: &str) -> Option<String> {
		element.get_attribute(name)
	}

	fn set_text_content(&mut self, element: &web_sys::Element, text: &str) {
		web_sys::Node::set_text_content(element, Some(text));
	}

	fn set_attribute(&mut self, element: &web_sys::Element, name: &str, value: &str) -> Result<(), RenderError> {
		element.set_attribute(name, value).map_err(|error| RenderError::Attribute {
			name: name.to_owned(),
			reason: format!("{:?}", error),
		})
	}
}
