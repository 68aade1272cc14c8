//! A detached, arena-backed element tree.
//!
//! [`RenderTree`] is what markup is parsed into before patching, and doubles as a headless [`RenderTarget`](`crate::target::RenderTarget`).

use core::fmt::{self, Display, Formatter};
use scraper::{ElementRef, Html, Node};
use tracing::{instrument, trace, warn};

/// Index of an element within its [`RenderTree`].
///
/// Handles stay valid until the tree is [cleared](`RenderTree::clear`).
/// Elements detached by [`RenderTree::set_text_content`] keep their handles but are no longer reachable from the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
	Element(NodeId),
	Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
	pub tag: String,
	pub attributes: Vec<(String, String)>,
	pub children: Vec<Child>,
}
impl ElementNode {
	#[must_use]
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes.iter().find(|(n, _)| n == name).map(|(_, value)| value.as_str())
	}

	#[must_use]
	pub fn has_class(&self, class: &str) -> bool {
		self.attribute("class").map_or(false, |classes| classes.split_whitespace().any(|c| c == class))
	}

	/// The element's first child if that is a text node.
	#[must_use]
	pub fn leading_text(&self) -> Option<&str> {
		match self.children.first() {
			Some(Child::Text(text)) => Some(text),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderTree {
	nodes: Vec<ElementNode>,
	content: Vec<Child>,
}

impl RenderTree {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a markup fragment the way a browser parses `innerHTML`.
	#[must_use]
	#[instrument(skip(markup))]
	pub fn parse(markup: &str) -> Self {
		let mut tree = Self::new();
		tree.content = tree.load_fragment(markup);
		trace!("Parsed {} element(s).", tree.nodes.len());
		tree
	}

	fn load_fragment(&mut self, markup: &str) -> Vec<Child> {
		let fragment = Html::parse_fragment(markup);
		self.load_children(fragment.root_element())
	}

	fn load_children(&mut self, parent: ElementRef<'_>) -> Vec<Child> {
		let mut children = Vec::new();
		for child in parent.children() {
			if let Some(element) = ElementRef::wrap(child) {
				let id = self.load_element(element);
				children.push(Child::Element(id));
			} else if let Node::Text(text) = child.value() {
				children.push(Child::Text(String::from(&**text)));
			}
		}
		children
	}

	fn load_element(&mut self, element: ElementRef<'_>) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(ElementNode {
			tag: element.value().name().to_owned(),
			attributes: element.value().attrs().map(|(name, value)| (name.to_owned(), value.to_owned())).collect(),
			children: Vec::new(),
		});
		let children = self.load_children(element);
		self.nodes[id.0].children = children;
		id
	}

	/// Removes all content. Invalidates every [`NodeId`] handed out so far.
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.content.clear();
	}

	/// Parses `markup` and inserts it before the current content.
	#[instrument(skip(self, markup))]
	pub fn insert_markup(&mut self, markup: &str) {
		let mut inserted = self.load_fragment(markup);
		inserted.append(&mut self.content);
		self.content = inserted;
	}

	#[must_use]
	pub fn content(&self) -> &[Child] {
		&self.content
	}

	#[must_use]
	pub fn get(&self, id: NodeId) -> Option<&ElementNode> {
		self.nodes.get(id.0)
	}

	/// All reachable elements in document (pre-)order.
	#[must_use]
	pub fn elements(&self) -> Vec<NodeId> {
		let mut elements = Vec::new();
		let mut stack: Vec<&Child> = self.content.iter().rev().collect();
		while let Some(child) = stack.pop() {
			if let &Child::Element(id) = child {
				elements.push(id);
				if let Some(node) = self.get(id) {
					stack.extend(node.children.iter().rev());
				}
			}
		}
		elements
	}

	/// The first reachable element carrying `class`.
	#[must_use]
	pub fn find_by_class(&self, class: &str) -> Option<NodeId> {
		self.elements().into_iter().find(|&id| self.get(id).map_or(false, |node| node.has_class(class)))
	}

	#[must_use]
	pub fn find_all_by_class(&self, class: &str) -> Vec<NodeId> {
		self.elements().into_iter().filter(|&id| self.get(id).map_or(false, |node| node.has_class(class))).collect()
	}

	#[must_use]
	pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
		self.get(id)?.attribute(name)
	}

	#[must_use]
	pub fn leading_text(&self, id: NodeId) -> Option<&str> {
		self.get(id)?.leading_text()
	}

	/// Concatenated text of all descendant text nodes, like `Node.textContent`.
	#[must_use]
	pub fn text_content(&self, id: NodeId) -> String {
		let mut text = String::new();
		self.collect_text(id, &mut text);
		text
	}

	fn collect_text(&self, id: NodeId, text: &mut String) {
		if let Some(node) = self.get(id) {
			for child in &node.children {
				match child {
					Child::Text(t) => text.push_str(t),
					&Child::Element(child) => self.collect_text(child, text),
				}
			}
		}
	}

	/// Replaces all children of `id` with a single text node.
	pub fn set_text_content(&mut self, id: NodeId, text: &str) {
		match self.nodes.get_mut(id.0) {
			Some(node) => {
				node.children.clear();
				if !text.is_empty() {
					node.children.push(Child::Text(text.to_owned()));
				}
			}
			None => warn!("Tried to set text content on unknown {:?}.", id),
		}
	}

	pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
		match self.nodes.get_mut(id.0) {
			Some(node) => match node.attributes.iter_mut().find(|(n, _)| n == name) {
				Some((_, v)) => value.clone_into(v),
				None => node.attributes.push((name.to_owned(), value.to_owned())),
			},
			None => warn!("Tried to set attribute {:?} on unknown {:?}.", name, id),
		}
	}

	/// Serializes the content back into markup.
	#[must_use]
	pub fn to_markup(&self) -> String {
		self.to_string()
	}

	fn write_child(&self, f: &mut Formatter<'_>, child: &Child) -> fmt::Result {
		match child {
			Child::Text(text) => f.write_str(&escape(text)),
			&Child::Element(id) => {
				let node = match self.get(id) {
					Some(node) => node,
					None => return Ok(()),
				};
				write!(f, "<{}", node.tag)?;
				for (name, value) in &node.attributes {
					write!(f, " {}=\"{}\"", name, escape(value))?;
				}
				f.write_str(">")?;
				if VOID_ELEMENTS.contains(&node.tag.as_str()) {
					return Ok(());
				}
				for child in &node.children {
					self.write_child(f, child)?;
				}
				write!(f, "</{}>", node.tag)
			}
		}
	}
}

impl Display for RenderTree {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		for child in &self.content {
			self.write_child(f, child)?;
		}
		Ok(())
	}
}

const VOID_ELEMENTS: &[&str] = &["area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr"];

/// Escapes text for use in element content or a double-quoted attribute value.
#[must_use]
pub fn escape(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			c => escaped.push(c),
		}
	}
	escaped
}
