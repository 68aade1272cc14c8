//! Views: a render target, a template and the fixed spinner/error/message panels.

use crate::{
	reconcile::{self, PatchReport},
	target::RenderTarget,
	template::{icon, Template, ViewData},
	tree::escape,
};
use tracing::{error, instrument, trace};

/// Renders one template into one container.
///
/// Composed into each UI region rather than shared through inheritance:
/// the container handle and template are passed in explicitly on construction.
#[derive(Debug)]
pub struct View<T, P> {
	target: T,
	template: P,
	icons: String,
	error_message: String,
	message: String,
}

impl<T: RenderTarget, P: Template> View<T, P> {
	#[must_use]
	pub fn new(target: T, template: P, icons: impl Into<String>) -> Self {
		Self {
			target,
			template,
			icons: icons.into(),
			error_message: String::new(),
			message: String::new(),
		}
	}

	/// Default text of [`View::render_error`].
	#[must_use]
	pub fn with_error_message(self, error_message: impl Into<String>) -> Self {
		Self {
			error_message: error_message.into(),
			..self
		}
	}

	/// Default text of [`View::render_message`].
	#[must_use]
	pub fn with_message(self, message: impl Into<String>) -> Self {
		Self { message: message.into(), ..self }
	}

	#[must_use]
	pub fn target(&self) -> &T {
		&self.target
	}

	pub fn target_mut(&mut self) -> &mut T {
		&mut self.target
	}

	/// The template's markup for `data`, without rendering it.
	#[must_use]
	pub fn markup(&self, data: &P::Data) -> String {
		self.template.markup(data)
	}

	/// Replaces the content with `data`'s markup.
	///
	/// Missing or vacant data renders the error panel instead, without invoking the template.
	#[instrument(skip(self, data))]
	pub fn render(&mut self, data: Option<&P::Data>) {
		match data {
			Some(data) if !data.is_vacant() => {
				let markup = self.template.markup(data);
				self.replace(&markup);
			}
			_ => {
				trace!("No data. Rendering error.");
				self.render_error(None);
			}
		}
	}

	/// Patches the current content towards `data`'s markup.
	///
	/// Only valid if the content was rendered from the same template for a state of the same shape. See [`reconcile::patch`].
	#[instrument(skip(self, data))]
	pub fn update(&mut self, data: &P::Data) -> PatchReport {
		let markup = self.template.markup(data);
		reconcile::patch(&mut self.target, &markup)
	}

	pub fn render_spinner(&mut self) {
		let markup = format!(r#"<div class="spinner"><svg><use href="{}"></use></svg></div>"#, icon(&self.icons, "loader"));
		self.replace(&markup);
	}

	/// Shows `message`, or the view's default error message.
	pub fn render_error(&mut self, message: Option<&str>) {
		let markup = format!(
			r#"<div class="error"><div><svg><use href="{}"></use></svg></div><p>{}</p></div>"#,
			icon(&self.icons, "alert-triangle"),
			escape(message.unwrap_or(&self.error_message)),
		);
		self.replace(&markup);
	}

	/// Shows `message`, or the view's default message.
	pub fn render_message(&mut self, message: Option<&str>) {
		let markup = format!(
			r#"<div class="message"><div><svg><use href="{}"></use></svg></div><p>{}</p></div>"#,
			icon(&self.icons, "smile"),
			escape(message.unwrap_or(&self.message)),
		);
		self.replace(&markup);
	}

	fn replace(&mut self, markup: &str) {
		if let Err(error) = reconcile::replace(&mut self.target, markup) {
			error!("Rendering failed: {}", error);
		}
	}
}
