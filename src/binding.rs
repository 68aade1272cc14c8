//! Which UI events trigger which actions.
//!
//! Each region of the page has a table of [`Registration`]s. The input layer attaches one listener per entry,
//! collects an [`EventPayload`] when it fires and hands the [decoded](`ActionKind::decode`) [`Action`] to the
//! [`Controller`](`crate::controller::Controller`).

use crate::route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
	ShowRecipe,
	Search,
	GoToPage,
	UpdateServings,
	ToggleBookmark,
	RestoreBookmarks,
	Upload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
	/// DOM event name.
	pub event: &'static str,
	/// Only events originating within the closest ancestor matching this selector count. `None` means the whole region (or window).
	pub delegate: Option<&'static str>,
	pub kind: ActionKind,
}

const fn on(event: &'static str, delegate: Option<&'static str>, kind: ActionKind) -> Registration {
	Registration { event, delegate, kind }
}

pub const RECIPE: &[Registration] = &[
	on("hashchange", None, ActionKind::ShowRecipe),
	on("load", None, ActionKind::ShowRecipe),
	on("click", Some(".btn--update-servings"), ActionKind::UpdateServings),
	on("click", Some(".btn--bookmark"), ActionKind::ToggleBookmark),
];
pub const SEARCH: &[Registration] = &[on("submit", None, ActionKind::Search)];
pub const PAGINATION: &[Registration] = &[on("click", Some(".btn--inline"), ActionKind::GoToPage)];
pub const BOOKMARKS: &[Registration] = &[on("load", None, ActionKind::RestoreBookmarks)];
pub const UPLOAD: &[Registration] = &[on("submit", None, ActionKind::Upload)];

/// All regions by name.
pub const REGIONS: &[(&str, &[Registration])] = &[("recipe", RECIPE), ("search", SEARCH), ("pagination", PAGINATION), ("bookmarks", BOOKMARKS), ("upload", UPLOAD)];

/// What the input layer read from the page when an event fired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPayload {
	/// Current URL fragment.
	pub fragment: String,
	/// Attributes of the delegate element, e.g. `("data-goto", "2")`.
	pub dataset: Vec<(String, String)>,
	/// Search field value.
	pub query: String,
	/// Form entries in document order.
	pub form: Vec<(String, String)>,
}
impl EventPayload {
	fn data(&self, name: &str) -> Option<&str> {
		self.dataset.iter().find(|(n, _)| n == name).map(|(_, value)| value.trim())
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
	/// Show the recipe with this id.
	ShowRecipe(String),
	Search(String),
	GoToPage(usize),
	UpdateServings(u32),
	ToggleBookmark,
	RestoreBookmarks,
	Upload(Vec<(String, String)>),
}

impl ActionKind {
	/// The action for this event, or [`None`] if it should be ignored.
	#[must_use]
	pub fn decode(self, payload: &EventPayload) -> Option<Action> {
		match self {
			ActionKind::ShowRecipe => route::recipe_id(&payload.fragment).map(|id| Action::ShowRecipe(id.to_owned())),
			ActionKind::Search => {
				let query = payload.query.trim();
				if query.is_empty() {
					None
				} else {
					Some(Action::Search(query.to_owned()))
				}
			}
			ActionKind::GoToPage => payload.data("data-goto")?.parse::<usize>().ok().filter(|&page| page > 0).map(Action::GoToPage),
			ActionKind::UpdateServings => payload.data("data-update-to")?.parse::<u32>().ok().filter(|&servings| servings > 0).map(Action::UpdateServings),
			ActionKind::ToggleBookmark => Some(Action::ToggleBookmark),
			ActionKind::RestoreBookmarks => Some(Action::RestoreBookmarks),
			ActionKind::Upload => Some(Action::Upload(payload.form.clone())),
		}
	}
}
