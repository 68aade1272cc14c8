//! Wires decoded user actions to store mutations and view renders.

use crate::{
	api::RecipeApi,
	binding::Action,
	config::Config,
	error::{StoreError, ValidationError},
	model::SearchResultItem,
	route,
	storage::BookmarkStorage,
	store::StateStore,
	target::RenderTarget,
	template::{PaginationTemplate, PreviewTemplate, Previews, RecipeTemplate, UploadFormTemplate},
	view::View,
};
use core::time::Duration;
use tracing::{error, instrument, warn};

/// One view per page region.
#[derive(Debug)]
pub struct Views<T> {
	pub recipe: View<T, RecipeTemplate>,
	pub results: View<T, PreviewTemplate>,
	pub pagination: View<T, PaginationTemplate>,
	pub bookmarks: View<T, PreviewTemplate>,
	pub upload: View<T, UploadFormTemplate>,
}

/// Containers for [`Views::new`], one per region.
#[derive(Debug, Clone)]
pub struct Regions<T> {
	pub recipe: T,
	pub results: T,
	pub pagination: T,
	pub bookmarks: T,
	pub upload: T,
}

impl<T: RenderTarget> Views<T> {
	#[must_use]
	pub fn new(config: &Config, regions: Regions<T>) -> Self {
		let icons = config.icons_url.as_str();
		Self {
			recipe: View::new(regions.recipe, RecipeTemplate { icons: icons.to_owned() }, icons)
				.with_error_message(config.recipe_error_message.as_str())
				.with_message(config.recipe_message.as_str()),
			results: View::new(regions.results, PreviewTemplate { icons: icons.to_owned() }, icons).with_error_message(config.results_error_message.as_str()),
			pagination: View::new(regions.pagination, PaginationTemplate { icons: icons.to_owned() }, icons),
			bookmarks: View::new(regions.bookmarks, PreviewTemplate { icons: icons.to_owned() }, icons).with_error_message(config.bookmarks_error_message.as_str()),
			upload: View::new(regions.upload, UploadFormTemplate { icons: icons.to_owned() }, icons).with_message(config.upload_message.as_str()),
		}
	}
}

#[derive(Debug)]
pub struct Controller<T, A, S> {
	store: StateStore<A, S>,
	views: Views<T>,
	modal_close: Duration,
}

impl<T: RenderTarget, A: RecipeApi, S: BookmarkStorage> Controller<T, A, S> {
	#[must_use]
	pub fn new(config: &Config, api: A, storage: S, regions: Regions<T>) -> Self {
		Self {
			store: StateStore::new(api, storage, config),
			views: Views::new(config, regions),
			modal_close: config.modal_close_delay(),
		}
	}

	#[must_use]
	pub fn store(&self) -> &StateStore<A, S> {
		&self.store
	}

	#[must_use]
	pub fn views(&self) -> &Views<T> {
		&self.views
	}

	/// How long the upload confirmation should stay up before [`Controller::reset_upload_form`].
	#[must_use]
	pub fn modal_close_delay(&self) -> Duration {
		self.modal_close
	}

	/// Initial render: the welcome message, the upload form and the restored bookmarks.
	pub fn start(&mut self) {
		self.views.recipe.render_message(None);
		self.views.upload.render(Some(&()));
		self.restore_bookmarks();
	}

	/// Runs `action`.
	///
	/// Returns the URL fragment to navigate to, if the action created a new location.
	///
	/// # Errors
	///
	/// The failure that was already shown to the user.
	#[instrument(skip(self))]
	pub async fn dispatch(&mut self, action: Action) -> Result<Option<String>, StoreError> {
		match action {
			Action::ShowRecipe(id) => self.show_recipe(&id).await.map(|()| None),
			Action::Search(query) => self.search(&query).await.map(|()| None),
			Action::GoToPage(page) => {
				self.go_to_page(page);
				Ok(None)
			}
			Action::UpdateServings(servings) => self.update_servings(servings).map(|()| None),
			Action::ToggleBookmark => self.toggle_bookmark().map(|()| None),
			Action::RestoreBookmarks => {
				self.restore_bookmarks();
				Ok(None)
			}
			Action::Upload(entries) => self.upload(&entries).await.map(Some),
		}
	}

	fn previews(&self, items: Vec<SearchResultItem>) -> Previews {
		Previews {
			items,
			active: self.store.recipe().map(|recipe| recipe.id),
		}
	}

	fn bookmark_previews(&self) -> Previews {
		self.previews(self.store.bookmarks().iter().map(|bookmark| bookmark.summary()).collect())
	}

	/// Loads and shows recipe `id`, highlighting it in the result and bookmark lists.
	///
	/// # Errors
	///
	/// If loading failed. The recipe view shows its error panel.
	#[instrument(skip(self))]
	pub async fn show_recipe(&mut self, id: &str) -> Result<(), StoreError> {
		self.views.recipe.render_spinner();

		// The highlight moves before the load completes.
		let active = Some(id.to_owned());
		let results = Previews {
			items: self.store.results_page(None),
			active: active.clone(),
		};
		self.views.results.update(&results);
		let bookmarks = Previews {
			items: self.store.bookmarks().iter().map(|bookmark| bookmark.summary()).collect(),
			active,
		};
		self.views.bookmarks.update(&bookmarks);

		match self.store.load_recipe(id).await {
			Ok(()) => {
				self.views.recipe.render(self.store.recipe().as_ref());
				Ok(())
			}
			Err(store_error) => {
				error!("{}", store_error);
				self.views.recipe.render_error(None);
				Err(store_error)
			}
		}
	}

	/// Same as [`Controller::show_recipe`], reading the id from a URL fragment. Does nothing for an empty fragment.
	///
	/// # Errors
	///
	/// If loading failed.
	pub async fn show_recipe_at(&mut self, fragment: &str) -> Result<(), StoreError> {
		match route::recipe_id(fragment) {
			Some(id) => self.show_recipe(id).await,
			None => Ok(()),
		}
	}

	/// Runs a new search and shows its first page.
	///
	/// # Errors
	///
	/// If the search failed or found nothing. The results view shows the reason.
	#[instrument(skip(self))]
	pub async fn search(&mut self, query: &str) -> Result<(), StoreError> {
		self.views.results.render_spinner();
		match self.store.load_search_results(query).await {
			Ok(()) => {
				let page = self.previews(self.store.results_page(None));
				self.views.results.render(Some(&page));
				self.views.pagination.render(Some(&self.store.search()));
				Ok(())
			}
			Err(store_error) => {
				warn!("{}", store_error);
				self.views.results.render_error(Some(&store_error.to_string()));
				self.views.pagination.target_mut().clear();
				Err(store_error)
			}
		}
	}

	pub fn go_to_page(&mut self, page: usize) {
		let page = self.previews(self.store.results_page(Some(page)));
		self.views.results.render(Some(&page));
		self.views.pagination.render(Some(&self.store.search()));
	}

	/// # Errors
	///
	/// [`StoreError::Validation`] if `servings` is 0 or no recipe is shown. Nothing is rendered in that case.
	pub fn update_servings(&mut self, servings: u32) -> Result<(), StoreError> {
		self.store.update_servings(servings)?;
		if let Some(recipe) = self.store.recipe() {
			self.views.recipe.update(&recipe);
		}
		Ok(())
	}

	/// Bookmarks the current recipe, or removes its bookmark.
	///
	/// # Errors
	///
	/// [`ValidationError::NoRecipe`] if no recipe is shown, [`StoreError::Persistence`] if saving failed.
	pub fn toggle_bookmark(&mut self) -> Result<(), StoreError> {
		let recipe = self.store.recipe().ok_or(ValidationError::NoRecipe)?;
		if recipe.bookmarked {
			self.store.delete_bookmark(&recipe.id)?;
		} else {
			self.store.add_bookmark(&recipe)?;
		}

		if let Some(recipe) = self.store.recipe() {
			self.views.recipe.update(&recipe);
		}
		let bookmarks = self.bookmark_previews();
		self.views.bookmarks.render(Some(&bookmarks));
		Ok(())
	}

	pub fn restore_bookmarks(&mut self) {
		let bookmarks = self.bookmark_previews();
		self.views.bookmarks.render(Some(&bookmarks));
	}

	/// Uploads a new recipe from form entries and shows it.
	///
	/// Returns the new recipe's URL fragment.
	///
	/// # Errors
	///
	/// If parsing or uploading failed. The upload view shows the reason.
	#[instrument(skip(self, entries))]
	pub async fn upload(&mut self, entries: &[(String, String)]) -> Result<String, StoreError> {
		self.views.upload.render_spinner();
		if let Err(store_error) = self.store.upload_recipe(entries).await {
			warn!("{}", store_error);
			self.views.upload.render_error(Some(&store_error.to_string()));
			return Err(store_error);
		}

		let recipe = self.store.recipe().ok_or(ValidationError::NoRecipe)?;
		self.views.recipe.render(Some(&recipe));
		self.views.upload.render_message(None);
		self.restore_bookmarks();
		Ok(route::fragment(&recipe.id))
	}

	/// Puts the blank upload form back after the confirmation was shown.
	pub fn reset_upload_form(&mut self) {
		self.views.upload.render(Some(&()));
	}
}
