//! Application state: the current recipe, search results and bookmarks.
//!
//! All operations take `&self`, so several of them may be pending at the same time on one thread.
//! No state borrow is held across an await. Network operations are never cancelled:
//! if two searches overlap, whichever response arrives last determines the search state.

use crate::{
	api::RecipeApi,
	config::Config,
	error::{ApiError, StorageError, StoreError, ValidationError},
	model::{Recipe, SearchResultItem, SearchState},
	storage::BookmarkStorage,
	upload::parse_draft,
};
use hashbrown::HashMap;
use std::{cell::RefCell, rc::Rc};
use tracing::{info, instrument, trace, warn};

#[derive(Debug, Default)]
struct State {
	/// Shared with its [`State::cache`] entry.
	recipe: Option<Rc<RefCell<Recipe>>>,
	search: SearchState,
	bookmarks: Vec<Recipe>,
	/// Never evicted.
	cache: HashMap<String, Rc<RefCell<Recipe>>>,
}

impl State {
	fn is_bookmarked(&self, id: &str) -> bool {
		self.bookmarks.iter().any(|bookmark| bookmark.id == id)
	}

	fn mark_bookmarked(&self, id: &str, bookmarked: bool) {
		if let Some(cached) = self.cache.get(id) {
			cached.borrow_mut().bookmarked = bookmarked;
		}
		if let Some(current) = &self.recipe {
			let mut current = current.borrow_mut();
			if current.id == id {
				current.bookmarked = bookmarked;
			}
		}
	}
}

/// Owns the recipe cache and the bookmark collection.
#[derive(Debug)]
pub struct StateStore<A, S> {
	api: A,
	storage: S,
	results_per_page: usize,
	state: RefCell<State>,
}

impl<A: RecipeApi, S: BookmarkStorage> StateStore<A, S> {
	/// Creates a store and restores bookmarks from `storage`.
	///
	/// An unreadable or undecodable bookmark record is logged and treated as empty.
	#[instrument(skip(api, storage, config))]
	pub fn new(api: A, storage: S, config: &Config) -> Self {
		let bookmarks = match storage.load() {
			Ok(Some(record)) => match serde_json::from_str::<Vec<Recipe>>(&record) {
				Ok(restored) => {
					let mut bookmarks: Vec<Recipe> = Vec::with_capacity(restored.len());
					for mut bookmark in restored {
						if bookmarks.iter().any(|b| b.id == bookmark.id) {
							warn!("Dropping duplicate bookmark {:?}.", bookmark.id);
							continue;
						}
						bookmark.bookmarked = true;
						bookmarks.push(bookmark);
					}
					info!("Restored {} bookmark(s).", bookmarks.len());
					bookmarks
				}
				Err(error) => {
					warn!("{}", StorageError::Decode(error.to_string()));
					Vec::new()
				}
			},
			Ok(None) => Vec::new(),
			Err(error) => {
				warn!("Could not read bookmarks: {}", error);
				Vec::new()
			}
		};

		Self {
			api,
			storage,
			results_per_page: config.results_per_page,
			state: RefCell::new(State {
				search: SearchState {
					results_per_page: config.results_per_page,
					..SearchState::default()
				},
				bookmarks,
				..State::default()
			}),
		}
	}

	#[must_use]
	pub fn api(&self) -> &A {
		&self.api
	}

	/// Makes recipe `id` current, fetching it unless it was loaded before.
	///
	/// # Errors
	///
	/// [`StoreError::NotFound`] if the catalog doesn't know `id`, [`StoreError::Network`] for other fetch failures.
	/// The current recipe is unchanged on error.
	#[instrument(skip(self))]
	pub async fn load_recipe(&self, id: &str) -> Result<(), StoreError> {
		let cached = self.state.borrow().cache.get(id).cloned();
		let recipe = match cached {
			Some(recipe) => {
				trace!("Cache hit.");
				recipe
			}
			None => {
				let fetched = self.api.recipe(id).await.map_err(|error| match error {
					ApiError::NotFound => StoreError::NotFound(id.to_owned()),
					other => StoreError::Network(other.to_string()),
				})?;
				if fetched.id != id {
					warn!("Catalog returned recipe {:?} for id {:?}.", fetched.id, id);
				}
				let mut state = self.state.borrow_mut();
				let recipe = Rc::clone(state.cache.entry(id.to_owned()).or_insert_with(|| Rc::new(RefCell::new(fetched))));
				recipe
			}
		};

		let mut state = self.state.borrow_mut();
		let bookmarked = state.is_bookmarked(id);
		recipe.borrow_mut().bookmarked = bookmarked;
		state.recipe = Some(recipe);
		Ok(())
	}

	/// Replaces the search state with the results for `query`, starting at page 1.
	///
	/// # Errors
	///
	/// [`StoreError::EmptyResults`] if nothing matched, [`StoreError::Network`] if the fetch failed.
	/// The search state is unchanged on error.
	#[instrument(skip(self))]
	pub async fn load_search_results(&self, query: &str) -> Result<(), StoreError> {
		let results = self.api.search(query).await.map_err(|error| match error {
			ApiError::NotFound => StoreError::EmptyResults(query.to_owned()),
			other => StoreError::Network(other.to_string()),
		})?;
		if results.is_empty() {
			return Err(StoreError::EmptyResults(query.to_owned()));
		}
		info!("{} result(s).", results.len());
		self.state.borrow_mut().search = SearchState::new(query.to_owned(), results, self.results_per_page);
		Ok(())
	}

	/// The results on `page`, which also becomes the current page. Defaults to the current page.
	///
	/// Pages past the end are empty. Page 0 is treated as page 1.
	pub fn results_page(&self, page: Option<usize>) -> Vec<SearchResultItem> {
		let mut state = self.state.borrow_mut();
		if let Some(page) = page {
			state.search.page = page.max(1);
		}
		state.search.slice(state.search.page).to_vec()
	}

	/// Rescales the current recipe's ingredient quantities to `servings`.
	///
	/// The current recipe is mutated in place, so its cache entry changes with it.
	///
	/// # Errors
	///
	/// [`ValidationError::Servings`] for 0 and [`ValidationError::NoRecipe`] if no recipe is loaded. Nothing changes in either case.
	#[instrument(skip(self))]
	pub fn update_servings(&self, servings: u32) -> Result<(), StoreError> {
		if servings == 0 {
			return Err(ValidationError::Servings(servings).into());
		}
		let state = self.state.borrow();
		let recipe = state.recipe.as_ref().ok_or(ValidationError::NoRecipe)?;
		recipe.borrow_mut().scale_to(servings);
		Ok(())
	}

	/// Adds `recipe` to the bookmarks unless its id is already bookmarked.
	///
	/// # Errors
	///
	/// [`StoreError::Persistence`] if the new snapshot couldn't be saved. The bookmarks are unchanged in that case.
	#[instrument(skip(self, recipe), fields(id = recipe.id.as_str()))]
	pub fn add_bookmark(&self, recipe: &Recipe) -> Result<(), StoreError> {
		let mut state = self.state.borrow_mut();
		if state.is_bookmarked(&recipe.id) {
			trace!("Already bookmarked.");
			state.mark_bookmarked(&recipe.id, true);
			return Ok(());
		}

		let mut bookmarks = state.bookmarks.clone();
		bookmarks.push(Recipe {
			bookmarked: true,
			..recipe.clone()
		});
		self.persist(&bookmarks)?;
		state.bookmarks = bookmarks;
		state.mark_bookmarked(&recipe.id, true);
		Ok(())
	}

	/// Removes bookmark `id`, if present.
	///
	/// # Errors
	///
	/// [`StoreError::Persistence`] if the new snapshot couldn't be saved. The bookmarks are unchanged in that case.
	#[instrument(skip(self))]
	pub fn delete_bookmark(&self, id: &str) -> Result<(), StoreError> {
		let mut state = self.state.borrow_mut();
		if !state.is_bookmarked(id) {
			trace!("Not bookmarked.");
			return Ok(());
		}

		let bookmarks: Vec<Recipe> = state.bookmarks.iter().filter(|bookmark| bookmark.id != id).cloned().collect();
		self.persist(&bookmarks)?;
		state.bookmarks = bookmarks;
		state.mark_bookmarked(id, false);
		Ok(())
	}

	/// Parses the upload form, sends the draft and makes the created recipe current and bookmarked.
	///
	/// # Errors
	///
	/// [`StoreError::Validation`] for malformed input (nothing is sent), [`StoreError::Network`] if the upload failed
	/// and [`StoreError::Persistence`] if the bookmark snapshot couldn't be saved. Nothing changes on error.
	#[instrument(skip(self, entries))]
	pub async fn upload_recipe(&self, entries: &[(String, String)]) -> Result<(), StoreError> {
		let draft = parse_draft(entries)?;
		let mut recipe = self.api.upload(&draft).await.map_err(|error| StoreError::Network(error.to_string()))?;
		recipe.bookmarked = true;
		info!(id = recipe.id.as_str(), "Uploaded.");

		let mut state = self.state.borrow_mut();
		let mut bookmarks: Vec<Recipe> = state.bookmarks.iter().filter(|bookmark| bookmark.id != recipe.id).cloned().collect();
		bookmarks.push(recipe.clone());
		self.persist(&bookmarks)?;
		state.bookmarks = bookmarks;

		let recipe = Rc::new(RefCell::new(recipe));
		let id = recipe.borrow().id.clone();
		state.cache.insert(id, Rc::clone(&recipe));
		state.recipe = Some(recipe);
		Ok(())
	}

	fn persist(&self, bookmarks: &[Recipe]) -> Result<(), StorageError> {
		let snapshot = serde_json::to_string(bookmarks).map_err(|error| StorageError::Write(error.to_string()))?;
		self.storage.save(&snapshot)?;
		trace!("Persisted {} bookmark(s).", bookmarks.len());
		Ok(())
	}

	/// A copy of the current recipe.
	#[must_use]
	pub fn recipe(&self) -> Option<Recipe> {
		self.state.borrow().recipe.as_ref().map(|recipe| recipe.borrow().clone())
	}

	#[must_use]
	pub fn search(&self) -> SearchState {
		self.state.borrow().search.clone()
	}

	#[must_use]
	pub fn bookmarks(&self) -> Vec<Recipe> {
		self.state.borrow().bookmarks.clone()
	}

	#[must_use]
	pub fn is_bookmarked(&self, id: &str) -> bool {
		self.state.borrow().is_bookmarked(id)
	}

	/// A copy of the cache entry for `id`.
	#[must_use]
	pub fn cached(&self, id: &str) -> Option<Recipe> {
		self.state.borrow().cache.get(id).map(|recipe| recipe.borrow().clone())
	}

	#[must_use]
	pub fn cache_len(&self) -> usize {
		self.state.borrow().cache.len()
	}
}
