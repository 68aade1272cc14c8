//! Recipe data as exchanged with the recipe API and durable storage.

use crate::pagination::page_count;
use serde::{Deserialize, Serialize};

/// Number of search results shown per page.
pub const RESULTS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
	pub id: String,
	pub title: String,
	pub publisher: String,
	pub image: String,
	pub source_url: String,
	pub cooking_time: u32,
	pub servings: u32,
	pub ingredients: Vec<Ingredient>,
	/// Present on recipes uploaded by this user.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub key: Option<String>,
	/// Derived from bookmark membership whenever the recipe enters the store.
	#[serde(default)]
	pub bookmarked: bool,
}

impl Recipe {
	/// Scales every present quantity from the current serving count to `servings`.
	pub(crate) fn scale_to(&mut self, servings: u32) {
		if self.servings == 0 {
			// Nothing to scale from.
			self.servings = servings;
			return;
		}
		let factor = f64::from(servings) / f64::from(self.servings);
		for quantity in self.ingredients.iter_mut().filter_map(|ingredient| ingredient.quantity.as_mut()) {
			*quantity *= factor;
		}
		self.servings = servings;
	}

	#[must_use]
	pub fn summary(&self) -> SearchResultItem {
		SearchResultItem {
			id: self.id.clone(),
			title: self.title.clone(),
			publisher: self.publisher.clone(),
			image: self.image.clone(),
			key: self.key.clone(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
	pub quantity: Option<f64>,
	pub unit: String,
	pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
	pub id: String,
	pub title: String,
	pub publisher: String,
	pub image: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub key: Option<String>,
}

/// The latest search and the page currently shown.
///
/// `page` is at least 1 but may point past the last page, in which case [`SearchState::slice`] is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
	pub query: String,
	pub results: Vec<SearchResultItem>,
	pub page: usize,
	pub results_per_page: usize,
}

impl Default for SearchState {
	fn default() -> Self {
		Self {
			query: String::new(),
			results: Vec::new(),
			page: 1,
			results_per_page: RESULTS_PER_PAGE,
		}
	}
}

impl SearchState {
	#[must_use]
	pub fn new(query: String, results: Vec<SearchResultItem>, results_per_page: usize) -> Self {
		Self {
			query,
			results,
			page: 1,
			results_per_page,
		}
	}

	#[must_use]
	pub fn page_count(&self) -> usize {
		page_count(self.results.len(), self.results_per_page)
	}

	/// The results shown on `page` (1-based). Out-of-range pages yield an empty slice.
	#[must_use]
	pub fn slice(&self, page: usize) -> &[SearchResultItem] {
		let start = page.saturating_sub(1).saturating_mul(self.results_per_page);
		if start >= self.results.len() {
			return &[];
		}
		let end = start.saturating_add(self.results_per_page).min(self.results.len());
		&self.results[start..end]
	}
}

/// A recipe as entered by the user, before the API assigned it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
	pub title: String,
	pub source_url: String,
	pub image: String,
	pub publisher: String,
	pub cooking_time: u32,
	pub servings: u32,
	pub ingredients: Vec<Ingredient>,
}
