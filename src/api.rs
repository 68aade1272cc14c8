//! The remote recipe catalog.
//!
//! The transport itself lives outside this crate. Implementations map
//! `GET /recipe/{id}`, `GET /recipes?search={query}` and `POST /recipe` onto these calls.

use crate::{
	error::ApiError,
	model::{Recipe, RecipeDraft, SearchResultItem},
};
use async_trait::async_trait;

/// Client for the recipe catalog.
///
/// Futures returned by implementations only need to run on the current thread.
#[async_trait(?Send)]
pub trait RecipeApi {
	/// # Errors
	///
	/// [`ApiError::NotFound`] iff the catalog has no recipe `id`.
	async fn recipe(&self, id: &str) -> Result<Recipe, ApiError>;

	/// # Errors
	///
	/// Iff the request failed. No matches are reported as an empty list.
	async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, ApiError>;

	/// Creates a recipe and returns it as stored by the catalog.
	///
	/// # Errors
	///
	/// Iff the request failed.
	async fn upload(&self, draft: &RecipeDraft) -> Result<Recipe, ApiError>;
}
