//! Error taxonomy.
//!
//! [`StoreError`] is what the UI boundary sees. Its [`Display`](core::fmt::Display) output is meant to be shown to the user as-is.

use thiserror::Error;

/// Failure of a [`StateStore`](`crate::store::StateStore`) operation.
///
/// A failed operation never leaves partially applied state behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
	#[error("Network request failed: {0}")]
	Network(String),

	#[error("We could not find recipe {0:?}. Please try another one!")]
	NotFound(String),

	#[error("No recipes found for {0:?}. Please try again!")]
	EmptyResults(String),

	#[error(transparent)]
	Validation(#[from] ValidationError),

	#[error("Could not save bookmarks: {0}")]
	Persistence(#[from] StorageError),
}

/// Malformed user input, reported with the offending field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
	#[error("Wrong format in ingredient {index} ({value:?}). Please use the format 'quantity,unit,description'!")]
	IngredientFormat { index: usize, value: String },

	#[error("Ingredient {index} has an invalid quantity {value:?}.")]
	InvalidQuantity { index: usize, value: String },

	#[error("Field {field:?} must be a positive whole number, not {value:?}.")]
	InvalidNumber { field: &'static str, value: String },

	#[error("Field {field:?} is required.")]
	MissingField { field: &'static str },

	#[error("Servings must be at least 1, not {0}.")]
	Servings(u32),

	#[error("No recipe is currently loaded.")]
	NoRecipe,
}

/// Failure reported by a [`RecipeApi`](`crate::api::RecipeApi`) implementation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
	#[error("not found")]
	NotFound,

	#[error("transport failure: {0}")]
	Transport(String),

	#[error("undecodable response: {0}")]
	Decode(String),
}

/// Failure of a [`BookmarkStorage`](`crate::storage::BookmarkStorage`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
	#[error("durable storage is unavailable")]
	Unavailable,

	#[error("write rejected: {0}")]
	Write(String),

	#[error("stored bookmarks are undecodable: {0}")]
	Decode(String),
}

/// Failure of a [`RenderTarget`](`crate::target::RenderTarget`) mutation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
	#[error("could not insert markup: {0}")]
	Insert(String),

	#[error("could not set attribute {name:?}: {reason}")]
	Attribute { name: String, reason: String },
}
