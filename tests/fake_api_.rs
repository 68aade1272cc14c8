#![allow(dead_code)]

use async_trait::async_trait;
use forkify_dom::{
	api::RecipeApi,
	error::ApiError,
	model::{Ingredient, Recipe, RecipeDraft, SearchResultItem},
};
use futures::channel::oneshot;
use std::{
	cell::{Cell, RefCell},
	collections::HashMap,
};

/// In-memory catalog. Searches can be gated to control when they resolve.
#[derive(Default)]
pub struct FakeApi {
	recipes: RefCell<HashMap<String, Recipe>>,
	searches: RefCell<HashMap<String, Vec<SearchResultItem>>>,
	gates: RefCell<HashMap<String, oneshot::Receiver<Vec<SearchResultItem>>>>,
	pub offline: Cell<bool>,
	pub recipe_requests: Cell<usize>,
	pub uploads: RefCell<Vec<RecipeDraft>>,
}

impl FakeApi {
	pub fn with_recipe(self, recipe: Recipe) -> Self {
		self.recipes.borrow_mut().insert(recipe.id.clone(), recipe);
		self
	}

	pub fn with_search(self, query: &str, results: Vec<SearchResultItem>) -> Self {
		self.searches.borrow_mut().insert(query.to_owned(), results);
		self
	}

	/// The next search for `query` resolves only once the returned sender is used.
	pub fn gate(&self, query: &str) -> oneshot::Sender<Vec<SearchResultItem>> {
		let (sender, receiver) = oneshot::channel();
		self.gates.borrow_mut().insert(query.to_owned(), receiver);
		sender
	}
}

#[async_trait(?Send)]
impl RecipeApi for FakeApi {
	async fn recipe(&self, id: &str) -> Result<Recipe, ApiError> {
		if self.offline.get() {
			return Err(ApiError::Transport("offline".to_owned()));
		}
		self.recipe_requests.set(self.recipe_requests.get() + 1);
		self.recipes.borrow().get(id).cloned().ok_or(ApiError::NotFound)
	}

	async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, ApiError> {
		let gate = self.gates.borrow_mut().remove(query);
		if let Some(gate) = gate {
			return gate.await.map_err(|_| ApiError::Transport("gate dropped".to_owned()));
		}
		if self.offline.get() {
			return Err(ApiError::Transport("offline".to_owned()));
		}
		Ok(self.searches.borrow().get(query).cloned().unwrap_or_default())
	}

	async fn upload(&self, draft: &RecipeDraft) -> Result<Recipe, ApiError> {
		if self.offline.get() {
			return Err(ApiError::Transport("offline".to_owned()));
		}
		self.uploads.borrow_mut().push(draft.clone());
		Ok(Recipe {
			id: format!("upload-{}", self.uploads.borrow().len()),
			title: draft.title.clone(),
			publisher: draft.publisher.clone(),
			image: draft.image.clone(),
			source_url: draft.source_url.clone(),
			cooking_time: draft.cooking_time,
			servings: draft.servings,
			ingredients: draft.ingredients.clone(),
			key: Some("user-key".to_owned()),
			bookmarked: false,
		})
	}
}

pub fn recipe(id: &str) -> Recipe {
	Recipe {
		id: id.to_owned(),
		title: format!("Recipe {}", id),
		publisher: "Test Kitchen".to_owned(),
		image: format!("https://example.com/{}.jpg", id),
		source_url: format!("https://example.com/{}", id),
		cooking_time: 30,
		servings: 4,
		ingredients: vec![
			Ingredient {
				quantity: Some(2.0),
				unit: "kg".to_owned(),
				description: "flour".to_owned(),
			},
			Ingredient {
				quantity: None,
				unit: String::new(),
				description: "salt".to_owned(),
			},
		],
		key: None,
		bookmarked: false,
	}
}

pub fn items(prefix: &str, n: usize) -> Vec<SearchResultItem> {
	(0..n)
		.map(|i| SearchResultItem {
			id: format!("{}{}", prefix, i),
			title: format!("{} result {}", prefix, i),
			publisher: "Test Kitchen".to_owned(),
			image: String::new(),
			key: None,
		})
		.collect()
}

pub fn upload_form(ingredients: &[(&str, &str)]) -> Vec<(String, String)> {
	[
		("title", "Test pasta"),
		("sourceUrl", "https://example.com/pasta"),
		("image", "https://example.com/pasta.jpg"),
		("publisher", "Me"),
		("cookingTime", "20"),
		("servings", "2"),
	]
	.iter()
	.chain(ingredients)
	.map(|&(k, v)| (k.to_owned(), v.to_owned()))
	.collect()
}
