//! Markup templates: pure functions from data to markup.
//!
//! All interpolated text and attribute values are escaped.

use crate::{
	model::{Recipe, SearchResultItem, SearchState},
	pagination::{self, Direction},
	tree::escape,
};

/// Data a view can render.
pub trait ViewData {
	/// Vacant data (an empty sequence) is rendered as an error instead.
	fn is_vacant(&self) -> bool {
		false
	}
}
impl ViewData for Recipe {}
impl ViewData for SearchState {}
impl ViewData for () {}
impl<T> ViewData for [T] {
	fn is_vacant(&self) -> bool {
		self.is_empty()
	}
}
impl<T> ViewData for Vec<T> {
	fn is_vacant(&self) -> bool {
		self.is_empty()
	}
}

/// Turns data into markup. Must be deterministic.
pub trait Template {
	type Data: ?Sized + ViewData;

	fn markup(&self, data: &Self::Data) -> String;
}

/// `{icons}#icon-{name}`
#[must_use]
pub fn icon(icons: &str, name: &str) -> String {
	escape(&format!("{}#icon-{}", icons, name))
}

/// Formats an ingredient quantity as a (mixed) fraction where one is close, otherwise with up to two decimals.
#[must_use]
pub fn format_quantity(quantity: f64) -> String {
	let whole = quantity.trunc();
	let fraction = quantity - whole;
	if fraction.abs() < 1e-6 {
		return format!("{}", whole);
	}
	for denominator in [2.0_f64, 3.0, 4.0, 8.0] {
		let numerator = (fraction * denominator).round();
		if numerator > 0.0 && numerator < denominator && (numerator / denominator - fraction).abs() < 0.01 {
			return if whole == 0.0 {
				format!("{}/{}", numerator, denominator)
			} else {
				format!("{} {}/{}", whole, numerator, denominator)
			};
		}
	}
	format!("{}", (quantity * 100.0).round() / 100.0)
}

#[derive(Debug, Clone)]
pub struct RecipeTemplate {
	pub icons: String,
}
impl Template for RecipeTemplate {
	type Data = Recipe;

	fn markup(&self, recipe: &Recipe) -> String {
		let icons = self.icons.as_str();
		let ingredients: String = recipe
			.ingredients
			.iter()
			.map(|ingredient| {
				format!(
					r#"<li class="recipe__ingredient"><svg class="recipe__icon"><use href="{check}"></use></svg><div class="recipe__quantity">{quantity}</div><div class="recipe__description"><span class="recipe__unit">{unit}</span> {description}</div></li>"#,
					check = icon(icons, "check"),
					quantity = ingredient.quantity.map(format_quantity).unwrap_or_default(),
					unit = escape(&ingredient.unit),
					description = escape(&ingredient.description),
				)
			})
			.collect();

		format!(
			r#"<figure class="recipe__fig"><img src="{image}" alt="{title}" class="recipe__img"><h1 class="recipe__title"><span>{title}</span></h1></figure>
<div class="recipe__details">
<div class="recipe__info"><svg class="recipe__info-icon"><use href="{clock}"></use></svg><span class="recipe__info-data recipe__info-data--minutes">{cooking_time}</span><span class="recipe__info-text">minutes</span></div>
<div class="recipe__info"><svg class="recipe__info-icon"><use href="{user}"></use></svg><span class="recipe__info-data recipe__info-data--people">{servings}</span><span class="recipe__info-text">servings</span>
<div class="recipe__info-buttons"><button class="btn--tiny btn--update-servings" data-update-to="{fewer}"><svg><use href="{minus}"></use></svg></button><button class="btn--tiny btn--update-servings" data-update-to="{more}"><svg><use href="{plus}"></use></svg></button></div></div>
<div class="{user_generated}"><svg><use href="{user}"></use></svg></div>
<button class="btn--round btn--bookmark"><svg><use href="{bookmark}"></use></svg></button>
</div>
<div class="recipe__ingredients"><h2 class="heading--2">Recipe ingredients</h2><ul class="recipe__ingredient-list">{ingredients}</ul></div>
<div class="recipe__directions"><h2 class="heading--2">How to cook it</h2><p class="recipe__directions-text">This recipe was carefully designed and tested by <span class="recipe__publisher">{publisher}</span>. Please check out directions at their website.</p><a class="btn--small recipe__btn" href="{source_url}" target="_blank"><span>Directions</span><svg class="search__icon"><use href="{arrow}"></use></svg></a></div>"#,
			image = escape(&recipe.image),
			title = escape(&recipe.title),
			clock = icon(icons, "clock"),
			cooking_time = recipe.cooking_time,
			user = icon(icons, "user"),
			servings = recipe.servings,
			fewer = recipe.servings.saturating_sub(1),
			minus = icon(icons, "minus-circle"),
			more = recipe.servings.saturating_add(1),
			plus = icon(icons, "plus-circle"),
			user_generated = if recipe.key.is_some() { "recipe__user-generated" } else { "recipe__user-generated hidden" },
			bookmark = icon(icons, if recipe.bookmarked { "bookmark-fill" } else { "bookmark" }),
			ingredients = ingredients,
			publisher = escape(&recipe.publisher),
			source_url = escape(&recipe.source_url),
			arrow = icon(icons, "arrow-right"),
		)
	}
}

/// Search results or bookmarks, with the currently shown recipe highlighted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Previews {
	pub items: Vec<SearchResultItem>,
	pub active: Option<String>,
}
impl ViewData for Previews {
	fn is_vacant(&self) -> bool {
		self.items.is_empty()
	}
}

#[derive(Debug, Clone)]
pub struct PreviewTemplate {
	pub icons: String,
}
impl Template for PreviewTemplate {
	type Data = Previews;

	fn markup(&self, previews: &Previews) -> String {
		let user = icon(&self.icons, "user");
		previews
			.items
			.iter()
			.map(|item| {
				let active = previews.active.as_deref() == Some(item.id.as_str());
				format!(
					r##"<li class="preview"><a class="{link_class}" href="#{id}"><figure class="preview__fig"><img src="{image}" alt="{title}"></figure><div class="preview__data"><h4 class="preview__title">{title}</h4><p class="preview__publisher">{publisher}</p><div class="{user_generated}"><svg><use href="{user}"></use></svg></div></div></a></li>"##,
					link_class = if active { "preview__link preview__link--active" } else { "preview__link" },
					id = escape(&item.id),
					image = escape(&item.image),
					title = escape(&item.title),
					publisher = escape(&item.publisher),
					user_generated = if item.key.is_some() { "preview__user-generated" } else { "preview__user-generated hidden" },
					user = user,
				)
			})
			.collect()
	}
}

#[derive(Debug, Clone)]
pub struct PaginationTemplate {
	pub icons: String,
}
impl Template for PaginationTemplate {
	type Data = SearchState;

	fn markup(&self, search: &SearchState) -> String {
		let total = pagination::page_count(search.results.len(), search.results_per_page);
		pagination::buttons(search.page, total)
			.into_iter()
			.map(|button| match button.direction {
				Direction::Prev => format!(
					r#"<button data-goto="{page}" class="btn--inline pagination__btn--prev"><svg class="search__icon"><use href="{arrow}"></use></svg><span>Page {page}</span></button>"#,
					page = button.page,
					arrow = icon(&self.icons, "arrow-left"),
				),
				Direction::Next => format!(
					r#"<button data-goto="{page}" class="btn--inline pagination__btn--next"><span>Page {page}</span><svg class="search__icon"><use href="{arrow}"></use></svg></button>"#,
					page = button.page,
					arrow = icon(&self.icons, "arrow-right"),
				),
			})
			.collect()
	}
}

/// Number of blank ingredient rows in the upload form.
pub const UPLOAD_INGREDIENT_ROWS: usize = 6;

/// The blank upload form.
#[derive(Debug, Clone)]
pub struct UploadFormTemplate {
	pub icons: String,
}
impl Template for UploadFormTemplate {
	type Data = ();

	fn markup(&self, _: &()) -> String {
		let mut markup = String::from(
			r#"<div class="upload__column"><h3 class="upload__heading">Recipe data</h3><label>Title</label><input required name="title" type="text"><label>URL</label><input required name="sourceUrl" type="text"><label>Image URL</label><input required name="image" type="text"><label>Publisher</label><input required name="publisher" type="text"><label>Prep time</label><input required name="cookingTime" type="number"><label>Servings</label><input required name="servings" type="number"></div><div class="upload__column"><h3 class="upload__heading">Ingredients</h3>"#,
		);
		for n in 1..=UPLOAD_INGREDIENT_ROWS {
			markup.push_str(&format!(
				r#"<label>Ingredient {n}</label><input type="text" name="ingredient-{n}" placeholder="Format: 'Quantity,Unit,Description'">"#,
				n = n,
			));
		}
		markup.push_str(&format!(
			r#"</div><button class="btn upload__btn"><svg><use href="{upload}"></use></svg><span>Upload</span></button>"#,
			upload = icon(&self.icons, "upload-cloud"),
		));
		markup
	}
}
