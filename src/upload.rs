//! Turning raw upload form entries into a [`RecipeDraft`].

use crate::{
	error::ValidationError,
	model::{Ingredient, RecipeDraft},
};
use tracing::{instrument, trace};

const INGREDIENT_PREFIX: &str = "ingredient-";

/// Parses form entries (field name, value) into a draft.
///
/// Ingredient fields are named `ingredient-<n>` and hold `quantity,unit,description`.
/// Blank ingredient fields are skipped, a blank quantity is kept as [`None`].
///
/// # Errors
///
/// [`ValidationError`] naming the first offending field.
#[instrument(skip(entries))]
pub fn parse_draft(entries: &[(String, String)]) -> Result<RecipeDraft, ValidationError> {
	let field = |name: &'static str| -> Result<String, ValidationError> {
		entries
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.trim())
			.filter(|value| !value.is_empty())
			.map(str::to_owned)
			.ok_or(ValidationError::MissingField { field: name })
	};
	let number = |name: &'static str| -> Result<u32, ValidationError> {
		let value = field(name)?;
		match value.parse::<u32>() {
			Ok(n) if n > 0 => Ok(n),
			_ => Err(ValidationError::InvalidNumber { field: name, value }),
		}
	};

	let draft = RecipeDraft {
		title: field("title")?,
		source_url: field("sourceUrl")?,
		image: field("image")?,
		publisher: field("publisher")?,
		cooking_time: number("cookingTime")?,
		servings: number("servings")?,
		ingredients: parse_ingredients(entries)?,
	};
	trace!("Parsed draft with {} ingredient(s).", draft.ingredients.len());
	Ok(draft)
}

/// Collects `ingredient-<n>` fields in ascending `n` order.
///
/// # Errors
///
/// [`ValidationError::IngredientFormat`] if a non-blank value doesn't have exactly three comma-separated parts,
/// [`ValidationError::InvalidQuantity`] if the quantity is neither blank nor a number.
pub fn parse_ingredients(entries: &[(String, String)]) -> Result<Vec<Ingredient>, ValidationError> {
	let mut indexed: Vec<(usize, &str)> = entries
		.iter()
		.filter_map(|(key, value)| {
			let index = key.strip_prefix(INGREDIENT_PREFIX)?.parse().ok()?;
			Some((index, value.as_str()))
		})
		.filter(|(_, value)| !value.trim().is_empty())
		.collect();
	indexed.sort_by_key(|&(index, _)| index);

	indexed
		.into_iter()
		.map(|(index, value)| {
			let parts: Vec<&str> = value.split(',').map(str::trim).collect();
			let (quantity, unit, description) = match parts.as_slice() {
				&[quantity, unit, description] => (quantity, unit, description),
				_ => {
					return Err(ValidationError::IngredientFormat {
						index,
						value: value.to_owned(),
					})
				}
			};
			let quantity = if quantity.is_empty() {
				None
			} else {
				Some(parse_quantity(quantity).ok_or_else(|| ValidationError::InvalidQuantity {
					index,
					value: quantity.to_owned(),
				})?)
			};
			Ok(Ingredient {
				quantity,
				unit: unit.to_owned(),
				description: description.to_owned(),
			})
		})
		.collect()
}

/// Parses `2`, `0.5`, `1/2` or `1 1/2`.
#[must_use]
pub fn parse_quantity(quantity: &str) -> Option<f64> {
	let quantity = quantity.trim();
	let value = match quantity.split_once(' ') {
		Some((whole, fraction)) => whole.trim().parse::<f64>().ok()? + parse_fraction(fraction)?,
		None => parse_fraction(quantity).or_else(|| quantity.parse().ok())?,
	};
	if value.is_finite() && value >= 0.0 {
		Some(value)
	} else {
		None
	}
}

fn parse_fraction(s: &str) -> Option<f64> {
	let (numerator, denominator) = s.split_once('/')?;
	let numerator: f64 = numerator.trim().parse().ok()?;
	let denominator: f64 = denominator.trim().parse().ok()?;
	if denominator == 0.0 {
		return None;
	}
	Some(numerator / denominator)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn entries(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
		pairs.iter().map(|&(k, v)| (k.to_owned(), v.to_owned())).collect()
	}

	fn form(ingredients: &[(&str, &str)]) -> Vec<(String, String)> {
		let mut form = entries(&[
			("title", "Test pasta"),
			("sourceUrl", "https://example.com/pasta"),
			("image", "https://example.com/pasta.jpg"),
			("publisher", "Me"),
			("cookingTime", "20"),
			("servings", "2"),
		]);
		form.extend(entries(ingredients));
		form
	}

	#[test]
	fn three_parts_parse() {
		let ingredients = parse_ingredients(&entries(&[("ingredient-1", "2,kg,flour")])).unwrap();
		assert_eq!(
			ingredients,
			[Ingredient {
				quantity: Some(2.0),
				unit: "kg".to_owned(),
				description: "flour".to_owned(),
			}]
		);
	}

	#[test]
	fn two_parts_name_the_field() {
		let error = parse_ingredients(&entries(&[("ingredient-1", "1,,salt"), ("ingredient-3", "2,kg")])).unwrap_err();
		assert_eq!(
			error,
			ValidationError::IngredientFormat {
				index: 3,
				value: "2,kg".to_owned(),
			}
		);
		assert!(error.to_string().contains("ingredient 3"));
	}

	#[test]
	fn blank_quantity_is_absent_and_blank_fields_are_skipped() {
		let ingredients = parse_ingredients(&entries(&[("ingredient-2", " ,,salt"), ("ingredient-1", ""), ("title", "a,b")])).unwrap();
		assert_eq!(ingredients.len(), 1);
		assert_eq!(ingredients[0].quantity, None);
		assert_eq!(ingredients[0].unit, "");
		assert_eq!(ingredients[0].description, "salt");
	}

	#[test]
	fn ingredients_keep_numeric_field_order() {
		let ingredients = parse_ingredients(&entries(&[("ingredient-10", "1,,c"), ("ingredient-2", "1,,b"), ("ingredient-1", "1,,a")])).unwrap();
		let descriptions: Vec<_> = ingredients.iter().map(|i| i.description.as_str()).collect();
		assert_eq!(descriptions, ["a", "b", "c"]);
	}

	#[test]
	fn fractions() {
		assert_eq!(parse_quantity("1/2"), Some(0.5));
		assert_eq!(parse_quantity("1 1/2"), Some(1.5));
		assert_eq!(parse_quantity("0.25"), Some(0.25));
		assert_eq!(parse_quantity("a lot"), None);
		assert_eq!(parse_quantity("1/0"), None);
	}

	#[test]
	fn invalid_quantity() {
		let error = parse_ingredients(&entries(&[("ingredient-4", "some,g,sugar")])).unwrap_err();
		assert_eq!(
			error,
			ValidationError::InvalidQuantity {
				index: 4,
				value: "some".to_owned(),
			}
		);
	}

	#[test]
	fn draft_fields() {
		let draft = parse_draft(&form(&[("ingredient-1", "0.5,kg,Rice")])).unwrap();
		assert_eq!(draft.title, "Test pasta");
		assert_eq!(draft.cooking_time, 20);
		assert_eq!(draft.servings, 2);
		assert_eq!(draft.ingredients.len(), 1);
	}

	#[test]
	fn draft_rejects_bad_servings() {
		let mut form = form(&[]);
		for (key, value) in &mut form {
			if key == "servings" {
				*value = "0".to_owned();
			}
		}
		assert_eq!(
			parse_draft(&form),
			Err(ValidationError::InvalidNumber {
				field: "servings",
				value: "0".to_owned(),
			})
		);
	}
}
