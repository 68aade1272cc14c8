//! Deployment settings.

use crate::model::RESULTS_PER_PAGE;
use core::time::Duration;
use serde::Deserialize;
use tracing::warn;

const MODAL_CLOSE_SECONDS: f64 = 2.5;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
	/// URL of the SVG icon sprite referenced by the templates.
	pub icons_url: String,
	/// Durable storage key of the bookmark snapshot.
	pub bookmarks_key: String,
	pub results_per_page: usize,
	/// How long the upload confirmation stays visible.
	pub modal_close_seconds: f64,
	pub recipe_error_message: String,
	pub results_error_message: String,
	pub bookmarks_error_message: String,
	pub recipe_message: String,
	pub upload_message: String,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			icons_url: "img/icons.svg".to_owned(),
			bookmarks_key: "bookmarks".to_owned(),
			results_per_page: RESULTS_PER_PAGE,
			modal_close_seconds: MODAL_CLOSE_SECONDS,
			recipe_error_message: "We could not find that recipe. Please try another one!".to_owned(),
			results_error_message: "No recipes found for your query! Please try again ;)".to_owned(),
			bookmarks_error_message: "No bookmarks yet. Find a nice recipe and bookmark it ;)".to_owned(),
			recipe_message: "Start by searching for a recipe or an ingredient. Have fun!".to_owned(),
			upload_message: "Recipe was successfully uploaded :)".to_owned(),
		}
	}
}

impl Config {
	/// Parses a JSON override document. Missing fields keep their defaults.
	///
	/// # Errors
	///
	/// Iff `json` is malformed or names an unknown field.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		let config: Self = serde_json::from_str(json)?;
		Ok(Self {
			results_per_page: config.results_per_page.max(1),
			..config
		})
	}

	/// [`Config::modal_close_seconds`] as a [`Duration`].
	///
	/// Negative or NaN values count as zero. Values too large for a [`Duration`] fall back to the default.
	#[must_use]
	pub fn modal_close_delay(&self) -> Duration {
		let seconds = self.modal_close_seconds.max(0.0);
		Duration::try_from_secs_f64(seconds).unwrap_or_else(|error| {
			warn!("Ignoring modalCloseSeconds = {}: {}", seconds, error);
			Duration::from_secs_f64(MODAL_CLOSE_SECONDS)
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn overrides_keep_defaults() {
		let config = Config::from_json(r#"{"iconsUrl":"/static/icons.svg","resultsPerPage":0}"#).unwrap();
		assert_eq!(config.icons_url, "/static/icons.svg");
		assert_eq!(config.results_per_page, 1);
		assert_eq!(config.bookmarks_key, "bookmarks");
		assert_eq!(config.modal_close_delay(), Duration::from_millis(2500));
	}

	#[test]
	fn out_of_range_modal_delay() {
		let huge = Config::from_json(r#"{"modalCloseSeconds":1e300}"#).unwrap();
		assert_eq!(huge.modal_close_delay(), Duration::from_millis(2500));

		let negative = Config::from_json(r#"{"modalCloseSeconds":-3}"#).unwrap();
		assert_eq!(negative.modal_close_delay(), Duration::ZERO);

		let short = Config::from_json(r#"{"modalCloseSeconds":0.5}"#).unwrap();
		assert_eq!(short.modal_close_delay(), Duration::from_millis(500));
	}

	#[test]
	fn unknown_fields_are_rejected() {
		assert!(Config::from_json(r#"{"iconUrl":"x"}"#).is_err());
	}
}
