//! Deep links: the URL fragment carries the current recipe id.

/// The recipe id in `fragment` (with or without the leading `#`), if any.
#[must_use]
pub fn recipe_id(fragment: &str) -> Option<&str> {
	let id = fragment.strip_prefix('#').unwrap_or(fragment).trim();
	if id.is_empty() {
		None
	} else {
		Some(id)
	}
}

#[must_use]
pub fn fragment(id: &str) -> String {
	format!("#{}", id)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ids() {
		assert_eq!(recipe_id("#5ed6604591c37cdc054bc886"), Some("5ed6604591c37cdc054bc886"));
		assert_eq!(recipe_id("abc"), Some("abc"));
		assert_eq!(recipe_id("#"), None);
		assert_eq!(recipe_id(""), None);
		assert_eq!(recipe_id(&fragment("x1")), Some("x1"));
	}
}
