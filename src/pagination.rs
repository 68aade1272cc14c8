//! Which page buttons to show. Recomputed on every render.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	Prev,
	Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
	pub direction: Direction,
	/// The page this button goes to.
	pub page: usize,
}
impl PageButton {
	#[must_use]
	pub fn prev(page: usize) -> Self {
		Self { direction: Direction::Prev, page }
	}

	#[must_use]
	pub fn next(page: usize) -> Self {
		Self { direction: Direction::Next, page }
	}
}

#[must_use]
pub fn page_count(results: usize, results_per_page: usize) -> usize {
	if results_per_page == 0 {
		0
	} else {
		(results + results_per_page - 1) / results_per_page
	}
}

/// Buttons for page `current` out of `total`.
///
/// A `current` page past the end only offers a way back to the last page.
#[must_use]
pub fn buttons(current: usize, total: usize) -> Vec<PageButton> {
	let current = current.max(1);
	if total <= 1 {
		Vec::new()
	} else if current == 1 {
		vec![PageButton::next(2)]
	} else if current < total {
		vec![PageButton::prev(current - 1), PageButton::next(current + 1)]
	} else if current == total {
		vec![PageButton::prev(current - 1)]
	} else {
		vec![PageButton::prev(total)]
	}
}
