use forkify_dom::{
	reconcile::{patch, replace, PatchReport},
	template::{Template, ViewData},
	tree::RenderTree,
	view::View,
};
use std::cell::Cell;

fn rendered(markup: &str) -> RenderTree {
	let mut tree = RenderTree::new();
	replace(&mut tree, markup).unwrap();
	tree
}

#[test]
fn replace_discards_previous_content() {
	let mut tree = rendered("<p>old</p><p>older</p>");
	replace(&mut tree, r#"<ul><li>a</li><li class="b">b</li></ul>"#).unwrap();

	assert_eq!(tree.to_markup(), r#"<ul><li>a</li><li class="b">b</li></ul>"#);
	assert_eq!(tree.elements().len(), 3);
	assert!(tree.find_by_class("b").is_some());
}

#[test]
fn patch_writes_only_differences() {
	let mut tree = rendered(r#"<div class="card"><span class="n">4</span><span class="unit">kg</span><button data-to="5" title="more">+</button></div>"#);

	let report = patch(&mut tree, r#"<div class="card"><span class="n">8</span><span class="unit">kg</span><button data-to="9" title="more">+</button></div>"#);

	assert_eq!(
		report,
		PatchReport {
			paired: 4,
			surplus_old: 0,
			surplus_new: 0,
			text_updates: 1,
			attribute_updates: 1,
		}
	);
	assert_eq!(
		tree.to_markup(),
		r#"<div class="card"><span class="n">8</span><span class="unit">kg</span><button data-to="9" title="more">+</button></div>"#
	);
}

#[test]
fn patch_keeps_element_identity() {
	let mut tree = rendered(r#"<p class="a">1</p><p class="b">2</p>"#);
	let before = tree.elements();
	patch(&mut tree, r#"<p class="x">1</p><p class="y">3</p>"#);
	assert_eq!(tree.elements(), before);
	assert_eq!(tree.attribute(before[0], "class"), Some("x"));
	assert_eq!(tree.text_content(before[1]), "3");
}

#[test]
fn repeated_patch_is_a_no_op() {
	let mut tree = rendered(r#"<span class="n">4</span><a href="/a">go</a>"#);
	let next = r#"<span class="n">5</span><a href="/b">go</a>"#;

	assert_eq!(patch(&mut tree, next).mutations(), 2);
	let after_first = tree.clone();
	let second = patch(&mut tree, next);
	assert_eq!(second.mutations(), 0);
	assert!(second.is_aligned());
	assert_eq!(tree, after_first);
}

#[test]
fn attributes_are_never_removed() {
	let mut tree = rendered(r#"<div class="preview__link preview__link--active" data-id="1"></div>"#);
	patch(&mut tree, r#"<div class="preview__link"></div>"#);
	assert_eq!(tree.to_markup(), r#"<div class="preview__link" data-id="1"></div>"#);
}

#[test]
fn new_attributes_are_added() {
	let mut tree = rendered("<button>+</button>");
	let report = patch(&mut tree, r#"<button disabled="">+</button>"#);
	assert_eq!(report.attribute_updates, 1);
	assert_eq!(tree.to_markup(), r#"<button disabled="">+</button>"#);
}

#[test]
fn surplus_elements_are_ignored() {
	let mut tree = rendered("<li>a</li><li>b</li><li>c</li>");
	let report = patch(&mut tree, "<li>A</li>");
	assert_eq!(report.paired, 1);
	assert_eq!(report.surplus_old, 2);
	assert!(!report.is_aligned());
	assert_eq!(tree.to_markup(), "<li>A</li><li>b</li><li>c</li>");

	let report = patch(&mut tree, "<li>A</li><li>B</li><li>C</li><li>D</li>");
	assert_eq!(report.surplus_new, 1);
	assert_eq!(tree.to_markup(), "<li>A</li><li>B</li><li>C</li>");
}

#[test]
fn blank_leading_text_is_skipped() {
	let mut tree = rendered("<div>old<b>x</b></div>");
	let report = patch(&mut tree, "<div> <b>x</b></div>");
	assert_eq!(report.text_updates, 0);
	assert_eq!(tree.to_markup(), "<div>old<b>x</b></div>");
}

#[test]
fn text_update_overwrites_children() {
	let mut tree = rendered(r#"<p>Hello <b class="name">Ann</b></p>"#);
	let report = patch(&mut tree, r#"<p>Goodbye <b class="name">Ann</b></p>"#);

	assert_eq!(report.text_updates, 1);
	assert_eq!(tree.to_markup(), "<p>Goodbye Ann</p>");
	assert_eq!(tree.find_by_class("name"), None);
}

#[test]
fn text_update_with_children_settles() {
	let mut tree = rendered(r#"<p>Hello <b class="name">Ann</b></p>"#);
	let next = r#"<p>Goodbye <b class="name">Ann</b></p>"#;

	assert_eq!(patch(&mut tree, next).text_updates, 1);
	for _ in 0..2 {
		assert_eq!(patch(&mut tree, next).mutations(), 0);
	}
	assert_eq!(tree.to_markup(), "<p>Goodbye Ann</p>");
}

#[test]
fn text_after_a_child_counts_once_leading_text_is_present() {
	let mut tree = rendered("<p>Page <b>1</b> of 3</p>");
	let report = patch(&mut tree, "<p>Page <b>1</b> of 4</p>");
	assert_eq!(report.text_updates, 1);
	assert_eq!(tree.to_markup(), "<p>Page 1 of 4</p>");

	let mut tree = rendered("<p><b>1</b> of 3</p>");
	assert_eq!(patch(&mut tree, "<p><b>1</b> of 4</p>").mutations(), 0);
	assert_eq!(tree.to_markup(), "<p><b>1</b> of 3</p>");
}

#[test]
fn escaped_text_round_trips() {
	let mut tree = rendered("<p>a</p>");
	patch(&mut tree, "<p>1 &lt; 2 &amp; 3</p>");
	assert_eq!(tree.text_content(tree.elements()[0]), "1 < 2 & 3");
	assert_eq!(tree.to_markup(), "<p>1 &lt; 2 &amp; 3</p>");
}

struct Counter {
	calls: Cell<usize>,
}
impl Template for Counter {
	type Data = Vec<u32>;

	fn markup(&self, data: &Vec<u32>) -> String {
		self.calls.set(self.calls.get() + 1);
		data.iter().map(|n| format!(r#"<span class="n" data-n="{0}">{0}</span>"#, n)).collect()
	}
}

fn counter_view() -> View<RenderTree, Counter> {
	View::new(RenderTree::new(), Counter { calls: Cell::new(0) }, "icons.svg").with_error_message("Nothing here.")
}

#[test]
fn vacant_data_renders_error_without_template() {
	let mut view = counter_view();

	view.render(None);
	assert_eq!(view.target().text_content(view.target().find_by_class("error").unwrap()), "Nothing here.");

	view.render(Some(&Vec::new()));
	assert!(view.target().find_by_class("error").is_some());
	assert!(Vec::<u32>::new().is_vacant());

	assert_eq!(view.markup(&vec![1]), r#"<span class="n" data-n="1">1</span>"#);
	view.render(Some(&vec![1, 2]));
	assert_eq!(view.target().find_all_by_class("n").len(), 2);
	assert_eq!(view.target().find_by_class("error"), None);
}

#[test]
fn template_is_skipped_for_vacant_data() {
	struct Panicking;
	impl Template for Panicking {
		type Data = Vec<u32>;

		fn markup(&self, _: &Vec<u32>) -> String {
			panic!("template invoked for vacant data")
		}
	}

	let mut view = View::new(RenderTree::new(), Panicking, "icons.svg");
	view.render(None);
	view.render(Some(&Vec::new()));
	assert!(view.target().find_by_class("error").is_some());
}

#[test]
fn view_update_is_idempotent() {
	let mut view = counter_view();
	view.render(Some(&vec![1, 2, 3]));
	let before = view.target().elements();

	let report = view.update(&vec![1, 5, 3]);
	assert_eq!(report.mutations(), 2);
	assert_eq!(view.update(&vec![1, 5, 3]).mutations(), 0);
	assert_eq!(view.target().elements(), before);
	assert_eq!(view.target().text_content(before[1]), "5");
	assert_eq!(view.target().attribute(before[1], "data-n"), Some("5"));
}

#[test]
fn spinner_and_message_panels() {
	let mut view = counter_view().with_message("Welcome!");
	view.render_spinner();
	assert!(view.target().find_by_class("spinner").is_some());
	assert!(view.target().to_markup().contains("icons.svg#icon-loader"));

	view.render_message(None);
	assert_eq!(view.target().find_by_class("spinner"), None);
	assert_eq!(view.target().text_content(view.target().find_by_class("message").unwrap()), "Welcome!");

	view.render_error(Some("<b>Oops</b>"));
	assert_eq!(view.target().text_content(view.target().find_by_class("error").unwrap()), "<b>Oops</b>");
}
