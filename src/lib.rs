#![doc(html_root_url = "https://docs.rs/forkify-dom/0.0.1")]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod api;
pub mod binding;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod pagination;
pub mod reconcile;
pub mod route;
pub mod storage;
pub mod store;
pub mod target;
pub mod template;
pub mod tree;
pub mod upload;
pub mod view;
