//! Durable storage for the bookmark snapshot.

use crate::{config::Config, error::StorageError};
use std::{cell::RefCell, rc::Rc};
use tracing::{instrument, trace};

/// A single durable record.
pub trait BookmarkStorage {
	/// # Errors
	///
	/// Iff the storage couldn't be read. A missing record is `Ok(None)`.
	fn load(&self) -> Result<Option<String>, StorageError>;

	/// Overwrites the record.
	///
	/// # Errors
	///
	/// Iff the write was rejected. The previous record stays in place in that case.
	fn save(&self, snapshot: &str) -> Result<(), StorageError>;
}

/// In-memory record. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage(Rc<RefCell<Option<String>>>);
impl MemoryStorage {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_record(record: impl Into<String>) -> Self {
		Self(Rc::new(RefCell::new(Some(record.into()))))
	}

	#[must_use]
	pub fn record(&self) -> Option<String> {
		self.0.borrow().clone()
	}
}
impl BookmarkStorage for MemoryStorage {
	fn load(&self) -> Result<Option<String>, StorageError> {
		Ok(self.record())
	}

	fn save(&self, snapshot: &str) -> Result<(), StorageError> {
		*self.0.borrow_mut() = Some(snapshot.to_owned());
		Ok(())
	}
}

/// [***localStorage***](https://developer.mozilla.org/en-US/docs/Web/API/Window/localStorage) under a fixed key.
#[derive(Debug, Clone)]
pub struct LocalStorage {
	storage: web_sys::Storage,
	key: String,
}
impl LocalStorage {
	/// # Errors
	///
	/// [`StorageError::Unavailable`] outside a browser window or if storage access is denied.
	pub fn new(key: impl Into<String>) -> Result<Self, StorageError> {
		let storage = web_sys::window().ok_or(StorageError::Unavailable)?.local_storage().ok().flatten().ok_or(StorageError::Unavailable)?;
		Ok(Self { storage, key: key.into() })
	}

	/// Storage under [`Config::bookmarks_key`].
	///
	/// # Errors
	///
	/// See [`LocalStorage::new`].
	pub fn for_config(config: &Config) -> Result<Self, StorageError> {
		Self::new(config.bookmarks_key.as_str())
	}
}
impl BookmarkStorage for LocalStorage {
	#[instrument]
	fn load(&self) -> Result<Option<String>, StorageError> {
		self.storage.get_item(&self.key).map_err(|_| StorageError::Unavailable)
	}

	#[instrument(skip(snapshot))]
	fn save(&self, snapshot: &str) -> Result<(), StorageError> {
		self.storage.set_item(&self.key, snapshot).map_err(|error| StorageError::Write(format!("{:?}", error)))?;
		trace!("Saved {} byte(s).", snapshot.len());
		Ok(())
	}
}
