// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Unsubmitted form values kept in local storage.
//!
//! Each form owns one key, `form-draft-<action-or-path>`, whose value is a
//! JSON object mapping field names to their last entered values.

use std::collections::BTreeMap;
use tracing::debug;
use tracker_app::target_path;

use crate::{Storage, StorageError};

pub const DRAFT_KEY_PREFIX: &str = "form-draft-";

pub type Draft = BTreeMap<String, String>;

/// Storage key for a form. The form's action target wins; forms without one
/// fall back to the page path. Query strings are dropped so a draft survives
/// `?user_id=` style links.
pub fn draft_key(action: Option<&str>, page_path: &str) -> String {
    let target = action
        .map(str::trim)
        .filter(|action| !action.is_empty())
        .unwrap_or(page_path);
    let path = target_path(target).unwrap_or_else(|| target.to_owned());
    format!("{DRAFT_KEY_PREFIX}{path}")
}

pub struct DraftStore<S> {
    storage: S,
}

impl<S: Storage> DraftStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    pub fn save(&mut self, key: &str, draft: &Draft) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(draft).unwrap_or_else(|_| "{}".to_owned());
        self.storage.set_item(key, &encoded)
    }

    /// Stored draft for `key`. Values that are not a JSON object of strings
    /// are treated as absent.
    pub fn load(&self, key: &str) -> Result<Option<Draft>, StorageError> {
        let Some(raw) = self.storage.get_item(key)? else {
            return Ok(None);
        };
        match serde_json::from_str::<Draft>(&raw) {
            Ok(draft) => Ok(Some(draft)),
            Err(error) => {
                debug!(key, %error, "ignoring unreadable draft");
                Ok(None)
            }
        }
    }

    pub fn clear(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key)
    }

    /// Keys of every stored draft, sorted.
    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys: Vec<String> = self
            .storage
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(DRAFT_KEY_PREFIX))
            .collect();
        keys.sort();
        Ok(keys)
    }
}
