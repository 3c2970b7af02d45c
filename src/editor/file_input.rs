// SPDX-License-Identifier: MPL-2.0
//! File input state.
//!
//! Models a host file input: selecting the value it already holds fires no
//! change, so the controller clears it on reset to let the same file load
//! again.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInput {
    value: Option<PathBuf>,
}

impl FileInput {
    #[must_use]
    pub fn value(&self) -> Option<&Path> {
        self.value.as_deref()
    }

    /// Stores `path` and reports whether the value changed.
    pub fn select(&mut self, path: PathBuf) -> bool {
        if self.value.as_ref() == Some(&path) {
            return false;
        }
        self.value = Some(path);
        true
    }

    /// Whether `path` is the current selection.
    #[must_use]
    pub fn holds(&self, path: &Path) -> bool {
        self.value.as_deref() == Some(path)
    }

    pub fn clear(&mut self) {
        self.value = None;
    }
}
