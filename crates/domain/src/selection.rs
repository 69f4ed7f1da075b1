// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Multi-select values stored as a single delimited column.
//!
//! Site types and ticket categories are sets of fixed choices persisted as
//! one text column joined with `", "`. Selection order follows the order in
//! which the choices were checked.

use crate::error::DomainError;
use serde::{Serialize, Serializer};
use std::fmt::Display;
use std::str::FromStr;

/// Delimiter used when a selection is stored as text.
pub const SELECTION_DELIMITER: &str = ", ";

/// An ordered, duplicate-free set of choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T> {
    items: Vec<T>,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Copy + PartialEq> Selection<T> {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Builds a selection from items, dropping repeats.
    #[must_use]
    pub fn from_items(items: &[T]) -> Self {
        let mut selection: Self = Self::new();
        for item in items {
            selection.toggle(*item, true);
        }
        selection
    }

    /// Checks or unchecks a choice.
    ///
    /// Checking appends the choice if absent; unchecking removes it. Other
    /// choices keep their position.
    pub fn toggle(&mut self, item: T, checked: bool) {
        if checked {
            if !self.items.contains(&item) {
                self.items.push(item);
            }
        } else {
            self.items.retain(|existing| *existing != item);
        }
    }

    #[must_use]
    pub fn contains(&self, item: T) -> bool {
        self.items.contains(&item)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }
}

impl<T> Selection<T>
where
    T: Copy + PartialEq + FromStr<Err = DomainError>,
{
    /// Parses a stored selection.
    ///
    /// Entries are split on commas and trimmed; blank entries are ignored.
    ///
    /// # Errors
    ///
    /// Returns the choice's parse error for the first unknown entry.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let mut selection: Self = Self::new();
        for entry in text.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            selection.toggle(entry.parse::<T>()?, true);
        }
        Ok(selection)
    }
}

impl<T: Display> Display for Selection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                f.write_str(SELECTION_DELIMITER)?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl<T: Display> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
