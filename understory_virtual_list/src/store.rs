// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Append-only item storage with lazy, page-at-a-time growth.

use alloc::vec::Vec;

use log::debug;

use crate::Scalar;

/// Outcome of a growth request against a [`PagedStore`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Growth {
    /// The tail was far enough away; nothing was fetched.
    #[default]
    NotNeeded,
    /// A full page was fetched and appended.
    Grew {
        /// Number of items appended.
        appended: usize,
    },
    /// The fetch returned fewer items than requested: the source is exhausted
    /// for the current tail.
    Exhausted {
        /// Number of items appended before exhaustion (possibly zero).
        appended: usize,
    },
    /// Growth was needed, but exhaustion was already observed for this tail,
    /// so no fetch was issued.
    AlreadyExhausted,
}

impl Growth {
    /// Returns the number of items appended by this request.
    #[must_use]
    pub fn appended(self) -> usize {
        match self {
            Self::Grew { appended } | Self::Exhausted { appended } => appended,
            Self::NotNeeded | Self::AlreadyExhausted => 0,
        }
    }

    /// Returns `true` if a page fetch was issued.
    #[must_use]
    pub fn fetched(self) -> bool {
        matches!(self, Self::Grew { .. } | Self::Exhausted { .. })
    }
}

/// Ordered, append-only sequence of items addressed by index.
///
/// Items are never removed, replaced, or reordered, so an index stays valid
/// for the lifetime of the store. Growth happens through page fetches (see
/// [`PagedStore::grow_if_needed`]) or direct [`PagedStore::append`] calls.
///
/// When a fetch returns fewer items than requested, the store remembers the
/// tail length at which that happened and suppresses further growth requests
/// until the tail changes (through [`PagedStore::append`]) or
/// [`PagedStore::reset_exhaustion`] is called.
#[derive(Clone, Debug)]
pub struct PagedStore<T> {
    items: Vec<T>,
    exhausted_at: Option<usize>,
}

impl<T> Default for PagedStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PagedStore<T> {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            exhausted_at: None,
        }
    }

    /// Returns the number of loaded items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been loaded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at `index`, if loaded.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Returns all loaded items in index order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Iterates over loaded items in index order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns `true` if exhaustion was observed for the current tail.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted_at == Some(self.items.len())
    }

    /// Forgets any observed exhaustion so the next growth request fetches again.
    pub fn reset_exhaustion(&mut self) {
        self.exhausted_at = None;
    }

    /// Appends `items` to the tail and returns how many were appended.
    pub fn append(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        let before = self.items.len();
        self.items.extend(items);
        self.items.len() - before
    }

    /// Fetches one page of `page_size` items and appends it.
    ///
    /// A short page marks the current tail as exhausted. Errors from `fetch`
    /// propagate unchanged and leave the store untouched.
    pub fn fetch_page<E>(
        &mut self,
        page_size: usize,
        fetch: impl FnOnce(usize) -> Result<Vec<T>, E>,
    ) -> Result<Growth, E> {
        let page = fetch(page_size)?;
        let appended = self.append(page);
        if appended < page_size {
            self.exhausted_at = Some(self.items.len());
            debug!(
                "paged store exhausted at {} items ({appended} of {page_size} returned)",
                self.items.len()
            );
            Ok(Growth::Exhausted { appended })
        } else {
            debug!("paged store grew to {} items", self.items.len());
            Ok(Growth::Grew { appended })
        }
    }

    /// Fetches one page when `distance_to_end < threshold`.
    ///
    /// Returns [`Growth::AlreadyExhausted`] without calling `fetch` when
    /// exhaustion was already observed for the current tail.
    pub fn grow_if_needed<S: Scalar, E>(
        &mut self,
        distance_to_end: S,
        threshold: S,
        page_size: usize,
        fetch: impl FnOnce(usize) -> Result<Vec<T>, E>,
    ) -> Result<Growth, E> {
        let near_tail = distance_to_end < threshold;
        if !near_tail {
            return Ok(Growth::NotNeeded);
        }
        if self.is_exhausted() {
            return Ok(Growth::AlreadyExhausted);
        }
        self.fetch_page(page_size, fetch)
    }
}

impl<'a, T> IntoIterator for &'a PagedStore<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
