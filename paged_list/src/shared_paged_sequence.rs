/*
 *  Copyright (C) 2025  Markus Elias Gerber
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::rc::Rc;

use try_lock::TryLock;

use crate::{
    modules::recency::{LruRecencyModule, RecencyModule},
    notification::{Notification, Subscription},
    PagedConfig, PagedSequence, PagingError,
};

/// Clonable handle to a [`PagedSequence`].
///
/// Every call locks the sequence for its whole duration. A call that arrives
/// while another one is still running (typically from inside a notification
/// callback that holds a clone of the handle) fails with
/// [`PagingError::ReentrantAccess`] instead of observing a half updated sequence.
pub struct SharedPagedSequence<T, R: RecencyModule = LruRecencyModule> {
    inner: Rc<TryLock<PagedSequence<T, R>>>,
}

impl<T, R: RecencyModule> Clone for SharedPagedSequence<T, R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + Default, R: RecencyModule> SharedPagedSequence<T, R> {
    pub fn new(config: PagedConfig) -> Result<Self, PagingError> {
        Ok(Self::from_sequence(PagedSequence::new(config)?))
    }

    pub fn from_sequence(sequence: PagedSequence<T, R>) -> Self {
        Self {
            inner: Rc::new(TryLock::new(sequence)),
        }
    }

    /// Runs `f` with exclusive access to the sequence.
    pub fn with<O, F>(&self, f: F) -> Result<O, PagingError>
    where
        F: FnOnce(&mut PagedSequence<T, R>) -> O,
    {
        let mut guard = self
            .inner
            .try_lock()
            .ok_or(PagingError::ReentrantAccess)?;

        Ok(f(&mut *guard))
    }

    /// Like [`SharedPagedSequence::with`] for operations that can fail themselves.
    fn try_with<O, F>(&self, f: F) -> Result<O, PagingError>
    where
        F: FnOnce(&mut PagedSequence<T, R>) -> Result<O, PagingError>,
    {
        self.with(f)?
    }

    pub fn len(&self) -> Result<usize, PagingError> {
        self.with(|seq| seq.len())
    }

    pub fn is_empty(&self) -> Result<bool, PagingError> {
        self.with(|seq| seq.is_empty())
    }

    pub fn subscribe<F>(&self, callback: F) -> Result<Subscription, PagingError>
    where
        F: FnMut(&Notification<'_, T>) + 'static,
    {
        self.with(|seq| seq.subscribe(callback))
    }

    pub fn get(&self, index: usize) -> Result<T, PagingError> {
        self.try_with(|seq| seq.get(index))
    }

    pub fn set(&self, index: usize, value: T) -> Result<(), PagingError> {
        self.try_with(|seq| seq.set(index, value))
    }

    pub fn add(&self, value: T) -> Result<(), PagingError> {
        self.with(|seq| seq.add(value))
    }

    pub fn insert(&self, index: usize, value: T) -> Result<(), PagingError> {
        self.try_with(|seq| seq.insert(index, value))
    }

    pub fn insert_range<I>(&self, index: usize, values: I) -> Result<(), PagingError>
    where
        I: IntoIterator<Item = T>,
    {
        self.try_with(|seq| seq.insert_range(index, values))
    }

    pub fn remove_at(&self, index: usize) -> Result<T, PagingError> {
        self.try_with(|seq| seq.remove_at(index))
    }

    pub fn remove_range(&self, index: usize, len: usize) -> Result<Vec<T>, PagingError> {
        self.try_with(|seq| seq.remove_range(index, len))
    }

    pub fn clear(&self) -> Result<(), PagingError> {
        self.with(|seq| seq.clear())
    }

    pub fn update_count(&self, count: usize, page_size: usize) -> Result<(), PagingError> {
        self.try_with(|seq| seq.update_count(count, page_size))
    }

    pub fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<(), PagingError> {
        self.try_with(|seq| seq.copy_to(dest, offset))
    }

    pub fn set_page_cache_size(&self, page_cache_size: usize) -> Result<(), PagingError> {
        self.try_with(|seq| seq.set_page_cache_size(page_cache_size))
    }
}

impl<T: Clone + Default + PartialEq, R: RecencyModule> SharedPagedSequence<T, R> {
    pub fn index_of(&self, value: &T) -> Result<Option<usize>, PagingError> {
        self.with(|seq| seq.index_of(value))
    }

    pub fn contains(&self, value: &T) -> Result<bool, PagingError> {
        self.with(|seq| seq.contains(value))
    }

    pub fn remove(&self, value: &T) -> Result<bool, PagingError> {
        self.with(|seq| seq.remove(value))
    }
}
