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

mod shift;

#[cfg(test)]
mod test;

use core::fmt;

use log::{debug, trace};

use crate::{
    modules::recency::{LruRecencyModule, RecencyModule},
    notification::{CollectionChange, Notification, NotificationHub, PropertyChange, Subscription},
    page::PageSlot,
    paged_config::{check_page_cache_size, check_page_size},
    util::div_ceil,
    PagedConfig, PagingError,
};

/// A randomly indexable sequence that only keeps a bounded number of pages in memory.
///
/// The logical sequence is split into pages of `page_size` slots. A page is
/// only allocated on the first write to one of its slots, until then (and
/// after it was evicted) all of its slots read as `T::default()`.
///
/// If a page cache size is configured, the least recently used page is
/// discarded as soon as more pages are materialized than allowed.
///
/// All mutating calls notify the listeners registered with [`PagedSequence::subscribe`].
pub struct PagedSequence<T, R: RecencyModule = LruRecencyModule> {
    count: usize,
    page_size: usize,
    pages: Vec<PageSlot<T>>,
    page_cache_size: Option<usize>,

    /// number of materialized entries in `pages`
    resident_pages: usize,

    recency: R,
    listeners: NotificationHub<T>,
}

impl<T: Clone + Default, R: RecencyModule> PagedSequence<T, R> {
    pub fn new(config: PagedConfig) -> Result<Self, PagingError> {
        config.validate()?;

        Ok(Self {
            count: 0,
            page_size: config.page_size,
            pages: Vec::new(),
            page_cache_size: config.page_cache_size,
            resident_pages: 0,
            recency: R::new(),
            listeners: NotificationHub::new(),
        })
    }

    /// Shortcut for an unbounded sequence with the given page size
    pub fn with_page_size(page_size: usize) -> Result<Self, PagingError> {
        Self::new(PagedConfig {
            page_size,
            ..PagedConfig::default()
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of entries in the page table, always `ceil(len / page_size)`
    #[inline]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// `None` if the number of materialized pages is unbounded
    #[inline]
    pub fn page_cache_size(&self) -> Option<usize> {
        self.page_cache_size
    }

    #[inline]
    pub fn materialized_page_count(&self) -> usize {
        self.resident_pages
    }

    pub fn is_page_materialized(&self, page: usize) -> bool {
        self.pages
            .get(page)
            .map_or(false, PageSlot::is_materialized)
    }

    /// Limits the number of materialized pages.
    ///
    /// Already materialized pages are not evicted right away, this only happens
    /// with the next access that touches a page.
    pub fn set_page_cache_size(&mut self, page_cache_size: usize) -> Result<(), PagingError> {
        check_page_cache_size(page_cache_size)?;
        self.page_cache_size = Some(page_cache_size);
        Ok(())
    }

    /// Removes the page cache limit again.
    pub fn clear_page_cache_size(&mut self) {
        self.page_cache_size = None;
    }

    /// Registers a listener that is called synchronously for every change.
    ///
    /// The listener stays registered as long as the returned [`Subscription`] is alive.
    pub fn subscribe<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(&Notification<'_, T>) + 'static,
    {
        self.listeners.subscribe(callback)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.listener_count()
    }

    /// Returns the element at `index`.
    ///
    /// Elements of absent pages are returned as `T::default()` placeholders
    /// without materializing the page. Reading a materialized page marks it
    /// as most recently used.
    pub fn get(&mut self, index: usize) -> Result<T, PagingError> {
        PagingError::check_index(index, self.count)?;
        let (page, slot) = self.locate(index);

        let value = match self.pages[page].as_slice() {
            Some(buf) => buf[slot].clone(),
            None => return Ok(T::default()),
        };

        self.touch(page);
        Ok(value)
    }

    /// Replaces the element at `index`, materializing its page if needed.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), PagingError> {
        PagingError::check_index(index, self.count)?;

        self.replace_and_notify(index, value);
        self.listeners.property_changed(PropertyChange::Indexer);
        Ok(())
    }

    /// Appends `value` at the end of the sequence.
    pub fn add(&mut self, value: T) {
        let index = self.count;
        self.grow(1);

        self.listeners.collection_changed(CollectionChange::Insert {
            index,
            value: &value,
        });
        self.replace_and_notify(index, value);
        self.listeners.size_changed();
    }

    /// Inserts `value` at `index` (`0 <= index <= len`), shifting all
    /// following elements one slot to the right.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), PagingError> {
        self.insert_range(index, [value])
    }

    /// Inserts `values` starting at `index`.
    ///
    /// At most `page_size` values can be inserted per call.
    pub fn insert_range<I>(&mut self, index: usize, values: I) -> Result<(), PagingError>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();

        if index > self.count {
            return Err(PagingError::IndexOutOfRange {
                index,
                len: self.count,
            });
        }
        if values.len() > self.page_size {
            return Err(PagingError::NotSupported {
                operation: "insert_range",
                reason: "cannot shift by more than one page at once",
            });
        }
        if values.is_empty() {
            return Ok(());
        }

        let shift = values.len();
        let old_count = self.count;
        self.grow(shift);

        let shifted_pages = self.shift_right(index, shift, old_count);

        let mut written_pages = Vec::with_capacity(2);
        for (i, value) in values.iter().enumerate() {
            let (page, slot) = self.locate(index + i);
            let (buf, allocated) = self.pages[page].materialize(self.page_size);
            buf[slot] = value.clone();
            if allocated {
                self.resident_pages += 1;
            }
            written_pages.push(page);
        }

        // the written pages end up as the most recently used ones
        self.touch_all(shifted_pages, written_pages);

        for (i, value) in values.iter().enumerate() {
            self.listeners.collection_changed(CollectionChange::Insert {
                index: index + i,
                value,
            });
        }
        self.listeners.size_changed();

        Ok(())
    }

    /// Removes and returns the element at `index`, shifting all following
    /// elements one slot to the left.
    pub fn remove_at(&mut self, index: usize) -> Result<T, PagingError> {
        PagingError::check_index(index, self.count)?;

        let mut removed = self.remove_range_inner(index, 1);
        let value = removed.pop().unwrap_or_default();

        self.listeners.collection_changed(CollectionChange::Remove {
            index,
            value: &value,
        });
        self.listeners.size_changed();

        Ok(value)
    }

    /// Removes `len` elements starting at `index` and returns them.
    ///
    /// At most `page_size` elements can be removed per call.
    pub fn remove_range(&mut self, index: usize, len: usize) -> Result<Vec<T>, PagingError> {
        if index > self.count {
            return Err(PagingError::IndexOutOfRange {
                index,
                len: self.count,
            });
        }
        if len > self.page_size {
            return Err(PagingError::NotSupported {
                operation: "remove_range",
                reason: "cannot shift by more than one page at once",
            });
        }
        if len == 0 {
            return Ok(Vec::new());
        }
        PagingError::check_index(index + len - 1, self.count)?;

        let removed = self.remove_range_inner(index, len);

        for value in removed.iter() {
            // every removal shifts the next one to the same index
            self.listeners
                .collection_changed(CollectionChange::Remove { index, value });
        }
        self.listeners.size_changed();

        Ok(removed)
    }

    /// Resets the sequence to zero elements and drops all pages.
    pub fn clear(&mut self) {
        self.count = 0;
        self.drop_all_pages();

        self.listeners.collection_changed(CollectionChange::Reset);
        self.listeners.size_changed();
    }

    /// Changes the logical size and the page size.
    ///
    /// Materialized pages are kept (by page index) if `page_size` stays the
    /// same. Changing the page size discards all of them.
    pub fn update_count(&mut self, count: usize, page_size: usize) -> Result<(), PagingError> {
        check_page_size(page_size)?;

        if page_size != self.page_size {
            debug!(
                "Page size changes from {} to {}, discarding {} materialized page(s)",
                self.page_size, page_size, self.resident_pages
            );

            self.drop_all_pages();
            self.page_size = page_size;
        } else if count < self.count {
            self.truncate_pages(div_ceil(count, page_size));
            self.reset_tail(count);
        }

        self.count = count;
        self.pages
            .resize_with(div_ceil(count, page_size), || PageSlot::Absent);

        debug!(
            "Updated count to {} ({} page(s) of size {})",
            count,
            self.pages.len(),
            page_size
        );

        self.listeners.collection_changed(CollectionChange::Reset);
        self.listeners.size_changed();
        Ok(())
    }

    /// Copies all elements to `dest[offset..offset + len]`.
    ///
    /// Absent pages contribute placeholders, no page is materialized or touched.
    pub fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<(), PagingError> {
        let fits = offset
            .checked_add(self.count)
            .map_or(false, |end| end <= dest.len());
        if !fits {
            return Err(PagingError::DestinationOutOfRange {
                offset,
                required: self.count,
                available: dest.len(),
            });
        }

        for (target, value) in dest[offset..offset + self.count].iter_mut().zip(self.iter()) {
            *target = value;
        }

        Ok(())
    }

    /// Iterates over all elements without touching any page.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.count).map(move |index| self.peek(index))
    }

    /// Element at `index` (which has to be valid) without touching its page
    pub(crate) fn peek(&self, index: usize) -> T {
        let (page, slot) = self.locate(index);
        self.pages[page]
            .as_slice()
            .map_or_else(T::default, |buf| buf[slot].clone())
    }

    #[inline]
    fn locate(&self, index: usize) -> (usize, usize) {
        (index / self.page_size, index % self.page_size)
    }

    /// Writes `value` to `index` and notifies about the replacement.
    fn replace_and_notify(&mut self, index: usize, value: T) {
        let (page, slot) = self.locate(index);

        let (buf, allocated) = self.pages[page].materialize(self.page_size);
        let old = core::mem::replace(&mut buf[slot], value.clone());
        if allocated {
            trace!("Materialized page {}", page);
            self.resident_pages += 1;
        }

        self.touch(page);

        self.listeners.collection_changed(CollectionChange::Replace {
            index,
            old: &old,
            new: &value,
        });
    }

    fn grow(&mut self, additional: usize) {
        self.count += additional;
        self.pages
            .resize_with(div_ceil(self.count, self.page_size), || PageSlot::Absent);
    }

    /// Marks `page` as most recently used and evicts pages if there are too many.
    fn touch(&mut self, page: usize) {
        self.recency.touch(page);
        self.enforce_page_cache_size();
    }

    /// Touches the materialized pages of `shifted` in ascending order, then
    /// those of `written`, and evicts pages if there are too many.
    fn touch_all(&mut self, shifted: Vec<usize>, written: Vec<usize>) {
        for mut pages in [shifted, written] {
            pages.sort_unstable();
            pages.dedup();

            for page in pages {
                if self.is_page_materialized(page) {
                    self.recency.touch(page);
                }
            }
        }
        self.enforce_page_cache_size();
    }

    fn enforce_page_cache_size(&mut self) {
        let limit = match self.page_cache_size {
            Some(limit) => limit,
            None => return,
        };

        while self.resident_pages > limit {
            let victim = match self.recency.pop_least_recent() {
                Some(victim) => victim,
                None => break,
            };

            let evicted = self
                .pages
                .get_mut(victim)
                .map_or(false, PageSlot::discard);
            if evicted {
                trace!("Evicted page {} (limit: {} page(s))", victim, limit);
                self.resident_pages -= 1;
            }
        }
    }

    fn drop_all_pages(&mut self) {
        self.pages.clear();
        self.recency.clear();
        self.resident_pages = 0;
    }

    /// Shrinks the page table to `page_count` entries.
    fn truncate_pages(&mut self, page_count: usize) {
        if page_count >= self.pages.len() {
            return;
        }

        for page in self.pages.drain(page_count..) {
            if page.is_materialized() {
                self.resident_pages -= 1;
            }
        }
        self.recency.truncate(page_count);
    }

    /// Resets every slot from logical position `from` to the end of its page.
    fn reset_tail(&mut self, from: usize) {
        let (page, slot) = self.locate(from);
        if let Some(buf) = self.pages.get_mut(page).and_then(PageSlot::as_mut_slice) {
            for value in buf[slot..].iter_mut() {
                *value = T::default();
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn recency_order(&self) -> Vec<usize> {
        self.recency.pages()
    }
}

impl<T: Clone + Default + PartialEq, R: RecencyModule> PagedSequence<T, R> {
    /// Index of the first element equal to `value`.
    ///
    /// Only materialized pages are searched, placeholders of absent pages are
    /// never found.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        for (page, slot) in self.pages.iter().enumerate() {
            let buf = match slot.as_slice() {
                Some(buf) => buf,
                None => continue,
            };

            for (offset, item) in buf.iter().enumerate() {
                let index = page * self.page_size + offset;
                if index >= self.count {
                    return None;
                }
                if item == value {
                    return Some(index);
                }
            }
        }

        None
    }

    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    /// Removes the first element equal to `value`, returns `false` if there is none.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.index_of(value) {
            Some(index) => self.remove_at(index).is_ok(),
            None => false,
        }
    }
}

impl<T: Clone + Default> Default for PagedSequence<T> {
    fn default() -> Self {
        Self {
            count: 0,
            page_size: crate::paged_config::DEFAULT_PAGE_SIZE,
            pages: Vec::new(),
            page_cache_size: None,
            resident_pages: 0,
            recency: LruRecencyModule::new(),
            listeners: NotificationHub::new(),
        }
    }
}

impl<T, R: RecencyModule> fmt::Debug for PagedSequence<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedSequence")
            .field("count", &self.count)
            .field("page_size", &self.page_size)
            .field("page_count", &self.pages.len())
            .field("resident_pages", &self.resident_pages)
            .field("page_cache_size", &self.page_cache_size)
            .finish()
    }
}
