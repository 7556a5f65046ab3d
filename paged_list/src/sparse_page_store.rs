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

use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    page::{new_page, PageBuf},
    paged_config::check_page_size,
    PagingError,
};

struct CurrentPage<T> {
    index: usize,
    buf: PageBuf<T>,
}

/// Sparse array over the whole `usize` index space.
///
/// Pages are allocated on first access and only released again by
/// [`SparsePageStore::remove_range`] once they contain nothing but default values.
///
/// The last accessed page is kept outside of the page map so that sequential
/// access does not need a map lookup per element.
pub struct SparsePageStore<T> {
    page_size: usize,
    pages: HashMap<usize, PageBuf<T>>,
    current: Option<CurrentPage<T>>,
}

impl<T: Clone + Default + PartialEq> SparsePageStore<T> {
    pub fn new(page_size: usize) -> Result<Self, PagingError> {
        check_page_size(page_size)?;

        Ok(Self {
            page_size,
            pages: HashMap::new(),
            current: None,
        })
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of allocated pages
    pub fn page_count(&self) -> usize {
        self.pages.len() + usize::from(self.current.is_some())
    }

    pub fn contains_page(&self, page: usize) -> bool {
        self.current.as_ref().map_or(false, |curr| curr.index == page)
            || self.pages.contains_key(&page)
    }

    /// Returns the value at `index`, allocating its page if it does not exist yet.
    pub fn get(&mut self, index: usize) -> T {
        let (page, slot) = self.locate(index);
        self.page_mut(page)[slot].clone()
    }

    pub fn set(&mut self, index: usize, value: T) {
        let (page, slot) = self.locate(index);
        self.page_mut(page)[slot] = value;
    }

    /// Resets `count` values starting at `first_index` to the default value.
    ///
    /// The range has to lie within a single page. If the page only holds
    /// default values afterwards, it is released.
    pub fn remove_range(&mut self, first_index: usize, count: usize) -> Result<(), PagingError> {
        if count == 0 {
            return Ok(());
        }

        let (page, slot) = self.locate(first_index);
        if count > self.page_size - slot {
            return Err(PagingError::NotSupported {
                operation: "remove_range",
                reason: "range crosses a page boundary",
            });
        }

        let is_empty = match self.existing_page_mut(page) {
            Some(buf) => {
                for value in buf[slot..slot + count].iter_mut() {
                    *value = T::default();
                }
                let default = T::default();
                buf.iter().all(|value| *value == default)
            }
            // nothing stored there anyway
            None => return Ok(()),
        };

        if is_empty {
            // the page was made the current one above
            debug!("Releasing empty page {}", page);
            self.current = None;
        }

        Ok(())
    }

    /// Releases all pages.
    pub fn clear(&mut self) {
        self.pages.clear();
        self.current = None;
    }

    #[inline]
    fn locate(&self, index: usize) -> (usize, usize) {
        (index / self.page_size, index % self.page_size)
    }

    /// Makes `page` the current page, taking it from the map if it exists.
    fn switch_to(&mut self, page: usize) -> bool {
        if self.current.as_ref().map_or(false, |curr| curr.index == page) {
            return true;
        }

        let buf = match self.pages.remove(&page) {
            Some(buf) => buf,
            None => return false,
        };

        if let Some(prev) = self.current.replace(CurrentPage { index: page, buf }) {
            self.pages.insert(prev.index, prev.buf);
        }
        true
    }

    fn existing_page_mut(&mut self, page: usize) -> Option<&mut [T]> {
        if !self.switch_to(page) {
            return None;
        }
        self.current.as_mut().map(|curr| &mut curr.buf[..])
    }

    fn page_mut(&mut self, page: usize) -> &mut [T] {
        if !self.switch_to(page) {
            trace!("Allocating sparse page {}", page);
            let buf = new_page(self.page_size);
            if let Some(prev) = self.current.replace(CurrentPage { index: page, buf }) {
                self.pages.insert(prev.index, prev.buf);
            }
        }

        match self.current.as_mut() {
            Some(curr) => &mut curr.buf[..],
            None => unreachable!("current page was set above"),
        }
    }
}
