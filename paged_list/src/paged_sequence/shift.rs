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

use core::mem::take;

use log::trace;

use super::PagedSequence;
use crate::{modules::recency::RecencyModule, page::PageSlot, util::div_ceil};

// Shifting works page by page and moves at most `page_size` elements between
// two neighbouring pages. Absent pages are only materialized if a
// materialized page hands elements over to them.

impl<T: Clone + Default, R: RecencyModule> PagedSequence<T, R> {
    /// Moves all elements of `[from, old_count)` `shift` slots to the right.
    ///
    /// The page table has to be grown already. The slots `[from, from + shift)`
    /// hold stale values afterwards and have to be overwritten by the caller.
    ///
    /// Returns the pages that had to be materialized.
    pub(super) fn shift_right(&mut self, from: usize, shift: usize, old_count: usize) -> Vec<usize> {
        debug_assert!(shift > 0 && shift <= self.page_size);
        debug_assert_eq!(self.pages.len(), div_ceil(old_count + shift, self.page_size));

        let page_size = self.page_size;
        let first_page = from / page_size;
        let last_page = self.pages.len() - 1;
        let mut new_pages = Vec::new();

        if from >= old_count {
            // appending, nothing to move
            return new_pages;
        }

        // go backwards so that the next page already made room for the carry
        for page in (first_page..=last_page).rev() {
            let lo = if page == first_page { from % page_size } else { 0 };
            let carry_start = lo.max(page_size - shift);

            let carry: Vec<T> = match self.pages[page].as_mut_slice() {
                Some(buf) => {
                    // elements that leave this page
                    let carry = buf[carry_start..].iter_mut().map(take).collect();

                    // the taken (now default) slots move to the front of the region
                    if page_size - lo > shift {
                        buf[lo..].rotate_right(shift);
                    }
                    carry
                }
                None => continue,
            };

            if page == last_page {
                // only placeholders behind the end of the sequence
                continue;
            }

            let (next, allocated) = self.pages[page + 1].materialize(page_size);
            let target = carry_start + shift - page_size;
            for (slot, value) in next[target..].iter_mut().zip(carry) {
                *slot = value;
            }

            if allocated {
                trace!("Materialized page {} while shifting right", page + 1);
                self.resident_pages += 1;
                new_pages.push(page + 1);
            }
        }

        new_pages
    }

    /// Removes `len` elements starting at `from` and moves all following
    /// elements to the left.
    ///
    /// Shrinks the sequence and its page table. Returns the removed elements.
    pub(super) fn remove_range_inner(&mut self, from: usize, len: usize) -> Vec<T> {
        debug_assert!(len > 0 && len <= self.page_size);
        debug_assert!(from + len <= self.count);

        let removed: Vec<T> = (from..from + len).map(|index| self.peek(index)).collect();

        let page_size = self.page_size;
        let first_page = from / page_size;
        let last_page = self.pages.len() - 1;
        let mut new_pages = Vec::new();

        for page in first_page..=last_page {
            let lo = if page == first_page { from % page_size } else { 0 };
            let incoming_start = lo.max(page_size - len);

            // move the remaining elements of this page to the front
            if page_size - lo > len {
                if let Some(buf) = self.pages[page].as_mut_slice() {
                    buf[lo..].rotate_left(len);
                }
            }

            // first elements of the next page fill up the end of this page
            let source_start = incoming_start + len - page_size;
            let incoming: Option<Vec<T>> = if page < last_page {
                self.pages[page + 1]
                    .as_mut_slice()
                    .map(|next| next[source_start..len].iter_mut().map(take).collect())
            } else {
                None
            };

            match incoming {
                Some(incoming) => {
                    let (buf, allocated) = self.pages[page].materialize(page_size);
                    for (slot, value) in buf[incoming_start..].iter_mut().zip(incoming) {
                        *slot = value;
                    }

                    if allocated {
                        trace!("Materialized page {} while shifting left", page);
                        self.resident_pages += 1;
                        new_pages.push(page);
                    }
                }
                None => {
                    if let Some(buf) = self.pages[page].as_mut_slice() {
                        for slot in buf[incoming_start..].iter_mut() {
                            *slot = T::default();
                        }
                    }
                }
            }
        }

        self.count -= len;
        self.truncate_pages(div_ceil(self.count, page_size));

        new_pages.retain(|page| *page < self.pages.len());
        self.touch_all(new_pages, Vec::new());

        removed
    }
}
