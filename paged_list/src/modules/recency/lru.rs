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

use super::RecencyModule;

#[derive(Clone, Copy)]
struct Link {
    prev: Option<usize>,
    next: Option<usize>,
}

/// Recency list as a doubly linked list of page indices.
///
/// Links are stored in a map keyed by the page index, so touching, forgetting
/// and evicting a page are all O(1).
/// `head` is the least recently used page, `tail` the most recently used one.
pub struct LruRecencyModule {
    links: HashMap<usize, Link>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl LruRecencyModule {
    /// Removes `page` from the list, the caller has to make sure it is tracked.
    fn unlink(&mut self, page: usize, link: Link) {
        match link.prev {
            Some(prev) => {
                if let Some(prev_link) = self.links.get_mut(&prev) {
                    prev_link.next = link.next;
                }
            }
            None => self.head = link.next,
        }

        match link.next {
            Some(next) => {
                if let Some(next_link) = self.links.get_mut(&next) {
                    next_link.prev = link.prev;
                }
            }
            None => self.tail = link.prev,
        }

        debug_assert!(!self.links.contains_key(&page));
    }

    fn push_back(&mut self, page: usize) {
        let link = Link {
            prev: self.tail,
            next: None,
        };

        match self.tail {
            Some(tail) => {
                if let Some(tail_link) = self.links.get_mut(&tail) {
                    tail_link.next = Some(page);
                }
            }
            None => self.head = Some(page),
        }

        self.tail = Some(page);
        self.links.insert(page, link);
    }
}

impl RecencyModule for LruRecencyModule {
    fn new() -> Self {
        Self {
            links: HashMap::new(),
            head: None,
            tail: None,
        }
    }

    fn touch(&mut self, page: usize) {
        if self.tail == Some(page) {
            // already the most recently used one
            return;
        }

        if let Some(link) = self.links.remove(&page) {
            self.unlink(page, link);
        }
        self.push_back(page);
    }

    fn forget(&mut self, page: usize) -> bool {
        match self.links.remove(&page) {
            Some(link) => {
                self.unlink(page, link);
                true
            }
            None => false,
        }
    }

    fn pop_least_recent(&mut self) -> Option<usize> {
        let head = self.head?;
        self.forget(head);
        Some(head)
    }

    fn len(&self) -> usize {
        self.links.len()
    }

    fn clear(&mut self) {
        self.links.clear();
        self.head = None;
        self.tail = None;
    }

    fn truncate(&mut self, page_count: usize) {
        let dropped: Vec<usize> = self
            .links
            .keys()
            .copied()
            .filter(|page| *page >= page_count)
            .collect();

        for page in dropped {
            self.forget(page);
        }
    }

    fn pages(&self) -> Vec<usize> {
        let mut res = Vec::with_capacity(self.links.len());
        let mut curr = self.head;
        while let Some(page) = curr {
            res.push(page);
            curr = self.links.get(&page).and_then(|link| link.next);
        }
        res
    }
}
