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

mod lru;
pub use lru::*;

/// Keeps track of the order in which materialized pages were used and picks
/// eviction victims.
///
/// Every page index is contained at most once.
pub trait RecencyModule {
    fn new() -> Self;

    /// Marks `page` as the most recently used page.
    ///
    /// Inserts `page` if it is not tracked yet.
    fn touch(&mut self, page: usize);

    /// Stops tracking `page`, returns `true` if it was tracked.
    fn forget(&mut self, page: usize) -> bool;

    /// Removes and returns the least recently used page.
    fn pop_least_recent(&mut self) -> Option<usize>;

    /// Number of tracked pages
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stops tracking all pages.
    fn clear(&mut self);

    /// Forgets every page with an index `>= page_count`.
    fn truncate(&mut self, page_count: usize);

    /// Returns the tracked pages, least recently used first.
    fn pages(&self) -> Vec<usize>;
}
