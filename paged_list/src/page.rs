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

/// Backing storage of a single page, always exactly `page_size` slots long.
pub(crate) type PageBuf<T> = Box<[T]>;

/// Allocates a page filled with default values.
pub(crate) fn new_page<T: Default>(page_size: usize) -> PageBuf<T> {
    (0..page_size).map(|_| T::default()).collect()
}

/// One entry of a page table.
///
/// An absent page stands for `page_size` default values.
pub(crate) enum PageSlot<T> {
    Absent,
    Materialized(PageBuf<T>),
}

impl<T> PageSlot<T> {
    #[inline]
    pub(crate) fn is_materialized(&self) -> bool {
        matches!(self, PageSlot::Materialized(_))
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> Option<&[T]> {
        match self {
            PageSlot::Absent => None,
            PageSlot::Materialized(buf) => Some(&buf[..]),
        }
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> Option<&mut [T]> {
        match self {
            PageSlot::Absent => None,
            PageSlot::Materialized(buf) => Some(&mut buf[..]),
        }
    }

    /// Drops the backing storage and returns whether there was any.
    #[inline]
    pub(crate) fn discard(&mut self) -> bool {
        let was_materialized = self.is_materialized();
        *self = PageSlot::Absent;
        was_materialized
    }
}

impl<T: Default> PageSlot<T> {
    /// Returns the backing storage, allocating it first if the page is absent.
    ///
    /// The returned flag is `true` if the page had to be allocated.
    pub(crate) fn materialize(&mut self, page_size: usize) -> (&mut [T], bool) {
        let allocated = !self.is_materialized();
        if allocated {
            *self = PageSlot::Materialized(new_page(page_size));
        }

        match self {
            PageSlot::Materialized(buf) => (&mut buf[..], allocated),
            PageSlot::Absent => unreachable!("page was materialized above"),
        }
    }
}
