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

use static_assertions::const_assert;

use crate::PagingError;

/// Number of slots per page if nothing else is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

const_assert!(DEFAULT_PAGE_SIZE > 0);

/// Construction time configuration of a [`PagedSequence`](crate::PagedSequence).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagedConfig {
    /// Number of logical slots per page, has to be greater than zero.
    pub page_size: usize,

    /// Maximum number of materialized pages kept at once.
    ///
    /// `None` means unbounded. `Some(0)` is rejected.
    pub page_cache_size: Option<usize>,
}

impl Default for PagedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_cache_size: None,
        }
    }
}

impl PagedConfig {
    pub(crate) fn validate(&self) -> Result<(), PagingError> {
        check_page_size(self.page_size)?;
        if let Some(size) = self.page_cache_size {
            check_page_cache_size(size)?;
        }
        Ok(())
    }
}

pub(crate) fn check_page_size(page_size: usize) -> Result<(), PagingError> {
    if page_size == 0 {
        return Err(PagingError::InvalidArgument {
            name: "page_size",
            reason: "has to be greater than zero",
        });
    }
    Ok(())
}

pub(crate) fn check_page_cache_size(page_cache_size: usize) -> Result<(), PagingError> {
    if page_cache_size == 0 {
        return Err(PagingError::InvalidArgument {
            name: "page_cache_size",
            reason: "has to be greater than zero",
        });
    }
    Ok(())
}
