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

use thiserror::Error;

/// Errors returned by [`PagedSequence`](crate::PagedSequence),
/// [`SharedPagedSequence`](crate::SharedPagedSequence) and
/// [`SparsePageStore`](crate::SparsePageStore).
///
/// All of them are precondition violations: the call was rejected before any
/// internal state was touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PagingError {
    /// Index argument outside of `[0, len)` (or `[0, len]` for inserts).
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Destination slice of [`PagedSequence::copy_to`](crate::PagedSequence::copy_to) is too small.
    #[error("cannot copy {required} elements to offset {offset} of a slice with length {available}")]
    DestinationOutOfRange {
        offset: usize,
        required: usize,
        available: usize,
    },

    /// Invalid configuration value (zero page size, zero cache size, ...).
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },

    /// Operation outside of what the structure supports.
    #[error("{operation} is not supported: {reason}")]
    NotSupported {
        operation: &'static str,
        reason: &'static str,
    },

    /// The sequence was accessed while another call on it was still running,
    /// e.g. from inside a change notification callback.
    #[error("sequence is already in use (reentrant access from a notification callback?)")]
    ReentrantAccess,
}

impl PagingError {
    pub(crate) fn check_index(index: usize, len: usize) -> Result<(), PagingError> {
        if index < len {
            Ok(())
        } else {
            Err(PagingError::IndexOutOfRange { index, len })
        }
    }
}
