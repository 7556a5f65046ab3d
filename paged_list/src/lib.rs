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

mod error;
mod notification;
mod page;
mod paged_config;
mod paged_sequence;
mod shared_paged_sequence;
mod sparse_page_store;
mod util;

#[cfg(test)]
mod test;

#[cfg(feature = "benchmarks")]
pub mod benchmarks;

pub mod modules;

pub use error::PagingError;
pub use notification::{CollectionChange, Notification, PropertyChange, Subscription};
pub use paged_config::{PagedConfig, DEFAULT_PAGE_SIZE};
pub use paged_sequence::PagedSequence;
pub use shared_paged_sequence::SharedPagedSequence;
pub use sparse_page_store::SparsePageStore;
