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

use crate::{util::div_ceil, PagedSequence};


const SEED: u64 = 5446535461589659585;

pub(crate) fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Checks the page table against the logical size.
pub(crate) fn check_page_table<T: Clone + Default>(seq: &PagedSequence<T>) {
    assert_eq!(seq.page_count(), div_ceil(seq.len(), seq.page_size()));

    let materialized = (0..seq.page_count())
        .filter(|page| seq.is_page_materialized(*page))
        .count();
    assert_eq!(materialized, seq.materialized_page_count());

    if let Some(limit) = seq.page_cache_size() {
        assert!(
            seq.materialized_page_count() <= limit,
            "{} materialized pages exceed the limit of {}",
            seq.materialized_page_count(),
            limit
        );
    }
}
