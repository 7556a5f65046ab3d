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

use log::info;
use paged_list::{CollectionChange, Notification, PagedConfig, PagedSequence, PagingError, SparsePageStore};

fn main() -> Result<(), PagingError> {
    use env_logger::{Builder, Env};
    Builder::from_env(Env::default())
        .filter_level(log::LevelFilter::Trace)
        .format_module_path(false)
        .init();

    // a list of one million rows, but at most 3 pages of 100 rows are kept
    let mut rows: PagedSequence<u64> = PagedSequence::new(PagedConfig {
        page_size: 100,
        page_cache_size: Some(3),
    })?;
    rows.update_count(1_000_000, 100)?;

    let _subscription = rows.subscribe(|n| {
        if let Notification::Collection(CollectionChange::Replace { index, old, new }) = n {
            info!("row {} changed from {} to {}", index, old, new);
        }
    });

    for row in [10, 250, 999_999, 420_000] {
        rows.set(row, row as u64 * 2)?;
    }
    println!(
        "{} of {} pages are materialized",
        rows.materialized_page_count(),
        rows.page_count()
    );

    // row 10 lived on the least recently used page, it was evicted
    println!("row 10: {}", rows.get(10)?);
    println!("row 420000: {}", rows.get(420_000)?);

    // shifting materializes the pages that receive values, older ones are evicted
    rows.insert(0, 7)?;
    println!(
        "row 0: {}, {} page(s) materialized",
        rows.get(0)?,
        rows.materialized_page_count()
    );

    let mut cells: SparsePageStore<u32> = SparsePageStore::new(64)?;
    cells.set(3, 1);
    cells.set(usize::MAX - 1, 2);
    println!("sparse store holds {} page(s)", cells.page_count());

    cells.remove_range(usize::MAX - 1, 1)?;
    println!("sparse store holds {} page(s)", cells.page_count());

    Ok(())
}
