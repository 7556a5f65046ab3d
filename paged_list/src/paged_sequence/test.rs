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

use core::cell::RefCell;
use std::rc::Rc;

use crate::{
    notification::{CollectionChange, Notification, PropertyChange, Subscription},
    test::check_page_table,
    PagedConfig, PagedSequence, PagingError,
};

fn sequence_from(page_size: usize, values: &[u32]) -> PagedSequence<u32> {
    let mut seq: PagedSequence<u32> = PagedSequence::with_page_size(page_size).unwrap();
    seq.update_count(values.len(), page_size).unwrap();
    for (i, value) in values.iter().enumerate() {
        seq.set(i, *value).unwrap();
    }
    seq
}

fn content(seq: &PagedSequence<u32>) -> Vec<u32> {
    seq.iter().collect()
}

#[derive(Debug, PartialEq)]
enum Event {
    Insert(usize, u32),
    Remove(usize, u32),
    Replace(usize, u32, u32),
    Reset,
    Count,
    Indexer,
}

fn record_events(seq: &mut PagedSequence<u32>) -> (Rc<RefCell<Vec<Event>>>, Subscription) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let events_clone = events.clone();

    let subscription = seq.subscribe(move |notification| {
        let event = match notification {
            Notification::Collection(CollectionChange::Insert { index, value }) => {
                Event::Insert(*index, **value)
            }
            Notification::Collection(CollectionChange::Remove { index, value }) => {
                Event::Remove(*index, **value)
            }
            Notification::Collection(CollectionChange::Replace { index, old, new }) => {
                Event::Replace(*index, **old, **new)
            }
            Notification::Collection(CollectionChange::Reset) => Event::Reset,
            Notification::Property(PropertyChange::Count) => Event::Count,
            Notification::Property(PropertyChange::Indexer) => Event::Indexer,
        };
        events_clone.borrow_mut().push(event);
    });

    (events, subscription)
}

#[test]
fn test_set_and_get_placeholders() {
    let mut seq: PagedSequence<u32> = PagedSequence::default();
    assert_eq!(seq.page_size(), 10);
    assert!(seq.is_empty());

    seq.update_count(22, 10).unwrap();
    seq.set(10, 42).unwrap();

    assert_eq!(seq.get(10).unwrap(), 42);
    assert_eq!(seq.get(9).unwrap(), 0);
    assert_eq!(seq.get(11).unwrap(), 0);
    assert_eq!(seq.len(), 22);
    assert_eq!(seq.page_count(), 3);

    // reading absent pages does not materialize them
    assert!(!seq.is_page_materialized(0));
    assert!(seq.is_page_materialized(1));
    assert!(!seq.is_page_materialized(2));
    assert_eq!(seq.materialized_page_count(), 1);
}

#[test]
fn test_index_out_of_range() {
    let mut seq = sequence_from(4, &[1, 2, 3]);

    assert_eq!(
        seq.get(3),
        Err(PagingError::IndexOutOfRange { index: 3, len: 3 })
    );
    assert_eq!(
        seq.set(7, 1),
        Err(PagingError::IndexOutOfRange { index: 7, len: 3 })
    );
    assert_eq!(
        seq.insert(4, 1),
        Err(PagingError::IndexOutOfRange { index: 4, len: 3 })
    );
    assert_eq!(
        seq.remove_at(3),
        Err(PagingError::IndexOutOfRange { index: 3, len: 3 })
    );
    assert_eq!(
        seq.remove_range(2, 2),
        Err(PagingError::IndexOutOfRange { index: 3, len: 3 })
    );

    // nothing changed
    assert_eq!(content(&seq), vec![1, 2, 3]);
}

#[test]
fn test_invalid_arguments() {
    let res: Result<PagedSequence<u32>, _> = PagedSequence::with_page_size(0);
    assert!(matches!(
        res,
        Err(PagingError::InvalidArgument { name: "page_size", .. })
    ));

    let res: Result<PagedSequence<u32>, _> = PagedSequence::new(PagedConfig {
        page_size: 3,
        page_cache_size: Some(0),
    });
    assert!(matches!(
        res,
        Err(PagingError::InvalidArgument { name: "page_cache_size", .. })
    ));

    let mut seq = sequence_from(4, &[1, 2, 3, 4, 5]);
    assert!(matches!(
        seq.update_count(10, 0),
        Err(PagingError::InvalidArgument { name: "page_size", .. })
    ));
    assert!(matches!(
        seq.set_page_cache_size(0),
        Err(PagingError::InvalidArgument { name: "page_cache_size", .. })
    ));

    assert_eq!(seq.len(), 5);
    assert_eq!(seq.page_size(), 4);
    assert_eq!(seq.page_cache_size(), None);
}

#[test]
fn test_lru_eviction_order() {
    let mut seq: PagedSequence<u32> = PagedSequence::new(PagedConfig {
        page_size: 10,
        page_cache_size: Some(3),
    })
    .unwrap();
    seq.update_count(50, 10).unwrap();

    seq.set(10, 1).unwrap();
    seq.set(20, 2).unwrap();
    seq.set(30, 3).unwrap();
    assert_eq!(seq.materialized_page_count(), 3);

    // page 1 is the least recently used one
    seq.set(40, 4).unwrap();
    assert_eq!(seq.materialized_page_count(), 3);
    assert!(!seq.is_page_materialized(1));
    assert_eq!(seq.get(10).unwrap(), 0);

    // writing page 1 again evicts page 2
    seq.set(11, 5).unwrap();
    assert!(!seq.is_page_materialized(2));
    assert_eq!(seq.get(20).unwrap(), 0);
    assert_eq!(seq.get(11).unwrap(), 5);
    assert_eq!(seq.get(30).unwrap(), 3);
    assert_eq!(seq.get(40).unwrap(), 4);
    assert_eq!(seq.materialized_page_count(), 3);
    assert_eq!(seq.recency_order(), vec![1, 3, 4]);
}

#[test]
fn test_read_protects_page_from_eviction() {
    let mut seq: PagedSequence<u32> = PagedSequence::new(PagedConfig {
        page_size: 4,
        page_cache_size: Some(3),
    })
    .unwrap();
    seq.update_count(16, 4).unwrap();

    seq.set(0, 10).unwrap();
    seq.set(4, 11).unwrap();
    seq.set(8, 12).unwrap();

    // reading page 0 makes page 1 the next victim
    assert_eq!(seq.get(0).unwrap(), 10);
    seq.set(12, 13).unwrap();

    assert!(seq.is_page_materialized(0));
    assert!(!seq.is_page_materialized(1));
    assert_eq!(seq.get(0).unwrap(), 10);
    assert_eq!(seq.get(4).unwrap(), 0);
    assert_eq!(seq.get(8).unwrap(), 12);
    assert_eq!(seq.get(12).unwrap(), 13);
}

/// Zeros in `values` stay placeholders, so their pages are not materialized.
fn bounded(page_size: usize, page_cache_size: usize, values: &[u32]) -> PagedSequence<u32> {
    let mut seq: PagedSequence<u32> = PagedSequence::new(PagedConfig {
        page_size,
        page_cache_size: Some(page_cache_size),
    })
    .unwrap();
    seq.update_count(values.len(), page_size).unwrap();
    for (i, value) in values.iter().enumerate().filter(|(_, value)| **value != 0) {
        seq.set(i, *value).unwrap();
    }
    seq
}

#[test]
fn test_written_page_is_most_recently_used() {
    let mut seq = bounded(3, 2, &[0; 9]);

    seq.set(7, 1).unwrap();
    assert_eq!(seq.recency_order().last(), Some(&2));
    seq.set(1, 1).unwrap();
    assert_eq!(seq.recency_order().last(), Some(&0));

    // the shift materializes pages 1 and 3, the write goes to page 0
    seq.insert(2, 5).unwrap();
    assert_eq!(seq.recency_order(), vec![3, 0]);
    assert_eq!(seq.get(2).unwrap(), 5);
}

#[test]
fn test_insert_keeps_written_page_with_single_page_cache() {
    let mut seq = bounded(3, 1, &[1, 2, 3]);
    seq.insert(0, 9).unwrap();

    // page 1 only received the shifted out 3
    assert!(seq.is_page_materialized(0));
    assert!(!seq.is_page_materialized(1));
    assert_eq!(seq.recency_order(), vec![0]);
    assert_eq!(content(&seq), vec![9, 1, 2, 0]);
    assert_eq!(seq.get(0).unwrap(), 9);
    check_page_table(&seq);
}

#[test]
fn test_insert_below_last_page_under_cache_limit() {
    let mut seq = bounded(3, 2, &[1, 2, 3, 0, 0, 0, 7, 8, 9]);
    assert_eq!(seq.recency_order(), vec![0, 2]);

    seq.insert(1, 50).unwrap();

    // pages 1 and 3 were materialized by the shift, pages 2 and 1 got evicted
    assert_eq!(seq.recency_order(), vec![3, 0]);
    assert!(seq.is_page_materialized(0));
    assert!(!seq.is_page_materialized(1));
    assert!(!seq.is_page_materialized(2));
    assert!(seq.is_page_materialized(3));
    assert_eq!(content(&seq), vec![1, 50, 2, 0, 0, 0, 0, 0, 0, 9]);
    check_page_table(&seq);
}

#[test]
fn test_insert_range_under_cache_limit() {
    let mut seq = bounded(4, 2, &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(seq.recency_order(), vec![0, 1]);

    seq.insert_range(1, [20, 21]).unwrap();

    assert_eq!(seq.recency_order(), vec![2, 0]);
    assert!(!seq.is_page_materialized(1));
    assert_eq!(content(&seq), vec![1, 20, 21, 2, 0, 0, 0, 0, 7, 8]);
    assert_eq!(seq.get(1).unwrap(), 20);
    assert_eq!(seq.get(2).unwrap(), 21);
    check_page_table(&seq);
}

#[test]
fn test_lowering_page_cache_size_evicts_lazily() {
    let mut seq = sequence_from(2, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    assert_eq!(seq.materialized_page_count(), 5);

    seq.set_page_cache_size(2).unwrap();
    assert_eq!(seq.page_cache_size(), Some(2));
    assert_eq!(seq.materialized_page_count(), 5);

    // touching page 0 evicts the pages 1, 2 and 3
    assert_eq!(seq.get(0).unwrap(), 1);
    assert_eq!(seq.materialized_page_count(), 2);
    assert!(seq.is_page_materialized(0));
    assert!(seq.is_page_materialized(4));
    assert_eq!(content(&seq), vec![1, 2, 0, 0, 0, 0, 0, 0, 9, 10]);

    seq.clear_page_cache_size();
    seq.set(2, 3).unwrap();
    seq.set(4, 5).unwrap();
    assert_eq!(seq.materialized_page_count(), 4);
}

#[test]
fn test_insert_within_page() {
    let mut seq = sequence_from(3, &[1, 2, 3, 4, 5, 6, 7]);
    seq.insert(1, 100).unwrap();

    assert_eq!(content(&seq), vec![1, 100, 2, 3, 4, 5, 6, 7]);
    assert_eq!(seq.len(), 8);
    check_page_table(&seq);
}

#[test]
fn test_insert_at_page_boundaries() {
    let mut seq = sequence_from(3, &[1, 2, 3, 4, 5, 6, 7]);
    seq.insert(3, 100).unwrap();
    assert_eq!(content(&seq), vec![1, 2, 3, 100, 4, 5, 6, 7]);

    seq.insert(0, 200).unwrap();
    assert_eq!(content(&seq), vec![200, 1, 2, 3, 100, 4, 5, 6, 7]);
    assert_eq!(seq.page_count(), 3);

    // grows the page table by one page
    seq.insert(9, 300).unwrap();
    assert_eq!(content(&seq), vec![200, 1, 2, 3, 100, 4, 5, 6, 7, 300]);
    assert_eq!(seq.page_count(), 4);
    check_page_table(&seq);
}

#[test]
fn test_insert_materializes_following_page() {
    let mut seq: PagedSequence<u32> = PagedSequence::with_page_size(3).unwrap();
    seq.update_count(9, 3).unwrap();
    seq.set(2, 5).unwrap();
    assert!(!seq.is_page_materialized(1));

    seq.insert(1, 9).unwrap();
    assert_eq!(content(&seq), vec![0, 9, 0, 5, 0, 0, 0, 0, 0, 0]);
    assert!(seq.is_page_materialized(1));
    assert!(!seq.is_page_materialized(2));
    check_page_table(&seq);
}

#[test]
fn test_insert_range() {
    let mut seq = sequence_from(4, &[1, 2, 3, 4, 5, 6, 7, 8, 9]);

    // crosses the boundary between page 0 and page 1
    seq.insert_range(3, [31, 32, 33]).unwrap();
    assert_eq!(
        content(&seq),
        vec![1, 2, 3, 31, 32, 33, 4, 5, 6, 7, 8, 9]
    );

    seq.insert_range(12, [40, 41, 42, 43]).unwrap();
    assert_eq!(seq.len(), 16);
    assert_eq!(&content(&seq)[12..], &[40, 41, 42, 43]);

    // nothing to insert
    seq.insert_range(2, Vec::new()).unwrap();
    assert_eq!(seq.len(), 16);
    check_page_table(&seq);
}

#[test]
fn test_insert_range_longer_than_page_not_supported() {
    let mut seq = sequence_from(3, &[1, 2, 3, 4]);

    assert!(matches!(
        seq.insert_range(1, [7, 7, 7, 7]),
        Err(PagingError::NotSupported { operation: "insert_range", .. })
    ));
    assert_eq!(content(&seq), vec![1, 2, 3, 4]);
}

#[test]
fn test_remove_at_across_pages() {
    let mut seq: PagedSequence<u32> = PagedSequence::with_page_size(6).unwrap();
    seq.update_count(20, 6).unwrap();
    seq.set(2, 8).unwrap();
    seq.set(5, 10).unwrap();
    seq.set(10, 42).unwrap();

    assert_eq!(seq.remove_at(5).unwrap(), 10);
    assert_eq!(seq.len(), 19);
    assert_eq!(seq.get(2).unwrap(), 8);
    assert_eq!(seq.get(9).unwrap(), 42);
    assert_eq!(seq.get(5).unwrap(), 0);
    check_page_table(&seq);
}

#[test]
fn test_remove_shrinks_page_table() {
    let mut seq = sequence_from(3, &[1, 2, 3, 4, 5, 6, 7]);

    assert_eq!(seq.remove_at(0).unwrap(), 1);
    assert_eq!(content(&seq), vec![2, 3, 4, 5, 6, 7]);
    assert_eq!(seq.page_count(), 2);
    assert_eq!(seq.materialized_page_count(), 2);

    assert_eq!(seq.remove_at(5).unwrap(), 7);
    assert_eq!(seq.remove_at(2).unwrap(), 4);
    assert_eq!(content(&seq), vec![2, 3, 5, 6]);

    // re-grown slots read as placeholders
    seq.update_count(6, 3).unwrap();
    assert_eq!(content(&seq), vec![2, 3, 5, 6, 0, 0]);
    check_page_table(&seq);
}

#[test]
fn test_remove_range() {
    let mut seq = sequence_from(4, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);

    assert_eq!(seq.remove_range(2, 3).unwrap(), vec![3, 4, 5]);
    assert_eq!(content(&seq), vec![1, 2, 6, 7, 8, 9, 10]);
    check_page_table(&seq);

    assert_eq!(seq.remove_range(3, 4).unwrap(), vec![7, 8, 9, 10]);
    assert_eq!(content(&seq), vec![1, 2, 6]);
    assert_eq!(seq.page_count(), 1);

    assert_eq!(seq.remove_range(1, 0).unwrap(), Vec::<u32>::new());
    assert!(matches!(
        seq.remove_range(0, 5),
        Err(PagingError::NotSupported { operation: "remove_range", .. })
    ));
    assert_eq!(content(&seq), vec![1, 2, 6]);
}

#[test]
fn test_insert_and_remove_are_inverse() {
    let original: Vec<u32> = (1..=17).collect();

    for page_size in 1..6 {
        for index in 0..=original.len() {
            let mut seq = sequence_from(page_size, &original);
            seq.insert(index, 1000).unwrap();

            let mut expected = original.clone();
            expected.insert(index, 1000);
            assert_eq!(content(&seq), expected, "page_size={} index={}", page_size, index);

            assert_eq!(seq.remove_at(index).unwrap(), 1000);
            assert_eq!(content(&seq), original, "page_size={} index={}", page_size, index);
            check_page_table(&seq);
        }
    }
}

#[test]
fn test_add() {
    let mut seq: PagedSequence<u32> = PagedSequence::with_page_size(2).unwrap();
    for value in 1..=5 {
        seq.add(value);
    }

    assert_eq!(content(&seq), vec![1, 2, 3, 4, 5]);
    assert_eq!(seq.page_count(), 3);
    check_page_table(&seq);
}

#[test]
fn test_index_of_contains_remove() {
    let mut seq: PagedSequence<u32> = PagedSequence::with_page_size(4).unwrap();
    seq.update_count(12, 4).unwrap();
    seq.set(6, 3).unwrap();
    seq.set(9, 3).unwrap();

    assert_eq!(seq.index_of(&3), Some(6));
    assert_eq!(seq.index_of(&42), None);
    assert!(seq.contains(&3));
    assert!(!seq.contains(&42));

    // page 0 is absent, the first default value found is slot 0 of page 1
    assert_eq!(seq.index_of(&0), Some(4));

    assert!(seq.remove(&3));
    assert_eq!(seq.len(), 11);
    assert_eq!(seq.index_of(&3), Some(8));
    assert!(!seq.remove(&42));
    assert_eq!(seq.len(), 11);
}

#[test]
fn test_index_of_ignores_slots_behind_end() {
    let mut seq = sequence_from(4, &[1, 2, 3, 4, 5, 6]);
    seq.remove_at(5).unwrap();

    assert_eq!(seq.index_of(&6), None);
    assert_eq!(seq.index_of(&0), None);
}

#[test]
fn test_copy_to() {
    let mut seq: PagedSequence<u32> = PagedSequence::with_page_size(3).unwrap();
    seq.update_count(7, 3).unwrap();
    seq.set(1, 5).unwrap();
    seq.set(6, 9).unwrap();

    let mut dest = vec![77u32; 10];
    seq.copy_to(&mut dest, 2).unwrap();
    assert_eq!(dest, vec![77, 77, 0, 5, 0, 0, 0, 0, 9, 77]);
    assert_eq!(seq.materialized_page_count(), 2);

    let mut small = vec![1u32; 7];
    assert_eq!(
        seq.copy_to(&mut small, 1),
        Err(PagingError::DestinationOutOfRange {
            offset: 1,
            required: 7,
            available: 7
        })
    );
    assert_eq!(small, vec![1; 7]);

    assert!(seq.copy_to(&mut small, usize::MAX).is_err());
}

#[test]
fn test_update_count_keeps_pages() {
    let mut seq: PagedSequence<u32> = PagedSequence::with_page_size(4).unwrap();
    seq.update_count(10, 4).unwrap();
    seq.set(1, 11).unwrap();
    seq.set(5, 55).unwrap();
    seq.set(9, 99).unwrap();

    seq.update_count(6, 4).unwrap();
    assert_eq!(seq.len(), 6);
    assert_eq!(seq.page_count(), 2);
    assert_eq!(seq.get(1).unwrap(), 11);
    assert_eq!(seq.get(5).unwrap(), 55);

    seq.update_count(5, 4).unwrap();
    seq.update_count(10, 4).unwrap();
    assert_eq!(seq.get(1).unwrap(), 11);
    assert_eq!(seq.get(5).unwrap(), 0);
    assert_eq!(seq.get(9).unwrap(), 0);
    check_page_table(&seq);
}

#[test]
fn test_update_count_with_new_page_size_discards_pages() {
    let mut seq = sequence_from(4, &[1, 2, 3, 4, 5, 6]);

    seq.update_count(6, 5).unwrap();
    assert_eq!(seq.page_size(), 5);
    assert_eq!(seq.page_count(), 2);
    assert_eq!(seq.materialized_page_count(), 0);
    assert_eq!(content(&seq), vec![0; 6]);
    assert!(seq.recency_order().is_empty());
}

#[test]
fn test_clear() {
    let mut seq = sequence_from(4, &[1, 2, 3, 4, 5, 6]);
    seq.clear();

    assert!(seq.is_empty());
    assert_eq!(seq.page_count(), 0);
    assert_eq!(seq.materialized_page_count(), 0);
    assert!(seq.get(0).is_err());

    seq.add(3);
    assert_eq!(content(&seq), vec![3]);
}

#[test]
fn test_notifications() {
    let mut seq: PagedSequence<u32> = PagedSequence::with_page_size(4).unwrap();
    let (events, subscription) = record_events(&mut seq);
    assert_eq!(seq.listener_count(), 1);

    seq.add(7);
    assert_eq!(
        events.borrow_mut().drain(..).collect::<Vec<_>>(),
        vec![
            Event::Insert(0, 7),
            Event::Replace(0, 0, 7),
            Event::Count,
            Event::Indexer
        ]
    );

    seq.set(0, 9).unwrap();
    assert_eq!(
        events.borrow_mut().drain(..).collect::<Vec<_>>(),
        vec![Event::Replace(0, 7, 9), Event::Indexer]
    );

    seq.insert(0, 1).unwrap();
    assert_eq!(
        events.borrow_mut().drain(..).collect::<Vec<_>>(),
        vec![Event::Insert(0, 1), Event::Count, Event::Indexer]
    );

    assert_eq!(seq.remove_at(1).unwrap(), 9);
    assert_eq!(
        events.borrow_mut().drain(..).collect::<Vec<_>>(),
        vec![Event::Remove(1, 9), Event::Count, Event::Indexer]
    );

    seq.clear();
    assert_eq!(
        events.borrow_mut().drain(..).collect::<Vec<_>>(),
        vec![Event::Reset, Event::Count, Event::Indexer]
    );

    // failed calls do not notify
    assert!(seq.set(3, 1).is_err());
    assert!(events.borrow().is_empty());

    drop(subscription);
    assert_eq!(seq.listener_count(), 0);
    seq.add(1);
    assert!(events.borrow().is_empty());
}

#[test]
fn test_remove_range_notifications() {
    let mut seq = sequence_from(4, &[1, 2, 3, 4, 5]);
    let (events, _subscription) = record_events(&mut seq);

    seq.remove_range(1, 2).unwrap();
    assert_eq!(
        *events.borrow(),
        vec![
            Event::Remove(1, 2),
            Event::Remove(1, 3),
            Event::Count,
            Event::Indexer
        ]
    );
}
