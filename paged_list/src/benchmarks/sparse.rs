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

use core::hint::black_box;

use rand_xoshiro::{
    rand_core::{RngCore, SeedableRng},
    Xoshiro128StarStar,
};
use serde::Serialize;

use crate::SparsePageStore;

use super::{Benchmark, Timer};

#[derive(Serialize, Clone, Copy)]
pub struct SparseSetBenchmarkOptions {
    page_size: usize,
    iterations: usize,
}

/// Writes to random indices spread over the whole `u32` range, then reads
/// them back and releases their pages again.
pub struct SparseSetBenchmark {
    store: SparsePageStore<u32>,
    options: SparseSetBenchmarkOptions,
    rng: Xoshiro128StarStar,
}

impl SparseSetBenchmark {
    pub fn new(page_size: usize, iterations: usize) -> Self {
        const SEED: [u8; 16] = [
            149, 228, 163, 172, 175, 184, 104, 86, 131, 185, 95, 73, 18, 58, 248, 111,
        ];

        Self {
            store: SparsePageStore::new(page_size).unwrap(),
            options: SparseSetBenchmarkOptions {
                page_size,
                iterations,
            },
            rng: Xoshiro128StarStar::from_seed(SEED),
        }
    }
}

impl Benchmark<SparseSetBenchmarkOptions> for SparseSetBenchmark {
    #[inline]
    fn get_name(&self) -> &'static str {
        "sparse_set"
    }

    #[inline]
    fn get_bench_options(&self) -> SparseSetBenchmarkOptions {
        self.options
    }

    #[inline]
    fn execute<T: Timer>(&mut self) -> u32 {
        let indices: Vec<usize> = (0..self.options.iterations)
            .map(|_| self.rng.next_u32() as usize)
            .collect();

        let timer = T::start();
        for (i, index) in indices.iter().enumerate() {
            self.store.set(*index, i as u32 + 1);
        }
        for index in indices.iter() {
            black_box(self.store.get(*index));
        }
        let res = timer.stop();

        for index in indices.iter() {
            self.store.remove_range(*index, 1).unwrap();
        }
        self.store.clear();

        res
    }
}
