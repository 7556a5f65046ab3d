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

use crate::PagedSequence;

use super::{filled_sequence, Benchmark, SequenceBenchmarkOptions, Timer};

/// Reads `iterations` elements front to back, wrapping around at the end.
pub struct SequentialGetBenchmark {
    seq: PagedSequence<u32>,
    options: SequenceBenchmarkOptions,
}

impl SequentialGetBenchmark {
    pub fn new(options: SequenceBenchmarkOptions) -> Self {
        Self {
            seq: filled_sequence(&options),
            options,
        }
    }
}

impl Benchmark<SequenceBenchmarkOptions> for SequentialGetBenchmark {
    #[inline]
    fn get_name(&self) -> &'static str {
        "sequential_get"
    }

    #[inline]
    fn get_bench_options(&self) -> SequenceBenchmarkOptions {
        self.options
    }

    #[inline]
    fn execute<T: Timer>(&mut self) -> u32 {
        let len = self.seq.len();

        let timer = T::start();
        for i in 0..self.options.iterations {
            black_box(self.seq.get(i % len).unwrap());
        }
        timer.stop()
    }
}

/// Reads `iterations` elements at uniformly distributed indices.
pub struct RandomGetBenchmark {
    seq: PagedSequence<u32>,
    options: SequenceBenchmarkOptions,
    rng: Xoshiro128StarStar,
}

impl RandomGetBenchmark {
    pub fn new(options: SequenceBenchmarkOptions) -> Self {
        const SEED: [u8; 16] = [
            17, 47, 137, 149, 21, 154, 201, 98, 148, 76, 203, 156, 140, 247, 234, 183,
        ];

        Self {
            seq: filled_sequence(&options),
            options,
            rng: Xoshiro128StarStar::from_seed(SEED),
        }
    }
}

impl Benchmark<SequenceBenchmarkOptions> for RandomGetBenchmark {
    #[inline]
    fn get_name(&self) -> &'static str {
        "random_get"
    }

    #[inline]
    fn get_bench_options(&self) -> SequenceBenchmarkOptions {
        self.options
    }

    #[inline]
    fn execute<T: Timer>(&mut self) -> u32 {
        let len = self.seq.len();

        // draw indices up front so the generator is not measured
        let indices: Vec<usize> = (0..self.options.iterations)
            .map(|_| self.rng.next_u32() as usize % len)
            .collect();

        let timer = T::start();
        for index in indices {
            black_box(self.seq.get(index).unwrap());
        }
        timer.stop()
    }
}
