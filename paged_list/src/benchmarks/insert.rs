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

use crate::PagedSequence;

use super::{filled_sequence, Benchmark, SequenceBenchmarkOptions, Timer};

/// Inserts `iterations` elements at the front, so every insert shifts the
/// whole sequence by one slot.
pub struct InsertBenchmark {
    seq: PagedSequence<u32>,
    options: SequenceBenchmarkOptions,
}

impl InsertBenchmark {
    pub fn new(options: SequenceBenchmarkOptions) -> Self {
        Self {
            seq: filled_sequence(&options),
            options,
        }
    }
}

impl Benchmark<SequenceBenchmarkOptions> for InsertBenchmark {
    #[inline]
    fn get_name(&self) -> &'static str {
        "insert_front"
    }

    #[inline]
    fn get_bench_options(&self) -> SequenceBenchmarkOptions {
        self.options
    }

    #[inline]
    fn execute<T: Timer>(&mut self) -> u32 {
        let timer = T::start();
        for i in 0..self.options.iterations {
            self.seq.insert(0, black_box(i as u32)).unwrap();
        }
        let res = timer.stop();

        // restore the initial length for the next run
        for _ in 0..self.options.iterations {
            self.seq.remove_at(0).unwrap();
        }

        res
    }
}

/// Removes `iterations` elements from the front.
pub struct RemoveBenchmark {
    seq: PagedSequence<u32>,
    options: SequenceBenchmarkOptions,
}

impl RemoveBenchmark {
    pub fn new(options: SequenceBenchmarkOptions) -> Self {
        Self {
            seq: filled_sequence(&options),
            options,
        }
    }
}

impl Benchmark<SequenceBenchmarkOptions> for RemoveBenchmark {
    #[inline]
    fn get_name(&self) -> &'static str {
        "remove_front"
    }

    #[inline]
    fn get_bench_options(&self) -> SequenceBenchmarkOptions {
        self.options
    }

    #[inline]
    fn execute<T: Timer>(&mut self) -> u32 {
        let iterations = self.options.iterations.min(self.seq.len());

        let timer = T::start();
        for _ in 0..iterations {
            black_box(self.seq.remove_at(0).unwrap());
        }
        let res = timer.stop();

        for i in 0..iterations {
            self.seq.add(i as u32);
        }

        res
    }
}
