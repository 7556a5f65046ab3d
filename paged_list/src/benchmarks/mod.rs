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

#[cfg(not(test))]
use std::io::stdout;

use serde::Serialize;

use crate::{PagedConfig, PagedSequence};

mod get;
mod insert;
mod sparse;

pub use get::*;
pub use insert::*;
pub use sparse::*;

pub struct RunAllBenchmarkOptions {
    pub run_get_benchmarks: bool,
    pub run_insert_benchmarks: bool,
    pub run_sparse_benchmarks: bool,
}

impl Default for RunAllBenchmarkOptions {
    fn default() -> Self {
        Self {
            run_get_benchmarks: false,
            run_insert_benchmarks: false,
            run_sparse_benchmarks: false,
        }
    }
}

impl RunAllBenchmarkOptions {
    pub fn all() -> Self {
        Self {
            run_get_benchmarks: true,
            run_insert_benchmarks: true,
            run_sparse_benchmarks: true,
        }
    }
}

/// Page sizes every benchmark is run with
const PAGE_SIZES: [usize; 4] = [4, 16, 64, 256];

/// `None` means unbounded
const PAGE_CACHE_SIZES: [Option<usize>; 3] = [None, Some(16), Some(2)];

const ITEM_COUNT: usize = 4096;
const ITERATIONS: usize = 1024;

pub fn run_all_benchmarks<TIMER: Timer>(mut run_options: BenchmarkRunOptions, options: RunAllBenchmarkOptions) {
    let mut curr_iteration = 0usize;
    let mut iteration_count = 0;

    let configs = PAGE_SIZES.len() * PAGE_CACHE_SIZES.len();
    if options.run_get_benchmarks {
        iteration_count += 2 * configs;
    }
    if options.run_insert_benchmarks {
        iteration_count += 2 * configs;
    }
    if options.run_sparse_benchmarks {
        iteration_count += PAGE_SIZES.len();
    }

    fn handle_curr_iteration(curr_iteration: &mut usize, iteration_count: usize) {
        let percentage = (100 * *curr_iteration) / (iteration_count);
        print!("[{}%] ", percentage);

        *curr_iteration += 1;
    }

    for page_size in PAGE_SIZES {
        for page_cache_size in PAGE_CACHE_SIZES {
            let options_for = |item_count| SequenceBenchmarkOptions {
                page_size,
                page_cache_size,
                item_count,
                iterations: ITERATIONS,
            };

            if options.run_get_benchmarks {
                handle_curr_iteration(&mut curr_iteration, iteration_count);
                let bench = SequentialGetBenchmark::new(options_for(ITEM_COUNT));
                bench.run_benchmark::<TIMER>(&mut run_options);

                handle_curr_iteration(&mut curr_iteration, iteration_count);
                let bench = RandomGetBenchmark::new(options_for(ITEM_COUNT));
                bench.run_benchmark::<TIMER>(&mut run_options);
            }

            if options.run_insert_benchmarks {
                handle_curr_iteration(&mut curr_iteration, iteration_count);
                let bench = InsertBenchmark::new(options_for(ITEM_COUNT));
                bench.run_benchmark::<TIMER>(&mut run_options);

                handle_curr_iteration(&mut curr_iteration, iteration_count);
                let bench = RemoveBenchmark::new(options_for(ITEM_COUNT));
                bench.run_benchmark::<TIMER>(&mut run_options);
            }
        }

        if options.run_sparse_benchmarks {
            handle_curr_iteration(&mut curr_iteration, iteration_count);
            let bench = SparseSetBenchmark::new(page_size, ITERATIONS);
            bench.run_benchmark::<TIMER>(&mut run_options);
        }
    }
}

pub trait Benchmark<O: Serialize> {
    fn get_name(&self) -> &'static str;

    fn get_bench_options(&self) -> O;

    fn execute<T: Timer>(&mut self) -> u32;

    #[inline(never)]
    fn run_benchmark<T: Timer>(mut self, options: &mut BenchmarkRunOptions) -> BenchmarkRunResult
    where
        Self: Sized,
    {
        assert_eq!(options.repetitions as usize, options.result_buffer.len());

        print!("Running Benchmark \"{}\" with options ", self.get_name());

        #[cfg(not(test))]
        serde_json::to_writer(stdout(), &self.get_bench_options()).unwrap();
        println!();

        for _ in 0..options.cold_start {
            self.execute::<T>();
        }

        for i in 0..options.result_buffer.len() {
            options.result_buffer[i] = self.execute::<T>();
        }

        print!("[BENCH-INFO] ");

        #[cfg(not(test))]
        {
            let run_info = BenchmarkRunInfo {
                bench_name: self.get_name(),
                bench_options: &self.get_bench_options(),
                machine_name: options.machine_name,
                cold_start: options.cold_start,
                repetitions: options.repetitions,
                ticks_per_ms: T::get_ticks_per_ms(),
                data: &options.result_buffer,
            };
            serde_json::to_writer(stdout(), &run_info).unwrap();
        }
        println!();

        let res = BenchmarkRunResult::from_buffer(&options.result_buffer);
        println!(
            "-> Finished {}: mean={}, min={}, max={}",
            self.get_name(),
            res.mean_latency,
            res.min_latency,
            res.max_latency
        );
        println!();

        res
    }
}

pub struct BenchmarkRunOptions<'a> {
    pub repetitions: u32,
    pub result_buffer: &'a mut [u32],

    pub cold_start: u32,

    pub machine_name: &'static str,
}

/// Options shared by all benchmarks on a [`PagedSequence`](crate::PagedSequence)
#[derive(Serialize, Clone, Copy)]
pub struct SequenceBenchmarkOptions {
    pub page_size: usize,
    pub page_cache_size: Option<usize>,
    pub item_count: usize,
    pub iterations: usize,
}

/// Sequence with `item_count` consecutive values, written front to back.
fn filled_sequence(options: &SequenceBenchmarkOptions) -> PagedSequence<u32> {
    let mut seq: PagedSequence<u32> = PagedSequence::new(PagedConfig {
        page_size: options.page_size,
        page_cache_size: options.page_cache_size,
    })
    .unwrap();

    for i in 0..options.item_count {
        seq.add(i as u32);
    }
    seq
}

#[derive(Serialize)]
pub struct BenchmarkRunInfo<'a, O: Serialize> {
    bench_name: &'static str,
    bench_options: &'a O,
    machine_name: &'static str,
    cold_start: u32,
    repetitions: u32,
    ticks_per_ms: u32,
    data: &'a [u32],
}

pub struct BenchmarkRunResult {
    pub mean_latency: u32,
    pub min_latency: u32,
    pub max_latency: u32,
}

impl BenchmarkRunResult {
    fn from_buffer(buffer: &[u32]) -> Self {
        if buffer.is_empty() {
            return Self {
                mean_latency: 0,
                min_latency: 0,
                max_latency: 0,
            };
        }

        Self {
            mean_latency: (buffer.iter().map(|x| *x as u64).sum::<u64>() / buffer.len() as u64) as u32,
            min_latency: buffer.iter().copied().min().unwrap_or(0),
            max_latency: buffer.iter().copied().max().unwrap_or(0),
        }
    }
}

pub trait Timer {
    fn get_ticks_per_ms() -> u32;

    fn start() -> Self;

    fn stop(self) -> u32;
}
