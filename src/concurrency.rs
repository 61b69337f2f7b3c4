// Copyright 2026 The sparse_maq Authors
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Fixed-task parallelism for the one place in the pipeline that benefits
//! from it: per-unit Pareto filtering. Unlike a branch-and-bound search,
//! the set of units to filter is known completely up front and each unit's
//! work is independent, so a static contiguous-chunk partition over
//! `std::thread::scope` is enough -- no work-stealing queue or condition
//! variable is needed.

use std::thread;

/// Resolves the caller's thread-count request: `0` means "use every
/// available hardware thread".
pub fn resolve_n_threads(requested: usize) -> usize {
    if requested == 0 {
        num_cpus::get().max(1)
    } else {
        requested
    }
}

/// Applies `f` to every item in `items`, split into `n_threads` contiguous
/// chunks processed in parallel. Results are returned in the original
/// item order regardless of how scheduling interleaves the chunks, since
/// chunks are joined back in the order they were spawned.
///
/// `f` receives the item's original index alongside the item itself so
/// callers can recover positional information without it round-tripping
/// through the result type.
pub fn parallel_map<T, R, F>(items: &[T], n_threads: usize, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(usize, &T) -> R + Sync,
{
    if items.is_empty() {
        return Vec::new();
    }
    let n_threads = resolve_n_threads(n_threads).min(items.len());
    if n_threads <= 1 {
        return items.iter().enumerate().map(|(i, it)| f(i, it)).collect();
    }

    let chunk_size = (items.len() + n_threads - 1) / n_threads;
    thread::scope(|scope| {
        let handles: Vec<_> = items
            .chunks(chunk_size)
            .enumerate()
            .map(|(chunk_idx, chunk)| {
                let base = chunk_idx * chunk_size;
                let f = &f;
                scope.spawn(move || {
                    chunk
                        .iter()
                        .enumerate()
                        .map(|(i, it)| f(base + i, it))
                        .collect::<Vec<R>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().expect("worker thread panicked"))
            .collect()
    })
}
