//! Dense distance matrix built in parallel.
//!
//! The row range `[0, n)` is split into contiguous blocks, one per worker.
//! Each worker owns its block of the row-major buffer exclusively and fills
//! its rows completely, so the matrix is ready once every worker has joined.

use crate::error::{Error, Result};
use crate::instance::City;
use std::ops::Range;

/// Integer edge weight
pub type Distance = i64;

/// A dense n×n distance matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    data: Vec<Distance>,
    size: usize,
}

/// Partition `[0, n)` into contiguous, non-overlapping row ranges, one per worker.
///
/// The worker count is clamped to `[1, n]`. Every range holds `n / workers`
/// rows; the `n % workers` leftover rows go one each to the trailing ranges.
pub fn partition_rows(n: usize, workers: usize) -> Vec<Range<usize>> {
    if n == 0 {
        return Vec::new();
    }

    let workers = workers.clamp(1, n);
    let base = n / workers;
    let remainder = n % workers;
    let first_long = workers - remainder;

    let mut ranges = Vec::with_capacity(workers);
    let mut begin = 0;
    for worker in 0..workers {
        let len = if worker >= first_long { base + 1 } else { base };
        ranges.push(begin..begin + len);
        begin += len;
    }

    debug_assert_eq!(begin, n);
    ranges
}

/// Fill `rows`, a block holding rows `range` of the matrix.
fn fill_rows(cities: &[City], range: Range<usize>, rows: &mut [Distance]) {
    let n = cities.len();
    for (row, i) in rows.chunks_mut(n.max(1)).zip(range) {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = cities[i].distance_to(&cities[j]);
        }
    }
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        DistanceMatrix {
            data: vec![0; size * size],
            size,
        }
    }

    /// Creates a distance matrix from an explicit row-major n×n table.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<Distance>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(DistanceMatrix { data, size })
    }

    /// Build the matrix for `cities` using `workers` parallel workers.
    ///
    /// All workers are joined before the matrix is returned.
    pub fn build(cities: &[City], workers: usize) -> Result<Self> {
        let n = cities.len();
        let ranges = partition_rows(n, workers);
        let mut data = vec![0; n * n];

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(ranges.len().max(1))
            .build()
            .map_err(|e| Error::resource(format!("distance matrix pool: {e}")))?;

        log::debug!("matrix: start n={} workers={}", n, ranges.len());

        pool.scope(|scope| {
            let mut rest: &mut [Distance] = &mut data;
            for range in &ranges {
                let (rows, tail) = std::mem::take(&mut rest).split_at_mut(range.len() * n);
                rest = tail;
                let range = range.clone();
                scope.spawn(move |_| fill_rows(cities, range, rows));
            }
        });

        log::debug!("matrix: complete n={}", n);
        Ok(DistanceMatrix { data, size: n })
    }

    /// Returns the distance from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> Distance {
        assert!(from < self.size && to < self.size, "matrix index ({from}, {to}) out of bounds for size {}", self.size);
        self.data[from * self.size + to]
    }

    /// Full row `from`
    pub fn row(&self, from: usize) -> &[Distance] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Number of cities in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric with a zero diagonal.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| {
            self.get(i, i) == 0 && (i + 1..self.size).all(|j| self.get(i, j) == self.get(j, i))
        })
    }

    /// Length of a closed tour (first element repeated at the end).
    pub fn tour_length(&self, tour: &[usize]) -> Distance {
        tour.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }
}
