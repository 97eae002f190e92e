//! Row partitioning and per-row dispatch.
//!
//! The interior rows of a raster are split into contiguous, disjoint chunks.
//! Each chunk writes only its own output rows and reads only shared inputs,
//! so chunks can run independently. With the `rayon` feature enabled the
//! executor hands every chunk to the rayon pool; without it the chunks run
//! in order on the calling thread. The partitioning is identical in both
//! cases.

use std::num::NonZeroUsize;
use std::ops::Range;

/// Splits `row_count` rows into `chunk_count` chunk sizes.
///
/// Every chunk gets `row_count / chunk_count` rows except the last, which
/// also takes the remainder. The sizes always sum to `row_count`.
///
/// # Examples
///
/// ```rust
/// use std::num::NonZeroUsize;
/// use piv_filters::partition;
///
/// let sizes = partition(10, NonZeroUsize::new(3).unwrap());
/// assert_eq!(sizes, vec![3, 3, 4]);
/// ```
pub fn partition(row_count: usize, chunk_count: NonZeroUsize) -> Vec<usize> {
    let chunk_count = chunk_count.get();
    let base = row_count / chunk_count;
    let last = row_count - base * (chunk_count - 1);

    let mut sizes = vec![base; chunk_count];
    sizes[chunk_count - 1] = last;
    sizes
}

/// Converts chunk sizes into row ranges starting at `first_row`.
pub fn chunk_ranges(sizes: &[usize], first_row: usize) -> Vec<Range<usize>> {
    sizes
        .iter()
        .scan(first_row, |cursor, &len| {
            let range = *cursor..*cursor + len;
            *cursor += len;
            Some(range)
        })
        .collect()
}

/// Calls `per_row` once for every row covered by `sizes`, in order.
///
/// Rows are numbered from `first_row`; a running cursor advances through
/// each chunk in turn.
pub fn dispatch<F>(sizes: &[usize], first_row: usize, mut per_row: F)
where
    F: FnMut(usize),
{
    let mut cursor = first_row;
    for &len in sizes {
        for row in cursor..cursor + len {
            per_row(row);
        }
        cursor += len;
    }
}

/// Drives a per-row callback over the interior rows of a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowChunkExecutor {
    chunk_count: NonZeroUsize,
}

impl Default for RowChunkExecutor {
    /// One chunk per available hardware thread (a single chunk if that
    /// cannot be determined).
    fn default() -> Self {
        let chunk_count =
            std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN);
        Self { chunk_count }
    }
}

impl RowChunkExecutor {
    pub const fn new(chunk_count: NonZeroUsize) -> Self {
        Self { chunk_count }
    }

    /// Executor that runs the whole interior as a single chunk.
    pub const fn single_chunk() -> Self {
        Self {
            chunk_count: NonZeroUsize::MIN,
        }
    }

    #[inline]
    pub const fn chunk_count(&self) -> NonZeroUsize {
        self.chunk_count
    }

    /// Chunk sizes for a raster of `rows` rows and a kernel reaching `half`
    /// rows beyond the center.
    pub fn plan(&self, rows: usize, half: usize) -> Vec<usize> {
        partition(interior_row_count(rows, half), self.chunk_count)
    }

    /// Runs `per_row` for every interior row of `output`.
    ///
    /// `output` is a row-major buffer with `cols` samples per row and
    /// `output.len() / cols` rows. Rows closer than `half` to the top or
    /// bottom edge are never visited. The callback receives the absolute row
    /// index and that row's mutable slice; it must not assume anything about
    /// the slice contents outside the columns it writes.
    pub fn for_each_interior_row<F>(&self, output: &mut [f32], cols: usize, half: usize, per_row: F)
    where
        F: Fn(usize, &mut [f32]) + Sync,
    {
        if cols == 0 {
            return;
        }
        let rows = output.len() / cols;
        let sizes = self.plan(rows, half);
        let interior_rows: usize = sizes.iter().sum();
        if interior_rows == 0 {
            return;
        }

        log::trace!(
            "dispatching {} interior rows in {} chunks: {:?}",
            interior_rows,
            sizes.len(),
            sizes
        );

        let interior = &mut output[half * cols..(half + interior_rows) * cols];
        self.run(interior, cols, half, &sizes, &per_row);
    }

    #[cfg(not(feature = "rayon"))]
    fn run<F>(&self, interior: &mut [f32], cols: usize, first_row: usize, sizes: &[usize], per_row: &F)
    where
        F: Fn(usize, &mut [f32]) + Sync,
    {
        dispatch(sizes, first_row, |row| {
            let offset = (row - first_row) * cols;
            per_row(row, &mut interior[offset..offset + cols]);
        });
    }

    #[cfg(feature = "rayon")]
    fn run<F>(&self, interior: &mut [f32], cols: usize, first_row: usize, sizes: &[usize], per_row: &F)
    where
        F: Fn(usize, &mut [f32]) + Sync,
    {
        use rayon::prelude::*;

        let mut chunks = Vec::with_capacity(sizes.len());
        let mut rest = interior;
        for range in chunk_ranges(sizes, first_row) {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len() * cols);
            chunks.push((range, head));
            rest = tail;
        }

        chunks.into_par_iter().for_each(|(range, rows)| {
            let start = range.start;
            dispatch(&[range.len()], start, |row| {
                let offset = (row - start) * cols;
                per_row(row, &mut rows[offset..offset + cols]);
            });
        });
    }
}

/// Number of rows at least `half` away from both the top and bottom edge.
#[inline]
pub const fn interior_row_count(rows: usize, half: usize) -> usize {
    rows.saturating_sub(2 * half)
}
