//! Row-parallel helpers for the per-pixel loops.
//!
//! Every row writes only into its own output slice, so the parallel and
//! sequential paths produce bit-identical results.

use rayon::prelude::*;

/// Minimum number of output elements before work is split across threads.
pub const PARALLEL_THRESHOLD: usize = 16 * 1024;

/// Call `f(y, row)` for every `width`-sized row of `data`.
///
/// Small buffers are processed sequentially; a zero `width` is a no-op.
pub fn par_rows_mut<T, F>(data: &mut [T], width: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    if width == 0 {
        return;
    }

    if data.len() >= PARALLEL_THRESHOLD {
        data.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    } else {
        for (y, row) in data.chunks_mut(width).enumerate() {
            f(y, row);
        }
    }
}
