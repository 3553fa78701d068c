//! Row-block partitioning of the image across render threads.
//!
//! Each worker receives one contiguous band of full rows, so its slice of the
//! framebuffer is a single contiguous range that can be split off with
//! `split_at_mut`.

use std::ops::Range;
use std::thread;

/// A contiguous band of image rows rendered by one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBlock {
    /// Index of the worker that renders this block
    pub index: usize,
    /// Rows covered, top to bottom
    pub rows: Range<u32>,
}

impl RowBlock {
    /// Number of rows in this block.
    pub fn height(&self) -> u32 {
        self.rows.end - self.rows.start
    }

    /// Number of pixels in this block for an image `width` pixels wide.
    pub fn pixel_count(&self, width: u32) -> usize {
        self.height() as usize * width as usize
    }
}

/// Split `height` rows into at most `workers` contiguous blocks.
///
/// Every block gets `height / workers` rows and the first `height % workers`
/// blocks one more. Blocks that would be empty are dropped, so fewer rows
/// than workers yields one single-row block per row.
pub fn row_blocks(height: u32, workers: usize) -> Vec<RowBlock> {
    let workers = workers.max(1) as u32;
    let base = height / workers;
    let extra = height % workers;

    let mut blocks = Vec::with_capacity(workers.min(height) as usize);
    let mut start = 0;
    for i in 0..workers {
        let rows = base + u32::from(i < extra);
        if rows == 0 {
            break;
        }
        blocks.push(RowBlock {
            index: blocks.len(),
            rows: start..start + rows,
        });
        start += rows;
    }

    blocks
}

/// Number of render threads: the hardware parallelism, but never fewer than `min_workers`.
pub fn worker_count(min_workers: usize) -> usize {
    let available = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    available.max(min_workers).max(1)
}
