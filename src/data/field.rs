use std::ops::{Index, IndexMut};

use log::debug;
use rayon::prelude::*;

use crate::data::{bounds::MvBounds, motion::MotionVector};

/// One motion vector per block of a frame, stored in raster order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionVectorField {
    mvs: Box<[MotionVector]>,
    cols: usize,
    rows: usize,
}

impl MotionVectorField {
    /// A `cols`x`rows` field of zero vectors.
    ///
    /// # Panics
    ///
    /// - If `cols * rows` overflows `usize`.
    #[inline]
    pub fn new(cols: usize, rows: usize) -> Self {
        let len = cols
            .checked_mul(rows)
            .expect("motion vector field size overflows usize");
        Self {
            // dynamic allocation: once per frame
            mvs: vec![MotionVector::zero(); len].into_boxed_slice(),
            cols,
            rows,
        }
    }

    /// Number of blocks per row.
    #[inline]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of block rows.
    #[inline]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// The vector of the block at (`col`, `row`), `None` outside the field.
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> Option<MotionVector> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.mvs[row * self.cols + col])
    }

    /// All vectors in raster order.
    #[inline]
    pub fn as_slice(&self) -> &[MotionVector] {
        &self.mvs
    }

    /// Rescales every vector by `factor / 256`, see [`MotionVector::scale`].
    /// Returns how many vectors changed.
    #[inline]
    pub fn scale_all(&mut self, factor: i32) -> usize {
        let changed = self.update_rows(|mv| mv.scale(factor));
        debug!("scaled MV field by {}/256: {} vectors changed", factor, changed);
        changed
    }

    /// Clips every vector into `bounds`. Returns how many vectors were
    /// outside the box.
    #[inline]
    pub fn clip_all(&mut self, bounds: &MvBounds) -> usize {
        let changed = self.update_rows(|mv| bounds.clip(mv));
        debug!(
            "clipped MV field to {} .. {}: {} vectors changed",
            bounds.min(),
            bounds.max(),
            changed
        );
        changed
    }

    fn update_rows<F>(&mut self, f: F) -> usize
    where
        F: Fn(MotionVector) -> MotionVector + Sync,
    {
        if self.cols == 0 {
            return 0;
        }
        self.mvs
            .par_chunks_mut(self.cols)
            .map(|row| {
                row.iter_mut()
                    .map(|mv| {
                        let new = f(*mv);
                        let changed = new != *mv;
                        *mv = new;
                        usize::from(changed)
                    })
                    .sum::<usize>()
            })
            .sum()
    }
}

impl Index<usize> for MotionVectorField {
    type Output = [MotionVector];

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.mvs[index * self.cols..(index + 1) * self.cols]
    }
}

impl IndexMut<usize> for MotionVectorField {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.mvs[index * self.cols..(index + 1) * self.cols]
    }
}
