use log::debug;
use thiserror::Error;

use crate::data::motion::{MotionVector, QPEL_SHIFT};

/// A per-axis bounding box for motion vectors, `min <= max` on both axes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct MvBounds {
    min: MotionVector,
    max: MotionVector,
}

impl MvBounds {
    /// A validated box from `min` and `max`.
    ///
    /// # Errors
    ///
    /// - Returns `InvalidBounds` if `min` is greater than `max` on either
    ///   axis.
    #[inline]
    pub fn new(min: MotionVector, max: MotionVector) -> Result<Self, InvalidBounds> {
        if min.horizontal() > max.horizontal() || min.vertical() > max.vertical() {
            return Err(InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// The QPEL box that keeps a `block_w`x`block_h` block at pixel
    /// position (`block_x`, `block_y`) inside a `frame_w`x`frame_h` picture
    /// extended by `margin` pixels on every side.
    ///
    /// Limits that do not fit in 16 bits saturate. A block that does not
    /// fit in the extended picture gets a degenerate box pinned at the
    /// lower limit.
    #[inline]
    pub fn for_block(
        frame_w: usize,
        frame_h: usize,
        block_x: usize,
        block_y: usize,
        block_w: usize,
        block_h: usize,
        margin: usize,
    ) -> Self {
        let (min_x, max_x) = axis_limits(frame_w, block_x, block_w, margin);
        let (min_y, max_y) = axis_limits(frame_h, block_y, block_h, margin);
        let bounds = Self {
            min: MotionVector::new(min_x, min_y),
            max: MotionVector::new(max_x, max_y),
        };

        debug!(
            "MV bounds for {}x{} block at ({}, {}) in {}x{} frame: {} .. {}",
            block_w, block_h, block_x, block_y, frame_w, frame_h, bounds.min, bounds.max
        );

        bounds
    }

    /// Lower corner of the box.
    #[inline]
    pub const fn min(&self) -> MotionVector {
        self.min
    }

    /// Upper corner of the box.
    #[inline]
    pub const fn max(&self) -> MotionVector {
        self.max
    }

    /// `mv` lies inside the box, borders included.
    #[inline]
    pub const fn contains(&self, mv: MotionVector) -> bool {
        !mv.is_out_of_range(self.min, self.max)
    }

    /// Snaps `mv` onto the nearest point of the box.
    #[inline]
    pub fn clip(&self, mv: MotionVector) -> MotionVector {
        mv.clipped(self.min, self.max)
    }
}

fn axis_limits(frame_len: usize, pos: usize, len: usize, margin: usize) -> (i16, i16) {
    let wide = |v: usize| i64::try_from(v).unwrap_or(i64::MAX);
    let lo = wide(pos).saturating_add(wide(margin)).saturating_neg();
    let hi = wide(frame_len)
        .saturating_add(wide(margin))
        .saturating_sub(wide(pos).saturating_add(wide(len)));
    let to_qpel = |v: i64| -> i16 {
        v.saturating_mul(1 << QPEL_SHIFT)
            .clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16
    };
    let lo = to_qpel(lo);
    (lo, to_qpel(hi).max(lo))
}

/// The lower corner of a box exceeds its upper corner on some axis.
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
#[error("invalid motion vector bounds: min {min} exceeds max {max}")]
pub struct InvalidBounds {
    /// Requested lower corner.
    pub min: MotionVector,
    /// Requested upper corner.
    pub max: MotionVector,
}
