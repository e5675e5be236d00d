//! Quarter pixel motion vectors for video motion estimation and
//! compensation.
//!
//! [`MotionVector`] is the fixed-point displacement type shared by motion
//! search, motion vector prediction, motion compensation and bitstream
//! coding. Its arithmetic is bit-exact 16-bit codec arithmetic: precision
//! conversion between QPEL and full pixel units, temporal distance scaling
//! with saturation, and per-axis range clipping.
//!
//! [`MvBounds`] and [`MotionVectorField`] are thin helpers for the common
//! ways callers apply those operations: to one block against the picture
//! borders, and to a whole frame of vectors at once.

mod data;

pub use crate::data::{
    bounds::{InvalidBounds, MvBounds},
    field::MotionVectorField,
    motion::{InvalidMotionVector, MotionVector, QPEL_SHIFT},
};
