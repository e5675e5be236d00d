use std::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
    ops,
};

use thiserror::Error;


/// log2 of the number of QPEL units in one full pixel.
pub const QPEL_SHIFT: u8 = 2;

/// Rounding offset added before dropping the QPEL fraction, half of a full
/// pixel step.
const QPEL_ROUND: i32 = 1 << (QPEL_SHIFT - 1);

/// `scale` works in 1/256 units of temporal distance.
const SCALE_SHIFT: u32 = 8;

/// A motion vector in quarter pixel units.
///
/// `x` is the horizontal displacement, `y` the vertical one. Both
/// components can also be viewed as one packed 32-bit word with `x` in the
/// low half and `y` in the high half, see [`MotionVector::word`]. Equality
/// and [`MotionVector::is_zero`] are defined on that packed word.
///
/// Component-wise arithmetic (`+`, `-`, `*`, negation, shifts) wraps in 16
/// bits exactly like the codec arithmetic it models. Keeping sums within
/// range is up to the caller; [`MotionVector::scale`] is the only operation
/// that saturates.
#[derive(Clone, Copy, Debug, Default, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionVector {
    x: i16,
    y: i16,
}

impl MotionVector {
    /// The zero vector, packed word 0.
    pub const ZERO: MotionVector = MotionVector { x: 0, y: 0 };

    /// Builds a vector from its horizontal and vertical components.
    #[inline]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Same as [`MotionVector::ZERO`].
    #[inline]
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Builds a vector from wider integers, rejecting components that do
    /// not fit in 16 bits.
    ///
    /// # Errors
    ///
    /// - Returns `InvalidMotionVector` if either component is outside
    ///   `i16::MIN..=i16::MAX`.
    #[inline]
    pub fn try_new(x: i32, y: i32) -> Result<Self, InvalidMotionVector> {
        match (i16::try_from(x), i16::try_from(y)) {
            (Ok(x), Ok(y)) => Ok(Self { x, y }),
            _ => Err(InvalidMotionVector { x, y }),
        }
    }

    /// Decomposes a packed word: the low 16 bits become `x`, the high 16
    /// bits become `y`.
    #[inline]
    pub const fn from_word(word: u32) -> Self {
        Self {
            x: word as u16 as i16,
            y: (word >> 16) as u16 as i16,
        }
    }

    /// The packed form of this vector, `x` in bits 0..16 and `y` in bits
    /// 16..32, both two's complement.
    #[inline]
    pub const fn word(self) -> u32 {
        ((self.y as u16 as u32) << 16) | self.x as u16 as u32
    }

    /// Little-endian bytes of the packed word.
    #[inline]
    pub const fn to_le_bytes(self) -> [u8; 4] {
        self.word().to_le_bytes()
    }

    /// Inverse of [`MotionVector::to_le_bytes`].
    #[inline]
    pub const fn from_le_bytes(bytes: [u8; 4]) -> Self {
        Self::from_word(u32::from_le_bytes(bytes))
    }

    /// Horizontal component.
    #[inline]
    pub const fn horizontal(self) -> i16 {
        self.x
    }

    /// Vertical component.
    #[inline]
    pub const fn vertical(self) -> i16 {
        self.y
    }

    /// Replaces the horizontal component, keeping the vertical one.
    #[inline]
    pub fn set_horizontal(&mut self, x: i16) {
        self.x = x;
    }

    /// Replaces the vertical component, keeping the horizontal one.
    #[inline]
    pub fn set_vertical(&mut self, y: i16) {
        self.y = y;
    }

    /// Overwrites both components at once.
    #[inline]
    pub fn set(&mut self, x: i16, y: i16) {
        *self = Self { x, y };
    }

    /// Overwrites both components from a packed word.
    #[inline]
    pub fn set_word(&mut self, word: u32) {
        *self = Self::from_word(word);
    }

    /// Resets to the zero vector.
    #[inline]
    pub fn set_zero(&mut self) {
        *self = Self::ZERO;
    }

    /// Magnitude of the horizontal component. Widened so that `i16::MIN`
    /// has a representable result.
    #[inline]
    pub const fn abs_horizontal(self) -> i32 {
        (self.x as i32).abs()
    }

    /// Magnitude of the vertical component.
    #[inline]
    pub const fn abs_vertical(self) -> i32 {
        (self.y as i32).abs()
    }

    /// Both components are zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.word() == 0
    }

    /// Converts a QPEL vector to full pixel precision, rounding halves up:
    /// `(c + 2) >> 2` per component.
    ///
    /// The sum is taken in 32 bits, so components near `i16::MAX` do not
    /// wrap: `32767` maps to `8192`. Truncating `c + 2` to 16 bits before
    /// the shift, as some encoders do, would give `-8192` instead.
    #[inline]
    pub const fn round_to_fullpel(self) -> Self {
        Self {
            x: ((self.x as i32 + QPEL_ROUND) >> QPEL_SHIFT) as i16,
            y: ((self.y as i32 + QPEL_ROUND) >> QPEL_SHIFT) as i16,
        }
    }

    /// Converts a full pixel vector to QPEL precision.
    #[inline]
    pub const fn to_qpel(self) -> Self {
        Self {
            x: self.x << QPEL_SHIFT,
            y: self.y << QPEL_SHIFT,
        }
    }

    /// Rescales the vector by `factor / 256`, where `factor` is the ratio
    /// of two reference distances.
    ///
    /// Each product is rounded symmetrically around zero (the magnitude is
    /// rounded with a `+127` bias) and the result is clamped to the 16-bit
    /// range instead of wrapping.
    #[inline]
    pub fn scale(self, factor: i32) -> Self {
        Self {
            x: scale_component(self.x, factor),
            y: scale_component(self.y, factor),
        }
    }

    /// Clamps each component into `[min, max]` of the same axis.
    ///
    /// `min` must not exceed `max` on either axis; with inverted bounds the
    /// result is `min` on that axis. Use [`MvBounds`](crate::MvBounds) for a
    /// box validated at construction.
    #[inline]
    pub fn clipped(self, min: MotionVector, max: MotionVector) -> Self {
        Self {
            x: clip3(min.x, max.x, self.x),
            y: clip3(min.y, max.y, self.y),
        }
    }

    /// True when either component lies strictly outside `[min, max]`.
    #[inline]
    pub const fn is_out_of_range(self, min: MotionVector, max: MotionVector) -> bool {
        self.x < min.x || self.x > max.x || self.y < min.y || self.y > max.y
    }

    /// Component-wise minimum.
    #[inline]
    #[must_use]
    pub fn min(self, other: MotionVector) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    /// Component-wise maximum.
    #[inline]
    #[must_use]
    pub fn max(self, other: MotionVector) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }

    /// Component-wise median of three vectors.
    #[inline]
    pub fn median(a: MotionVector, b: MotionVector, c: MotionVector) -> Self {
        Self {
            x: median3(a.x, b.x, c.x),
            y: median3(a.y, b.y, c.y),
        }
    }
}

fn scale_component(c: i16, factor: i32) -> i16 {
    // i64 so that an arbitrary factor cannot overflow the product
    let t = i64::from(factor) * i64::from(c);
    let scaled = (t + 127 + i64::from(t < 0)) >> SCALE_SHIFT;
    scaled.clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16
}

/// Clamp that never panics, even with `lo > hi`.
const fn clip3(lo: i16, hi: i16, v: i16) -> i16 {
    let v = if v > hi { hi } else { v };
    if v < lo { lo } else { v }
}

fn median3(a: i16, b: i16, c: i16) -> i16 {
    a.min(b).max(a.max(b).min(c))
}

impl PartialEq for MotionVector {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.word() == other.word()
    }
}

impl Hash for MotionVector {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word().hash(state);
    }
}

impl Display for MotionVector {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<u32> for MotionVector {
    #[inline]
    fn from(word: u32) -> Self {
        Self::from_word(word)
    }
}

impl From<MotionVector> for u32 {
    #[inline]
    fn from(mv: MotionVector) -> Self {
        mv.word()
    }
}

impl From<(i16, i16)> for MotionVector {
    #[inline]
    fn from((x, y): (i16, i16)) -> Self {
        Self::new(x, y)
    }
}

impl TryFrom<(i32, i32)> for MotionVector {
    type Error = InvalidMotionVector;

    #[inline]
    fn try_from((x, y): (i32, i32)) -> Result<Self, Self::Error> {
        Self::try_new(x, y)
    }
}

impl ops::Add<MotionVector> for MotionVector {
    type Output = MotionVector;

    #[inline]
    fn add(self, rhs: MotionVector) -> MotionVector {
        MotionVector {
            x: self.x.wrapping_add(rhs.x),
            y: self.y.wrapping_add(rhs.y),
        }
    }
}

impl ops::Sub<MotionVector> for MotionVector {
    type Output = MotionVector;

    #[inline]
    fn sub(self, rhs: MotionVector) -> MotionVector {
        MotionVector {
            x: self.x.wrapping_sub(rhs.x),
            y: self.y.wrapping_sub(rhs.y),
        }
    }
}

impl ops::AddAssign<MotionVector> for MotionVector {
    #[inline]
    fn add_assign(&mut self, rhs: MotionVector) {
        *self = *self + rhs;
    }
}

impl ops::SubAssign<MotionVector> for MotionVector {
    #[inline]
    fn sub_assign(&mut self, rhs: MotionVector) {
        *self = *self - rhs;
    }
}

impl ops::Neg for MotionVector {
    type Output = MotionVector;

    #[inline]
    fn neg(self) -> MotionVector {
        MotionVector {
            x: self.x.wrapping_neg(),
            y: self.y.wrapping_neg(),
        }
    }
}

impl ops::Mul<i16> for MotionVector {
    type Output = MotionVector;

    #[inline]
    fn mul(self, rhs: i16) -> MotionVector {
        MotionVector {
            x: self.x.wrapping_mul(rhs),
            y: self.y.wrapping_mul(rhs),
        }
    }
}

/// Arithmetic right shift of both components.
///
/// # Panics
///
/// - In debug builds, if `rhs` is 16 or more.
impl ops::Shr<u8> for MotionVector {
    type Output = MotionVector;

    #[inline]
    fn shr(self, rhs: u8) -> MotionVector {
        debug_assert!(rhs < 16, "shift amount {rhs} out of range");
        MotionVector {
            x: self.x >> rhs,
            y: self.y >> rhs,
        }
    }
}

/// Left shift of both components.
///
/// # Panics
///
/// - In debug builds, if `rhs` is 16 or more.
impl ops::Shl<u8> for MotionVector {
    type Output = MotionVector;

    #[inline]
    fn shl(self, rhs: u8) -> MotionVector {
        debug_assert!(rhs < 16, "shift amount {rhs} out of range");
        MotionVector {
            x: self.x << rhs,
            y: self.y << rhs,
        }
    }
}

impl ops::ShrAssign<u8> for MotionVector {
    #[inline]
    fn shr_assign(&mut self, rhs: u8) {
        *self = *self >> rhs;
    }
}

impl ops::ShlAssign<u8> for MotionVector {
    #[inline]
    fn shl_assign(&mut self, rhs: u8) {
        *self = *self << rhs;
    }
}

/// A component did not fit in 16 bits.
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
#[error("motion vector ({x}, {y}) does not fit in 16 bits")]
pub struct InvalidMotionVector {
    /// Requested horizontal component.
    pub x: i32,
    /// Requested vertical component.
    pub y: i32,
}
