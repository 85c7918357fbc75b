//! Three-channel working-space pixel and its 8-bit raw encoding.
//!
//! Channels are `a` (horizontal direction), `m` (flatness marker) and `b`
//! (vertical direction). Raw samples map into working space by centering the
//! direction channels on [`DIRECTION_BIAS`] and scaling everything by 1/255.

use std::ops::{Add, Mul};

/// Raw sample value that maps to a zero direction component (`0x88`).
pub const DIRECTION_BIAS: f64 = 136.0;
/// Full scale of one 8-bit raw sample.
pub const RAW_SCALE: f64 = 255.0;

/// Offset that shifts signed direction channels from [-1, 1] to [0, 2].
pub const ENCODE_OFFSET: Pixel = Pixel::new(1.0, 0.0, 1.0);
/// Per-channel gain mapping the shifted working range onto [0, 255].
pub const ENCODE_GAIN: Pixel = Pixel::new(RAW_SCALE / 2.0, RAW_SCALE, RAW_SCALE / 2.0);

/// One working-space sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pixel {
    pub a: f64,
    pub m: f64,
    pub b: f64,
}

impl Pixel {
    /// The zero pixel `(0, 0, 0)`; also the padding value around every grid.
    pub const ZERO: Pixel = Pixel::new(0.0, 0.0, 0.0);

    pub const fn new(a: f64, m: f64, b: f64) -> Self {
        Self { a, m, b }
    }

    /// Maps one raw `[R, G, B]` sample into working space.
    pub fn from_raw(raw: [u8; 3]) -> Self {
        Self {
            a: (f64::from(raw[0]) - DIRECTION_BIAS) / RAW_SCALE,
            m: f64::from(raw[1]) / RAW_SCALE,
            b: (f64::from(raw[2]) - DIRECTION_BIAS) / RAW_SCALE,
        }
    }

    /// Encodes to raw samples via `(p + (1, 0, 1)) * (127.5, 255, 127.5)`.
    ///
    /// Each channel is truncated toward zero and saturated into [0, 255].
    pub fn to_raw(self) -> [u8; 3] {
        let p = (self + ENCODE_OFFSET) * ENCODE_GAIN;
        // `as u8` on f64 truncates and saturates.
        [p.a as u8, p.m as u8, p.b as u8]
    }

    /// Channels as `[a, m, b]`, the order kernels index them in.
    pub fn channels(self) -> [f64; 3] {
        [self.a, self.m, self.b]
    }

    /// True when both direction components exceed `threshold` in magnitude.
    pub fn is_seed(self, threshold: f64) -> bool {
        self.a.abs() > threshold && self.b.abs() > threshold
    }

    /// True when the marker channel exceeds `threshold`.
    pub fn is_flat(self, threshold: f64) -> bool {
        self.m > threshold
    }

    /// Squared length of the direction components.
    pub fn direction_norm_sq(self) -> f64 {
        self.a * self.a + self.b * self.b
    }

    pub fn is_finite(self) -> bool {
        self.a.is_finite() && self.m.is_finite() && self.b.is_finite()
    }
}

impl Add for Pixel {
    type Output = Pixel;

    fn add(self, rhs: Pixel) -> Pixel {
        Pixel::new(self.a + rhs.a, self.m + rhs.m, self.b + rhs.b)
    }
}

/// Element-wise (Hadamard) product.
impl Mul for Pixel {
    type Output = Pixel;

    fn mul(self, rhs: Pixel) -> Pixel {
        Pixel::new(self.a * rhs.a, self.m * rhs.m, self.b * rhs.b)
    }
}
