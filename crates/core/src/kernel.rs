//! 3×3×3 convolution kernels.
//!
//! A [`Kernel`] is indexed `[row][column][channel]` with channels in
//! `[a, m, b]` order, matching [`Neighborhood`] and
//! [`Pixel::channels`](crate::pixel::Pixel::channels).

use crate::grid::Neighborhood;

/// Weights for one output sum over a 3×3 window of three-channel pixels.
pub type Kernel = [[[f64; 3]; 3]; 3];

/// Horizontal-direction kernel of the normal field: the sum of every `a`
/// sample plus the marker difference between the left and right columns.
pub const NORMAL_KERNEL_A: Kernel = [
    [[1.0, 1.0, 0.0], [1.0, 0.0, 0.0], [1.0, -1.0, 0.0]],
    [[1.0, 1.0, 0.0], [1.0, 0.0, 0.0], [1.0, -1.0, 0.0]],
    [[1.0, 1.0, 0.0], [1.0, 0.0, 0.0], [1.0, -1.0, 0.0]],
];

/// Vertical-direction kernel of the normal field: the sum of every `b`
/// sample plus the marker difference between the top and bottom rows.
pub const NORMAL_KERNEL_B: Kernel = [
    [[0.0, 1.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
    [[0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0]],
    [[0.0, -1.0, 1.0], [0.0, -1.0, 1.0], [0.0, -1.0, 1.0]],
];

const CENTER: f64 = 0.5 / 4.0;
const EDGE: f64 = 0.5 / 8.0;
const CORNER: f64 = 0.5 / 16.0;

/// Isotropic smoothing kernel of the distance field. Both direction channels
/// carry the same weights, so a sum weighs `a + b` together; each channel's
/// weights total 0.5 and the marker channel carries none.
pub const DISTANCE_KERNEL: Kernel = [
    [[CORNER, 0.0, CORNER], [EDGE, 0.0, EDGE], [CORNER, 0.0, CORNER]],
    [[EDGE, 0.0, EDGE], [CENTER, 0.0, CENTER], [EDGE, 0.0, EDGE]],
    [[CORNER, 0.0, CORNER], [EDGE, 0.0, EDGE], [CORNER, 0.0, CORNER]],
];

/// The two kernels driving the `a` and `b` output sums.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelPair {
    pub a: Kernel,
    pub b: Kernel,
}

impl KernelPair {
    pub const fn new(a: Kernel, b: Kernel) -> Self {
        Self { a, b }
    }

    /// Edge-detecting pair used by the normal field.
    pub const fn normal() -> Self {
        Self::new(NORMAL_KERNEL_A, NORMAL_KERNEL_B)
    }

    /// The same smoothing kernel for both sums, used by the distance field.
    pub const fn distance() -> Self {
        Self::new(DISTANCE_KERNEL, DISTANCE_KERNEL)
    }

    /// Weighted sums `(A, B)` over every row, column and channel of `nb`.
    pub fn weigh(&self, nb: &Neighborhood) -> (f64, f64) {
        let mut sum_a = 0.0;
        let mut sum_b = 0.0;
        for ((row, ka_row), kb_row) in nb.iter().zip(self.a.iter()).zip(self.b.iter()) {
            for ((pixel, ka), kb) in row.iter().zip(ka_row.iter()).zip(kb_row.iter()) {
                for ((v, wa), wb) in pixel.channels().iter().zip(ka.iter()).zip(kb.iter()) {
                    sum_a += wa * v;
                    sum_b += wb * v;
                }
            }
        }
        (sum_a, sum_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;

    fn uniform(p: Pixel) -> Neighborhood {
        [[p; 3]; 3]
    }

    #[test]
    fn zero_window_weighs_to_zero() {
        let (a, b) = KernelPair::normal().weigh(&uniform(Pixel::ZERO));
        assert_eq!((a, b), (0.0, 0.0));
    }

    #[test]
    fn distance_kernel_channel_weights_sum_to_half() {
        for channel in [0, 2] {
            let total: f64 = DISTANCE_KERNEL
                .iter()
                .flatten()
                .map(|channels| channels[channel])
                .sum();
            assert!((total - 0.5).abs() < 1e-12, "channel {channel}: {total}");
        }
    }

    #[test]
    fn distance_kernel_ignores_marker_channel() {
        let (a, b) = KernelPair::distance().weigh(&uniform(Pixel::new(0.0, 1.0, 0.0)));
        assert_eq!((a, b), (0.0, 0.0));
    }

    #[test]
    fn distance_kernel_mixes_direction_channels() {
        // A = B = 0.5 * (a + b) over a uniform window
        let (a, b) = KernelPair::distance().weigh(&uniform(Pixel::new(0.4, 0.0, -0.2)));
        assert!((a - 0.1).abs() < 1e-12, "a = {a}");
        assert_eq!(a, b);
    }

    #[test]
    fn distance_kernel_cancels_opposite_directions() {
        let (a, b) = KernelPair::distance().weigh(&uniform(Pixel::new(0.4, 0.0, -0.4)));
        assert!(a.abs() < 1e-12 && b.abs() < 1e-12, "({a}, {b})");
    }

    #[test]
    fn normal_kernels_sum_direction_channels() {
        let mut nb = uniform(Pixel::ZERO);
        for row in nb.iter_mut() {
            row[0] = Pixel::new(0.1, 0.0, 0.2);
        }
        let (a, b) = KernelPair::normal().weigh(&nb);
        assert!((a - 0.3).abs() < 1e-12, "a = {a}");
        assert!((b - 0.6).abs() < 1e-12, "b = {b}");
    }

    #[test]
    fn marker_column_cancels_in_vertical_sum() {
        let mut nb = uniform(Pixel::ZERO);
        for row in nb.iter_mut() {
            row[1] = Pixel::new(0.0, 1.0, 0.0);
        }
        let (_, b) = KernelPair::normal().weigh(&nb);
        assert!(b.abs() < 1e-12, "b = {b}");
    }

    #[test]
    fn marker_on_left_column_drives_horizontal_sum() {
        let mut nb = uniform(Pixel::ZERO);
        for row in nb.iter_mut() {
            row[0] = Pixel::new(0.0, 1.0, 0.0);
        }
        let (a, b) = KernelPair::normal().weigh(&nb);
        assert!((a - 3.0).abs() < 1e-12, "a = {a}");
        assert!(b.abs() < 1e-12, "b = {b}");
    }

    #[test]
    fn marker_on_top_row_drives_vertical_sum() {
        let mut nb = uniform(Pixel::ZERO);
        nb[0] = [Pixel::new(0.0, 1.0, 0.0); 3];
        let (a, b) = KernelPair::normal().weigh(&nb);
        assert!(a.abs() < 1e-12, "a = {a}");
        assert!((b - 3.0).abs() < 1e-12, "b = {b}");
    }

    #[test]
    fn pair_helpers_use_module_constants() {
        assert_eq!(KernelPair::normal().a, NORMAL_KERNEL_A);
        assert_eq!(KernelPair::normal().b, NORMAL_KERNEL_B);
        assert_eq!(KernelPair::distance().a, KernelPair::distance().b);
    }
}
