//! Summary statistics over a decoded volume
//!
//! Zero is treated as background throughout: auto-windowing and the
//! histogram only consider strictly positive voxels.

use crate::volume::Volume;

/// Default number of histogram bins
pub const DEFAULT_HISTOGRAM_BINS: usize = 100;

/// Window estimate derived from the foreground intensity distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoWindow {
    pub center: f32,
    pub width: f32,
    pub min: f32,
    pub max: f32,
}

/// One histogram bin: left edge value and voxel count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub value: f32,
    pub count: usize,
}

/// One sample of the central intensity profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePoint {
    pub position: usize,
    pub intensity: f32,
}

/// Estimate window/level from the 1st and 99th percentiles of the
/// foreground voxels
///
/// An all-background volume yields the degenerate `{0, 1, 0, 1}` estimate;
/// a collapsed percentile range degenerates the width to 1.
#[must_use]
pub fn auto_window(volume: &Volume) -> AutoWindow {
    let mut foreground: Vec<f32> = volume
        .data()
        .iter()
        .copied()
        .filter(|&v| v > 0.0)
        .collect();

    if foreground.is_empty() {
        return AutoWindow {
            center: 0.0,
            width: 1.0,
            min: 0.0,
            max: 1.0,
        };
    }

    foreground.sort_by(f32::total_cmp);
    let count = foreground.len();
    let p1 = foreground[(count as f64 * 0.01) as usize];
    let p99 = foreground[((count as f64 * 0.99) as usize).min(count - 1)];

    let width = if p99 > p1 { p99 - p1 } else { 1.0 };

    AutoWindow {
        center: (p1 + p99) / 2.0,
        width,
        min: foreground[0],
        max: foreground[count - 1],
    }
}

/// Histogram of the foreground voxels over `[min, max)`
///
/// Values binning outside `[0, bins)` are discarded rather than clamped, so
/// the bin counts sum to at most the foreground voxel count.
#[must_use]
pub fn histogram(volume: &Volume, min: f32, max: f32, bins: usize) -> Vec<HistogramBin> {
    if bins == 0 || max <= min {
        return Vec::new();
    }

    let bin_width = (max - min) / bins as f32;
    let mut counts = vec![0usize; bins];

    for &value in volume.data() {
        if value <= 0.0 {
            continue;
        }
        let bin = ((value - min) / bin_width).floor();
        if bin >= 0.0 && bin < bins as f32 {
            counts[bin as usize] += 1;
        }
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            value: (i as f32).mul_add(bin_width, min),
            count,
        })
        .collect()
}

/// Intensity profile along the central X-line (`z = Z/2`, `y = Y/2`)
#[must_use]
pub fn profile_curve(volume: &Volume) -> Vec<ProfilePoint> {
    let dims = volume.dims();
    let z = (dims.z / 2) as i64;
    let y = (dims.y / 2) as i64;

    (0..dims.x)
        .map(|x| ProfilePoint {
            position: x,
            intensity: volume.voxel(x as i64, y, z),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{ramp_volume, volume_from_values};
    use approx::assert_relative_eq;

    #[test]
    fn auto_window_all_zero_volume_is_degenerate() {
        let volume = volume_from_values(2, 2, 2, &[0.0; 8]);
        let window = auto_window(&volume);
        assert_eq!(
            window,
            AutoWindow {
                center: 0.0,
                width: 1.0,
                min: 0.0,
                max: 1.0
            }
        );
    }

    #[test]
    fn auto_window_spans_foreground_percentiles() {
        let volume = ramp_volume();
        let window = auto_window(&volume);

        // Foreground is 1..=63; with 63 samples p1 = sorted[0], p99 = sorted[62]
        assert_relative_eq!(window.min, 1.0);
        assert_relative_eq!(window.max, 63.0);
        assert_relative_eq!(window.center, 32.0);
        assert_relative_eq!(window.width, 62.0);
    }

    #[test]
    fn auto_window_constant_foreground_degenerates_width() {
        let volume = volume_from_values(2, 2, 1, &[7.0, 7.0, 0.0, 7.0]);
        let window = auto_window(&volume);
        assert_relative_eq!(window.center, 7.0);
        assert_relative_eq!(window.width, 1.0);
    }

    #[test]
    fn histogram_counts_cover_foreground() {
        let volume = ramp_volume();
        let bins = histogram(&volume, 0.0, 64.0, 64);

        let total: usize = bins.iter().map(|b| b.count).sum();
        let foreground = volume.data().iter().filter(|&&v| v > 0.0).count();
        assert_eq!(total, foreground);

        // Each unit-wide bin above zero holds exactly one ramp value
        assert_eq!(bins[0].count, 0);
        assert!(bins[1..].iter().all(|b| b.count == 1));
    }

    #[test]
    fn histogram_bin_values_are_left_edges() {
        let volume = ramp_volume();
        let bins = histogram(&volume, 0.0, 64.0, 32);
        assert_relative_eq!(bins[0].value, 0.0);
        assert_relative_eq!(bins[1].value, 2.0);
        assert_relative_eq!(bins[31].value, 62.0);
    }

    #[test]
    fn histogram_discards_out_of_range_values() {
        let volume = volume_from_values(2, 2, 1, &[5.0, 50.0, 500.0, -5.0]);
        let bins = histogram(&volume, 0.0, 100.0, 10);
        let total: usize = bins.iter().map(|b| b.count).sum();
        // 500 falls past the last bin, -5 is background
        assert_eq!(total, 2);
    }

    #[test]
    fn histogram_degenerate_inputs_are_empty() {
        let volume = ramp_volume();
        assert!(histogram(&volume, 0.0, 64.0, 0).is_empty());
        assert!(histogram(&volume, 10.0, 10.0, 8).is_empty());
    }

    #[test]
    fn profile_curve_walks_the_central_line() {
        let volume = ramp_volume();
        let curve = profile_curve(&volume);

        assert_eq!(curve.len(), 4);
        // z = 2, y = 2: values 40..43
        for (x, point) in curve.iter().enumerate() {
            assert_eq!(point.position, x);
            assert_relative_eq!(point.intensity, (40 + x) as f32);
        }
    }
}
