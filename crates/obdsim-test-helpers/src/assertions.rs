//! Assertions for sensor snapshots.

use obdsim_core::channel::{Channel, ChannelKind};
use obdsim_core::snapshot::SensorSnapshot;

/// Assert that two floating-point values are within `tolerance`.
///
/// ```rust
/// use obdsim_test_helpers::assert_approx_eq;
///
/// assert_approx_eq!(0.45_f64, 0.4500001_f64, 1e-3);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;
        let diff = (left - right).abs();
        if diff > tolerance {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`",
                left, right, diff, tolerance
            );
        }
    };
}

/// Returns true if `value` has at most two decimal places.
pub fn has_two_decimals(value: f64) -> bool {
    let scaled = value * 100.0;
    (scaled - scaled.round()).abs() < 1e-6
}

/// Assert that every channel of `snapshot` lies in its declared range.
///
/// # Panics
///
/// Panics naming the first offending channel and its value.
#[track_caller]
pub fn assert_in_range(snapshot: &SensorSnapshot) {
    if let Some(channel) = snapshot.out_of_range().first() {
        panic!(
            "{channel} = {} is outside {:?}",
            snapshot.value(*channel),
            channel.range()
        );
    }
}

/// Assert that every float channel of `snapshot` has at most two decimals.
///
/// # Panics
///
/// Panics naming the first offending channel and its value.
#[track_caller]
pub fn assert_rounded(snapshot: &SensorSnapshot) {
    for channel in Channel::ALL {
        if channel.kind() == ChannelKind::Float && !has_two_decimals(snapshot.value(channel)) {
            panic!(
                "{channel} = {} has more than two decimals",
                snapshot.value(channel)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_two_decimals() {
        assert!(has_two_decimals(0.45));
        assert!(has_two_decimals(-0.5));
        assert!(has_two_decimals(14.0));
        assert!(!has_two_decimals(0.456));
    }

    #[test]
    fn test_baseline_passes() {
        let baseline = SensorSnapshot::baseline();
        assert_in_range(&baseline);
        assert_rounded(&baseline);
    }

    #[test]
    #[should_panic(expected = "Coolant Temp")]
    fn test_out_of_range_panics() {
        let mut snapshot = SensorSnapshot::baseline();
        snapshot.coolant_temp_c = 10;
        assert_in_range(&snapshot);
    }
}
