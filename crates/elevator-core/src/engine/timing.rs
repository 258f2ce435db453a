//! Ride timing: how long a trip takes and how far into it we are.

/// Milliseconds of ride time per unit of travel when no fixed duration is set.
pub const MS_PER_UNIT: f64 = 1.5;

/// Ride duration in milliseconds.
///
/// A positive `fixed_ms` wins. Otherwise farther trips take proportionally
/// longer, at [`MS_PER_UNIT`].
#[inline]
pub fn ride_duration(start: f64, end: f64, fixed_ms: Option<f64>) -> f64 {
    match fixed_ms {
        Some(ms) if ms > 0.0 => ms,
        _ => (end - start).abs() * MS_PER_UNIT,
    }
}

/// Time since the ride's first frame, never negative
#[inline]
pub fn elapsed(first_frame: f64, now: f64) -> f64 {
    (now - first_frame).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_duration_wins() {
        assert_eq!(ride_duration(800.0, 0.0, Some(1000.0)), 1000.0);
        assert_eq!(ride_duration(0.0, 0.0, Some(250.0)), 250.0);
    }

    #[test]
    fn test_distance_based_duration() {
        assert_eq!(ride_duration(800.0, 0.0, None), 1200.0);
        assert_eq!(ride_duration(0.0, 800.0, None), 1200.0);
        // Zero and negative fixed durations fall back to distance
        assert_eq!(ride_duration(100.0, 0.0, Some(0.0)), 150.0);
        assert_eq!(ride_duration(100.0, 0.0, Some(-5.0)), 150.0);
    }

    #[test]
    fn test_elapsed_clamps_backwards_clock() {
        assert_eq!(elapsed(100.0, 350.0), 250.0);
        assert_eq!(elapsed(100.0, 90.0), 0.0);
    }
}
