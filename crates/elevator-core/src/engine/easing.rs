//! Easing curve for the elevator ride.
//!
//! Works on absolute values (time, start, change, duration) rather than a
//! normalized `[0, 1]` progress, so the result is a scroll position directly.

/// Quadratic ease-in-out.
///
/// Accelerates over the first half of `duration` and decelerates over the
/// second half, symmetric about the midpoint.
///
/// # Arguments
/// * `elapsed` - Time since the ride started
/// * `start` - Starting position
/// * `change` - Total distance to travel (`end - start`)
/// * `duration` - Ride duration, same unit as `elapsed`
#[inline]
pub fn ease_in_out_quad(elapsed: f64, start: f64, change: f64, duration: f64) -> f64 {
    let t = elapsed / (duration / 2.0);
    if t < 1.0 {
        return start + (change / 2.0) * t * t;
    }
    let t = t - 1.0;
    start - (change / 2.0) * (t * (t - 2.0) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_hit_start_and_end() {
        for (start, end, duration) in [(800.0, 0.0, 1000.0), (0.0, 1150.0, 300.0), (42.0, 43.0, 1.5)] {
            let change = end - start;
            assert!((ease_in_out_quad(0.0, start, change, duration) - start).abs() < 1e-9);
            assert!((ease_in_out_quad(duration, start, change, duration) - end).abs() < 1e-9);
        }
    }

    #[test]
    fn test_midpoint_is_halfway() {
        assert!((ease_in_out_quad(500.0, 800.0, -800.0, 1000.0) - 400.0).abs() < 1e-9);
        assert!((ease_in_out_quad(50.0, 0.0, 10.0, 100.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric_about_midpoint() {
        let (start, change, duration) = (0.0, 100.0, 1000.0);
        for i in 0..=10 {
            let dt = i as f64 * 50.0;
            let before = ease_in_out_quad(500.0 - dt, start, change, duration);
            let after = ease_in_out_quad(500.0 + dt, start, change, duration);
            assert!((before + after - change).abs() < 1e-9, "asymmetric at dt={}", dt);
        }
    }

    #[test]
    fn test_monotonic_within_duration() {
        let mut prev = f64::MIN;
        for i in 0..=20 {
            let v = ease_in_out_quad(i as f64 * 50.0, 0.0, 300.0, 1000.0);
            assert!(v >= prev, "not monotonic at step {}", i);
            prev = v;
        }
    }

    #[test]
    fn test_slow_start_and_finish() {
        // First and last tenth move far less than a linear ride would
        let early = ease_in_out_quad(100.0, 0.0, 100.0, 1000.0);
        let late = ease_in_out_quad(900.0, 0.0, 100.0, 1000.0);
        assert!(early < 10.0);
        assert!(late > 90.0);
    }
}
