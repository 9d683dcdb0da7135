//! Floating-point assertions shared by unit and integration tests.

use crate::coordinate::Point;
use crate::utils::normalize_longitude;

#[inline]
pub fn f64_to_ordered_u64(x: f64) -> u64 {
    let bits = x.to_bits();
    if bits & 0x8000_0000_0000_0000 != 0 {
        !bits
    } else {
        bits | 0x8000_0000_0000_0000
    }
}

#[inline]
pub fn ulp_diff(a: f64, b: f64) -> u64 {
    f64_to_ordered_u64(a).abs_diff(f64_to_ordered_u64(b))
}

#[track_caller]
pub fn assert_ulp_le(a: f64, b: f64, max_ulp: u64, ctx: &str) {
    if a == 0.0 && b == 0.0 {
        return;
    }
    assert!(
        a.is_finite() && b.is_finite(),
        "non-finite value in {}",
        ctx
    );
    let d = ulp_diff(a, b);
    assert!(
        d <= max_ulp,
        "{}: ULP={} exceeds {}, a={} (0x{:016x}) b={} (0x{:016x})",
        ctx,
        d,
        max_ulp,
        a,
        a.to_bits(),
        b,
        b.to_bits()
    );
}

/// Asserts two angles in degrees agree within `tol` modulo 360°.
#[track_caller]
pub fn assert_angle_close(a: f64, b: f64, tol: f64, ctx: &str) {
    assert!(a.is_finite() && b.is_finite(), "non-finite angle in {}", ctx);
    let d = normalize_longitude(a - b).abs();
    assert!(d <= tol, "{}: |{} - {}| = {} exceeds {}", ctx, a, b, d, tol);
}

/// Asserts two coordinate pairs agree within `tol` degrees, comparing `x`
/// modulo 360°.
#[track_caller]
pub fn assert_point_close(actual: Point, expected: Point, tol: f64) {
    assert_angle_close(actual.x(), expected.x(), tol, "x");
    assert!(
        (actual.y() - expected.y()).abs() <= tol,
        "y: |{} - {}| exceeds {}",
        actual.y(),
        expected.y(),
        tol
    );
}

#[macro_export]
macro_rules! assert_ulp_lt {
    ($a:expr, $b:expr, $max_ulp:expr) => {
        $crate::test_helpers::assert_ulp_le(
            $a,
            $b,
            $max_ulp,
            &format!(
                "ULP check failed: {} vs {} (max_ulp={})",
                stringify!($a),
                stringify!($b),
                $max_ulp
            ),
        )
    };
    ($a:expr, $b:expr, $max_ulp:expr, $($arg:tt)*) => {
        $crate::test_helpers::assert_ulp_le($a, $b, $max_ulp, &format!($($arg)*))
    };
}
