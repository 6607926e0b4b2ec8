/// Sign of `x` as -1, 0 or 1.
///
/// Unlike `f64::signum`, zero maps to zero, so a zero command yields zero
/// torque and a stationary rotor sees no kinetic friction direction.
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Magnitude of `magnitude` with the sign of `sign_of`, zero when `sign_of` is zero.
pub fn with_sign_of(magnitude: f64, sign_of: f64) -> f64 {
    sign(sign_of) * magnitude.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_of_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-0.2), -1.0);
    }

    #[test]
    fn test_with_sign_of() {
        assert_eq!(with_sign_of(2.0, -5.0), -2.0);
        assert_eq!(with_sign_of(-2.0, 1.0), 2.0);
        assert_eq!(with_sign_of(2.0, 0.0), 0.0);
    }
}
