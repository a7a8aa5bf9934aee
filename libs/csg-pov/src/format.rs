//! `%g` style number formatting for scene text.

use config::constants::G_FORMAT_PRECISION;
use glam::DVec3;

/// Formats `value` the way C's `%g` does at the default precision.
///
/// Six significant digits, trailing zeros removed, scientific notation when
/// the decimal exponent is below -4 or at least the precision.
///
/// # Examples
/// ```
/// use csg_pov::format::g;
/// assert_eq!(g(10.0), "10");
/// assert_eq!(g(0.5), "0.5");
/// assert_eq!(g(1.0 / 3.0), "0.333333");
/// assert_eq!(g(1234567.0), "1.23457e+06");
/// assert_eq!(g(0.00001), "1e-05");
/// ```
pub fn g(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        // Keeps the sign of negative zero, as printf does.
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = G_FORMAT_PRECISION.max(1);
    // Rounding to the target precision decides the exponent, so 999999.5
    // switches to scientific notation.
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_trailing_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Formats a vector as a POV-Ray vector literal, `<x, y, z>`.
///
/// # Examples
/// ```
/// use csg_pov::format::vector;
/// use glam::DVec3;
/// assert_eq!(vector(DVec3::new(0.0, -1.5, 10.0)), "<0, -1.5, 10>");
/// ```
pub fn vector(v: DVec3) -> String {
    format!("<{}, {}, {}>", g(v.x), g(v.y), g(v.z))
}

/// Formats a vector space-separated, as used in descriptive comments.
pub fn triple(v: DVec3) -> String {
    format!("{} {} {}", g(v.x), g(v.y), g(v.z))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(g(0.0), "0");
        assert_eq!(g(1.0), "1");
        assert_eq!(g(-42.0), "-42");
        assert_eq!(g(100000.0), "100000");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(g(2.5), "2.5");
        assert_eq!(g(0.1), "0.1");
        assert_eq!(g(0.0001), "0.0001");
        assert_eq!(g(3.14159265), "3.14159");
        assert_eq!(g(-0.125), "-0.125");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(g(1e6), "1e+06");
        assert_eq!(g(1.5e-5), "1.5e-05");
        assert_eq!(g(-2.5e10), "-2.5e+10");
        assert_eq!(g(1e100), "1e+100");
    }

    #[test]
    fn test_rounding_moves_exponent() {
        assert_eq!(g(999999.5), "1e+06");
        assert_eq!(g(0.99999999), "1");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(g(f64::NAN), "nan");
        assert_eq!(g(f64::INFINITY), "inf");
        assert_eq!(g(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(g(-0.0), "-0");
    }

    #[test]
    fn test_vector_forms() {
        let v = DVec3::new(1.0, 2.25, -3.0);
        assert_eq!(vector(v), "<1, 2.25, -3>");
        assert_eq!(triple(v), "1 2.25 -3");
    }
}
