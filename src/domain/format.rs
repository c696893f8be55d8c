//! Number rendering shared by the step derivation, the log table and the UI.
//!
//! Both formatters follow the conventions of JavaScript number output so the
//! step text reads the same as the calculator it reproduces: `Infinity` and
//! `NaN` are spelled out and very large or very small magnitudes switch to
//! exponent notation.

/// Digits after the point needed to print any `f64` exactly (2^-1074 has 1074).
const EXACT_DIGITS: usize = 1100;

/// Magnitude at and above which numbers render in exponent notation.
const EXPONENT_ABOVE: f64 = 1e21;

/// Magnitude below which non-zero numbers render in exponent notation.
const EXPONENT_BELOW: f64 = 1e-6;

/// Formats `x` with exactly `places` decimals.
///
/// Rounds to nearest on the exact binary value, and an exact tie goes away
/// from zero (`0.125` to two places is `0.13`). Negative zero renders as `0`,
/// so `-0.0` and `0.0` look the same. Magnitudes of `1e21` and above fall back
/// to [`plain`].
///
/// # Examples
///
/// ```
/// use logbook::domain::fixed;
///
/// assert_eq!(fixed(std::f64::consts::LN_10, 6), "2.302585");
/// assert_eq!(fixed(-0.0, 2), "0.00");
/// assert_eq!(fixed(2.5, 0), "3");
/// assert_eq!(fixed(f64::INFINITY, 6), "Infinity");
/// ```
pub fn fixed(x: f64, places: usize) -> String {
    if !x.is_finite() || x.abs() >= EXPONENT_ABOVE {
        return plain(x);
    }
    let x = if x == 0.0 { 0.0 } else { x };
    let x = if is_exact_tie(x, places) { next_away_from_zero(x) } else { x };
    format!("{:.*}", places, x)
}

/// Shortest representation that reads back as the same number (`100`, `2.5`).
///
/// Switches to exponent notation outside `[1e-6, 1e21)`, writing `1e+21` and
/// `1e-7`.
pub fn plain(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let x = if x == 0.0 { 0.0 } else { x };
    let magnitude = x.abs();
    if magnitude >= EXPONENT_ABOVE || (magnitude > 0.0 && magnitude < EXPONENT_BELOW) {
        let scientific = format!("{:e}", x);
        return match scientific.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => scientific,
        };
    }
    format!("{}", x)
}

/// True when `x` lies exactly halfway between two `places`-decimal neighbours.
fn is_exact_tie(x: f64, places: usize) -> bool {
    let exact = format!("{:.*}", EXACT_DIGITS, x.abs());
    let Some((_, fraction)) = exact.split_once('.') else {
        return false;
    };
    let rest = fraction.as_bytes().get(places..).unwrap_or_default();
    matches!(rest.split_first(), Some((b'5', tail)) if tail.iter().all(|&d| d == b'0'))
}

/// Adjacent `f64` one step further from zero. `x` must be finite and non-zero.
fn next_away_from_zero(x: f64) -> f64 {
    f64::from_bits(x.to_bits() + 1)
}
