//! Step-by-step derivations for the "View Steps" screen.
//!
//! Each displayed intermediate is recomputed from the full-precision inputs
//! and rounded only when it is formatted, so rounding never compounds from
//! one step to the next.

use super::format::{fixed, plain};
use super::models::{Operation, Step};

/// Decimal places used for every number in a derivation.
pub const STEP_PRECISION: usize = 6;

fn step(index: usize, formula: String, explanation: impl Into<String>) -> Step {
    Step {
        index,
        formula,
        explanation: explanation.into(),
    }
}

/// Derivation for whichever operation was requested.
pub fn generate_steps(operation: Operation, base: f64, value: f64, result: f64) -> Vec<Step> {
    match operation {
        Operation::Log => generate_log_steps(base, value, result),
        Operation::Antilog => generate_antilog_steps(base, value, result),
    }
}

/// Five steps walking through the change-of-base formula.
///
/// # Examples
///
/// ```
/// use logbook::domain::generate_log_steps;
///
/// let steps = generate_log_steps(10.0, 100.0, 2.0);
/// assert_eq!(steps[4].formula, "4.605170 / 2.302585 = 2.000000");
/// ```
pub fn generate_log_steps(base: f64, value: f64, result: f64) -> Vec<Step> {
    let (b, v) = (plain(base), plain(value));
    let ln_value = fixed(value.ln(), STEP_PRECISION);
    let ln_base = fixed(base.ln(), STEP_PRECISION);

    vec![
        step(
            1,
            format!("log_{}({}) = ?", b, v),
            format!("We need to find the logarithm of {} with base {}", v, b),
        ),
        step(
            2,
            format!("log_{}({}) = ln({}) / ln({})", b, v, v, b),
            "Using change of base formula: log_a(b) = ln(b) / ln(a)",
        ),
        step(
            3,
            format!("ln({}) ≈ {}", v, ln_value),
            format!("Calculate the natural logarithm of {}", v),
        ),
        step(
            4,
            format!("ln({}) ≈ {}", b, ln_base),
            format!("Calculate the natural logarithm of {}", b),
        ),
        step(
            5,
            format!("{} / {} = {}", ln_value, ln_base, fixed(result, STEP_PRECISION)),
            "Divide the natural logarithms to get the final result",
        ),
    ]
}

/// Five steps rewriting `base^value` as `e^(value * ln(base))`.
pub fn generate_antilog_steps(base: f64, value: f64, result: f64) -> Vec<Step> {
    let (b, v) = (plain(base), plain(value));
    let ln_base = fixed(base.ln(), STEP_PRECISION);
    let exponent = fixed(value * base.ln(), STEP_PRECISION);

    vec![
        step(
            1,
            format!("antilog_{}({}) = {}^{}", b, v, b, v),
            "Antilog is the inverse of logarithm: antilog_a(x) = a^x",
        ),
        step(
            2,
            format!("{}^{} = e^({} × ln({}))", b, v, v, b),
            "Convert to exponential form using natural logarithm",
        ),
        step(
            3,
            format!("ln({}) ≈ {}", b, ln_base),
            format!("Calculate the natural logarithm of the base {}", b),
        ),
        step(
            4,
            format!("{} × {} = {}", v, ln_base, exponent),
            "Multiply the exponent by the natural logarithm of the base",
        ),
        step(
            5,
            format!("e^{} = {}", exponent, fixed(result, STEP_PRECISION)),
            "Calculate the exponential to get the final result",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calculate;

    fn formulas(steps: &[Step]) -> Vec<&str> {
        steps.iter().map(|s| s.formula.as_str()).collect()
    }

    #[test]
    fn test_log_steps_base_ten() {
        let steps = generate_log_steps(10.0, 100.0, 100f64.ln() / 10f64.ln());
        assert_eq!(
            formulas(&steps),
            vec![
                "log_10(100) = ?",
                "log_10(100) = ln(100) / ln(10)",
                "ln(100) ≈ 4.605170",
                "ln(10) ≈ 2.302585",
                "4.605170 / 2.302585 = 2.000000",
            ]
        );
        assert_eq!(steps[0].explanation, "We need to find the logarithm of 100 with base 10");
    }

    #[test]
    fn test_antilog_steps_base_two() {
        let result = (3.0 * 2f64.ln()).exp();
        let steps = generate_antilog_steps(2.0, 3.0, result);
        assert_eq!(
            formulas(&steps),
            vec![
                "antilog_2(3) = 2^3",
                "2^3 = e^(3 × ln(2))",
                "ln(2) ≈ 0.693147",
                "3 × 0.693147 = 2.079442",
                "e^2.079442 = 8.000000",
            ]
        );
        assert_eq!(steps[2].explanation, "Calculate the natural logarithm of the base 2");
    }

    #[test]
    fn test_steps_are_numbered_in_order() {
        for op in [Operation::Log, Operation::Antilog] {
            let steps = generate_steps(op, 3.0, 9.0, 2.0);
            let indices: Vec<usize> = steps.iter().map(|s| s.index).collect();
            assert_eq!(indices, vec![1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn test_antilog_fractional_exponent() {
        let steps = generate_antilog_steps(3.0, 0.5, 3f64.sqrt());
        assert_eq!(steps[2].formula, "ln(3) ≈ 1.098612");
        assert_eq!(steps[3].formula, "0.5 × 1.098612 = 0.549306");
    }

    #[test]
    fn test_zero_exponent_has_no_negative_zero() {
        let steps = generate_antilog_steps(0.5, 0.0, 1.0);
        assert_eq!(steps[3].formula, "0 × -0.693147 = 0.000000");
        assert_eq!(steps[4].formula, "e^0.000000 = 1.000000");
    }

    #[test]
    fn test_fractional_inputs_render_plainly() {
        let steps = generate_log_steps(2.5, 0.4, 0.4f64.ln() / 2.5f64.ln());
        assert_eq!(steps[0].formula, "log_2.5(0.4) = ?");
        assert_eq!(steps[2].formula, "ln(0.4) ≈ -0.916291");
    }

    #[test]
    fn test_huge_base_uses_exponent_notation_and_rounds_ties_up() {
        let calculation = calculate(Operation::Log, 2f64.powi(128), 2.0).unwrap();
        let steps = &calculation.steps;
        assert_eq!(steps[0].formula, "log_3.402823669209385e+38(2) = ?");
        assert_eq!(steps[3].formula, "ln(3.402823669209385e+38) ≈ 88.722839");
        assert_eq!(steps[4].formula, "0.693147 / 88.722839 = 0.007813");
    }

    #[test]
    fn test_overflowing_antilog_reads_infinity() {
        let calculation = calculate(Operation::Antilog, 10.0, 400.0).unwrap();
        assert!(calculation.result.is_infinite());
        assert_eq!(calculation.steps[3].formula, "400 × 2.302585 = 921.034037");
        assert_eq!(calculation.steps[4].formula, "e^921.034037 = Infinity");
    }
}
