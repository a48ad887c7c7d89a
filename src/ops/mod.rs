//! Arithmetic operation registry.
//!
//! A static strategy table maps operation names to their implementations.
//! The table is the single source of truth for "known operations": the
//! validator, the calculation factory, and the help text all enumerate it,
//! so a new operation only needs one entry here.
//!
//! All arithmetic is exact base-10 decimal. Operations do not pre-check
//! their inputs beyond what their own domain requires; callers handle the
//! returned [`CalcError`].

use rust_decimal::{Decimal, MathematicalOps};

use crate::error::{CalcError, CalcResult};

/// Number of operands an operation consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
}

impl Arity {
    /// Operand count, which is also the expected token count minus one.
    pub fn operand_count(self) -> usize {
        match self {
            Arity::Unary => 1,
            Arity::Binary => 2,
        }
    }
}

/// A single registry entry. Unary operations ignore the second operand.
#[derive(Debug)]
pub struct Operation {
    pub name: &'static str,
    pub arity: Arity,
    /// Infix symbol used when formatting results.
    pub symbol: &'static str,
    func: fn(Decimal, Decimal) -> CalcResult<Decimal>,
}

impl Operation {
    pub fn apply(&self, a: Decimal, b: Decimal) -> CalcResult<Decimal> {
        (self.func)(a, b)
    }
}

/// The registry. Built once at compile time, never mutated; slice order is
/// the stable enumeration order users see in help and error messages.
static OPERATIONS: &[Operation] = &[
    Operation { name: "add", arity: Arity::Binary, symbol: "+", func: add },
    Operation { name: "subtract", arity: Arity::Binary, symbol: "-", func: subtract },
    Operation { name: "multiply", arity: Arity::Binary, symbol: "*", func: multiply },
    Operation { name: "divide", arity: Arity::Binary, symbol: "/", func: divide },
    Operation { name: "power", arity: Arity::Binary, symbol: "^", func: power },
    Operation { name: "root", arity: Arity::Binary, symbol: "√", func: root },
    Operation { name: "percentage", arity: Arity::Binary, symbol: "%", func: percentage },
    Operation { name: "sqrt", arity: Arity::Unary, symbol: "sqrt", func: sqrt },
];

/// Look up an operation by name.
///
/// The error message lists every supported operation so the user never has
/// to guess what the registry contains.
pub fn get_operation(name: &str) -> CalcResult<&'static Operation> {
    OPERATIONS
        .iter()
        .find(|op| op.name == name)
        .ok_or_else(|| CalcError::unknown_operation(name, &supported_operations().join(", ")))
}

/// All operation names, in registry order.
pub fn supported_operations() -> Vec<&'static str> {
    OPERATIONS.iter().map(|op| op.name).collect()
}

fn range_error() -> CalcError {
    CalcError::InvalidOperation("Result exceeds the supported numeric range.".to_string())
}

fn add(a: Decimal, b: Decimal) -> CalcResult<Decimal> {
    a.checked_add(b).ok_or_else(range_error)
}

fn subtract(a: Decimal, b: Decimal) -> CalcResult<Decimal> {
    a.checked_sub(b).ok_or_else(range_error)
}

fn multiply(a: Decimal, b: Decimal) -> CalcResult<Decimal> {
    a.checked_mul(b).ok_or_else(range_error)
}

fn divide(a: Decimal, b: Decimal) -> CalcResult<Decimal> {
    if b.is_zero() {
        return Err(CalcError::DivisionByZero(
            "Division by zero is not allowed.".to_string(),
        ));
    }
    a.checked_div(b).ok_or_else(range_error)
}

fn power(a: Decimal, b: Decimal) -> CalcResult<Decimal> {
    use rust_decimal::prelude::ToPrimitive;

    // Integral exponents stay exact via repeated multiplication.
    if b.fract().is_zero() {
        if let Some(exp) = b.to_i64() {
            return a.checked_powi(exp).ok_or_else(range_error);
        }
    }
    // powd is exp(ln|a| * b) under the hood; a negative base has no
    // real-valued power for a fractional exponent.
    if a.is_sign_negative() && !a.is_zero() {
        return Err(CalcError::InvalidOperation(
            "Fractional power of a negative number is not allowed.".to_string(),
        ));
    }
    a.checked_powd(b).ok_or_else(range_error)
}

fn root(a: Decimal, b: Decimal) -> CalcResult<Decimal> {
    if b.is_zero() {
        return Err(CalcError::DivisionByZero(
            "Root degree cannot be zero.".to_string(),
        ));
    }
    if a.is_sign_negative() && !a.is_zero() {
        return Err(CalcError::InvalidOperation(
            "Root of a negative number is not allowed.".to_string(),
        ));
    }
    // Degree 2 goes through the exact square root; powd is series-based
    // and would return 2.999... for root(9, 2).
    if b == Decimal::TWO {
        return sqrt(a, Decimal::ZERO);
    }
    let inverse = Decimal::ONE.checked_div(b).ok_or_else(range_error)?;
    a.checked_powd(inverse).ok_or_else(range_error)
}

fn percentage(a: Decimal, b: Decimal) -> CalcResult<Decimal> {
    let fraction = b.checked_div(Decimal::ONE_HUNDRED).ok_or_else(range_error)?;
    a.checked_mul(fraction).ok_or_else(range_error)
}

fn sqrt(a: Decimal, _b: Decimal) -> CalcResult<Decimal> {
    if a.is_sign_negative() && !a.is_zero() {
        return Err(CalcError::InvalidOperation(
            "Square root of a negative number is not allowed.".to_string(),
        ));
    }
    a.sqrt().ok_or_else(range_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn apply(name: &str, a: &str, b: &str) -> CalcResult<Decimal> {
        get_operation(name).unwrap().apply(d(a), d(b))
    }

    #[test]
    fn test_basic_arithmetic_is_exact() {
        assert_eq!(apply("add", "5", "3").unwrap(), d("8"));
        assert_eq!(apply("add", "0.1", "0.2").unwrap(), d("0.3"));
        assert_eq!(apply("subtract", "10", "4").unwrap(), d("6"));
        assert_eq!(apply("multiply", "6", "7").unwrap(), d("42"));
        assert_eq!(apply("divide", "20", "4").unwrap(), d("5"));
    }

    #[test]
    fn test_power_and_root() {
        assert_eq!(apply("power", "2", "8").unwrap(), d("256"));
        assert_eq!(apply("power", "10", "0").unwrap(), d("1"));
        assert_eq!(apply("root", "9", "2").unwrap(), d("3"));
    }

    #[test]
    fn test_percentage() {
        assert_eq!(apply("percentage", "200", "10").unwrap(), d("20"));
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(apply("sqrt", "9", "0").unwrap(), d("3"));
        assert_eq!(apply("sqrt", "0", "0").unwrap(), d("0"));
    }

    #[test]
    fn test_divide_by_zero() {
        let err = apply("divide", "10", "0").unwrap_err();
        assert!(matches!(err, CalcError::DivisionByZero(_)));
    }

    #[test]
    fn test_root_degree_zero() {
        let err = apply("root", "9", "0").unwrap_err();
        assert!(matches!(err, CalcError::DivisionByZero(_)));
    }

    #[test]
    fn test_root_of_negative() {
        // Degree 2 and odd degrees alike; powd would fabricate a value.
        let err = apply("root", "-9", "2").unwrap_err();
        assert!(matches!(err, CalcError::InvalidOperation(_)));

        let err = apply("root", "-8", "3").unwrap_err();
        assert!(matches!(err, CalcError::InvalidOperation(_)));
    }

    #[test]
    fn test_fractional_power_of_negative() {
        let err = apply("power", "-8", "0.5").unwrap_err();
        assert!(matches!(err, CalcError::InvalidOperation(_)));

        // Integral exponents of negative bases stay fine.
        assert_eq!(apply("power", "-2", "3").unwrap(), d("-8"));
    }

    #[test]
    fn test_sqrt_of_negative() {
        let err = apply("sqrt", "-9", "0").unwrap_err();
        assert!(matches!(err, CalcError::InvalidOperation(_)));
    }

    #[test]
    fn test_unknown_operation_lists_supported() {
        let err = get_operation("modulo").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Unknown operation 'modulo'"));
        assert!(msg.contains("add"));
        assert!(msg.contains("sqrt"));
    }

    #[test]
    fn test_enumeration_order_is_stable() {
        assert_eq!(
            supported_operations(),
            vec![
                "add",
                "subtract",
                "multiply",
                "divide",
                "power",
                "root",
                "percentage",
                "sqrt"
            ]
        );
    }
}
