//! Calculation values and their factory.
//!
//! A [`Calculation`] is an immutable record of one arithmetic operation:
//! the operands, the registry entry that was applied, and the result. The
//! result is computed exactly once, at construction, and never recomputed.
//! Construction is all-or-nothing; a failed operation produces no value.

use std::fmt;

use rust_decimal::Decimal;

use crate::error::CalcResult;
use crate::ops::{self, Arity, Operation};

/// Immutable record of a single computed calculation.
///
/// Unary operations store their operand in `operand_a` and zero in
/// `operand_b` so one flattened shape covers both arities.
pub struct Calculation {
    pub operand_a: Decimal,
    pub operand_b: Decimal,
    operation: &'static Operation,
    pub result: Decimal,
}

impl Calculation {
    pub fn operation_name(&self) -> &'static str {
        self.operation.name
    }

    pub fn arity(&self) -> Arity {
        self.operation.arity
    }
}

impl fmt::Display for Calculation {
    /// User-facing form, e.g. `5 + 3 = 8` or `sqrt 9 = 3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operation.arity {
            Arity::Unary => write!(
                f,
                "{} {} = {}",
                self.operation.symbol, self.operand_a, self.result
            ),
            Arity::Binary => write!(
                f,
                "{} {} {} = {}",
                self.operand_a, self.operation.symbol, self.operand_b, self.result
            ),
        }
    }
}

impl fmt::Debug for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Calculation({}, {}, {}) = {}",
            self.operand_a, self.operand_b, self.operation.name, self.result
        )
    }
}

/// Creates [`Calculation`] values from operation names, keeping the
/// name-to-function mapping in the registry as the single source of truth.
pub struct CalculationFactory;

impl CalculationFactory {
    /// Look up `operation_name` and compute the result eagerly.
    ///
    /// Errors from the lookup (unknown name) or the arithmetic itself
    /// (division by zero, negative square root) propagate unchanged.
    pub fn create(
        operand_a: Decimal,
        operand_b: Decimal,
        operation_name: &str,
    ) -> CalcResult<Calculation> {
        let operation = ops::get_operation(operation_name)?;
        let result = operation.apply(operand_a, operand_b)?.normalize();
        Ok(Calculation {
            operand_a,
            operand_b,
            operation,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_result_computed_at_construction() {
        let calc = CalculationFactory::create(d("5"), d("3"), "add").unwrap();
        assert_eq!(calc.result, d("8"));
        assert_eq!(calc.operation_name(), "add");
    }

    #[test]
    fn test_display_binary() {
        let calc = CalculationFactory::create(d("5"), d("3"), "add").unwrap();
        assert_eq!(calc.to_string(), "5 + 3 = 8");

        let calc = CalculationFactory::create(d("20"), d("4"), "divide").unwrap();
        assert_eq!(calc.to_string(), "20 / 4 = 5");
    }

    #[test]
    fn test_display_unary() {
        let calc = CalculationFactory::create(d("9"), Decimal::ZERO, "sqrt").unwrap();
        assert_eq!(calc.to_string(), "sqrt 9 = 3");
    }

    #[test]
    fn test_division_result_is_normalized() {
        let calc = CalculationFactory::create(d("10"), d("4"), "divide").unwrap();
        assert_eq!(calc.to_string(), "10 / 4 = 2.5");
    }

    #[test]
    fn test_failed_construction_returns_no_value() {
        let err = CalculationFactory::create(d("10"), d("0"), "divide").unwrap_err();
        assert!(matches!(err, CalcError::DivisionByZero(_)));

        let err = CalculationFactory::create(d("1"), d("2"), "nope").unwrap_err();
        assert!(matches!(err, CalcError::InvalidOperation(_)));
    }
}
