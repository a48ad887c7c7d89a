//! Look-before-you-leap input validation.
//!
//! Purely syntactic checks run before any numeric parsing: token count and
//! operation-name membership. Numeric validity is checked later by the
//! dispatcher so that format errors and value errors stay distinguishable.

use crate::ops::{self, Arity};

/// Validate tokenized input for the calculation pipeline.
///
/// Returns the user-facing error message on failure, `None` when the
/// tokens are well-formed. Never parses numbers and never mutates state.
pub fn validate_tokens(tokens: &[&str]) -> Option<String> {
    let Some(&operation) = tokens.first() else {
        return Some(
            "Error: Invalid format. Please enter a command.\n\
             Type 'help' for available commands."
                .to_string(),
        );
    };

    let Ok(entry) = ops::get_operation(operation) else {
        return Some(format!(
            "Error: Unknown operation '{operation}'.\n\
             Available operations: {}\n\
             Type 'help' for more information.",
            ops::supported_operations().join(", ")
        ));
    };

    let expected = entry.arity.operand_count() + 1;
    if tokens.len() != expected {
        return Some(match entry.arity {
            Arity::Unary => format!(
                "Error: Invalid format for '{operation}'. Please use: {operation} <number>\n\
                 Example: {operation} 9"
            ),
            Arity::Binary => "Error: Invalid format. Please use: <operation> <number1> <number2>\n\
                              Example: add 5 3\n\
                              Type 'help' for available commands."
                .to_string(),
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_binary_input() {
        assert_eq!(validate_tokens(&["add", "5", "3"]), None);
        // Value errors are not this stage's job.
        assert_eq!(validate_tokens(&["divide", "10", "0"]), None);
    }

    #[test]
    fn test_valid_unary_input() {
        assert_eq!(validate_tokens(&["sqrt", "9"]), None);
    }

    #[test]
    fn test_empty_input() {
        let msg = validate_tokens(&[]).unwrap();
        assert!(msg.contains("Invalid format"));
    }

    #[test]
    fn test_unknown_operation() {
        let msg = validate_tokens(&["frobnicate", "1", "2"]).unwrap();
        assert!(msg.contains("Unknown operation 'frobnicate'"));
        assert!(msg.contains("add"));
    }

    #[test]
    fn test_wrong_token_count_binary() {
        let msg = validate_tokens(&["add", "5"]).unwrap();
        assert!(msg.contains("Invalid format"));
        assert!(msg.contains("<number1> <number2>"));

        let msg = validate_tokens(&["add", "5", "3", "1"]).unwrap();
        assert!(msg.contains("Invalid format"));
    }

    #[test]
    fn test_wrong_token_count_unary() {
        let msg = validate_tokens(&["sqrt", "9", "3"]).unwrap();
        assert!(msg.contains("Invalid format for 'sqrt'"));
        assert!(msg.contains("sqrt <number>"));
    }

    #[test]
    fn test_non_numeric_tokens_pass_format_check() {
        // LBYL stops at syntax; "abc" is caught by the parse stage.
        assert_eq!(validate_tokens(&["add", "abc", "def"]), None);
    }
}
