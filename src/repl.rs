//! Command dispatcher and interactive loop.
//!
//! [`Calculator`] is the facade over configuration, history, undo/redo,
//! observers, validation, and the calculation factory. One line of input
//! is fully processed before the next is read; every handler returns the
//! feedback text, which is also what the tests assert on.
//!
//! Validation and numeric parsing run before any state is touched, so a
//! rejected command never mutates history and never takes a snapshot. The
//! undo snapshot for an accepted command is taken *before* the arithmetic
//! runs; if the arithmetic then fails (say, divide by zero) the snapshot
//! stays behind as a deliberate no-op undo point equal to the pre-attempt
//! state.

use std::io::{BufRead, Write};

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation::CalculationFactory;
use crate::config::Settings;
use crate::history::{AutoSaveObserver, Caretaker, HistoryStore, LoggingObserver};
use crate::ops::{self, Arity};
use crate::storage::CsvBackend;
use crate::validate::validate_tokens;

const WELCOME: &str = "\
================================
   Welcome to the Calculator!
================================
Type 'help' for available commands.
Type 'exit' to quit.";

/// Interactive calculator facade.
pub struct Calculator {
    history: HistoryStore,
    caretaker: Caretaker,
}

impl Calculator {
    /// Wire up the subsystems: history store on the configured CSV path,
    /// the logging observer, the auto-save observer when enabled, and an
    /// auto-load of any existing history.
    pub fn new(settings: Settings) -> Self {
        let backend = CsvBackend::new(settings.history_file.clone());
        let mut history = HistoryStore::new(Box::new(backend), settings.max_history);

        history.add_observer(Box::new(LoggingObserver::new()));
        if settings.auto_save {
            let save_backend = CsvBackend::new(settings.history_file.clone());
            history.add_observer(Box::new(AutoSaveObserver::new(save_backend)));
        }

        if let Err(e) = history.load() {
            tracing::warn!(target: "decalc::repl", "could not load existing history: {e}");
        }

        Self {
            history,
            caretaker: Caretaker::new(),
        }
    }

    /// Read-only view of the history, for callers and tests.
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Run the read-eval-print loop until `exit` or end of input.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> std::io::Result<()> {
        writeln!(output, "{WELCOME}")?;

        let mut lines = input.lines();
        loop {
            write!(output, "\n>>> ")?;
            output.flush()?;

            // End of input behaves like exit.
            let Some(line) = lines.next() else {
                writeln!(output, "\nGoodbye!")?;
                return Ok(());
            };
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.eq_ignore_ascii_case("exit") {
                writeln!(output, "Goodbye!")?;
                return Ok(());
            }

            writeln!(output, "{}", self.process_line(trimmed))?;
        }
    }

    /// Parse and execute a single line of input, returning feedback text.
    pub fn process_line(&mut self, line: &str) -> String {
        let command = line.trim().to_lowercase();
        debug!(target: "decalc::repl", "dispatching: {command}");

        match command.as_str() {
            "help" | "?" => return self.handle_help(),
            "history" => return self.handle_history(),
            "clear" => return self.handle_clear(),
            "undo" => return self.handle_undo(),
            "redo" => return self.handle_redo(),
            "save" => return self.handle_save(),
            "load" => return self.handle_load(),
            "exit" => return "Goodbye!".to_string(),
            _ => {}
        }

        let tokens: Vec<&str> = command.split_whitespace().collect();
        if let Some(message) = validate_tokens(&tokens) {
            return message;
        }

        // Validation guarantees the token count matches the arity.
        let operation_name = tokens[0];
        let arity = match ops::get_operation(operation_name) {
            Ok(op) => op.arity,
            Err(e) => return format!("Error: {e}"),
        };

        let (operand_a, operand_b) = match Self::parse_operands(&tokens, arity) {
            Ok(pair) => pair,
            Err(message) => return message,
        };

        // Snapshot before mutating; a failed computation leaves this
        // snapshot in place (see module docs).
        self.caretaker.save(&self.history);
        let calc = match CalculationFactory::create(operand_a, operand_b, operation_name) {
            Ok(calc) => calc,
            Err(e) => return format!("Error: {e}"),
        };

        self.history.add(&calc);
        format!("Result: {calc}")
    }

    fn parse_operands(tokens: &[&str], arity: Arity) -> Result<(Decimal, Decimal), String> {
        match arity {
            Arity::Unary => match tokens[1].parse() {
                Ok(a) => Ok((a, Decimal::ZERO)),
                Err(_) => Err(format!(
                    "Error: '{}' is not a valid number. Please enter numeric values.",
                    tokens[1]
                )),
            },
            Arity::Binary => match (tokens[1].parse(), tokens[2].parse()) {
                (Ok(a), Ok(b)) => Ok((a, b)),
                _ => Err(format!(
                    "Error: '{}' and/or '{}' are not valid numbers. Please enter numeric values.",
                    tokens[1], tokens[2]
                )),
            },
        }
    }

    fn handle_help(&self) -> String {
        format!(
            "=== Calculator Help ===\n\
             \n\
             Usage: <operation> <number1> <number2>\n\
             \n\
             Operations: {}\n\
             \n\
             Examples:\n  \
             add 5 3        => 5 + 3 = 8\n  \
             subtract 10 4  => 10 - 4 = 6\n  \
             multiply 6 7   => 6 * 7 = 42\n  \
             divide 20 4    => 20 / 4 = 5\n  \
             power 2 8      => 2 ^ 8 = 256\n  \
             root 9 2       => 9 \u{221a} 2 = 3\n  \
             percentage 200 10 => 200 % 10 = 20\n  \
             sqrt 9         => sqrt 9 = 3\n\
             \n\
             Special commands:\n  \
             help / ?   - Show this help message\n  \
             history    - Show calculation history\n  \
             clear      - Clear calculation history\n  \
             undo       - Undo last action\n  \
             redo       - Redo last undone action\n  \
             save       - Save history to file\n  \
             load       - Load history from file\n  \
             exit       - Exit the calculator",
            ops::supported_operations().join(", ")
        )
    }

    fn handle_history(&self) -> String {
        let records = self.history.records();
        if records.is_empty() {
            return "No calculations in history.".to_string();
        }

        let mut lines = vec!["=== Calculation History ===".to_string()];
        for (i, row) in records.iter().enumerate() {
            lines.push(format!(
                "  {}. {} {} {} = {}",
                i + 1,
                row.operand_a,
                row.operation,
                row.operand_b,
                row.result
            ));
        }
        lines.push(format!("\nTotal: {} calculation(s)", records.len()));
        lines.join("\n")
    }

    fn handle_clear(&mut self) -> String {
        // Snapshot first so clear is undoable.
        self.caretaker.save(&self.history);
        self.history.clear();
        "History cleared.".to_string()
    }

    fn handle_undo(&mut self) -> String {
        if self.caretaker.undo(&mut self.history) {
            "Undo successful.".to_string()
        } else {
            "Nothing to undo.".to_string()
        }
    }

    fn handle_redo(&mut self) -> String {
        if self.caretaker.redo(&mut self.history) {
            "Redo successful.".to_string()
        } else {
            "Nothing to redo.".to_string()
        }
    }

    fn handle_save(&self) -> String {
        match self.history.save() {
            Ok(path) => format!("History saved to '{}'.", path.display()),
            Err(e) => format!("Error: {e}"),
        }
    }

    fn handle_load(&mut self) -> String {
        match self.history.load() {
            Ok(count) => format!(
                "Loaded {count} calculation(s) from '{}'.",
                self.history.location().display()
            ),
            Err(e) => format!("Error: {e}"),
        }
    }
}
