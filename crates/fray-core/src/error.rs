//! The fault taxonomy for agent program execution.
//!
//! Every runtime violation of an opcode's preconditions is bot-fatal and
//! never arena-fatal: the tick driver converts a fault into bot death,
//! the arena reports a diagnostic, and the battle continues.

use std::error::Error;
use std::fmt;

/// A runtime fault raised while executing one opcode.
///
/// Faults carry enough context to produce a useful diagnostic together
/// with the source line recovered by the program's token bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fault {
    /// An opcode required more operands than the stack held.
    StackUnderflow {
        /// The opcode that came up short.
        op: &'static str,
    },
    /// Operand-stack depth exceeded the cap before dispatch.
    StackOverflow,
    /// An operand had the wrong shape for the opcode.
    Type {
        /// The opcode that rejected its operand.
        op: &'static str,
        /// The shape the opcode required.
        expected: &'static str,
        /// The shape it found.
        found: &'static str,
    },
    /// A control-flow target named a label that does not exist.
    UndefinedLabel {
        /// The missing label name.
        name: String,
    },
    /// Division or modulo with a zero divisor.
    DivisionByZero,
    /// A token that is no opcode, string literal, or parseable number.
    UnknownToken {
        /// The offending token.
        token: String,
    },
    /// The program counter left the token stream: execution ran off the
    /// end, or a computed jump targeted an index outside the program.
    PcOutOfRange {
        /// The out-of-range token index.
        pc: i64,
    },
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StackUnderflow { op } => write!(f, "{op}: stack underflow"),
            Self::StackOverflow => write!(f, "stack overflow"),
            Self::Type {
                op,
                expected,
                found,
            } => write!(f, "{op}: expected {expected}, found {found}"),
            Self::UndefinedLabel { name } => write!(f, "undefined label '{name}'"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::UnknownToken { token } => write!(f, "unknown token '{token}'"),
            Self::PcOutOfRange { pc } => write!(f, "program counter out of range ({pc})"),
        }
    }
}

impl Error for Fault {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_opcode() {
        let fault = Fault::Type {
            op: "STORE",
            expected: "string",
            found: "integer",
        };
        assert_eq!(fault.to_string(), "STORE: expected string, found integer");
    }

    #[test]
    fn display_quotes_the_token() {
        let fault = Fault::UnknownToken {
            token: "FROBNICATE".into(),
        };
        assert_eq!(fault.to_string(), "unknown token 'FROBNICATE'");
    }
}
