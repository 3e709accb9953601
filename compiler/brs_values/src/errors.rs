//! Runtime conditions and statement control flow.
//!
//! `EvalErrorKind` is the structured category; factory functions
//! (`type_mismatch()`, `unresolved_reference()`, ...) are the public way to
//! build an `EvalError`. Locations are attached by the evaluator at the
//! innermost node that has one, and each call frame an error unwinds
//! through appends its function name to `backtrace`.

use std::fmt;

use brs_ir::{Location, ValueKind};
use thiserror::Error;

use crate::Value;

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

/// Result of executing a statement: `Ok(())` means fall through to the next
/// statement.
pub type ExecResult = Result<(), ControlAction>;

/// Non-local control flow out of a statement.
#[derive(Clone, Debug)]
pub enum ControlAction {
    /// `exit for`
    ExitFor,
    /// `exit while`
    ExitWhile,
    /// `return` with an optional value.
    Return(Option<Value>),
    /// A runtime condition; aborts the script unless a caller handles it.
    Error(EvalError),
}

impl From<EvalError> for ControlAction {
    fn from(error: EvalError) -> Self {
        ControlAction::Error(error)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    // Operators
    #[error("Type Mismatch. Operator \"{operator}\" can't be applied to \"{left}\" and \"{right}\"")]
    TypeMismatch {
        operator: String,
        left: ValueKind,
        right: ValueKind,
    },
    #[error("Type Mismatch. Operator \"{operator}\" can't be applied to \"{operand}\"")]
    UnaryTypeMismatch {
        operator: String,
        operand: ValueKind,
    },
    #[error("Attempting to compare non-primitive values: \"{left}\" {operator} \"{right}\"")]
    NotComparable {
        operator: String,
        left: String,
        right: String,
    },
    #[error("Divide by Zero")]
    DivideByZero,

    // Names
    #[error("Reference to undefined variable '{name}'")]
    UnresolvedReference { name: String },
    #[error("Cannot assign a value to reserved name '{name}'")]
    ReservedWordAssignment { name: String },
    #[error("Type Mismatch. Attempting to assign \"{got}\" to \"{name}\" which requires \"{expected}\"")]
    AssignmentTypeMismatch {
        name: String,
        expected: ValueKind,
        got: ValueKind,
    },

    // Calls
    #[error("'{name}' requires {expected} arguments, but received {got}")]
    ArityMismatch {
        name: String,
        expected: String,
        got: usize,
    },
    #[error("Type Mismatch. '{function}' argument '{argument}' must be of type {expected}, but received {got}")]
    ArgumentTypeMismatch {
        function: String,
        argument: String,
        expected: ValueKind,
        got: ValueKind,
    },
    #[error("Type Mismatch. '{function}' must return a value of type {expected}, but returned {got}")]
    ReturnTypeMismatch {
        function: String,
        expected: ValueKind,
        got: ValueKind,
    },
    #[error("Attempting to return a value from void function '{function}'")]
    VoidReturnValue { function: String },
    #[error("'{function}' must return a value of type {expected}")]
    MissingReturnValue {
        function: String,
        expected: ValueKind,
    },
    #[error("'{target}' is not a function")]
    NotCallable { target: String },
    #[error("Stack overflow: call depth exceeded {depth}")]
    StackOverflow { depth: usize },

    // Objects
    #[error("Attempting to index into non-indexable value of type {target}")]
    NotIndexable { target: String },
    #[error("Invalid index of type {index} for {target}")]
    InvalidIndex { target: String, index: ValueKind },
    #[error("Array index {index} is out of range (maximum length {limit})")]
    IndexOutOfRange { index: i64, limit: usize },
    #[error("Attempting to set property '{field}' on {target}")]
    InvalidFieldAssignment { target: String, field: String },
    #[error("Attempting to iterate across values of non-iterable type {target}")]
    NotIterable { target: String },

    // Statements
    #[error("'{statement}' condition must evaluate to a Boolean, but got {got}")]
    ConditionNotBoolean { statement: String, got: ValueKind },
    #[error("'{statement}' {part} must be numeric, but got {got}")]
    NonNumericLoopBound {
        statement: String,
        part: String,
        got: ValueKind,
    },

    #[error("{message}")]
    Custom { message: String },
}

/// A runtime condition raised during evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Where the condition was raised, once known.
    pub location: Option<Location>,
    /// Names of the functions the error unwound through, innermost first.
    pub backtrace: Vec<String>,
}

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            message: message.into(),
        })
    }

    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            location: None,
            backtrace: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach `location` unless a more precise one is already present.
    #[must_use]
    pub fn with_location_if_missing(mut self, location: &Location) -> Self {
        if self.location.is_none() {
            self.location = Some(location.clone());
        }
        self
    }

    /// Record that the error unwound through `function`.
    #[must_use]
    pub fn with_frame(mut self, function: &str) -> Self {
        self.backtrace.push(function.to_string());
        self
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{location}: {}", self.kind)?,
            None => write!(f, "{}", self.kind)?,
        }
        for frame in &self.backtrace {
            write!(f, "\n  in {frame}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

// Operator Errors

#[cold]
pub fn type_mismatch(operator: &str, left: ValueKind, right: ValueKind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        operator: operator.to_string(),
        left,
        right,
    })
}

#[cold]
pub fn unary_type_mismatch(operator: &str, operand: ValueKind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnaryTypeMismatch {
        operator: operator.to_string(),
        operand,
    })
}

#[cold]
pub fn not_comparable(operator: &str, left: &Value, right: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotComparable {
        operator: operator.to_string(),
        left: left.describe(),
        right: right.describe(),
    })
}

#[cold]
pub fn divide_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivideByZero)
}

// Name Errors

#[cold]
pub fn unresolved_reference(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnresolvedReference {
        name: name.to_string(),
    })
}

#[cold]
pub fn reserved_word_assignment(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReservedWordAssignment {
        name: name.to_string(),
    })
}

#[cold]
pub fn assignment_type_mismatch(name: &str, expected: ValueKind, got: ValueKind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AssignmentTypeMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

// Call Errors

#[cold]
pub fn arity_mismatch(name: &str, expected: String, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn argument_type_mismatch(
    function: &str,
    argument: &str,
    expected: ValueKind,
    got: ValueKind,
) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentTypeMismatch {
        function: function.to_string(),
        argument: argument.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn return_type_mismatch(function: &str, expected: ValueKind, got: ValueKind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReturnTypeMismatch {
        function: function.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn void_return_value(function: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::VoidReturnValue {
        function: function.to_string(),
    })
}

#[cold]
pub fn missing_return_value(function: &str, expected: ValueKind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingReturnValue {
        function: function.to_string(),
        expected,
    })
}

#[cold]
pub fn not_callable(target: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        target: target.describe(),
    })
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

// Object Errors

#[cold]
pub fn not_indexable(target: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIndexable {
        target: target.describe(),
    })
}

#[cold]
pub fn invalid_index(target: &str, index: ValueKind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidIndex {
        target: target.to_string(),
        index,
    })
}

#[cold]
pub fn index_out_of_range(index: i64, limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfRange { index, limit })
}

#[cold]
pub fn invalid_field_assignment(target: &str, field: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidFieldAssignment {
        target: target.to_string(),
        field: field.to_string(),
    })
}

#[cold]
pub fn not_iterable(target: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIterable {
        target: target.describe(),
    })
}

// Statement Errors

#[cold]
pub fn condition_not_boolean(statement: &str, got: ValueKind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConditionNotBoolean {
        statement: statement.to_string(),
        got,
    })
}

#[cold]
pub fn non_numeric_loop_bound(statement: &str, part: &str, got: ValueKind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NonNumericLoopBound {
        statement: statement.to_string(),
        part: part.to_string(),
        got,
    })
}
