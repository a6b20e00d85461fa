//! Five-valued logic algebra used throughout the core
//!
//! The domain is {0, 1, X, D, D'}, where D represents the faulty circuit at
//! value 0 when the fault-free circuit is 1, and D' is the dual. AND/OR/NOT
//! follow the standard D-calculus.

use std::fmt;

/// A value in the five-valued logic domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    /// Logic zero
    Zero,
    /// Logic one
    One,
    /// Unknown
    X,
    /// Faulty circuit at 0, fault-free at 1
    D,
    /// Faulty circuit at 1, fault-free at 0
    DBar,
}

impl Value {
    /// Build a value from a plain boolean
    pub fn from_bool(b: bool) -> Value {
        if b {
            Value::One
        } else {
            Value::Zero
        }
    }

    /// Return the fault-free projection of this value: D behaves as 1, D' as 0
    pub fn good_value(&self) -> Value {
        match self {
            Value::D => Value::One,
            Value::DBar => Value::Zero,
            v => *v,
        }
    }

    /// Returns true for D or D'
    pub fn is_faulty(&self) -> bool {
        matches!(self, Value::D | Value::DBar)
    }

    /// Returns true for 0 or 1
    pub fn is_binary(&self) -> bool {
        matches!(self, Value::Zero | Value::One)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Zero => write!(f, "0"),
            Value::One => write!(f, "1"),
            Value::X => write!(f, "X"),
            Value::D => write!(f, "D"),
            Value::DBar => write!(f, "D'"),
        }
    }
}

/// Logical negation: 0<->1, X->X, D<->D'
pub fn not(a: Value) -> Value {
    match a {
        Value::Zero => Value::One,
        Value::One => Value::Zero,
        Value::X => Value::X,
        Value::D => Value::DBar,
        Value::DBar => Value::D,
    }
}

/// Two-input AND over the five-valued domain
pub fn and2(a: Value, b: Value) -> Value {
    use Value::*;
    match (a, b) {
        (Zero, _) | (_, Zero) => Zero,
        (One, One) => One,
        (One, v) | (v, One) => v,
        (X, _) | (_, X) => X,
        (D, D) => D,
        (DBar, DBar) => DBar,
        (D, DBar) | (DBar, D) => Zero,
    }
}

/// Two-input OR over the five-valued domain: the dual of [`and2`]
pub fn or2(a: Value, b: Value) -> Value {
    not(and2(not(a), not(b)))
}
