//! Observed values, comparison operators and the `Symbol` cell they meet in.
//!
//! Any comparison whose receiver is Missing evaluates to `false` for every
//! operator. Missing propagates "no match" instead of raising.

use crate::error::NetTreeError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A comparable observation: numeric or textual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Text(_) => "text",
        }
    }

    /// Orders two values of the same kind. `Ok(None)` for unordered floats.
    pub fn try_cmp(&self, other: &Value) -> Result<Option<Ordering>, NetTreeError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(a.partial_cmp(b)),
            (Value::Text(a), Value::Text(b)) => Ok(Some(a.cmp(b))),
            _ => Err(NetTreeError::InvalidComparison {
                lhs: self.kind(),
                rhs: other.kind(),
            }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(v as f64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// The five comparison predicates a subrule can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
        }
    }

    #[inline]
    pub fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Le => ordering != Ordering::Greater,
            Operator::Ge => ordering != Ordering::Less,
        }
    }
}

impl FromStr for Operator {
    type Err = NetTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(Operator::Eq),
            "<" => Ok(Operator::Lt),
            ">" => Ok(Operator::Gt),
            "<=" => Ok(Operator::Le),
            ">=" => Ok(Operator::Ge),
            other => Err(NetTreeError::InvalidOperator(other.to_string())),
        }
    }
}

impl TryFrom<String> for Operator {
    type Error = NetTreeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time span covered by one cell, `start` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// One value observed on one series over one time interval. Immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    value: Option<Value>,
    series: usize,
    interval: Interval,
}

impl Symbol {
    /// NaN numbers are stored as Missing.
    pub fn new(value: Option<Value>, series: usize, interval: Interval) -> Self {
        let value = value.filter(|v| !matches!(v, Value::Number(n) if n.is_nan()));
        Self { value, series, interval }
    }

    pub fn missing(series: usize, interval: Interval) -> Self {
        Self { value: None, series, interval }
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn series(&self) -> usize {
        self.series
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn is_missing(&self) -> bool {
        self.value.is_none()
    }

    /// Evaluates `self <op> reference`.
    pub fn compare(&self, op: Operator, reference: &Value) -> Result<bool, NetTreeError> {
        let Some(value) = &self.value else {
            return Ok(false);
        };
        Ok(value.try_cmp(reference)?.is_some_and(|ord| op.holds(ord)))
    }

    /// Evaluates `self <op> other`; false when either side is Missing.
    pub fn compare_symbol(&self, op: Operator, other: &Symbol) -> Result<bool, NetTreeError> {
        match (&self.value, &other.value) {
            (Some(_), Some(v)) => self.compare(op, v),
            _ => Ok(false),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "{}: ({}, {})", v, self.interval.start, self.interval.end),
            None => write!(f, "NaN: ({}, {})", self.interval.start, self.interval.end),
        }
    }
}
