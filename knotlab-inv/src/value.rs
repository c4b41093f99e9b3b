use std::fmt::Display;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use knotlab::{Laurent, MLaurent, Mat};
use knotlab_link::arrow_var_name;

/// The result of a named invariant.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The invariant of the empty diagram.
    Null,
    Laurent(Laurent),
    /// A polynomial in `z`.
    Conway(Laurent),
    MLaurent(MLaurent),
    Matrix(Mat<Laurent>),
    Int(i64),
    LinkingNumbers(Mat<i64>),
    Identification(Identification),
    /// Computed, but not defined for this diagram.
    NotApplicable,
}

impl Value {
    pub fn as_laurent(&self) -> Option<&Laurent> {
        match self {
            Value::Laurent(p) | Value::Conway(p) => Some(p),
            _ => None
        }
    }

    pub fn as_mlaurent(&self) -> Option<&MLaurent> {
        match self {
            Value::MLaurent(p) => Some(p),
            _ => None
        }
    }

    pub fn as_matrix(&self) -> Option<&Mat<Laurent>> {
        match self {
            Value::Matrix(m) => Some(m),
            _ => None
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(a) => Some(*a),
            _ => None
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Laurent(p) => write!(f, "{p}"),
            Value::Conway(p) => write!(f, "{}", p.to_string_with("z")),
            Value::MLaurent(p) => write!(f, "{}", p.to_string_with(arrow_var_name)),
            Value::Matrix(m) => write!(f, "{m}"),
            Value::Int(a) => write!(f, "{a}"),
            Value::LinkingNumbers(m) => write!(f, "{m}"),
            Value::Identification(id) => write!(f, "{id}"),
            Value::NotApplicable => write!(f, "n/a"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display, Serialize, Deserialize)]
#[display("{name}{}", if *mirror { "*" } else { "" })]
pub struct KnotName {
    pub name: String,
    pub katlas: Option<String>,
    pub mirror: bool,
}

/// Table entries matching the invariants of a diagram.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Identification {
    pub names: Vec<KnotName>,
    pub incomplete: bool,
}

impl Display for Identification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = if self.names.is_empty() {
            "unknown".to_string()
        } else {
            self.names.iter().join(", ")
        };
        let suffix = if self.incomplete { " (incomplete)" } else { "" };
        write!(f, "{names}{suffix}")
    }
}
