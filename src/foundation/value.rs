use serde::Serialize;

use crate::foundation::core::Point3;
use crate::foundation::error::{SceneframeError, SceneframeResult};

/// A leaf value carried by a property: what static seeds, dynamic updaters and iterated
/// sequences produce.
///
/// Arithmetic is dynamically checked: numbers promote `Int` to `Float` when mixed, points combine
/// component-wise, and a number combined with a point is broadcast to every component.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Point(Point3),
    List(Vec<Value>),
}

#[derive(Clone, Copy)]
enum Arith {
    Add,
    Sub,
}

impl Arith {
    fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
        }
    }

    fn f64(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
        }
    }

    fn point(self, a: Point3, b: Point3) -> Point3 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
        }
    }
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Point(_) => "point",
            Self::List(_) => "list",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric view of `Int` and `Float` values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Point3> {
        match self {
            Self::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn checked_add(&self, rhs: &Value) -> SceneframeResult<Value> {
        self.arith(rhs, Arith::Add)
    }

    pub fn checked_sub(&self, rhs: &Value) -> SceneframeResult<Value> {
        self.arith(rhs, Arith::Sub)
    }

    fn arith(&self, rhs: &Value, op: Arith) -> SceneframeResult<Value> {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => {
                let out = match op {
                    Arith::Add => a.checked_add(*b),
                    Arith::Sub => a.checked_sub(*b),
                };
                out.map(Self::Int).ok_or_else(|| {
                    SceneframeError::evaluation(format!(
                        "integer overflow evaluating {a} {} {b}",
                        op.symbol()
                    ))
                })
            }
            (Self::Point(a), Self::Point(b)) => Ok(Self::Point(op.point(*a, *b))),
            (Self::Point(a), b) if b.as_f64().is_some() => {
                let b = b.as_f64().unwrap_or_default();
                Ok(Self::Point(op.point(*a, Point3::new(b, b, b))))
            }
            (a, Self::Point(b)) if a.as_f64().is_some() => {
                let a = a.as_f64().unwrap_or_default();
                Ok(Self::Point(op.point(Point3::new(a, a, a), *b)))
            }
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => Ok(Self::Float(op.f64(a, b))),
                _ => Err(SceneframeError::evaluation(format!(
                    "cannot evaluate {} {} {}",
                    self.type_name(),
                    op.symbol(),
                    rhs.type_name()
                ))),
            },
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Point3> for Value {
    fn from(v: Point3) -> Self {
        Self::Point(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/value.rs"]
mod tests;
