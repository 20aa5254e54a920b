//! Dynamic value model for tree nodes.
//!
//! Every readable slot of a constructed tree yields a [`Value`]: a plain
//! scalar, an array, a callable leaf ([`NodeFn`]), or a nested [`Node`].

use core::fmt::{self, Debug, Formatter};
use std::rc::Rc;

use crate::blueprint::Kind;
use crate::error::{TreeError, TreeErrorKind};
use crate::node::Node;

/// A dynamic value readable out of a tree.
///
/// Scalars, arrays and `Null` compare structurally; [`Value::Node`] and
/// [`Value::Fn`] compare by identity, since a node is a shared handle into
/// a particular tree, not the data it contains.
#[derive(Clone)]
pub enum Value {
    /// Absent/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Number (integer or float), with numeric equality across the two.
    Number(Number),
    /// UTF-8 string.
    String(String),
    /// Array of values, installed and read verbatim.
    Array(Vec<Value>),
    /// Callable leaf. Invoking it yields a per-call value, which is how
    /// dynamic segments produce argument-dependent sub-trees.
    Fn(NodeFn),
    /// A nested tree node.
    Node(Node),
}

impl Value {
    /// The classified kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Fn(_) => Kind::Function,
            Value::Node(_) => Kind::Node,
        }
    }

    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The boolean payload, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The numeric payload, if this is a [`Value::Number`].
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as an `i64`, if it is a number representable as one.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(|n| n.to_i64())
    }

    /// The value as an `f64`, if it is a number representable as one.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(|n| n.to_f64())
    }

    /// The string payload, if this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The array payload, if this is a [`Value::Array`].
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    /// The node handle, if this is a [`Value::Node`].
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    /// The node handle by value, if this is a [`Value::Node`].
    pub fn into_node(self) -> Option<Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    /// The callable payload, if this is a [`Value::Fn`].
    pub fn as_fn(&self) -> Option<&NodeFn> {
        match self {
            Value::Fn(f) => Some(f),
            _ => None,
        }
    }

    /// Invoke a callable leaf.
    ///
    /// Fails with [`TreeErrorKind::NotCallable`] on any other kind; a
    /// failure returned by the callable itself propagates unmodified.
    pub fn call(&self, args: &[Value]) -> Result<Value, TreeError> {
        match self {
            Value::Fn(f) => f.call(args),
            other => Err(TreeError::new(TreeErrorKind::NotCallable {
                kind: other.kind(),
            })),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Fn(a), Value::Fn(b)) => a == b,
            (Value::Node(a), Value::Node(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => Debug::fmt(b, f),
            Value::Number(n) => Debug::fmt(n, f),
            Value::String(s) => Debug::fmt(s, f),
            Value::Array(values) => f.debug_list().entries(values).finish(),
            Value::Fn(func) => Debug::fmt(func, f),
            Value::Node(node) => Debug::fmt(node, f),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        Value::Number(v)
    }
}

impl From<NodeFn> for Value {
    fn from(v: NodeFn) -> Self {
        Value::Fn(v)
    }
}

impl From<Node> for Value {
    fn from(v: Node) -> Self {
        Value::Node(v)
    }
}

macro_rules! impl_value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(v: $t) -> Self {
                    Number::from_i64(v as i64)
                }
            }

            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Number(Number::from_i64(v as i64))
                }
            }
        )*
    };
}

impl_value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Number(Number::from_f64(f64::from(v)))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(Number::from_f64(v))
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::from_f64(v)
    }
}

/// A number, stored as either `i64` or `f64`.
///
/// Equality is numeric: `Number::from_i64(1) == Number::from_f64(1.0)`.
#[derive(Copy, Clone)]
pub struct Number(Repr);

#[derive(Copy, Clone)]
enum Repr {
    I64(i64),
    F64(f64),
}

impl Number {
    /// Create a number from an `i64`.
    pub fn from_i64(v: i64) -> Self {
        Number(Repr::I64(v))
    }

    /// Create a number from an `f64`.
    pub fn from_f64(v: f64) -> Self {
        Number(Repr::F64(v))
    }

    /// Convert to `i64` if exactly representable.
    pub fn to_i64(&self) -> Option<i64> {
        match self.0 {
            Repr::I64(v) => Some(v),
            Repr::F64(v) => {
                if v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64 {
                    Some(v as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Convert to `f64` if exactly representable.
    pub fn to_f64(&self) -> Option<f64> {
        match self.0 {
            Repr::F64(v) => Some(v),
            Repr::I64(v) => {
                // f64 has a 53-bit mantissa
                const MAX_EXACT: i64 = 1 << 53;
                if (-MAX_EXACT..=MAX_EXACT).contains(&v) {
                    Some(v as f64)
                } else {
                    None
                }
            }
        }
    }

    /// Convert to `f64`, losing precision for large integers.
    pub fn to_f64_lossy(&self) -> f64 {
        match self.0 {
            Repr::I64(v) => v as f64,
            Repr::F64(v) => v,
        }
    }

    /// Returns true when stored as an integer.
    pub fn is_integer(&self) -> bool {
        matches!(self.0, Repr::I64(_))
    }

    /// Returns true when stored as a float.
    pub fn is_float(&self) -> bool {
        matches!(self.0, Repr::F64(_))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self.0, other.0) {
            (Repr::I64(a), Repr::I64(b)) => a == b,
            (Repr::F64(a), Repr::F64(b)) => a == b,
            (Repr::I64(a), Repr::F64(b)) | (Repr::F64(b), Repr::I64(a)) => (a as f64) == b,
        }
    }
}

impl Debug for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::I64(v) => Debug::fmt(&v, f),
            Repr::F64(v) => Debug::fmt(&v, f),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::I64(v) => fmt::Display::fmt(&v, f),
            Repr::F64(v) => fmt::Display::fmt(&v, f),
        }
    }
}

/// A shared callable leaf.
///
/// Installed verbatim by the default builder (bare function values) or via
/// a descriptor's static `value` (dynamic segments). Cheap to clone;
/// equality is by identity.
#[derive(Clone)]
pub struct NodeFn(Rc<dyn Fn(&[Value]) -> Result<Value, TreeError>>);

impl NodeFn {
    /// Wrap a closure as a callable leaf.
    pub fn new(f: impl Fn(&[Value]) -> Result<Value, TreeError> + 'static) -> Self {
        NodeFn(Rc::new(f))
    }

    /// Invoke the callable.
    pub fn call(&self, args: &[Value]) -> Result<Value, TreeError> {
        (self.0)(args)
    }
}

impl PartialEq for NodeFn {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl Debug for NodeFn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("NodeFn(..)")
    }
}
