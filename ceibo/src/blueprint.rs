//! Blueprint model: the declarative input compiled into a tree.
//!
//! A [`Blueprint`] maps string keys to [`Attr`] values. Classification of
//! an attribute into a [`Kind`] decides which builder installs it; the
//! tagged [`Attr`] variant replaces the duck-typed `isDescriptor` probing a
//! dynamic language would use, keeping classification total and testable.

use core::fmt::{self, Debug, Formatter};
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::TreeError;
use crate::node::Node;
use crate::value::Value;

/// A getter invoked on every read of a lazy property. Receives the node
/// the property is installed on and the property's key.
pub(crate) type GetFn = Rc<dyn Fn(&Node, &str) -> Result<Value, TreeError>>;

/// A setup hook invoked once at build time, before the descriptor's own
/// value or getter is installed.
pub(crate) type SetupFn = Rc<dyn Fn(&Node, &str) -> Result<(), TreeError>>;

/// An ordered mapping from keys to blueprint attributes.
///
/// Iteration order is insertion order and is the order the compiler visits
/// keys in; every key is visited exactly once.
#[derive(Clone, Debug, Default)]
pub struct Blueprint {
    entries: IndexMap<String, Attr>,
}

impl Blueprint {
    /// Create an empty blueprint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, replacing any previous one under the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Attr>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up an attribute.
    pub fn get(&self, key: &str) -> Option<&Attr> {
        self.entries.get(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attr)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Attr>> FromIterator<(K, V)> for Blueprint {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut blueprint = Blueprint::new();
        for (key, value) in iter {
            blueprint.set(key, value);
        }
        blueprint
    }
}

/// One blueprint attribute: the tagged variant behind classification.
#[derive(Clone, Debug)]
pub enum Attr {
    /// Explicit null, distinct from a nested blueprint.
    Null,
    /// A scalar/other value (string, number, bool, array, function,
    /// pre-built node), installed verbatim by the default builder.
    Value(Value),
    /// A nested blueprint, compiled recursively into a child node.
    Map(Blueprint),
    /// A descriptor declaring lazy or setup-augmented behavior.
    Descriptor(Descriptor),
}

impl Attr {
    /// Classify this attribute. Total: every attribute has exactly one kind.
    pub fn kind(&self) -> Kind {
        match self {
            Attr::Descriptor(_) => Kind::Descriptor,
            Attr::Null => Kind::Null,
            Attr::Map(_) => Kind::Object,
            Attr::Value(value) => value.kind(),
        }
    }
}

impl From<Value> for Attr {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Attr::Null,
            other => Attr::Value(other),
        }
    }
}

impl From<Blueprint> for Attr {
    fn from(blueprint: Blueprint) -> Self {
        Attr::Map(blueprint)
    }
}

impl From<Descriptor> for Attr {
    fn from(descriptor: Descriptor) -> Self {
        Attr::Descriptor(descriptor)
    }
}

macro_rules! impl_attr_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Attr {
                fn from(value: $t) -> Self {
                    Attr::from(Value::from(value))
                }
            }
        )*
    };
}

impl_attr_from!(
    bool,
    &str,
    String,
    Vec<Value>,
    crate::value::Number,
    crate::value::NodeFn,
    Node,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64
);

/// The classified kind of a blueprint attribute, used as the builder
/// registry key. [`Kind::Default`] is a registry key only; classification
/// never produces it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A [`Descriptor`] attribute.
    Descriptor,
    /// A nested blueprint.
    Object,
    /// Explicit null.
    Null,
    /// Boolean scalar.
    Bool,
    /// Numeric scalar.
    Number,
    /// String scalar.
    String,
    /// Array value.
    Array,
    /// Callable value.
    Function,
    /// A pre-built node embedded in a blueprint.
    Node,
    /// Registry key for the fallback builder.
    Default,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Descriptor => "descriptor",
            Kind::Object => "object",
            Kind::Null => "null",
            Kind::Bool => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Function => "function",
            Kind::Node => "node",
            Kind::Default => "default",
        };
        f.write_str(name)
    }
}

/// A blueprint leaf declaring lazy, computed, or setup-augmented behavior
/// instead of a plain static value.
///
/// All three parts are optional and combine:
///
/// - `setup` runs once at build time, before anything is installed, and may
///   mutate the target node (install sibling fields, for instance).
/// - A present `value` installs a static field, including "falsy" values
///   like `0`, `""` or `false`, and callable [`NodeFn`](crate::NodeFn)
///   leaves. A present `value` takes precedence over `get`.
/// - Otherwise `get` installs a lazy property, re-invoked on every read
///   with the node as receiver and the key as argument.
///
/// A descriptor with neither `value` nor `get` installs [`Value::Null`].
#[derive(Clone, Default)]
pub struct Descriptor {
    get: Option<GetFn>,
    value: Option<Value>,
    setup: Option<SetupFn>,
}

impl Descriptor {
    /// Create an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a getter, invoked on every read as `get(node, key)`.
    pub fn with_get(
        mut self,
        get: impl Fn(&Node, &str) -> Result<Value, TreeError> + 'static,
    ) -> Self {
        self.get = Some(Rc::new(get));
        self
    }

    /// Attach a static value, installed verbatim.
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attach a setup hook, run at build time before installation.
    pub fn with_setup(
        mut self,
        setup: impl Fn(&Node, &str) -> Result<(), TreeError> + 'static,
    ) -> Self {
        self.setup = Some(Rc::new(setup));
        self
    }

    /// The static value, if any.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub(crate) fn get_fn(&self) -> Option<&GetFn> {
        self.get.as_ref()
    }

    pub(crate) fn setup_fn(&self) -> Option<&SetupFn> {
        self.setup.as_ref()
    }
}

impl Debug for Descriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("get", &self.get.as_ref().map(|_| "<fn>"))
            .field("value", &self.value)
            .field("setup", &self.setup.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
