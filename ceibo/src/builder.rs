//! Builder registry: open dispatch from classified kinds to construction
//! functions.
//!
//! A builder installs one classified kind of blueprint value onto a target
//! node. It never recurses itself: a builder that creates a container
//! returns the `(child, blueprint)` pair and the compiler owns the single
//! recursive walk. That split lets an override customize how a container is
//! attached (pre-seed extra fields, wrap values) without re-implementing
//! recursion, metadata tagging, or parent wiring.

use core::fmt::{self, Debug, Formatter};
use std::collections::HashMap;
use std::rc::Rc;

use crate::blueprint::{Attr, Blueprint, Kind};
use crate::error::{TreeError, TreeErrorKind};
use crate::node::{Meta, MetaKind, Node};
use crate::value::Value;

/// What a builder invocation produces: `Some((child, blueprint))` asks the
/// compiler to recurse into the pair, `None` means installation is done.
pub type BuildResult = Result<Option<(Node, Blueprint)>, TreeError>;

/// Handle to a built-in builder, passed to overrides so they can delegate
/// back to default behavior instead of reimplementing installation.
pub type DefaultBuilder = fn(&Node, &str, &Attr) -> BuildResult;

/// A construction function for one classified kind of blueprint value.
///
/// Receives the target node, the key being built, the raw attribute, and
/// the [`DefaultBuilder`] for the same kind.
#[derive(Clone)]
pub struct Builder(Rc<dyn Fn(&Node, &str, &Attr, DefaultBuilder) -> BuildResult>);

impl Builder {
    /// Wrap a closure as a builder.
    pub fn new(f: impl Fn(&Node, &str, &Attr, DefaultBuilder) -> BuildResult + 'static) -> Self {
        Builder(Rc::new(f))
    }

    pub(crate) fn build(
        &self,
        node: &Node,
        key: &str,
        attr: &Attr,
        fallback: DefaultBuilder,
    ) -> BuildResult {
        (self.0)(node, key, attr, fallback)
    }
}

impl Debug for Builder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Builder(..)")
    }
}

/// Caller-supplied builder overrides, merged over the built-ins per kind.
///
/// An override map only replaces the kinds it contains; everything else
/// keeps its built-in (or fall-through) behavior. Overriding
/// [`Kind::Default`] replaces the fallback installer itself.
#[derive(Clone, Debug, Default)]
pub struct BuilderOverrides {
    map: HashMap<Kind, Builder>,
}

impl BuilderOverrides {
    /// No overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an override for `kind`, replacing any previous one.
    pub fn set(
        mut self,
        kind: Kind,
        builder: impl Fn(&Node, &str, &Attr, DefaultBuilder) -> BuildResult + 'static,
    ) -> Self {
        self.map.insert(kind, Builder::new(builder));
        self
    }

    /// Returns true when no override is registered.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&Kind, &Builder)> {
        self.map.iter()
    }
}

/// The resolved dispatch table for one `create` call: built-ins merged
/// with overrides, read-only afterwards.
pub(crate) struct BuilderRegistry {
    builders: HashMap<Kind, Builder>,
    default: Builder,
}

impl BuilderRegistry {
    pub(crate) fn with_overrides(overrides: &BuilderOverrides) -> Self {
        let mut builders = HashMap::new();
        builders.insert(
            Kind::Descriptor,
            Builder::new(|node, key, attr, _| build_descriptor(node, key, attr)),
        );
        builders.insert(
            Kind::Object,
            Builder::new(|node, key, attr, _| build_object(node, key, attr)),
        );
        let mut default = Builder::new(|node, key, attr, _| build_default(node, key, attr));

        for (kind, builder) in overrides.entries() {
            match kind {
                Kind::Default => default = builder.clone(),
                other => {
                    builders.insert(*other, builder.clone());
                }
            }
        }

        BuilderRegistry { builders, default }
    }

    /// Resolve the builder for a classified kind; unregistered kinds fall
    /// through to the `default` entry.
    pub(crate) fn resolve(&self, kind: Kind) -> &Builder {
        self.builders.get(&kind).unwrap_or(&self.default)
    }
}

/// The built-in builder matching a classified kind, handed to overrides
/// for delegation.
pub(crate) fn default_builder_for(kind: Kind) -> DefaultBuilder {
    match kind {
        Kind::Descriptor => build_descriptor,
        Kind::Object => build_object,
        _ => build_default,
    }
}

/// Built-in `descriptor` builder: run `setup`, then install the static
/// value or the lazy getter.
pub(crate) fn build_descriptor(node: &Node, key: &str, attr: &Attr) -> BuildResult {
    let Attr::Descriptor(descriptor) = attr else {
        return Err(TreeError::new(TreeErrorKind::ExpectedDescriptor {
            kind: attr.kind(),
        }));
    };

    // setup runs first so it can coexist with or shadow the install below
    if let Some(setup) = descriptor.setup_fn() {
        setup(node, key)?;
    }

    if let Some(value) = descriptor.value() {
        node.define(key, value.clone());
    } else if let Some(get) = descriptor.get_fn() {
        node.install(key.to_owned(), crate::node::Slot::Getter(get.clone()));
    } else {
        node.define(key, Value::Null);
    }

    Ok(None)
}

/// Built-in `object` builder: attach an empty container, tag it with its
/// metadata record, and hand it back for recursion. Attachment happens
/// before recursion so getters built further down can already climb to an
/// attached parent.
pub(crate) fn build_object(node: &Node, key: &str, attr: &Attr) -> BuildResult {
    let Attr::Map(blueprint) = attr else {
        return Err(TreeError::new(TreeErrorKind::ExpectedBlueprint {
            kind: attr.kind(),
        }));
    };

    let child = Node::new();
    node.define(key, Value::Node(child.clone()));
    child.set_meta(Meta {
        key: key.to_owned(),
        kind: MetaKind::Node,
    });

    Ok(Some((child, blueprint.clone())))
}

/// Built-in `default` builder: install the raw value verbatim.
pub(crate) fn build_default(node: &Node, key: &str, attr: &Attr) -> BuildResult {
    let value = match attr {
        Attr::Null => Value::Null,
        Attr::Value(value) => value.clone(),
        other => {
            return Err(TreeError::new(TreeErrorKind::ExpectedScalar {
                kind: other.kind(),
            }));
        }
    };
    node.define(key, value);
    Ok(None)
}
