//! Tree nodes: visible slots plus hidden parent and metadata back-links.
//!
//! A [`Node`] is a shared handle; cloning it clones the handle, not the
//! data. The visible surface is an insertion-ordered slot map. The parent
//! reference and metadata record live beside the map as plain struct
//! fields, so no amount of key iteration can observe them.

use core::cell::RefCell;
use core::fmt::{self, Debug, Formatter};
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::blueprint::GetFn;
use crate::error::{TreeError, TreeErrorKind};
use crate::value::Value;

/// A constructed object in the output tree.
///
/// Equality is identity: two handles are equal when they point at the same
/// node. Use [`Node::get`] to read properties (lazy properties are
/// re-evaluated on every read), [`Node::parent`] and [`Node::meta`] to
/// navigate backwards.
#[derive(Clone)]
pub struct Node(Rc<NodeInner>);

#[derive(Default)]
struct NodeInner {
    slots: RefCell<IndexMap<String, Slot>>,
    parent: RefCell<Option<Weak<NodeInner>>>,
    meta: RefCell<Option<Meta>>,
}

#[derive(Clone)]
pub(crate) enum Slot {
    Value(Value),
    Getter(GetFn),
}

/// Hidden metadata record identifying the key under which a node was
/// attached in its parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Meta {
    /// The key this node was attached under.
    pub key: String,
    /// What kind of tree entry this record describes.
    pub kind: MetaKind,
}

/// The kind tag of a [`Meta`] record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MetaKind {
    /// A container node built from a nested blueprint.
    Node,
}

impl Node {
    /// Create an empty, unattached node.
    ///
    /// Mostly useful to override builders that construct their own child
    /// containers before handing them back for recursion.
    pub fn new() -> Self {
        Node(Rc::new(NodeInner::default()))
    }

    /// Install a static property.
    ///
    /// The property is visible to enumeration and replaceable by a later
    /// `define` under the same key; there is no other mutation path.
    /// Custom builders and descriptor setup hooks use this to install
    /// fields under the same contract as built-in ones.
    pub fn define(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.0
            .slots
            .borrow_mut()
            .insert(key.into(), Slot::Value(value.into()));
    }

    /// Install a lazy property.
    ///
    /// The getter is re-invoked on every read as `get(node, key)`, with the
    /// node the property lives on as receiver; there is no caching. Same
    /// visibility and replacement contract as [`Node::define`].
    pub fn define_getter(
        &self,
        key: impl Into<String>,
        get: impl Fn(&Node, &str) -> Result<Value, TreeError> + 'static,
    ) {
        self.install(key.into(), Slot::Getter(Rc::new(get)));
    }

    pub(crate) fn install(&self, key: String, slot: Slot) {
        self.0.slots.borrow_mut().insert(key, slot);
    }

    /// Read a property.
    ///
    /// Static slots return their value; getter slots invoke the getter,
    /// which may read sibling properties through the node and climb the
    /// parent chain. A failing getter fails only this read.
    pub fn get(&self, key: &str) -> Result<Value, TreeError> {
        let slot = self.0.slots.borrow().get(key).cloned();
        match slot {
            Some(Slot::Value(value)) => Ok(value),
            Some(Slot::Getter(get)) => {
                // Drop the map borrow before running user code so the
                // getter can re-enter this node.
                get(self, key).map_err(|e| e.with_path(self.path_with(key)))
            }
            None => Err(TreeError::new(TreeErrorKind::MissingKey {
                key: key.to_owned(),
            })
            .with_path(self.path())),
        }
    }

    /// Returns true when a property named `key` exists (without evaluating
    /// getter slots).
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.slots.borrow().contains_key(key)
    }

    /// The visible property keys, in installation order.
    ///
    /// Hidden bookkeeping (parent reference, metadata record) never shows
    /// up here.
    pub fn keys(&self) -> Vec<String> {
        self.0.slots.borrow().keys().cloned().collect()
    }

    /// Number of visible properties.
    pub fn len(&self) -> usize {
        self.0.slots.borrow().len()
    }

    /// Returns true when the node has no visible properties.
    pub fn is_empty(&self) -> bool {
        self.0.slots.borrow().is_empty()
    }

    /// The node's immediate container in the output tree, if any.
    ///
    /// The link is weak: it does not keep the parent tree alive. An
    /// unparented root yields `None`, never an error.
    pub fn parent(&self) -> Option<Node> {
        self.0
            .parent
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade)
            .map(Node)
    }

    /// The node's hidden metadata record, if it was attached as a
    /// container (the nested-blueprint path). Scalar and descriptor leaves
    /// have no node of their own, and override builders may skip tagging.
    pub fn meta(&self) -> Option<Meta> {
        self.0.meta.borrow().clone()
    }

    /// Attach or replace the metadata record.
    ///
    /// The built-in object builder tags every container it creates;
    /// override builders that construct containers themselves can use this
    /// to keep [`Node::path`] and meta-chain navigation working.
    pub fn set_meta(&self, meta: Meta) {
        *self.0.meta.borrow_mut() = Some(meta);
    }

    pub(crate) fn set_parent(&self, parent: Option<&Node>) {
        *self.0.parent.borrow_mut() = parent.map(|p| Rc::downgrade(&p.0));
    }

    /// The key path from the root to this node, collected by climbing the
    /// parent chain and reading each metadata record.
    ///
    /// For a tree built from `{foo: {bar: {}}}`, the node at `foo.bar` has
    /// the path `["root", "foo", "bar"]` (the visible root is built under
    /// the synthetic key `root`).
    pub fn path(&self) -> Vec<String> {
        let mut keys = Vec::new();
        let mut cursor = Some(self.clone());
        while let Some(node) = cursor {
            if let Some(meta) = node.meta() {
                keys.push(meta.key);
            }
            cursor = node.parent();
        }
        keys.reverse();
        keys
    }

    fn path_with(&self, key: &str) -> Vec<String> {
        let mut path = self.path();
        path.push(key.to_owned());
        path
    }

    /// Returns true when both handles point at the same node.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Node {}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let slots = self.0.slots.borrow();
        let mut map = f.debug_map();
        for (key, slot) in slots.iter() {
            match slot {
                Slot::Value(value) => map.entry(key, value),
                Slot::Getter(_) => map.entry(key, &"<getter>"),
            };
        }
        map.finish()
    }
}

/// The parent of `value`, when it is a node with a parent reference.
///
/// Total over any value: non-node values (including `Null`) yield `None`,
/// never an error.
pub fn parent(value: &Value) -> Option<Node> {
    match value {
        Value::Node(node) => node.parent(),
        _ => None,
    }
}

/// The metadata record of `value`, when it is a node with one.
///
/// Total over any value: non-node values (including `Null`) yield `None`,
/// never an error.
pub fn meta(value: &Value) -> Option<Meta> {
    match value {
        Value::Node(node) => node.meta(),
        _ => None,
    }
}
