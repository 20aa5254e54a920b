//! The tree compiler: one synchronous, depth-first pass from blueprint to
//! object graph.
//!
//! The compiler owns the recursive walk. Builders only install values and,
//! for containers, hand back `(child, blueprint)` pairs; the compiler
//! recurses into those pairs and does all parent/metadata bookkeeping.

use crate::blueprint::{Attr, Blueprint, Kind};
use crate::builder::{
    BuildResult, BuilderOverrides, BuilderRegistry, DefaultBuilder, default_builder_for,
};
use crate::error::{TreeError, TreeErrorKind};
use crate::node::Node;
use crate::value::Value;

/// Options for [`create_with`].
#[derive(Clone, Debug, Default)]
pub struct CreateOptions {
    /// Per-kind builder overrides, merged over the built-ins.
    pub builder: BuilderOverrides,
    /// Parent reference to install on the new tree's root, linking it
    /// under an independently built tree. Nothing is copied.
    pub parent: Option<Node>,
}

impl CreateOptions {
    /// Default options: built-in builders, unparented root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a builder override for `kind`.
    pub fn with_builder(
        mut self,
        kind: Kind,
        builder: impl Fn(&Node, &str, &Attr, DefaultBuilder) -> BuildResult + 'static,
    ) -> Self {
        self.builder = self.builder.set(kind, builder);
        self
    }

    /// Set the parent reference for the new tree's root.
    pub fn with_parent(mut self, parent: Node) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Compile a blueprint into a tree with default options.
///
/// See [`create_with`] for the full contract.
pub fn create(blueprint: &Blueprint) -> Result<Node, TreeError> {
    create_with(blueprint, CreateOptions::new())
}

/// Compile a blueprint into a tree.
///
/// The blueprint is wrapped as `{ root: blueprint }` and compiled against
/// a fresh anonymous scaffold; the returned node is the one built under
/// `root` (which is why the root's metadata key is `"root"`). Construction
/// either completes and returns the root or fails without leaving any
/// partial tree behind.
pub fn create_with(blueprint: &Blueprint, options: CreateOptions) -> Result<Node, TreeError> {
    let registry = BuilderRegistry::with_overrides(&options.builder);
    TreeBuilder { registry }.build(blueprint, options.parent.as_ref())
}

struct TreeBuilder {
    registry: BuilderRegistry,
}

impl TreeBuilder {
    fn build(&self, blueprint: &Blueprint, parent: Option<&Node>) -> Result<Node, TreeError> {
        crate::debug!("compiling blueprint with {} top-level keys", blueprint.len());

        let scaffold = Node::new();
        let mut wrapper = Blueprint::new();
        wrapper.set("root", Attr::Map(blueprint.clone()));

        let mut path = Vec::new();
        self.process_node(&wrapper, &scaffold, None, &mut path)?;

        let root = match scaffold.get("root")? {
            Value::Node(node) => node,
            other => {
                return Err(TreeError::new(TreeErrorKind::InvalidRoot {
                    kind: other.kind(),
                }));
            }
        };

        // Replace the scaffold link with the caller's parent, or remove it.
        root.set_parent(parent);

        Ok(root)
    }

    fn process_node(
        &self,
        blueprint: &Blueprint,
        target: &Node,
        parent: Option<&Node>,
        path: &mut Vec<String>,
    ) -> Result<(), TreeError> {
        for (key, attr) in blueprint.iter() {
            let kind = attr.kind();
            crate::trace!(key, kind = %kind, "building entry");

            path.push(key.to_owned());
            let built = self
                .registry
                .resolve(kind)
                .build(target, key, attr, default_builder_for(kind))
                .map_err(|e| e.with_path(path.clone()))?;

            if let Some((child, child_blueprint)) = built {
                self.process_node(&child_blueprint, &child, Some(target), path)?;
            }
            path.pop();
        }

        target.set_parent(parent);

        Ok(())
    }
}
