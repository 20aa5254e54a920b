//! `ceibo` compiles declarative tree descriptions ("blueprints") into live
//! object graphs ("trees") whose nodes can be plain values, lazily-computed
//! properties, or nested sub-trees, while keeping a queryable parent chain
//! and per-node metadata.
//!
//! It is infrastructure for higher-level frameworks (page-object-style
//! DSLs and the like) that turn nested literal definitions into navigable,
//! introspectable object graphs with custom construction behavior per node
//! type.
//!
//! Named after *Erythrina crista-galli*, the ceibo tree.
//!
//! # Model
//!
//! - A [`Blueprint`] maps keys to [`Attr`]s: scalars, nested blueprints,
//!   explicit nulls, or [`Descriptor`]s (lazy getters, static values,
//!   setup hooks).
//! - [`create`] classifies each entry, dispatches to the builder
//!   registered for its [`Kind`], and recurses into containers. Builders
//!   are overridable per kind via [`CreateOptions`], and an override can
//!   delegate back to the built-in it replaced.
//! - Every container [`Node`] carries a hidden parent reference and a
//!   hidden [`Meta`] record. Neither shows up in key enumeration; both are
//!   reachable through the total [`parent`] and [`meta`] queries.
//!
//! # Example
//!
//! ```
//! use ceibo::{Descriptor, Value, blueprint, create};
//!
//! let bp = blueprint! {
//!     "title" => "home",
//!     "header" => blueprint! {
//!         "text" => Descriptor::new()
//!             .with_get(|_node, _key| Ok(Value::from("welcome"))),
//!     },
//! };
//!
//! let tree = create(&bp).unwrap();
//! assert_eq!(tree.get("title").unwrap().as_str(), Some("home"));
//!
//! let header = tree.get("header").unwrap();
//! assert_eq!(header.as_node().unwrap().get("text").unwrap(), Value::from("welcome"));
//! assert_eq!(ceibo::parent(&header).unwrap(), tree);
//! ```

#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]

mod blueprint;
pub use blueprint::{Attr, Blueprint, Descriptor, Kind};

mod builder;
pub use builder::{BuildResult, Builder, BuilderOverrides, DefaultBuilder};

mod compile;
pub use compile::{CreateOptions, create, create_with};

mod error;
pub use error::{TreeError, TreeErrorKind};

mod node;
pub use node::{Meta, MetaKind, Node, meta, parent};

mod value;
pub use value::{NodeFn, Number, Value};

mod macros;
mod trace;
