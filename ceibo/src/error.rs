//! Error type for blueprint compilation and tree access.

use core::fmt::{self, Formatter};

use crate::blueprint::Kind;

/// An error raised while compiling a blueprint or reading a node.
///
/// Carries the key path from the synthetic root down to the entry where the
/// failure happened, when the engine knows it. User-supplied closures
/// (getters, setup hooks, callable values, override builders) return
/// `TreeError`s of their own; the engine annotates them with a location and
/// propagates them unmodified otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeError {
    path: Vec<String>,
    kind: TreeErrorKind,
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeErrorKind {
    /// A builder needed a nested blueprint and got another kind of value.
    ExpectedBlueprint {
        /// The kind that was actually classified.
        kind: Kind,
    },

    /// A builder needed a descriptor and got another kind of value.
    ExpectedDescriptor {
        /// The kind that was actually classified.
        kind: Kind,
    },

    /// The default builder was handed a value it cannot install verbatim.
    ExpectedScalar {
        /// The kind that was actually classified.
        kind: Kind,
    },

    /// A property read named a key the node does not have.
    MissingKey {
        /// The missing key.
        key: String,
    },

    /// [`Value::call`](crate::Value::call) was invoked on a non-function value.
    NotCallable {
        /// The kind of the value that was called.
        kind: Kind,
    },

    /// An override builder installed something other than a node under the
    /// synthetic root key, so there is no tree to return.
    InvalidRoot {
        /// The kind of the value found under the root key.
        kind: Kind,
    },

    /// A failure reported by user code (builders, getters, setup hooks).
    Message(String),
}

impl TreeError {
    /// Create an error with no location attached yet.
    pub fn new(kind: TreeErrorKind) -> Self {
        TreeError {
            path: Vec::new(),
            kind,
        }
    }

    /// Create a [`TreeErrorKind::Message`] error from user code.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(TreeErrorKind::Message(message.into()))
    }

    /// The kind of failure.
    pub fn kind(&self) -> &TreeErrorKind {
        &self.kind
    }

    /// The key path from the synthetic root to the failing entry.
    ///
    /// Empty when the failure happened outside any known location.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Attach a location unless one is already present. The innermost
    /// annotation wins, so errors crossing several nodes keep the most
    /// precise path.
    pub(crate) fn with_path(mut self, path: Vec<String>) -> Self {
        if self.path.is_empty() {
            self.path = path;
        }
        self
    }
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "at {}: {}", self.path.join("."), self.kind)
        }
    }
}

impl fmt::Display for TreeErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TreeErrorKind::ExpectedBlueprint { kind } => {
                write!(f, "expected a nested blueprint, got {}", kind)
            }
            TreeErrorKind::ExpectedDescriptor { kind } => {
                write!(f, "expected a descriptor, got {}", kind)
            }
            TreeErrorKind::ExpectedScalar { kind } => {
                write!(f, "expected a scalar value, got {}", kind)
            }
            TreeErrorKind::MissingKey { key } => write!(f, "no property named `{}`", key),
            TreeErrorKind::NotCallable { kind } => {
                write!(f, "value of kind {} is not callable", kind)
            }
            TreeErrorKind::InvalidRoot { kind } => {
                write!(f, "root builder produced {}, expected a node", kind)
            }
            TreeErrorKind::Message(message) => write!(f, "{}", message),
        }
    }
}

impl core::error::Error for TreeError {}
