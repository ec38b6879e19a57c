//! The host-supplied syntactic ancestry of a caret position.

use strum::Display;

/// Accessor direction inside a property, indexer or event declaration.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    /// A property or indexer `get` accessor.
    Get,
    /// A property or indexer `set` accessor.
    Set,
    /// An event `add` accessor.
    Add,
    /// An event `remove` accessor.
    Remove,
}

/// One syntactic construct enclosing the caret.
///
/// A closed variant per supported construct; each carries only the fields relevant
/// to it. Parameter type lists are the symbol model's display strings and are
/// `None` when the host could not resolve a symbol for the declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    /// A namespace declaration.
    Namespace {
        /// Namespace name, possibly dotted.
        name: String,
    },
    /// A class/struct/interface/record declaration.
    Type {
        /// The type's simple name.
        name: String,
    },
    /// An ordinary method declaration.
    Method {
        /// Method name as declared.
        name: String,
        /// Parameter type display names, if a symbol was resolved.
        parameter_types: Option<Vec<String>>,
    },
    /// An instance or static constructor declaration.
    Constructor {
        /// `true` for a static constructor (`.cctor`).
        is_static: bool,
        /// Parameter type display names, if a symbol was resolved.
        parameter_types: Option<Vec<String>>,
    },
    /// A destructor/finalizer declaration.
    Destructor,
    /// A user-defined operator declaration.
    Operator {
        /// The operator token as written in source (`+`, `==`, ...).
        token: String,
        /// The reserved metadata name, when the symbol model resolved it.
        metadata_name: Option<String>,
        /// Parameter type display names, if a symbol was resolved.
        parameter_types: Option<Vec<String>>,
    },
    /// An implicit or explicit conversion operator declaration.
    ConversionOperator {
        /// `true` for `implicit`, `false` for `explicit`.
        is_implicit: bool,
        /// Parameter type display names, if a symbol was resolved.
        parameter_types: Option<Vec<String>>,
    },
    /// A property declaration.
    Property {
        /// Property name.
        name: String,
    },
    /// An indexer declaration.
    Indexer {
        /// Index parameter type display names, if a symbol was resolved.
        parameter_types: Option<Vec<String>>,
    },
    /// An event declaration.
    Event {
        /// Event name.
        name: String,
    },
    /// An accessor body inside a property, indexer or event declaration.
    Accessor {
        /// The accessor direction.
        kind: AccessorKind,
    },
}

/// The chain of constructs enclosing a caret offset, innermost first.
///
/// Produced by the host editor's `resolve_position`; consumed by
/// [`crate::locator::locate`]. The chain is a snapshot, detached from any live
/// syntax tree.
#[derive(Debug, Clone, Default)]
pub struct SyntaxAncestry {
    nodes: Vec<SyntaxNode>,
}

impl SyntaxAncestry {
    /// Creates an ancestry from nodes ordered innermost first.
    #[must_use]
    pub fn new(nodes: Vec<SyntaxNode>) -> Self {
        Self { nodes }
    }

    /// The enclosing constructs, innermost first.
    #[must_use]
    pub fn nodes(&self) -> &[SyntaxNode] {
        &self.nodes
    }

    /// The fully qualified name of the nearest enclosing type, dot-separated.
    ///
    /// Joins namespace segments and the nested-type chain outermost first.
    /// Returns `None` when the caret is not inside any type declaration.
    #[must_use]
    pub fn enclosing_type_name(&self) -> Option<String> {
        let mut segments = Vec::new();

        for node in self.nodes.iter().rev() {
            match node {
                SyntaxNode::Namespace { name } | SyntaxNode::Type { name } => {
                    segments.push(name.as_str());
                }
                _ => {}
            }
        }

        if self
            .nodes
            .iter()
            .any(|node| matches!(node, SyntaxNode::Type { .. }))
        {
            Some(segments.join("."))
        } else {
            None
        }
    }
}
