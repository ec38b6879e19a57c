//! Member location from a source caret position.
//!
//! The host editor resolves a caret offset into a [`SyntaxAncestry`]: the chain of
//! syntactic constructs enclosing the caret, innermost first, expressed as a closed
//! tagged-variant model rather than open-ended node inspection. This module walks that
//! chain to find the smallest enclosing member-like construct, classifies it into one
//! of the supported [`MemberKind`]s, and derives the member's metadata-level name and
//! canonical signature.
//!
//! # Metadata Name Derivation
//!
//! Source-level accessor, operator, indexer and event syntax maps onto reserved
//! metadata method names:
//!
//! | Source construct            | Metadata name            |
//! |-----------------------------|--------------------------|
//! | constructor / static ctor   | `.ctor` / `.cctor`       |
//! | property `get` / `set`      | `get_X` / `set_X`        |
//! | indexer `get` / `set`       | `get_Item` / `set_Item`  |
//! | event `add` / `remove`      | `add_X` / `remove_X`     |
//! | destructor                  | `Finalize`               |
//! | operator `+`                | `op_Addition`            |
//! | implicit / explicit convert | `op_Implicit` / `op_Explicit` |
//!
//! A bare property or event declaration (caret on the declaration, not inside an
//! accessor body) defaults to the `get_` / `add_` accessor.
//!
//! # Examples
//!
//! ```rust
//! use cilview::locator::{locate, AccessorKind, SyntaxAncestry, SyntaxNode};
//!
//! let ancestry = SyntaxAncestry::new(vec![
//!     SyntaxNode::Accessor { kind: AccessorKind::Get },
//!     SyntaxNode::Property { name: "Length".into() },
//!     SyntaxNode::Type { name: "Buffer".into() },
//!     SyntaxNode::Namespace { name: "MyApp".into() },
//! ]);
//!
//! let descriptor = locate(&ancestry).unwrap();
//! assert_eq!(descriptor.member_name, "get_Length");
//! assert_eq!(descriptor.canonical_signature, "MyApp.Buffer.get_Length()");
//! ```

mod ancestry;
mod descriptor;
mod locate;
mod operators;

pub use ancestry::{AccessorKind, SyntaxAncestry, SyntaxNode};
pub use descriptor::{MemberDescriptor, MemberKind};
pub use locate::locate;
pub use operators::operator_metadata_name;
