//! Type and member name canonicalization across naming conventions.
//!
//! The same logical type is spelled differently in each of the three models this crate
//! bridges: the source symbol model writes nested types with `.`, the low-level metadata
//! model writes them with `/`, and reflection-style names use `+`. Generic types carry a
//! backtick arity marker (`` List`1 ``) in metadata but angle-bracketed argument lists
//! (`List<int>`) in display names. This module provides the pure functions that fold all
//! of these spellings onto one canonical form so names from different models can be
//! compared for equality.
//!
//! # Key Functions
//!
//! - [`normalize_type`] - Produces the canonical form of a raw type name
//! - [`types_equal`] - Convention-insensitive type identity comparison
//! - [`strip_generic_arity`] - Removes backtick arity markers
//! - [`strip_generic_suffix`] - Depth-aware removal of a trailing `<...>` argument list
//! - [`is_synthesized`] - Detects compiler-generated names whose brackets are identity
//!
//! # Compiler-Synthesized Names
//!
//! Names generated by the compiler for closures, async/iterator state machines and
//! anonymous types lead with a reserved `<` marker (for example `<ProcessAsync>d__0`).
//! For these, the bracketed segment is part of the identity and must survive
//! normalization verbatim; stripping it would merge distinct state machines.
//!
//! # Examples
//!
//! ```rust
//! use cilview::identity::{normalize_type, types_equal};
//!
//! assert_eq!(normalize_type("Outer/Inner"), "Outer.Inner");
//! assert_eq!(normalize_type("List`1"), "List");
//! assert_eq!(normalize_type("<ProcessAsync>d__0"), "<ProcessAsync>d__0");
//! assert!(types_equal("MyApp.Outer+Inner", "Outer/Inner"));
//! ```

mod normalizer;

pub use normalizer::{
    is_synthesized, normalize_type, strip_generic_arity, strip_generic_suffix, types_equal,
    ARITY_MARKER, SYNTHESIZED_MARKER,
};
