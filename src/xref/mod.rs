//! Cross-reference extraction from rendered output.
//!
//! Rendered instruction text (and the decompiler's related-types trailer) embeds
//! member references in a structured token grammar:
//!
//! ```text
//! [assemblyRef]Namespace.Type::MemberName(paramTypes)
//! ```
//!
//! The assembly qualifier and parameter list are optional; the type path may use any
//! nested-separator convention, carry backtick arity markers or bracketed generic
//! arguments; the member name may lead with a `.` (`.ctor`/`.cctor`) or be a
//! compiler-synthesized bracketed name. This module scans a render pass for these
//! tokens, resolves each back to a navigable (type, member) pair through the
//! identity and matcher layers, and groups the result set into a call tree.
//!
//! # Guards
//!
//! Extraction is capped at [`MAX_REFERENCES`] distinct tokens per scan (pathological
//! input guard; further matches are dropped silently) and is time-bounded: when the
//! scan deadline expires the whole pass yields zero references rather than
//! propagating a fault.
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use cilview::xref::extract_references;
//!
//! let text = "call void [mscorlib]System.Console::WriteLine(string)";
//! let tokens = extract_references(text, Duration::from_millis(200));
//! assert_eq!(tokens[0].type_name, "System.Console");
//! assert_eq!(tokens[0].member_name, "WriteLine");
//! ```

mod calltree;
mod extractor;
mod token;

pub use calltree::{build_call_tree, resolve_references, CallTreeNode, ResolvedReference};
pub use extractor::{extract_references, DEFAULT_SCAN_DEADLINE, MAX_REFERENCES};
pub use token::MethodReferenceToken;
