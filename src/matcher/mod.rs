//! Overload-disambiguating signature matching between member models.
//!
//! Once the identity layer has folded type names onto a canonical form, overloads still
//! have to be told apart. Given a target member name and the ordered parameter type
//! names the source symbol model reported, this module scans candidate members from
//! another model (the low-level metadata model or the decompiler type system) and picks
//! the best match.
//!
//! # Matching Rules
//!
//! 1. Without parameter information, the first candidate whose name passes identity
//!    equality wins (the legacy, no-overload-info path).
//! 2. With parameter information, candidates are scanned in declaration order; a full
//!    match requires name equality, parameter count equality, and pairwise type
//!    compatibility. The first full match wins.
//! 3. If no candidate matches fully, the first name-only match recorded during the scan
//!    is returned instead of failing outright, since overload information may be
//!    imprecise on either side.
//!
//! Pairwise compatibility strips `ref `/`out `/`in ` modifiers from the expected type,
//! compares short names (last segment after the final separator), maps language
//! keyword aliases onto their runtime names (`string` = `String`, `int` = `Int32`, ...)
//! and recurses through `[]` array suffixes.
//!
//! # Examples
//!
//! ```rust
//! use cilview::matcher::{find_best_match, MemberCandidate};
//!
//! let candidates = vec![
//!     MemberCandidate::new("M", vec!["System.String".into()]),
//!     MemberCandidate::new("M", vec!["System.Int32".into()]),
//! ];
//! let expected = vec!["int".to_string()];
//! let best = find_best_match(&candidates, "M", Some(&expected)).unwrap();
//! assert_eq!(best.parameter_types, vec!["System.Int32"]);
//! ```

mod aliases;
mod candidates;

pub use aliases::builtin_alias_name;
pub use candidates::{find_best_match, split_parameter_list, MemberCandidate};
