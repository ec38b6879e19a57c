//! Lexical member-reference tokens and their parsing.

use crate::{identity, matcher::split_parameter_list};

/// A member reference lexically extracted from rendered output.
///
/// Transient: produced per render pass, consumed to build navigation links and the
/// call tree, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodReferenceToken {
    /// The raw matched text, used for first-seen deduplication.
    pub raw: String,
    /// Canonical type name (separators unified, arity and generic suffix handled).
    pub type_name: String,
    /// Member name, leading `.` preserved for `.ctor`/`.cctor`.
    pub member_name: String,
    /// Parameter type names when the token carried a parenthesized list;
    /// `None` when it did not (which disables exact-overload matching).
    pub parameter_types: Option<Vec<String>>,
}

impl MethodReferenceToken {
    /// Parses one matched token.
    ///
    /// Strips a leading return-type token (the last space-separated segment of the
    /// left side is the real type), then the assembly-qualifier prefix, then
    /// normalizes the type through the identity layer (arity markers removed,
    /// trailing generic arguments depth-aware-stripped). The member side keeps
    /// synthesized bracketed names verbatim.
    ///
    /// Returns `None` for degenerate matches with an empty type or member part.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (left, right) = raw.split_once("::")?;

        let type_part = left.split_whitespace().last().unwrap_or(left);
        let type_part = strip_assembly_qualifier(type_part);
        let type_name = identity::normalize_type(type_part);

        let (member_part, parameter_types) = match right.split_once('(') {
            Some((name, rest)) => {
                let inner = rest.strip_suffix(')')?;
                (name, Some(split_parameter_list(inner)))
            }
            None => (right, None),
        };

        let member_name = if identity::is_synthesized(member_part) {
            member_part.to_string()
        } else {
            identity::strip_generic_arity(identity::strip_generic_suffix(member_part))
        };

        if type_name.is_empty() || member_name.is_empty() {
            return None;
        }

        Some(Self {
            raw: raw.to_string(),
            type_name,
            member_name,
            parameter_types,
        })
    }
}

/// Removes a `[Assembly.Name]` prefix, if present.
fn strip_assembly_qualifier(name: &str) -> &str {
    if let Some(rest) = name.strip_prefix('[') {
        if let Some(close) = rest.find(']') {
            return &rest[close + 1..];
        }
    }
    name
}
