//! Candidate member representation and best-match selection.

use crate::{identity, matcher::aliases::builtin_alias_name};

/// Parameter modifier prefixes stripped from expected types before comparison.
const MODIFIER_PREFIXES: [&str; 3] = ["ref ", "out ", "in "];

/// A member as seen by the low-level metadata model or the decompiler type system.
///
/// Candidates carry just enough to score a match: the member name as that model
/// spells it, and its parameter type names in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberCandidate {
    /// Member name in the candidate model's own spelling.
    pub name: String,
    /// Parameter type names in declaration order.
    pub parameter_types: Vec<String>,
}

impl MemberCandidate {
    /// Creates a candidate from a name and its parameter types.
    #[must_use]
    pub fn new(name: impl Into<String>, parameter_types: Vec<String>) -> Self {
        Self {
            name: name.into(),
            parameter_types,
        }
    }
}

/// Selects the best-matching candidate for a target member.
///
/// Candidates are scanned in declaration order. Without `expected_parameter_types`
/// the first name match (via [`identity::types_equal`]) wins. With them, the first
/// candidate that matches on name, parameter count and pairwise type compatibility
/// wins; when no candidate matches fully, the first name-only match seen during the
/// scan is returned as a fallback. The scan is deterministic for a given candidate
/// order.
///
/// # Arguments
///
/// * `candidates` - Candidate members in declaration order
/// * `target_name` - The member name derived from the source symbol model
/// * `expected_parameter_types` - Ordered parameter type display names, when known
///
/// # Returns
///
/// The best match, or `None` when no candidate matches even by name.
#[must_use]
pub fn find_best_match<'a>(
    candidates: &'a [MemberCandidate],
    target_name: &str,
    expected_parameter_types: Option<&[String]>,
) -> Option<&'a MemberCandidate> {
    let Some(expected) = expected_parameter_types else {
        return candidates
            .iter()
            .find(|candidate| member_names_equal(&candidate.name, target_name));
    };

    let mut name_only_fallback = None;

    for candidate in candidates {
        if !member_names_equal(&candidate.name, target_name) {
            continue;
        }

        if name_only_fallback.is_none() {
            name_only_fallback = Some(candidate);
        }

        if candidate.parameter_types.len() == expected.len()
            && candidate
                .parameter_types
                .iter()
                .zip(expected)
                .all(|(have, want)| parameter_types_compatible(have, want))
        {
            return Some(candidate);
        }
    }

    name_only_fallback
}

/// Name equality for members: identity comparison, which also covers explicit
/// interface implementations spelled with a dotted prefix.
fn member_names_equal(a: &str, b: &str) -> bool {
    a == b || identity::types_equal(a, b)
}

/// Pairwise parameter type compatibility.
///
/// Strips `ref `/`out `/`in ` from the expected side, recurses through matching
/// `[]` array suffixes, then compares short names under built-in alias mapping.
fn parameter_types_compatible(candidate: &str, expected: &str) -> bool {
    let expected = strip_modifier(expected.trim());
    let candidate = candidate.trim();

    if let (Some(candidate_element), Some(expected_element)) =
        (candidate.strip_suffix("[]"), expected.strip_suffix("[]"))
    {
        return parameter_types_compatible(candidate_element, expected_element);
    }

    let candidate_short = short_type_name(candidate);
    let expected_short = short_type_name(expected);

    builtin_alias_name(candidate_short) == builtin_alias_name(expected_short)
}

/// Removes a single leading parameter modifier, if present.
fn strip_modifier(name: &str) -> &str {
    for prefix in MODIFIER_PREFIXES {
        if let Some(stripped) = name.strip_prefix(prefix) {
            return stripped;
        }
    }
    name
}

/// The last segment of a type name after the final separator, generic suffix removed.
fn short_type_name(name: &str) -> &str {
    let bare = identity::strip_generic_suffix(name);
    bare.rsplit(['.', '/', '+']).next().unwrap_or(bare)
}

/// Splits a comma-joined parameter type list on top-level commas only.
///
/// Commas nested inside angle brackets (`Dictionary<string, int>`) or square
/// brackets (`int[,]`) do not split. Segments are trimmed; an empty input yields
/// an empty list.
#[must_use]
pub fn split_parameter_list(parameters: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;

    for (index, ch) in parameters.char_indices() {
        match ch {
            '<' | '[' => depth += 1,
            '>' | ']' => depth -= 1,
            ',' if depth == 0 => {
                segments.push(parameters[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }
    segments.push(parameters[start..].trim());

    segments
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
