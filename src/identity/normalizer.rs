//! Canonical type name construction and comparison.

/// The character introducing a generic arity count in metadata names (`` List`1 ``).
pub const ARITY_MARKER: char = '`';

/// The reserved leading marker of compiler-synthesized names (`<ProcessAsync>d__0`).
pub const SYNTHESIZED_MARKER: char = '<';

/// Returns `true` if the name is compiler-synthesized.
///
/// Synthesized names (closure display classes, async/iterator state machines,
/// anonymous types) lead with the reserved `<` marker, either on the whole name
/// or on its last dot-separated segment for nested spellings such as
/// `MyApp.C.<Process>d__0`.
#[must_use]
pub fn is_synthesized(name: &str) -> bool {
    name.starts_with(SYNTHESIZED_MARKER)
        || name
            .rsplit(['.', '/', '+'])
            .next()
            .is_some_and(|segment| segment.starts_with(SYNTHESIZED_MARKER))
}

/// Strips a trailing, balanced `<...>` generic argument list from a name.
///
/// The walk is depth-aware: starting from the trailing `>` it increments depth on
/// `>` and decrements on `<`, stripping from the position where depth returns to
/// zero. The name is returned unchanged when it does not end in `>` or when the
/// brackets never balance.
///
/// This is purely lexical; it does not consult [`is_synthesized`]. Callers that
/// must preserve synthesized identities check that first.
#[must_use]
pub fn strip_generic_suffix(name: &str) -> &str {
    if !name.ends_with('>') {
        return name;
    }

    let mut depth = 0usize;
    for (index, ch) in name.char_indices().rev() {
        match ch {
            '>' => depth += 1,
            '<' => {
                depth -= 1;
                if depth == 0 {
                    return &name[..index];
                }
            }
            _ => {}
        }
    }

    // Brackets never balanced, leave untouched.
    name
}

/// Removes every backtick arity marker (backtick followed by a decimal count).
///
/// `` Dictionary`2 `` becomes `Dictionary`; a backtick that is not followed by a
/// digit is kept as-is.
#[must_use]
pub fn strip_generic_arity(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ARITY_MARKER && chars.peek().is_some_and(char::is_ascii_digit) {
            while chars.peek().is_some_and(char::is_ascii_digit) {
                chars.next();
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Produces the canonical form of a raw type name.
///
/// Nested-type separators (`/`, `+`) are uniformly replaced with `.`. For ordinary
/// names, a trailing balanced `<...>` argument list and all backtick arity markers
/// are then stripped to the bare name. Compiler-synthesized names keep their
/// bracketed segments and arity verbatim, because there they are semantically part
/// of the identity.
///
/// Normalization is idempotent: running it on an already-canonical name is a no-op.
#[must_use]
pub fn normalize_type(raw: &str) -> String {
    let unified = raw.replace(['/', '+'], ".");

    if is_synthesized(&unified) {
        return unified;
    }

    strip_generic_arity(strip_generic_suffix(&unified))
}

/// Returns `true` when two raw type names denote the same type.
///
/// Both sides are canonicalized via [`normalize_type`] first. Two canonical forms
/// are the same type iff they are equal, or one is a dot-suffix of the other
/// (namespace-qualified vs. short form, matched on whole dot-segments).
#[must_use]
pub fn types_equal(a: &str, b: &str) -> bool {
    let canon_a = normalize_type(a);
    let canon_b = normalize_type(b);

    canonical_equal(&canon_a, &canon_b)
}

/// Equality over already-canonical names: exact, or dot-suffix in either direction.
fn canonical_equal(a: &str, b: &str) -> bool {
    a == b || is_dot_suffix(a, b) || is_dot_suffix(b, a)
}

/// Returns `true` if `shorter` equals `longer` with a leading `namespace.` chain removed.
///
/// The match is anchored on a `.` boundary so `Inner` never matches `OuterInner`.
fn is_dot_suffix(longer: &str, shorter: &str) -> bool {
    longer.len() > shorter.len()
        && longer.ends_with(shorter)
        && longer.as_bytes()[longer.len() - shorter.len() - 1] == b'.'
}
