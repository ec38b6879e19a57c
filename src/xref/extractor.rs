//! The deadline-bounded token scan.

use std::{
    collections::HashSet,
    sync::LazyLock,
    time::{Duration, Instant},
};

use regex::Regex;
use tracing::warn;

use crate::xref::MethodReferenceToken;

/// Maximum number of distinct references extracted per scan.
pub const MAX_REFERENCES: usize = 200;

/// Default time budget for one scan pass.
pub const DEFAULT_SCAN_DEADLINE: Duration = Duration::from_millis(200);

/// The shared compiled reference pattern, initialized once for the process.
///
/// Matches an optional bracketed assembly qualifier, a dotted/slashed type path
/// (arity markers and bracketed generic arguments allowed), the `::` separator, a
/// member name (leading `.` allowed for `.ctor`/`.cctor`, synthesized bracketed
/// names allowed), and an optional parenthesized parameter list.
static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\[[\w.]+\])?[\w$@.`<>,/+\[\]]+::\.?[\w$@`<>|]+(?:\([^()]*\))?")
        .expect("reference pattern is valid")
});

/// Scans rendered text for member-reference tokens.
///
/// Results are deduplicated by raw match text in order of first appearance and
/// capped at [`MAX_REFERENCES`]; matches beyond the cap are dropped silently. The
/// scan is bounded by `budget`: on expiry the whole pass is treated as having
/// found zero references, which downstream renders as a link-free view rather
/// than a fault.
#[must_use]
pub fn extract_references(text: &str, budget: Duration) -> Vec<MethodReferenceToken> {
    let deadline = Instant::now() + budget;
    let mut seen = HashSet::new();
    let mut references = Vec::new();

    for matched in REFERENCE_PATTERN.find_iter(text) {
        if Instant::now() >= deadline {
            warn!(
                budget_ms = budget.as_millis() as u64,
                found = references.len(),
                "reference scan exceeded its deadline, discarding pass"
            );
            return Vec::new();
        }

        let raw = matched.as_str();
        if !seen.insert(raw) {
            continue;
        }

        if let Some(token) = MethodReferenceToken::parse(raw) {
            references.push(token);
            if references.len() >= MAX_REFERENCES {
                break;
            }
        }
    }

    references
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_first_seen_order() {
        let text = "call void A.One::M()\ncall void B.Two::N(int32)\ncall void A.One::M()";
        let tokens = extract_references(text, DEFAULT_SCAN_DEADLINE);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].type_name, "A.One");
        assert_eq!(tokens[1].type_name, "B.Two");
    }

    #[test]
    fn test_cap_drops_excess_references() {
        let mut text = String::new();
        for i in 0..500 {
            text.push_str(&format!("call void Ns.Type{i}::M{i}()\n"));
        }
        let tokens = extract_references(&text, Duration::from_secs(10));
        assert_eq!(tokens.len(), MAX_REFERENCES);
        assert_eq!(tokens[0].type_name, "Ns.Type0");
        assert_eq!(tokens[199].type_name, "Ns.Type199");
    }

    #[test]
    fn test_expired_deadline_yields_empty_set() {
        let text = "call void A.One::M()";
        let tokens = extract_references(text, Duration::ZERO);
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_constructor_and_generic_tokens() {
        let text = "newobj instance void [core]MyApp.Box`1/Handle::.ctor(!0)";
        let tokens = extract_references(text, DEFAULT_SCAN_DEADLINE);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].type_name, "MyApp.Box.Handle");
        assert_eq!(tokens[0].member_name, ".ctor");
    }

    #[test]
    fn test_plain_prose_is_not_matched() {
        let tokens = extract_references(
            "// no references here, just a comment mentioning try { } blocks",
            DEFAULT_SCAN_DEADLINE,
        );
        assert!(tokens.is_empty());
    }
}
