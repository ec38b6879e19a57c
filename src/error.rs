use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The taxonomy is closed: every failure the engine can surface to the presentation layer is a
/// variant here, carrying structured detail fields. Formatting to user-visible text happens only
/// at the presentation boundary through [`std::fmt::Display`]; the core never matches on its own
/// rendered error strings.
///
/// # Error Categories
///
/// ## Resolution
/// - [`Error::NoFileOpen`] - No source document is active
/// - [`Error::UnsupportedFile`] - The active document kind cannot be inspected
/// - [`Error::OutsideMember`] - The caret is not inside any member body
///
/// ## Compilation and Lookup
/// - [`Error::CompilationFailed`] - The owning project does not compile
/// - [`Error::MemberNotFound`] - The member exists in source but not in the compiled model
/// - [`Error::NoBody`] - The member has no body (abstract/interface/extern)
///
/// ## Operational
/// - [`Error::Timeout`] - An external operation exceeded its time bound
/// - [`Error::Cancelled`] - The operation's cancellation scope was cancelled
/// - [`Error::Disposed`] - A disposed cache or engine was used
/// - [`Error::Internal`] - An unanticipated fault from an external collaborator
///
/// # Examples
///
/// ```rust
/// use cilview::Error;
///
/// let err = Error::CompilationFailed {
///     excerpt: vec!["CS0103: name does not exist".into()],
///     total: 3,
/// };
/// assert!(err.to_string().contains("2 more"));
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// No source file is currently open in the host editor.
    #[error("No file is currently open")]
    NoFileOpen,

    /// The open document is not a kind the engine can inspect.
    ///
    /// The associated value is the path or display name of the offending document.
    #[error("Unsupported file kind: {0}")]
    UnsupportedFile(String),

    /// The caret is not positioned inside any member body.
    ///
    /// This is a benign condition, recovered locally by the presentation layer with a
    /// "place the cursor inside a member" hint. It is a variant here so the pipeline can
    /// report it without inventing a side channel.
    #[error("Place the cursor inside a method, constructor, accessor or operator body")]
    OutsideMember,

    /// The owning project failed to compile.
    ///
    /// Carries a bounded excerpt of error diagnostics plus the total error count.
    /// The excerpt holds at most [`crate::cache::MAX_DIAGNOSTIC_EXCERPT`] entries;
    /// `total` counts all error diagnostics the compile produced. Never cached,
    /// retried automatically on the next caret settle or explicit refresh.
    #[error("Compilation has errors: {}{}", excerpt.join("; "), remainder_marker(excerpt.len(), *total))]
    CompilationFailed {
        /// The first few error diagnostics, in reported order.
        excerpt: Vec<String>,
        /// Total number of error diagnostics produced by the compile.
        total: usize,
    },

    /// The member resolved from source could not be located in the compiled model.
    ///
    /// Root causes are usually separator/arity convention mismatches, which the identity
    /// normalizer is the primary defense against; a residual miss is reported with a
    /// truncated listing of what *was* available to aid diagnosis.
    #[error("Member not found: {target}; available: {} ({} of {total} shown)", available.join(", "), available.len())]
    MemberNotFound {
        /// The member that was searched for, in canonical form.
        target: String,
        /// A truncated listing of candidate names that were available.
        available: Vec<String>,
        /// Total number of candidates available before truncation.
        total: usize,
    },

    /// The member has no body to display (abstract, interface, or extern member).
    ///
    /// The associated value is the member's canonical signature.
    #[error("Member has no body: {0}")]
    NoBody(String),

    /// An external operation exceeded its time bound.
    ///
    /// Reported as a distinct outcome, never silently swallowed; the associated value
    /// names the operation that timed out.
    #[error("Operation took too long: {0}")]
    Timeout(String),

    /// The operation's cancellation scope was cancelled before it completed.
    ///
    /// A cancelled operation performs no further mutation of shared render or cache state;
    /// this variant exists so callers can distinguish supersession from real failure.
    #[error("Operation was cancelled")]
    Cancelled,

    /// A disposed cache or engine was used.
    ///
    /// This is a used-incorrectly precondition, not an expected runtime condition.
    #[error("Object has already been disposed")]
    Disposed,

    /// An unanticipated fault from an external library call.
    ///
    /// Caught at the outermost operation boundary and converted to status text;
    /// never propagated to crash the host.
    #[error("Error: {0}")]
    Internal(String),
}

impl Error {
    /// Builds a [`Error::MemberNotFound`] for a member lookup miss.
    ///
    /// The candidate listing is truncated to the first
    /// [`crate::render::MAX_MEMBER_CANDIDATES`] names; `total` keeps the count
    /// before truncation. Collaborator implementations report misses through
    /// this so the listing bound holds everywhere.
    #[must_use]
    pub fn member_not_found(target: impl Into<String>, candidates: Vec<String>) -> Self {
        let (available, total) =
            crate::render::truncate_candidates(candidates, crate::render::MAX_MEMBER_CANDIDATES);
        Self::MemberNotFound {
            target: target.into(),
            available,
            total,
        }
    }

    /// Builds a [`Error::MemberNotFound`] for a type lookup miss.
    ///
    /// Like [`Error::member_not_found`], but listing available type names,
    /// truncated to the first [`crate::render::MAX_TYPE_CANDIDATES`].
    #[must_use]
    pub fn type_not_found(target: impl Into<String>, candidate_types: Vec<String>) -> Self {
        let (available, total) =
            crate::render::truncate_candidates(candidate_types, crate::render::MAX_TYPE_CANDIDATES);
        Self::MemberNotFound {
            target: target.into(),
            available,
            total,
        }
    }
}

/// Formats the "and N more" tail for truncated diagnostic listings.
fn remainder_marker(shown: usize, total: usize) -> String {
    if total > shown {
        format!(" (and {} more)", total - shown)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compilation_failed_display_counts_remainder() {
        let err = Error::CompilationFailed {
            excerpt: vec!["e1".into(), "e2".into()],
            total: 7,
        };
        let text = err.to_string();
        assert!(text.contains("e1; e2"));
        assert!(text.contains("(and 5 more)"));
    }

    #[test]
    fn test_compilation_failed_display_no_remainder_when_all_shown() {
        let err = Error::CompilationFailed {
            excerpt: vec!["only".into()],
            total: 1,
        };
        assert!(!err.to_string().contains("more"));
    }

    #[test]
    fn test_member_not_found_constructor_bounds_listing() {
        let candidates: Vec<String> = (0..25).map(|i| format!("M{i}")).collect();
        let err = Error::member_not_found("Foo.Missing", candidates);
        match &err {
            Error::MemberNotFound { available, total, .. } => {
                assert_eq!(available.len(), crate::render::MAX_MEMBER_CANDIDATES);
                assert_eq!(*total, 25);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("20 of 25 shown"));
    }

    #[test]
    fn test_type_not_found_constructor_bounds_listing() {
        let types: Vec<String> = (0..12).map(|i| format!("T{i}")).collect();
        let err = Error::type_not_found("Gone", types);
        match err {
            Error::MemberNotFound { available, total, .. } => {
                assert_eq!(available.len(), crate::render::MAX_TYPE_CANDIDATES);
                assert_eq!(total, 12);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_member_not_found_display_lists_candidates() {
        let err = Error::MemberNotFound {
            target: "Foo.Bar".into(),
            available: vec!["Baz".into(), "Qux".into()],
            total: 12,
        };
        let text = err.to_string();
        assert!(text.contains("Foo.Bar"));
        assert!(text.contains("Baz, Qux"));
        assert!(text.contains("2 of 12"));
    }
}
