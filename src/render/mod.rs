//! Rendered-text composition for the presentation layer.
//!
//! The low-level reader hands back a structured [`MethodListing`]; this module turns
//! it into the plain text the panel displays: a rich header (stack depth, code size,
//! local count, exception-handler summary, branch and call counts), a line-oriented
//! body with inline exception-region boundary markers (`try {`, `catch (Type) {`,
//! `finally {`, closing `}`) positioned at the instruction offsets where each region
//! starts and ends, and a trailing section listing compiler-synthesized related types
//! in the same `Type::Member` token grammar the cross-reference extractor understands,
//! so they render as clickable even though they were not the primary render target.
//!
//! Candidate-listing truncation for "not found" reporting also lives here, since its
//! limits are presentation policy: the first [`MAX_TYPE_CANDIDATES`] types or
//! [`MAX_MEMBER_CANDIDATES`] members are shown, explicitly counted.

mod listing;
mod text;

pub use listing::{
    ExceptionRegion, ExceptionRegionKind, FlowKind, InstructionLine, MethodListing, RelatedType,
};
pub use text::{
    render_listing, truncate_candidates, MAX_MEMBER_CANDIDATES, MAX_TYPE_CANDIDATES,
};
