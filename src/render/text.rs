//! Plain-text rendering of a [`MethodListing`].

use std::collections::BTreeMap;

use crate::render::MethodListing;

/// Maximum number of available type names shown in a not-found listing.
pub const MAX_TYPE_CANDIDATES: usize = 10;

/// Maximum number of available member names shown in a not-found listing.
pub const MAX_MEMBER_CANDIDATES: usize = 20;

/// Renders a structured listing to the panel's plain-text format.
///
/// The output interleaves a comment header (stack depth, code size, locals,
/// exception-handler summary, branch and call counts) with the instruction body.
/// Exception-region boundaries appear as inline `try {` / `catch (Type) {` /
/// `filter {` / `finally {` / `fault {` markers and closing braces at the offsets
/// where each region starts and ends, with the enclosed instructions indented one
/// level per active region. When the listing names compiler-synthesized related
/// types, a trailing section lists their members in `Type::Member(params)` form.
#[must_use]
pub fn render_listing(listing: &MethodListing) -> String {
    let mut output = String::new();

    output.push_str(&format!("// {}\n", listing.signature));
    output.push_str(&format!("// Code size:    {} bytes\n", listing.code_size));
    output.push_str(&format!("// Stack depth:  {}\n", listing.max_stack));
    output.push_str(&format!("// Locals:       {}\n", listing.local_count));
    output.push_str(&format!(
        "// Branches: {} | Calls: {}\n",
        listing.branch_count(),
        listing.call_count()
    ));
    if !listing.exception_regions.is_empty() {
        output.push_str(&format!(
            "// Exception regions: {}\n",
            listing.exception_regions.len()
        ));
    }
    output.push('\n');

    render_body(listing, &mut output);
    render_related_types(listing, &mut output);

    output
}

/// Emits the instruction body with inline region boundary markers.
fn render_body(listing: &MethodListing, output: &mut String) {
    // Boundary markers keyed by body offset. Closes run before opens at the same
    // offset so a handler starting where its try block ends reads `} catch {`.
    let mut opens: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    let mut closes: BTreeMap<u32, usize> = BTreeMap::new();

    for region in &listing.exception_regions {
        opens
            .entry(region.try_start)
            .or_default()
            .push("try {".to_string());
        *closes.entry(region.try_end).or_default() += 1;
        opens
            .entry(region.handler_start)
            .or_default()
            .push(region.kind.opening_marker());
        *closes.entry(region.handler_end).or_default() += 1;
    }

    let mut depth = 0usize;
    for line in &listing.instructions {
        if let Some(count) = closes.remove(&line.offset) {
            for _ in 0..count {
                depth = depth.saturating_sub(1);
                push_line(output, depth, "}");
            }
        }
        if let Some(markers) = opens.remove(&line.offset) {
            for marker in markers {
                push_line(output, depth, &marker);
                depth += 1;
            }
        }
        push_line(output, depth, &format!("IL_{:04X}: {}", line.offset, line.text));
    }

    // Regions ending at or past the last instruction close here.
    let remaining: usize = closes.values().sum();
    for _ in 0..remaining {
        depth = depth.saturating_sub(1);
        push_line(output, depth, "}");
    }
}

/// Emits the compiler-synthesized related-types trailer.
fn render_related_types(listing: &MethodListing, output: &mut String) {
    if listing.related_types.is_empty() {
        return;
    }

    output.push('\n');
    output.push_str("// Compiler-generated:\n");
    for related in &listing.related_types {
        for member in &related.members {
            output.push_str(&format!("//   {}::{}\n", related.name, member));
        }
    }
}

fn push_line(output: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        output.push_str("  ");
    }
    output.push_str(text);
    output.push('\n');
}

/// Truncates a candidate listing to its first `limit` names.
///
/// # Returns
///
/// The retained names plus the total count before truncation, so callers can
/// report "N of M shown".
#[must_use]
pub fn truncate_candidates(names: Vec<String>, limit: usize) -> (Vec<String>, usize) {
    let total = names.len();
    let mut shown = names;
    shown.truncate(limit);
    (shown, total)
}
