//! Resolution of extracted tokens and call-tree grouping.

use crate::{
    matcher::{find_best_match, MemberCandidate},
    xref::MethodReferenceToken,
};

/// A reference token resolved to a navigable member in the target model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    /// Canonical full name of the containing type.
    pub type_name: String,
    /// Member name as the target model spells it.
    pub member_name: String,
    /// Short display signature (`Member(short param names)`), the per-type
    /// deduplication key of the call tree.
    pub display_signature: String,
}

impl ResolvedReference {
    /// Builds a resolved reference from a token's type and the matched candidate.
    #[must_use]
    pub fn new(type_name: String, candidate: &MemberCandidate) -> Self {
        let short_params: Vec<&str> = candidate
            .parameter_types
            .iter()
            .map(|parameter| short_name(parameter))
            .collect();
        let display_signature = format!("{}({})", candidate.name, short_params.join(", "));

        Self {
            type_name,
            member_name: candidate.name.clone(),
            display_signature,
        }
    }

    /// The containing type's short name (last dot segment).
    #[must_use]
    pub fn short_type_name(&self) -> &str {
        short_name(&self.type_name)
    }
}

fn short_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// One node of the grouped call tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallTreeNode {
    /// A type contributing exactly one reference, listed flat.
    Leaf(ResolvedReference),
    /// A type contributing several references, grouped under an expandable node.
    Group {
        /// The contributing type's short name.
        type_name: String,
        /// Its references, deduplicated by display signature.
        members: Vec<ResolvedReference>,
    },
}

/// Resolves extracted tokens against the target model's candidate lists.
///
/// For each token, `candidates_for` supplies the members of the referenced type in
/// the target model (empty for unknown types); the best match is selected via the
/// signature matcher. Tokens that resolve to nothing are dropped; a miss here is an
/// expected condition, not an error.
pub fn resolve_references<F>(
    tokens: &[MethodReferenceToken],
    mut candidates_for: F,
) -> Vec<ResolvedReference>
where
    F: FnMut(&str) -> Vec<MemberCandidate>,
{
    tokens
        .iter()
        .filter_map(|token| {
            let candidates = candidates_for(&token.type_name);
            let best = find_best_match(
                &candidates,
                &token.member_name,
                token.parameter_types.as_deref(),
            )?;
            Some(ResolvedReference::new(token.type_name.clone(), best))
        })
        .collect()
}

/// Groups resolved references into the navigation call tree.
///
/// References are grouped by their containing type's short name, preserving first
/// appearance order of both types and members. Within a type, duplicates by short
/// display signature collapse. A type contributing exactly one reference becomes a
/// flat [`CallTreeNode::Leaf`]; more than one, an expandable [`CallTreeNode::Group`].
#[must_use]
pub fn build_call_tree(references: Vec<ResolvedReference>) -> Vec<CallTreeNode> {
    let mut type_order: Vec<String> = Vec::new();
    let mut grouped: Vec<(String, Vec<ResolvedReference>)> = Vec::new();

    for reference in references {
        let type_name = reference.short_type_name().to_string();
        match type_order.iter().position(|existing| *existing == type_name) {
            Some(index) => {
                let members = &mut grouped[index].1;
                if !members
                    .iter()
                    .any(|member| member.display_signature == reference.display_signature)
                {
                    members.push(reference);
                }
            }
            None => {
                type_order.push(type_name.clone());
                grouped.push((type_name, vec![reference]));
            }
        }
    }

    grouped
        .into_iter()
        .map(|(type_name, mut members)| {
            if members.len() == 1 {
                CallTreeNode::Leaf(members.remove(0))
            } else {
                CallTreeNode::Group { type_name, members }
            }
        })
        .collect()
}
