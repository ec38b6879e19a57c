//! The ancestry walk producing a [`MemberDescriptor`].

use crate::locator::{
    operator_metadata_name, AccessorKind, MemberDescriptor, MemberKind, SyntaxAncestry, SyntaxNode,
};

/// Locates the smallest member-like construct enclosing the caret.
///
/// State-free, single pass up the ancestor chain. Classification tries the most
/// specific construct first: an accessor body wins over its owning property,
/// indexer or event; the first member-like node encountered walking outward wins
/// overall. Hitting a type declaration before any member means the caret sits at
/// class level, which is not an error, just no descriptor.
///
/// # Arguments
///
/// * `ancestry` - The enclosing constructs at the caret, innermost first
///
/// # Returns
///
/// The descriptor for the enclosing member, or `None` when the caret is outside
/// any member body or outside any type declaration.
#[must_use]
pub fn locate(ancestry: &SyntaxAncestry) -> Option<MemberDescriptor> {
    let type_name = ancestry.enclosing_type_name()?;
    let nodes = ancestry.nodes();

    for (index, node) in nodes.iter().enumerate() {
        match node {
            SyntaxNode::Accessor { kind } => {
                return accessor_descriptor(&type_name, *kind, &nodes[index + 1..]);
            }
            SyntaxNode::Method {
                name,
                parameter_types,
            } => {
                return Some(MemberDescriptor::new(
                    type_name,
                    name.clone(),
                    parameter_types.as_deref(),
                    MemberKind::Method,
                ));
            }
            SyntaxNode::Constructor {
                is_static,
                parameter_types,
            } => {
                let name = if *is_static { ".cctor" } else { ".ctor" };
                return Some(MemberDescriptor::new(
                    type_name,
                    name,
                    parameter_types.as_deref(),
                    MemberKind::Constructor,
                ));
            }
            SyntaxNode::Destructor => {
                return Some(MemberDescriptor::new(
                    type_name,
                    "Finalize",
                    Some(&[]),
                    MemberKind::Destructor,
                ));
            }
            SyntaxNode::Operator {
                token,
                metadata_name,
                parameter_types,
            } => {
                let name = metadata_name
                    .clone()
                    .unwrap_or_else(|| operator_metadata_name(token));
                return Some(MemberDescriptor::new(
                    type_name,
                    name,
                    parameter_types.as_deref(),
                    MemberKind::Operator,
                ));
            }
            SyntaxNode::ConversionOperator {
                is_implicit,
                parameter_types,
            } => {
                let name = if *is_implicit { "op_Implicit" } else { "op_Explicit" };
                return Some(MemberDescriptor::new(
                    type_name,
                    name,
                    parameter_types.as_deref(),
                    MemberKind::ConversionOperator,
                ));
            }
            // Bare declarations: caret on the declaration line, not inside an
            // accessor body. Properties and events default to their first accessor.
            SyntaxNode::Property { name } => {
                return Some(MemberDescriptor::new(
                    type_name,
                    format!("get_{name}"),
                    Some(&[]),
                    MemberKind::PropertyAccessor,
                ));
            }
            SyntaxNode::Indexer { parameter_types } => {
                return Some(MemberDescriptor::new(
                    type_name,
                    "get_Item",
                    parameter_types.as_deref(),
                    MemberKind::Indexer,
                ));
            }
            SyntaxNode::Event { name } => {
                return Some(MemberDescriptor::new(
                    type_name,
                    format!("add_{name}"),
                    Some(&[]),
                    MemberKind::EventAccessor,
                ));
            }
            SyntaxNode::Type { .. } => return None,
            SyntaxNode::Namespace { .. } => return None,
        }
    }

    None
}

/// Resolves an accessor body against its owning declaration further out.
fn accessor_descriptor(
    type_name: &str,
    kind: AccessorKind,
    outer: &[SyntaxNode],
) -> Option<MemberDescriptor> {
    let owner = outer.iter().find(|node| {
        matches!(
            node,
            SyntaxNode::Property { .. } | SyntaxNode::Indexer { .. } | SyntaxNode::Event { .. }
        )
    })?;

    match (owner, kind) {
        (SyntaxNode::Property { name }, AccessorKind::Get) => Some(MemberDescriptor::new(
            type_name,
            format!("get_{name}"),
            Some(&[]),
            MemberKind::PropertyAccessor,
        )),
        (SyntaxNode::Property { name }, AccessorKind::Set) => Some(MemberDescriptor::new(
            type_name,
            format!("set_{name}"),
            Some(&[]),
            MemberKind::PropertyAccessor,
        )),
        (SyntaxNode::Indexer { parameter_types }, AccessorKind::Get) => {
            Some(MemberDescriptor::new(
                type_name,
                "get_Item",
                parameter_types.as_deref(),
                MemberKind::Indexer,
            ))
        }
        (SyntaxNode::Indexer { parameter_types }, AccessorKind::Set) => {
            Some(MemberDescriptor::new(
                type_name,
                "set_Item",
                parameter_types.as_deref(),
                MemberKind::Indexer,
            ))
        }
        (SyntaxNode::Event { name }, AccessorKind::Add) => Some(MemberDescriptor::new(
            type_name,
            format!("add_{name}"),
            Some(&[]),
            MemberKind::EventAccessor,
        )),
        (SyntaxNode::Event { name }, AccessorKind::Remove) => Some(MemberDescriptor::new(
            type_name,
            format!("remove_{name}"),
            Some(&[]),
            MemberKind::EventAccessor,
        )),
        // Mismatched accessor/owner pairing from the host; nothing sensible to derive.
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_type(member: SyntaxNode) -> SyntaxAncestry {
        SyntaxAncestry::new(vec![
            member,
            SyntaxNode::Type { name: "C".into() },
            SyntaxNode::Namespace { name: "MyApp".into() },
        ])
    }

    #[test]
    fn test_method_with_symbol() {
        let descriptor = locate(&in_type(SyntaxNode::Method {
            name: "M".into(),
            parameter_types: Some(vec!["string".into()]),
        }))
        .unwrap();
        assert_eq!(descriptor.member_name, "M");
        assert_eq!(descriptor.kind, MemberKind::Method);
        assert_eq!(descriptor.canonical_signature, "MyApp.C.M(string)");
    }

    #[test]
    fn test_method_without_symbol_degrades_to_name_only() {
        let descriptor = locate(&in_type(SyntaxNode::Method {
            name: "M".into(),
            parameter_types: None,
        }))
        .unwrap();
        assert_eq!(descriptor.canonical_signature, "MyApp.C.M");
    }

    #[test]
    fn test_constructor_maps_to_reserved_names() {
        let instance = locate(&in_type(SyntaxNode::Constructor {
            is_static: false,
            parameter_types: Some(vec!["int".into()]),
        }))
        .unwrap();
        assert_eq!(instance.member_name, ".ctor");

        let static_ctor = locate(&in_type(SyntaxNode::Constructor {
            is_static: true,
            parameter_types: Some(vec![]),
        }))
        .unwrap();
        assert_eq!(static_ctor.member_name, ".cctor");
    }

    #[test]
    fn test_destructor_maps_to_finalize() {
        let descriptor = locate(&in_type(SyntaxNode::Destructor)).unwrap();
        assert_eq!(descriptor.member_name, "Finalize");
        assert_eq!(descriptor.kind, MemberKind::Destructor);
    }

    #[test]
    fn test_get_accessor_wins_over_owning_property() {
        let ancestry = SyntaxAncestry::new(vec![
            SyntaxNode::Accessor { kind: AccessorKind::Get },
            SyntaxNode::Property { name: "Length".into() },
            SyntaxNode::Type { name: "C".into() },
        ]);
        let descriptor = locate(&ancestry).unwrap();
        assert_eq!(descriptor.member_name, "get_Length");
        assert_eq!(descriptor.canonical_signature, "C.get_Length()");
        assert_eq!(descriptor.kind, MemberKind::PropertyAccessor);
    }

    #[test]
    fn test_bare_property_defaults_to_getter() {
        let descriptor = locate(&in_type(SyntaxNode::Property { name: "Count".into() })).unwrap();
        assert_eq!(descriptor.member_name, "get_Count");
    }

    #[test]
    fn test_indexer_accessors_use_item() {
        let ancestry = SyntaxAncestry::new(vec![
            SyntaxNode::Accessor { kind: AccessorKind::Set },
            SyntaxNode::Indexer {
                parameter_types: Some(vec!["int".into()]),
            },
            SyntaxNode::Type { name: "C".into() },
        ]);
        let descriptor = locate(&ancestry).unwrap();
        assert_eq!(descriptor.member_name, "set_Item");
        assert_eq!(descriptor.kind, MemberKind::Indexer);
        assert_eq!(descriptor.canonical_signature, "C.set_Item(int)");
    }

    #[test]
    fn test_event_accessors() {
        let ancestry = SyntaxAncestry::new(vec![
            SyntaxNode::Accessor { kind: AccessorKind::Remove },
            SyntaxNode::Event { name: "Changed".into() },
            SyntaxNode::Type { name: "C".into() },
        ]);
        let descriptor = locate(&ancestry).unwrap();
        assert_eq!(descriptor.member_name, "remove_Changed");
        assert_eq!(descriptor.kind, MemberKind::EventAccessor);
    }

    #[test]
    fn test_operator_prefers_symbol_metadata_name() {
        let descriptor = locate(&in_type(SyntaxNode::Operator {
            token: "+".into(),
            metadata_name: Some("op_Addition".into()),
            parameter_types: Some(vec!["C".into(), "C".into()]),
        }))
        .unwrap();
        assert_eq!(descriptor.member_name, "op_Addition");
        assert_eq!(descriptor.kind, MemberKind::Operator);
    }

    #[test]
    fn test_operator_falls_back_to_token_mapping() {
        let descriptor = locate(&in_type(SyntaxNode::Operator {
            token: "==".into(),
            metadata_name: None,
            parameter_types: None,
        }))
        .unwrap();
        assert_eq!(descriptor.member_name, "op_Equality");
    }

    #[test]
    fn test_conversion_operator_names() {
        let implicit = locate(&in_type(SyntaxNode::ConversionOperator {
            is_implicit: true,
            parameter_types: Some(vec!["int".into()]),
        }))
        .unwrap();
        assert_eq!(implicit.member_name, "op_Implicit");
        assert_eq!(implicit.kind, MemberKind::ConversionOperator);

        let explicit = locate(&in_type(SyntaxNode::ConversionOperator {
            is_implicit: false,
            parameter_types: None,
        }))
        .unwrap();
        assert_eq!(explicit.member_name, "op_Explicit");
    }

    #[test]
    fn test_caret_at_class_level_yields_none() {
        let ancestry = SyntaxAncestry::new(vec![
            SyntaxNode::Type { name: "C".into() },
            SyntaxNode::Namespace { name: "MyApp".into() },
        ]);
        assert!(locate(&ancestry).is_none());
    }

    #[test]
    fn test_caret_outside_any_type_yields_none() {
        let ancestry = SyntaxAncestry::new(vec![SyntaxNode::Namespace { name: "MyApp".into() }]);
        assert!(locate(&ancestry).is_none());
    }
}
