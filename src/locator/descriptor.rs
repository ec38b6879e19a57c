//! The resolved member target handed to the rest of the pipeline.

use strum::Display;

use crate::matcher::split_parameter_list;

/// The supported member kinds, as a closed sum type.
///
/// Produced by the ancestry walk; each caret resolution classifies the enclosing
/// construct into exactly one of these.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// An ordinary method.
    Method,
    /// An instance or static constructor (`.ctor` / `.cctor`).
    Constructor,
    /// A property `get`/`set` accessor, or a bare property defaulting to its getter.
    PropertyAccessor,
    /// A user-defined operator (`op_Addition`, ...).
    Operator,
    /// An implicit or explicit conversion operator (`op_Implicit` / `op_Explicit`).
    ConversionOperator,
    /// An indexer accessor (`get_Item` / `set_Item`).
    Indexer,
    /// An event `add`/`remove` accessor.
    EventAccessor,
    /// A destructor/finalizer (`Finalize`).
    Destructor,
}

/// An immutable descriptor of the member under the caret.
///
/// Produced fresh on every caret settle or link click, never mutated, and discarded
/// once content is rendered. The canonical signature is the arbiter of overload
/// identity throughout the pipeline and is stable across re-resolution of the same
/// source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    /// Fully qualified name of the enclosing type, dot-separated.
    pub type_name: String,
    /// Metadata-level member name (`M`, `.ctor`, `get_Length`, `op_Addition`, ...).
    pub member_name: String,
    /// `TypeName.MemberName(ParamType1, ParamType2, ...)` using the symbol model's
    /// own display type names. When no symbol could be resolved for the member, the
    /// parameter list is omitted entirely, which degrades overload matching
    /// downstream to name-only.
    pub canonical_signature: String,
    /// The classified member kind.
    pub kind: MemberKind,
}

impl MemberDescriptor {
    /// Builds a descriptor, composing the canonical signature.
    ///
    /// `parameter_types` of `None` means no symbol was resolved; `Some(vec![])` is a
    /// resolved member with zero parameters and produces an explicit `()`.
    #[must_use]
    pub fn new(
        type_name: impl Into<String>,
        member_name: impl Into<String>,
        parameter_types: Option<&[String]>,
        kind: MemberKind,
    ) -> Self {
        let type_name = type_name.into();
        let member_name = member_name.into();
        let canonical_signature = match parameter_types {
            Some(types) => format!("{type_name}.{member_name}({})", types.join(", ")),
            None => format!("{type_name}.{member_name}"),
        };

        Self {
            type_name,
            member_name,
            canonical_signature,
            kind,
        }
    }

    /// The ordered parameter type names recovered from the canonical signature.
    ///
    /// Returns `None` for name-only signatures (no symbol information), which
    /// disables exact-overload matching downstream.
    #[must_use]
    pub fn expected_parameter_types(&self) -> Option<Vec<String>> {
        let open = self.canonical_signature.find('(')?;
        let inner = self.canonical_signature[open + 1..].strip_suffix(')')?;
        Some(split_parameter_list(inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_with_parameters() {
        let descriptor = MemberDescriptor::new(
            "MyApp.C",
            "M",
            Some(&["string".to_string(), "int".to_string()]),
            MemberKind::Method,
        );
        assert_eq!(descriptor.canonical_signature, "MyApp.C.M(string, int)");
        assert_eq!(
            descriptor.expected_parameter_types(),
            Some(vec!["string".to_string(), "int".to_string()])
        );
    }

    #[test]
    fn test_signature_without_symbol_omits_parameter_list() {
        let descriptor = MemberDescriptor::new("MyApp.C", "M", None, MemberKind::Method);
        assert_eq!(descriptor.canonical_signature, "MyApp.C.M");
        assert_eq!(descriptor.expected_parameter_types(), None);
    }

    #[test]
    fn test_empty_parameter_list_is_explicit() {
        let descriptor =
            MemberDescriptor::new("C", "get_X", Some(&[]), MemberKind::PropertyAccessor);
        assert_eq!(descriptor.canonical_signature, "C.get_X()");
        assert_eq!(descriptor.expected_parameter_types(), Some(vec![]));
    }

    #[test]
    fn test_stable_across_reconstruction() {
        let a = MemberDescriptor::new("C", "M", Some(&["int".to_string()]), MemberKind::Method);
        let b = MemberDescriptor::new("C", "M", Some(&["int".to_string()]), MemberKind::Method);
        assert_eq!(a, b);
    }
}
