//! The external collaborator traits.

use crate::{
    host::EmitOutput,
    locator::{MemberDescriptor, SyntaxAncestry},
    matcher::MemberCandidate,
    render::MethodListing,
    Result,
};

/// The host editor and project model.
///
/// Supplies caret ancestry snapshots, file-to-project ownership, and compile-emit.
/// Implementations are expected to be cheap to call for `resolve_position` and
/// `project_for_file`; `emit` may be arbitrarily slow and is always dispatched to
/// a blocking executor thread by the engine.
pub trait SourceWorkspace: Send + Sync + 'static {
    /// Resolves a caret offset in a file to its syntactic ancestry.
    ///
    /// # Errors
    ///
    /// [`crate::Error::NoFileOpen`] when the file is not part of the workspace,
    /// [`crate::Error::UnsupportedFile`] when its kind cannot be inspected.
    fn resolve_position(&self, file: &str, offset: usize) -> Result<SyntaxAncestry>;

    /// The stable key of the project owning a file, if any.
    fn project_for_file(&self, file: &str) -> Option<String>;

    /// Compiles the project and emits its binary.
    ///
    /// Never fails hard: compile errors are reported through
    /// [`EmitOutput::diagnostics`] with `bytes` absent.
    fn emit(&self, project: &str) -> EmitOutput;
}

/// The low-level instruction reader, an external library behind this seam.
///
/// Receives the emitted bytes and a target descriptor; returns a structured
/// listing for the matched member. Implementations use
/// [`crate::matcher::find_best_match`] (or equivalent) to pick the right overload
/// from `expected_parameter_types`.
pub trait InstructionReader: Send + Sync + 'static {
    /// Reads the instruction listing of one member out of the compiled bytes.
    ///
    /// # Errors
    ///
    /// [`crate::Error::MemberNotFound`] when the type or member cannot be located,
    /// built via [`crate::Error::member_not_found`] / [`crate::Error::type_not_found`]
    /// so the candidate listing stays bounded; [`crate::Error::NoBody`] for abstract,
    /// interface or extern members.
    fn read_member(
        &self,
        bytes: &[u8],
        target: &MemberDescriptor,
        expected_parameter_types: Option<&[String]>,
    ) -> Result<MethodListing>;

    /// The members of a type in the low-level model, for cross-reference resolution.
    ///
    /// Returns an empty list for unknown types; not-found is an expected condition
    /// here, not an error.
    fn members_of(&self, bytes: &[u8], type_name: &str) -> Vec<MemberCandidate>;
}

/// The decompiler engine, an external library behind this seam.
pub trait Decompiler: Send + Sync + 'static {
    /// Regenerates source text for a single member.
    ///
    /// # Errors
    ///
    /// [`crate::Error::MemberNotFound`] when the member cannot be located in the
    /// decompiler's type system.
    fn decompile_member(
        &self,
        bytes: &[u8],
        target: &MemberDescriptor,
        expected_parameter_types: Option<&[String]>,
    ) -> Result<String>;

    /// Regenerates source text for an entire type.
    ///
    /// Only invoked by the engine when [`Decompiler::member_count`] stays within
    /// the configured whole-type limit; large types fall back to
    /// [`Decompiler::decompile_member`].
    ///
    /// # Errors
    ///
    /// [`crate::Error::MemberNotFound`] when the type cannot be located.
    fn decompile_type(&self, bytes: &[u8], type_name: &str) -> Result<String>;

    /// The number of members the decompiler sees on a type.
    ///
    /// # Errors
    ///
    /// [`crate::Error::MemberNotFound`] when the type cannot be located.
    fn member_count(&self, bytes: &[u8], type_name: &str) -> Result<usize>;
}
