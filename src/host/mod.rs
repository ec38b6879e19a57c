//! Boundary contracts toward the host IDE and the external reader/decompiler.
//!
//! The engine does not parse binaries, build projects or regenerate source; those
//! jobs belong to external collaborators reached through the traits in this module.
//! The traits specify only what must be fed across the boundary and what comes back:
//!
//! - [`SourceWorkspace`] - the host editor/project model: caret ancestry resolution,
//!   project ownership of files, and compile-emit with diagnostics
//! - [`InstructionReader`] - the low-level reader: bytes + target descriptor in,
//!   a structured [`crate::render::MethodListing`] out
//! - [`Decompiler`] - the decompiler engine: bytes + target in, regenerated source
//!   text out, for one member or a whole type
//!
//! Change notifications arrive as [`WorkspaceEvent`] values with a discriminated
//! kind; the engine and the assembly cache subscribe to these to invalidate state.
//!
//! All trait methods are synchronous; the engine dispatches them onto blocking
//! executor threads and wraps them in cancellation scopes itself, so implementations
//! stay free of async plumbing.

mod diagnostics;
mod traits;

pub use diagnostics::{Diagnostic, DiagnosticSeverity, EmitOutput};
pub use traits::{Decompiler, InstructionReader, SourceWorkspace};

/// A workspace change notification from the host.
///
/// Delivered to [`crate::engine::ViewEngine::handle_workspace_event`], which fans it
/// out to the assembly cache and the engine's own type-level tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceEvent {
    /// The solution changed wholesale (branch switch, reload).
    SolutionChanged,
    /// The solution was closed.
    SolutionClosed,
    /// A document in the given project changed.
    DocumentChanged {
        /// Stable key of the owning project.
        project: String,
    },
    /// Project-level configuration changed.
    ProjectChanged {
        /// Stable key of the changed project.
        project: String,
    },
}

impl WorkspaceEvent {
    /// The project key this event is scoped to, if it is project-scoped.
    #[must_use]
    pub fn project(&self) -> Option<&str> {
        match self {
            Self::DocumentChanged { project } | Self::ProjectChanged { project } => Some(project),
            Self::SolutionChanged | Self::SolutionClosed => None,
        }
    }
}
