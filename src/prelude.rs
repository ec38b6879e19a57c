//! # cilview Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and
//! traits of the crate. Import it to get quick access to the engine, its
//! collaborator traits, and the structured types flowing between them.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all engine operations
pub use crate::Error;

/// The result type used throughout the crate
pub use crate::Result;

// ================================================================================================
// Engine Entry Points
// ================================================================================================

/// The central coordinator between editor, cache, reader and decompiler
pub use crate::engine::{EngineConfig, RenderUpdate, ViewEngine, ViewMode};

/// Navigation history over rendered members
pub use crate::engine::{NavigationEntry, NavigationHistory};

// ================================================================================================
// Host Boundary
// ================================================================================================

/// Collaborator traits implemented by the host and the external libraries
pub use crate::host::{Decompiler, InstructionReader, SourceWorkspace};

/// Compile-emit results and diagnostics crossing the boundary
pub use crate::host::{Diagnostic, DiagnosticSeverity, EmitOutput, WorkspaceEvent};

// ================================================================================================
// Member Identity and Matching
// ================================================================================================

/// The resolved member target and its classification
pub use crate::locator::{locate, MemberDescriptor, MemberKind, SyntaxAncestry, SyntaxNode};

/// Candidate members and best-match overload selection
pub use crate::matcher::{find_best_match, MemberCandidate};

/// Type-name normalization across naming conventions
pub use crate::identity::{normalize_type, types_equal};

// ================================================================================================
// Caching
// ================================================================================================

/// The bounded compiled-assembly cache and its sizing policy
pub use crate::cache::{AssemblyCache, CacheConfig, CacheStats};

// ================================================================================================
// Rendering and Cross-References
// ================================================================================================

/// Structured listings and their plain-text rendering
pub use crate::render::{render_listing, InstructionLine, MethodListing};

/// Cross-reference extraction and the grouped call tree
pub use crate::xref::{
    build_call_tree, extract_references, CallTreeNode, MethodReferenceToken, ResolvedReference,
};
