//! The structured instruction listing model returned by the low-level reader.

use strum::Display;

/// How an instruction affects control flow, as far as the header summary cares.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowKind {
    /// Sequential flow.
    #[default]
    Normal,
    /// Unconditional branch.
    Branch,
    /// Conditional branch.
    ConditionalBranch,
    /// Call of any flavor.
    Call,
    /// Method return.
    Return,
    /// Throw or rethrow.
    Throw,
}

impl FlowKind {
    /// `true` for conditional and unconditional branches.
    #[must_use]
    pub fn is_branch(self) -> bool {
        matches!(self, Self::Branch | Self::ConditionalBranch)
    }
}

/// One decoded instruction line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionLine {
    /// Byte offset of the instruction within the method body.
    pub offset: u32,
    /// Formatted mnemonic and operands, without the `IL_xxxx:` label.
    pub text: String,
    /// Control flow classification.
    pub flow: FlowKind,
}

impl InstructionLine {
    /// Creates a sequential-flow instruction line.
    #[must_use]
    pub fn new(offset: u32, text: impl Into<String>) -> Self {
        Self {
            offset,
            text: text.into(),
            flow: FlowKind::Normal,
        }
    }

    /// Creates an instruction line with an explicit flow kind.
    #[must_use]
    pub fn with_flow(offset: u32, text: impl Into<String>, flow: FlowKind) -> Self {
        Self {
            offset,
            text: text.into(),
            flow,
        }
    }
}

/// The handler flavor of an exception region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExceptionRegionKind {
    /// A typed catch handler.
    Catch {
        /// The caught exception type's display name.
        exception_type: String,
    },
    /// A filter handler.
    Filter,
    /// A finally handler.
    Finally,
    /// A fault handler.
    Fault,
}

impl ExceptionRegionKind {
    /// The opening boundary marker for the handler block.
    #[must_use]
    pub fn opening_marker(&self) -> String {
        match self {
            Self::Catch { exception_type } => format!("catch ({exception_type}) {{"),
            Self::Filter => "filter {".to_string(),
            Self::Finally => "finally {".to_string(),
            Self::Fault => "fault {".to_string(),
        }
    }
}

/// One protected region and its handler, in body byte offsets.
///
/// End offsets are exclusive, matching how the metadata encodes try/handler lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionRegion {
    /// Handler flavor.
    pub kind: ExceptionRegionKind,
    /// Start of the protected range.
    pub try_start: u32,
    /// Exclusive end of the protected range.
    pub try_end: u32,
    /// Start of the handler range.
    pub handler_start: u32,
    /// Exclusive end of the handler range.
    pub handler_end: u32,
}

/// A compiler-synthesized type related to the rendered member.
///
/// Closures and async/iterator state machines the member compiles into; listed in
/// the rendered trailer so their members stay reachable by click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedType {
    /// The synthesized type's metadata name (e.g. `<>c__DisplayClass0_0`).
    pub name: String,
    /// Member signatures in `Member(params)` form.
    pub members: Vec<String>,
}

/// A structured listing of one member's instruction stream.
///
/// Produced by the external [`crate::host::InstructionReader`], consumed by
/// [`crate::render::render_listing`].
#[derive(Debug, Clone, Default)]
pub struct MethodListing {
    /// Canonical signature of the rendered member.
    pub signature: String,
    /// Maximum evaluation stack depth.
    pub max_stack: u32,
    /// Body code size in bytes.
    pub code_size: u32,
    /// Number of local variable slots.
    pub local_count: u32,
    /// Decoded instructions in offset order.
    pub instructions: Vec<InstructionLine>,
    /// Exception regions covering the body.
    pub exception_regions: Vec<ExceptionRegion>,
    /// Compiler-synthesized related types.
    pub related_types: Vec<RelatedType>,
}

impl MethodListing {
    /// Number of branch instructions in the body.
    #[must_use]
    pub fn branch_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|line| line.flow.is_branch())
            .count()
    }

    /// Number of call instructions in the body.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|line| line.flow == FlowKind::Call)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_and_call_counts() {
        let listing = MethodListing {
            instructions: vec![
                InstructionLine::new(0, "nop"),
                InstructionLine::with_flow(1, "br.s IL_0005", FlowKind::Branch),
                InstructionLine::with_flow(3, "brtrue.s IL_0005", FlowKind::ConditionalBranch),
                InstructionLine::with_flow(
                    5,
                    "call System.Void System.Console::WriteLine()",
                    FlowKind::Call,
                ),
                InstructionLine::with_flow(10, "ret", FlowKind::Return),
            ],
            ..MethodListing::default()
        };
        assert_eq!(listing.branch_count(), 2);
        assert_eq!(listing.call_count(), 1);
    }

    #[test]
    fn test_region_markers() {
        let catch = ExceptionRegionKind::Catch {
            exception_type: "System.Exception".into(),
        };
        assert_eq!(catch.opening_marker(), "catch (System.Exception) {");
        assert_eq!(ExceptionRegionKind::Finally.opening_marker(), "finally {");
        assert_eq!(ExceptionRegionKind::Fault.opening_marker(), "fault {");
    }
}
