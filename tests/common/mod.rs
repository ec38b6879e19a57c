//! Shared mock collaborators for engine integration tests.

// Each test binary compiles its own copy; not every binary uses every helper.
#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;

use cilview::prelude::*;

/// Engine timings shrunk so tests run in milliseconds. Also installs the
/// test-writer tracing subscriber, once per test binary.
pub fn fast_config() -> EngineConfig {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    EngineConfig {
        debounce_delay: Duration::from_millis(10),
        fast_debounce_delay: Duration::from_millis(2),
        ..EngineConfig::default()
    }
}

/// Receives the next update or panics after a bounded wait.
pub async fn next_update(updates: &mut UnboundedReceiver<RenderUpdate>) -> RenderUpdate {
    tokio::time::timeout(Duration::from_secs(5), updates.recv())
        .await
        .expect("no update arrived in time")
        .expect("update channel closed")
}

/// Ancestry for a caret inside an ordinary method body.
pub fn method_nodes(
    namespace: &str,
    type_name: &str,
    method: &str,
    parameter_types: Option<Vec<&str>>,
) -> Vec<SyntaxNode> {
    vec![
        SyntaxNode::Method {
            name: method.into(),
            parameter_types: parameter_types
                .map(|types| types.into_iter().map(str::to_string).collect()),
        },
        SyntaxNode::Type {
            name: type_name.into(),
        },
        SyntaxNode::Namespace {
            name: namespace.into(),
        },
    ]
}

/// Scripted editor/project model: caret positions and a canned emit result.
pub struct MockWorkspace {
    positions: Mutex<HashMap<(String, usize), Vec<SyntaxNode>>>,
    emit: Mutex<EmitOutput>,
    emit_count: Arc<AtomicUsize>,
}

impl MockWorkspace {
    pub fn new() -> Self {
        Self {
            positions: Mutex::new(HashMap::new()),
            emit: Mutex::new(EmitOutput::success(vec![0xCA; 16])),
            emit_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_position(self, file: &str, offset: usize, nodes: Vec<SyntaxNode>) -> Self {
        self.positions
            .lock()
            .insert((file.to_string(), offset), nodes);
        self
    }

    pub fn with_emit(self, output: EmitOutput) -> Self {
        *self.emit.lock() = output;
        self
    }

    /// Shared counter of emit calls, observable after the workspace moves into
    /// the engine.
    pub fn emit_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.emit_count)
    }
}

impl SourceWorkspace for MockWorkspace {
    fn resolve_position(&self, file: &str, offset: usize) -> cilview::Result<SyntaxAncestry> {
        self.positions
            .lock()
            .get(&(file.to_string(), offset))
            .cloned()
            .map(SyntaxAncestry::new)
            .ok_or(Error::NoFileOpen)
    }

    fn project_for_file(&self, _file: &str) -> Option<String> {
        Some("demo".to_string())
    }

    fn emit(&self, _project: &str) -> EmitOutput {
        self.emit_count.fetch_add(1, Ordering::SeqCst);
        self.emit.lock().clone()
    }
}

/// Scripted low-level reader: member candidates per type and instruction bodies
/// per matched signature.
pub struct MockReader {
    members: Mutex<HashMap<String, Vec<MemberCandidate>>>,
    bodies: Mutex<HashMap<String, Vec<String>>>,
}

impl MockReader {
    pub fn new() -> Self {
        Self {
            members: Mutex::new(HashMap::new()),
            bodies: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_members(self, type_name: &str, candidates: Vec<MemberCandidate>) -> Self {
        self.members.lock().insert(type_name.to_string(), candidates);
        self
    }

    /// Scripts the body for the signature key `Type.Member(Param1, Param2)`.
    pub fn with_body(self, signature: &str, lines: Vec<&str>) -> Self {
        self.bodies
            .lock()
            .insert(signature.to_string(), lines.into_iter().map(str::to_string).collect());
        self
    }
}

impl InstructionReader for MockReader {
    fn read_member(
        &self,
        _bytes: &[u8],
        target: &MemberDescriptor,
        expected_parameter_types: Option<&[String]>,
    ) -> cilview::Result<MethodListing> {
        let candidates = self
            .members
            .lock()
            .get(&target.type_name)
            .cloned()
            .unwrap_or_default();

        let best = find_best_match(&candidates, &target.member_name, expected_parameter_types)
            .ok_or_else(|| {
                Error::member_not_found(
                    target.canonical_signature.clone(),
                    candidates.iter().map(|c| c.name.clone()).collect(),
                )
            })?;

        let signature = format!(
            "{}.{}({})",
            target.type_name,
            best.name,
            best.parameter_types.join(", ")
        );
        let body = self
            .bodies
            .lock()
            .get(&signature)
            .cloned()
            .unwrap_or_else(|| vec!["ret".to_string()]);
        let instructions: Vec<InstructionLine> = body
            .into_iter()
            .enumerate()
            .map(|(index, text)| InstructionLine::new(index as u32, text))
            .collect();

        Ok(MethodListing {
            signature,
            max_stack: 8,
            code_size: instructions.len() as u32,
            local_count: 0,
            instructions,
            ..MethodListing::default()
        })
    }

    fn members_of(&self, _bytes: &[u8], type_name: &str) -> Vec<MemberCandidate> {
        self.members.lock().get(type_name).cloned().unwrap_or_default()
    }
}

/// Scripted decompiler: member counts and whole-type sources per type.
pub struct MockDecompiler {
    member_counts: Mutex<HashMap<String, usize>>,
    type_sources: Mutex<HashMap<String, String>>,
}

impl MockDecompiler {
    pub fn new() -> Self {
        Self {
            member_counts: Mutex::new(HashMap::new()),
            type_sources: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_member_count(self, type_name: &str, count: usize) -> Self {
        self.member_counts.lock().insert(type_name.to_string(), count);
        self
    }

    pub fn with_type_source(self, type_name: &str, source: &str) -> Self {
        self.type_sources
            .lock()
            .insert(type_name.to_string(), source.to_string());
        self
    }
}

impl Decompiler for MockDecompiler {
    fn decompile_member(
        &self,
        _bytes: &[u8],
        target: &MemberDescriptor,
        _expected_parameter_types: Option<&[String]>,
    ) -> cilview::Result<String> {
        Ok(format!("// member {}", target.canonical_signature))
    }

    fn decompile_type(&self, _bytes: &[u8], type_name: &str) -> cilview::Result<String> {
        Ok(self
            .type_sources
            .lock()
            .get(type_name)
            .cloned()
            .unwrap_or_else(|| format!("// type {type_name}")))
    }

    fn member_count(&self, _bytes: &[u8], type_name: &str) -> cilview::Result<usize> {
        Ok(self
            .member_counts
            .lock()
            .get(type_name)
            .copied()
            .unwrap_or(1))
    }
}
