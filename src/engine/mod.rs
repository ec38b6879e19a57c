//! Coordination: debounced caret handling, cancellation scopes and the view pipeline.
//!
//! The engine runs on a single logical coordination flow plus background work for
//! compilation, disassembly and decompilation, dispatched to blocking executor
//! threads so long operations never block coordination. Every caret settle obtains a
//! fresh cancellation scope that cancels the previous in-flight one; results arriving
//! after cancellation are discarded rather than rendered, so the panel never flickers
//! out of order. Reference clicks run under independent scopes with their own bounded
//! timeout, and both paths deliver [`RenderUpdate`]s through one ordered channel, so
//! appends apply in the order their owning operations complete.
//!
//! # Suspension Points
//!
//! - the debounce delay after each caret move (default 300 ms, shortened to 100 ms
//!   once the file's type is already loaded, so in-class navigation feels immediate)
//! - the compile-emit call
//! - the instruction-read / decompile calls
//!
//! Each is cancellable; cancellation propagates into whatever delay or call the
//! operation is currently suspended on.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cilview::engine::{EngineConfig, ViewEngine};
//! # async fn demo<W, R, D>(workspace: W, reader: R, decompiler: D)
//! # where W: cilview::host::SourceWorkspace,
//! #       R: cilview::host::InstructionReader,
//! #       D: cilview::host::Decompiler {
//! let (engine, mut updates) = ViewEngine::new(workspace, reader, decompiler, EngineConfig::default());
//! engine.caret_moved("src/C.cs".into(), 120);
//! while let Some(update) = updates.recv().await {
//!     // hand to the presentation layer
//! }
//! # }
//! ```

mod debounce;
mod navigation;
mod pipeline;

pub use debounce::{wait_for, Debouncer};
pub use navigation::{NavigationEntry, NavigationHistory};
pub use pipeline::{EngineConfig, RenderUpdate, ViewEngine, ViewMode};
