// Copyright 2026 the cilview authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # cilview
//!
//! The core engine of a caret-driven CIL inspection panel: place the cursor inside a
//! member in source, and the panel shows that member's compiled form — either the raw
//! instruction listing or decompiler-regenerated source — with clickable
//! cross-references to everything it calls.
//!
//! The crate owns the pipeline between the host editor and the external
//! reader/decompiler libraries: resolving the caret to a member, matching that member
//! across three different identity models (source symbols, compiled metadata, the
//! decompiler's type system), caching compiled binaries, rendering listings, and
//! scheduling all of it behind debouncing and cancellation so the editor never
//! stalls.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cilview::prelude::*;
//! # async fn demo<W, R, D>(workspace: W, reader: R, decompiler: D)
//! # where W: SourceWorkspace, R: InstructionReader, D: Decompiler {
//! let (engine, mut updates) =
//!     ViewEngine::new(workspace, reader, decompiler, EngineConfig::default());
//!
//! engine.caret_moved("src/Widget.cs".into(), 512);
//! while let Some(update) = updates.recv().await {
//!     match update {
//!         RenderUpdate::Rendered { text, .. } => println!("{text}"),
//!         RenderUpdate::Status { message } => eprintln!("{message}"),
//!         RenderUpdate::Failed { error } => eprintln!("error: {error}"),
//!         RenderUpdate::Cleared => {}
//!     }
//! }
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of the commonly used types
//! - [`identity`] - Type-name normalization across naming conventions
//! - [`matcher`] - Overload selection against candidate member lists
//! - [`locator`] - Caret ancestry to member descriptor resolution
//! - [`host`] - Boundary traits toward the editor, reader and decompiler
//! - [`cache`] - Bounded cache of compiled assembly bytes
//! - [`render`] - Structured listings and their plain-text rendering
//! - [`xref`] - Cross-reference extraction and call-tree grouping
//! - [`engine`] - Debounced, cancellable coordination of the whole pipeline
//! - [`Error`] and [`Result`] - The crate-wide error taxonomy
//!
//! ### Identity Matching
//!
//! The same member is named three different ways by the three models the pipeline
//! touches: nested types separated by `.`, `/` or `+`; generic types spelled
//! `` List`1 `` or `List<T>`; properties surfacing as `get_`/`set_` method pairs.
//! The [`identity`] and [`matcher`] modules reduce all of them to one canonical
//! form so a member resolved in source can be found again in compiled metadata.
//!
//! ### Scheduling
//!
//! The [`engine`] module debounces caret movement, runs every external call on a
//! blocking executor thread under a cancellation scope, and delivers results
//! through one ordered update channel. Superseded operations vanish silently;
//! reference clicks run independently with a hard timeout.

pub mod cache;
pub mod engine;
mod error;
pub mod host;
pub mod identity;
pub mod locator;
pub mod matcher;
pub mod prelude;
pub mod render;
pub mod xref;

pub use error::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
