//! The view pipeline: caret settle to rendered update.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::Mutex;
use strum::Display;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    cache::{AssemblyCache, CacheConfig, CacheStats, ClearSubscription},
    engine::{wait_for, Debouncer, NavigationEntry, NavigationHistory},
    host::{Decompiler, InstructionReader, SourceWorkspace, WorkspaceEvent},
    locator::{locate, MemberDescriptor, MemberKind},
    matcher::split_parameter_list,
    render::render_listing,
    xref::{build_call_tree, extract_references, resolve_references, CallTreeNode, ResolvedReference},
    Error, Result,
};

/// Tunable timings and limits of the view engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Debounce delay after a caret move (default: 300 ms).
    pub debounce_delay: Duration,
    /// Shortened delay when the file's content is already loaded (default: 100 ms).
    pub fast_debounce_delay: Duration,
    /// Time budget for one cross-reference scan pass (default: 200 ms).
    pub scan_budget: Duration,
    /// Hard bound on a reference-click operation (default: 30 s).
    pub click_timeout: Duration,
    /// Whole-type decompilation is used only for types with at most this many
    /// members; larger types decompile member-by-member (default: 50).
    pub whole_type_member_limit: usize,
    /// Sizing policy of the assembly cache.
    pub cache: CacheConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce_delay: Duration::from_millis(300),
            fast_debounce_delay: Duration::from_millis(100),
            scan_budget: Duration::from_millis(200),
            click_timeout: Duration::from_secs(30),
            whole_type_member_limit: 50,
            cache: CacheConfig::default(),
        }
    }
}

/// The two content renderings the panel can show.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Raw instruction listing from the low-level reader.
    #[default]
    Instructions,
    /// Regenerated source text from the decompiler.
    Decompiled,
}

/// One update delivered to the presentation layer.
///
/// Updates arrive through a single ordered channel; appends apply in the order
/// their owning operations complete.
#[derive(Debug)]
pub enum RenderUpdate {
    /// New content for a member.
    Rendered {
        /// The member the content belongs to.
        descriptor: MemberDescriptor,
        /// The rendered text.
        text: String,
        /// Navigable references grouped by contributing type.
        call_tree: Vec<CallTreeNode>,
        /// `true` when the content extends the current view (reference click)
        /// rather than replacing it (caret settle).
        appended: bool,
    },
    /// A benign condition rendered as status text, not an error.
    Status {
        /// User-facing status message.
        message: String,
    },
    /// A failed operation the presentation layer should surface.
    Failed {
        /// The failure.
        error: Error,
    },
    /// The view should reset (cache cleared, mode switched, solution closed).
    Cleared,
}

struct EngineInner<W, R, D> {
    workspace: W,
    reader: R,
    decompiler: D,
    cache: AssemblyCache,
    config: EngineConfig,
    mode: Mutex<ViewMode>,
    history: Mutex<NavigationHistory>,
    /// Files whose content has been rendered at least once, mapped to their
    /// owning project key. Presence enables the fast debounce path.
    loaded_files: DashMap<String, String>,
    debouncer: Debouncer,
    current_project: Mutex<Option<String>>,
    last_caret: Mutex<Option<(String, usize)>>,
    rendered_lines: AtomicUsize,
    updates: mpsc::UnboundedSender<RenderUpdate>,
    _clear_subscription: ClearSubscription,
}

/// The central coordinator: caret settles in, render updates out.
///
/// Generic over the three collaborator seams so hosts and tests supply their own
/// implementations. Cloning is cheap and shares the underlying state, the same
/// way [`AssemblyCache`] clones do. All entry points are cheap and non-blocking;
/// the actual work runs on spawned tasks under cancellation scopes. See the
/// [module docs](crate::engine) for the scheduling discipline.
pub struct ViewEngine<W, R, D> {
    inner: Arc<EngineInner<W, R, D>>,
}

impl<W, R, D> Clone for ViewEngine<W, R, D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W, R, D> ViewEngine<W, R, D>
where
    W: SourceWorkspace,
    R: InstructionReader,
    D: Decompiler,
{
    /// Creates an engine and the channel its updates arrive on.
    #[must_use]
    pub fn new(
        workspace: W,
        reader: R,
        decompiler: D,
        config: EngineConfig,
    ) -> (Self, mpsc::UnboundedReceiver<RenderUpdate>) {
        let (updates, receiver) = mpsc::unbounded_channel();
        let cache = AssemblyCache::new(config.cache);

        let clear_sender = updates.clone();
        let clear_subscription = cache.on_cleared(move || {
            let _ = clear_sender.send(RenderUpdate::Cleared);
        });

        let engine = Self {
            inner: Arc::new(EngineInner {
                workspace,
                reader,
                decompiler,
                cache,
                config,
                mode: Mutex::new(ViewMode::default()),
                history: Mutex::new(NavigationHistory::new()),
                loaded_files: DashMap::new(),
                debouncer: Debouncer::new(),
                current_project: Mutex::new(None),
                last_caret: Mutex::new(None),
                rendered_lines: AtomicUsize::new(0),
                updates,
                _clear_subscription: clear_subscription,
            }),
        };

        (engine, receiver)
    }

    /// Handles a caret move in the editor.
    ///
    /// Supersedes any in-flight caret operation, waits out the debounce delay
    /// (shortened when the file's content is already loaded), then resolves and
    /// renders the member under the caret. Returns the spawned task handle,
    /// mainly so tests can await completion.
    pub fn caret_moved(&self, file: String, offset: usize) -> JoinHandle<()> {
        let token = self.inner.debouncer.arm();
        let delay = if self.inner.loaded_files.contains_key(&file) {
            self.inner.config.fast_debounce_delay
        } else {
            self.inner.config.debounce_delay
        };
        *self.inner.last_caret.lock() = Some((file.clone(), offset));

        let engine = self.clone();
        tokio::spawn(async move {
            if !wait_for(&token, delay).await {
                return;
            }
            let outcome = engine.render_caret(&file, offset, &token).await;
            engine.deliver(outcome);
        })
    }

    /// Re-renders the member at the last known caret position, bypassing the
    /// debounce delay. Returns `None` when no caret has been seen yet.
    ///
    /// The current view, navigation history and append offsets are discarded
    /// first; the refreshed content arrives as a fresh replacing render.
    pub fn refresh(&self) -> Option<JoinHandle<()>> {
        let (file, offset) = self.inner.last_caret.lock().clone()?;
        let token = self.inner.debouncer.arm();

        // Without this, the same-member short-circuit in render_caret would
        // turn a bare refresh into a no-op.
        self.inner.history.lock().clear();
        self.inner.rendered_lines.store(0, Ordering::SeqCst);

        let engine = self.clone();
        Some(tokio::spawn(async move {
            let outcome = engine.render_caret(&file, offset, &token).await;
            engine.deliver(outcome);
        }))
    }

    /// Handles a click on a resolved reference in the rendered view.
    ///
    /// Runs under an independent cancellation scope with a hard timeout, so a
    /// slow click never blocks caret handling and a caret move never cancels a
    /// click. The rendered content appends to the view rather than replacing it.
    pub fn open_reference(&self, reference: &ResolvedReference) -> JoinHandle<()> {
        let descriptor = reference_target(reference);
        let project = self.inner.current_project.lock().clone();
        let timeout = self.inner.config.click_timeout;

        let engine = self.clone();
        tokio::spawn(async move {
            let Some(project) = project else {
                engine.deliver(Err(Error::NoFileOpen));
                return;
            };
            let token = CancellationToken::new();
            let outcome = engine
                .render_target(descriptor, project, None, &token, Some(timeout), true)
                .await;
            engine.deliver(outcome);
        })
    }

    /// Switches the content rendering and resets the view.
    ///
    /// History and append offsets refer to the previous rendering's layout, so
    /// both reset; the presentation layer receives a [`RenderUpdate::Cleared`].
    pub fn set_view_mode(&self, mode: ViewMode) {
        *self.inner.mode.lock() = mode;
        self.inner.history.lock().clear();
        self.inner.rendered_lines.store(0, Ordering::SeqCst);
        let _ = self.inner.updates.send(RenderUpdate::Cleared);
    }

    /// The current content rendering.
    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        *self.inner.mode.lock()
    }

    /// Applies a workspace change notification.
    ///
    /// Project-scoped events invalidate that project's cache entry and the
    /// loaded-file tracking that enabled the fast debounce path for its files.
    /// Solution-level events clear everything, including navigation history.
    pub fn handle_workspace_event(&self, event: &WorkspaceEvent) {
        self.inner.cache.handle_event(event);
        match event.project() {
            Some(project) => {
                self.inner.loaded_files.retain(|_, owner| owner != project);
            }
            None => {
                self.inner.loaded_files.clear();
                self.inner.history.lock().clear();
                self.inner.rendered_lines.store(0, Ordering::SeqCst);
                *self.inner.current_project.lock() = None;
            }
        }
    }

    /// Steps the navigation history back, returning the entry to show.
    #[must_use]
    pub fn navigate_back(&self) -> Option<NavigationEntry> {
        self.inner.history.lock().back().cloned()
    }

    /// Steps the navigation history forward, returning the entry to show.
    #[must_use]
    pub fn navigate_forward(&self) -> Option<NavigationEntry> {
        self.inner.history.lock().forward().cloned()
    }

    /// Current cache counters, for diagnostics surfaces.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.inner.cache.stats()
    }

    /// Shuts the engine down: cancels pending work and disposes the cache.
    pub fn dispose(&self) {
        self.inner.debouncer.cancel_pending();
        self.inner.cache.dispose();
    }

    /// Resolves the caret to a member and renders it.
    async fn render_caret(
        &self,
        file: &str,
        offset: usize,
        token: &CancellationToken,
    ) -> Result<()> {
        let ancestry = self.inner.workspace.resolve_position(file, offset)?;
        let descriptor = locate(&ancestry).ok_or(Error::OutsideMember)?;

        // Same member as the view already shows: nothing to do. Scrolling within
        // a method body must not re-render.
        if let Some(current) = self.inner.history.lock().current() {
            if current.canonical_signature == descriptor.canonical_signature {
                return Ok(());
            }
        }

        let project = self
            .inner
            .workspace
            .project_for_file(file)
            .ok_or_else(|| Error::UnsupportedFile(file.to_string()))?;

        self.render_target(descriptor, project, Some(file.to_string()), token, None, false)
            .await
    }

    /// Compiles, reads or decompiles, scans and delivers one member rendering.
    async fn render_target(
        &self,
        descriptor: MemberDescriptor,
        project: String,
        file: Option<String>,
        token: &CancellationToken,
        timeout: Option<Duration>,
        appended: bool,
    ) -> Result<()> {
        debug!(
            target_member = %descriptor.canonical_signature,
            project = %project,
            appended,
            "rendering member"
        );

        let bytes = {
            let engine = self.clone();
            let key = project.clone();
            run_external(token, timeout, "compile", move || {
                engine
                    .inner
                    .cache
                    .get_or_compile(&key, || engine.inner.workspace.emit(&key))
            })
            .await?
        };
        let bytes = Arc::new(bytes);

        let mode = *self.inner.mode.lock();
        let expected = descriptor.expected_parameter_types();
        let text = match mode {
            ViewMode::Instructions => {
                let engine = self.clone();
                let bytes = Arc::clone(&bytes);
                let target = descriptor.clone();
                let listing = run_external(token, timeout, "instruction read", move || {
                    engine
                        .inner
                        .reader
                        .read_member(&bytes, &target, expected.as_deref())
                })
                .await?;
                render_listing(&listing)
            }
            ViewMode::Decompiled => {
                self.decompile(&descriptor, &bytes, expected, token, timeout)
                    .await?
            }
        };

        let references = {
            let tokens = extract_references(&text, self.inner.config.scan_budget);
            let engine = self.clone();
            let bytes = Arc::clone(&bytes);
            run_external(token, timeout, "reference resolution", move || {
                Ok(resolve_references(&tokens, |type_name| {
                    engine.inner.reader.members_of(&bytes, type_name)
                }))
            })
            .await?
        };
        let call_tree = build_call_tree(references);

        // Cancelled operations must not mutate shared state or deliver stale
        // content; this is the last gate before both.
        if token.is_cancelled() {
            return Err(Error::Cancelled);
        }

        if let Some(file) = file {
            self.inner.loaded_files.insert(file, project.clone());
        }
        *self.inner.current_project.lock() = Some(project);

        let line_count = text.lines().count();
        let rendered_line_offset = if appended {
            self.inner.rendered_lines.fetch_add(line_count, Ordering::SeqCst)
        } else {
            self.inner.rendered_lines.store(line_count, Ordering::SeqCst);
            0
        };

        self.inner.history.lock().push(NavigationEntry {
            type_name: descriptor.type_name.clone(),
            member_name: descriptor.member_name.clone(),
            canonical_signature: descriptor.canonical_signature.clone(),
            rendered_line_offset,
        });

        let _ = self.inner.updates.send(RenderUpdate::Rendered {
            descriptor,
            text,
            call_tree,
            appended,
        });
        Ok(())
    }

    /// Decompiles the target, whole-type when the type is small enough.
    async fn decompile(
        &self,
        descriptor: &MemberDescriptor,
        bytes: &Arc<Vec<u8>>,
        expected: Option<Vec<String>>,
        token: &CancellationToken,
        timeout: Option<Duration>,
    ) -> Result<String> {
        let member_count = {
            let engine = self.clone();
            let bytes = Arc::clone(bytes);
            let type_name = descriptor.type_name.clone();
            run_external(token, timeout, "member count", move || {
                engine.inner.decompiler.member_count(&bytes, &type_name)
            })
            .await?
        };

        let engine = self.clone();
        let bytes = Arc::clone(bytes);
        if member_count <= self.inner.config.whole_type_member_limit {
            let type_name = descriptor.type_name.clone();
            run_external(token, timeout, "type decompilation", move || {
                engine.inner.decompiler.decompile_type(&bytes, &type_name)
            })
            .await
        } else {
            let target = descriptor.clone();
            run_external(token, timeout, "member decompilation", move || {
                engine
                    .inner
                    .decompiler
                    .decompile_member(&bytes, &target, expected.as_deref())
            })
            .await
        }
    }

    /// Routes an operation outcome to the update channel.
    ///
    /// Cancellation is silent: a superseded operation simply disappears.
    /// Outside-member is status text, everything else a failure update.
    fn deliver(&self, outcome: Result<()>) {
        match outcome {
            Ok(()) => {}
            Err(Error::Cancelled) => {}
            Err(error @ Error::OutsideMember) => {
                let _ = self.inner.updates.send(RenderUpdate::Status {
                    message: error.to_string(),
                });
            }
            Err(error) => {
                let _ = self.inner.updates.send(RenderUpdate::Failed { error });
            }
        }
    }
}

/// Builds the lookup descriptor for a clicked reference.
///
/// The display signature carries the matched candidate's short parameter type
/// names; the matcher's alias and dot-suffix rules make those sufficient for
/// re-finding the overload in the compiled model.
fn reference_target(reference: &ResolvedReference) -> MemberDescriptor {
    let parameter_types = reference.display_signature.find('(').and_then(|open| {
        reference.display_signature[open + 1..]
            .strip_suffix(')')
            .map(split_parameter_list)
    });

    MemberDescriptor::new(
        reference.type_name.clone(),
        reference.member_name.clone(),
        parameter_types.as_deref(),
        MemberKind::Method,
    )
}

/// Runs a blocking collaborator call under a cancellation scope.
///
/// The call is dispatched to a blocking executor thread; this future resolves
/// with its result, or with [`Error::Cancelled`] / [`Error::Timeout`] when the
/// scope closes first. An abandoned call runs to completion on its thread, but
/// its result is discarded.
async fn run_external<T, F>(
    token: &CancellationToken,
    timeout: Option<Duration>,
    operation: &str,
    task: F,
) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::task::spawn_blocking(task);
    let joined = match timeout {
        Some(limit) => tokio::select! {
            () = token.cancelled() => return Err(Error::Cancelled),
            () = tokio::time::sleep(limit) => return Err(Error::Timeout(operation.to_string())),
            joined = handle => joined,
        },
        None => tokio::select! {
            () = token.cancelled() => return Err(Error::Cancelled),
            joined = handle => joined,
        },
    };

    match joined {
        Ok(result) => result,
        Err(fault) => Err(Error::Internal(fault.to_string())),
    }
}
