//! The per-view render orchestrator: a state machine that sequences cache
//! lookup, parsing, compound-element building, repair-and-retry, and the
//! terminal fallback to a textual view.
//!
//! The state machine itself ([`RenderMachine`]) is pure: transitions map
//! (state, event) to (state, effects) without touching collaborators, so the
//! whole fallback chain is testable without any asynchronous calls. The
//! asynchronous driver ([`RenderOrchestrator`]) interprets the effects
//! against the real parser, asset fetcher, cache, and diagram engine.

use crate::builder::{AssetFetcher, CompoundOutput, build_compound_elements};
use crate::cache::{CacheKey, DiagramCache};
use crate::catalog::CloudProvider;
use crate::normalize::NormalizedSource;
use crate::primitive::{BinaryAsset, DiagramPrimitive, ParsedPrimitives};
use crate::proposal::DiagramProposal;
use crate::{Error, Result};
use std::sync::{Arc, Mutex};

/// Minimal two-node diagram rendered below the retry budget, purely to avoid
/// a blank canvas.
pub const PLACEHOLDER_DIAGRAM_SOURCE: &str = "flowchart TD\n    A[Start] --> B[End]";

/// Attempts allowed before a view gives up and switches to the textual
/// fallback.
pub const DEFAULT_RETRY_BUDGET: u32 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParseOptions {
    /// Font size hint passed through to the conversion step, in pixels.
    pub font_size_px: Option<f64>,
}

impl ParseOptions {
    pub fn for_view() -> Self {
        Self {
            font_size_px: Some(14.0),
        }
    }
}

/// The external graph-description-to-primitives conversion step.
pub trait DiagramParser {
    fn parse(
        &self,
        source: &str,
        options: &ParseOptions,
    ) -> impl Future<Output = Result<ParsedPrimitives>>;
}

/// Imperative surface of the vector diagram engine. One instance per visible
/// view, owned by the orchestrator.
pub trait DiagramEngine {
    fn replace_primitives(&mut self, primitives: &[DiagramPrimitive]);
    fn add_assets(&mut self, assets: &[BinaryAsset]);
    fn scroll_to_visible(&mut self);
    fn refresh_layout(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramView {
    /// The interactive vector diagram.
    Primary,
    /// Plain textual rendering of the source; independent of the primary
    /// engine, so it cannot fail the same way.
    Textual,
    /// The raw (and, when repaired, diffed) source text.
    Source,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettledOutcome {
    Success,
    FailedWithFallbackView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Idle,
    ResolvingCache,
    SynthesizingOriginal,
    SynthesizingRepaired,
    Degraded,
    Settled(SettledOutcome),
}

/// Non-fatal messages surfaced to the user alongside a visible diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderAdvisory {
    /// The source had errors and was automatically repaired; the source view
    /// shows both versions.
    SourceAutoRepaired,
    /// Synthesis failed and a minimal placeholder diagram is shown instead.
    PlaceholderDiagram,
}

impl RenderAdvisory {
    pub fn message(&self) -> &'static str {
        match self {
            RenderAdvisory::SourceAutoRepaired => {
                "Diagram syntax was automatically fixed. Check the source view to see the changes."
            }
            RenderAdvisory::PlaceholderDiagram => {
                "Failed to render the diagram. Using a placeholder instead."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderEvent {
    /// The (proposal, provider) pair changed.
    Reset,
    /// A render pass was requested for the current pair.
    Begin,
    CacheHit,
    CacheMiss,
    ParseSucceeded,
    ParseFailed,
    RepairChangedSource,
    RepairUnchanged,
    PlaceholderRendered,
    PlaceholderFailed,
    ManualRetry,
    ManualCacheClear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderEffect {
    ClearEngine,
    DiscardNormalizedSource,
    LookupCache,
    PopulateFromCache,
    ParseOriginal,
    RepairSource,
    ParseRepaired,
    CacheResult,
    ScrollToContent,
    ShowAdvisory(RenderAdvisory),
    RenderPlaceholder,
    ReportTerminalError,
    SwitchToTextualView,
    ClearCache,
}

/// Pure fallback state machine. Owns the attempt counter; every transition is
/// a function of (state, event) only.
#[derive(Debug, Clone)]
pub struct RenderMachine {
    state: RenderState,
    attempts: u32,
    retry_budget: u32,
}

impl Default for RenderMachine {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_BUDGET)
    }
}

impl RenderMachine {
    pub fn new(retry_budget: u32) -> Self {
        Self {
            state: RenderState::Idle,
            attempts: 0,
            retry_budget,
        }
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn on(&mut self, event: RenderEvent) -> Vec<RenderEffect> {
        use RenderEffect as Fx;
        use RenderEvent as Ev;
        use RenderState as St;

        match (self.state, event) {
            (_, Ev::Reset) => {
                self.state = St::Idle;
                self.attempts = 0;
                vec![Fx::DiscardNormalizedSource, Fx::ClearEngine]
            }
            (_, Ev::ManualRetry) => {
                self.state = St::Idle;
                self.attempts = 0;
                vec![]
            }
            (_, Ev::ManualCacheClear) => {
                self.state = St::Idle;
                self.attempts = 0;
                vec![Fx::ClearCache]
            }
            (_, Ev::Begin) => {
                self.state = St::ResolvingCache;
                vec![Fx::ClearEngine, Fx::LookupCache]
            }
            (St::ResolvingCache, Ev::CacheHit) => {
                self.state = St::Settled(SettledOutcome::Success);
                vec![Fx::PopulateFromCache, Fx::ScrollToContent]
            }
            (St::ResolvingCache, Ev::CacheMiss) => {
                self.state = St::SynthesizingOriginal;
                vec![Fx::ParseOriginal]
            }
            // The entry can be swept by another view between the lookup and
            // the populate read; a lost entry falls back to synthesis.
            (St::Settled(SettledOutcome::Success), Ev::CacheMiss) => {
                self.state = St::SynthesizingOriginal;
                vec![Fx::ParseOriginal]
            }
            (St::SynthesizingOriginal, Ev::ParseSucceeded) => {
                self.state = St::Settled(SettledOutcome::Success);
                vec![Fx::CacheResult, Fx::ScrollToContent]
            }
            (St::SynthesizingOriginal, Ev::ParseFailed) => {
                // Repair runs at most once per attempt; stay put until its
                // outcome is known.
                vec![Fx::RepairSource]
            }
            (St::SynthesizingOriginal, Ev::RepairChangedSource) => {
                self.state = St::SynthesizingRepaired;
                vec![Fx::ParseRepaired]
            }
            (St::SynthesizingOriginal, Ev::RepairUnchanged) => self.register_failure(),
            (St::SynthesizingRepaired, Ev::ParseSucceeded) => {
                self.state = St::Settled(SettledOutcome::Success);
                vec![
                    Fx::CacheResult,
                    Fx::ShowAdvisory(RenderAdvisory::SourceAutoRepaired),
                    Fx::ScrollToContent,
                ]
            }
            (St::SynthesizingRepaired, Ev::ParseFailed) => self.register_failure(),
            (St::Degraded, Ev::PlaceholderRendered) => {
                // Logically still on the primary view; the advisory was
                // already emitted when the failure was registered.
                vec![Fx::ScrollToContent]
            }
            (St::Degraded, Ev::PlaceholderFailed) => self.give_up(),
            (state, event) => {
                tracing::warn!(?state, ?event, "ignoring unexpected render event");
                vec![]
            }
        }
    }

    fn register_failure(&mut self) -> Vec<RenderEffect> {
        self.attempts += 1;
        if self.attempts < self.retry_budget {
            self.state = RenderState::Degraded;
            vec![
                RenderEffect::RenderPlaceholder,
                RenderEffect::ShowAdvisory(RenderAdvisory::PlaceholderDiagram),
            ]
        } else {
            self.give_up()
        }
    }

    fn give_up(&mut self) -> Vec<RenderEffect> {
        self.state = RenderState::Settled(SettledOutcome::FailedWithFallbackView);
        vec![
            RenderEffect::ReportTerminalError,
            RenderEffect::SwitchToTextualView,
        ]
    }
}

/// Snapshot of a view after a render pass.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub state: RenderState,
    pub view: DiagramView,
    pub advisories: Vec<RenderAdvisory>,
    pub used_repaired_source: bool,
    pub error: Option<String>,
}

/// Asynchronous driver owning one view's state and collaborators.
///
/// Cancellation is cooperative and advisory only: a superseding trigger does
/// not abort an in-flight pass. A stale pass's only externally visible effect
/// is a cache write, which is harmless because cache keys are derived from
/// the source content hash, never from view identity.
pub struct RenderOrchestrator<P, F, E> {
    parser: P,
    fetcher: F,
    engine: E,
    cache: Arc<Mutex<DiagramCache>>,
    machine: RenderMachine,
    options: ParseOptions,
    view: DiagramView,
    normalized: Option<NormalizedSource>,
    current_key: Option<CacheKey>,
    pending_result: Option<CompoundOutput>,
    advisories: Vec<RenderAdvisory>,
    last_error: Option<String>,
}

fn lock_cache(cache: &Mutex<DiagramCache>) -> std::sync::MutexGuard<'_, DiagramCache> {
    cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<P, F, E> RenderOrchestrator<P, F, E>
where
    P: DiagramParser,
    F: AssetFetcher,
    E: DiagramEngine,
{
    pub fn new(parser: P, fetcher: F, engine: E, cache: Arc<Mutex<DiagramCache>>) -> Self {
        Self {
            parser,
            fetcher,
            engine,
            cache,
            machine: RenderMachine::default(),
            options: ParseOptions::for_view(),
            view: DiagramView::Primary,
            normalized: None,
            current_key: None,
            pending_result: None,
            advisories: Vec::new(),
            last_error: None,
        }
    }

    pub fn with_retry_budget(mut self, retry_budget: u32) -> Self {
        self.machine = RenderMachine::new(retry_budget);
        self
    }

    pub fn state(&self) -> RenderState {
        self.machine.state()
    }

    pub fn active_view(&self) -> DiagramView {
        self.view
    }

    /// The provenance record of the last repair, when one ran.
    pub fn normalized_source(&self) -> Option<&NormalizedSource> {
        self.normalized.as_ref()
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Runs one render pass for (proposal, provider), driving the state
    /// machine to a settled or degraded state.
    ///
    /// A changed pair resets the view first: prior repair provenance is
    /// discarded and the engine cleared. Re-rendering an unchanged pair keeps
    /// the attempt counter, which is what eventually exhausts the retry
    /// budget.
    pub async fn render(
        &mut self,
        proposal: &DiagramProposal,
        provider: CloudProvider,
    ) -> RenderOutcome {
        let key = CacheKey::new(&proposal.title, provider, &proposal.diagram_source);
        if self.current_key.as_ref() != Some(&key) {
            tracing::debug!(key = %key, "proposal or provider changed, resetting view");
            let effects = self.machine.on(RenderEvent::Reset);
            self.view = DiagramView::Primary;
            self.advisories.clear();
            self.last_error = None;
            self.run_effects(effects, &key, &proposal.diagram_source).await;
            self.current_key = Some(key.clone());
        }

        self.advisories.clear();
        let effects = self.machine.on(RenderEvent::Begin);
        self.run_effects(effects, &key, &proposal.diagram_source).await;

        RenderOutcome {
            state: self.machine.state(),
            view: self.view,
            advisories: self.advisories.clone(),
            used_repaired_source: self
                .normalized
                .as_ref()
                .is_some_and(NormalizedSource::was_repaired),
            error: self.last_error.clone(),
        }
    }

    /// Manual retry: resets the attempt counter and returns to the primary
    /// view. The cache is kept; the next render pass may still hit it.
    pub fn manual_retry(&mut self) {
        let effects = self.machine.on(RenderEvent::ManualRetry);
        debug_assert!(effects.is_empty());
        self.view = DiagramView::Primary;
        self.last_error = None;
    }

    /// Manual cache clear: resets the view and empties the shared cache.
    pub fn manual_cache_clear(&mut self) {
        for effect in self.machine.on(RenderEvent::ManualCacheClear) {
            if effect == RenderEffect::ClearCache {
                lock_cache(&self.cache).clear();
            }
        }
        self.view = DiagramView::Primary;
        self.last_error = None;
    }

    async fn run_effects(&mut self, effects: Vec<RenderEffect>, key: &CacheKey, source: &str) {
        let mut queue: std::collections::VecDeque<RenderEffect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            let follow_up = self.apply_effect(effect, key, source).await;
            for event in follow_up {
                queue.extend(self.machine.on(event));
            }
        }
    }

    async fn apply_effect(
        &mut self,
        effect: RenderEffect,
        key: &CacheKey,
        source: &str,
    ) -> Vec<RenderEvent> {
        match effect {
            RenderEffect::ClearEngine => {
                self.engine.replace_primitives(&[]);
                vec![]
            }
            RenderEffect::DiscardNormalizedSource => {
                self.normalized = None;
                vec![]
            }
            RenderEffect::LookupCache => {
                let mut cache = lock_cache(&self.cache);
                cache.sweep();
                if cache.get(key).is_some() {
                    tracing::debug!(key = %key, "diagram cache hit");
                    vec![RenderEvent::CacheHit]
                } else {
                    tracing::debug!(key = %key, "diagram cache miss");
                    vec![RenderEvent::CacheMiss]
                }
            }
            RenderEffect::PopulateFromCache => {
                let (primitives, assets) = {
                    let mut cache = lock_cache(&self.cache);
                    match cache.get(key) {
                        Some(entry) => (entry.primitives.clone(), entry.assets.clone()),
                        // Swept between lookup and populate (another view
                        // sharing the cache); fall back to synthesis.
                        None => {
                            tracing::debug!(key = %key, "cache entry evicted before populate, re-synthesizing");
                            return vec![RenderEvent::CacheMiss];
                        }
                    }
                };
                self.engine.replace_primitives(&primitives);
                self.engine.add_assets(&assets);
                vec![]
            }
            RenderEffect::ParseOriginal => {
                match self.synthesize(source, key).await {
                    Ok(output) => {
                        self.populate(&output);
                        self.pending_result = Some(output);
                        vec![RenderEvent::ParseSucceeded]
                    }
                    Err(err) => {
                        tracing::warn!(key = %key, attempts = self.machine.attempts(), error = %err, "original source failed to parse");
                        self.last_error = Some(err.to_string());
                        vec![RenderEvent::ParseFailed]
                    }
                }
            }
            RenderEffect::RepairSource => {
                let normalized = NormalizedSource::new(source);
                let changed = normalized.was_repaired();
                self.normalized = Some(normalized);
                if changed {
                    vec![RenderEvent::RepairChangedSource]
                } else {
                    vec![RenderEvent::RepairUnchanged]
                }
            }
            RenderEffect::ParseRepaired => {
                let repaired = self
                    .normalized
                    .as_ref()
                    .map(|n| n.repaired.clone())
                    .unwrap_or_else(|| source.to_string());
                match self.synthesize(&repaired, key).await {
                    Ok(output) => {
                        self.populate(&output);
                        self.pending_result = Some(output);
                        vec![RenderEvent::ParseSucceeded]
                    }
                    Err(err) => {
                        tracing::warn!(key = %key, attempts = self.machine.attempts(), error = %err, "repaired source failed to parse");
                        self.last_error = Some(err.to_string());
                        vec![RenderEvent::ParseFailed]
                    }
                }
            }
            RenderEffect::CacheResult => {
                if let Some(output) = self.pending_result.take() {
                    lock_cache(&self.cache).put(key.clone(), output.primitives, output.assets);
                }
                vec![]
            }
            RenderEffect::ScrollToContent => {
                self.engine.refresh_layout();
                self.engine.scroll_to_visible();
                vec![]
            }
            RenderEffect::ShowAdvisory(advisory) => {
                self.advisories.push(advisory);
                vec![]
            }
            RenderEffect::RenderPlaceholder => {
                match self.parser.parse(PLACEHOLDER_DIAGRAM_SOURCE, &self.options).await {
                    Ok(parsed) => {
                        self.engine.replace_primitives(&parsed.primitives);
                        self.engine.add_assets(&parsed.assets);
                        vec![RenderEvent::PlaceholderRendered]
                    }
                    Err(err) => {
                        tracing::error!(key = %key, error = %err, "placeholder diagram failed to render");
                        vec![RenderEvent::PlaceholderFailed]
                    }
                }
            }
            RenderEffect::ReportTerminalError => {
                let error = Error::SynthesisExhausted {
                    attempts: self.machine.attempts(),
                    message: self
                        .last_error
                        .clone()
                        .unwrap_or_else(|| "diagram synthesis failed".to_string()),
                };
                tracing::error!(key = %key, provider = %key.provider, attempts = self.machine.attempts(), "diagram synthesis exhausted, switching to textual view");
                self.last_error = Some(error.to_string());
                vec![]
            }
            RenderEffect::SwitchToTextualView => {
                self.view = DiagramView::Textual;
                vec![]
            }
            RenderEffect::ClearCache => {
                lock_cache(&self.cache).clear();
                vec![]
            }
        }
    }

    /// One synthesis: external parse, then the compound-element pass.
    async fn synthesize(&mut self, source: &str, key: &CacheKey) -> Result<CompoundOutput> {
        let parsed = self.parser.parse(source, &self.options).await?;
        let mut output =
            build_compound_elements(parsed.primitives, key.provider, &self.fetcher).await;
        output.assets.extend(parsed.assets);
        Ok(output)
    }

    fn populate(&mut self, output: &CompoundOutput) {
        self.engine.replace_primitives(&output.primitives);
        self.engine.add_assets(&output.assets);
    }
}
