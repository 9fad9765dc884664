//! The child lifecycle controller.
//!
//! A [`TransitionCoordinator`] owns one state machine per tracked child key
//! and drives enter/leave decoration through the shared tick and the
//! completion detector. The host supplies the ordered child key list once
//! per update pass and receives decoration changes and unmount-eligibility
//! notifications through the [`TransitionHost`] capabilities it implements.
//!
//! The native end-of-transition event is never trusted to fire: every phase
//! arms a timeout, and when the platform reports completion-event support
//! the two paths race, first signal wins.

use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::classes::{ClassList, TransitionKind};
use crate::diff::{diff, KeyedDiff};
use crate::error::TransitionError;
use crate::platform::TransitionCapabilities;
use crate::runtime::{RuntimeHandle, TimerId};

/// Host-implemented capability set, injected at construction.
///
/// Callbacks are dispatched after the coordinator has released its own
/// state borrow, so a host may call back into the coordinator (for example
/// issuing the follow-up `update` pass after an unmount notification).
pub trait TransitionHost<K> {
    /// A child's decoration state changed: base class added, active class
    /// added, or transition classes removed.
    fn on_decoration_change(&self, key: &K, classes: &[String]);

    /// The child may now be physically removed. Fired exactly once per
    /// tracked entry.
    fn on_safe_to_unmount(&self, key: &K);
}

/// Phase of one tracked child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Steady,
    Leaving,
    Done,
}

/// Coordinator configuration, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionConfig {
    pub enter_enabled: bool,
    pub leave_enabled: bool,
    pub enter_timeout_ms: u64,
    pub leave_timeout_ms: u64,
    /// Prefix for every generated class name, e.g. `fade` yields
    /// `fade-enter`, `fade-enter-active`, `fade-leave`, `fade-leave-active`.
    pub name_prefix: String,
}

impl TransitionConfig {
    pub fn new(name_prefix: impl Into<String>) -> Self {
        Self {
            name_prefix: name_prefix.into(),
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), TransitionError> {
        if self.enter_timeout_ms == 0 {
            return Err(TransitionError::configuration(
                "enter timeout must be a positive number of milliseconds",
            ));
        }
        if self.leave_timeout_ms == 0 {
            return Err(TransitionError::configuration(
                "leave timeout must be a positive number of milliseconds",
            ));
        }
        if self.name_prefix.is_empty() {
            return Err(TransitionError::configuration(
                "transition name prefix must not be empty",
            ));
        }
        Ok(())
    }

    fn timeout_for(&self, kind: TransitionKind) -> u64 {
        match kind {
            TransitionKind::Enter => self.enter_timeout_ms,
            TransitionKind::Leave => self.leave_timeout_ms,
        }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            enter_enabled: true,
            leave_enabled: true,
            enter_timeout_ms: 300,
            leave_timeout_ms: 300,
            name_prefix: "transition".into(),
        }
    }
}

struct ChildEntry {
    phase: Phase,
    /// Arm sequence number; a completion signal carrying a stale sequence
    /// is ignored. Guards against double resolution and against signals
    /// for a prior occupant of the same key.
    seq: u64,
    pending_timer: Option<TimerId>,
    listener_armed: bool,
    class_queue: Vec<String>,
    classes: ClassList,
    reentry_queued: bool,
}

impl ChildEntry {
    fn new(phase: Phase) -> Self {
        Self {
            phase,
            seq: 0,
            pending_timer: None,
            listener_armed: false,
            class_queue: Vec::new(),
            classes: ClassList::new(),
            reentry_queued: false,
        }
    }

    fn snapshot(&self) -> Vec<String> {
        self.classes.as_slice().to_vec()
    }
}

type Registry<K> = IndexMap<K, ChildEntry, ahash::RandomState>;

struct CoordinatorInner<K> {
    config: TransitionConfig,
    capabilities: TransitionCapabilities,
    runtime: RuntimeHandle,
    entries: Registry<K>,
    /// The one shared tick registration serving every queued class.
    tick_timer: Option<TimerId>,
    next_seq: u64,
}

struct Shared<K, H> {
    host: H,
    inner: RefCell<CoordinatorInner<K>>,
}

enum Emission<K> {
    Decoration { key: K, classes: Vec<String> },
    Unmount { key: K },
}

/// Coordinates enter/leave transitions for a keyed child collection.
pub struct TransitionCoordinator<K, H> {
    shared: Rc<Shared<K, H>>,
}

impl<K, H> Clone for TransitionCoordinator<K, H> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<K, H> TransitionCoordinator<K, H>
where
    K: Clone + Eq + Hash + fmt::Debug + 'static,
    H: TransitionHost<K> + 'static,
{
    /// Builds a coordinator. Fails fast on invalid configuration; a failed
    /// construction never tracks children or arms timers.
    pub fn new(
        config: TransitionConfig,
        capabilities: TransitionCapabilities,
        runtime: RuntimeHandle,
        host: H,
    ) -> Result<Self, TransitionError> {
        config.validate()?;
        Ok(Self {
            shared: Rc::new(Shared {
                host,
                inner: RefCell::new(CoordinatorInner {
                    config,
                    capabilities,
                    runtime,
                    entries: Registry::default(),
                    tick_timer: None,
                    next_seq: 1,
                }),
            }),
        })
    }

    /// Runs one diff pass against the tracked children.
    ///
    /// Added keys enter (or settle immediately when enter transitions are
    /// disabled), removed keys leave (or become unmountable immediately when
    /// leave transitions are disabled), retained keys are untouched. A key
    /// re-added while its entry is still leaving is queued and replayed as a
    /// fresh child once the leave completes.
    ///
    /// On [`TransitionError::DuplicateKey`] the pass aborts before touching
    /// the registry.
    pub fn update(&self, next: &[K]) -> Result<(), TransitionError> {
        let mut emissions = Vec::new();
        {
            let mut inner = self.shared.inner.borrow_mut();
            let previous: Vec<K> = inner.entries.keys().cloned().collect();
            let KeyedDiff {
                added,
                removed,
                retained,
            } = diff(&previous, next)?;

            for key in &retained {
                if let Some(entry) = inner.entries.get_mut(key) {
                    if entry.phase == Phase::Leaving && !entry.reentry_queued {
                        log::debug!(
                            "child {key:?} re-added while leaving; queued until the leave completes"
                        );
                        entry.reentry_queued = true;
                    }
                }
            }

            for key in &removed {
                Self::begin_leave(&self.shared, &mut inner, key, &mut emissions);
            }

            for key in &added {
                Self::begin_enter(&self.shared, &mut inner, key, &mut emissions);
            }

            Self::reorder(&mut inner, next);
        }
        Self::dispatch(&self.shared, emissions);
        Ok(())
    }

    /// Host-delivered native end-of-transition event for `key`.
    ///
    /// Ignored (with a diagnostic) for unknown keys and for entries with no
    /// armed listener, including every entry when the platform reported no
    /// completion-event support.
    pub fn notify_completion(&self, key: &K) {
        let seq = {
            let inner = self.shared.inner.borrow();
            match inner.entries.get(key) {
                Some(entry) if entry.listener_armed => entry.seq,
                Some(_) => {
                    log::debug!("completion event for {key:?} with no armed listener; ignored");
                    return;
                }
                None => {
                    log::debug!("ignoring completion event: {}", TransitionError::unknown_key(key));
                    return;
                }
            }
        };
        Self::resolve_completion(&self.shared, key, seq);
    }

    /// Host-issued cancel: drops `key`'s entry immediately, cancelling its
    /// pending timer and listener and discarding queued classes. No
    /// notifications are fired. Unknown keys are a logged no-op.
    pub fn evict(&self, key: &K) {
        let mut inner = self.shared.inner.borrow_mut();
        let runtime = inner.runtime.clone();
        match inner.entries.shift_remove(key) {
            Some(mut entry) => {
                if let Some(timer) = entry.pending_timer.take() {
                    runtime.cancel_timer(timer);
                }
            }
            None => log::debug!("ignoring evict: {}", TransitionError::unknown_key(key)),
        }
    }

    /// Cancels all pending timers and listeners and empties the registry.
    /// Synchronous and idempotent; fires no notifications.
    pub fn teardown(&self) {
        let mut inner = self.shared.inner.borrow_mut();
        let runtime = inner.runtime.clone();
        if let Some(timer) = inner.tick_timer.take() {
            runtime.cancel_timer(timer);
        }
        for (_, entry) in inner.entries.iter_mut() {
            if let Some(timer) = entry.pending_timer.take() {
                runtime.cancel_timer(timer);
            }
            entry.listener_armed = false;
            entry.class_queue.clear();
        }
        inner.entries.clear();
    }

    /// Phase of `key`, if tracked.
    pub fn phase_of(&self, key: &K) -> Option<Phase> {
        self.shared
            .inner
            .borrow()
            .entries
            .get(key)
            .map(|entry| entry.phase)
    }

    /// Current decoration state of `key`, if tracked.
    pub fn classes_of(&self, key: &K) -> Option<Vec<String>> {
        self.shared
            .inner
            .borrow()
            .entries
            .get(key)
            .map(ChildEntry::snapshot)
    }

    /// Tracked keys in registry order (most recent pass order; leaving
    /// entries keep their prior relative order behind it).
    pub fn tracked_keys(&self) -> Vec<K> {
        self.shared.inner.borrow().entries.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.inner.borrow().entries.is_empty()
    }

    fn begin_enter(
        shared: &Rc<Shared<K, H>>,
        inner: &mut CoordinatorInner<K>,
        key: &K,
        emissions: &mut Vec<Emission<K>>,
    ) {
        if !inner.config.enter_enabled {
            inner
                .entries
                .insert(key.clone(), ChildEntry::new(Phase::Steady));
            return;
        }

        let prefix = inner.config.name_prefix.clone();
        let mut entry = ChildEntry::new(Phase::Entering);
        entry.classes.add(TransitionKind::Enter.base_class(&prefix));
        entry
            .class_queue
            .push(TransitionKind::Enter.active_class(&prefix));
        emissions.push(Emission::Decoration {
            key: key.clone(),
            classes: entry.snapshot(),
        });
        inner.entries.insert(key.clone(), entry);

        Self::arm_completion(shared, inner, key, TransitionKind::Enter);
        Self::ensure_tick(shared, inner);
    }

    fn begin_leave(
        shared: &Rc<Shared<K, H>>,
        inner: &mut CoordinatorInner<K>,
        key: &K,
        emissions: &mut Vec<Emission<K>>,
    ) {
        let prefix = inner.config.name_prefix.clone();
        let leave_enabled = inner.config.leave_enabled;
        let runtime = inner.runtime.clone();

        let Some(entry) = inner.entries.get_mut(key) else {
            log::debug!("ignoring removal: {}", TransitionError::unknown_key(key));
            return;
        };
        if matches!(entry.phase, Phase::Leaving | Phase::Done) {
            return;
        }

        // A leave supersedes an in-flight enter: cancel its completion arms
        // and take the enter classes back out of the decoration state.
        if let Some(timer) = entry.pending_timer.take() {
            runtime.cancel_timer(timer);
        }
        entry.listener_armed = false;
        entry.class_queue.clear();
        let had_enter_classes = entry
            .classes
            .remove(&TransitionKind::Enter.base_class(&prefix))
            | entry
                .classes
                .remove(&TransitionKind::Enter.active_class(&prefix));

        if !leave_enabled {
            entry.phase = Phase::Done;
            if had_enter_classes {
                emissions.push(Emission::Decoration {
                    key: key.clone(),
                    classes: entry.snapshot(),
                });
            }
            emissions.push(Emission::Unmount { key: key.clone() });
            inner.entries.shift_remove(key);
            return;
        }

        entry.phase = Phase::Leaving;
        entry.classes.add(TransitionKind::Leave.base_class(&prefix));
        entry
            .class_queue
            .push(TransitionKind::Leave.active_class(&prefix));
        emissions.push(Emission::Decoration {
            key: key.clone(),
            classes: entry.snapshot(),
        });

        Self::arm_completion(shared, inner, key, TransitionKind::Leave);
        Self::ensure_tick(shared, inner);
    }

    /// Arms the completion detector for `key`: always the timeout, plus the
    /// native listener when the platform supports completion events.
    /// Arming cancels any prior timer or listener on the entry.
    fn arm_completion(
        shared: &Rc<Shared<K, H>>,
        inner: &mut CoordinatorInner<K>,
        key: &K,
        kind: TransitionKind,
    ) {
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let timeout_ms = inner.config.timeout_for(kind);
        let supports_events = inner.capabilities.supports_completion_events;
        let runtime = inner.runtime.clone();

        let Some(entry) = inner.entries.get_mut(key) else {
            return;
        };
        if let Some(timer) = entry.pending_timer.take() {
            runtime.cancel_timer(timer);
        }
        entry.seq = seq;
        entry.listener_armed = supports_events;

        let weak = Rc::downgrade(shared);
        let timer_key = key.clone();
        entry.pending_timer = runtime.set_timeout(timeout_ms, move || {
            if let Some(shared) = weak.upgrade() {
                Self::resolve_completion(&shared, &timer_key, seq);
            }
        });
        if entry.pending_timer.is_none() {
            log::debug!("runtime gone while arming completion for {key:?}");
        }
    }

    /// Arms the shared decoration tick if it is not already pending.
    fn ensure_tick(shared: &Rc<Shared<K, H>>, inner: &mut CoordinatorInner<K>) {
        if inner.tick_timer.is_some() {
            return;
        }
        let weak = Rc::downgrade(shared);
        inner.tick_timer = inner.runtime.on_next_tick(move || {
            if let Some(shared) = weak.upgrade() {
                Self::flush_class_queues(&shared);
            }
        });
    }

    /// Applies every class queued since the last tick. Idempotent when
    /// nothing is queued.
    fn flush_class_queues(shared: &Rc<Shared<K, H>>) {
        let mut emissions = Vec::new();
        {
            let mut inner = shared.inner.borrow_mut();
            inner.tick_timer = None;
            for (key, entry) in inner.entries.iter_mut() {
                if entry.class_queue.is_empty() {
                    continue;
                }
                let mut changed = false;
                for class in entry.class_queue.drain(..) {
                    changed |= entry.classes.add(class);
                }
                if changed {
                    emissions.push(Emission::Decoration {
                        key: key.clone(),
                        classes: entry.snapshot(),
                    });
                }
            }
        }
        Self::dispatch(shared, emissions);
    }

    /// Completion signal for `key`, from either the timeout or the native
    /// event path. Resolves at most once per arm: the sequence check drops
    /// stale and duplicate signals, and the losing path is cancelled.
    fn resolve_completion(shared: &Rc<Shared<K, H>>, key: &K, seq: u64) {
        let mut emissions = Vec::new();
        {
            let mut inner = shared.inner.borrow_mut();
            let prefix = inner.config.name_prefix.clone();
            let runtime = inner.runtime.clone();

            let Some(entry) = inner.entries.get_mut(key) else {
                log::debug!("ignoring completion: {}", TransitionError::unknown_key(key));
                return;
            };
            if entry.seq != seq {
                return;
            }
            if entry.pending_timer.is_none() && !entry.listener_armed {
                // Already resolved for this arm.
                return;
            }
            if let Some(timer) = entry.pending_timer.take() {
                runtime.cancel_timer(timer);
            }
            entry.listener_armed = false;
            entry.class_queue.clear();

            match entry.phase {
                Phase::Entering => {
                    entry
                        .classes
                        .remove(&TransitionKind::Enter.base_class(&prefix));
                    entry
                        .classes
                        .remove(&TransitionKind::Enter.active_class(&prefix));
                    entry.phase = Phase::Steady;
                    emissions.push(Emission::Decoration {
                        key: key.clone(),
                        classes: entry.snapshot(),
                    });
                }
                Phase::Leaving => {
                    entry
                        .classes
                        .remove(&TransitionKind::Leave.base_class(&prefix));
                    entry
                        .classes
                        .remove(&TransitionKind::Leave.active_class(&prefix));
                    entry.phase = Phase::Done;
                    emissions.push(Emission::Decoration {
                        key: key.clone(),
                        classes: entry.snapshot(),
                    });
                    emissions.push(Emission::Unmount { key: key.clone() });

                    let replay = inner
                        .entries
                        .shift_remove(key)
                        .map(|entry| entry.reentry_queued)
                        .unwrap_or(false);
                    if replay {
                        // The old entry reached Done; the key may now enter
                        // as a fresh logical child.
                        log::debug!("replaying queued re-add for {key:?}");
                        Self::begin_enter(shared, &mut inner, key, &mut emissions);
                    }
                }
                Phase::Steady | Phase::Done => {}
            }
        }
        Self::dispatch(shared, emissions);
    }

    /// Registry order follows the most recent pass: next-list order first,
    /// entries absent from `next` (leaving children) keep their prior
    /// relative order behind it.
    fn reorder(inner: &mut CoordinatorInner<K>, next: &[K]) {
        let mut reordered =
            Registry::with_capacity_and_hasher(inner.entries.len(), ahash::RandomState::default());
        for key in next {
            if let Some((key, entry)) = inner.entries.shift_remove_entry(key) {
                reordered.insert(key, entry);
            }
        }
        for (key, entry) in inner.entries.drain(..) {
            reordered.insert(key, entry);
        }
        inner.entries = reordered;
    }

    fn dispatch(shared: &Rc<Shared<K, H>>, emissions: Vec<Emission<K>>) {
        for emission in emissions {
            match emission {
                Emission::Decoration { key, classes } => {
                    shared.host.on_decoration_change(&key, &classes);
                }
                Emission::Unmount { key } => shared.host.on_safe_to_unmount(&key),
            }
        }
    }
}
