//! `ClassChecker`, a two-level (STRICT / WARN) allow/deny policy engine
//! that gates every class entering or leaving the serializer.
//!
//! A checker is safe for concurrent `check` calls; mutation (`allow`,
//! `disallow`, `add_listener`, `remove_listener`) is serialized against
//! itself but may proceed concurrently with reads. Denying a class never
//! fails the checker itself; `check` is total. It is the surrounding class
//! resolver's job to turn a `false` into an `Insecure` error.

use std::cell::Cell;
use std::sync::{Mutex, RwLock, Weak};

use log::{debug, warn};

use crate::error::{FuryError, Result};

thread_local! {
    // Detects same-thread reentrancy (a listener callback mutating the
    // checker it was invoked from), distinct from cross-thread contention on
    // `mutation_lock`, which simply blocks the second mutator.
    static MUTATING: Cell<bool> = Cell::new(false);
}

/// Checker mode: default-deny (`Strict`) or default-allow (`Warn`), both
/// subject to explicit allow/deny overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CheckerMode {
    /// A class not explicitly allowed is denied.
    Strict,
    /// A class not explicitly denied is allowed.
    Warn,
}

/// Direction of a pattern mutation delivered to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The pattern was added to the allow set.
    Allow,
    /// The pattern was added to the deny set.
    Deny,
}

/// A class resolver (or any other cache keyed on permission decisions)
/// attached to a checker to receive pattern-change notifications.
///
/// A listener MUST tolerate receiving a notification for a pattern it has
/// never seen before.
pub trait ClassCheckerListener: Send + Sync {
    /// Invoked synchronously for every allow/disallow mutation, in
    /// listener-registration order. An error here does not stop remaining
    /// listeners from being notified; the checker surfaces the first one
    /// after all listeners have run.
    fn on_pattern_changed(&self, pattern: &str, direction: Direction) -> Result<()>;
}

struct Pattern {
    raw: String,
    wildcard_prefix: Option<String>,
}

impl Pattern {
    fn parse(raw: &str) -> Self {
        Pattern {
            wildcard_prefix: raw.strip_suffix('*').map(str::to_string),
            raw: raw.to_string(),
        }
    }

    fn matches(&self, class_name: &str) -> bool {
        match &self.wildcard_prefix {
            Some(prefix) => class_name.starts_with(prefix.as_str()),
            None => self.raw == class_name,
        }
    }
}

struct State {
    allow: Vec<Pattern>,
    deny: Vec<Pattern>,
    listeners: Vec<Weak<dyn ClassCheckerListener>>,
}

/// Baseline allow patterns a `strict_with_defaults()` checker is seeded
/// with: the core primitive and collection type names every serializer
/// must be able to round-trip without per-construction special-casing.
/// Expressed as ordinary allow patterns, so they compose with
/// user-registered ones and are visible to listeners like any other
/// mutation made at construction time.
const BASELINE_ALLOW_PATTERNS: &[&str] = &[
    "bool", "byte", "short", "int", "long", "float", "double", "string", "bool[]", "byte[]",
    "short[]", "int[]", "long[]", "float[]", "double[]", "string[]",
];

/// Gates every class name the serializer encounters on both the write and
/// read paths.
///
/// There is no `Default` impl: a checker with an implicit mode is exactly
/// the kind of silent security decision this component exists to prevent.
pub struct ClassChecker {
    mode: CheckerMode,
    state: RwLock<State>,
    mutation_lock: Mutex<()>,
}

impl ClassChecker {
    fn new(mode: CheckerMode) -> Self {
        ClassChecker {
            mode,
            state: RwLock::new(State {
                allow: Vec::new(),
                deny: Vec::new(),
                listeners: Vec::new(),
            }),
            mutation_lock: Mutex::new(()),
        }
    }

    /// Build a `STRICT` checker with an empty allow-list: every class is
    /// denied until explicitly allowed.
    pub fn strict() -> Self {
        Self::new(CheckerMode::Strict)
    }

    /// Build a `STRICT` checker pre-seeded with [`BASELINE_ALLOW_PATTERNS`],
    /// so core primitive and collection types do not need to be
    /// special-cased by every caller.
    pub fn strict_with_defaults() -> Self {
        let checker = Self::strict();
        for pattern in BASELINE_ALLOW_PATTERNS {
            checker
                .allow(pattern)
                .expect("seeding baseline patterns cannot recurse or fail");
        }
        checker
    }

    /// Build a `WARN` checker: every class is allowed until explicitly
    /// denied.
    pub fn warn() -> Self {
        Self::new(CheckerMode::Warn)
    }

    /// The checker's mode.
    pub fn mode(&self) -> CheckerMode {
        self.mode
    }

    /// Decide whether `class_name` is currently permitted. Total: never
    /// fails, only denies.
    ///
    /// ```rust
    /// # use fury_core::checker::ClassChecker;
    /// let checker = ClassChecker::strict();
    /// assert!(!checker.check("io.example.A"));
    /// checker.allow("io.example.A").unwrap();
    /// assert!(checker.check("io.example.A"));
    /// ```
    pub fn check(&self, class_name: &str) -> bool {
        let state = self.state.read().expect("ClassChecker lock poisoned");
        if state.deny.iter().any(|p| p.matches(class_name)) {
            warn!("denied class `{class_name}` by class checker policy");
            return false;
        }
        match self.mode {
            CheckerMode::Strict => state.allow.iter().any(|p| p.matches(class_name)),
            CheckerMode::Warn => true,
        }
    }

    /// Enter a mutating section. Same-thread reentrancy (a listener callback
    /// mutating the checker it was invoked from) is rejected before the lock
    /// is touched, since `Mutex` is not reentrant and would otherwise
    /// deadlock that thread against itself. A second thread mutating
    /// concurrently instead blocks on `mutation_lock` until the first
    /// finishes, per spec: concurrent mutation is serialized, not rejected.
    fn begin_mutation(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        if MUTATING.with(Cell::get) {
            return Err(FuryError::ProgrammerError {
                message: "recursive mutation of ClassChecker from a listener callback"
                    .to_string(),
            });
        }
        let guard = self
            .mutation_lock
            .lock()
            .expect("ClassChecker mutation lock poisoned");
        MUTATING.with(|flag| flag.set(true));
        Ok(guard)
    }

    fn end_mutation(&self) {
        MUTATING.with(|flag| flag.set(false));
    }

    /// Add a pattern (exact name or `prefix.*` wildcard) to the allow set
    /// and notify every registered listener, in registration order.
    pub fn allow(&self, pattern: &str) -> Result<()> {
        self.mutate(pattern, Direction::Allow, |state, parsed| {
            state.allow.push(parsed)
        })
    }

    /// Add a pattern to the deny set and notify every registered listener,
    /// in registration order. Deny always overrides allow.
    pub fn disallow(&self, pattern: &str) -> Result<()> {
        self.mutate(pattern, Direction::Deny, |state, parsed| {
            state.deny.push(parsed)
        })
    }

    fn mutate(
        &self,
        pattern: &str,
        direction: Direction,
        apply: impl FnOnce(&mut State, Pattern),
    ) -> Result<()> {
        let _guard = self.begin_mutation()?;
        debug!("{direction:?} pattern mutation: {pattern}");
        let parsed = Pattern::parse(pattern);

        // The write lock is released before listeners run, so a listener
        // may itself call `check()` without deadlocking against this
        // thread's own write guard.
        let listeners = {
            let mut state = self.state.write().expect("ClassChecker lock poisoned");
            apply(&mut *state, parsed);
            state.listeners.clone()
        };

        let result = self.notify(&listeners, pattern, direction);
        self.end_mutation();
        result
    }

    fn notify(
        &self,
        listeners: &[Weak<dyn ClassCheckerListener>],
        pattern: &str,
        direction: Direction,
    ) -> Result<()> {
        let mut first_error = None;
        for listener in listeners {
            if let Some(listener) = listener.upgrade() {
                if let Err(err) = listener.on_pattern_changed(pattern, direction) {
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Register a listener to receive future pattern-change notifications.
    /// The checker holds only a weak reference: it never keeps a listener
    /// alive, and a dropped listener is silently skipped on the next
    /// notification.
    ///
    /// Whether a newly-registered listener should see a replay of past
    /// mutations is not specified; this checker does not replay history,
    /// so callers that need retroactive invalidation must snapshot
    /// `check()` results themselves immediately after registering.
    pub fn add_listener(&self, listener: Weak<dyn ClassCheckerListener>) -> Result<()> {
        let _guard = self.begin_mutation()?;
        self.state
            .write()
            .expect("ClassChecker lock poisoned")
            .listeners
            .push(listener);
        self.end_mutation();
        Ok(())
    }

    /// Remove a previously-registered listener, matched by pointer identity.
    pub fn remove_listener(&self, listener: &Weak<dyn ClassCheckerListener>) -> Result<()> {
        let _guard = self.begin_mutation()?;
        self.state
            .write()
            .expect("ClassChecker lock poisoned")
            .listeners
            .retain(|l| !l.ptr_eq(listener));
        self.end_mutation();
        Ok(())
    }
}
