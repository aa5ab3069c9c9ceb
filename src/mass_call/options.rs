//! Construction options of the mass-call engine.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::mass_call::MassCallHooks;

/// Default concurrency of the first window.
pub const DEFAULT_INITIAL_SPAWN: usize = 1;
/// Default concurrency ceiling.
pub const DEFAULT_MAX_SPAWN: usize = 5;
/// Default backoff unit: the n-th consecutive total failure sleeps `fib(n)` seconds.
pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_secs(1);

/// Options of a [`MassCallClient`](crate::MassCallClient).
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use crystallize_api::mass_call::MassCallOptions;
///
/// let options = MassCallOptions::builder()
///     .initial_spawn(2)
///     .max_spawn(10)
///     .backoff_unit(Duration::from_millis(500))
///     .build();
///
/// assert_eq!(options.initial_spawn(), 2);
/// assert_eq!(options.max_spawn(), 10);
/// ```
#[derive(Clone)]
pub struct MassCallOptions {
    initial_spawn: usize,
    max_spawn: usize,
    backoff_unit: Duration,
    hooks: Option<Arc<dyn MassCallHooks>>,
}

impl MassCallOptions {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> MassCallOptionsBuilder {
        MassCallOptionsBuilder::new()
    }

    /// Concurrency of the first window, within `[1, max_spawn]`.
    #[must_use]
    pub const fn initial_spawn(&self) -> usize {
        self.initial_spawn
    }

    /// Maximum concurrency, at least 1.
    #[must_use]
    pub const fn max_spawn(&self) -> usize {
        self.max_spawn
    }

    /// Duration multiplied by the Fibonacci sequence on total failures.
    #[must_use]
    pub const fn backoff_unit(&self) -> Duration {
        self.backoff_unit
    }

    /// The configured hooks, if any.
    #[must_use]
    pub fn hooks(&self) -> Option<&Arc<dyn MassCallHooks>> {
        self.hooks.as_ref()
    }
}

impl Default for MassCallOptions {
    fn default() -> Self {
        MassCallOptionsBuilder::new().build()
    }
}

impl fmt::Debug for MassCallOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MassCallOptions")
            .field("initial_spawn", &self.initial_spawn)
            .field("max_spawn", &self.max_spawn)
            .field("backoff_unit", &self.backoff_unit)
            .field("hooks", &self.hooks.is_some())
            .finish()
    }
}

/// Builder for [`MassCallOptions`].
///
/// # Defaults
///
/// - `initial_spawn`: 1
/// - `max_spawn`: 5
/// - `backoff_unit`: 1 second
/// - `hooks`: none
#[derive(Default)]
pub struct MassCallOptionsBuilder {
    initial_spawn: Option<usize>,
    max_spawn: Option<usize>,
    backoff_unit: Option<Duration>,
    hooks: Option<Arc<dyn MassCallHooks>>,
}

impl MassCallOptionsBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the concurrency of the first window.
    #[must_use]
    pub const fn initial_spawn(mut self, initial_spawn: usize) -> Self {
        self.initial_spawn = Some(initial_spawn);
        self
    }

    /// Sets the maximum concurrency.
    #[must_use]
    pub const fn max_spawn(mut self, max_spawn: usize) -> Self {
        self.max_spawn = Some(max_spawn);
        self
    }

    /// Sets the backoff unit.
    #[must_use]
    pub const fn backoff_unit(mut self, unit: Duration) -> Self {
        self.backoff_unit = Some(unit);
        self
    }

    /// Sets the hooks.
    #[must_use]
    pub fn hooks(mut self, hooks: Arc<dyn MassCallHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Builds the options. `max_spawn` is raised to at least 1 and
    /// `initial_spawn` is clamped into `[1, max_spawn]`.
    #[must_use]
    pub fn build(self) -> MassCallOptions {
        let max_spawn = self.max_spawn.unwrap_or(DEFAULT_MAX_SPAWN).max(1);
        let initial_spawn = self
            .initial_spawn
            .unwrap_or(DEFAULT_INITIAL_SPAWN)
            .clamp(1, max_spawn);

        MassCallOptions {
            initial_spawn,
            max_spawn,
            backoff_unit: self.backoff_unit.unwrap_or(DEFAULT_BACKOFF_UNIT),
            hooks: self.hooks,
        }
    }
}
