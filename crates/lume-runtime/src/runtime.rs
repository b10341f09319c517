//! Capture / mount / unmount lifecycle of the running application.

use crate::error::{Result, RuntimeError};
use crate::state::CapturedState;

/// Application lifecycle hooks.
///
/// Hooks are allowed to fail; [`Runtime`] decides which failures matter.
pub trait App {
    type Instance;

    /// Create a running instance, initialised from `previous` when present.
    fn create(&self, previous: Option<&CapturedState>) -> Result<Self::Instance>;

    /// Snapshot the user-visible state of `instance`.
    fn snapshot(&self, instance: &Self::Instance) -> Result<CapturedState>;

    /// Tear `instance` down.
    fn destroy(&self, instance: Self::Instance) -> Result<()>;
}

type DebugHook = Box<dyn Fn(&CapturedState) + Send + Sync>;

/// Owns at most one mounted instance of an [`App`].
///
/// `capture_state` and `unmount` never fail: hook errors are logged and
/// collapse into an empty state or a finished teardown.
pub struct Runtime<A: App> {
    app: A,
    instance: Option<A::Instance>,
    debug_hook: Option<DebugHook>,
}

impl<A: App> Runtime<A> {
    pub fn new(app: A) -> Self {
        Self {
            app,
            instance: None,
            debug_hook: None,
        }
    }

    /// Observe the state after every mount and capture (debugging aid).
    pub fn with_debug_hook(
        mut self,
        hook: impl Fn(&CapturedState) + Send + Sync + 'static,
    ) -> Self {
        self.debug_hook = Some(Box::new(hook));
        self
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    /// Swap in a freshly loaded application. Any mounted instance is
    /// unmounted first since it belongs to the old code.
    pub fn replace_app(&mut self, app: A) -> A {
        self.unmount();
        std::mem::replace(&mut self.app, app)
    }

    pub fn is_mounted(&self) -> bool {
        self.instance.is_some()
    }

    pub fn instance(&self) -> Option<&A::Instance> {
        self.instance.as_ref()
    }

    pub fn instance_mut(&mut self) -> Option<&mut A::Instance> {
        self.instance.as_mut()
    }

    /// Snapshot of the mounted instance, or an empty state.
    pub fn capture_state(&self) -> CapturedState {
        let state = match &self.instance {
            Some(instance) => settle(self.app.snapshot(instance)),
            None => CapturedState::default(),
        };
        self.observe(&state);
        state
    }

    /// (Re)create the running instance from `previous`.
    ///
    /// An already mounted instance is unmounted first.
    pub fn mount(&mut self, previous: Option<CapturedState>) -> Result<()> {
        self.unmount();
        let instance = self.app.create(previous.as_ref())?;
        self.instance = Some(instance);
        if self.debug_hook.is_some() {
            self.capture_state();
        }
        Ok(())
    }

    /// Tear down the running instance; a no-op when nothing is mounted.
    pub fn unmount(&mut self) {
        if let Some(instance) = self.instance.take() {
            settle(self.app.destroy(instance));
        }
    }

    fn observe(&self, state: &CapturedState) {
        if let Some(hook) = &self.debug_hook {
            hook(state);
        }
    }
}

/// Collapse a hook failure into the default value.
pub fn settle<T: Default>(result: Result<T>) -> T {
    result.unwrap_or_else(|err: RuntimeError| {
        tracing::debug!(error = %err, "lifecycle hook failed, using default");
        T::default()
    })
}
