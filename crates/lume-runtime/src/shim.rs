//! Client-side reload orchestration.
//!
//! The shim reacts to channel messages:
//!
//! - `update`: capture state, unmount, load the new bundle, mount it with the
//!   captured state.
//! - `error`: show the payload in the overlay; the running instance is left
//!   alone.

use crate::error::Result;
use crate::protocol::ChannelMessage;
use crate::runtime::{App, Runtime};

/// Produces the application from the freshly rebuilt bundle.
pub trait BundleLoader<A> {
    fn load(&mut self) -> Result<A>;
}

impl<A, F> BundleLoader<A> for F
where
    F: FnMut() -> Result<A>,
{
    fn load(&mut self) -> Result<A> {
        self()
    }
}

pub struct HotReloadShim<A: App, L> {
    runtime: Runtime<A>,
    loader: L,
    overlay: Option<String>,
}

impl<A: App, L: BundleLoader<A>> HotReloadShim<A, L> {
    pub fn new(runtime: Runtime<A>, loader: L) -> Self {
        Self {
            runtime,
            loader,
            overlay: None,
        }
    }

    pub fn runtime(&self) -> &Runtime<A> {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut Runtime<A> {
        &mut self.runtime
    }

    /// Error payload currently shown to the developer, if any.
    pub fn overlay(&self) -> Option<&str> {
        self.overlay.as_deref()
    }

    /// Decode a text frame and apply it.
    pub fn handle_frame(&mut self, frame: &str) -> Result<()> {
        let message = ChannelMessage::from_json(frame)?;
        self.apply(&message)
    }

    pub fn apply(&mut self, message: &ChannelMessage) -> Result<()> {
        match message {
            ChannelMessage::Update => self.hot_swap(),
            ChannelMessage::Error { payload } => {
                self.overlay = Some(payload.clone());
                Ok(())
            }
        }
    }

    fn hot_swap(&mut self) -> Result<()> {
        let state = self.runtime.capture_state();
        self.runtime.unmount();

        match self.loader.load() {
            Ok(app) => {
                self.runtime.replace_app(app);
            }
            Err(err) => {
                // Keep the old code running with the state it had.
                tracing::warn!(error = %err, "reload failed, restoring previous instance");
                self.overlay = Some(err.to_string());
                self.runtime.mount(Some(state))?;
                return Err(err);
            }
        }

        if let Err(err) = self.runtime.mount(Some(state)) {
            self.overlay = Some(err.to_string());
            return Err(err);
        }
        self.overlay = None;
        Ok(())
    }
}
