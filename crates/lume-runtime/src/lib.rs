//! Client-side hot reload runtime.
//!
//! Models what runs in the browser during `lume dev`: an application with
//! capture/mount/unmount hooks, and a shim that swaps the application when
//! the dev server announces a rebuilt bundle.
//!
//! ```
//! use lume_runtime::{ChannelMessage, CounterApp, HotReloadShim, Runtime};
//!
//! let mut runtime = Runtime::new(CounterApp);
//! runtime.mount(None).unwrap();
//! runtime.instance_mut().unwrap().increment();
//!
//! let mut shim = HotReloadShim::new(runtime, || Ok(CounterApp));
//! shim.apply(&ChannelMessage::Update).unwrap();
//! assert_eq!(shim.runtime().instance().unwrap().count(), 1);
//! ```

mod counter;
mod error;
mod protocol;
mod runtime;
mod shim;
mod state;

pub use counter::{Counter, CounterApp};
pub use error::{Result, RuntimeError};
pub use protocol::ChannelMessage;
pub use runtime::{App, Runtime, settle};
pub use shim::{BundleLoader, HotReloadShim};
pub use state::CapturedState;
