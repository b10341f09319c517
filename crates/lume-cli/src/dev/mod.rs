//! Development mode: watch, rebuild, push updates to the browser.

pub mod channel;
pub mod rebuild;
pub mod server;
pub mod watcher;

pub use channel::{BroadcastReport, ClientId, LiveChannel};
pub use rebuild::{LoopState, RebuildLoop};
pub use server::{WS_PATH, router, serve};
pub use watcher::{FileChange, FileWatcher, WatchFilter};
