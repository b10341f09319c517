//! # lume-bundler
//!
//! The compile step shared by `lume build` and `lume dev`.
//!
//! Compilation itself is delegated to esbuild; this crate owns the contract
//! around it: mode-specific options, atomic promotion of the bundle into the
//! output directory, and structured [`Diagnostic`]s on failure.
//!
//! ```no_run
//! use lume_bundler::{BuildMode, BuildOutcome, BuildPlan, Compiler, EsbuildCompiler};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let compiler = EsbuildCompiler::new(BuildPlan::new(".", "src/main.jsx", "dist"));
//! match compiler.compile(BuildMode::Production).await {
//!     BuildOutcome::Success { artifact_path } => println!("wrote {}", artifact_path.display()),
//!     BuildOutcome::Failure { diagnostics } => {
//!         eprintln!("{}", lume_bundler::render_diagnostics(&diagnostics));
//!     }
//! }
//! # }
//! ```

pub mod compiler;
pub mod diagnostics;
pub mod esbuild;
pub mod options;
pub mod outcome;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use compiler::Compiler;
pub use diagnostics::{Diagnostic, render_diagnostics};
pub use esbuild::EsbuildCompiler;
pub use options::{BuildMode, BuildPlan, DEFAULT_BUNDLE_NAME};
pub use outcome::BuildOutcome;
