//! The compile capability.

use crate::options::BuildMode;
use crate::outcome::BuildOutcome;
use async_trait::async_trait;
use std::sync::Arc;

/// Something that turns the project's entry point into one bundle.
///
/// Implementations report compile errors as [`BuildOutcome::Failure`] and
/// never panic on bad input. A success means the artifact is already in
/// place; a failure leaves any previous artifact untouched.
#[async_trait]
pub trait Compiler: Send + Sync {
    async fn compile(&self, mode: BuildMode) -> BuildOutcome;
}

#[async_trait]
impl<C: Compiler + ?Sized> Compiler for Arc<C> {
    async fn compile(&self, mode: BuildMode) -> BuildOutcome {
        (**self).compile(mode).await
    }
}

#[async_trait]
impl<C: Compiler + ?Sized> Compiler for Box<C> {
    async fn compile(&self, mode: BuildMode) -> BuildOutcome {
        (**self).compile(mode).await
    }
}
