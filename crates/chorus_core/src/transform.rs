//! Per-block rewrite step applied by intercepted emit sinks.

use crate::block::Block;
use anyhow::Result;
use async_trait::async_trait;

/// Maps one block to zero or more replacement blocks.
///
/// Returning `vec![block]` passes it through unchanged. Implementations may
/// call out to slow services, but must not depend on the order in which
/// other blocks were transformed.
#[async_trait]
pub trait BlockTransform: Send + Sync {
    async fn transform(&self, block: Block) -> Result<Vec<Block>>;
}

/// Passes every block through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

#[async_trait]
impl BlockTransform for Identity {
    async fn transform(&self, block: Block) -> Result<Vec<Block>> {
        Ok(vec![block])
    }
}

/// Adapts a synchronous closure into a [`BlockTransform`].
pub struct FnTransform<F> {
    f: F,
}

impl<F> FnTransform<F>
where
    F: Fn(Block) -> Result<Vec<Block>> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F> BlockTransform for FnTransform<F>
where
    F: Fn(Block) -> Result<Vec<Block>> + Send + Sync,
{
    async fn transform(&self, block: Block) -> Result<Vec<Block>> {
        (self.f)(block)
    }
}
