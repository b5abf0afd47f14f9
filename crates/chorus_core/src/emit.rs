//! Emit sinks and the interceptor that rewrites what reaches them.
//!
//! An agent run ends by handing each batch of output blocks to every sink in
//! the context, in order. [`wrap`] swaps that list for one whose sinks push
//! each block through a [`BlockTransform`] first, without changing how many
//! sinks there are, their order, or what metadata they receive.

use crate::block::Block;
use crate::metadata::Metadata;
use crate::transform::BlockTransform;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Downstream consumer of output batches (a transport, a UI, a log).
#[async_trait]
pub trait EmitSink: Send + Sync {
    async fn emit(&self, blocks: Vec<Block>, metadata: &Metadata) -> Result<()>;
}

/// Adapts a synchronous closure into an [`EmitSink`].
pub struct FnSink<F> {
    f: F,
}

impl<F> FnSink<F>
where
    F: Fn(Vec<Block>, &Metadata) -> Result<()> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F> EmitSink for FnSink<F>
where
    F: Fn(Vec<Block>, &Metadata) -> Result<()> + Send + Sync,
{
    async fn emit(&self, blocks: Vec<Block>, metadata: &Metadata) -> Result<()> {
        (self.f)(blocks, metadata)
    }
}

/// A sink that transforms every block before delegating to the one it wraps.
pub struct InterceptedSink {
    inner: Arc<dyn EmitSink>,
    transform: Arc<dyn BlockTransform>,
}

impl InterceptedSink {
    pub fn new(inner: Arc<dyn EmitSink>, transform: Arc<dyn BlockTransform>) -> Self {
        Self { inner, transform }
    }
}

#[async_trait]
impl EmitSink for InterceptedSink {
    async fn emit(&self, blocks: Vec<Block>, metadata: &Metadata) -> Result<()> {
        let incoming = blocks.len();
        let mut out = Vec::with_capacity(incoming);
        for block in blocks {
            let kind = block.kind;
            match self.transform.transform(block).await {
                Ok(replaced) => out.extend(replaced),
                Err(e) => {
                    // The wrapped sink sees nothing from a batch that failed.
                    tracing::warn!("Transform failed on {} block, batch dropped: {}", kind, e);
                    return Err(e);
                }
            }
        }
        tracing::debug!("Intercepted batch: {} blocks in, {} out", incoming, out.len());
        self.inner.emit(out, metadata).await
    }
}

/// Wrap every sink so it transforms its batch before delivery.
///
/// The returned list has the same length and order as `sinks`. The input
/// list is left untouched.
pub fn wrap(
    sinks: &[Arc<dyn EmitSink>],
    transform: Arc<dyn BlockTransform>,
) -> Vec<Arc<dyn EmitSink>> {
    tracing::debug!("Wrapping {} emit sinks", sinks.len());
    sinks
        .iter()
        .map(|sink| {
            Arc::new(InterceptedSink::new(sink.clone(), transform.clone())) as Arc<dyn EmitSink>
        })
        .collect()
}
