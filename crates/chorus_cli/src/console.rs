use anyhow::Result;
use async_trait::async_trait;
use chorus_core::{Block, EmitSink, Metadata, Payload};
use std::io::{self, Write};
use std::sync::Mutex;

/// Prints emitted blocks to a terminal-like writer.
pub struct ConsoleSink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

/// One line per block. Non-text blocks show their `Block(<uuid>)` reference.
pub fn render(block: &Block) -> String {
    match &block.payload {
        Payload::Text(text) if block.is_text() => text.clone(),
        Payload::Text(_) => format!("[{}] {}", block.kind, block.reference()),
        Payload::Url(url) => format!("[{}] {} {}", block.kind, block.reference(), url),
        Payload::Bytes(bytes) => format!(
            "[{}] {} ({} bytes, {})",
            block.kind,
            block.reference(),
            bytes.len(),
            block.mime_type()
        ),
    }
}

#[async_trait]
impl EmitSink for ConsoleSink {
    async fn emit(&self, blocks: Vec<Block>, _metadata: &Metadata) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| anyhow::anyhow!("console writer poisoned"))?;
        writeln!(out)?;
        for block in &blocks {
            writeln!(out, "{}", render(block))?;
        }
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}
