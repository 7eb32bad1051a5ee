//! Newline-delimited JSON-RPC transport over stdin/stdout.
//!
//! One request is processed at a time; handler bodies may await network or
//! file I/O but invocations never overlap. Log output goes to stderr so
//! stdout carries only protocol frames.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::error::{Error, Result};
use crate::server::Server;

impl Server {
    /// Serve requests over stdio until stdin reaches EOF.
    pub async fn run_stdio(&self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        tracing::info!(server = %self.info().name, "serving MCP over stdio");

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| Error::Transport(format!("failed to read stdin: {e}")))?
        {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_message(line).await {
                let mut frame = serde_json::to_vec(&response)?;
                frame.push(b'\n');
                stdout
                    .write_all(&frame)
                    .await
                    .map_err(|e| Error::Transport(format!("failed to write stdout: {e}")))?;
                stdout
                    .flush()
                    .await
                    .map_err(|e| Error::Transport(format!("failed to flush stdout: {e}")))?;
            }
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }
}
