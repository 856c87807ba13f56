//! Yes/no confirmation read from the same input stream as commands.

use std::io::Write;

use async_trait::async_trait;
use catalog_core::Confirm;
use tokio::io::{AsyncBufRead, Lines};
use tracing::warn;

pub struct LineConfirm<'a, R> {
    lines: &'a mut Lines<R>,
}

impl<'a, R> LineConfirm<'a, R> {
    pub fn new(lines: &'a mut Lines<R>) -> Self {
        Self { lines }
    }
}

#[async_trait]
impl<'a, R> Confirm for LineConfirm<'a, R>
where
    R: AsyncBufRead + Unpin + Send,
{
    /// Anything but an explicit yes, including end of input, declines.
    async fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [s/N] ");
        if let Err(err) = std::io::stdout().flush() {
            warn!(error = %err, "failed to flush confirmation prompt");
        }
        match self.lines.next_line().await {
            Ok(Some(answer)) => is_yes(&answer),
            _ => false,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "s" | "sim" | "y" | "yes")
}
