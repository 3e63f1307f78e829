//! Interactive yes/no confirmation.
//!
//! The helper only reports the answer. Deciding to abort (and printing
//! [`ABORT_MESSAGE`]) is left to the caller.

use thiserror::Error;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub const ABORT_MESSAGE: &str = "Operation aborted by the user.";

const AFFIRMATIVE: &str = "yes";

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Accepted,
    Declined,
}

impl Confirmation {
    pub fn is_accepted(self) -> bool {
        self == Confirmation::Accepted
    }

    fn from_answer(answer: &str) -> Self {
        if answer.trim().to_lowercase() == AFFIRMATIVE {
            Confirmation::Accepted
        } else {
            Confirmation::Declined
        }
    }
}

/// Asks `question` on stdout and reads the answer from stdin.
pub async fn confirm(question: &str) -> Result<Confirmation, PromptError> {
    confirm_with(BufReader::new(io::stdin()), io::stdout(), question).await
}

/// Writes the question to `output`, then reads a single line from `input`.
/// End of input is treated as a decline.
pub async fn confirm_with<R, W>(
    mut input: R,
    mut output: W,
    question: &str,
) -> Result<Confirmation, PromptError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output
        .write_all(format!("\n{question} ({AFFIRMATIVE}|no) ").as_bytes())
        .await?;
    output.flush().await?;

    let mut answer = String::new();
    input.read_line(&mut answer).await?;
    Ok(Confirmation::from_answer(&answer))
}
