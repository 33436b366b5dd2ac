//! Interactive query loop.
//!
//! Reads one free-text query per iteration, embeds it through the protocol
//! client and reports the top-k index matches. Every per-iteration failure
//! (transport, encode, empty index, dimension mismatch) is printed and the
//! loop re-prompts; only `exit`, `quit` or end of input terminates it.

use std::io::{BufRead, Write};

use ctx_client::EmbeddingClient;
use ctx_embeddings::Embedding;
use ctx_index::{SearchResult, VectorIndex};

/// Identifier sent with query embedding requests.
const QUERY_IDENTIFIER: &str = "query";

/// Loop states; each iteration walks AwaitingInput -> Embedding -> Querying
/// -> Reporting and falls back to AwaitingInput on any error.
enum LoopState {
    AwaitingInput,
    Embedding { query: String },
    Querying { embedding: Embedding },
    Reporting { results: Vec<SearchResult> },
    Done,
}

/// Interactive loop over a populated index.
pub struct QueryLoop<'a> {
    client: &'a EmbeddingClient,
    index: &'a dyn VectorIndex,
    top_k: usize,
}

impl<'a> QueryLoop<'a> {
    pub fn new(client: &'a EmbeddingClient, index: &'a dyn VectorIndex, top_k: usize) -> Self {
        Self {
            client,
            index,
            top_k,
        }
    }

    /// Run until the user exits or input ends.
    pub async fn run<R, W>(&self, mut input: R, mut out: W) -> std::io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        let mut state = LoopState::AwaitingInput;

        loop {
            state = match state {
                LoopState::AwaitingInput => {
                    write!(out, "query> ")?;
                    out.flush()?;

                    let mut line = String::new();
                    if input.read_line(&mut line)? == 0 {
                        // End of input
                        LoopState::Done
                    } else {
                        match line.trim() {
                            "" => LoopState::AwaitingInput,
                            "exit" | "quit" => LoopState::Done,
                            query => LoopState::Embedding {
                                query: query.to_string(),
                            },
                        }
                    }
                }

                LoopState::Embedding { query } => {
                    match self.client.embed_text(QUERY_IDENTIFIER, &query).await {
                        Ok(values) => LoopState::Querying {
                            embedding: Embedding::new(values),
                        },
                        Err(err) => {
                            writeln!(out, "error: {}", err)?;
                            LoopState::AwaitingInput
                        }
                    }
                }

                LoopState::Querying { embedding } => {
                    match self.index.search(&embedding, self.top_k) {
                        Ok(results) => LoopState::Reporting { results },
                        Err(err) => {
                            writeln!(out, "error: {}", err)?;
                            LoopState::AwaitingInput
                        }
                    }
                }

                LoopState::Reporting { results } => {
                    for (rank, hit) in results.iter().enumerate() {
                        let preview = self
                            .index
                            .entry(hit.entry_id)
                            .map(|e| e.payload.preview(60))
                            .unwrap_or_default();
                        writeln!(
                            out,
                            "{:>2}. {:.4}  {}  {}",
                            rank + 1,
                            hit.score,
                            hit.identifier,
                            preview
                        )?;
                    }
                    LoopState::AwaitingInput
                }

                LoopState::Done => break,
            };
        }

        writeln!(out, "bye")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;
    use std::time::Duration;

    use ctx_index::FlatIndex;

    fn test_client() -> EmbeddingClient {
        // Discard port; only reached if a test actually embeds
        EmbeddingClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_exit_command_terminates() {
        let client = test_client();
        let index = FlatIndex::new();
        let looper = QueryLoop::new(&client, &index, 5);

        let mut out = Vec::new();
        looper
            .run(Cursor::new(b"exit\n".as_slice()), &mut out)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("query> "));
        assert!(printed.contains("bye"));
    }

    #[tokio::test]
    async fn test_eof_terminates() {
        let client = test_client();
        let index = FlatIndex::new();
        let looper = QueryLoop::new(&client, &index, 5);

        let mut out = Vec::new();
        looper
            .run(Cursor::new(b"".as_slice()), &mut out)
            .await
            .unwrap();
        assert!(String::from_utf8(out).unwrap().contains("bye"));
    }

    #[tokio::test]
    async fn test_blank_lines_reprompt() {
        let client = test_client();
        let index = FlatIndex::new();
        let looper = QueryLoop::new(&client, &index, 5);

        let mut out = Vec::new();
        looper
            .run(Cursor::new(b"\n\nquit\n".as_slice()), &mut out)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.matches("query> ").count(), 3);
    }

    #[tokio::test]
    async fn test_failed_embed_does_not_terminate_loop() {
        // Client points at a closed port, so embedding fails; the loop must
        // print the error and keep prompting until exit.
        let client = test_client();
        let index = FlatIndex::new();
        let looper = QueryLoop::new(&client, &index, 5);

        let mut out = Vec::new();
        looper
            .run(Cursor::new(b"anything\nexit\n".as_slice()), &mut out)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("error:"));
        assert!(printed.contains("bye"));
    }
}
