//! Interactive terminal chat with the HR assistant
//!
//! Reads questions from stdin and prints finalized responses. Shares the
//! turn processor with the HTTP server, so both surfaces behave the same.

use hrchat::history::SessionHistory;
use hrchat::llm::{ChatAgent, LlmConfig, LoggingModel, OllamaService};
use hrchat::tools::ToolRegistry;
use hrchat::turn::{TurnError, TurnProcessor};
use std::io::Write;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct ChatRepl {
    processor: TurnProcessor,
    history: SessionHistory,
}

impl ChatRepl {
    fn new(processor: TurnProcessor) -> Self {
        Self {
            processor,
            history: SessionHistory::new(),
        }
    }

    async fn run(&mut self) -> std::io::Result<()> {
        self.print_welcome();

        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!("Bye!");
                break;
            };
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            if line.starts_with('/') {
                if self.handle_command(line) {
                    break;
                }
                continue;
            }

            self.process_question(line).await;
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("HR Assistant ({})", self.processor.model_id());
        println!("Ask anything about HR policies. Type /help for commands.");
        println!();
    }

    /// Handle slash commands. Returns true if the REPL should exit.
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /reset           - Clear the conversation");
                println!("  /quit, /exit, /q - Exit");
                println!();
                false
            }
            "/reset" => {
                self.history.clear();
                println!("Conversation cleared.");
                false
            }
            _ => {
                println!("Unknown command: {cmd}");
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_question(&mut self, question: &str) {
        match self.processor.process(&mut self.history, question).await {
            Ok(response) => {
                println!("{response}");
                println!();
            }
            Err(TurnError::EmptyInput) => {}
            Err(TurnError::Generation(e)) => {
                eprintln!("Error: {e}");
                if let Some(hint) = e.kind.hint() {
                    eprintln!("  hint: {hint}");
                }
                eprintln!();
            }
            Err(e) => {
                eprintln!("Error: {e}");
                eprintln!();
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hrchat=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = LlmConfig::from_env();
    let model = Arc::new(LoggingModel::new(Arc::new(OllamaService::new(&config))));
    let agent = ChatAgent::new(model, Arc::new(ToolRegistry::standard()), config.temperature);

    let mut repl = ChatRepl::new(TurnProcessor::new(agent));
    repl.run().await?;

    Ok(())
}
