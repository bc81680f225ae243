//! Agent loop
//!
//! Repeatedly calls the model, executing requested tool calls and feeding
//! their results back, until the model answers with plain text. Each model
//! step yields one `Fragment` of assistant text on the returned stream.

use super::types::{Fragment, ModelRequest, ToolCallRequest, TranscriptMessage};
use super::{ChatModel, LlmError};
use crate::history::{Message, Role};
use crate::tools::{ToolOutput, ToolRegistry};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// Upper bound on model steps per run. A run that is still requesting
/// tools after this many steps fails instead of looping forever.
pub const MAX_AGENT_STEPS: usize = 25;

/// Stream of assistant text fragments from one run.
///
/// Fragments arrive in generation order. The stream is finite and cannot
/// be restarted; a failed run yields one final `Err` item.
pub type FragmentStream = ReceiverStream<Result<Fragment, LlmError>>;

/// Drives the model with the tool capability set until it stops calling
/// tools. One `ChatAgent` serves any number of sequential runs.
pub struct ChatAgent {
    model: Arc<dyn ChatModel>,
    tools: Arc<ToolRegistry>,
    temperature: f32,
}

impl ChatAgent {
    pub fn new(model: Arc<dyn ChatModel>, tools: Arc<ToolRegistry>, temperature: f32) -> Self {
        Self {
            model,
            tools,
            temperature,
        }
    }

    pub fn model_id(&self) -> String {
        self.model.model_id().to_string()
    }

    /// Start one run over the given history.
    ///
    /// The run proceeds on a spawned task; dropping the stream abandons it.
    pub fn run(&self, history: &[Message]) -> FragmentStream {
        let transcript = seed_transcript(history);
        let model = Arc::clone(&self.model);
        let tools = Arc::clone(&self.tools);
        let temperature = self.temperature;

        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move {
            if let Err(e) = drive(model, tools, temperature, transcript, &tx).await {
                let _ = tx.send(Err(e)).await;
            }
        });

        ReceiverStream::new(rx)
    }
}

async fn drive(
    model: Arc<dyn ChatModel>,
    tools: Arc<ToolRegistry>,
    temperature: f32,
    mut transcript: Vec<TranscriptMessage>,
    tx: &mpsc::Sender<Result<Fragment, LlmError>>,
) -> Result<(), LlmError> {
    for step in 0..MAX_AGENT_STEPS {
        let request = ModelRequest {
            messages: transcript.clone(),
            tools: tools.definitions(),
            temperature,
        };

        let reply = model.chat(&request).await?;

        // Receiver gone means the run was abandoned
        if tx.send(Ok(Fragment::new(reply.content.clone()))).await.is_err() {
            return Ok(());
        }

        if !reply.has_tool_calls() {
            return Ok(());
        }

        tracing::debug!(
            step,
            tool_calls = reply.tool_calls.len(),
            "Model requested tools"
        );

        transcript.push(TranscriptMessage::Assistant {
            content: reply.content,
            tool_calls: reply.tool_calls.clone(),
        });

        for call in &reply.tool_calls {
            transcript.push(execute_call(&tools, call).await);
        }
    }

    Err(LlmError::step_limit(format!(
        "Run exceeded {MAX_AGENT_STEPS} model steps without a final answer"
    )))
}

/// Run one tool call and fold the outcome into a transcript entry. Tool
/// failures and unknown tool names go back to the model as result text.
async fn execute_call(tools: &ToolRegistry, call: &ToolCallRequest) -> TranscriptMessage {
    let output = match tools.execute(&call.name, call.arguments.clone()).await {
        Some(output) => output,
        None => ToolOutput::error(format!("Unknown tool: {}", call.name)),
    };

    tracing::debug!(tool = %call.name, success = output.success, "Tool call finished");

    let content = if output.success {
        output.output
    } else {
        format!("Error: {}", output.output)
    };

    TranscriptMessage::tool(&call.name, content)
}

fn seed_transcript(history: &[Message]) -> Vec<TranscriptMessage> {
    history
        .iter()
        .map(|m| match m.role {
            Role::User => TranscriptMessage::user(&m.content),
            Role::Assistant => TranscriptMessage::assistant(&m.content),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::testing::MockChatModel;
    use super::super::{LlmErrorKind, ModelReply};
    use super::*;
    use serde_json::json;
    use tokio_stream::StreamExt;

    fn test_agent(model: Arc<MockChatModel>) -> ChatAgent {
        ChatAgent::new(model, Arc::new(ToolRegistry::standard()), 0.0)
    }

    async fn collect(mut stream: FragmentStream) -> Vec<Result<Fragment, LlmError>> {
        let mut items = Vec::new();
        while let Some(item) = stream.next().await {
            items.push(item);
        }
        items
    }

    #[tokio::test]
    async fn test_single_step_run_yields_one_fragment() {
        let mock = Arc::new(MockChatModel::new());
        mock.queue_reply(ModelReply::text("Hello there"));

        let items = collect(test_agent(mock).run(&[Message::user("hi")])).await;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].as_ref().unwrap().text, "Hello there");
    }

    #[tokio::test]
    async fn test_history_seeds_the_transcript() {
        let mock = Arc::new(MockChatModel::new());
        mock.queue_reply(ModelReply::text("sure"));

        let history = vec![
            Message::user("first question"),
            Message::assistant("first answer"),
            Message::user("second question"),
        ];
        collect(test_agent(mock.clone()).run(&history)).await;

        let requests = mock.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].messages,
            vec![
                TranscriptMessage::user("first question"),
                TranscriptMessage::assistant("first answer"),
                TranscriptMessage::user("second question"),
            ]
        );
        assert_eq!(requests[0].tools.len(), 1);
        assert_eq!(requests[0].tools[0].name, "calculator");
    }

    #[tokio::test]
    async fn test_tool_result_feeds_back_into_next_step() {
        let mock = Arc::new(MockChatModel::new());
        mock.queue_reply(ModelReply::tool_call("calculator", json!({"a": 5, "b": 3})));
        mock.queue_reply(ModelReply::text("The sum is 8."));

        let items = collect(test_agent(mock.clone()).run(&[Message::user("What's 5 + 3?")])).await;

        let texts: Vec<_> = items.into_iter().map(|item| item.unwrap().text).collect();
        assert_eq!(texts, vec![String::new(), "The sum is 8.".to_string()]);

        let requests = mock.recorded_requests();
        assert_eq!(requests.len(), 2);
        let last = requests[1].messages.last().unwrap();
        assert_eq!(
            *last,
            TranscriptMessage::tool("calculator", "the sum of 5 and 3 is 8")
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_reported_to_the_model() {
        let mock = Arc::new(MockChatModel::new());
        mock.queue_reply(ModelReply::tool_call("weather", json!({"city": "Oslo"})));
        mock.queue_reply(ModelReply::text("I can only do arithmetic."));

        let items = collect(test_agent(mock.clone()).run(&[Message::user("forecast?")])).await;
        assert!(items.iter().all(Result::is_ok));

        let requests = mock.recorded_requests();
        let last = requests[1].messages.last().unwrap();
        assert_eq!(
            *last,
            TranscriptMessage::tool("weather", "Error: Unknown tool: weather")
        );
    }

    #[tokio::test]
    async fn test_bad_tool_arguments_are_reported_to_the_model() {
        let mock = Arc::new(MockChatModel::new());
        mock.queue_reply(ModelReply::tool_call("calculator", json!({"a": "five"})));
        mock.queue_reply(ModelReply::text("Let me try again."));

        let items =
            collect(test_agent(mock.clone()).run(&[Message::user("add five and three")])).await;
        assert!(items.iter().all(Result::is_ok));

        let requests = mock.recorded_requests();
        let last = requests[1].messages.last().unwrap();
        match last {
            TranscriptMessage::Tool { name, content } => {
                assert_eq!(name, "calculator");
                assert!(content.starts_with("Error: Invalid input:"));
            }
            other => panic!("expected tool message, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_model_error_ends_the_stream_with_err() {
        let mock = Arc::new(MockChatModel::new());
        mock.queue_error(LlmError::endpoint_unreachable("connection refused"));

        let items = collect(test_agent(mock).run(&[Message::user("hi")])).await;

        assert_eq!(items.len(), 1);
        let err = items.into_iter().next().unwrap().unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::EndpointUnreachable);
    }

    #[tokio::test]
    async fn test_step_cap_fails_a_runaway_run() {
        let mock = Arc::new(MockChatModel::new());
        for _ in 0..MAX_AGENT_STEPS {
            mock.queue_reply(ModelReply::tool_call("calculator", json!({"a": 1, "b": 1})));
        }

        let items = collect(test_agent(mock).run(&[Message::user("loop")])).await;

        assert_eq!(items.len(), MAX_AGENT_STEPS + 1);
        let err = items.last().unwrap().as_ref().unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::StepLimit);
    }
}
