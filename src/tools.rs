//! Tool implementations
//!
//! The capability set offered to the model. Tools are stateless singletons;
//! each call gets its arguments as a JSON object and returns plain text.

mod calculator;

pub use calculator::CalculatorTool;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::llm::ToolDefinition;

/// Result from tool execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub output: String,
}

impl ToolOutput {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output: message.into(),
        }
    }
}

/// Trait for tools the model can invoke mid-turn
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name
    fn name(&self) -> &str;

    /// Tool description for the model
    fn description(&self) -> String;

    /// JSON schema for tool input
    fn input_schema(&self) -> Value;

    /// Execute the tool. Failures are reported through `ToolOutput`, never
    /// by aborting the turn.
    async fn run(&self, input: Value) -> ToolOutput;
}

/// Collection of tools available to a session
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create the standard tool registry
    pub fn standard() -> Self {
        Self {
            tools: vec![Arc::new(CalculatorTool)],
        }
    }

    /// Create a registry with no tools
    pub fn empty() -> Self {
        Self { tools: Vec::new() }
    }

    /// Get all tool definitions for the model
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description(),
                parameters: t.input_schema(),
            })
            .collect()
    }

    /// Execute a tool by name. `None` means no such tool is registered.
    pub async fn execute(&self, name: &str, input: Value) -> Option<ToolOutput> {
        for tool in &self.tools {
            if tool.name() == name {
                return Some(tool.run(input).await);
            }
        }
        None
    }
}
