//! Calculator tool - the one arithmetic capability offered to the model

use super::{Tool, ToolOutput};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

/// Addition over two numeric operands
pub struct CalculatorTool;

#[derive(Debug, Deserialize)]
struct CalculatorInput {
    a: f64,
    b: f64,
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &'static str {
        "calculator"
    }

    fn description(&self) -> String {
        "Useful for performing basic arithmetic calculations with numbers".to_string()
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "required": ["a", "b"],
            "properties": {
                "a": {
                    "type": "number",
                    "description": "First operand"
                },
                "b": {
                    "type": "number",
                    "description": "Second operand"
                }
            }
        })
    }

    async fn run(&self, input: Value) -> ToolOutput {
        match serde_json::from_value::<CalculatorInput>(input) {
            Ok(CalculatorInput { a, b }) => {
                ToolOutput::success(format!("the sum of {a} and {b} is {}", a + b))
            }
            Err(e) => ToolOutput::error(format!("Invalid input: {e}")),
        }
    }
}
