//! Function tools that answer with a `final_answer` envelope (LlamaIndex style).

use crate::toolkit::{ToolAdapter, Toolkit};
use crate::tools::ToolBinding;
use crate::types::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionToolMetadata {
    pub name: String,
    pub description: String,
    pub fn_schema: Value,
}

/// Envelope around the normalized tool text. The text itself is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalAnswer {
    pub final_answer: String,
}

#[derive(Debug, Clone)]
pub struct AnswerTool {
    binding: ToolBinding,
}

#[async_trait]
impl ToolAdapter for AnswerTool {
    type Definition = FunctionToolMetadata;
    type Output = FinalAnswer;

    fn from_binding(binding: ToolBinding) -> Self {
        Self { binding }
    }

    fn binding(&self) -> &ToolBinding {
        &self.binding
    }

    fn definition(&self) -> FunctionToolMetadata {
        FunctionToolMetadata {
            name: self.binding.name().to_string(),
            description: self.binding.description().to_string(),
            fn_schema: self.binding.input_schema(),
        }
    }

    async fn invoke(&self, args: Value) -> Result<FinalAnswer> {
        let final_answer = self.binding.execute(args).await?;
        Ok(FinalAnswer { final_answer })
    }
}

pub type AnswerToolkit = Toolkit<AnswerTool>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RemoteClient;
    use crate::tools::{Action, Category, Permissions};
    use serde_json::json;
    use std::sync::Arc;

    struct Replies;

    #[async_trait]
    impl RemoteClient for Replies {
        async fn run(&self, _method: &str, _args: Value) -> Result<Value> {
            Ok(json!([{"text": "thanks"}]))
        }
    }

    #[tokio::test]
    async fn test_final_answer_envelope() {
        let permissions = Permissions::new().allow(Category::Messaging, Action::Read);
        let toolkit: AnswerToolkit = Toolkit::with_client(Arc::new(Replies), &permissions);

        let answer = toolkit
            .dispatch("get_message_replies", json!({"message_id": "m-1"}))
            .await
            .unwrap();

        assert_eq!(answer.final_answer, r#"[{"text":"thanks"}]"#);
        assert_eq!(
            serde_json::to_value(&answer).unwrap(),
            json!({"final_answer": "[{\"text\":\"thanks\"}]"})
        );
    }

    #[test]
    fn test_metadata() {
        let permissions = Permissions::new().allow(Category::Messaging, Action::Read);
        let toolkit: AnswerToolkit = Toolkit::with_client(Arc::new(Replies), &permissions);
        let metadata = toolkit.definitions();

        assert_eq!(metadata[1].name, "get_message_replies");
        assert_eq!(metadata[1].fn_schema["type"], "object");
    }
}
