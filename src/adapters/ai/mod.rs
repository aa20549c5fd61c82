//! Model backend adapters.

mod mock_provider;
mod openai_provider;

pub use mock_provider::MockCompletionClient;
pub use openai_provider::{OpenAiCompletionClient, OpenAiConfig};
