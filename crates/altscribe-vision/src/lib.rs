//! Alt-text generation
//!
//! A [`DescriptionGenerator`] turns a signed image URL into a short French
//! alt-text sentence. The production implementation calls an Azure OpenAI
//! chat-completions deployment with a vision-capable model.

mod azure_openai;
mod generator;
pub mod prompts;

pub use azure_openai::{AzureOpenAiConfig, AzureOpenAiDescriber};
pub use generator::DescriptionGenerator;
