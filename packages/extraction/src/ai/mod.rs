//! Model-backed extraction: prompt plus the remote strategy.

pub mod prompt;
pub mod remote;

pub use prompt::EXTRACTION_SYSTEM_PROMPT;
pub use remote::{AiConfig, AiExtractor};
