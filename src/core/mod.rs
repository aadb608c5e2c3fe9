pub mod error;
pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod sentiment;
pub mod tts;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{ConfigError, ConfigResult, ServiceError, ServiceResult};
pub use types::{EmptyFeedback, Feedback, FeedbackResult, Sentiment};

pub use sentiment::{AzureTextAnalytics, SentimentAnalyzer};

pub use prompt::{DEFAULT_SYSTEM_PROMPT, FEEDBACK_PLACEHOLDER, PromptBuilder, PromptTemplates};

pub use llm::{AzureOpenAIChat, ResponseGenerator};

pub use tts::{
    AzureSpeechSynthesizer, SpeechSynthesizer, SynthesisOutcome, build_ssml, style_for_sentiment,
};

pub use pipeline::FeedbackPipeline;
