//! Feedback pipeline.
//!
//! Runs the four steps for one submission strictly in order:
//!
//! 1. classify the feedback sentiment
//! 2. build the prompt for that sentiment
//! 3. generate the reply
//! 4. synthesize the reply with the sentiment's speaking style
//!
//! The first failing step aborts the run and its error is returned unchanged.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::core::error::ServiceResult;
use crate::core::llm::ResponseGenerator;
use crate::core::prompt::PromptBuilder;
use crate::core::sentiment::SentimentAnalyzer;
use crate::core::tts::SpeechSynthesizer;
use crate::core::types::{Feedback, FeedbackResult};

/// Composes the classifier, prompt builder, generator and synthesizer.
///
/// Holds no per-request state; one instance serves all requests concurrently.
#[derive(Clone)]
pub struct FeedbackPipeline {
    analyzer: Arc<dyn SentimentAnalyzer>,
    prompts: Arc<PromptBuilder>,
    generator: Arc<dyn ResponseGenerator>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl FeedbackPipeline {
    pub fn new(
        analyzer: Arc<dyn SentimentAnalyzer>,
        prompts: Arc<PromptBuilder>,
        generator: Arc<dyn ResponseGenerator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            analyzer,
            prompts,
            generator,
            synthesizer,
        }
    }

    #[instrument(skip_all, fields(chars = feedback.text().len()))]
    pub async fn process(&self, feedback: &Feedback) -> ServiceResult<FeedbackResult> {
        let text = feedback.text();

        let sentiment = self.analyzer.analyze(text).await?;
        info!(%sentiment, "Feedback classified");

        let prompt = self.prompts.build(sentiment, text);
        let response = self
            .generator
            .generate(self.prompts.system_prompt(), &prompt)
            .await?;

        let audio = self.synthesizer.synthesize(&response, sentiment).await?;

        Ok(FeedbackResult {
            feedback: text.to_string(),
            sentiment,
            response,
            audio,
        })
    }
}
