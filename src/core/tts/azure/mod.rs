//! Azure Speech text-to-speech over the REST API.

mod provider;
mod style;

pub use provider::{AZURE_TTS_OUTPUT_FORMAT, AzureSpeechSynthesizer, azure_tts_url};
pub use style::{build_ssml, escape_xml, style_for_sentiment};
