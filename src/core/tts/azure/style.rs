//! Sentiment to Azure `mstts:express-as` style mapping and SSML rendering.
//!
//! ```xml
//! <speak version="1.0" xmlns="http://www.w3.org/2001/10/synthesis"
//!        xmlns:mstts="https://www.w3.org/2001/mstts" xml:lang="en-US">
//!   <voice name="en-US-AriaNeural">
//!     <mstts:express-as style="excited">Thank you!</mstts:express-as>
//!   </voice>
//! </speak>
//! ```
//!
//! Style support varies by voice. `en-US-AriaNeural` supports both `excited`
//! and `empathetic`; voices without a style fall back to their neutral delivery.

use crate::core::types::Sentiment;

/// Maps a sentiment to its express-as style name.
pub const fn style_for_sentiment(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "excited",
        Sentiment::Negative => "empathetic",
        Sentiment::Neutral => "default",
    }
}

/// Escape XML special characters in text
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the SSML document for one utterance.
///
/// `text` is escaped here; `voice` and `style` come from configuration and
/// the style table.
pub fn build_ssml(voice: &str, style: &str, text: &str) -> String {
    format!(
        "<speak version=\"1.0\" xmlns=\"http://www.w3.org/2001/10/synthesis\" \
         xmlns:mstts=\"https://www.w3.org/2001/mstts\" xml:lang=\"en-US\">\
         <voice name=\"{}\">\
         <mstts:express-as style=\"{}\">{}</mstts:express-as>\
         </voice></speak>",
        escape_xml(voice),
        escape_xml(style),
        escape_xml(text)
    )
}
