use snaptext_translator::Translator;
use snaptext_types::TextSource;

use crate::error::EngineError;
use crate::sink::TextSink;

/// Placed between the original text and its translation
pub const TRANSLATION_SEPARATOR: &str = "\n------\n\n";

/// Translate everything in `sink` and show it below the original.
///
/// Returns the combined text.
pub async fn translate_sink(
    translator: &dyn Translator,
    sink: &dyn TextSink,
    from: &str,
    to: &str,
) -> Result<String, EngineError> {
    let original = sink.contents().await;

    let translation = translator
        .translate(&original, from.to_string(), to.to_string())
        .await?;
    tracing::debug!(
        "Translated {} -> {} via {}",
        translation.from,
        translation.to,
        translation.provider
    );

    let combined = format!("{original}{TRANSLATION_SEPARATOR}{}", translation.text);
    sink.publish(combined.clone(), TextSource::Translation).await;
    Ok(combined)
}
