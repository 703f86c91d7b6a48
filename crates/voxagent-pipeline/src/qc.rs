//! Heuristic quality scoring for finished synthesis tasks.
//!
//! All scores are placeholder heuristics over the input text, the output
//! byte size, and the duration estimate; nothing here measures the audio
//! itself. The assessment is deterministic for identical inputs and cannot
//! fail.

use chrono::Utc;
use voxagent_core::QualityReport;

/// Starting score for text suitability before penalties.
const TEXT_ACCURACY_CEILING: f64 = 95.0;
/// Starting score for audio plausibility before penalties.
const AUDIO_QUALITY_CEILING: f64 = 90.0;
/// Starting score for speaking-rate plausibility before penalties.
const VOICE_CONSISTENCY_CEILING: f64 = 88.0;

/// Texts shorter than this many characters are penalized.
const MIN_TEXT_CHARS: usize = 10;
/// Audio outputs smaller than this are flagged as implausible.
const MIN_AUDIO_BYTES: u64 = 1024;
/// Upper bound of the plausible speaking-rate band, words per minute.
const MAX_WORDS_PER_MINUTE: f64 = 200.0;
/// Lower bound of the plausible speaking-rate band, words per minute.
const MIN_WORDS_PER_MINUTE: f64 = 80.0;

/// Characters that suggest un-cleaned markup in the input text.
const MARKUP_CHARS: [char; 6] = ['<', '>', '{', '}', '[', ']'];

/// Produces a [`QualityReport`] for the given input text, output byte size
/// (`None` when the audio artifact is absent), and duration estimate.
///
/// Each penalty appends one issue and one recommendation; a closing
/// recommendation is chosen from the overall score band. Deterministic and
/// infallible.
pub fn assess(text: &str, audio_size: Option<u64>, duration: f64) -> QualityReport {
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();

    let mut text_accuracy = TEXT_ACCURACY_CEILING;
    if text.chars().count() < MIN_TEXT_CHARS {
        text_accuracy -= 10.0;
        issues.push("Text is very short, which may degrade speech quality".to_string());
        recommendations.push("Provide longer text for a more natural result".to_string());
    }
    if text.chars().any(|c| MARKUP_CHARS.contains(&c)) {
        text_accuracy -= 5.0;
        issues.push("Text contains markup-like special characters".to_string());
        recommendations.push("Strip special characters from the text before submitting".to_string());
    }

    let mut audio_quality = AUDIO_QUALITY_CEILING;
    match audio_size {
        None => {
            audio_quality = 0.0;
            issues.push("Audio output is missing".to_string());
            recommendations.push("Resubmit the task to regenerate the audio".to_string());
        }
        Some(size) if size < MIN_AUDIO_BYTES => {
            audio_quality -= 20.0;
            issues.push("Audio output is implausibly small; generation may have failed".to_string());
            recommendations.push("Verify the synthesis output before distributing it".to_string());
        }
        Some(_) => {}
    }

    let mut voice_consistency = VOICE_CONSISTENCY_CEILING;
    if duration > 0.0 {
        let words = text.split_whitespace().count() as f64;
        let words_per_minute = words / (duration / 60.0);
        if words_per_minute > MAX_WORDS_PER_MINUTE {
            voice_consistency -= 10.0;
            issues.push("Speaking rate is too fast and may hurt comprehension".to_string());
            recommendations.push("Adjust the voice settings to slow the speech down".to_string());
        } else if words_per_minute < MIN_WORDS_PER_MINUTE {
            voice_consistency -= 5.0;
            issues.push("Speaking rate is too slow and may sound unnatural".to_string());
            recommendations.push("Adjust the voice settings to speed the speech up".to_string());
        }
    }

    let score = (text_accuracy + audio_quality + voice_consistency) / 3.0;

    recommendations.push(
        if score >= 90.0 {
            "Speech quality is excellent; no adjustments needed"
        } else if score >= 80.0 {
            "Speech quality is good; minor tuning may help"
        } else if score >= 70.0 {
            "Speech quality is fair; consider revising the text or voice settings"
        } else {
            "Speech quality is poor; consider regenerating the task"
        }
        .to_string(),
    );

    QualityReport {
        score,
        audio_quality,
        text_accuracy,
        voice_consistency,
        issues,
        recommendations,
        generated_at: Utc::now(),
    }
}
