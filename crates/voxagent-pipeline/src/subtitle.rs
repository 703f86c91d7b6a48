//! Caption cue timing and WebVTT rendering.
//!
//! Cues are derived from the input text and the estimated duration alone;
//! nothing here inspects the audio. Timing is therefore as good as the
//! duration estimate the pipeline feeds in.

/// Target wall-clock span of a single caption cue, in seconds.
pub const CHUNK_SECONDS: f64 = 3.0;

/// A single caption cue: a span of the timeline and the text shown in it.
///
/// Ephemeral; cues exist only while rendering the subtitle artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleCue {
    /// Start offset in seconds from the beginning of the audio.
    pub start: f64,
    /// End offset in seconds; always greater than `start`.
    pub end: f64,
    /// The tokens shown during this span, space-joined.
    pub text: String,
}

/// Splits `text` into cues covering `[0, duration]`.
///
/// Whitespace-delimited tokens are grouped greedily into chunks sized to
/// approximate [`CHUNK_SECONDS`] of speech, using tokens-per-second =
/// token count / duration. The final cue's end is clamped to `duration`;
/// once the timeline is exhausted, remaining tokens are folded into the
/// last cue so every cue keeps `end > start`. A duration ≤ 0 disables
/// clamping and treats tokens-per-second as 1.
///
/// The returned cues have strictly increasing start times, no gaps and no
/// overlaps, and concatenating their texts reconstructs the original token
/// sequence.
pub fn build_cues(text: &str, duration: f64) -> Vec<SubtitleCue> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    let words_per_second = if duration > 0.0 {
        words.len() as f64 / duration
    } else {
        1.0
    };
    let words_per_chunk = ((words_per_second * CHUNK_SECONDS) as usize).max(1);

    let mut cues: Vec<SubtitleCue> = Vec::new();
    let mut current = 0.0_f64;

    for chunk in words.chunks(words_per_chunk) {
        let chunk_text = chunk.join(" ");

        if duration > 0.0 && current >= duration {
            if let Some(last) = cues.last_mut() {
                last.text.push(' ');
                last.text.push_str(&chunk_text);
                continue;
            }
        }

        let mut end = current + CHUNK_SECONDS;
        if duration > 0.0 && end > duration {
            end = duration;
        }

        cues.push(SubtitleCue {
            start: current,
            end,
            text: chunk_text,
        });
        current = end;
    }

    cues
}

/// Renders cues as a WebVTT track: the `WEBVTT` header followed by
/// `HH:MM:SS.mmm --> HH:MM:SS.mmm` / text / blank-line blocks.
pub fn render_vtt(cues: &[SubtitleCue]) -> String {
    let mut out = String::from("WEBVTT\n\n");
    for cue in cues {
        out.push_str(&format!(
            "{} --> {}\n{}\n\n",
            format_timestamp(cue.start),
            format_timestamp(cue.end),
            cue.text
        ));
    }
    out
}

/// Formats an offset in seconds as `HH:MM:SS.mmm`, zero-padded with
/// three-decimal seconds.
pub fn format_timestamp(seconds: f64) -> String {
    let hours = (seconds / 3600.0) as u64;
    let minutes = ((seconds % 3600.0) / 60.0) as u64;
    let secs = seconds % 60.0;
    format!("{hours:02}:{minutes:02}:{secs:06.3}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_world_single_cue() {
        let cues = build_cues("Hello world", 1.1);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start, 0.0);
        assert!((cues[0].end - 1.1).abs() < 1e-9);
        assert_eq!(cues[0].text, "Hello world");
    }

    #[test]
    fn test_hello_world_vtt_rendering() {
        let vtt = render_vtt(&build_cues("Hello world", 1.1));
        assert_eq!(
            vtt,
            "WEBVTT\n\n00:00:00.000 --> 00:00:01.100\nHello world\n\n"
        );
    }

    #[test]
    fn test_empty_text_yields_no_cues() {
        assert!(build_cues("", 5.0).is_empty());
        assert!(build_cues("   \n\t ", 5.0).is_empty());
    }

    #[test]
    fn test_cues_are_contiguous_and_ordered() {
        let text = "one two three four five six seven eight nine ten";
        let cues = build_cues(text, 12.0);
        assert!(cues.len() > 1);
        for pair in cues.windows(2) {
            assert!(pair[1].start > pair[0].start);
            assert_eq!(pair[1].start, pair[0].end);
        }
        for cue in &cues {
            assert!(cue.end > cue.start);
        }
    }

    #[test]
    fn test_final_end_clamped_to_duration() {
        let text = "a b c d e f g h i j";
        let duration = 9.0;
        let cues = build_cues(text, duration);
        let last = cues.last().unwrap();
        assert!((last.end - duration).abs() < 1e-9);
        for cue in &cues {
            assert!(cue.end <= duration + 1e-9);
        }
    }

    #[test]
    fn test_token_sequence_reconstructs() {
        let text = "the quick brown fox jumps over the lazy dog again and again";
        let cues = build_cues(text, 7.0);
        let joined = cues
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let expected = text.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(joined, expected);
    }

    #[test]
    fn test_overflow_tokens_fold_into_last_cue() {
        // 10 tokens over 9 seconds: the fourth chunk would start at the
        // clamped end of the timeline and must merge into the third cue.
        let text = "a b c d e f g h i j";
        let cues = build_cues(text, 9.0);
        assert_eq!(cues.len(), 3);
        assert_eq!(cues[2].text, "g h i j");
    }

    #[test]
    fn test_zero_duration_does_not_divide_by_zero() {
        let cues = build_cues("alpha beta gamma delta", 0.0);
        assert!(!cues.is_empty());
        for cue in &cues {
            assert!(cue.end > cue.start);
        }
    }

    #[test]
    fn test_timestamp_formatting() {
        assert_eq!(format_timestamp(0.0), "00:00:00.000");
        assert_eq!(format_timestamp(1.1), "00:00:01.100");
        assert_eq!(format_timestamp(61.25), "00:01:01.250");
        assert_eq!(format_timestamp(3661.5), "01:01:01.500");
    }
}
