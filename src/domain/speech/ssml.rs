use super::dto::TextSegment;

/// Document-level default locale for the synthesis envelope.
const DOCUMENT_LOCALE: &str = "en-IN";

/// Fixed pause inserted between consecutive sentences.
const SENTENCE_BREAK: &str = "<break time='350ms'/>";

/// Split text into sentences on trailing punctuation.
///
/// Newlines are normalized to spaces first. A sentence boundary is a run of
/// terminal punctuation (including the CJK full-width forms) followed by
/// whitespace; the punctuation stays attached to its sentence. Empty
/// fragments are discarded after trimming.
pub fn split_sentences(text: &str) -> Vec<String> {
    let normalized = text.replace('\n', " ");

    let boundary = regex::Regex::new(r"[.!?。！？]+\s+").unwrap();
    let mut sentences = Vec::new();
    let mut last_end = 0;

    for mat in boundary.find_iter(&normalized) {
        let sentence = normalized[last_end..mat.end()].trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        last_end = mat.end();
    }

    if last_end < normalized.len() {
        let tail = normalized[last_end..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }
    }

    sentences
}

/// Assemble the per-sentence decisions into one SSML document.
///
/// Each segment becomes a voice-scoped expressive block wrapping a prosody
/// block wrapping the sentence text, with a 350ms break between consecutive
/// sentences. When no segments survived splitting, the raw text is emitted
/// unstyled inside the envelope so the document is never empty.
pub fn compose(raw_text: &str, segments: &[TextSegment], role: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for (idx, segment) in segments.iter().enumerate() {
        parts.push(format!(
            "<voice name='{}' xml:lang='{}'>\
             <mstts:express-as style='{}' styledegree='{}' role='{}'>\
             <prosody rate='{}%' pitch='{:+.1}st'>{}</prosody>\
             </mstts:express-as>\
             </voice>",
            segment.voice_id,
            segment.locale,
            segment.style,
            segment.style_degree,
            role,
            segment.rate_percent,
            segment.pitch_semitones,
            segment.text,
        ));

        if idx < segments.len() - 1 {
            parts.push(SENTENCE_BREAK.to_string());
        }
    }

    let inner = if parts.is_empty() {
        raw_text.to_string()
    } else {
        parts.concat()
    };

    format!(
        "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' \
         xmlns:mstts='http://www.w3.org/2001/mstts' xml:lang='{DOCUMENT_LOCALE}'>{inner}</speak>"
    )
}
