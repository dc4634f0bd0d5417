/// Phrases that indicate possible self-harm risk.
const CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "suicidal",
    "kill myself",
    "end it all",
    "end my life",
    "want to die",
    "self-harm",
    "self harm",
    "hurt myself",
    "cut myself",
    "better off dead",
    "no reason to live",
];

pub const EMERGENCY_MESSAGE: &str = "It sounds like you may be going through something really painful, \
and you deserve support right now. If you are in immediate danger, please call your local emergency \
number. In the US you can call or text 988 to reach the Suicide & Crisis Lifeline, any time of day. \
Outside the US, findahelpline.com lists free, confidential services in your country. \
Please consider reaching out to someone you trust and letting them know how you feel.";

/// Returns the first crisis keyword found in the note, if any.
pub fn detect(note: &str) -> Option<&'static str> {
    let normalized = note
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    if normalized.is_empty() {
        return None;
    }
    CRISIS_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| normalized.contains(keyword))
}
