use regex::RegexBuilder;

pub const VOICEOVER_MARKER: &str = "Voiceover Script:";
pub const NARRATION_PLACEHOLDER: &str = "No voiceover script generated. Please try again.";

/// Split `text` at the first case-insensitive occurrence of `marker`.
///
/// Returns the trimmed text before the marker and, if the marker was present,
/// the trimmed text after it.
pub fn split_on_marker(text: &str, marker: &str) -> (String, Option<String>) {
    let Ok(re) = RegexBuilder::new(&regex::escape(marker))
        .case_insensitive(true)
        .build()
    else {
        return (text.trim().to_string(), None);
    };
    match re.find(text) {
        Some(m) => (
            text[..m.start()].trim().to_string(),
            Some(text[m.end()..].trim().to_string()),
        ),
        None => (text.trim().to_string(), None),
    }
}

/// The final pipeline stage answers with an animation script followed by a
/// narration section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSections {
    pub script: String,
    pub narration: String,
    pub narration_found: bool,
}

impl ScriptSections {
    pub fn from_generated(text: &str) -> Self {
        match split_on_marker(text, VOICEOVER_MARKER) {
            (script, Some(narration)) => Self {
                script,
                narration,
                narration_found: true,
            },
            (script, None) => Self {
                script,
                narration: NARRATION_PLACEHOLDER.to_string(),
                narration_found: false,
            },
        }
    }
}
