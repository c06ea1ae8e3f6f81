/// Common Spanish articles, prepositions, conjunctions and pronouns that
/// have no sign of their own.
pub const STOP_WORDS: &[&str] = &[
    "el", "la", "los", "las", "un", "una", "unos", "unas", "de", "del", "al", "a", "en", "por", "para", "con", "sin",
    "y", "o", "pero", "si", "no", "que", "como", "cuando", "me", "te", "se", "le", "lo", "mi", "tu", "su", "es", "son",
];

const PUNCTUATION: &[char] = &['¿', '?', '¡', '!', '.', ',', ';', ':'];

/// Deterministic text <-> gloss heuristics used when no remote backend
/// answers. Never fails, and never returns an empty result for non-empty
/// input.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFallbackTranslator;

impl LocalFallbackTranslator {
    /// `["HOLA", "MUNDO"]` -> `"Hola mundo"`. No grammar correction.
    pub fn glosses_to_text(&self, glosses: &[String]) -> String {
        let joined = glosses.join(" ").replace('_', " ").to_lowercase();
        capitalize_first(&joined)
    }

    pub fn text_to_glosses(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let cleaned: String = text.to_lowercase().chars().filter(|c| !PUNCTUATION.contains(c)).collect();
        let glosses: Vec<String> = cleaned
            .split_whitespace()
            .filter(|w| !STOP_WORDS.contains(w) && w.chars().count() > 1)
            .map(str::to_uppercase)
            .collect();

        if glosses.is_empty() {
            vec![text.to_uppercase()]
        } else {
            glosses
        }
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
