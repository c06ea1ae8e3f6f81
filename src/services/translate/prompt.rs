//! Prompts for Peruvian Sign Language (LSP) glosses and parsing of the
//! model replies.

pub fn glosses_to_text_prompt(glosses: &[String]) -> String {
    format!(
        "Convierte estas glosas de Lengua de Señas Peruana (LSP) a español natural.

REGLAS LSP:
1. Letras individuales (A, B, C, etc.) = deletreo de nombres propios
2. Verbos están en infinitivo: QUERER, IR, TENER, SER, etc.
3. Sustantivos en singular: CASA, PERRO, LIBRO
4. Sin artículos: \"LA CASA\" se escribe solo \"CASA\"

Glosas: {}

Responde SOLO la traducción en español natural, sin explicaciones:",
        glosses.join(" ")
    )
}

pub fn text_to_glosses_prompt(text: &str) -> String {
    format!(
        "Convierte este texto en español a glosas de Lengua de Señas Peruana (LSP).

REGLAS:
1. Verbos en INFINITIVO y MAYÚSCULAS: \"quiero\" → QUERER, \"tengo\" → TENER
2. Sustantivos en SINGULAR: \"casas\" → CASA
3. SIN artículos (el, la, los, las, un, una)
4. SIN preposiciones innecesarias (de, del, a, en)
5. Nombres propios DELETREAR: \"Leo\" → L E O
6. Orden puede cambiar para claridad gestual

Texto: {}

Responde SOLO las glosas separadas por espacios, en MAYÚSCULAS:",
        text.trim()
    )
}

/// Non-empty trimmed reply, or None.
pub fn parse_text(reply: &str) -> Option<String> {
    let text = reply.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Whitespace-separated tokens, upper-cased. None if there are none.
pub fn parse_glosses(reply: &str) -> Option<Vec<String>> {
    let glosses: Vec<String> = reply.split_whitespace().map(str::to_uppercase).collect();
    (!glosses.is_empty()).then_some(glosses)
}
