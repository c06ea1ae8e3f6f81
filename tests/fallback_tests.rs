use signbridge::services::translate::LocalFallbackTranslator;

fn glosses(g: &[&str]) -> Vec<String> {
    g.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_glosses_to_text_joins_and_capitalizes() {
    let fb = LocalFallbackTranslator;
    assert_eq!(fb.glosses_to_text(&glosses(&["HOLA", "MUNDO"])), "Hola mundo");
    assert_eq!(fb.glosses_to_text(&glosses(&["BUENOS_DIAS", "AMIGO"])), "Buenos dias amigo");
    assert_eq!(fb.glosses_to_text(&glosses(&["ÁRBOL"])), "Árbol");
    assert_eq!(fb.glosses_to_text(&[]), "");
}

#[test]
fn test_text_to_glosses_drops_stop_words_and_short_tokens() {
    let fb = LocalFallbackTranslator;
    assert_eq!(
        fb.text_to_glosses("¡Hola! ¿Cómo estás? Yo voy a la casa de mi mamá."),
        vec!["HOLA", "CÓMO", "ESTÁS", "YO", "VOY", "CASA", "MAMÁ"]
    );
}

#[test]
fn test_text_to_glosses_never_empty_for_non_empty_input() {
    let fb = LocalFallbackTranslator;
    assert_eq!(fb.text_to_glosses("y el a"), vec!["Y EL A"]);
    assert_eq!(fb.text_to_glosses("?"), vec!["?"]);
    assert!(fb.text_to_glosses("  ").is_empty());
}

#[test]
fn test_fallback_round_trip_recovers_glosses() {
    let fb = LocalFallbackTranslator;
    let text = fb.glosses_to_text(&glosses(&["HOLA", "COMO", "ESTAR"]));
    assert_eq!(text, "Hola como estar");

    let back = fb.text_to_glosses(&text);
    assert!(!back.is_empty());
    assert_eq!(back, vec!["HOLA", "ESTAR"]);
}
