use crate::tokenizer::normalize;
use lazy_static::lazy_static;

lazy_static! {
    /// Fragments that mark catalog boilerplate (schedule, price, staff...).
    static ref METADATA_KEYWORDS: Vec<&'static str> = vec![
        "duracion","hora","horas","precio","nivel","fecha","inicio",
        "inscripcion","certificado","profesor","profesora","docente",
        "instructor","instructora","tutor","tutora","modalidad",
        "cupos","cupo","intensidad","horario",
    ];
}

/// True when the normalized text contains any metadata keyword.
///
/// Matching is by substring, not by whole word: "horario" and "ahora" both hit
/// "hora". Such false positives are accepted.
pub fn is_metadata(text: &str) -> bool {
    if text.is_empty() { return false; }
    let norm = normalize(text);
    METADATA_KEYWORDS.iter().any(|kw| norm.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_duration() {
        assert!(is_metadata("Duración: 40 horas"));
        assert!(is_metadata("MODALIDAD virtual"));
    }

    #[test]
    fn keeps_descriptive_text() {
        assert!(!is_metadata("Este curso aborda el cambio climático en profundidad"));
        assert!(!is_metadata(""));
    }
}
