use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?i)[a-záéíóúüñ0-9_]+").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "el","la","de","que","y","a","en","un","es","se","no",
            "lo","le","da","su","por","son","con","para","al","del",
            "las","una","curso","cursos","programa","programas",
            "estudiante","estudiantes","profesional","profesionales",
            "universidad","educacion","virtual","javeriana","formacion",
            "aprendizaje","conocimiento","habilidades","competencias",
            "area","nivel","duracion","horas","precio","fecha","inicio",
            "inscripcion","certificado","pontificia","continua"
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Fold a token to its comparable form: lowercase, canonical decomposition with
/// combining marks dropped, surrounding whitespace trimmed.
pub fn normalize(token: &str) -> String {
    if token.is_empty() { return String::new(); }
    let folded: String = token
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    folded.trim().to_string()
}

/// Scan text into normalized content words, in text order.
///
/// Runs of letters, digits and underscores are matched; single characters,
/// stop-words and tokens that normalize to nothing are skipped. Repeated words
/// are yielded once per occurrence. The iterator is lazy; call again to restart.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    RE.find_iter(text).filter_map(|mat| {
        let raw = mat.as_str();
        if raw.chars().count() <= 1 { return None; }
        let word = normalize(raw);
        if word.is_empty() || is_stopword(&word) { return None; }
        Some(word)
    })
}
