use catalog_core::{build_index, compare, cosine, search, CatalogError, CourseCorpus, CourseRecord};

fn course(id: &str, title: &str, description: &str, url: &str) -> CourseRecord {
    CourseRecord { id: id.into(), title: title.into(), description: description.into(), url: url.into() }
}

fn sample_corpus() -> CourseCorpus {
    vec![
        course("c1", "Cambio Climático", "Curso sobre desastres y clima", "u1"),
        course("c2", "Huella de Carbono", "Sector construcción y emisiones", "u2"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn ranks_matching_course_and_drops_zero_scores() {
    let hits = search(&["clima", "desastres"], &sample_corpus(), 5);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].course_id, "c1");
    assert_eq!(hits[0].url, "u1");
    assert!(hits[0].score > 0.0);
}

#[test]
fn cosine_is_symmetric_and_bounded() {
    let pairs = [
        ("clima clima desastres", "desastres naturales y clima"),
        ("Fotografía y arte", "arte arte arte"),
        ("gatos perros", "autos motos"),
    ];
    for (a, b) in pairs {
        let ab = cosine(a, b);
        assert_eq!(ab, cosine(b, a));
        assert!((0.0..=1.0).contains(&ab));
    }
    assert_eq!(cosine("gatos perros", "autos motos"), 0.0);
    assert_eq!(cosine("cambio climatico", "cambio climatico"), 1.0);
    assert_eq!(cosine("Cambio Climático", "cambio climatico"), 1.0);
}

#[test]
fn repeated_words_weigh_more() {
    let once = cosine("clima", "clima desastres");
    let twice = cosine("clima", "clima clima desastres");
    assert!(twice > once);
    assert!((once - 1.0 / 2f64.sqrt()).abs() < 1e-12);
}

#[test]
fn results_are_bounded_sorted_and_positive() {
    let corpus: CourseCorpus = vec![
        course("a", "Arte", "arte moderno", "ua"),
        course("b", "Fotografía", "arte y luz", "ub"),
        course("c", "Arte digital", "fotografía arte", "uc"),
        course("d", "Contabilidad", "finanzas", "ud"),
        course("e", "Historia del arte", "", "ue"),
    ]
    .into_iter()
    .collect();
    for k in 0..6 {
        let hits = search(&["arte", "fotografia"], &corpus, k);
        assert!(hits.len() <= k);
        assert!(hits.iter().all(|h| h.score > 0.0));
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(hits.iter().all(|h| h.course_id != "d"));
    }
    assert_eq!(search(&["arte", "fotografia"], &corpus, 10).len(), 4);
}

#[test]
fn empty_description_is_valid() {
    let corpus: CourseCorpus = vec![course("x", "", "", "ux")].into_iter().collect();
    assert!(search(&["arte"], &corpus, 3).is_empty());
    assert_eq!(build_index(&corpus).num_terms(), 0);
}

#[test]
fn compare_looks_up_both_courses() {
    let corpus = sample_corpus();
    assert_eq!(compare(&corpus, "c1", "c2").unwrap(), 0.0);
    assert_eq!(compare(&corpus, "c1", "c1").unwrap(), 1.0);
    match compare(&corpus, "c1", "nope") {
        Err(CatalogError::UnknownCourse(id)) => assert_eq!(id, "nope"),
        other => panic!("expected lookup error, got {other:?}"),
    }
}

#[test]
fn index_only_lists_courses_containing_the_word() {
    let corpus = sample_corpus();
    let index = build_index(&corpus);
    for (word, course_id) in index.pairs() {
        let text = corpus.get(course_id).unwrap().full_text();
        assert!(catalog_core::tokenizer::tokenize(&text).any(|w| w == word));
    }
}
