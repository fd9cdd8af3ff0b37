use wikidex_core::tokenizer::{tokenize_document, tokenize_query};

#[test]
fn it_normalizes_and_stems() {
    let terms = tokenize_query("Running Runners RUN! The café's menu.");
    // Stemming to "run" should appear
    assert!(terms.contains(&"run".to_string()));
    // Unicode normalization keeps café as one word
    assert!(terms.iter().any(|w| w.starts_with("caf")));
}

#[test]
fn it_filters_stopwords() {
    let terms = tokenize_query("The quick brown fox and the lazy dog");
    assert!(!terms.contains(&"the".to_string()));
    assert!(!terms.contains(&"and".to_string()));
    assert!(terms.contains(&"fox".to_string()));
}

#[test]
fn it_extracts_links_without_polluting_terms() {
    let toks = tokenize_document("Flooring", "The cat sat on [[Mat|a mat]].");
    assert_eq!(toks.links, vec!["Mat".to_string()]);
    for term in &toks.terms {
        assert_eq!(term, &term.to_lowercase());
    }
    assert!(toks.terms.contains(&"mat".to_string()));
    assert!(toks.terms.contains(&"floor".to_string()));
}

#[test]
fn it_scans_left_to_right_without_overlap() {
    let toks = tokenize_document("", "[[A B]] plain [[C:D]] words [[E|f g]]");
    assert_eq!(
        toks.links,
        vec!["A B".to_string(), "D".to_string(), "E".to_string()]
    );
}
