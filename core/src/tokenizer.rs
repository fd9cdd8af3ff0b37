use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // One pass, left to right: bracket spans first, then apostrophe words, then plain words.
    static ref TOKEN_RE: Regex =
        Regex::new(r"\[\[[^\[\]]+\]\]|[\p{L}\p{N}]+'[\p{L}\p{N}]+|[\p{L}\p{N}]+")
            .expect("valid regex");
    static ref WORD_RE: Regex =
        Regex::new(r"[\p{L}\p{N}]+'[\p{L}\p{N}]+|[\p{L}\p{N}]+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Terms and raw link targets extracted from one document.
///
/// Link targets keep their original casing so they can be resolved against
/// titles by exact match; terms are lowercased, stop-filtered, and stemmed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocTokens {
    pub terms: Vec<String>,
    pub links: Vec<String>,
}

/// Lowercase, split on non-word characters, drop stopwords, stem, append.
fn push_terms(fragment: &str, out: &mut Vec<String>) {
    for mat in WORD_RE.find_iter(fragment) {
        let word = mat.as_str().to_lowercase();
        if is_stopword(&word) {
            continue;
        }
        out.push(STEMMER.stem(&word).to_string());
    }
}

/// Classify the interior of a `[[...]]` span and fold its contributions in.
fn classify_span(content: &str, tokens: &mut DocTokens) {
    if let Some(bar) = content.find('|') {
        // Pipe link: target before the first `|` verbatim, display text indexed.
        tokens.links.push(content[..bar].to_string());
        push_terms(&content[bar + 1..], &mut tokens.terms);
    } else if content.contains(':') {
        // Namespaced link: the segment after the first `:` is the target,
        // but the whole span (namespace included) contributes terms.
        let mut segments = content.split(':');
        let _namespace = segments.next();
        if let Some(target) = segments.next() {
            tokens.links.push(target.to_string());
        }
        push_terms(content, &mut tokens.terms);
    } else {
        tokens.links.push(content.to_string());
        push_terms(content, &mut tokens.terms);
    }
}

/// Tokenize a document body plus its title into terms and link targets.
///
/// Title terms are appended after the body so titles count toward scoring.
pub fn tokenize_document(title: &str, text: &str) -> DocTokens {
    let normalized = text.nfkc().collect::<String>();
    let mut tokens = DocTokens::default();
    for mat in TOKEN_RE.find_iter(&normalized) {
        let tok = mat.as_str();
        match tok.strip_prefix("[[").and_then(|t| t.strip_suffix("]]")) {
            Some(inner) => classify_span(inner, &mut tokens),
            None => push_terms(tok, &mut tokens.terms),
        }
    }
    let title_normalized = title.nfkc().collect::<String>();
    push_terms(&title_normalized, &mut tokens.terms);
    tokens
}

/// Tokenize a free-text query with the same word pipeline as documents.
///
/// Queries carry no link markup, so only the word branch applies.
pub fn tokenize_query(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>();
    let mut terms = Vec::new();
    push_terms(&normalized, &mut terms);
    terms
}
