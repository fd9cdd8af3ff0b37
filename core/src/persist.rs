use anyhow::{anyhow, bail, Context, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::index::{DocStats, Index, Postings};
use crate::DocId;

// Three flat text artifacts, tab-delimited, ids ascending and terms in
// lexicographic order. The same index always serializes to the same bytes.
//
//   titles:    id \t title
//   doc stats: id \t max_freq \t rank
//   words:     term \t id:freq \t id:freq ...

fn dump_titles(w: &mut impl Write, titles: &BTreeMap<DocId, String>) -> io::Result<()> {
    for (id, title) in titles {
        writeln!(w, "{id}\t{title}")?;
    }
    Ok(())
}

fn dump_stats(w: &mut impl Write, stats: &BTreeMap<DocId, DocStats>) -> io::Result<()> {
    for (id, s) in stats {
        // `{}` on f64 prints the shortest string that parses back exactly.
        writeln!(w, "{id}\t{}\t{}", s.max_freq, s.rank)?;
    }
    Ok(())
}

fn dump_words(w: &mut impl Write, terms: &BTreeMap<String, Postings>) -> io::Result<()> {
    for (term, postings) in terms {
        write!(w, "{term}")?;
        for (id, freq) in postings {
            write!(w, "\t{id}:{freq}")?;
        }
        writeln!(w)?;
    }
    Ok(())
}

fn stage(path: &Path, bytes: &[u8]) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("cannot create index file in {}", dir.display()))?;
    tmp.write_all(bytes)
        .with_context(|| format!("cannot write index file {}", path.display()))?;
    Ok(tmp)
}

/// Persist all three index files.
///
/// All three artifacts are staged as fully written temp files before any of
/// them is renamed into place, so an I/O failure while writing leaves
/// nothing at any final path; only the renames themselves remain exposed.
pub fn write_index(
    index: &Index,
    title_path: &Path,
    doc_stats_path: &Path,
    word_path: &Path,
) -> Result<()> {
    let mut title_bytes = Vec::new();
    dump_titles(&mut title_bytes, &index.titles)?;
    let mut stats_bytes = Vec::new();
    dump_stats(&mut stats_bytes, &index.stats)?;
    let mut word_bytes = Vec::new();
    dump_words(&mut word_bytes, &index.terms)?;

    let staged: [(&Path, NamedTempFile); 3] = [
        (title_path, stage(title_path, &title_bytes)?),
        (doc_stats_path, stage(doc_stats_path, &stats_bytes)?),
        (word_path, stage(word_path, &word_bytes)?),
    ];
    for (path, tmp) in staged {
        tmp.persist(path)
            .with_context(|| format!("cannot write index file {}", path.display()))?;
    }
    Ok(())
}

fn open(path: &Path, what: &str) -> Result<BufReader<File>> {
    let file =
        File::open(path).with_context(|| format!("cannot open {what} {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn record_err(path: &Path, line_no: usize) -> anyhow::Error {
    anyhow!("{}: malformed record at line {}", path.display(), line_no)
}

pub fn load_titles(path: &Path) -> Result<BTreeMap<DocId, String>> {
    let mut titles = BTreeMap::new();
    for (idx, line) in open(path, "title index")?.lines().enumerate() {
        let line = line?;
        let (id, title) = line.split_once('\t').ok_or_else(|| record_err(path, idx + 1))?;
        let id: DocId = id.parse().map_err(|_| record_err(path, idx + 1))?;
        titles.insert(id, title.to_string());
    }
    Ok(titles)
}

pub fn load_doc_stats(path: &Path) -> Result<BTreeMap<DocId, DocStats>> {
    let mut stats = BTreeMap::new();
    for (idx, line) in open(path, "document stats index")?.lines().enumerate() {
        let line = line?;
        let mut fields = line.split('\t');
        let parsed = (|| {
            let id: DocId = fields.next()?.parse().ok()?;
            let max_freq: u32 = fields.next()?.parse().ok()?;
            let rank: f64 = fields.next()?.parse().ok()?;
            Some((id, DocStats { max_freq, rank }))
        })();
        let (id, s) = parsed.ok_or_else(|| record_err(path, idx + 1))?;
        stats.insert(id, s);
    }
    Ok(stats)
}

pub fn load_words(path: &Path) -> Result<BTreeMap<String, Postings>> {
    let mut terms = BTreeMap::new();
    for (idx, line) in open(path, "word index")?.lines().enumerate() {
        let line = line?;
        let mut fields = line.split('\t');
        let term = fields.next().ok_or_else(|| record_err(path, idx + 1))?;
        let mut postings = Postings::new();
        for pair in fields {
            let (id, freq) = pair.split_once(':').ok_or_else(|| record_err(path, idx + 1))?;
            let id: DocId = id.parse().map_err(|_| record_err(path, idx + 1))?;
            let freq: u32 = freq.parse().map_err(|_| record_err(path, idx + 1))?;
            postings.push((id, freq));
        }
        terms.insert(term.to_string(), postings);
    }
    Ok(terms)
}

/// Load all three index files back into a frozen [`Index`].
///
/// The files must agree with each other: every document a posting list
/// names has to carry a title and stats record.
pub fn read_index(
    title_path: &Path,
    doc_stats_path: &Path,
    word_path: &Path,
) -> Result<Index> {
    let index = Index {
        titles: load_titles(title_path)?,
        stats: load_doc_stats(doc_stats_path)?,
        terms: load_words(word_path)?,
    };
    for (term, postings) in &index.terms {
        for &(id, _) in postings {
            if !index.titles.contains_key(&id) || !index.stats.contains_key(&id) {
                bail!(
                    "{}: term {term:?} references document {id}, which is missing \
                     from the title or stats index",
                    word_path.display()
                );
            }
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_index_file_names_the_path() {
        let err = load_titles(Path::new("/nonexistent/titles.txt")).unwrap_err();
        assert!(err.to_string().contains("titles.txt"));
    }

    #[test]
    fn malformed_title_record_reports_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titles.txt");
        std::fs::write(&path, "1\tAlpha\nno-tab-here\n").unwrap();
        let err = load_titles(&path).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn malformed_posting_pair_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "cat\t1:2\t3-4\n").unwrap();
        assert!(load_words(&path).is_err());
    }

    #[test]
    fn posting_for_unknown_document_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let titles = dir.path().join("titles.txt");
        let stats = dir.path().join("doc_stats.txt");
        let words = dir.path().join("words.txt");
        std::fs::write(&titles, "1\tAlpha\n").unwrap();
        std::fs::write(&stats, "1\t2\t1\n").unwrap();
        // Document 99 exists in no other file.
        std::fs::write(&words, "cat\t1:2\t99:1\n").unwrap();
        let err = read_index(&titles, &stats, &words).unwrap_err();
        assert!(err.to_string().contains("99"));
    }
}
