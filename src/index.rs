//! Two-pass index construction.
//!
//! Pass one discovers the vocabulary and assigns every term a fixed-width
//! slot in a scratch file. Pass two re-reads the corpus in document
//! batches, inverting each batch in memory and appending its postings to
//! the owning slots with positioned writes, so no term list is ever
//! rewritten to extend it. Finalisation turns the scratch slots into the
//! compact postings file with skip pointers and writes the dictionary.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::prelude::*;
use std::io::{BufReader, BufWriter, SeekFrom};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use walkdir::WalkDir;

use crate::analysis::Analyzer;
use crate::dictionary::{self, TermEntry};
use crate::postings::PostingsList;
use crate::{Error, Result};

/// How many documents are inverted in memory before their postings are
/// flushed into the scratch file.
const BATCH_SIZE: usize = 3000;

/// Filler byte for unused slot space in the scratch file.
const FILLER: u8 = b'.';

#[derive(Debug, Clone)]
pub struct IndexerConfig {
    pub corpus_dir: PathBuf,
    pub dictionary_path: PathBuf,
    pub postings_path: PathBuf,
}

pub fn build(config: &IndexerConfig) -> Result<()> {
    build_with_batch_size(config, BATCH_SIZE)
}

fn build_with_batch_size(config: &IndexerConfig, batch_size: usize) -> Result<()> {
    let analyzer = Analyzer::new();
    let documents = list_documents(&config.corpus_dir)?;
    let doc_ids: Vec<u64> = documents.iter().map(|doc| doc.id).collect();

    // Worst case for one slot: a term in every document needs the whole
    // ID list plus a leading comma and a terminating newline.
    let width = doc_ids.iter().join(",").len() + 2;

    let mut postings_out = BufWriter::new(File::create(&config.postings_path)?);
    let global_line = PostingsList::from_doc_ids(doc_ids.clone()).encode();
    writeln!(postings_out, "{}", global_line)?;
    let mut offset = global_line.len() as u64 + 1;

    let vocabulary = collect_vocabulary(&analyzer, &documents)?;

    let mut scratch = Scratch::create(width, vocabulary.terms.len())?;
    let mut doc_freq = vec![0u64; vocabulary.terms.len()];

    for batch in documents.chunks(batch_size.max(1)) {
        let sub_index = invert_batch(&analyzer, batch, &vocabulary)?;
        for (term_id, ids) in sub_index {
            scratch.append(term_id, &ids)?;
            doc_freq[term_id] += ids.len() as u64;
        }
    }

    scratch.terminate()?;

    let mut records = Vec::with_capacity(vocabulary.terms.len());
    let mut term_id = 0;
    for line in scratch.into_reader()?.lines() {
        let line = line?;
        let stripped: String = line.chars().filter(|&ch| ch != FILLER as char).collect();
        if stripped.is_empty() {
            continue;
        }
        let term = match vocabulary.terms.get(term_id) {
            Some(term) => term.clone(),
            None => break,
        };
        let ids = parse_raw_postings(&stripped)?;
        let encoded = PostingsList::from_doc_ids(ids).encode();
        writeln!(postings_out, "{}", encoded)?;
        records.push((term, TermEntry { doc_freq: doc_freq[term_id], offset }));
        offset += encoded.len() as u64 + 1;
        term_id += 1;
    }
    postings_out.flush()?;

    dictionary::write(&records, File::create(&config.dictionary_path)?)?;
    Ok(())
}

/// One corpus file: its numeric document ID and where to read it.
struct Document {
    id: u64,
    path: PathBuf,
}

/// Vocabulary of the whole collection, in first-discovery order. The
/// position of a term doubles as its scratch-file slot number.
struct Vocabulary {
    terms: Vec<String>,
    ids: HashMap<String, usize>,
}

/// Lists the corpus directory and sorts by document ID, numerically:
/// `10` comes after `9`, not after `1`.
fn list_documents(dir: &Path) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|err| Error::Io(err.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        let id = name.parse().map_err(|_| Error::DocId(name.to_string()))?;
        documents.push(Document { id, path: entry.path().to_path_buf() });
    }
    documents.sort_by_key(|doc| doc.id);
    Ok(documents)
}

fn collect_vocabulary(analyzer: &Analyzer, documents: &[Document]) -> Result<Vocabulary> {
    let mut terms = Vec::new();
    let mut ids = HashMap::new();
    for document in documents {
        let text = fs::read_to_string(&document.path)?;
        for term in analyzer.lexicon(&text) {
            if !ids.contains_key(&term) {
                ids.insert(term.clone(), terms.len());
                terms.push(term);
            }
        }
    }
    Ok(Vocabulary { terms, ids })
}

/// Inverts one batch of documents into slot number → ascending document
/// IDs. Documents arrive in ascending ID order, so each list is born
/// sorted.
fn invert_batch(
    analyzer: &Analyzer,
    batch: &[Document],
    vocabulary: &Vocabulary,
) -> Result<HashMap<usize, Vec<u64>>> {
    let mut sub_index: HashMap<usize, Vec<u64>> = HashMap::new();
    for document in batch {
        let text = fs::read_to_string(&document.path)?;
        for term in analyzer.lexicon(&text) {
            if let Some(&term_id) = vocabulary.ids.get(&term) {
                sub_index.entry(term_id).or_insert_with(Vec::new).push(document.id);
            }
        }
    }
    Ok(sub_index)
}

fn parse_raw_postings(raw: &str) -> Result<Vec<u64>> {
    let raw = raw.strip_prefix(',').unwrap_or(raw);
    let mut ids = Vec::new();
    for piece in raw.split(',') {
        let id = piece.parse().map_err(|_| Error::PostingsEntry(piece.to_string()))?;
        ids.push(id);
    }
    Ok(ids)
}

/// The fixed-width random-access scratch file. Term `i` owns the byte
/// range `[i * width, (i + 1) * width)`; everything not yet written is
/// filler. Backed by an anonymous temp file; the OS reclaims it on every
/// exit path, failed builds included.
struct Scratch {
    file: File,
    cursors: Vec<u64>,
}

impl Scratch {
    fn create(width: usize, slots: usize) -> Result<Scratch> {
        let mut file = tempfile::tempfile()?;
        let row = vec![FILLER; width];
        for _ in 0..slots {
            file.write_all(&row)?;
        }
        let cursors = (0..slots).map(|slot| (slot * width) as u64).collect();
        Ok(Scratch { file, cursors })
    }

    /// Appends one batch worth of postings to a slot. Every append starts
    /// with a fresh comma, so consecutive batch appends read back as one
    /// comma-separated run.
    fn append(&mut self, slot: usize, ids: &[u64]) -> Result<()> {
        let chunk = format!(",{}", ids.iter().join(","));
        self.file.seek(SeekFrom::Start(self.cursors[slot]))?;
        self.file.write_all(chunk.as_bytes())?;
        self.cursors[slot] += chunk.len() as u64;
        Ok(())
    }

    /// Terminates every slot with a newline so the scratch file reads
    /// back as one line per term.
    fn terminate(&mut self) -> Result<()> {
        for slot in 0..self.cursors.len() {
            self.file.seek(SeekFrom::Start(self.cursors[slot]))?;
            self.file.write_all(b"\n")?;
        }
        Ok(())
    }

    fn into_reader(mut self) -> Result<BufReader<File>> {
        self.file.seek(SeekFrom::Start(0))?;
        Ok(BufReader::new(self.file))
    }
}
