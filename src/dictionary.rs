use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::path::Path;

use crate::{Error, Result};

/// Where a term's postings live: how many documents it occurs in and the
/// byte offset of its line in the postings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermEntry {
    pub doc_freq: u64,
    pub offset: u64,
}

/// The in-memory dictionary: term → postings location. Small enough to
/// load whole at searcher startup.
#[derive(Debug)]
pub struct Dictionary {
    terms: HashMap<String, TermEntry>,
}

impl Dictionary {
    pub fn load(path: &Path) -> Result<Dictionary> {
        let file = File::open(path)?;
        let mut terms = HashMap::new();
        for line in io::BufReader::new(file).lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let (term, entry) = parse_record(&line)?;
            terms.insert(term, entry);
        }
        Ok(Dictionary { terms })
    }

    pub fn get(&self, term: &str) -> Option<TermEntry> {
        self.terms.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Writes one `<term> <doc-freq> <offset>` record per line, in the order
/// given (the indexer passes terms in discovery order).
pub fn write<W>(records: &[(String, TermEntry)], writer: W) -> Result<()>
where
    W: io::Write,
{
    let mut writer = io::BufWriter::new(writer);
    for (term, entry) in records {
        writeln!(writer, "{} {} {}", term, entry.doc_freq, entry.offset)?;
    }
    writer.flush()?;
    Ok(())
}

fn parse_record(line: &str) -> Result<(String, TermEntry)> {
    let invalid = || Error::DictionaryLine(line.to_string());
    let mut fields = line.split_whitespace();
    let term = fields.next().ok_or_else(invalid)?;
    let doc_freq = fields.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    let offset = fields.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    Ok((term.to_string(), TermEntry { doc_freq, offset }))
}
