use itertools::Itertools;

use crate::{Error, Result};

/// One entry of a postings list: a document ID plus an optional skip
/// pointer holding the index of a later entry in the same list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: u64,
    pub skip: Option<usize>,
}

/// An ascending, duplicate-free list of document IDs with embedded skip
/// pointers. This is the in-memory form of one line of the postings file;
/// the serialised form is `1/3,2,3,4/6,...` with entries joined by commas
/// and skip targets attached with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingsList {
    entries: Vec<Posting>,
}

impl PostingsList {
    pub fn empty() -> PostingsList {
        PostingsList { entries: Vec::new() }
    }

    /// Builds a list from ascending document IDs, inserting skip pointers
    /// at root-N spacing: with s = ⌊√N⌋, every index divisible by s points
    /// s entries ahead. No pointers are inserted when s ≤ 2.
    pub fn from_doc_ids(ids: Vec<u64>) -> PostingsList {
        let length = ids.len();
        let distance = (length as f64).sqrt() as usize;
        let entries = ids
            .into_iter()
            .enumerate()
            .map(|(index, doc_id)| {
                let skip = if distance > 2 && index % distance == 0 && index + distance < length {
                    Some(index + distance)
                } else {
                    None
                };
                Posting { doc_id, skip }
            })
            .collect();
        PostingsList { entries }
    }

    /// Parses one line of the postings file. A trailing newline is
    /// tolerated; anything else that is not `<docID>` or
    /// `<docID>/<skipIndex>` is an error.
    pub fn decode(line: &str) -> Result<PostingsList> {
        let line = line.trim_end_matches('\n');
        if line.is_empty() {
            return Ok(PostingsList::empty());
        }
        let mut entries = Vec::new();
        for part in line.split(',') {
            entries.push(parse_entry(part)?);
        }
        Ok(PostingsList { entries })
    }

    pub fn encode(&self) -> String {
        self.entries
            .iter()
            .map(|posting| match posting.skip {
                Some(target) => format!("{}/{}", posting.doc_id, target),
                None => posting.doc_id.to_string(),
            })
            .join(",")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn doc_id(&self, index: usize) -> u64 {
        self.entries[index].doc_id
    }

    /// The index the skip pointer at `index` jumps to, if one is present.
    pub fn skip_target(&self, index: usize) -> Option<usize> {
        self.entries[index].skip
    }

    /// The document ID under the skip pointer at `index`.
    pub fn skip_doc_id(&self, index: usize) -> Option<u64> {
        self.entries[index].skip.map(|target| self.entries[target].doc_id)
    }

    /// Document IDs in order, without skip annotations.
    pub fn doc_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().map(|posting| posting.doc_id)
    }
}

fn parse_entry(part: &str) -> Result<Posting> {
    let invalid = || Error::PostingsEntry(part.to_string());
    let mut pieces = part.splitn(2, '/');
    let doc_id = pieces.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    let skip = match pieces.next() {
        Some(target) => Some(target.parse().map_err(|_| invalid())?),
        None => None,
    };
    Ok(Posting { doc_id, skip })
}
