use std::fs::File;
use std::io::prelude::*;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::analysis::Analyzer;
use crate::eval::Evaluator;
use crate::query;
use crate::Result;

#[derive(Debug, Clone)]
pub struct SearcherConfig {
    pub dictionary_path: PathBuf,
    pub postings_path: PathBuf,
    pub queries_path: PathBuf,
    pub results_path: PathBuf,
}

/// Compiles and evaluates boolean queries against an index on disk.
pub struct Searcher {
    analyzer: Analyzer,
    evaluator: Evaluator,
}

impl Searcher {
    pub fn open(dictionary_path: &Path, postings_path: &Path) -> Result<Searcher> {
        Ok(Searcher {
            analyzer: Analyzer::new(),
            evaluator: Evaluator::open(dictionary_path, postings_path)?,
        })
    }

    /// Evaluates one query line into ascending document IDs.
    pub fn query(&mut self, line: &str) -> Result<Vec<u64>> {
        let postfix = query::compile(line, &self.analyzer)?;
        let result = self.evaluator.evaluate(postfix)?;
        Ok(result.doc_ids().collect())
    }
}

/// Runs every query in the query file: one result line per query line,
/// document IDs space-separated and ascending, no skip annotations. Empty
/// query lines and queries that fail to parse or evaluate both produce an
/// empty result line; failure is silent at this boundary.
pub fn run(config: &SearcherConfig) -> Result<()> {
    let mut searcher = Searcher::open(&config.dictionary_path, &config.postings_path)?;
    let queries = BufReader::new(File::open(&config.queries_path)?);
    let mut results = BufWriter::new(File::create(&config.results_path)?);
    for line in queries.lines() {
        let line = line?;
        if line.trim().is_empty() {
            writeln!(results)?;
            continue;
        }
        match searcher.query(&line) {
            Ok(ids) => writeln!(results, "{}", ids.iter().join(" "))?,
            Err(_) => writeln!(results)?,
        }
    }
    results.flush()?;
    Ok(())
}
