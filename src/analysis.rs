use itertools::Itertools;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_segmentation::UnicodeSegmentation;

/// Normalises raw tokens into index terms and splits document text into
/// them. Both the indexer and the searcher go through the same `Analyzer`
/// so that query literals land on the vocabulary the index was built with.
pub struct Analyzer {
    stemmer: Stemmer,
}

impl Analyzer {
    pub fn new() -> Analyzer {
        Analyzer { stemmer: Stemmer::create(Algorithm::English) }
    }

    /// Lower-cases and stems a single token.
    pub fn normalise(&self, token: &str) -> String {
        self.stemmer.stem(&token.to_lowercase()).into_owned()
    }

    /// The distinct terms of a document, in order of first occurrence.
    /// Text is segmented into sentences, then words within each sentence.
    pub fn lexicon(&self, text: &str) -> Vec<String> {
        text.unicode_sentences()
            .flat_map(|sentence| sentence.unicode_words())
            .map(|word| self.normalise(word))
            .unique()
            .collect()
    }
}
