//! Full pipeline: index a corpus on disk, then answer boolean queries
//! through both the query-file driver and the `Searcher` type directly.

use std::fs;

use tempfile::TempDir;

use boolsearch::index::{self, IndexerConfig};
use boolsearch::searcher::{self, Searcher, SearcherConfig};
use boolsearch::Result;

/// The scenario corpus: a:{1,2,3,4,5} b:{2,4,6} c:{3,4,5} d:{6}.
const CORPUS: &[(u64, &str)] = &[
    (1, "a"),
    (2, "a b"),
    (3, "a c"),
    (4, "a b c"),
    (5, "a c"),
    (6, "b d"),
];

fn indexed(corpus: &[(u64, &str)]) -> Result<(TempDir, IndexerConfig)> {
    let dir = tempfile::tempdir()?;
    let corpus_dir = dir.path().join("corpus");
    fs::create_dir(&corpus_dir)?;
    for (id, text) in corpus {
        fs::write(corpus_dir.join(id.to_string()), text)?;
    }
    let config = IndexerConfig {
        corpus_dir,
        dictionary_path: dir.path().join("dictionary.txt"),
        postings_path: dir.path().join("postings.txt"),
    };
    index::build(&config)?;
    Ok((dir, config))
}

#[test]
fn scenario_queries_through_the_query_file() -> Result<()> {
    let (dir, config) = indexed(CORPUS)?;
    let queries_path = dir.path().join("queries.txt");
    let results_path = dir.path().join("results.txt");
    fs::write(
        &queries_path,
        "a AND b\n\
         a OR b\n\
         a AND NOT b\n\
         NOT a AND b\n\
         a AND b AND NOT c AND NOT d\n\
         (a OR d) AND NOT (b OR c)\n\
         NOT NOT a\n\
         \n\
         a AND\n\
         (a OR b\n",
    )?;

    searcher::run(&SearcherConfig {
        dictionary_path: config.dictionary_path.clone(),
        postings_path: config.postings_path.clone(),
        queries_path,
        results_path: results_path.clone(),
    })?;

    assert_eq!(
        "2 4\n\
         1 2 3 4 5 6\n\
         1 3 5\n\
         6\n\
         2\n\
         1\n\
         1 2 3 4 5\n\
         \n\
         \n\
         \n",
        fs::read_to_string(&results_path)?
    );
    Ok(())
}

#[test]
fn scenario_queries_through_the_searcher_type() -> Result<()> {
    let (_dir, config) = indexed(CORPUS)?;
    let mut searcher = Searcher::open(&config.dictionary_path, &config.postings_path)?;

    assert_eq!(vec![2, 4], searcher.query("a AND b")?);
    assert_eq!(vec![6], searcher.query("d")?);
    assert_eq!(vec![1, 2, 3, 4, 5, 6], searcher.query("NOT zebra")?);
    assert!(searcher.query("a AND").is_err());
    Ok(())
}

#[test]
fn stemming_lines_up_between_indexer_and_searcher() -> Result<()> {
    let (_dir, config) = indexed(&[
        (1, "Dogs chase cats."),
        (2, "A dog sleeps."),
        (3, "Cats running far."),
    ])?;
    let mut searcher = Searcher::open(&config.dictionary_path, &config.postings_path)?;

    // "dogs"/"dog" and "cats"/"cat" collapse to one term each.
    assert_eq!(vec![1, 2], searcher.query("dog")?);
    assert_eq!(vec![1, 3], searcher.query("Cats")?);
    assert_eq!(vec![1], searcher.query("dogs AND chase")?);
    assert_eq!(vec![3], searcher.query("running")?);
    Ok(())
}

#[test]
fn dog_and_cat_returns_their_shared_document() -> Result<()> {
    let (_dir, config) = indexed(&[(1, "dog cat"), (2, "dog"), (3, "cat fish")])?;
    let mut searcher = Searcher::open(&config.dictionary_path, &config.postings_path)?;

    assert_eq!(vec![1], searcher.query("dog AND cat")?);
    assert_eq!(vec![2], searcher.query("dog AND NOT cat")?);
    assert_eq!(vec![1, 3], searcher.query("cat OR fish")?);
    Ok(())
}

#[test]
fn large_corpus_round_trips_with_skip_pointers() -> Result<()> {
    // 30 documents: "even"/"odd" postings are long enough to carry skip
    // pointers (⌊√15⌋ = 3), and "all" spans the whole collection.
    let docs: Vec<(u64, String)> = (1..=30)
        .map(|id| {
            let parity = if id % 2 == 0 { "even" } else { "odd" };
            (id, format!("all {} tag{}", parity, id))
        })
        .collect();
    let borrowed: Vec<(u64, &str)> =
        docs.iter().map(|(id, text)| (*id, text.as_str())).collect();
    let (_dir, config) = indexed(&borrowed)?;
    let mut searcher = Searcher::open(&config.dictionary_path, &config.postings_path)?;

    let evens: Vec<u64> = (1..=30).filter(|id| id % 2 == 0).collect();
    assert_eq!(evens, searcher.query("all AND even")?);
    assert_eq!((1..=30).collect::<Vec<u64>>(), searcher.query("even OR odd")?);
    assert_eq!(vec![7], searcher.query("tag7")?);
    assert_eq!(
        (1..=30).filter(|id| id % 2 == 1).collect::<Vec<u64>>(),
        searcher.query("all AND NOT even")?
    );
    Ok(())
}
