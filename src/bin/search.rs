use std::path::PathBuf;
use std::process;

use clap::{App, Arg};

use boolsearch::searcher::{self, SearcherConfig};

fn main() {
    let matches = App::new("search")
        .about("Evaluates a file of boolean queries against an index")
        .arg(
            Arg::with_name("dictionary")
                .short("d")
                .value_name("FILE")
                .help("Dictionary file produced by the indexer")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("postings")
                .short("p")
                .value_name("FILE")
                .help("Postings file produced by the indexer")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("queries")
                .short("q")
                .value_name("FILE")
                .help("File of boolean queries, one per line")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .value_name("FILE")
                .help("Output file of results, one line per query")
                .required(true)
                .takes_value(true),
        )
        .get_matches();

    let config = SearcherConfig {
        dictionary_path: PathBuf::from(matches.value_of("dictionary").unwrap()),
        postings_path: PathBuf::from(matches.value_of("postings").unwrap()),
        queries_path: PathBuf::from(matches.value_of("queries").unwrap()),
        results_path: PathBuf::from(matches.value_of("output").unwrap()),
    };

    if let Err(err) = searcher::run(&config) {
        eprintln!("search: {}", err);
        process::exit(1);
    }
}
