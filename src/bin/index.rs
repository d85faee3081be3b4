use std::path::PathBuf;
use std::process;

use clap::{App, Arg};

use boolsearch::index::{self, IndexerConfig};

fn main() {
    let matches = App::new("index")
        .about("Builds the dictionary and postings files from a directory of documents")
        .arg(
            Arg::with_name("input")
                .short("i")
                .value_name("DIR")
                .help("Directory of documents to index (filenames are numeric document IDs)")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("dictionary")
                .short("d")
                .value_name("FILE")
                .help("Output dictionary file")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("postings")
                .short("p")
                .value_name("FILE")
                .help("Output postings file")
                .required(true)
                .takes_value(true),
        )
        .get_matches();

    let config = IndexerConfig {
        corpus_dir: PathBuf::from(matches.value_of("input").unwrap()),
        dictionary_path: PathBuf::from(matches.value_of("dictionary").unwrap()),
        postings_path: PathBuf::from(matches.value_of("postings").unwrap()),
    };

    if let Err(err) = index::build(&config) {
        eprintln!("index: {}", err);
        process::exit(1);
    }
}
