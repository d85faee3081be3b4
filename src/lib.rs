use std::fmt;
use std::io;

pub mod analysis;
pub mod dictionary;
pub mod eval;
pub mod index;
pub mod merge;
pub mod postings;
pub mod query;
pub mod searcher;

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    /// A corpus filename that does not parse as a numeric document ID.
    DocId(String),
    /// A dictionary record that is not `<term> <freq> <offset>`.
    DictionaryLine(String),
    /// A postings entry that is not `<docID>` or `<docID>/<skipIndex>`.
    PostingsEntry(String),
    UnbalancedParens,
    MissingOperand,
    ExtraOperand,
    EmptyQuery,
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "{}", err),
            Error::DocId(name) => write!(f, "document name is not a numeric ID: {}", name),
            Error::DictionaryLine(line) => write!(f, "malformed dictionary record: {}", line),
            Error::PostingsEntry(entry) => write!(f, "malformed postings entry: {}", entry),
            Error::UnbalancedParens => write!(f, "unbalanced parentheses in query"),
            Error::MissingOperand => write!(f, "operator is missing an operand"),
            Error::ExtraOperand => write!(f, "operand without an operator"),
            Error::EmptyQuery => write!(f, "query is empty"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
