//! Postfix query evaluation.
//!
//! Operands stay as cheap `Literal` tags until an operator actually needs
//! their postings, so that a whole run of ANDs or ORs can be gathered
//! first and merged in ascending document-frequency order. A run is
//! collected on an auxiliary operator stack holding one operator kind at
//! a time; the `pending` buffer stages the operands that follow the run
//! and decides, together with the next operator, when the run must be
//! resolved.

use std::fs::File;
use std::io::prelude::*;
use std::io::{BufReader, SeekFrom};
use std::path::Path;

use crate::dictionary::Dictionary;
use crate::merge;
use crate::postings::PostingsList;
use crate::query::Token;
use crate::{Error, Result};

/// An operand on the evaluation stack: a term whose postings have not
/// been read yet, a materialised list, or an operand the surrounding AND
/// run must subtract instead of intersect.
#[derive(Debug)]
enum Operand {
    Literal(String),
    Evaluated(PostingsList),
    Negated(Box<Operand>),
}

/// Evaluates postfix boolean queries against an index on disk. The
/// dictionary lives in memory; postings lines are read through one
/// long-lived handle repositioned by byte offset per lookup. The global
/// document list (line 0 of the postings file) is decoded once at open
/// since the file is immutable.
pub struct Evaluator {
    dictionary: Dictionary,
    postings: BufReader<File>,
    all_docs: PostingsList,
}

impl Evaluator {
    pub fn open(dictionary_path: &Path, postings_path: &Path) -> Result<Evaluator> {
        let dictionary = Dictionary::load(dictionary_path)?;
        let mut postings = BufReader::new(File::open(postings_path)?);
        let mut line = String::new();
        postings.read_line(&mut line)?;
        let all_docs = PostingsList::decode(&line)?;
        Ok(Evaluator { dictionary, postings, all_docs })
    }

    pub fn evaluate(&mut self, postfix: Vec<Token>) -> Result<PostingsList> {
        let mut values: Vec<Operand> = Vec::new();
        let mut ops: Vec<Token> = Vec::new();
        let mut pending: Vec<Operand> = Vec::new();

        for token in postfix {
            if token.is_operator() && !ops.is_empty() {
                let ends = match ops.last() {
                    Some(Token::Or) => token != Token::Or || pending.len() > 1,
                    Some(_) => token != Token::And || pending.len() != 1,
                    None => false,
                };
                if ends {
                    self.resolve_run(&mut values, &mut ops)?;
                }
                values.append(&mut pending);
            }
            match token {
                Token::Not => {
                    let operand = values.pop().ok_or(Error::MissingOperand)?;
                    let list = self.materialise(operand)?;
                    let complement = self.complement(&list);
                    values.push(Operand::Evaluated(complement));
                }
                Token::And | Token::Or => ops.push(token),
                Token::AndNot => {
                    let operand = values.pop().ok_or(Error::MissingOperand)?;
                    values.push(Operand::Negated(Box::new(operand)));
                    ops.push(Token::And);
                }
                Token::NotAnd => {
                    if values.len() < 2 {
                        return Err(Error::MissingOperand);
                    }
                    let index = values.len() - 2;
                    let operand = values.remove(index);
                    values.insert(index, Operand::Negated(Box::new(operand)));
                    ops.push(Token::And);
                }
                Token::Term(term) => {
                    let operand = Operand::Literal(term);
                    if ops.is_empty() {
                        values.push(operand);
                    } else {
                        pending.push(operand);
                    }
                }
                Token::Open | Token::Close => return Err(Error::UnbalancedParens),
            }
        }

        if !pending.is_empty() {
            return Err(Error::ExtraOperand);
        }
        if !ops.is_empty() {
            self.resolve_run(&mut values, &mut ops)?;
        }
        let operand = values.pop().ok_or(Error::EmptyQuery)?;
        if !values.is_empty() {
            return Err(Error::ExtraOperand);
        }
        self.materialise(operand)
    }

    /// Pops a full run of n operators and its n + 1 operands and replaces
    /// them with the merged result.
    fn resolve_run(&mut self, values: &mut Vec<Operand>, ops: &mut Vec<Token>) -> Result<()> {
        let run_op = match ops.last() {
            Some(op) => op.clone(),
            None => return Ok(()),
        };
        let mut operands = Vec::with_capacity(ops.len() + 1);
        while ops.pop().is_some() {
            operands.push(values.pop().ok_or(Error::MissingOperand)?);
        }
        operands.push(values.pop().ok_or(Error::MissingOperand)?);
        let merged = match run_op {
            Token::Or => self.union_all(operands)?,
            _ => self.intersect_all(operands)?,
        };
        values.push(Operand::Evaluated(merged));
        Ok(())
    }

    /// N-ary union, smallest list first.
    fn union_all(&mut self, operands: Vec<Operand>) -> Result<PostingsList> {
        let mut lists = Vec::with_capacity(operands.len());
        for operand in operands {
            lists.push(self.materialise(operand)?);
        }
        lists.sort_by_key(|list| list.len());
        let mut lists = lists.into_iter();
        let mut result = match lists.next() {
            Some(list) => list,
            None => return Err(Error::MissingOperand),
        };
        for list in lists {
            result = PostingsList::from_doc_ids(merge::union(&result, &list));
        }
        Ok(result)
    }

    /// N-ary intersection with fused negation. Positive operands are
    /// intersected smallest-first, then every negated operand is
    /// subtracted smallest-first, which keeps mixed chains reorder-stable:
    /// `A AND B AND NOT C AND D` ≡ `(A AND B AND D) AND NOT C`.
    fn intersect_all(&mut self, operands: Vec<Operand>) -> Result<PostingsList> {
        let mut positives = Vec::new();
        let mut negatives = Vec::new();
        for operand in operands {
            match operand {
                Operand::Negated(inner) => negatives.push(self.materialise(*inner)?),
                other => positives.push(self.materialise(other)?),
            }
        }
        positives.sort_by_key(|list| list.len());
        negatives.sort_by_key(|list| list.len());

        let mut positives = positives.into_iter();
        // A run of only negated operands subtracts from the full corpus.
        let mut result = match positives.next() {
            Some(list) => list,
            None => self.all_docs.clone(),
        };
        for list in positives {
            result = PostingsList::from_doc_ids(merge::intersect(&result, &list));
        }
        for negative in negatives {
            result = PostingsList::from_doc_ids(merge::difference(&result, &negative));
        }
        Ok(result)
    }

    fn materialise(&mut self, operand: Operand) -> Result<PostingsList> {
        match operand {
            Operand::Literal(term) => self.fetch(&term),
            Operand::Evaluated(list) => Ok(list),
            Operand::Negated(inner) => {
                let list = self.materialise(*inner)?;
                Ok(self.complement(&list))
            }
        }
    }

    /// Reads a term's postings line from disk. A term absent from the
    /// dictionary contributes an empty list, not an error.
    fn fetch(&mut self, term: &str) -> Result<PostingsList> {
        let entry = match self.dictionary.get(term) {
            Some(entry) => entry,
            None => return Ok(PostingsList::empty()),
        };
        self.postings.seek(SeekFrom::Start(entry.offset))?;
        let mut line = String::new();
        self.postings.read_line(&mut line)?;
        PostingsList::decode(&line)
    }

    fn complement(&self, list: &PostingsList) -> PostingsList {
        PostingsList::from_doc_ids(merge::difference(&self.all_docs, list))
    }
}
