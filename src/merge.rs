//! Binary merges over sorted postings lists. All three walk the inputs
//! with two forward-only cursors; intersection and difference follow skip
//! pointers on whichever side is behind. Results are plain document IDs;
//! callers re-encode them through `PostingsList::from_doc_ids` so that
//! intermediate operands carry fresh skip pointers for later merges.

use crate::postings::PostingsList;

/// Documents present in both lists.
pub fn intersect(a: &PostingsList, b: &PostingsList) -> Vec<u64> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let doc_a = a.doc_id(i);
        let doc_b = b.doc_id(j);
        if doc_a == doc_b {
            result.push(doc_a);
            i += 1;
            j += 1;
        } else if doc_a < doc_b {
            i = advance(a, i, doc_b);
        } else {
            j = advance(b, j, doc_a);
        }
    }
    result
}

/// Documents present in either list. Skip pointers give no advantage
/// here and are ignored.
pub fn union(a: &PostingsList, b: &PostingsList) -> Vec<u64> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let doc_a = a.doc_id(i);
        let doc_b = b.doc_id(j);
        if doc_a == doc_b {
            result.push(doc_a);
            i += 1;
            j += 1;
        } else if doc_a < doc_b {
            result.push(doc_a);
            i += 1;
        } else {
            result.push(doc_b);
            j += 1;
        }
    }
    result.extend((i..a.len()).map(|index| a.doc_id(index)));
    result.extend((j..b.len()).map(|index| b.doc_id(index)));
    result
}

/// Documents of `a` that do not appear in `b`.
pub fn difference(a: &PostingsList, b: &PostingsList) -> Vec<u64> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let doc_a = a.doc_id(i);
        let doc_b = b.doc_id(j);
        if doc_a == doc_b {
            i += 1;
            j += 1;
        } else if doc_a < doc_b {
            result.push(doc_a);
            i += 1;
        } else {
            j = advance(b, j, doc_a);
        }
    }
    result.extend((i..a.len()).map(|index| a.doc_id(index)));
    result
}

/// Follows skip pointers from `cursor` while the jump target stays at or
/// below `bound`; falls back to a single step when no pointer is usable.
fn advance(list: &PostingsList, cursor: usize, bound: u64) -> usize {
    let mut position = cursor;
    while let Some(target) = list.skip_target(position) {
        if list.doc_id(target) <= bound {
            position = target;
        } else {
            break;
        }
    }
    if position == cursor {
        cursor + 1
    } else {
        position
    }
}
