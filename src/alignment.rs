use tracing::{debug, trace};

use crate::types::{EditScript, Word};

/// Next step chosen by the aligner when `from[fi] != to[ti]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    Substitute,
    Insert,
    Remove,
    /// Drop everything before the given `from` position and keep it.
    SkipTo(usize),
}

fn position<T: Word>(from: &[T], start: usize, word: &str) -> Option<usize> {
    from[start..]
        .iter()
        .position(|candidate| candidate.text() == word)
        .map(|offset| start + offset)
}

/// Where the aligner would land if it stayed at `from_index` and looked at
/// `to[to_index]`: `0` on an exact match, the next matching `from` position
/// otherwise, and the number of `from` tokens left once `to` is exhausted.
/// Never touches the script.
///
/// The exhausted case counts from `from_index`, not `to_index`: for
/// `[b, a]` into `[a, a, a, a, a]` this yields four inserts, one removal and
/// a keep (cost 5) rather than the cost 6 a `to_index` count leads to.
fn lookahead<T: Word>(from: &[T], to: &[T], from_index: usize, to_index: usize) -> Option<usize> {
    if to_index >= to.len() {
        return Some(from.len() - from_index);
    }
    let word = to[to_index].text();
    if from[from_index].text() == word {
        return Some(0);
    }
    position(from, from_index, word)
}

fn choose_move<T: Word>(from: &[T], to: &[T], from_index: usize, to_index: usize) -> Move {
    let found = position(from, from_index, to[to_index].text());

    if from_index + 1 == from.len() && found.is_none() {
        return Move::Substitute;
    }

    let future = lookahead(from, to, from_index, to_index + 1);

    let Some(found) = found else {
        return if future == Some(0) {
            Move::Insert
        } else {
            Move::Substitute
        };
    };

    if future == Some(found) || (found == from_index + 1 && future == Some(from_index)) {
        let from_left = from.len() - from_index;
        let to_left = to.len() - to_index;
        return if from_left > to_left {
            Move::Remove
        } else {
            Move::Insert
        };
    }

    match future {
        Some(future) if found > future => Move::Substitute,
        _ => Move::SkipTo(found),
    }
}

/// Computes the actions turning `from` into `to`.
///
/// Walks both sequences left to right. Matching tokens are kept; on a
/// mismatch a single lookahead on the next `to` token decides between
/// substituting, inserting, removing, or skipping ahead in `from` to the
/// next occurrence. Greedy, so not always the cheapest script.
pub fn compute_edit_script<'a, T: Word>(from: &'a [T], to: &'a [T]) -> EditScript<'a, T> {
    let mut script = EditScript::new(from, to);
    let mut from_index = 0;
    let mut to_index = 0;
    loop {
        if from_index >= from.len() {
            (to_index..to.len()).for_each(|i| script.push_insert(i));
            break;
        }
        if to_index >= to.len() {
            (from_index..from.len()).for_each(|i| script.push_remove(i));
            break;
        }
        if from[from_index].text() == to[to_index].text() {
            script.push_keep(from_index, to_index);
            from_index += 1;
            to_index += 1;
            continue;
        }
        let step = choose_move(from, to, from_index, to_index);
        trace!(from_index, to_index, ?step, "mismatch");
        match step {
            Move::Substitute => {
                script.push_substitute(from_index, to_index);
                from_index += 1;
                to_index += 1;
            }
            Move::Insert => {
                script.push_insert(to_index);
                to_index += 1;
            }
            Move::Remove => {
                script.push_remove(from_index);
                from_index += 1;
            }
            Move::SkipTo(found) => {
                (from_index..found).for_each(|i| script.push_remove(i));
                script.push_keep(found, to_index);
                from_index = found + 1;
                to_index += 1;
            }
        }
    }
    debug!(
        from = from.len(),
        to = to.len(),
        cost = script.cost,
        "computed edit script"
    );
    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Insert, Keep, Remove, Substitute};

    fn keep(word: &str, from_index: usize, to_index: usize) -> Keep<'_> {
        Keep {
            from_index,
            to_index,
            word,
        }
    }

    fn check_coverage<T: Word>(script: &EditScript<'_, T>) {
        let mut from_seen = vec![0; script.from.len()];
        let mut to_seen = vec![0; script.to.len()];
        for action in script.actions() {
            if let Some(i) = action.from_index() {
                from_seen[i] += 1;
            }
            if let Some(i) = action.to_index() {
                to_seen[i] += 1;
            }
        }
        assert!(from_seen.iter().all(|&n| n == 1), "from coverage {:?}", from_seen);
        assert!(to_seen.iter().all(|&n| n == 1), "to coverage {:?}", to_seen);
        assert_eq!(
            script.cost,
            script.remove.len() + script.insert.len() + script.substitute.len()
        );
    }

    #[test]
    fn keep_costs_nothing() {
        let from = ["very"];
        let script = compute_edit_script(&from, &from);
        assert_eq!(script.cost, 0);
        assert_eq!(script.keep, vec![keep("very", 0, 0)]);
    }

    #[test]
    fn substitution_costs_one() {
        let script = compute_edit_script(&["very"], &["quick"]);
        assert_eq!(script.cost, 1);
        assert_eq!(
            script.substitute,
            vec![Substitute {
                from_index: 0,
                to_index: 0,
                from_word: "very",
                to_word: "quick",
            }]
        );
        assert!(script.keep.is_empty());
    }

    #[test]
    fn insert_into_empty() {
        let from: [&str; 0] = [];
        let script = compute_edit_script(&from, &["cool"]);
        assert_eq!(script.cost, 1);
        assert_eq!(
            script.insert,
            vec![Insert {
                to_index: 0,
                word: "cool"
            }]
        );
    }

    #[test]
    fn remove_to_empty() {
        let to: [&str; 0] = [];
        let script = compute_edit_script(&["cool"], &to);
        assert_eq!(script.cost, 1);
        assert_eq!(
            script.remove,
            vec![Remove {
                from_index: 0,
                word: "cool"
            }]
        );
    }

    #[test]
    fn both_empty() {
        let empty: [&str; 0] = [];
        let script = compute_edit_script(&empty, &empty);
        assert_eq!(script.cost, 0);
        assert!(script.is_identity());
    }

    #[test]
    fn simple_substitution() {
        let from = ["The", "very", "brown", "fox", "is", "very", "cool"];
        let to = ["The", "quick", "brown", "fox", "is", "very", "cool"];
        let script = compute_edit_script(&from, &to);
        assert_eq!(script.cost, 1);
        assert_eq!(script.substitute.len(), 1);
        assert_eq!(script.substitute[0].from_index, 1);
        assert_eq!(script.substitute[0].to_word, "quick");
        assert_eq!(script.keep.len(), 6);
        check_coverage(&script);
    }

    #[test]
    fn lookahead_avoids_skipping_ahead() {
        let from = ["The", "quick", "brown", "fox", "is", "very", "cool"];
        let to = ["The", "very", "brown", "fox", "is", "very", "cool"];
        let script = compute_edit_script(&from, &to);
        assert_eq!(script.cost, 1);
        assert_eq!(
            script.substitute,
            vec![Substitute {
                from_index: 1,
                to_index: 1,
                from_word: "quick",
                to_word: "very",
            }]
        );
        assert!(script.remove.is_empty());
        assert_eq!(
            script.keep,
            vec![
                keep("The", 0, 0),
                keep("brown", 2, 2),
                keep("fox", 3, 3),
                keep("is", 4, 4),
                keep("very", 5, 5),
                keep("cool", 6, 6),
            ]
        );
    }

    #[test]
    fn complex_example() {
        let from = [
            "The", "quick", "brown", "fox", "is", "very", "cool", ",", "supposedly", ".",
        ];
        let to = [
            "The", "brown", "color", "is", "very", "very", "pretty", ",", "no", "?",
        ];
        let script = compute_edit_script(&from, &to);
        assert_eq!(script.cost, 6);
        let sub = |from_word, to_word, from_index, to_index| Substitute {
            from_index,
            to_index,
            from_word,
            to_word,
        };
        assert_eq!(
            script.substitute,
            vec![
                sub("fox", "color", 3, 2),
                sub("cool", "very", 6, 5),
                sub("supposedly", "no", 8, 8),
                sub(".", "?", 9, 9),
            ]
        );
        assert_eq!(
            script.remove,
            vec![Remove {
                from_index: 1,
                word: "quick"
            }]
        );
        assert_eq!(
            script.insert,
            vec![Insert {
                to_index: 6,
                word: "pretty"
            }]
        );
        assert_eq!(
            script.keep,
            vec![
                keep("The", 0, 0),
                keep("brown", 2, 1),
                keep("is", 4, 3),
                keep("very", 5, 4),
                keep(",", 7, 7),
            ]
        );
        check_coverage(&script);
    }

    #[test]
    fn adjacent_match_with_matching_lookahead_inserts() {
        // `b` sits right after `a`, and the next target `a` matches in place.
        let script = compute_edit_script(&["a", "b"], &["b", "a"]);
        assert_eq!(
            script.insert,
            vec![Insert {
                to_index: 0,
                word: "b"
            }]
        );
        assert_eq!(script.keep, vec![keep("a", 0, 1)]);
        assert_eq!(
            script.remove,
            vec![Remove {
                from_index: 1,
                word: "b"
            }]
        );
        assert!(script.substitute.is_empty());
        assert_eq!(script.cost, 2);
        check_coverage(&script);
    }

    #[test]
    fn exhausted_lookahead_counts_remaining_from_tokens() {
        let script = compute_edit_script(&["b", "a"], &["a", "a", "a", "a", "a"]);
        let inserted: Vec<_> = script.insert.iter().map(|i| i.to_index).collect();
        assert_eq!(inserted, vec![0, 1, 2, 3]);
        assert_eq!(
            script.remove,
            vec![Remove {
                from_index: 0,
                word: "b"
            }]
        );
        assert_eq!(script.keep, vec![keep("a", 1, 4)]);
        assert_eq!(script.cost, 5);
        check_coverage(&script);
    }

    #[test]
    fn balanced_tie_consumes_longer_side() {
        // "b" is next in `from` and also where the lookahead lands.
        let from = ["a", "b", "c"];
        let to = ["b", "b"];
        let script = compute_edit_script(&from, &to);
        assert_eq!(
            script.remove,
            vec![Remove {
                from_index: 0,
                word: "a"
            }]
        );
        assert_eq!(script.keep, vec![keep("b", 1, 0)]);
        assert_eq!(script.substitute.len(), 1);
        assert_eq!(script.cost, 2);
        check_coverage(&script);
    }

    #[test]
    fn longer_target_inserts() {
        let from = ["x", "y"];
        let to = ["p", "x", "q", "y", "z"];
        let script = compute_edit_script(&from, &to);
        check_coverage(&script);
        assert_eq!(script.keep, vec![keep("x", 0, 1)]);
        assert_eq!(script.substitute[0].to_word, "q");
        assert_eq!(script.insert.len(), 3);
        assert_eq!(script.cost, 4);
    }

    #[test]
    fn identity_and_coverage_hold_for_assorted_pairs() {
        let sentences: Vec<Vec<&str>> = vec![
            vec![],
            vec!["a"],
            vec!["a", "a", "a"],
            vec!["the", "cat", "sat", "on", "the", "mat"],
            vec!["on", "the", "mat", "the", "cat", "sat"],
            vec!["the", "dog", "sat", "."],
            vec!["mat", "the", "on", "sat", "cat", "the", "!"],
            vec!["b", "a", "b", "a", "b"],
        ];
        for from in &sentences {
            let identity = compute_edit_script(from, from);
            assert_eq!(identity.cost, 0);
            assert_eq!(identity.keep.len(), from.len());
            assert!(identity
                .keep
                .iter()
                .enumerate()
                .all(|(i, k)| k.from_index == i && k.to_index == i));
            for to in &sentences {
                check_coverage(&compute_edit_script(from, to));
            }
        }
    }
}
