use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::alignment::compute_edit_script;
use crate::types::{EditScript, Word};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourOptions {
    /// Order sentences to keep the total number of changes low.
    pub best: bool,
    /// Shuffle the order, or with `best`, start the cycle at a random leg.
    pub random: bool,
}

impl Default for TourOptions {
    fn default() -> Self {
        Self {
            best: true,
            random: false,
        }
    }
}

/// Pairwise scripts between every two sentences of a set.
#[derive(Debug)]
pub struct CostMatrix<'a, T> {
    cells: Vec<Vec<Option<EditScript<'a, T>>>>,
}

impl<'a, T: Word> CostMatrix<'a, T> {
    pub fn build(sentences: &'a [Vec<T>]) -> Self {
        let cells = sentences
            .iter()
            .enumerate()
            .map(|(from_index, from)| {
                sentences
                    .iter()
                    .enumerate()
                    .map(|(to_index, to)| {
                        (from_index != to_index).then(|| compute_edit_script(from, to))
                    })
                    .collect()
            })
            .collect();
        Self { cells }
    }
}

impl<'a, T> CostMatrix<'a, T> {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// `usize::MAX` on the diagonal so a sentence never follows itself.
    pub fn cost(&self, from: usize, to: usize) -> usize {
        self.cells[from][to]
            .as_ref()
            .map_or(usize::MAX, |script| script.cost)
    }

    pub fn script(&self, from: usize, to: usize) -> Option<&EditScript<'a, T>> {
        self.cells[from][to].as_ref()
    }

    fn take(&mut self, from: usize, to: usize) -> Option<EditScript<'a, T>> {
        self.cells[from][to].take()
    }

    /// Destinations of each row, cheapest first.
    fn ranked_rows(&self) -> Vec<Vec<usize>> {
        (0..self.len())
            .map(|from| {
                let mut row: Vec<usize> = (0..self.len()).collect();
                row.sort_by_key(|&to| self.cost(from, to));
                row
            })
            .collect()
    }
}

/// One step of a tour.
#[derive(Debug, Clone, Serialize)]
pub struct Leg<'a, T> {
    pub from_sentence: usize,
    pub to_sentence: usize,
    pub script: EditScript<'a, T>,
}

/// A closed cycle over a sentence set: each leg ends where the next begins,
/// and the last leg returns to the first one's start.
#[derive(Debug, Clone, Serialize)]
pub struct Tour<'a, T> {
    pub legs: Vec<Leg<'a, T>>,
}

impl<'a, T> Tour<'a, T> {
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn total_cost(&self) -> usize {
        self.legs.iter().map(|leg| leg.script.cost).sum()
    }

    pub fn scripts(&self) -> impl Iterator<Item = &EditScript<'a, T>> {
        self.legs.iter().map(|leg| &leg.script)
    }

    pub fn into_scripts(self) -> Vec<EditScript<'a, T>> {
        self.legs.into_iter().map(|leg| leg.script).collect()
    }

    /// Sentence indices in visiting order.
    pub fn order(&self) -> Vec<usize> {
        self.legs.iter().map(|leg| leg.from_sentence).collect()
    }
}

/// Plans the order in which `sentences` are cycled through.
pub fn build_tour<'a, T, R>(
    sentences: &'a [Vec<T>],
    options: TourOptions,
    rng: &mut R,
) -> Tour<'a, T>
where
    T: Word,
    R: Rng + ?Sized,
{
    let tour = match sentences.len() {
        0 => Tour { legs: Vec::new() },
        1 => {
            let only = &sentences[0];
            Tour {
                legs: vec![Leg {
                    from_sentence: 0,
                    to_sentence: 0,
                    script: compute_edit_script(only, only),
                }],
            }
        }
        _ if options.best => {
            let mut legs = nearest_neighbor_legs(CostMatrix::build(sentences));
            if options.random {
                let offset = rng.gen_range(0..legs.len());
                debug!(offset, "rotating tour start");
                legs.rotate_left(offset);
            }
            Tour { legs }
        }
        n => {
            let mut order: Vec<usize> = (0..n).collect();
            if options.random {
                order.shuffle(rng);
            }
            let legs = (0..n)
                .map(|k| {
                    let from_sentence = order[(k + n - 1) % n];
                    let to_sentence = order[k];
                    Leg {
                        from_sentence,
                        to_sentence,
                        script: compute_edit_script(
                            &sentences[from_sentence],
                            &sentences[to_sentence],
                        ),
                    }
                })
                .collect();
            Tour { legs }
        }
    };
    info!(
        sentences = sentences.len(),
        best = options.best,
        random = options.random,
        total_cost = tour.total_cost(),
        "planned tour"
    );
    tour
}

/// Greedy cycle: start at the sentence whose cheapest outgoing script is the
/// cheapest overall, always move to the cheapest unvisited sentence, then
/// return to the start.
fn nearest_neighbor_legs<'a, T>(mut matrix: CostMatrix<'a, T>) -> Vec<Leg<'a, T>> {
    let n = matrix.len();
    let ranked = matrix.ranked_rows();
    let start = (0..n)
        .min_by_key(|&from| matrix.cost(from, ranked[from][0]))
        .unwrap_or(0);

    let mut visited = vec![false; n];
    let mut legs = Vec::with_capacity(n);
    let mut current = start;
    for step in 0..n {
        visited[current] = true;
        let next = if step + 1 == n {
            start
        } else {
            match ranked[current].iter().copied().find(|&to| !visited[to]) {
                Some(to) => to,
                None => break,
            }
        };
        if let Some(script) = matrix.take(current, next) {
            legs.push(Leg {
                from_sentence: current,
                to_sentence: next,
                script,
            });
        }
        current = next;
    }
    legs
}
