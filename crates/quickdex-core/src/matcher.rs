//! Fuzzy subsequence matcher
//!
//! Aligns a search term against a candidate string as a case-insensitive
//! ordered subsequence and keeps the best-scoring alignment. Scores are never
//! positive: every skipped candidate character costs `0.01`, and every new
//! run of matched characters ("chunk") costs the number of chunks already
//! started plus `0.1` per word boundary crossed before it.
//!
//! Costs are accumulated as integer hundredths so that equal alignments
//! always produce bit-identical scores.

/// Marker inserted before every matched character of a marked-up string
pub const MATCH_MARKER: char = '&';

const SKIP_COST: u32 = 1;
const CHUNK_COST: u32 = 100;
const WORD_COST: u32 = 10;

/// Score reported when a term cannot be aligned with a candidate
pub fn score_not_found() -> f64 {
    f64::NEG_INFINITY
}

/// Whether `score` is the not-found sentinel
pub fn is_not_found(score: f64) -> bool {
    score == f64::NEG_INFINITY
}

/// Strip all whitespace and upper-case the remainder.
///
/// The result is used both as the matching key and as the history key.
pub fn normalize_term(term: &str) -> String {
    term.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Outcome of matching a term against a candidate
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub score: f64,
    /// Candidate with [`MATCH_MARKER`] before each matched character
    pub marked_up: String,
}

impl Match {
    fn not_found(candidate: &str) -> Self {
        Self {
            score: score_not_found(),
            marked_up: candidate.to_string(),
        }
    }

    pub fn is_found(&self) -> bool {
        !is_not_found(self.score)
    }
}

/// Find the best alignment of `term` inside `candidate`.
///
/// An empty term never matches; the candidate is returned unannotated with
/// the not-found score so callers can still enumerate items without a filter.
/// Very long terms against very long candidates are aligned leftmost instead
/// of optimally.
pub fn fuzzy_match(term: &str, candidate: &str) -> Match {
    if term.is_empty() {
        return Match::not_found(candidate);
    }

    let term: Vec<char> = term.chars().collect();
    let chars: Vec<char> = candidate.chars().collect();
    if !is_aligned(&term, &chars) {
        return Match::not_found(candidate);
    }

    match Aligner::new(&term, &chars).align() {
        Some((cost, matched)) => Match {
            score: 0.0 - cost as f64 / 100.0,
            marked_up: mark_up(&chars, &matched),
        },
        None => Match::not_found(candidate),
    }
}

/// Score only; see [`fuzzy_match`]
pub fn match_score(term: &str, candidate: &str) -> f64 {
    fuzzy_match(term, candidate).score
}

fn chars_equal(a: char, b: char) -> bool {
    a == b || a.to_uppercase().eq(b.to_uppercase())
}

/// Whether `term` occurs in `chars` as an ordered subsequence
fn is_aligned(term: &[char], chars: &[char]) -> bool {
    let mut rest = chars.iter();
    term.iter()
        .all(|&t| rest.by_ref().any(|&c| chars_equal(t, c)))
}

fn mark_up(chars: &[char], matched: &[bool]) -> String {
    let mut out = String::with_capacity(chars.len() * 2);
    for (&c, &is_match) in chars.iter().zip(matched) {
        if is_match {
            out.push(MATCH_MARKER);
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct State {
    /// Next term character to consume
    ti: usize,
    /// Next candidate position to examine
    si: usize,
    /// Previous step consumed a character
    chained: bool,
    /// Chunks started so far
    chunks: usize,
}

impl State {
    const START: State = State {
        ti: 0,
        si: 0,
        chained: false,
        chunks: 0,
    };
}

#[derive(Debug, Clone, Copy)]
struct Choice {
    cost: u32,
    next: State,
    /// Candidate position consumed by this step, if any
    taken: Option<usize>,
}

/// Table entry for states from which the rest of the term cannot be aligned
const UNALIGNED: u32 = u32::MAX;

/// Upper bound on table entries; larger pairs fall back to leftmost alignment
const MAX_TABLE_CELLS: usize = 1 << 24;

/// Dynamic program over (term position, candidate position, chain, chunks).
///
/// The table holds the cheapest remaining cost of every state and is filled
/// from the end of the candidate backwards, so no evaluation recurses. At
/// each state the skip branch is considered first and only replaced by a
/// strictly cheaper take branch, which reproduces first-found tie breaking
/// of a depth-first search that tries skipping before matching.
struct Aligner<'a> {
    term: &'a [char],
    chars: &'a [char],
    /// Position actually examined when a step starts at `i`; whitespace runs
    /// collapse onto their last character
    step_at: Vec<usize>,
    /// Word index in effect for a step starting at `i`
    word_at: Vec<usize>,
    table: Vec<u32>,
}

impl<'a> Aligner<'a> {
    fn new(term: &'a [char], chars: &'a [char]) -> Self {
        let n = chars.len();

        let mut step_at = vec![0; n];
        for i in (0..n).rev() {
            step_at[i] = if chars[i].is_whitespace() && i + 1 < n && chars[i + 1].is_whitespace() {
                step_at[i + 1]
            } else {
                i
            };
        }

        let mut word_at = vec![0; n];
        let mut word = 0;
        for i in 0..n {
            if chars[i].is_whitespace() && (i == 0 || !chars[i - 1].is_whitespace()) {
                word += 1;
            }
            word_at[i] = word;
        }

        Self {
            term,
            chars,
            step_at,
            word_at,
            table: Vec::new(),
        }
    }

    /// Cost and matched positions of the chosen alignment
    fn align(mut self) -> Option<(u64, Vec<bool>)> {
        let m = self.term.len();
        let cells = self
            .chars
            .len()
            .checked_mul(2 * m * m)
            .filter(|&cells| cells <= MAX_TABLE_CELLS);
        match cells {
            Some(cells) => {
                self.table = vec![UNALIGNED; cells];
                self.fill();
                self.trace()
            }
            None => self.leftmost(),
        }
    }

    fn index(&self, state: State) -> usize {
        let m = self.term.len();
        ((state.si * m + state.ti) * 2 + usize::from(state.chained)) * m + state.chunks
    }

    fn fill(&mut self) {
        let n = self.chars.len();
        let m = self.term.len();
        for si in (0..n).rev() {
            for ti in 0..m {
                if n - si < m - ti {
                    continue;
                }
                for chained in [false, true] {
                    for chunks in 0..=ti {
                        let state = State {
                            ti,
                            si,
                            chained,
                            chunks,
                        };
                        let cost = self.choose(state).map_or(UNALIGNED, |c| c.cost);
                        let index = self.index(state);
                        self.table[index] = cost;
                    }
                }
            }
        }
    }

    /// Cheapest remaining cost from `state`, if the term can still be aligned
    fn rest(&self, state: State) -> Option<u32> {
        let n = self.chars.len();
        let m = self.term.len();
        if state.ti == m {
            return Some(0);
        }
        if state.si >= n || n - state.si < m - state.ti {
            return None;
        }
        match self.table[self.index(state)] {
            UNALIGNED => None,
            cost => Some(cost),
        }
    }

    /// Decision at `state`, given that every later state is already filled
    fn choose(&self, state: State) -> Option<Choice> {
        let pos = self.step_at[state.si];

        let skip_next = State {
            si: pos + 1,
            chained: false,
            ..state
        };
        let mut choice = self.rest(skip_next).map(|rest| Choice {
            cost: rest.saturating_add(SKIP_COST),
            next: skip_next,
            taken: None,
        });

        if chars_equal(self.term[state.ti], self.chars[pos]) {
            let (step_cost, take_next) = self.take(state, pos);
            if let Some(rest) = self.rest(take_next) {
                let cost = rest.saturating_add(step_cost);
                if choice.map_or(true, |c| cost < c.cost) {
                    choice = Some(Choice {
                        cost,
                        next: take_next,
                        taken: Some(pos),
                    });
                }
            }
        }

        choice
    }

    /// Cost of consuming the candidate character at `pos`, and the state after
    fn take(&self, state: State, pos: usize) -> (u32, State) {
        let word = self.word_at[state.si] as u32;
        let (step_cost, chunks) = if state.chained {
            (0, state.chunks)
        } else {
            (
                (state.chunks as u32)
                    .saturating_mul(CHUNK_COST)
                    .saturating_add(word.saturating_mul(WORD_COST)),
                state.chunks + 1,
            )
        };
        let next = State {
            ti: state.ti + 1,
            si: pos + 1,
            chained: true,
            chunks,
        };
        (step_cost, next)
    }

    /// Replay the table decisions from the start state
    fn trace(&self) -> Option<(u64, Vec<bool>)> {
        let mut matched = vec![false; self.chars.len()];
        let cost = u64::from(self.choose(State::START)?.cost);
        let mut state = State::START;
        while state.ti < self.term.len() {
            let choice = self.choose(state)?;
            if let Some(pos) = choice.taken {
                matched[pos] = true;
            }
            state = choice.next;
        }
        Some((cost, matched))
    }

    /// Take every matching character as early as possible
    fn leftmost(&self) -> Option<(u64, Vec<bool>)> {
        let mut matched = vec![false; self.chars.len()];
        let mut state = State::START;
        let mut cost = 0u64;
        while state.ti < self.term.len() && state.si < self.chars.len() {
            let pos = self.step_at[state.si];
            if chars_equal(self.term[state.ti], self.chars[pos]) {
                let (step_cost, next) = self.take(state, pos);
                cost += u64::from(step_cost);
                matched[pos] = true;
                state = next;
            } else {
                cost += u64::from(SKIP_COST);
                state = State {
                    si: pos + 1,
                    chained: false,
                    ..state
                };
            }
        }
        (state.ti == self.term.len()).then_some((cost, matched))
    }
}
