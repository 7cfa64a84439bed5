//! Solvability-biased dealing.
//!
//! ## Shape of a deal
//!
//! The normal ("winnable") setup fills the four tableau stacks to target
//! sizes `[2, 3, 3, 4]` from the shuffled regular pool, sometimes seeding
//! one immediately reachable topic card, and shuffles everything left over
//! into the draw pile. Post-processing then patches the worst dead-end
//! shapes:
//!
//! - an entirely empty tableau gets one card from the draw pile
//! - a board with no topic card near any stack top gets one surfaced from
//!   a deep draw pile
//! - adjacent same-topic regular cards are pulled apart (the lower card
//!   would be unreachable behind a run that offers no progress)
//! - topic cards duplicated between tableau and draw pile are dropped from
//!   the draw pile
//!
//! The degenerate zero-topic deal skips all of that: regulars are spread
//! by jittered visible counts and the remainder becomes the draw pile.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

use crate::board::TABLEAU_COUNT;
use crate::catalog::TopicCatalog;
use crate::core::{CardId, GameRng, TopicId};

/// Per-stack target sizes for the winnable setup.
const STACK_TARGETS: [usize; TABLEAU_COUNT] = [2, 3, 3, 4];

/// Base visible counts for the degenerate zero-topic deal.
const BASE_VISIBLE_COUNTS: [usize; TABLEAU_COUNT] = [2, 3, 4, 5];

/// Draw piles at or below this size are left alone by the
/// surface-a-topic-card patch.
const TOPIC_SURFACING_MIN_DECK: usize = 10;

/// An initial board layout: four tableau stacks plus the draw pile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    /// Tableau stacks, bottom to top.
    pub tableau: [Vec<CardId>; TABLEAU_COUNT],
    /// Draw pile, consumed from the front.
    pub draw_pile: Vec<CardId>,
}

impl Deal {
    /// Total cards placed by this deal.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.tableau.iter().map(Vec::len).sum::<usize>() + self.draw_pile.len()
    }
}

/// Deal an opening board for the given topic set.
pub fn generate(catalog: &TopicCatalog, topics: &[TopicId], rng: &mut GameRng) -> Deal {
    let topic_cards: Vec<CardId> = topics.iter().map(|&id| catalog.topic(id).card).collect();
    let members: Vec<CardId> = topics
        .iter()
        .flat_map(|&id| catalog.topic(id).members.iter().copied())
        .collect();

    distribute(catalog, &members, &topic_cards, rng)
}

/// Deal from explicit card pools.
///
/// `cards` is the member-card pool, `topic_cards` the topic-card pool;
/// both are deduplicated, and any topic card accidentally present in
/// `cards` is treated as a topic card. An empty topic pool produces the
/// degenerate deal.
pub fn distribute(
    catalog: &TopicCatalog,
    cards: &[CardId],
    topic_cards: &[CardId],
    rng: &mut GameRng,
) -> Deal {
    let topic_pool = dedup(topic_cards);
    let topic_set: FxHashSet<CardId> = topic_pool.iter().copied().collect();
    let regular_pool: Vec<CardId> = dedup(cards)
        .into_iter()
        .filter(|card| !topic_set.contains(card))
        .collect();

    let deal = if topic_pool.is_empty() {
        degenerate_setup(regular_pool, rng)
    } else {
        winnable_setup(catalog, topic_pool, regular_pool, rng)
    };

    debug!(
        "dealt {} tableau cards, {} draw cards",
        deal.card_count() - deal.draw_pile.len(),
        deal.draw_pile.len()
    );

    deal
}

fn dedup(cards: &[CardId]) -> Vec<CardId> {
    let mut seen = FxHashSet::default();
    cards
        .iter()
        .copied()
        .filter(|card| seen.insert(*card))
        .collect()
}

/// Zero-topic deal: spread regulars by jittered visible counts, remainder
/// to the draw pile. No post-processing; with no topics in play the board
/// cannot be won anyway.
fn degenerate_setup(mut regulars: Vec<CardId>, rng: &mut GameRng) -> Deal {
    rng.shuffle(&mut regulars);
    let counts = visible_counts(rng);

    let mut tableau: [Vec<CardId>; TABLEAU_COUNT] = Default::default();
    let mut next = 0;
    for (stack, &count) in tableau.iter_mut().zip(counts.iter()) {
        while stack.len() < count && next < regulars.len() {
            stack.push(regulars[next]);
            next += 1;
        }
    }

    Deal {
        tableau,
        draw_pile: regulars.split_off(next),
    }
}

/// Jitter the base sizes by -1 or 0 (clamped to at least 1), then shuffle
/// which stack gets which count.
fn visible_counts(rng: &mut GameRng) -> [usize; TABLEAU_COUNT] {
    let mut counts = BASE_VISIBLE_COUNTS;
    for count in &mut counts {
        let variation = rng.gen_range_usize(0..2);
        *count = (*count + variation - 1).max(1);
    }
    rng.shuffle(&mut counts);
    counts
}

fn winnable_setup(
    catalog: &TopicCatalog,
    mut topic_pool: Vec<CardId>,
    mut regular_pool: Vec<CardId>,
    rng: &mut GameRng,
) -> Deal {
    rng.shuffle(&mut topic_pool);
    rng.shuffle(&mut regular_pool);

    let mut topics: VecDeque<CardId> = topic_pool.into();
    let mut regulars: VecDeque<CardId> = regular_pool.into();

    // Half the deals seed one immediately reachable topic card: the top
    // slot of the last stack.
    let should_place_topic = rng.gen_bool(0.5);
    let mut topic_placed = false;

    let mut tableau: [Vec<CardId>; TABLEAU_COUNT] = Default::default();
    for (stack_index, target) in STACK_TARGETS.iter().enumerate() {
        for card_index in 0..*target {
            let reserve_for_topic = should_place_topic
                && !topic_placed
                && stack_index == TABLEAU_COUNT - 1
                && card_index == target - 1
                && !topics.is_empty();

            let card = if reserve_for_topic {
                topic_placed = true;
                topics.pop_front()
            } else {
                regulars.pop_front()
            };

            if let Some(card) = card {
                tableau[stack_index].push(card);
            }
        }
    }

    let mut draw_pile: Vec<CardId> = topics.into_iter().chain(regulars).collect();
    rng.shuffle(&mut draw_pile);

    ensure_winnable(catalog, &mut tableau, &mut draw_pile);

    Deal { tableau, draw_pile }
}

/// Patch the dealt board so an opening move and a reachable topic card
/// exist where possible.
fn ensure_winnable(
    catalog: &TopicCatalog,
    tableau: &mut [Vec<CardId>; TABLEAU_COUNT],
    draw_pile: &mut Vec<CardId>,
) {
    // An entirely empty tableau has nothing to interact with.
    let all_empty = tableau.iter().all(Vec::is_empty);
    if all_empty && !draw_pile.is_empty() {
        let card = draw_pile.remove(0);
        tableau[0].push(card);
    }

    // Surface a topic card if none sits within the top two of any stack
    // and the draw pile is deep enough that waiting one out is painful.
    let accessible_topic = tableau.iter().any(|stack| {
        stack
            .iter()
            .rev()
            .take(2)
            .any(|&card| catalog.is_topic_card(card))
    });

    if !accessible_topic && draw_pile.len() > TOPIC_SURFACING_MIN_DECK {
        if let Some(pos) = draw_pile.iter().position(|&c| catalog.is_topic_card(c)) {
            let topic_card = draw_pile.remove(pos);
            let already_placed = tableau.iter().any(|stack| stack.contains(&topic_card));

            if already_placed {
                draw_pile.push(topic_card);
            } else {
                let shortest = shortest_stack(tableau);
                tableau[shortest].push(topic_card);
            }
        }
    }

    separate_topic_related(catalog, tableau);

    // A topic card both resident on the tableau and pending in the draw
    // pile would leave one of the two copies unplayable.
    let resident_topics: FxHashSet<CardId> = tableau
        .iter()
        .flatten()
        .copied()
        .filter(|&card| catalog.is_topic_card(card))
        .collect();

    draw_pile.retain(|card| !catalog.is_topic_card(*card) || !resident_topics.contains(card));
}

/// Pull apart adjacent same-topic regular cards.
///
/// The lower card of such a pair is unreachable: the run above it can
/// only move as a unit and never onto its own topic slot past the buried
/// card, so the deal pre-merges progress away. Conflicts are collected
/// first and resolved in reverse index order to keep indices stable.
fn separate_topic_related(catalog: &TopicCatalog, tableau: &mut [Vec<CardId>; TABLEAU_COUNT]) {
    let mut conflicts: Vec<(usize, usize)> = Vec::new();

    for (stack_index, stack) in tableau.iter().enumerate() {
        for card_index in 0..stack.len().saturating_sub(1) {
            let current = stack[card_index];
            let next = stack[card_index + 1];

            let same_topic = match (catalog.card_topic(current), catalog.card_topic(next)) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            };

            if same_topic && !catalog.is_topic_card(current) && !catalog.is_topic_card(next) {
                conflicts.push((stack_index, card_index + 1));
            }
        }
    }

    for &(stack_index, card_index) in conflicts.iter().rev() {
        if card_index >= tableau[stack_index].len() {
            continue;
        }
        let moved = tableau[stack_index].remove(card_index);
        let moved_topic = catalog.card_topic(moved);

        // Prefer the shortest other stack that does not end in the same
        // unresolved pairing.
        let mut best: Option<usize> = None;
        let mut min_size = usize::MAX;
        for (j, target) in tableau.iter().enumerate() {
            if j == stack_index {
                continue;
            }
            let top_conflicts = target.last().is_some_and(|&top| {
                catalog.card_topic(top) == moved_topic && !catalog.is_topic_card(top)
            });
            if !top_conflicts && target.len() < min_size {
                best = Some(j);
                min_size = target.len();
            }
        }

        if best.is_none() {
            best = shortest_stack_excluding(tableau, stack_index, min_size);
        }

        let destination = best.unwrap_or((stack_index + 1) % TABLEAU_COUNT);
        tableau[destination].push(moved);
    }
}

/// Index of the shortest stack. Ties go to the lowest index.
fn shortest_stack(tableau: &[Vec<CardId>; TABLEAU_COUNT]) -> usize {
    let mut shortest = usize::MAX;
    let mut best = 0;
    for (i, stack) in tableau.iter().enumerate() {
        if stack.len() < shortest {
            shortest = stack.len();
            best = i;
        }
    }
    best
}

/// Shortest stack other than `skip` with fewer than `below` cards.
fn shortest_stack_excluding(
    tableau: &[Vec<CardId>; TABLEAU_COUNT],
    skip: usize,
    mut below: usize,
) -> Option<usize> {
    let mut best = None;
    for (j, stack) in tableau.iter().enumerate() {
        if j != skip && stack.len() < below {
            best = Some(j);
            below = stack.len();
        }
    }
    best
}
