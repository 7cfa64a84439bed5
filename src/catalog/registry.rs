//! Catalog registration and lookup.
//!
//! The `TopicCatalog` interns every card name to a `CardId`, stores topics
//! per difficulty tier, and answers the two queries the validator leans on:
//! "is this a topic card?" and "which topic does this card belong to?".
//!
//! Registration panics on invariant violations (duplicate names,
//! overlapping memberships). Those are host programming errors in the
//! content data, not runtime conditions.

use rustc_hash::FxHashMap;

use super::topic::Topic;
use crate::core::{CardId, Difficulty, GameRng, TopicId};

/// Minimum number of topics a session tries to select.
const SESSION_TOPICS_MIN: usize = 6;
/// Maximum number of topics a session tries to select.
const SESSION_TOPICS_MAX: usize = 10;
/// Retry budget when re-rolling a duplicate topic pick.
const DUPLICATE_RETRY_LIMIT: usize = 50;

/// Registry of topics and interned card names.
///
/// ## Example
///
/// ```
/// use topic_solitaire::catalog::TopicCatalog;
/// use topic_solitaire::core::Difficulty;
///
/// let mut catalog = TopicCatalog::new();
/// let fruits = catalog.add_topic(Difficulty::Easy, "Fruits", &["Apple", "Banana"]);
///
/// let apple = catalog.card_id("Apple").unwrap();
/// assert_eq!(catalog.card_topic(apple), Some(fruits));
/// assert!(!catalog.is_topic_card(apple));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TopicCatalog {
    /// Interned names, indexed by `CardId`.
    names: Vec<String>,
    /// Reverse name lookup.
    ids: FxHashMap<String, CardId>,
    /// Topics, indexed by `TopicId`.
    topics: Vec<Topic>,
    /// Owning topic for every card: members map to their topic, topic
    /// cards map to themselves.
    owner: FxHashMap<CardId, TopicId>,
    /// Which of the owners are topic cards.
    topic_cards: FxHashMap<CardId, TopicId>,
    /// Topic IDs per difficulty tier.
    tiers: [Vec<TopicId>; 3],
}

impl TopicCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a topic with its member card names.
    ///
    /// Panics if the topic name or any member name is already registered,
    /// or if a member equals the topic name. Card names must be unique
    /// across the whole catalog.
    pub fn add_topic(&mut self, tier: Difficulty, name: &str, members: &[&str]) -> TopicId {
        let id = TopicId::new(
            u16::try_from(self.topics.len()).expect("more than u16::MAX topics registered"),
        );

        let topic_card = self.intern_new(name);

        let mut member_ids = Vec::with_capacity(members.len());
        for member in members {
            if *member == name {
                panic!("Topic {name:?} lists itself as a member");
            }
            member_ids.push(self.intern_new(member));
        }

        for &member in &member_ids {
            self.owner.insert(member, id);
        }
        self.owner.insert(topic_card, id);
        self.topic_cards.insert(topic_card, id);
        self.tiers[tier_index(tier)].push(id);

        self.topics.push(Topic {
            id,
            card: topic_card,
            tier,
            members: member_ids,
        });

        id
    }

    fn intern_new(&mut self, name: &str) -> CardId {
        if self.ids.contains_key(name) {
            panic!("Card name {name:?} already registered");
        }
        let id = CardId::new(
            u32::try_from(self.names.len()).expect("more than u32::MAX cards registered"),
        );
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    // === Lookup ===

    /// Look up a card by name.
    #[must_use]
    pub fn card_id(&self, name: &str) -> Option<CardId> {
        self.ids.get(name).copied()
    }

    /// Get a card's name.
    #[must_use]
    pub fn card_name(&self, card: CardId) -> &str {
        &self.names[card.raw() as usize]
    }

    /// Get a topic by ID.
    #[must_use]
    pub fn topic(&self, id: TopicId) -> &Topic {
        &self.topics[id.raw() as usize]
    }

    /// Is this card a topic card?
    #[must_use]
    pub fn is_topic_card(&self, card: CardId) -> bool {
        self.topic_cards.contains_key(&card)
    }

    /// The topic a card is associated with.
    ///
    /// A member card maps to its owning topic; a topic card maps to its
    /// own topic. Returns `None` for cards outside the catalog.
    #[must_use]
    pub fn card_topic(&self, card: CardId) -> Option<TopicId> {
        self.owner.get(&card).copied()
    }

    /// Is `card` a member of `topic` (the topic card itself excluded)?
    #[must_use]
    pub fn belongs_to(&self, card: CardId, topic: TopicId) -> bool {
        !self.is_topic_card(card) && self.card_topic(card) == Some(topic)
    }

    /// Number of registered topics.
    #[must_use]
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Number of interned card names.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.names.len()
    }

    /// Check if the catalog has no topics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Total cards a set of topics brings into play: all members plus one
    /// topic card each.
    #[must_use]
    pub fn total_cards(&self, topics: &[TopicId]) -> usize {
        topics
            .iter()
            .map(|&id| self.topic(id).collection_size())
            .sum()
    }

    // === Tier sampling ===

    /// Topics registered for a difficulty tier.
    #[must_use]
    pub fn topics_for_difficulty(&self, tier: Difficulty) -> &[TopicId] {
        &self.tiers[tier_index(tier)]
    }

    /// Pick one random topic from a tier.
    #[must_use]
    pub fn pick_random_topic(&self, rng: &mut GameRng, tier: Difficulty) -> Option<TopicId> {
        rng.choose(self.topics_for_difficulty(tier)).copied()
    }

    /// Assemble a session's active topic set.
    ///
    /// Draws a uniform count in [6, 10] and picks that many random topics
    /// from the tier, re-rolling duplicates up to 50 times per pick. When
    /// the tier is too small (or the retry budget runs out) the result
    /// simply holds fewer topics; the session proceeds with whatever was
    /// collected.
    #[must_use]
    pub fn select_topics(&self, rng: &mut GameRng, tier: Difficulty) -> Vec<TopicId> {
        let count = rng.gen_range_usize(SESSION_TOPICS_MIN..SESSION_TOPICS_MAX + 1);
        let mut selected = Vec::with_capacity(count);

        for _ in 0..count {
            let mut pick = self.pick_random_topic(rng, tier);
            let mut attempts = 0;

            while let Some(topic) = pick {
                if !selected.contains(&topic) || attempts >= DUPLICATE_RETRY_LIMIT {
                    break;
                }
                pick = self.pick_random_topic(rng, tier);
                attempts += 1;
            }

            if let Some(topic) = pick {
                if !selected.contains(&topic) {
                    selected.push(topic);
                }
            }
        }

        selected
    }
}

const fn tier_index(tier: Difficulty) -> usize {
    match tier {
        Difficulty::Easy => 0,
        Difficulty::Medium => 1,
        Difficulty::Hard => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruits_catalog() -> (TopicCatalog, TopicId) {
        let mut catalog = TopicCatalog::new();
        let fruits = catalog.add_topic(Difficulty::Easy, "Fruits", &["Apple", "Banana"]);
        (catalog, fruits)
    }

    #[test]
    fn test_register_and_lookup() {
        let (catalog, fruits) = fruits_catalog();

        assert_eq!(catalog.topic_count(), 1);
        assert_eq!(catalog.card_count(), 3);

        let topic_card = catalog.card_id("Fruits").unwrap();
        let apple = catalog.card_id("Apple").unwrap();

        assert!(catalog.is_topic_card(topic_card));
        assert!(!catalog.is_topic_card(apple));

        // Topic cards map to their own topic, members to their owner.
        assert_eq!(catalog.card_topic(topic_card), Some(fruits));
        assert_eq!(catalog.card_topic(apple), Some(fruits));

        assert!(catalog.belongs_to(apple, fruits));
        assert!(!catalog.belongs_to(topic_card, fruits));

        assert_eq!(catalog.card_name(apple), "Apple");
        assert_eq!(catalog.topic(fruits).member_count(), 2);
    }

    #[test]
    fn test_card_id_unknown() {
        let (catalog, _) = fruits_catalog();
        assert_eq!(catalog.card_id("Mango"), None);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_topic_name_panics() {
        let mut catalog = TopicCatalog::new();
        catalog.add_topic(Difficulty::Easy, "Fruits", &["Apple"]);
        catalog.add_topic(Difficulty::Easy, "Fruits", &["Mango"]);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_shared_member_panics() {
        let mut catalog = TopicCatalog::new();
        catalog.add_topic(Difficulty::Easy, "Fruits", &["Apple"]);
        catalog.add_topic(Difficulty::Easy, "Computers", &["Apple"]);
    }

    #[test]
    #[should_panic(expected = "lists itself")]
    fn test_self_member_panics() {
        let mut catalog = TopicCatalog::new();
        catalog.add_topic(Difficulty::Easy, "Fruits", &["Fruits"]);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_member_colliding_with_topic_name_panics() {
        let mut catalog = TopicCatalog::new();
        catalog.add_topic(Difficulty::Easy, "Fruits", &["Apple"]);
        catalog.add_topic(Difficulty::Easy, "Words", &["Fruits"]);
    }

    #[test]
    fn test_tier_partitioning() {
        let mut catalog = TopicCatalog::new();
        let easy = catalog.add_topic(Difficulty::Easy, "Fruits", &["Apple"]);
        let hard = catalog.add_topic(Difficulty::Hard, "Quarks", &["Charm"]);

        assert_eq!(catalog.topics_for_difficulty(Difficulty::Easy), &[easy]);
        assert_eq!(catalog.topics_for_difficulty(Difficulty::Hard), &[hard]);
        assert!(catalog.topics_for_difficulty(Difficulty::Medium).is_empty());
    }

    #[test]
    fn test_pick_random_topic_empty_tier() {
        let (catalog, _) = fruits_catalog();
        let mut rng = GameRng::new(7);
        assert_eq!(catalog.pick_random_topic(&mut rng, Difficulty::Hard), None);
    }

    #[test]
    fn test_select_topics_unique() {
        let mut catalog = TopicCatalog::new();
        for i in 0..12 {
            let name = format!("Topic{i}");
            let member = format!("Member{i}");
            catalog.add_topic(Difficulty::Easy, &name, &[&member]);
        }

        let mut rng = GameRng::new(3);
        let selected = catalog.select_topics(&mut rng, Difficulty::Easy);

        assert!(selected.len() >= SESSION_TOPICS_MIN);
        assert!(selected.len() <= SESSION_TOPICS_MAX);

        let mut deduped = selected.clone();
        deduped.sort_by_key(|t| t.raw());
        deduped.dedup();
        assert_eq!(deduped.len(), selected.len());
    }

    #[test]
    fn test_select_topics_degrades_on_small_tier() {
        let mut catalog = TopicCatalog::new();
        catalog.add_topic(Difficulty::Easy, "Fruits", &["Apple"]);
        catalog.add_topic(Difficulty::Easy, "Colors", &["Red"]);

        let mut rng = GameRng::new(9);
        let selected = catalog.select_topics(&mut rng, Difficulty::Easy);

        // Only two unique topics exist; the session proceeds with them.
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_select_topics_empty_tier() {
        let (catalog, _) = fruits_catalog();
        let mut rng = GameRng::new(1);
        assert!(catalog
            .select_topics(&mut rng, Difficulty::Medium)
            .is_empty());
    }

    #[test]
    fn test_select_topics_deterministic() {
        let mut catalog = TopicCatalog::new();
        for i in 0..20 {
            let name = format!("Topic{i}");
            let member = format!("Member{i}");
            catalog.add_topic(Difficulty::Medium, &name, &[&member]);
        }

        let mut rng1 = GameRng::new(11);
        let mut rng2 = GameRng::new(11);

        assert_eq!(
            catalog.select_topics(&mut rng1, Difficulty::Medium),
            catalog.select_topics(&mut rng2, Difficulty::Medium)
        );
    }

    #[test]
    fn test_total_cards() {
        let mut catalog = TopicCatalog::new();
        let a = catalog.add_topic(Difficulty::Easy, "Fruits", &["Apple", "Banana"]);
        let b = catalog.add_topic(Difficulty::Easy, "Colors", &["Red", "Green", "Blue"]);

        assert_eq!(catalog.total_cards(&[a, b]), 3 + 4);
        assert_eq!(catalog.total_cards(&[]), 0);
    }
}
