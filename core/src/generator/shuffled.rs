use alloc::vec::Vec;

use super::*;

/// Deals every pair label twice and shuffles them uniformly (Fisher-Yates) from a seeded generator.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffledDeckGenerator {
    seed: u64,
}

impl ShuffledDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for ShuffledDeckGenerator {
    fn generate(self, config: GameConfig) -> Deck {
        use rand::prelude::*;
        use rand::rngs::SmallRng;

        let pairs = config.pair_count();
        if pairs == 0 {
            log::warn!(
                "Board of side {} has no room for a pair, dealing an empty deck",
                config.side
            );
        } else if config.total_cells() % 2 == 1 {
            log::debug!(
                "Board of side {} has an odd cell count, centre cell stays blank",
                config.side
            );
        }

        let mut values: Vec<PairValue> = (1..=pairs).chain(1..=pairs).collect();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        values.shuffle(&mut rng);

        Deck::from_values_unchecked(config.side, &values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_counts(deck: &Deck) -> Vec<usize> {
        let mut counts = alloc::vec![0; usize::from(deck.pair_count()) + 1];
        for card in deck.cards() {
            counts[usize::from(card.value)] += 1;
        }
        counts
    }

    #[test]
    fn every_label_is_dealt_exactly_twice() {
        for side in 2..=10 {
            let config = GameConfig::new(side, 0);
            let deck = ShuffledDeckGenerator::new(u64::from(side)).generate(config);
            let pairs = usize::from(config.total_cells() / 2);

            assert_eq!(deck.len(), pairs * 2, "side {side}");
            let counts = value_counts(&deck);
            assert_eq!(counts[0], 0);
            assert!(counts[1..].iter().all(|&count| count == 2), "side {side}");
        }
    }

    #[test]
    fn ids_are_unique_and_follow_board_order() {
        let deck = ShuffledDeckGenerator::new(7).generate(GameConfig::new(4, 0));

        for (raw, card) in (0..).zip(deck.cards()) {
            assert_eq!(card.id, CardId::new(raw));
        }
    }

    #[test]
    fn same_seed_deals_the_same_deck() {
        let config = GameConfig::new(6, 0);
        let a = ShuffledDeckGenerator::new(1234).generate(config);
        let b = ShuffledDeckGenerator::new(1234).generate(config);
        let c = ShuffledDeckGenerator::new(4321).generate(config);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn shuffle_moves_cards_out_of_dealing_order() {
        let config = GameConfig::new(10, 0);
        let deck = ShuffledDeckGenerator::new(99).generate(config);
        let pairs = config.pair_count();
        let unshuffled: Vec<PairValue> = (1..=pairs).chain(1..=pairs).collect();
        let dealt: Vec<PairValue> = deck.cards().iter().map(|card| card.value).collect();

        assert_ne!(dealt, unshuffled);
    }

    #[test]
    fn tiny_boards_deal_nothing() {
        let deck = ShuffledDeckGenerator::new(0).generate(GameConfig::new_unchecked(1, 0));

        assert!(deck.is_empty());
        assert_eq!(deck.blank_cell(), Some((0, 0)));
    }
}
