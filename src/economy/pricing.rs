//! Fibonacci-derived price model.
//!
//! Every monetary figure in the engine routes through these functions.
//! Item records may carry an explicit price as a legacy override; the
//! canonical path recomputes from rarity.

use crate::shared::*;

/// Fixed precomputed Fibonacci table. `fib` clamps at the upper bound so
/// out-of-range rarity indices stay defined.
const FIB: [u64; 16] = [0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233, 377, 610];

pub fn fib(n: usize) -> u64 {
    FIB[n.min(FIB.len() - 1)]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RarityPrice {
    pub buy: u64,
    pub sell: u64,
}

/// Buy/sell pricing for a rarity: buy at `fib(idx) * 10`, sell two
/// Fibonacci steps back, so selling is always a loss.
pub fn price_for_rarity(rarity: Rarity) -> RarityPrice {
    let idx = rarity.fib_index();
    RarityPrice {
        buy: fib(idx) * 10,
        sell: fib(idx.saturating_sub(2)) * 10,
    }
}

/// Applies the tier-dependent discount: `floor(base * (1 - discount))`.
pub fn discounted_price(base: u64, tier: Tier) -> u64 {
    (base as f64 * (1.0 - tier.discount())).floor() as u64
}

/// Unit buy price for an item: explicit override, else rarity-derived.
pub fn unit_buy_price(def: &ItemDef) -> u64 {
    def.price.unwrap_or_else(|| price_for_rarity(def.rarity).buy)
}

/// Unit sell value for an item. Collectibles have none — they never
/// leave the player in normal play.
pub fn unit_sell_price(def: &ItemDef) -> Option<u64> {
    if matches!(def.kind, ItemKind::Collectible) {
        return None;
    }
    Some(
        def.sell_price
            .unwrap_or_else(|| price_for_rarity(def.rarity).sell),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fib_clamps_at_bound() {
        assert_eq!(fib(0), 0);
        assert_eq!(fib(7), 13);
        assert_eq!(fib(15), 610);
        assert_eq!(fib(500), 610);
    }

    #[test]
    fn test_price_for_rarity_matches_table() {
        for rarity in [
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
        ] {
            let price = price_for_rarity(rarity);
            let idx = rarity.fib_index();
            assert_eq!(price.buy, fib(idx) * 10);
            assert_eq!(price.sell, fib(idx - 2) * 10);
            assert!(price.sell < price.buy, "{:?} must sell at a loss", rarity);
        }
        // Spot-check the canonical Uncommon pricing: fib(7)*10 = 130.
        assert_eq!(price_for_rarity(Rarity::Uncommon).buy, 130);
        assert_eq!(price_for_rarity(Rarity::Uncommon).sell, 50);
    }

    #[test]
    fn test_discount_floors() {
        assert_eq!(discounted_price(100, Tier::Ember), 100);
        assert_eq!(discounted_price(100, Tier::Flame), 90);
        assert_eq!(discounted_price(99, Tier::Flame), 89); // floor(89.1)
        assert_eq!(discounted_price(100, Tier::Inferno), 80);
    }

    #[test]
    fn test_sell_below_discounted_buy_at_every_tier() {
        // Even at the deepest discount a buy→sell round trip never profits.
        for rarity in [
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
        ] {
            let price = price_for_rarity(rarity);
            for tier in [Tier::Ember, Tier::Spark, Tier::Flame, Tier::Blaze, Tier::Inferno] {
                assert!(price.sell <= discounted_price(price.buy, tier));
            }
        }
    }

    #[test]
    fn test_explicit_price_overrides_rarity() {
        let def = ItemDef {
            id: "legacy_widget".into(),
            name: "Legacy Widget".into(),
            description: String::new(),
            kind: ItemKind::Material,
            rarity: Rarity::Rare,
            price: Some(42),
            sell_price: Some(7),
            stackable: true,
            max_stack: 99,
        };
        assert_eq!(unit_buy_price(&def), 42);
        assert_eq!(unit_sell_price(&def), Some(7));
    }

    #[test]
    fn test_collectibles_have_no_sell_value() {
        let def = ItemDef {
            id: "founder_badge".into(),
            name: "Founder Badge".into(),
            description: String::new(),
            kind: ItemKind::Collectible,
            rarity: Rarity::Epic,
            price: None,
            sell_price: None,
            stackable: false,
            max_stack: 1,
        };
        assert_eq!(unit_sell_price(&def), None);
    }
}
