//! Token economy: pricing, rate limiting, and the shop.

use bevy::prelude::*;

pub mod pricing;
pub mod rate_limit;
pub mod shop;

pub use pricing::{discounted_price, price_for_rarity, unit_buy_price, unit_sell_price};
pub use rate_limit::{ActionClass, ActionRateLimiter};
pub use shop::{buy_item, sell_item, PurchaseReceipt, SellReceipt};

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<rate_limit::ActionRateLimiter>()
            .add_systems(Update, (shop::handle_buy, shop::handle_sell));
    }
}
