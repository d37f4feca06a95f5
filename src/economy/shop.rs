//! Shop engine: validated buy and sell flows over the item catalog.
//!
//! Both directions run the same shape: validate the request, check the
//! rate limiter, price the batch, dry-run the inventory change, then
//! commit tokens and stock together. A request that fails any step
//! leaves the player untouched.

use bevy::prelude::*;

use crate::economy::pricing::{discounted_price, unit_buy_price, unit_sell_price};
use crate::economy::rate_limit::{ActionClass, ActionRateLimiter};
use crate::inventory;
use crate::shared::*;

#[derive(Debug, Clone)]
pub struct PurchaseReceipt {
    pub item_id: ItemId,
    pub item_name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub total_paid: u64,
    pub discount_applied: f64,
    pub collectible_found: bool,
}

#[derive(Debug, Clone)]
pub struct SellReceipt {
    pub item_id: ItemId,
    pub item_name: String,
    pub quantity: u32,
    pub total_earned: u64,
}

fn validate_request(item_id: &str, quantity: u32) -> Result<(), EngineError> {
    if item_id.is_empty() || item_id.len() > MAX_ITEM_ID_LEN {
        return Err(EngineError::Validation(format!(
            "malformed item id ({} chars)",
            item_id.len()
        )));
    }
    if quantity == 0 || quantity > MAX_PURCHASE_QTY {
        return Err(EngineError::Validation(format!(
            "quantity must be 1-{}, got {}",
            MAX_PURCHASE_QTY, quantity
        )));
    }
    Ok(())
}

/// Buys `quantity` units of an item. The batch price is discounted by
/// the player's tier before the affordability check. Rejected requests
/// mutate nothing; only a committed purchase consumes rate budget.
pub fn buy_item(
    player: &mut PlayerState,
    catalog: &ItemCatalog,
    limiter: &mut ActionRateLimiter,
    now: f64,
    item_id: &str,
    quantity: u32,
) -> Result<PurchaseReceipt, EngineError> {
    validate_request(item_id, quantity)?;
    limiter.check(ActionClass::Buy, now)?;

    let def = catalog
        .get(item_id)
        .ok_or_else(|| EngineError::NotFound(format!("unknown item '{}'", item_id)))?;

    let required = def.rarity.required_tier();
    if player.tier < required {
        return Err(EngineError::Precondition(format!(
            "{} items unlock at {} tier (you are {})",
            def.rarity.label(),
            required.label(),
            player.tier.label()
        )));
    }

    let unit_price = unit_buy_price(def);
    let total_cost = discounted_price(unit_price * quantity as u64, player.tier);

    // Capacity check before any money moves. A purchase that cannot be
    // stocked in full is rejected, not partially filled.
    if inventory::addable_quantity(player, def, quantity) < quantity {
        return Err(EngineError::Precondition(format!(
            "not enough room for {}x {} (stack cap {})",
            quantity, def.name, def.max_stack
        )));
    }

    player.try_spend_tokens(total_cost)?;
    let receipt = inventory::add_item(player, def, quantity, now);
    if receipt.added < quantity {
        // The dry run said it fit; treat a shortfall here as a bug and
        // refund rather than silently eating tokens.
        player.tokens = player.tokens.saturating_add(total_cost);
        player.lifetime.tokens_spent = player.lifetime.tokens_spent.saturating_sub(total_cost);
        return Err(EngineError::Precondition(format!(
            "could not stock {}x {}",
            quantity, def.name
        )));
    }

    limiter.record(ActionClass::Buy, now);

    Ok(PurchaseReceipt {
        item_id: def.id.clone(),
        item_name: def.name.clone(),
        quantity,
        unit_price,
        total_paid: total_cost,
        discount_applied: player.tier.discount(),
        collectible_found: receipt.collectible_found,
    })
}

/// Sells `quantity` units back. Collectibles and items with no sell
/// value are refused. Stock is removed before tokens are credited; the
/// remove cannot fail after the owned-count check, so the pair commits
/// together.
pub fn sell_item(
    player: &mut PlayerState,
    catalog: &ItemCatalog,
    limiter: &mut ActionRateLimiter,
    now: f64,
    item_id: &str,
    quantity: u32,
) -> Result<SellReceipt, EngineError> {
    validate_request(item_id, quantity)?;
    limiter.check(ActionClass::Sell, now)?;

    let def = catalog
        .get(item_id)
        .ok_or_else(|| EngineError::NotFound(format!("unknown item '{}'", item_id)))?;

    let Some(unit_value) = unit_sell_price(def) else {
        return Err(EngineError::Validation(format!(
            "{} cannot be sold",
            def.name
        )));
    };

    let owned = player.inventory.count(&def.id);
    if owned < quantity as u64 {
        return Err(EngineError::Insufficient(format!(
            "need {} more {} ({} requested, {} owned)",
            quantity as u64 - owned,
            def.name,
            quantity,
            owned
        )));
    }

    inventory::remove_item(player, def, quantity)?;
    let total = unit_value * quantity as u64;
    player.add_tokens(total);
    limiter.record(ActionClass::Sell, now);

    Ok(SellReceipt {
        item_id: def.id.clone(),
        item_name: def.name.clone(),
        quantity,
        total_earned: total,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_buy(
    mut requests: EventReader<BuyRequestEvent>,
    mut player: ResMut<PlayerState>,
    mut limiter: ResMut<ActionRateLimiter>,
    catalog: Res<ItemCatalog>,
    clock: Res<GameClock>,
    mut toasts: EventWriter<ToastEvent>,
    mut found_writer: EventWriter<CollectibleFoundEvent>,
    mut save_writer: EventWriter<SaveGameEvent>,
) {
    for req in requests.read() {
        match buy_item(
            &mut player,
            &catalog,
            &mut limiter,
            clock.now(),
            &req.item_id,
            req.quantity,
        ) {
            Ok(receipt) => {
                info!(
                    "[Economy] Bought {}x {} for {} tokens ({:.0}% off)",
                    receipt.quantity,
                    receipt.item_id,
                    receipt.total_paid,
                    receipt.discount_applied * 100.0
                );
                toasts.send(ToastEvent {
                    message: format!(
                        "Bought {}x {} (-{} tokens)",
                        receipt.quantity, receipt.item_name, receipt.total_paid
                    ),
                    duration_secs: 3.0,
                });
                if receipt.collectible_found {
                    found_writer.send(CollectibleFoundEvent {
                        item_id: receipt.item_id.clone(),
                        name: receipt.item_name.clone(),
                    });
                }
                save_writer.send(SaveGameEvent);
            }
            Err(err) => {
                warn!("[Economy] Buy '{}' rejected: {}", req.item_id, err);
                toasts.send(ToastEvent {
                    message: err.to_string(),
                    duration_secs: 3.0,
                });
            }
        }
    }
}

pub fn handle_sell(
    mut requests: EventReader<SellRequestEvent>,
    mut player: ResMut<PlayerState>,
    mut limiter: ResMut<ActionRateLimiter>,
    catalog: Res<ItemCatalog>,
    clock: Res<GameClock>,
    mut toasts: EventWriter<ToastEvent>,
    mut save_writer: EventWriter<SaveGameEvent>,
) {
    for req in requests.read() {
        match sell_item(
            &mut player,
            &catalog,
            &mut limiter,
            clock.now(),
            &req.item_id,
            req.quantity,
        ) {
            Ok(receipt) => {
                info!(
                    "[Economy] Sold {}x {} for {} tokens",
                    receipt.quantity, receipt.item_id, receipt.total_earned
                );
                toasts.send(ToastEvent {
                    message: format!(
                        "Sold {}x {} (+{} tokens)",
                        receipt.quantity, receipt.item_name, receipt.total_earned
                    ),
                    duration_secs: 3.0,
                });
                save_writer.send(SaveGameEvent);
            }
            Err(err) => {
                warn!("[Economy] Sell '{}' rejected: {}", req.item_id, err);
                toasts.send(ToastEvent {
                    message: err.to_string(),
                    duration_secs: 3.0,
                });
            }
        }
    }
}
