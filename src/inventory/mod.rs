//! Inventory store: add/remove/query over the player's four category
//! buckets, stack caps, equip-on-acquire tool effects, and consumable
//! use. All mutation goes through `PlayerState` — no private copies.

use bevy::prelude::*;

use crate::economy::rate_limit::{ActionClass, ActionRateLimiter};
use crate::shared::*;

pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (handle_use_item, expire_buffs));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Receipts
// ─────────────────────────────────────────────────────────────────────────────

/// Result of an `add_item` call. `added` can fall short of `requested`
/// when a stack hits its cap — the overflow is dropped from the added
/// amount, never from existing stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddReceipt {
    pub requested: u32,
    pub added: u32,
    pub overflow_dropped: u32,
    pub collectible_found: bool,
}

#[derive(Debug, Clone)]
pub struct UseReceipt {
    pub item_id: ItemId,
    pub message: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Store operations
// ─────────────────────────────────────────────────────────────────────────────

/// Adds `qty` units of an item, resolving its category bucket from the
/// item kind. Stackables merge into one aggregated entry capped at
/// `max_stack`; non-stackables append one entry per unit.
///
/// Acquiring a tool while owning none folds its effect into the base
/// stats (equip-on-acquire).
pub fn add_item(player: &mut PlayerState, def: &ItemDef, qty: u32, now: f64) -> AddReceipt {
    let owned_before = player.inventory.count(&def.id);

    let added = if def.stackable {
        let bucket = player.inventory.bucket_mut(&def.kind);
        match bucket.iter_mut().find(|e| e.item_id == def.id) {
            Some(entry) => {
                let space = def.max_stack.saturating_sub(entry.quantity);
                let add = qty.min(space);
                entry.quantity += add;
                add
            }
            None => {
                let add = qty.min(def.max_stack);
                if add > 0 {
                    bucket.push(InventoryEntry {
                        item_id: def.id.clone(),
                        quantity: add,
                        acquired_at: now,
                    });
                }
                add
            }
        }
    } else {
        let bucket = player.inventory.bucket_mut(&def.kind);
        for _ in 0..qty {
            bucket.push(InventoryEntry {
                item_id: def.id.clone(),
                quantity: 1,
                acquired_at: now,
            });
        }
        qty
    };

    if added > 0 && owned_before == 0 {
        if let ItemKind::Tool {
            effect: Some(bonus),
        } = &def.kind
        {
            player.stats.add(bonus.stat, bonus.amount as i64);
            info!(
                "[Inventory] Equipped '{}': {} +{}",
                def.name,
                bonus.stat.label(),
                bonus.amount
            );
        }
    }

    AddReceipt {
        requested: qty,
        added,
        overflow_dropped: qty - added,
        collectible_found: added > 0 && matches!(def.kind, ItemKind::Collectible),
    }
}

/// Removes `qty` units. Removing more than owned is an error, not a
/// clamp, and leaves the inventory untouched. Removing the last unit of
/// a tool reverses its equip effect.
pub fn remove_item(player: &mut PlayerState, def: &ItemDef, qty: u32) -> Result<(), EngineError> {
    let owned = player.inventory.count(&def.id);
    if owned < qty as u64 {
        return Err(EngineError::Insufficient(format!(
            "need {} more {} ({} requested, {} owned)",
            qty as u64 - owned,
            def.name,
            qty,
            owned
        )));
    }

    let bucket = player.inventory.bucket_mut(&def.kind);
    let mut remaining = qty;
    for entry in bucket.iter_mut() {
        if remaining == 0 {
            break;
        }
        if entry.item_id == def.id {
            let take = remaining.min(entry.quantity);
            entry.quantity -= take;
            remaining -= take;
        }
    }
    bucket.retain(|e| e.quantity > 0);

    if player.inventory.count(&def.id) == 0 {
        if let ItemKind::Tool {
            effect: Some(bonus),
        } = &def.kind
        {
            player.stats.add(bonus.stat, -(bonus.amount as i64));
            info!(
                "[Inventory] Unequipped '{}': {} -{}",
                def.name,
                bonus.stat.label(),
                bonus.amount
            );
        }
    }
    Ok(())
}

pub fn has_item(player: &PlayerState, item_id: &str) -> bool {
    player.inventory.has(item_id)
}

pub fn item_count(player: &PlayerState, item_id: &str) -> u64 {
    player.inventory.count(item_id)
}

/// Dry-run capacity check: how many of `qty` would actually fit.
pub fn addable_quantity(player: &PlayerState, def: &ItemDef, qty: u32) -> u32 {
    if !def.stackable {
        return qty;
    }
    let held: u32 = player
        .inventory
        .bucket(&def.kind)
        .iter()
        .filter(|e| e.item_id == def.id)
        .map(|e| e.quantity)
        .sum();
    qty.min(def.max_stack.saturating_sub(held))
}

/// Consumes one unit of a consumable and applies its effect.
pub fn use_item(
    player: &mut PlayerState,
    def: &ItemDef,
    now: f64,
) -> Result<UseReceipt, EngineError> {
    let ItemKind::Consumable { effect } = &def.kind else {
        return Err(EngineError::Validation(format!(
            "'{}' is a {} and cannot be used",
            def.name,
            def.kind.category_label()
        )));
    };
    if !player.inventory.has(&def.id) {
        return Err(EngineError::Insufficient(format!(
            "no {} in inventory",
            def.name
        )));
    }

    remove_item(player, def, 1)?;

    let message = match effect {
        ConsumableEffect::RestoreInfluence(amount) => {
            let before = player.influence;
            player.add_influence(*amount);
            format!(
                "Used {}: influence {} -> {}",
                def.name, before, player.influence
            )
        }
        ConsumableEffect::StatBoost {
            stat,
            bonus,
            duration_secs,
        } => {
            // A fresh boost of the same stat replaces the old one so the
            // new duration always wins.
            player.buffs.retain(|b| b.stat != *stat);
            player.buffs.push(TempBuff {
                stat: *stat,
                bonus: *bonus,
                expires_at: now + duration_secs,
            });
            format!(
                "Used {}: {} +{} for {:.0}s",
                def.name,
                stat.label(),
                bonus,
                duration_secs
            )
        }
        ConsumableEffect::ReputationShield { duration_secs } => {
            player.shields.push(Shield {
                expires_at: now + duration_secs,
            });
            format!("Used {}: reputation shield for {:.0}s", def.name, duration_secs)
        }
    };

    Ok(UseReceipt {
        item_id: def.id.clone(),
        message,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

/// Processes UseItemRequestEvents from the UI.
pub fn handle_use_item(
    mut requests: EventReader<UseItemRequestEvent>,
    mut player: ResMut<PlayerState>,
    mut limiter: ResMut<ActionRateLimiter>,
    catalog: Res<ItemCatalog>,
    clock: Res<GameClock>,
    mut toasts: EventWriter<ToastEvent>,
    mut save_writer: EventWriter<SaveGameEvent>,
) {
    for req in requests.read() {
        let now = clock.now();
        let result = (|| {
            let def = catalog
                .get(&req.item_id)
                .ok_or_else(|| EngineError::NotFound(format!("unknown item '{}'", req.item_id)))?;
            limiter.check(ActionClass::UseItem, now)?;
            let receipt = use_item(&mut player, def, now)?;
            limiter.record(ActionClass::UseItem, now);
            Ok::<UseReceipt, EngineError>(receipt)
        })();

        match result {
            Ok(receipt) => {
                info!("[Inventory] {}", receipt.message);
                toasts.send(ToastEvent {
                    message: receipt.message,
                    duration_secs: 3.0,
                });
                save_writer.send(SaveGameEvent);
            }
            Err(err) => {
                warn!("[Inventory] Use of '{}' rejected: {}", req.item_id, err);
                toasts.send(ToastEvent {
                    message: err.to_string(),
                    duration_secs: 3.0,
                });
            }
        }
    }
}

/// Drops expired buffs and shields against the game clock and notifies
/// the UI for each expiry.
pub fn expire_buffs(
    mut player: ResMut<PlayerState>,
    clock: Res<GameClock>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if player.buffs.is_empty() && player.shields.is_empty() {
        return;
    }
    let expired = player.prune_expired(clock.now());
    for buff in expired {
        info!("[Inventory] {} buff expired", buff.stat.label());
        toasts.send(ToastEvent {
            message: format!("Your {} boost wore off.", buff.stat.label()),
            duration_secs: 3.0,
        });
    }
}
