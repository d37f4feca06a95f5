//! Crafting: recipe gating, atomic material consumption, output grant.
//!
//! `craft` stages every mutation on a clone of the player and swaps it
//! in only once the whole recipe has gone through, so a failure at any
//! step leaves the live state untouched.

use bevy::prelude::*;

use crate::economy::rate_limit::{ActionClass, ActionRateLimiter};
use crate::inventory;
use crate::shared::*;

pub struct CraftingPlugin;

impl Plugin for CraftingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, handle_craft);
    }
}

#[derive(Debug, Clone)]
pub struct CraftReceipt {
    pub recipe_id: String,
    pub output_item: ItemId,
    pub output_quantity: u32,
    pub influence_spent: u32,
    pub xp_awarded: u64,
    pub levels_gained: u32,
}

/// Checks every precondition in a fixed order so the player always sees
/// the most fundamental blocker first: unknown recipe, level, tier,
/// influence, then the first missing material.
pub fn can_craft(
    player: &PlayerState,
    book: &RecipeBook,
    catalog: &ItemCatalog,
    recipe_id: &str,
) -> Result<(), EngineError> {
    let recipe = book
        .get(recipe_id)
        .ok_or_else(|| EngineError::NotFound(format!("unknown recipe '{}'", recipe_id)))?;

    if player.level < recipe.min_level {
        return Err(EngineError::Precondition(format!(
            "{} requires level {} (you are level {})",
            recipe.name, recipe.min_level, player.level
        )));
    }
    if player.tier < recipe.min_tier {
        return Err(EngineError::Precondition(format!(
            "{} requires {} tier (you are {})",
            recipe.name,
            recipe.min_tier.label(),
            player.tier.label()
        )));
    }
    if player.influence < recipe.influence_cost {
        return Err(EngineError::Insufficient(format!(
            "need {} more influence ({} required, {} held)",
            recipe.influence_cost - player.influence,
            recipe.influence_cost,
            player.influence
        )));
    }
    for (material_id, needed) in &recipe.materials {
        let owned = player.inventory.count(material_id);
        if owned < *needed as u64 {
            let name = catalog
                .get(material_id)
                .map(|d| d.name.as_str())
                .unwrap_or(material_id.as_str());
            return Err(EngineError::Insufficient(format!(
                "need {} more {} ({} required, {} owned)",
                *needed as u64 - owned,
                name,
                needed,
                owned
            )));
        }
    }
    Ok(())
}

/// Executes a recipe. Consumes materials and influence, grants the
/// output item and XP, all-or-nothing.
pub fn craft(
    player: &mut PlayerState,
    book: &RecipeBook,
    catalog: &ItemCatalog,
    limiter: &mut ActionRateLimiter,
    now: f64,
    recipe_id: &str,
) -> Result<CraftReceipt, EngineError> {
    limiter.check(ActionClass::Craft, now)?;
    can_craft(player, book, catalog, recipe_id)?;

    let recipe = book
        .get(recipe_id)
        .ok_or_else(|| EngineError::NotFound(format!("unknown recipe '{}'", recipe_id)))?;
    let (output_id, output_qty) = &recipe.output;
    let output_def = catalog
        .get(output_id)
        .ok_or_else(|| EngineError::NotFound(format!("recipe output '{}' not in catalog", output_id)))?;

    let mut staged = player.clone();

    for (material_id, needed) in &recipe.materials {
        let def = catalog
            .get(material_id)
            .ok_or_else(|| EngineError::NotFound(format!("material '{}' not in catalog", material_id)))?;
        inventory::remove_item(&mut staged, def, *needed)?;
    }

    if inventory::addable_quantity(&staged, output_def, *output_qty) < *output_qty {
        return Err(EngineError::Precondition(format!(
            "not enough room for {}x {}",
            output_qty, output_def.name
        )));
    }
    inventory::add_item(&mut staged, output_def, *output_qty, now);

    staged.try_spend_influence(recipe.influence_cost)?;
    let levels_gained = staged.add_xp(recipe.xp_reward);
    staged.lifetime.items_crafted += 1;

    *player = staged;
    limiter.record(ActionClass::Craft, now);

    Ok(CraftReceipt {
        recipe_id: recipe.id.clone(),
        output_item: output_id.clone(),
        output_quantity: *output_qty,
        influence_spent: recipe.influence_cost,
        xp_awarded: recipe.xp_reward,
        levels_gained,
    })
}

/// Recipes the player currently qualifies for, regardless of materials
/// on hand. The shop UI greys out the rest.
pub fn available_recipes<'a>(player: &PlayerState, book: &'a RecipeBook) -> Vec<&'a Recipe> {
    let mut out: Vec<&Recipe> = book
        .recipes
        .values()
        .filter(|r| player.level >= r.min_level && player.tier >= r.min_tier)
        .collect();
    out.sort_by(|a, b| a.id.cmp(&b.id));
    out
}

pub fn handle_craft(
    mut requests: EventReader<CraftRequestEvent>,
    mut player: ResMut<PlayerState>,
    mut limiter: ResMut<ActionRateLimiter>,
    book: Res<RecipeBook>,
    catalog: Res<ItemCatalog>,
    clock: Res<GameClock>,
    mut toasts: EventWriter<ToastEvent>,
    mut save_writer: EventWriter<SaveGameEvent>,
) {
    for req in requests.read() {
        match craft(
            &mut player,
            &book,
            &catalog,
            &mut limiter,
            clock.now(),
            &req.recipe_id,
        ) {
            Ok(receipt) => {
                info!(
                    "[Crafting] {} -> {}x {} ({} influence, {} xp)",
                    receipt.recipe_id,
                    receipt.output_quantity,
                    receipt.output_item,
                    receipt.influence_spent,
                    receipt.xp_awarded
                );
                let mut message = format!(
                    "Crafted {}x {}!",
                    receipt.output_quantity, receipt.output_item
                );
                if receipt.levels_gained > 0 {
                    message.push_str(&format!(" Level up! Now level {}.", player.level));
                }
                toasts.send(ToastEvent {
                    message,
                    duration_secs: 3.0,
                });
                save_writer.send(SaveGameEvent);
            }
            Err(err) => {
                warn!("[Crafting] '{}' rejected: {}", req.recipe_id, err);
                toasts.send(ToastEvent {
                    message: err.to_string(),
                    duration_secs: 3.0,
                });
            }
        }
    }
}
