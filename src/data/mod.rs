//! Data layer — populates all registries at startup.
//!
//! Fills the item, recipe, event, and mini-game catalogs plus the
//! collaborator roster from the hard-coded balance data defined in
//! submodules. No other domain seeds these resources.

mod events;
mod items;
mod minigames;
mod recipes;

use bevy::prelude::*;

use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ItemCatalog>()
            .init_resource::<RecipeBook>()
            .init_resource::<EventCatalog>()
            .init_resource::<MinigameCatalog>()
            .init_resource::<CollaboratorRoster>()
            .add_systems(Startup, load_all_data);
    }
}

/// Single system that populates every registry.
fn load_all_data(
    mut item_catalog: ResMut<ItemCatalog>,
    mut recipe_book: ResMut<RecipeBook>,
    mut event_catalog: ResMut<EventCatalog>,
    mut minigame_catalog: ResMut<MinigameCatalog>,
    mut roster: ResMut<CollaboratorRoster>,
) {
    info!("[Data] Populating registries");

    items::populate_items(&mut item_catalog);
    info!("  Items loaded: {}", item_catalog.items.len());

    recipes::populate_recipes(&mut recipe_book);
    info!("  Recipes loaded: {}", recipe_book.recipes.len());

    events::populate_events(&mut event_catalog);
    info!("  Events loaded: {}", event_catalog.events.len());

    minigames::populate_minigames(&mut minigame_catalog);
    info!("  Mini-games loaded: {}", minigame_catalog.games.len());

    events::populate_collaborators(&mut roster);
    info!("  Collaborators loaded: {}", roster.collaborators.len());
}

pub use events::{populate_collaborators, populate_events};
pub use items::populate_items;
pub use minigames::populate_minigames;
pub use recipes::populate_recipes;
