mod shared;
mod economy;
mod inventory;
mod crafting;
mod events;
mod minigames;
mod data;
mod save;

use bevy::app::AppExit;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use shared::*;

/// Headless demo driver: runs the engine for a scripted session, one
/// simulated second per frame, then exits. The real front end replaces
/// this loop and the engine does not change.
fn main() {
    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin::default())
        // Shared resources
        .init_resource::<PlayerState>()
        .init_resource::<GameClock>()
        .init_resource::<GameRng>()
        .init_resource::<Affinities>()
        // Request events
        .add_event::<BuyRequestEvent>()
        .add_event::<SellRequestEvent>()
        .add_event::<UseItemRequestEvent>()
        .add_event::<CraftRequestEvent>()
        .add_event::<EventChoiceRequestEvent>()
        .add_event::<MinigameResultEvent>()
        // Notification events
        .add_event::<ToastEvent>()
        .add_event::<CollectibleFoundEvent>()
        .add_event::<EventTriggeredEvent>()
        .add_event::<EventResolvedEvent>()
        .add_event::<SaveGameEvent>()
        // Domain plugins
        .add_plugins((
            data::DataPlugin,
            economy::EconomyPlugin,
            inventory::InventoryPlugin,
            crafting::CraftingPlugin,
            events::EventsPlugin,
            minigames::MinigamePlugin,
            save::SavePlugin,
        ))
        .add_systems(First, advance_clock)
        .add_systems(Update, demo_script)
        .run();
}

fn advance_clock(mut clock: ResMut<GameClock>) {
    clock.advance(1.0);
}

/// Issues a fixed sequence of requests keyed off the frame counter and
/// prints a status line at the end.
fn demo_script(
    mut frame: Local<u32>,
    player: Res<PlayerState>,
    mut buy_writer: EventWriter<BuyRequestEvent>,
    mut use_writer: EventWriter<UseItemRequestEvent>,
    mut craft_writer: EventWriter<CraftRequestEvent>,
    mut minigame_writer: EventWriter<MinigameResultEvent>,
    mut choice_writer: EventWriter<EventChoiceRequestEvent>,
    active: Res<ActiveEventState>,
    event_catalog: Res<EventCatalog>,
    mut exit_writer: EventWriter<AppExit>,
) {
    *frame += 1;
    match *frame {
        2 => {
            buy_writer.send(BuyRequestEvent {
                item_id: "espresso_shot".into(),
                quantity: 3,
            });
        }
        4 => {
            use_writer.send(UseItemRequestEvent {
                item_id: "espresso_shot".into(),
            });
        }
        6 => {
            minigame_writer.send(MinigameResultEvent {
                minigame_id: "code_review".into(),
                score_percent: 85,
                is_perfect: false,
            });
        }
        8 => {
            buy_writer.send(BuyRequestEvent {
                item_id: "gpu_shard".into(),
                quantity: 1,
            });
        }
        10 => {
            craft_writer.send(CraftRequestEvent {
                recipe_id: "recipe_energy_drink".into(),
            });
        }
        120 => {
            info!(
                "[Demo] Session over: level {}, {} tokens, {} influence, rep {}",
                player.level, player.tokens, player.influence, player.reputation
            );
            exit_writer.send(AppExit::Success);
        }
        _ => {
            // Answer any random event with its safe (last) choice so the
            // demo never stalls on an open prompt.
            if let Some(active_event) = &active.0 {
                let safe_choice = event_catalog
                    .get(&active_event.event_id)
                    .and_then(|def| def.choices.last())
                    .map(|c| c.id.clone());
                if let Some(choice_id) = safe_choice {
                    info!("[Demo] Answering event '{}'", active_event.event_id);
                    choice_writer.send(EventChoiceRequestEvent { choice_id });
                }
            }
        }
    }
}
