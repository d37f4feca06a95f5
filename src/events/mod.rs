//! Weighted random events: trigger sampling, choice resolution, and
//! timeout handling. At most one event is active at a time.

use bevy::prelude::*;

use crate::shared::{ActiveEventState, EventHistory, EventTuning};

pub mod resolve;
pub mod trigger;

pub use resolve::{resolve_choice, success_chance, time_remaining, ResolveReport};
pub use trigger::{check_for_random_event, eligible_events, event_weight};

pub struct EventsPlugin;

impl Plugin for EventsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveEventState>()
            .init_resource::<EventHistory>()
            .init_resource::<EventTuning>()
            .add_systems(
                Update,
                (
                    trigger::trigger_random_events,
                    resolve::check_event_timeout,
                    resolve::handle_event_choice,
                )
                    .chain(),
            );
    }
}
