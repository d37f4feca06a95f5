//! Random-event triggering: periodic roll, eligibility filter, and
//! rarity/archetype-weighted sampling.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

/// Sampling weight for an event: rarity base plus any bonus for the
/// player's archetype.
pub fn event_weight(def: &EventDef, archetype: Archetype) -> u32 {
    let bonus: u32 = def
        .archetype_bonus
        .iter()
        .filter(|(a, _)| *a == archetype)
        .map(|(_, w)| *w)
        .sum();
    def.rarity.event_weight() + bonus
}

/// Events the player can currently roll: level and reputation gates met,
/// per-event cooldown elapsed, and at least one choice defined.
pub fn eligible_events<'a>(
    player: &PlayerState,
    catalog: &'a EventCatalog,
    now: f64,
) -> Vec<&'a EventDef> {
    catalog
        .events
        .iter()
        .filter(|def| {
            !def.choices.is_empty()
                && player.level >= def.min_level
                && player.reputation >= def.min_reputation
                && player.cooldown_ready(&cooldown_key(&def.id), now)
        })
        .collect()
}

pub fn cooldown_key(event_id: &str) -> String {
    format!("event:{}", event_id)
}

/// One cumulative-weight draw over the candidate list.
fn weighted_pick<'a>(
    candidates: &[&'a EventDef],
    archetype: Archetype,
    rng: &mut GameRng,
) -> Option<&'a EventDef> {
    let total: u32 = candidates.iter().map(|d| event_weight(d, archetype)).sum();
    if total == 0 {
        return None;
    }
    let roll = rng.0.gen::<f64>() * total as f64;
    let mut cumulative = 0.0;
    for def in candidates {
        cumulative += event_weight(def, archetype) as f64;
        if roll < cumulative {
            return Some(def);
        }
    }
    candidates.last().copied()
}

/// One trigger attempt. Returns the id of the event to start, or None
/// when the roll fails or nothing is eligible. Callers own the state
/// transition; this function only samples.
pub fn check_for_random_event(
    player: &PlayerState,
    catalog: &EventCatalog,
    active: &ActiveEventState,
    tuning: &EventTuning,
    rng: &mut GameRng,
    now: f64,
) -> Option<String> {
    if active.0.is_some() {
        return None;
    }
    if now - player.last_event_time < tuning.global_cooldown_secs {
        return None;
    }

    let luck = player.effective_stat(StatKind::Lck, now) as f64;
    let chance = tuning.base_trigger_chance + luck * tuning.luck_trigger_coef;
    if rng.0.gen::<f64>() >= chance {
        return None;
    }

    let candidates = eligible_events(player, catalog, now);
    weighted_pick(&candidates, player.archetype, rng).map(|def| def.id.clone())
}

/// Polls the trigger roll every `poll_interval_secs` of game time. On a
/// hit, activates the event and announces it.
pub fn trigger_random_events(
    mut player: ResMut<PlayerState>,
    catalog: Res<EventCatalog>,
    mut active: ResMut<ActiveEventState>,
    tuning: Res<EventTuning>,
    mut rng: ResMut<GameRng>,
    clock: Res<GameClock>,
    mut last_poll: Local<f64>,
    mut triggered_writer: EventWriter<EventTriggeredEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    let now = clock.now();
    if now - *last_poll < tuning.poll_interval_secs {
        return;
    }
    *last_poll = now;

    let Some(event_id) = check_for_random_event(&player, &catalog, &active, &tuning, &mut rng, now)
    else {
        return;
    };
    let Some(def) = catalog.get(&event_id) else {
        return;
    };

    let expires_at = def.time_limit_secs.map(|limit| now + limit);
    active.0 = Some(ActiveEvent {
        event_id: event_id.clone(),
        started_at: now,
        expires_at,
    });
    player.last_event_time = now;

    info!("[Events] Triggered '{}' ({})", def.name, def.rarity.label());
    triggered_writer.send(EventTriggeredEvent {
        event_id,
        name: def.name.clone(),
        expires_at,
    });
    toasts.send(ToastEvent {
        message: format!("Event: {}", def.name),
        duration_secs: 4.0,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_event(id: &str, rarity: Rarity) -> EventDef {
        EventDef {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            rarity,
            min_level: 1,
            min_reputation: i64::MIN,
            cooldown_secs: None,
            time_limit_secs: None,
            archetype_bonus: Vec::new(),
            choices: vec![EventChoice {
                id: "ok".to_string(),
                label: "OK".to_string(),
                base_chance: 1.0,
                stat_bonuses: Vec::new(),
                stat_required: None,
                on_success: EventOutcome::default(),
                on_fail: EventOutcome::default(),
            }],
        }
    }

    #[test]
    fn test_eligibility_respects_level_gate() {
        let mut catalog = EventCatalog::default();
        let mut gated = simple_event("late_game", Rarity::Common);
        gated.min_level = 10;
        catalog.events.push(gated);
        catalog.events.push(simple_event("early_game", Rarity::Common));

        let player = PlayerState::default();
        let eligible = eligible_events(&player, &catalog, 0.0);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, "early_game");
    }

    #[test]
    fn test_eligibility_respects_event_cooldown() {
        let mut catalog = EventCatalog::default();
        catalog.events.push(simple_event("repeat", Rarity::Common));

        let mut player = PlayerState::default();
        player.cooldowns.insert(cooldown_key("repeat"), 100.0);

        assert!(eligible_events(&player, &catalog, 50.0).is_empty());
        assert_eq!(eligible_events(&player, &catalog, 100.0).len(), 1);
    }

    #[test]
    fn test_archetype_bonus_shifts_weight() {
        let mut def = simple_event("builder_fav", Rarity::Common);
        def.archetype_bonus = vec![(Archetype::Builder, 40)];
        assert_eq!(event_weight(&def, Archetype::Builder), 100);
        assert_eq!(event_weight(&def, Archetype::Trader), 60);
    }

    #[test]
    fn test_no_trigger_while_event_active() {
        let catalog = EventCatalog {
            events: vec![simple_event("e", Rarity::Common)],
        };
        let active = ActiveEventState(Some(ActiveEvent {
            event_id: "e".to_string(),
            started_at: 0.0,
            expires_at: None,
        }));
        let mut rng = GameRng::seeded(1);
        let player = PlayerState::default();
        for _ in 0..100 {
            assert!(check_for_random_event(
                &player,
                &catalog,
                &active,
                &EventTuning::default(),
                &mut rng,
                1000.0,
            )
            .is_none());
        }
    }

    #[test]
    fn test_global_cooldown_blocks_trigger() {
        let catalog = EventCatalog {
            events: vec![simple_event("e", Rarity::Common)],
        };
        let mut player = PlayerState::default();
        player.last_event_time = 500.0;
        let mut rng = GameRng::seeded(1);
        for _ in 0..100 {
            assert!(check_for_random_event(
                &player,
                &catalog,
                &ActiveEventState::default(),
                &EventTuning::default(),
                &mut rng,
                510.0,
            )
            .is_none());
        }
    }

    #[test]
    fn test_weighted_pick_tracks_rarity_weights() {
        let common = simple_event("common", Rarity::Common);
        let legendary = simple_event("legendary", Rarity::Legendary);
        let candidates = vec![&common, &legendary];
        let mut rng = GameRng::seeded(42);

        let mut legendary_hits = 0u32;
        let draws = 100_000;
        for _ in 0..draws {
            let picked = weighted_pick(&candidates, Archetype::Builder, &mut rng)
                .map(|d| d.id.clone())
                .unwrap();
            if picked == "legendary" {
                legendary_hits += 1;
            }
        }
        // Expected share 1/61; allow a generous band around it.
        let share = legendary_hits as f64 / draws as f64;
        let expected = 1.0 / 61.0;
        assert!(
            (share - expected).abs() < 0.01,
            "legendary share {} too far from {}",
            share,
            expected
        );
    }
}
