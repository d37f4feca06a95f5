//! Choice resolution: success roll, outcome application, history and
//! cooldown bookkeeping. Timeout auto-resolution routes through the
//! same path as a player pick so there is exactly one place events end.

use bevy::prelude::*;
use rand::Rng;

use crate::events::trigger::cooldown_key;
use crate::shared::*;

#[derive(Debug, Clone)]
pub struct ResolveReport {
    pub event_id: String,
    pub choice_id: String,
    pub success: bool,
    pub chance: f64,
    pub message: String,
    pub special: Option<String>,
    pub auto_resolved: bool,
    pub shield_absorbed: bool,
    pub levels_gained: u32,
}

/// Success probability for a choice: base chance, plus each listed
/// stat's effective value scaled by its coefficient, plus the flat luck
/// bonus, hard-capped so no build reaches certainty.
pub fn success_chance(
    player: &PlayerState,
    choice: &EventChoice,
    tuning: &EventTuning,
    now: f64,
) -> f64 {
    let mut chance = choice.base_chance;
    for (stat, coef) in &choice.stat_bonuses {
        chance += player.effective_stat(*stat, now) as f64 * tuning.stat_contribution_scale * coef;
    }
    chance += player.effective_stat(StatKind::Lck, now) as f64 * tuning.luck_success_coef;
    chance.clamp(0.0, tuning.success_chance_cap)
}

/// Resolves the active event with the given choice. `auto` marks a
/// timeout resolution, which skips the stat floor since the engine
/// picked the choice, not the player.
#[allow(clippy::too_many_arguments)]
pub fn resolve_choice(
    player: &mut PlayerState,
    catalog: &EventCatalog,
    roster: &CollaboratorRoster,
    affinities: &mut Affinities,
    history: &mut EventHistory,
    active: &mut ActiveEventState,
    tuning: &EventTuning,
    rng: &mut GameRng,
    now: f64,
    choice_id: &str,
    auto: bool,
) -> Result<ResolveReport, EngineError> {
    let Some(current) = active.0.clone() else {
        return Err(EngineError::Precondition(
            "no event is currently active".to_string(),
        ));
    };
    let def = catalog.get(&current.event_id).ok_or_else(|| {
        EngineError::NotFound(format!("active event '{}' not in catalog", current.event_id))
    })?;
    let choice = def
        .choices
        .iter()
        .find(|c| c.id == choice_id)
        .ok_or_else(|| {
            EngineError::NotFound(format!(
                "'{}' has no choice '{}'",
                def.name, choice_id
            ))
        })?;

    if !auto {
        if let Some((stat, floor)) = choice.stat_required {
            let have = player.effective_stat(stat, now);
            if have < floor {
                return Err(EngineError::Precondition(format!(
                    "'{}' requires {} {} (you have {})",
                    choice.label,
                    stat.label(),
                    floor,
                    have
                )));
            }
        }
    }

    let chance = success_chance(player, choice, tuning, now);
    let success = rng.0.gen::<f64>() < chance;
    let outcome = if success {
        &choice.on_success
    } else {
        &choice.on_fail
    };

    let levels_gained = player.add_xp(outcome.xp);
    if outcome.tokens >= 0 {
        player.add_tokens(outcome.tokens as u64);
    } else {
        player.deduct_tokens_clamped(outcome.tokens.unsigned_abs());
    }
    let mut shield_absorbed = false;
    if outcome.reputation != 0 {
        shield_absorbed = player.add_reputation(outcome.reputation, now);
    }
    if outcome.influence >= 0 {
        player.add_influence(outcome.influence as u32);
    } else {
        player.influence = player
            .influence
            .saturating_sub(outcome.influence.unsigned_abs() as u32);
    }
    for (target, delta) in &outcome.affinity {
        match target {
            AffinityTarget::Collaborator(id) => affinities.adjust(id, *delta),
            AffinityTarget::Random => {
                if !roster.collaborators.is_empty() {
                    let idx = rng.0.gen_range(0..roster.collaborators.len());
                    affinities.adjust(&roster.collaborators[idx].id, *delta);
                }
            }
        }
    }
    if let Some(spec) = &outcome.buff {
        player.buffs.retain(|b| b.stat != spec.stat);
        player.buffs.push(TempBuff {
            stat: spec.stat,
            bonus: spec.bonus,
            expires_at: now + spec.duration_secs,
        });
    }

    let cooldown = def
        .cooldown_secs
        .unwrap_or(tuning.default_event_cooldown_secs);
    player.cooldowns.insert(cooldown_key(&def.id), now + cooldown);
    player.last_event_time = now;
    player.lifetime.events_resolved += 1;

    history.records.push_front(EventRecord {
        event_id: def.id.clone(),
        choice_id: choice.id.clone(),
        success,
        resolved_at: now,
        auto_resolved: auto,
    });
    history.records.truncate(tuning.history_cap);

    active.0 = None;

    let mut message = outcome.message.clone();
    if shield_absorbed {
        message.push_str(" Your shield absorbed the reputation hit.");
    }

    Ok(ResolveReport {
        event_id: def.id.clone(),
        choice_id: choice.id.clone(),
        success,
        chance,
        message,
        special: outcome.special.clone(),
        auto_resolved: auto,
        shield_absorbed,
        levels_gained,
    })
}

/// Seconds until the active event auto-resolves, if it is timed.
pub fn time_remaining(active: &ActiveEventState, now: f64) -> Option<f64> {
    active
        .0
        .as_ref()
        .and_then(|a| a.expires_at)
        .map(|at| (at - now).max(0.0))
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
pub fn handle_event_choice(
    mut requests: EventReader<EventChoiceRequestEvent>,
    mut player: ResMut<PlayerState>,
    catalog: Res<EventCatalog>,
    roster: Res<CollaboratorRoster>,
    mut affinities: ResMut<Affinities>,
    mut history: ResMut<EventHistory>,
    mut active: ResMut<ActiveEventState>,
    tuning: Res<EventTuning>,
    mut rng: ResMut<GameRng>,
    clock: Res<GameClock>,
    mut resolved_writer: EventWriter<EventResolvedEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut save_writer: EventWriter<SaveGameEvent>,
) {
    for req in requests.read() {
        match resolve_choice(
            &mut player,
            &catalog,
            &roster,
            &mut affinities,
            &mut history,
            &mut active,
            &tuning,
            &mut rng,
            clock.now(),
            &req.choice_id,
            false,
        ) {
            Ok(report) => {
                info!(
                    "[Events] '{}' resolved via '{}': {} (p={:.2})",
                    report.event_id,
                    report.choice_id,
                    if report.success { "success" } else { "failure" },
                    report.chance
                );
                toasts.send(ToastEvent {
                    message: report.message.clone(),
                    duration_secs: 4.0,
                });
                resolved_writer.send(EventResolvedEvent {
                    event_id: report.event_id,
                    choice_id: report.choice_id,
                    success: report.success,
                    message: report.message,
                    special: report.special,
                    auto_resolved: false,
                });
                save_writer.send(SaveGameEvent);
            }
            Err(err) => {
                warn!("[Events] Choice '{}' rejected: {}", req.choice_id, err);
                toasts.send(ToastEvent {
                    message: err.to_string(),
                    duration_secs: 3.0,
                });
            }
        }
    }
}

/// Auto-resolves a timed event with its last-listed (safe) choice once
/// the deadline passes.
#[allow(clippy::too_many_arguments)]
pub fn check_event_timeout(
    mut player: ResMut<PlayerState>,
    catalog: Res<EventCatalog>,
    roster: Res<CollaboratorRoster>,
    mut affinities: ResMut<Affinities>,
    mut history: ResMut<EventHistory>,
    mut active: ResMut<ActiveEventState>,
    tuning: Res<EventTuning>,
    mut rng: ResMut<GameRng>,
    clock: Res<GameClock>,
    mut resolved_writer: EventWriter<EventResolvedEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut save_writer: EventWriter<SaveGameEvent>,
) {
    let now = clock.now();
    let Some(current) = active.0.as_ref() else {
        return;
    };
    let Some(expires_at) = current.expires_at else {
        return;
    };
    if now < expires_at {
        return;
    }

    let Some(default_choice) = catalog
        .get(&current.event_id)
        .and_then(|def| def.choices.last())
        .map(|c| c.id.clone())
    else {
        // Unresolvable without a definition; drop the event rather than
        // leaving the engine stuck.
        warn!(
            "[Events] Timed-out event '{}' has no definition, discarding",
            current.event_id
        );
        active.0 = None;
        return;
    };

    match resolve_choice(
        &mut player,
        &catalog,
        &roster,
        &mut affinities,
        &mut history,
        &mut active,
        &tuning,
        &mut rng,
        now,
        &default_choice,
        true,
    ) {
        Ok(report) => {
            info!(
                "[Events] '{}' timed out, auto-resolved via '{}'",
                report.event_id, report.choice_id
            );
            toasts.send(ToastEvent {
                message: format!("Time ran out. {}", report.message),
                duration_secs: 4.0,
            });
            resolved_writer.send(EventResolvedEvent {
                event_id: report.event_id,
                choice_id: report.choice_id,
                success: report.success,
                message: report.message,
                special: report.special,
                auto_resolved: true,
            });
            save_writer.send(SaveGameEvent);
        }
        Err(err) => {
            warn!("[Events] Timeout resolution failed: {}", err);
            active.0 = None;
        }
    }
}
