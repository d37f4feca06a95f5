//! Mini-game reward adapter. The engine never runs the games; the host
//! reports a score and this module turns it into XP and tokens.

use bevy::prelude::*;

use crate::shared::*;

pub struct MinigamePlugin;

impl Plugin for MinigamePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, handle_minigame_result);
    }
}

#[derive(Debug, Clone)]
pub struct MinigameReceipt {
    pub minigame_id: String,
    pub xp_awarded: u64,
    pub tokens_awarded: u64,
    pub levels_gained: u32,
    pub perfect: bool,
}

/// Converts a reported score into rewards. A perfect run uses the
/// perfect bundle regardless of score. The linked stat scales the
/// bundle by 2% per effective point, then the score fraction applies,
/// flooring at each step.
pub fn complete_minigame(
    player: &mut PlayerState,
    catalog: &MinigameCatalog,
    minigame_id: &str,
    score_percent: u32,
    is_perfect: bool,
    now: f64,
) -> Result<MinigameReceipt, EngineError> {
    if score_percent > 100 {
        return Err(EngineError::Validation(format!(
            "score must be 0-100, got {}",
            score_percent
        )));
    }
    let def = catalog
        .get(minigame_id)
        .ok_or_else(|| EngineError::NotFound(format!("unknown mini-game '{}'", minigame_id)))?;

    let bundle = if is_perfect { def.perfect } else { def.base };
    let stat_scale = 1.0 + player.effective_stat(def.stat, now) as f64 * 0.02;
    let score_scale = if is_perfect {
        1.0
    } else {
        score_percent as f64 / 100.0
    };

    let xp = (bundle.xp as f64 * stat_scale * score_scale).floor() as u64;
    let tokens = (bundle.tokens as f64 * stat_scale * score_scale).floor() as u64;

    let levels_gained = player.add_xp(xp);
    player.add_tokens(tokens);
    player.lifetime.minigames_completed += 1;

    Ok(MinigameReceipt {
        minigame_id: def.id.clone(),
        xp_awarded: xp,
        tokens_awarded: tokens,
        levels_gained,
        perfect: is_perfect,
    })
}

pub fn handle_minigame_result(
    mut results: EventReader<MinigameResultEvent>,
    mut player: ResMut<PlayerState>,
    catalog: Res<MinigameCatalog>,
    clock: Res<GameClock>,
    mut toasts: EventWriter<ToastEvent>,
    mut save_writer: EventWriter<SaveGameEvent>,
) {
    for result in results.read() {
        match complete_minigame(
            &mut player,
            &catalog,
            &result.minigame_id,
            result.score_percent,
            result.is_perfect,
            clock.now(),
        ) {
            Ok(receipt) => {
                info!(
                    "[Minigames] '{}' complete: +{} xp, +{} tokens{}",
                    receipt.minigame_id,
                    receipt.xp_awarded,
                    receipt.tokens_awarded,
                    if receipt.perfect { " (perfect!)" } else { "" }
                );
                let mut message = format!(
                    "+{} XP, +{} tokens",
                    receipt.xp_awarded, receipt.tokens_awarded
                );
                if receipt.perfect {
                    message = format!("Perfect! {}", message);
                }
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
                warn!(
                    "[Minigames] Result for '{}' rejected: {}",
                    result.minigame_id, err
                );
                toasts.send(ToastEvent {
                    message: err.to_string(),
                    duration_secs: 3.0,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with_game() -> MinigameCatalog {
        let mut catalog = MinigameCatalog::default();
        catalog.games.insert(
            "code_review".to_string(),
            MinigameDef {
                id: "code_review".to_string(),
                name: "Code Review".to_string(),
                stat: StatKind::Dev,
                base: RewardBundle { xp: 50, tokens: 100 },
                perfect: RewardBundle {
                    xp: 100,
                    tokens: 250,
                },
            },
        );
        catalog
    }

    #[test]
    fn test_score_scales_base_rewards() {
        let catalog = catalog_with_game();
        let mut player = PlayerState::default();
        // Default DEV is 1, so the stat scale is 1.02.
        let receipt =
            complete_minigame(&mut player, &catalog, "code_review", 50, false, 0.0).unwrap();
        assert_eq!(receipt.xp_awarded, 25); // floor(50 * 1.02 * 0.5)
        assert_eq!(receipt.tokens_awarded, 51); // floor(100 * 1.02 * 0.5)
        assert_eq!(player.lifetime.minigames_completed, 1);
    }

    #[test]
    fn test_perfect_uses_perfect_bundle_at_full_scale() {
        let catalog = catalog_with_game();
        let mut player = PlayerState::default();
        let receipt =
            complete_minigame(&mut player, &catalog, "code_review", 73, true, 0.0).unwrap();
        assert_eq!(receipt.xp_awarded, 102); // floor(100 * 1.02)
        assert_eq!(receipt.tokens_awarded, 255); // floor(250 * 1.02)
    }

    #[test]
    fn test_rejects_out_of_range_score() {
        let catalog = catalog_with_game();
        let mut player = PlayerState::default();
        let before = player.clone();
        let err =
            complete_minigame(&mut player, &catalog, "code_review", 101, false, 0.0).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
        assert_eq!(player.tokens, before.tokens);
        assert_eq!(player.xp, before.xp);
    }

    #[test]
    fn test_unknown_game_is_not_found() {
        let catalog = catalog_with_game();
        let mut player = PlayerState::default();
        let err = complete_minigame(&mut player, &catalog, "nope", 50, false, 0.0).unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }
}
