use crate::shared::*;

/// Populate the MinigameCatalog. Each game names the stat that scales
/// its rewards; the host owns the gameplay itself.
pub fn populate_minigames(catalog: &mut MinigameCatalog) {
    let games = vec![
        MinigameDef {
            id: "code_review".into(),
            name: "Code Review Rush".into(),
            stat: StatKind::Dev,
            base: RewardBundle { xp: 50, tokens: 100 },
            perfect: RewardBundle {
                xp: 100,
                tokens: 250,
            },
        },
        MinigameDef {
            id: "meme_factory".into(),
            name: "Meme Factory".into(),
            stat: StatKind::Mkt,
            base: RewardBundle { xp: 40, tokens: 120 },
            perfect: RewardBundle {
                xp: 80,
                tokens: 300,
            },
        },
        MinigameDef {
            id: "pitch_arena".into(),
            name: "Pitch Arena".into(),
            stat: StatKind::Cha,
            base: RewardBundle { xp: 60, tokens: 80 },
            perfect: RewardBundle {
                xp: 120,
                tokens: 200,
            },
        },
        MinigameDef {
            id: "chart_sniper".into(),
            name: "Chart Sniper".into(),
            stat: StatKind::Str,
            base: RewardBundle { xp: 45, tokens: 150 },
            perfect: RewardBundle {
                xp: 90,
                tokens: 375,
            },
        },
    ];

    for game in games {
        catalog.games.insert(game.id.clone(), game);
    }
}
