use crate::shared::*;

/// Populate the RecipeBook. Every output id must exist in the item set;
/// the headless suite cross-checks this.
pub fn populate_recipes(book: &mut RecipeBook) {
    let recipes: Vec<Recipe> = vec![
        // ── Early consumable crafts ──────────────────────────────────
        Recipe {
            id: "recipe_focus_serum".into(),
            name: "Focus Serum".into(),
            materials: vec![("code_fragment".into(), 4), ("audit_report".into(), 1)],
            influence_cost: 10,
            min_level: 1,
            min_tier: Tier::Ember,
            output: ("focus_serum".into(), 2),
            xp_reward: 20,
        },
        Recipe {
            id: "recipe_hype_juice".into(),
            name: "Hype Juice".into(),
            materials: vec![("meme_template".into(), 6)],
            influence_cost: 10,
            min_level: 2,
            min_tier: Tier::Ember,
            output: ("hype_juice".into(), 2),
            xp_reward: 20,
        },
        Recipe {
            id: "recipe_energy_drink".into(),
            name: "Energy Drink".into(),
            materials: vec![("espresso_shot".into(), 2), ("gpu_shard".into(), 1)],
            influence_cost: 5,
            min_level: 1,
            min_tier: Tier::Ember,
            output: ("energy_drink".into(), 1),
            xp_reward: 10,
        },
        // ── Tier-gated tool crafts ───────────────────────────────────
        Recipe {
            id: "recipe_trend_scanner".into(),
            name: "Trend Scanner".into(),
            materials: vec![("gpu_shard".into(), 4), ("meme_template".into(), 10)],
            influence_cost: 25,
            min_level: 5,
            min_tier: Tier::Spark,
            output: ("trend_scanner".into(), 1),
            xp_reward: 60,
        },
        Recipe {
            id: "recipe_ledger_vault".into(),
            name: "Ledger Vault".into(),
            materials: vec![("gpu_shard".into(), 6), ("audit_report".into(), 2)],
            influence_cost: 30,
            min_level: 8,
            min_tier: Tier::Spark,
            output: ("ledger_vault".into(), 1),
            xp_reward: 80,
        },
        Recipe {
            id: "recipe_pr_shield".into(),
            name: "PR Shield".into(),
            materials: vec![("audit_report".into(), 2), ("meme_template".into(), 8)],
            influence_cost: 40,
            min_level: 10,
            min_tier: Tier::Flame,
            output: ("pr_shield".into(), 1),
            xp_reward: 90,
        },
        Recipe {
            id: "recipe_quantum_rig".into(),
            name: "Quantum Rig".into(),
            materials: vec![
                ("gpu_shard".into(), 10),
                ("audit_report".into(), 4),
                ("viral_spark".into(), 1),
            ],
            influence_cost: 60,
            min_level: 12,
            min_tier: Tier::Flame,
            output: ("quantum_rig".into(), 1),
            xp_reward: 150,
        },
        Recipe {
            id: "recipe_genesis_gpu".into(),
            name: "Genesis GPU".into(),
            materials: vec![
                ("viral_spark".into(), 3),
                ("gpu_shard".into(), 20),
                ("audit_report".into(), 6),
            ],
            influence_cost: 100,
            min_level: 20,
            min_tier: Tier::Blaze,
            output: ("genesis_gpu".into(), 1),
            xp_reward: 400,
        },
    ];

    for recipe in recipes {
        book.recipes.insert(recipe.id.clone(), recipe);
    }
}
