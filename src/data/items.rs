use crate::shared::*;

/// Populate the ItemCatalog with the launch item set: tools, consumables,
/// collectibles, and crafting materials.
///
/// Prices are left `None` wherever the Fibonacci rarity price is right;
/// only hand-balanced exceptions carry an override.
pub fn populate_items(catalog: &mut ItemCatalog) {
    let items: Vec<ItemDef> = vec![
        // ═══════════════════════════════════════════════════════════════
        // TOOLS — permanent stat bonuses, folded in on acquisition
        // ═══════════════════════════════════════════════════════════════
        ItemDef {
            id: "mech_keyboard".into(),
            name: "Mechanical Keyboard".into(),
            description: "Clackier keys, cleaner commits.".into(),
            kind: ItemKind::Tool {
                effect: Some(StatBonus {
                    stat: StatKind::Dev,
                    amount: 2,
                }),
            },
            rarity: Rarity::Uncommon,
            price: None,
            sell_price: None,
            stackable: false,
            max_stack: 1,
        },
        ItemDef {
            id: "ring_light".into(),
            name: "Ring Light".into(),
            description: "Nobody trusts a founder filmed in the dark.".into(),
            kind: ItemKind::Tool {
                effect: Some(StatBonus {
                    stat: StatKind::Cha,
                    amount: 2,
                }),
            },
            rarity: Rarity::Uncommon,
            price: None,
            sell_price: None,
            stackable: false,
            max_stack: 1,
        },
        ItemDef {
            id: "trend_scanner".into(),
            name: "Trend Scanner".into(),
            description: "Surfaces the narrative before it peaks.".into(),
            kind: ItemKind::Tool {
                effect: Some(StatBonus {
                    stat: StatKind::Mkt,
                    amount: 3,
                }),
            },
            rarity: Rarity::Rare,
            price: None,
            sell_price: None,
            stackable: false,
            max_stack: 1,
        },
        ItemDef {
            id: "ledger_vault".into(),
            name: "Ledger Vault".into(),
            description: "Cold storage for hot takes.".into(),
            kind: ItemKind::Tool {
                effect: Some(StatBonus {
                    stat: StatKind::Str,
                    amount: 3,
                }),
            },
            rarity: Rarity::Rare,
            price: None,
            sell_price: None,
            stackable: false,
            max_stack: 1,
        },
        ItemDef {
            id: "lucky_dice".into(),
            name: "Lucky Dice".into(),
            description: "Weighted? Prove it.".into(),
            kind: ItemKind::Tool {
                effect: Some(StatBonus {
                    stat: StatKind::Lck,
                    amount: 2,
                }),
            },
            rarity: Rarity::Rare,
            price: None,
            sell_price: None,
            stackable: false,
            max_stack: 1,
        },
        ItemDef {
            id: "quantum_rig".into(),
            name: "Quantum Rig".into(),
            description: "Compiles before you finish typing.".into(),
            kind: ItemKind::Tool {
                effect: Some(StatBonus {
                    stat: StatKind::Dev,
                    amount: 5,
                }),
            },
            rarity: Rarity::Epic,
            price: None,
            sell_price: None,
            stackable: false,
            max_stack: 1,
        },
        ItemDef {
            id: "genesis_gpu".into(),
            name: "Genesis GPU".into(),
            description: "The card that mined block one. Allegedly.".into(),
            kind: ItemKind::Tool {
                effect: Some(StatBonus {
                    stat: StatKind::Dev,
                    amount: 8,
                }),
            },
            rarity: Rarity::Legendary,
            price: None,
            sell_price: None,
            stackable: false,
            max_stack: 1,
        },
        // ═══════════════════════════════════════════════════════════════
        // CONSUMABLES
        // ═══════════════════════════════════════════════════════════════
        ItemDef {
            id: "espresso_shot".into(),
            name: "Espresso Shot".into(),
            description: "Restores a little influence.".into(),
            kind: ItemKind::Consumable {
                effect: ConsumableEffect::RestoreInfluence(25),
            },
            rarity: Rarity::Common,
            price: None,
            sell_price: None,
            stackable: true,
            max_stack: 99,
        },
        ItemDef {
            id: "energy_drink".into(),
            name: "Energy Drink".into(),
            description: "Restores a lot of influence. Heart rate sold separately.".into(),
            kind: ItemKind::Consumable {
                effect: ConsumableEffect::RestoreInfluence(60),
            },
            rarity: Rarity::Uncommon,
            price: None,
            sell_price: None,
            stackable: true,
            max_stack: 99,
        },
        ItemDef {
            id: "charisma_gum".into(),
            name: "Charisma Gum".into(),
            description: "Minty confidence, five minutes at a time.".into(),
            kind: ItemKind::Consumable {
                effect: ConsumableEffect::StatBoost {
                    stat: StatKind::Cha,
                    bonus: 2,
                    duration_secs: 300.0,
                },
            },
            rarity: Rarity::Uncommon,
            price: None,
            sell_price: None,
            stackable: true,
            max_stack: 50,
        },
        ItemDef {
            id: "focus_serum".into(),
            name: "Focus Serum".into(),
            description: "Ten minutes of flow state in a vial.".into(),
            kind: ItemKind::Consumable {
                effect: ConsumableEffect::StatBoost {
                    stat: StatKind::Dev,
                    bonus: 3,
                    duration_secs: 600.0,
                },
            },
            rarity: Rarity::Rare,
            price: None,
            sell_price: None,
            stackable: true,
            max_stack: 20,
        },
        ItemDef {
            id: "hype_juice".into(),
            name: "Hype Juice".into(),
            description: "Everything you post lands harder.".into(),
            kind: ItemKind::Consumable {
                effect: ConsumableEffect::StatBoost {
                    stat: StatKind::Mkt,
                    bonus: 3,
                    duration_secs: 600.0,
                },
            },
            rarity: Rarity::Rare,
            price: None,
            sell_price: None,
            stackable: true,
            max_stack: 20,
        },
        ItemDef {
            id: "pr_shield".into(),
            name: "PR Shield".into(),
            description: "Eats one scandal, no questions asked.".into(),
            kind: ItemKind::Consumable {
                effect: ConsumableEffect::ReputationShield {
                    duration_secs: 900.0,
                },
            },
            rarity: Rarity::Epic,
            price: None,
            sell_price: None,
            stackable: true,
            max_stack: 10,
        },
        // ═══════════════════════════════════════════════════════════════
        // COLLECTIBLES — display only, never sellable
        // ═══════════════════════════════════════════════════════════════
        ItemDef {
            id: "arena_poster".into(),
            name: "Arena Launch Poster".into(),
            description: "Signed by nobody famous yet.".into(),
            kind: ItemKind::Collectible,
            rarity: Rarity::Common,
            price: None,
            sell_price: None,
            stackable: false,
            max_stack: 1,
        },
        ItemDef {
            id: "founder_badge".into(),
            name: "Founder Badge".into(),
            description: "Proof you were here before the chart was.".into(),
            kind: ItemKind::Collectible,
            rarity: Rarity::Epic,
            price: None,
            sell_price: None,
            stackable: false,
            max_stack: 1,
        },
        ItemDef {
            id: "genesis_trophy".into(),
            name: "Genesis Trophy".into(),
            description: "One per arena. This one is yours.".into(),
            kind: ItemKind::Collectible,
            rarity: Rarity::Legendary,
            price: None,
            sell_price: None,
            stackable: false,
            max_stack: 1,
        },
        // ═══════════════════════════════════════════════════════════════
        // MATERIALS
        // ═══════════════════════════════════════════════════════════════
        ItemDef {
            id: "code_fragment".into(),
            name: "Code Fragment".into(),
            description: "A snippet worth keeping.".into(),
            kind: ItemKind::Material,
            rarity: Rarity::Common,
            price: None,
            sell_price: None,
            stackable: true,
            max_stack: 99,
        },
        ItemDef {
            id: "meme_template".into(),
            name: "Meme Template".into(),
            description: "Blank. Dangerous in the right hands.".into(),
            kind: ItemKind::Material,
            rarity: Rarity::Common,
            price: None,
            sell_price: None,
            stackable: true,
            max_stack: 99,
        },
        ItemDef {
            id: "gpu_shard".into(),
            name: "GPU Shard".into(),
            description: "Still warm from the last training run.".into(),
            kind: ItemKind::Material,
            rarity: Rarity::Uncommon,
            price: None,
            sell_price: None,
            stackable: true,
            max_stack: 99,
        },
        ItemDef {
            id: "audit_report".into(),
            name: "Audit Report".into(),
            description: "Three critical findings, all fixed. Probably.".into(),
            kind: ItemKind::Material,
            rarity: Rarity::Rare,
            price: None,
            sell_price: None,
            stackable: true,
            max_stack: 99,
        },
        ItemDef {
            id: "viral_spark".into(),
            name: "Viral Spark".into(),
            description: "Bottled lightning from a post that got away.".into(),
            kind: ItemKind::Material,
            rarity: Rarity::Epic,
            price: None,
            sell_price: None,
            stackable: true,
            max_stack: 99,
        },
    ];

    for item in items {
        catalog.insert(item);
    }
}
