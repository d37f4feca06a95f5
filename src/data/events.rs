use crate::shared::*;

/// Populate the EventCatalog and the collaborator roster.
///
/// Convention: the last choice of every event is the safe one — it is
/// what the engine picks when a timed event expires.
pub fn populate_events(catalog: &mut EventCatalog) {
    catalog.events = vec![
        // ── Common ───────────────────────────────────────────────────
        EventDef {
            id: "whale_dm".into(),
            name: "Whale in the DMs".into(),
            description: "A whale wants a private allocation. The number has commas.".into(),
            rarity: Rarity::Common,
            min_level: 1,
            min_reputation: i64::MIN,
            cooldown_secs: None,
            time_limit_secs: None,
            archetype_bonus: vec![(Archetype::Trader, 20)],
            choices: vec![
                EventChoice {
                    id: "negotiate".into(),
                    label: "Negotiate a premium".into(),
                    base_chance: 0.45,
                    stat_bonuses: vec![(StatKind::Mkt, 2.0), (StatKind::Cha, 1.0)],
                    stat_required: None,
                    on_success: EventOutcome {
                        message: "The whale pays up. Screenshot everything.".into(),
                        xp: 40,
                        tokens: 300,
                        reputation: 2,
                        ..Default::default()
                    },
                    on_fail: EventOutcome {
                        message: "The whale ghosts you mid-sentence.".into(),
                        xp: 10,
                        reputation: -1,
                        ..Default::default()
                    },
                },
                EventChoice {
                    id: "accept".into(),
                    label: "Accept the standard rate".into(),
                    base_chance: 0.9,
                    stat_bonuses: vec![],
                    stat_required: None,
                    on_success: EventOutcome {
                        message: "Clean deal, no drama.".into(),
                        xp: 20,
                        tokens: 120,
                        ..Default::default()
                    },
                    on_fail: EventOutcome {
                        message: "The wire never lands.".into(),
                        xp: 5,
                        ..Default::default()
                    },
                },
            ],
        },
        EventDef {
            id: "viral_tweet".into(),
            name: "Going Viral".into(),
            description: "Your shitpost is doing numbers. Act now or watch it fade.".into(),
            rarity: Rarity::Common,
            min_level: 1,
            min_reputation: i64::MIN,
            cooldown_secs: None,
            time_limit_secs: None,
            archetype_bonus: vec![(Archetype::Influencer, 25)],
            choices: vec![
                EventChoice {
                    id: "ride_wave".into(),
                    label: "Ride the wave with a thread".into(),
                    base_chance: 0.5,
                    stat_bonuses: vec![(StatKind::Cha, 2.0), (StatKind::Mkt, 1.0)],
                    stat_required: None,
                    on_success: EventOutcome {
                        message: "The thread hits harder than the original.".into(),
                        xp: 50,
                        reputation: 3,
                        influence: 20,
                        buff: Some(TempBuffSpec {
                            stat: StatKind::Mkt,
                            bonus: 2,
                            duration_secs: 600.0,
                        }),
                        ..Default::default()
                    },
                    on_fail: EventOutcome {
                        message: "The follow-up flops and the replies notice.".into(),
                        xp: 10,
                        reputation: -2,
                        ..Default::default()
                    },
                },
                EventChoice {
                    id: "let_it_ride".into(),
                    label: "Let it ride on its own".into(),
                    base_chance: 0.95,
                    stat_bonuses: vec![],
                    stat_required: None,
                    on_success: EventOutcome {
                        message: "A nice bump in followers, no risk taken.".into(),
                        xp: 15,
                        influence: 10,
                        ..Default::default()
                    },
                    on_fail: EventOutcome {
                        message: "The algorithm buries it within the hour.".into(),
                        xp: 5,
                        ..Default::default()
                    },
                },
            ],
        },
        // ── Uncommon ─────────────────────────────────────────────────
        EventDef {
            id: "rug_pull_rumor".into(),
            name: "Rug Pull Rumor".into(),
            description: "An anon thread claims your treasury wallet is draining.".into(),
            rarity: Rarity::Uncommon,
            min_level: 3,
            min_reputation: i64::MIN,
            cooldown_secs: Some(600.0),
            time_limit_secs: None,
            archetype_bonus: vec![],
            choices: vec![
                EventChoice {
                    id: "publish_proof".into(),
                    label: "Publish on-chain proof".into(),
                    base_chance: 0.4,
                    stat_bonuses: vec![(StatKind::Dev, 2.0), (StatKind::Str, 2.0)],
                    stat_required: None,
                    on_success: EventOutcome {
                        message: "Receipts posted. The thread deletes itself.".into(),
                        xp: 60,
                        reputation: 5,
                        ..Default::default()
                    },
                    on_fail: EventOutcome {
                        message: "Your rebuttal has a typo in the wallet address.".into(),
                        xp: 15,
                        reputation: -5,
                        ..Default::default()
                    },
                },
                EventChoice {
                    id: "ignore_it".into(),
                    label: "Ignore it and keep building".into(),
                    base_chance: 0.7,
                    stat_bonuses: vec![(StatKind::Str, 1.0)],
                    stat_required: None,
                    on_success: EventOutcome {
                        message: "The rumor dies without oxygen.".into(),
                        xp: 25,
                        ..Default::default()
                    },
                    on_fail: EventOutcome {
                        message: "Silence reads as guilt this time.".into(),
                        xp: 10,
                        reputation: -3,
                        ..Default::default()
                    },
                },
            ],
        },
        EventDef {
            id: "hackathon_invite".into(),
            name: "Hackathon Invite".into(),
            description: "48 hours, one prize pool, zero sleep.".into(),
            rarity: Rarity::Uncommon,
            min_level: 2,
            min_reputation: i64::MIN,
            cooldown_secs: None,
            time_limit_secs: None,
            archetype_bonus: vec![(Archetype::Builder, 30)],
            choices: vec![
                EventChoice {
                    id: "compete".into(),
                    label: "Compete to win".into(),
                    base_chance: 0.35,
                    stat_bonuses: vec![(StatKind::Dev, 3.0)],
                    stat_required: None,
                    on_success: EventOutcome {
                        message: "First place. The demo gods were kind.".into(),
                        xp: 80,
                        tokens: 400,
                        reputation: 3,
                        ..Default::default()
                    },
                    on_fail: EventOutcome {
                        message: "The demo crashes on stage. Still shipped something.".into(),
                        xp: 30,
                        ..Default::default()
                    },
                },
                EventChoice {
                    id: "mentor".into(),
                    label: "Mentor a team instead".into(),
                    base_chance: 0.9,
                    stat_bonuses: vec![(StatKind::Com, 1.0)],
                    stat_required: None,
                    on_success: EventOutcome {
                        message: "Your team places and shouts you out.".into(),
                        xp: 35,
                        reputation: 2,
                        affinity: vec![(AffinityTarget::Random, 3)],
                        ..Default::default()
                    },
                    on_fail: EventOutcome {
                        message: "Your team pivots five times and submits nothing.".into(),
                        xp: 10,
                        ..Default::default()
                    },
                },
            ],
        },
        EventDef {
            id: "influencer_collab".into(),
            name: "Collab Request".into(),
            description: "Nova wants to co-stream your next launch.".into(),
            rarity: Rarity::Uncommon,
            min_level: 4,
            min_reputation: 0,
            cooldown_secs: None,
            time_limit_secs: None,
            archetype_bonus: vec![(Archetype::Influencer, 20)],
            choices: vec![
                EventChoice {
                    id: "co_stream".into(),
                    label: "Co-stream the launch".into(),
                    base_chance: 0.55,
                    stat_bonuses: vec![(StatKind::Cha, 2.0)],
                    stat_required: None,
                    on_success: EventOutcome {
                        message: "Chat loves the chemistry. Numbers way up.".into(),
                        xp: 45,
                        influence: 15,
                        affinity: vec![(AffinityTarget::Collaborator("nova".into()), 5)],
                        ..Default::default()
                    },
                    on_fail: EventOutcome {
                        message: "Dead air for twenty minutes. Brutal.".into(),
                        xp: 15,
                        affinity: vec![(AffinityTarget::Collaborator("nova".into()), -2)],
                        ..Default::default()
                    },
                },
                EventChoice {
                    id: "decline_politely".into(),
                    label: "Decline politely".into(),
                    base_chance: 1.0,
                    stat_bonuses: vec![],
                    stat_required: None,
                    on_success: EventOutcome {
                        message: "Nova takes it well. Maybe next launch.".into(),
                        xp: 5,
                        ..Default::default()
                    },
                    on_fail: EventOutcome::default(),
                },
            ],
        },
        // ── Rare, timed ──────────────────────────────────────────────
        EventDef {
            id: "exchange_listing".into(),
            name: "Exchange Listing Window".into(),
            description: "A top-ten exchange has a listing slot. It closes fast.".into(),
            rarity: Rarity::Rare,
            min_level: 6,
            min_reputation: 0,
            cooldown_secs: Some(900.0),
            time_limit_secs: Some(120.0),
            archetype_bonus: vec![(Archetype::Trader, 15)],
            choices: vec![
                EventChoice {
                    id: "fast_track".into(),
                    label: "Pay for the fast track".into(),
                    base_chance: 0.5,
                    stat_bonuses: vec![(StatKind::Str, 2.0), (StatKind::Mkt, 1.0)],
                    stat_required: Some((StatKind::Str, 5)),
                    on_success: EventOutcome {
                        message: "Listed. The candle is vertical.".into(),
                        xp: 100,
                        tokens: 800,
                        reputation: 4,
                        ..Default::default()
                    },
                    on_fail: EventOutcome {
                        message: "Fee paid, listing delayed a quarter.".into(),
                        xp: 25,
                        tokens: -300,
                        ..Default::default()
                    },
                },
                EventChoice {
                    id: "standard_queue".into(),
                    label: "Join the standard queue".into(),
                    base_chance: 0.85,
                    stat_bonuses: vec![],
                    stat_required: None,
                    on_success: EventOutcome {
                        message: "In the queue. Slow, but it counts.".into(),
                        xp: 30,
                        tokens: 100,
                        ..Default::default()
                    },
                    on_fail: EventOutcome {
                        message: "Application bounced on a formatting error.".into(),
                        xp: 10,
                        ..Default::default()
                    },
                },
            ],
        },
        // ── Epic ─────────────────────────────────────────────────────
        EventDef {
            id: "security_breach".into(),
            name: "Security Breach".into(),
            description: "Someone is probing the bridge contract. Right now.".into(),
            rarity: Rarity::Epic,
            min_level: 8,
            min_reputation: i64::MIN,
            cooldown_secs: Some(1200.0),
            time_limit_secs: None,
            archetype_bonus: vec![(Archetype::Builder, 10), (Archetype::Researcher, 20)],
            choices: vec![
                EventChoice {
                    id: "patch_it_yourself".into(),
                    label: "Patch it yourself, tonight".into(),
                    base_chance: 0.4,
                    stat_bonuses: vec![(StatKind::Dev, 3.0)],
                    stat_required: Some((StatKind::Dev, 6)),
                    on_success: EventOutcome {
                        message: "Exploit closed with minutes to spare.".into(),
                        xp: 120,
                        reputation: 6,
                        buff: Some(TempBuffSpec {
                            stat: StatKind::Dev,
                            bonus: 2,
                            duration_secs: 900.0,
                        }),
                        ..Default::default()
                    },
                    on_fail: EventOutcome {
                        message: "The patch ships a new bug. Funds are safu, barely.".into(),
                        xp: 40,
                        reputation: -4,
                        ..Default::default()
                    },
                },
                EventChoice {
                    id: "hire_auditors".into(),
                    label: "Pay an audit firm".into(),
                    base_chance: 0.85,
                    stat_bonuses: vec![],
                    stat_required: None,
                    on_success: EventOutcome {
                        message: "Expensive, thorough, handled.".into(),
                        xp: 40,
                        tokens: -400,
                        reputation: 2,
                        ..Default::default()
                    },
                    on_fail: EventOutcome {
                        message: "The firm is booked out. You got lucky anyway.".into(),
                        xp: 20,
                        tokens: -150,
                        ..Default::default()
                    },
                },
            ],
        },
        // ── Legendary ────────────────────────────────────────────────
        EventDef {
            id: "legendary_airdrop".into(),
            name: "Phantom Airdrop".into(),
            description: "A wallet you forgot about is suddenly eligible for everything.".into(),
            rarity: Rarity::Legendary,
            min_level: 15,
            min_reputation: 0,
            cooldown_secs: Some(3600.0),
            time_limit_secs: None,
            archetype_bonus: vec![],
            choices: vec![
                EventChoice {
                    id: "claim_everything".into(),
                    label: "Claim everything at once".into(),
                    base_chance: 0.3,
                    stat_bonuses: vec![(StatKind::Lck, 4.0)],
                    stat_required: None,
                    on_success: EventOutcome {
                        message: "All claims clear. Generational.".into(),
                        xp: 250,
                        tokens: 2500,
                        special: Some("airdrop_jackpot".into()),
                        ..Default::default()
                    },
                    on_fail: EventOutcome {
                        message: "Half the claims were phishing mirrors.".into(),
                        xp: 50,
                        tokens: -500,
                        reputation: -2,
                        ..Default::default()
                    },
                },
                EventChoice {
                    id: "verify_first".into(),
                    label: "Verify each contract first".into(),
                    base_chance: 0.8,
                    stat_bonuses: vec![(StatKind::Str, 1.0)],
                    stat_required: None,
                    on_success: EventOutcome {
                        message: "Slow and safe. The real ones paid out.".into(),
                        xp: 100,
                        tokens: 900,
                        ..Default::default()
                    },
                    on_fail: EventOutcome {
                        message: "The windows closed while you were reading bytecode.".into(),
                        xp: 30,
                        ..Default::default()
                    },
                },
            ],
        },
    ];
}

/// Populate the collaborator roster that affinity deltas land on.
pub fn populate_collaborators(roster: &mut CollaboratorRoster) {
    roster.collaborators = vec![
        CollaboratorDef {
            id: "nova".into(),
            name: "Nova".into(),
            role: "Streamer".into(),
        },
        CollaboratorDef {
            id: "axel".into(),
            name: "Axel".into(),
            role: "Protocol Dev".into(),
        },
        CollaboratorDef {
            id: "mira".into(),
            name: "Mira".into(),
            role: "Community Lead".into(),
        },
        CollaboratorDef {
            id: "kenji".into(),
            name: "Kenji".into(),
            role: "Market Maker".into(),
        },
    ];
}
