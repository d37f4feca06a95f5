//! Shared resources, events, and data definitions for the Pump Arena engine.
//!
//! This is the type contract. Every domain plugin imports from here.
//! Cross-domain calls are limited to the inventory store primitives and
//! the action rate limiter; everything else goes through events.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════
// PROGRESSION — tiers, archetypes, stats
// ═══════════════════════════════════════════════════════════════════════

/// Coarse progression bracket. Gates shop discounts, influence capacity,
/// and legendary content.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Tier {
    #[default]
    Ember,
    Spark,
    Flame,
    Blaze,
    Inferno,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::Ember => "EMBER",
            Tier::Spark => "SPARK",
            Tier::Flame => "FLAME",
            Tier::Blaze => "BLAZE",
            Tier::Inferno => "INFERNO",
        }
    }

    /// Shop discount fraction at this tier.
    pub fn discount(self) -> f64 {
        match self {
            Tier::Ember => 0.0,
            Tier::Spark => 0.05,
            Tier::Flame => 0.10,
            Tier::Blaze => 0.15,
            Tier::Inferno => 0.20,
        }
    }

    /// Influence capacity at this tier.
    pub fn max_influence(self) -> u32 {
        match self {
            Tier::Ember => 100,
            Tier::Spark => 150,
            Tier::Flame => 200,
            Tier::Blaze => 300,
            Tier::Inferno => 500,
        }
    }

    /// Tier reached at a given player level.
    pub fn for_level(level: u32) -> Tier {
        match level {
            0..=4 => Tier::Ember,
            5..=9 => Tier::Spark,
            10..=19 => Tier::Flame,
            20..=34 => Tier::Blaze,
            _ => Tier::Inferno,
        }
    }
}

/// Player specialization. Biases random-event weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Archetype {
    #[default]
    Builder,
    Influencer,
    Trader,
    Researcher,
}

impl Archetype {
    pub fn label(self) -> &'static str {
        match self {
            Archetype::Builder => "Builder",
            Archetype::Influencer => "Influencer",
            Archetype::Trader => "Trader",
            Archetype::Researcher => "Researcher",
        }
    }
}

/// The six player stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Dev,
    Com,
    Mkt,
    Str,
    Cha,
    Lck,
}

impl StatKind {
    pub fn label(self) -> &'static str {
        match self {
            StatKind::Dev => "DEV",
            StatKind::Com => "COM",
            StatKind::Mkt => "MKT",
            StatKind::Str => "STR",
            StatKind::Cha => "CHA",
            StatKind::Lck => "LCK",
        }
    }
}

/// Base stat levels. Tool effects fold directly into these fields on
/// acquisition; temporary buffs are layered on top via `effective_stat`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Stats {
    pub dev: u32,
    pub com: u32,
    pub mkt: u32,
    pub strat: u32,
    pub cha: u32,
    pub lck: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            dev: 1,
            com: 1,
            mkt: 1,
            strat: 1,
            cha: 1,
            lck: 1,
        }
    }
}

impl Stats {
    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Dev => self.dev,
            StatKind::Com => self.com,
            StatKind::Mkt => self.mkt,
            StatKind::Str => self.strat,
            StatKind::Cha => self.cha,
            StatKind::Lck => self.lck,
        }
    }

    pub fn add(&mut self, kind: StatKind, delta: i64) {
        let slot = match kind {
            StatKind::Dev => &mut self.dev,
            StatKind::Com => &mut self.com,
            StatKind::Mkt => &mut self.mkt,
            StatKind::Str => &mut self.strat,
            StatKind::Cha => &mut self.cha,
            StatKind::Lck => &mut self.lck,
        };
        *slot = (*slot as i64 + delta).max(0) as u32;
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ITEMS
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for every item type in the game.
/// Using string IDs for data-driven flexibility.
pub type ItemId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Index into the Fibonacci price table.
    pub fn fib_index(self) -> usize {
        match self {
            Rarity::Common => 5,
            Rarity::Uncommon => 7,
            Rarity::Rare => 9,
            Rarity::Epic => 11,
            Rarity::Legendary => 13,
        }
    }

    /// Base weight in the random-event sampling pool.
    pub fn event_weight(self) -> u32 {
        match self {
            Rarity::Common => 60,
            Rarity::Uncommon => 25,
            Rarity::Rare => 12,
            Rarity::Epic => 5,
            Rarity::Legendary => 1,
        }
    }

    /// Minimum tier required to purchase items of this rarity.
    pub fn required_tier(self) -> Tier {
        match self {
            Rarity::Common | Rarity::Uncommon => Tier::Ember,
            Rarity::Rare => Tier::Spark,
            Rarity::Epic => Tier::Blaze,
            Rarity::Legendary => Tier::Inferno,
        }
    }
}

/// Permanent stat bonus carried by a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBonus {
    pub stat: StatKind,
    pub amount: u32,
}

/// What happens when a consumable is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConsumableEffect {
    /// Restore influence, capped at the tier maximum.
    RestoreInfluence(u32),
    /// Timed stat boost.
    StatBoost {
        stat: StatKind,
        bonus: i64,
        duration_secs: f64,
    },
    /// Absorbs the next negative-reputation event outcome.
    ReputationShield { duration_secs: f64 },
}

/// Closed item taxonomy. Behavior is resolved by exhaustive matching on
/// this enum — never by string comparison on a "type" field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Tool { effect: Option<StatBonus> },
    Consumable { effect: ConsumableEffect },
    Collectible,
    Material,
}

impl ItemKind {
    pub fn category_label(&self) -> &'static str {
        match self {
            ItemKind::Tool { .. } => "tool",
            ItemKind::Consumable { .. } => "consumable",
            ItemKind::Collectible => "collectible",
            ItemKind::Material => "material",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
    pub rarity: Rarity,
    /// Explicit price override. Legacy records carry one; new content
    /// leaves this `None` and the price is derived from rarity.
    pub price: Option<u64>,
    pub sell_price: Option<u64>,
    pub stackable: bool,
    pub max_stack: u32,
}

/// One owned line in an inventory bucket. Stackables aggregate into a
/// single entry; non-stackables get one entry per acquisition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub item_id: ItemId,
    pub quantity: u32,
    pub acquired_at: f64,
}

/// The four category buckets. An item lives in exactly one, resolved
/// from its `ItemKind`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub tools: Vec<InventoryEntry>,
    pub consumables: Vec<InventoryEntry>,
    pub collectibles: Vec<InventoryEntry>,
    pub materials: Vec<InventoryEntry>,
}

impl Inventory {
    pub fn bucket(&self, kind: &ItemKind) -> &Vec<InventoryEntry> {
        match kind {
            ItemKind::Tool { .. } => &self.tools,
            ItemKind::Consumable { .. } => &self.consumables,
            ItemKind::Collectible => &self.collectibles,
            ItemKind::Material => &self.materials,
        }
    }

    pub fn bucket_mut(&mut self, kind: &ItemKind) -> &mut Vec<InventoryEntry> {
        match kind {
            ItemKind::Tool { .. } => &mut self.tools,
            ItemKind::Consumable { .. } => &mut self.consumables,
            ItemKind::Collectible => &mut self.collectibles,
            ItemKind::Material => &mut self.materials,
        }
    }

    /// Total owned quantity of an item across all buckets.
    pub fn count(&self, item_id: &str) -> u64 {
        [
            &self.tools,
            &self.consumables,
            &self.collectibles,
            &self.materials,
        ]
        .iter()
        .flat_map(|b| b.iter())
        .filter(|e| e.item_id == item_id)
        .map(|e| e.quantity as u64)
        .sum()
    }

    pub fn has(&self, item_id: &str) -> bool {
        self.count(item_id) > 0
    }
}

// ═══════════════════════════════════════════════════════════════════════
// BUFFS & SHIELDS
// ═══════════════════════════════════════════════════════════════════════

/// Temporary stat modifier with an absolute expiry on the game clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempBuff {
    pub stat: StatKind,
    pub bonus: i64,
    pub expires_at: f64,
}

/// Absorbs one negative-reputation event outcome, then is consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shield {
    pub expires_at: f64,
}

/// Buff template used by item and event data; instantiated against the
/// clock when applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempBuffSpec {
    pub stat: StatKind,
    pub bonus: i64,
    pub duration_secs: f64,
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER RESOURCE STATE — the single source of truth
// ═══════════════════════════════════════════════════════════════════════

/// Lifetime counters, persisted with the save.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifetimeStats {
    pub items_crafted: u64,
    pub tokens_earned: u64,
    pub tokens_spent: u64,
    pub events_resolved: u64,
    pub minigames_completed: u64,
}

/// The shared player resource state. Every engine component reads and
/// writes this resource directly; multi-step mutation sequences are
/// grouped by their owning operation so they commit together or not at
/// all.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub tokens: u64,
    pub influence: u32,
    pub reputation: i64,
    pub stats: Stats,
    pub level: u32,
    pub xp: u64,
    pub tier: Tier,
    pub archetype: Archetype,
    pub inventory: Inventory,
    pub buffs: Vec<TempBuff>,
    pub shields: Vec<Shield>,
    /// Action/event id → game-clock timestamp at which it unlocks.
    pub cooldowns: HashMap<String, f64>,
    pub last_event_time: f64,
    pub lifetime: LifetimeStats,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            tokens: 500,
            influence: 50,
            reputation: 0,
            stats: Stats::default(),
            level: 1,
            xp: 0,
            tier: Tier::Ember,
            archetype: Archetype::Builder,
            inventory: Inventory::default(),
            buffs: Vec::new(),
            shields: Vec::new(),
            cooldowns: HashMap::new(),
            last_event_time: 0.0,
            lifetime: LifetimeStats::default(),
        }
    }
}

/// XP needed to go from `level` to `level + 1`.
pub fn xp_required(level: u32) -> u64 {
    100 * level as u64
}

impl PlayerState {
    pub fn add_tokens(&mut self, amount: u64) {
        self.tokens = self.tokens.saturating_add(amount);
        self.lifetime.tokens_earned = self.lifetime.tokens_earned.saturating_add(amount);
    }

    /// Deducts tokens, rejecting before any mutation if underfunded.
    pub fn try_spend_tokens(&mut self, cost: u64) -> Result<(), EngineError> {
        if self.tokens < cost {
            return Err(EngineError::Insufficient(format!(
                "need {} more tokens ({} required, {} held)",
                cost - self.tokens,
                cost,
                self.tokens
            )));
        }
        self.tokens -= cost;
        self.lifetime.tokens_spent = self.lifetime.tokens_spent.saturating_add(cost);
        Ok(())
    }

    /// Deducts tokens even below the requirement, clamping at zero.
    /// Used for event penalties, which are not funded transactions.
    pub fn deduct_tokens_clamped(&mut self, amount: u64) {
        let spent = amount.min(self.tokens);
        self.tokens -= spent;
        self.lifetime.tokens_spent = self.lifetime.tokens_spent.saturating_add(spent);
    }

    /// Grants XP and applies any level-ups. Returns the number of levels
    /// gained; the tier is re-derived from the new level.
    pub fn add_xp(&mut self, amount: u64) -> u32 {
        self.xp = self.xp.saturating_add(amount);
        let mut gained = 0;
        while self.xp >= xp_required(self.level) {
            self.xp -= xp_required(self.level);
            self.level += 1;
            gained += 1;
        }
        if gained > 0 {
            self.tier = Tier::for_level(self.level);
        }
        gained
    }

    /// Applies a reputation delta. A negative delta is absorbed by one
    /// active shield, if any, which is consumed in the process.
    /// Returns true if a shield absorbed the hit.
    pub fn add_reputation(&mut self, delta: i64, now: f64) -> bool {
        if delta < 0 {
            if let Some(idx) = self.shields.iter().position(|s| s.expires_at > now) {
                self.shields.remove(idx);
                return true;
            }
        }
        self.reputation += delta;
        false
    }

    pub fn add_influence(&mut self, amount: u32) {
        self.influence = (self.influence + amount).min(self.tier.max_influence());
    }

    pub fn try_spend_influence(&mut self, cost: u32) -> Result<(), EngineError> {
        if self.influence < cost {
            return Err(EngineError::Insufficient(format!(
                "need {} more influence ({} required, {} held)",
                cost - self.influence,
                cost,
                self.influence
            )));
        }
        self.influence -= cost;
        Ok(())
    }

    /// Base stat plus all unexpired temporary buffs. Tool effects are
    /// already folded into the base.
    pub fn effective_stat(&self, kind: StatKind, now: f64) -> u32 {
        let base = self.stats.get(kind) as i64;
        let buffed: i64 = self
            .buffs
            .iter()
            .filter(|b| b.stat == kind && b.expires_at > now)
            .map(|b| b.bonus)
            .sum();
        (base + buffed).max(0) as u32
    }

    /// Drops expired buffs and shields, returning the expired buffs so
    /// the caller can notify the UI.
    pub fn prune_expired(&mut self, now: f64) -> Vec<TempBuff> {
        let mut expired = Vec::new();
        self.buffs.retain(|b| {
            if b.expires_at <= now {
                expired.push(b.clone());
                false
            } else {
                true
            }
        });
        self.shields.retain(|s| s.expires_at > now);
        expired
    }

    /// True once the cooldown for this key has passed (or was never set).
    pub fn cooldown_ready(&self, key: &str, now: f64) -> bool {
        self.cooldowns.get(key).map_or(true, |&until| now >= until)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CLOCK & RNG — injectable, so tests simulate time and seed draws
// ═══════════════════════════════════════════════════════════════════════

/// Monotonic game-time in seconds, advanced by the host. The engine
/// never consults wall time directly.
#[derive(Resource, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GameClock {
    pub elapsed_secs: f64,
}

impl GameClock {
    pub fn now(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn advance(&mut self, dt_secs: f64) {
        self.elapsed_secs += dt_secs.max(0.0);
    }
}

/// Engine-wide random source. Tests seed it; the demo runs from entropy.
#[derive(Resource)]
pub struct GameRng(pub rand::rngs::StdRng);

impl Default for GameRng {
    fn default() -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::from_entropy())
    }
}

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ERROR TAXONOMY
// ═══════════════════════════════════════════════════════════════════════

/// Every engine operation reports failure through this closed taxonomy.
/// The `Display` string is the user-facing message and always names the
/// specific shortfall.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Malformed id or quantity — rejected before any state read.
    #[error("{0}")]
    Validation(String),
    /// Tokens/influence/materials/quantity below requirement.
    #[error("{0}")]
    Insufficient(String),
    /// Action attempted inside its cooldown window.
    #[error("{0}")]
    RateLimited(String),
    /// Unknown item/recipe/event/choice id.
    #[error("{0}")]
    NotFound(String),
    /// Level/tier/stat gate not met.
    #[error("{0}")]
    Precondition(String),
}

// ═══════════════════════════════════════════════════════════════════════
// RANDOM EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// Who an affinity delta lands on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AffinityTarget {
    Collaborator(String),
    /// Resolved at application time by uniformly sampling the roster.
    Random,
}

/// State changes applied when an event choice succeeds or fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventOutcome {
    pub message: String,
    pub xp: u64,
    pub tokens: i64,
    pub reputation: i64,
    pub influence: i64,
    pub affinity: Vec<(AffinityTarget, i64)>,
    pub buff: Option<TempBuffSpec>,
    /// Opaque flag passed through to the UI layer unresolved.
    pub special: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventChoice {
    pub id: String,
    pub label: String,
    pub base_chance: f64,
    /// Per-stat contribution coefficients, scaled by the current stat
    /// value at resolution time.
    pub stat_bonuses: Vec<(StatKind, f64)>,
    /// Minimum effective stat required to pick this choice.
    pub stat_required: Option<(StatKind, u32)>,
    pub on_success: EventOutcome,
    pub on_fail: EventOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub min_level: u32,
    pub min_reputation: i64,
    /// Per-event cooldown; `None` falls back to the tuning default.
    pub cooldown_secs: Option<f64>,
    /// If set, the event auto-resolves after this many seconds.
    pub time_limit_secs: Option<f64>,
    /// Extra sampling weight when the player's archetype matches.
    pub archetype_bonus: Vec<(Archetype, u32)>,
    /// The last-listed choice is the safe default used on timeout.
    pub choices: Vec<EventChoice>,
}

/// An instantiated event awaiting a choice. At most one exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub event_id: String,
    pub started_at: f64,
    pub expires_at: Option<f64>,
}

/// Idle (None) / Active (Some) — the event engine's state machine.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveEventState(pub Option<ActiveEvent>);

/// One resolved event, kept most-recent-first in a bounded ring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_id: String,
    pub choice_id: String,
    pub success: bool,
    pub resolved_at: f64,
    pub auto_resolved: bool,
}

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventHistory {
    pub records: VecDeque<EventRecord>,
}

/// Probability coefficients for the event engine. These shapes follow
/// the original balance sheet but are configuration, not contract.
#[derive(Resource, Debug, Clone)]
pub struct EventTuning {
    /// Quiet window after an event resolves before any new trigger.
    pub global_cooldown_secs: f64,
    /// Default per-event cooldown when the event defines none.
    pub default_event_cooldown_secs: f64,
    /// How often the trigger check actually rolls, in game-seconds.
    pub poll_interval_secs: f64,
    pub base_trigger_chance: f64,
    /// Added trigger chance per effective luck point.
    pub luck_trigger_coef: f64,
    /// Added success chance per effective luck point.
    pub luck_success_coef: f64,
    /// Stat contribution = effective_stat * this * choice coefficient.
    pub stat_contribution_scale: f64,
    /// Hard ceiling on any success probability.
    pub success_chance_cap: f64,
    pub history_cap: usize,
}

impl Default for EventTuning {
    fn default() -> Self {
        Self {
            global_cooldown_secs: 90.0,
            default_event_cooldown_secs: 300.0,
            poll_interval_secs: 10.0,
            base_trigger_chance: 0.08,
            luck_trigger_coef: 0.004,
            luck_success_coef: 0.003,
            stat_contribution_scale: 0.01,
            success_chance_cap: 0.95,
            history_cap: 20,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// COLLABORATORS & AFFINITY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorDef {
    pub id: String,
    pub name: String,
    pub role: String,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct CollaboratorRoster {
    pub collaborators: Vec<CollaboratorDef>,
}

/// Collaborator id → relationship score, adjusted by event outcomes.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Affinities {
    pub scores: HashMap<String, i64>,
}

impl Affinities {
    pub fn adjust(&mut self, collaborator_id: &str, delta: i64) {
        *self.scores.entry(collaborator_id.to_string()).or_insert(0) += delta;
    }

    pub fn get(&self, collaborator_id: &str) -> i64 {
        self.scores.get(collaborator_id).copied().unwrap_or(0)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// MINIGAMES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RewardBundle {
    pub xp: u64,
    pub tokens: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinigameDef {
    pub id: String,
    pub name: String,
    /// The stat that scales this game's rewards.
    pub stat: StatKind,
    pub base: RewardBundle,
    pub perfect: RewardBundle,
}

// ═══════════════════════════════════════════════════════════════════════
// REGISTRIES — loaded from data at startup
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Default)]
pub struct ItemCatalog {
    pub items: HashMap<ItemId, ItemDef>,
}

impl ItemCatalog {
    pub fn get(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }

    pub fn insert(&mut self, def: ItemDef) {
        self.items.insert(def.id.clone(), def);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub materials: Vec<(ItemId, u32)>,
    pub influence_cost: u32,
    pub min_level: u32,
    pub min_tier: Tier,
    pub output: (ItemId, u32),
    pub xp_reward: u64,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct RecipeBook {
    pub recipes: HashMap<String, Recipe>,
}

impl RecipeBook {
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(id)
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct EventCatalog {
    pub events: Vec<EventDef>,
}

impl EventCatalog {
    pub fn get(&self, id: &str) -> Option<&EventDef> {
        self.events.iter().find(|e| e.id == id)
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct MinigameCatalog {
    pub games: HashMap<String, MinigameDef>,
}

impl MinigameCatalog {
    pub fn get(&self, id: &str) -> Option<&MinigameDef> {
        self.games.get(id)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// REQUEST EVENTS — UI/host → engine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone)]
pub struct BuyRequestEvent {
    pub item_id: ItemId,
    pub quantity: u32,
}

#[derive(Event, Debug, Clone)]
pub struct SellRequestEvent {
    pub item_id: ItemId,
    pub quantity: u32,
}

#[derive(Event, Debug, Clone)]
pub struct UseItemRequestEvent {
    pub item_id: ItemId,
}

#[derive(Event, Debug, Clone)]
pub struct CraftRequestEvent {
    pub recipe_id: String,
}

#[derive(Event, Debug, Clone)]
pub struct EventChoiceRequestEvent {
    pub choice_id: String,
}

/// Reported by the host when a mini-game finishes. The engine has no
/// knowledge of how the score was produced.
#[derive(Event, Debug, Clone)]
pub struct MinigameResultEvent {
    pub minigame_id: String,
    pub score_percent: u32,
    pub is_perfect: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// NOTIFICATION EVENTS — engine → UI/host
// ═══════════════════════════════════════════════════════════════════════

/// User-facing feedback line for the UI to render.
#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
    pub duration_secs: f32,
}

#[derive(Event, Debug, Clone)]
pub struct CollectibleFoundEvent {
    pub item_id: ItemId,
    pub name: String,
}

#[derive(Event, Debug, Clone)]
pub struct EventTriggeredEvent {
    pub event_id: String,
    pub name: String,
    pub expires_at: Option<f64>,
}

#[derive(Event, Debug, Clone)]
pub struct EventResolvedEvent {
    pub event_id: String,
    pub choice_id: String,
    pub success: bool,
    pub message: String,
    pub special: Option<String>,
    pub auto_resolved: bool,
}

/// Emitted after every successful mutation; the save system is the only
/// listener and the only writer to durable storage.
#[derive(Event, Debug, Clone)]
pub struct SaveGameEvent;

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const MAX_PURCHASE_QTY: u32 = 999;
pub const MAX_ITEM_ID_LEN: usize = 64;
