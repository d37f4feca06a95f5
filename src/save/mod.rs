//! Persistence: one versioned JSON save, written through after every
//! successful mutation and loaded once at startup.
//!
//! Native builds write next to the executable with a temp-file rename;
//! wasm builds go through browser localStorage.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use crate::shared::*;

pub const SAVE_VERSION: u32 = 1;
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "pump_arena_save";

/// Everything that survives a restart. Catalogs are code-populated and
/// never serialized; tuning is configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub player: PlayerState,
    pub affinities: Affinities,
    pub history: EventHistory,
    pub clock_secs: f64,
}

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_game)
            .add_systems(Update, handle_save_request);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// STORAGE BACKENDS
// ═══════════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
fn save_path() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    exe_dir.join("pump_arena_save.json")
}

#[cfg(not(target_arch = "wasm32"))]
fn write_save(data: &SaveData) -> Result<(), String> {
    let json =
        serde_json::to_string_pretty(data).map_err(|e| format!("Serialization failed: {}", e))?;

    let path = save_path();
    // Write to a temp file first, then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, &json)
        .map_err(|e| format!("Write failed for {}: {}", tmp_path.display(), e))?;
    fs::rename(&tmp_path, &path).map_err(|e| format!("Rename failed: {}", e))?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_save() -> Result<Option<SaveData>, String> {
    let path = save_path();
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(&path)
        .map_err(|e| format!("Read failed for {}: {}", path.display(), e))?;
    parse_save(&json).map(Some)
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .ok_or_else(|| "no window".to_string())?
        .local_storage()
        .map_err(|_| "localStorage unavailable".to_string())?
        .ok_or_else(|| "localStorage unavailable".to_string())
}

#[cfg(target_arch = "wasm32")]
fn write_save(data: &SaveData) -> Result<(), String> {
    let json = serde_json::to_string(data).map_err(|e| format!("Serialization failed: {}", e))?;
    local_storage()?
        .set_item(STORAGE_KEY, &json)
        .map_err(|_| "localStorage write failed".to_string())
}

#[cfg(target_arch = "wasm32")]
fn read_save() -> Result<Option<SaveData>, String> {
    let storage = local_storage()?;
    let Some(json) = storage
        .get_item(STORAGE_KEY)
        .map_err(|_| "localStorage read failed".to_string())?
    else {
        return Ok(None);
    };
    parse_save(&json).map(Some)
}

fn parse_save(json: &str) -> Result<SaveData, String> {
    let data: SaveData =
        serde_json::from_str(json).map_err(|e| format!("Deserialization failed: {}", e))?;

    // Version check — future versions can add migration here
    if data.version != SAVE_VERSION {
        warn!(
            "[Save] File has version {} but current version is {}. Attempting to load anyway.",
            data.version, SAVE_VERSION
        );
    }
    Ok(data)
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

fn load_game(
    mut player: ResMut<PlayerState>,
    mut affinities: ResMut<Affinities>,
    mut history: ResMut<EventHistory>,
    mut clock: ResMut<GameClock>,
) {
    match read_save() {
        Ok(Some(data)) => {
            *player = data.player;
            *affinities = data.affinities;
            *history = data.history;
            clock.elapsed_secs = data.clock_secs;
            info!(
                "[Save] Loaded: level {}, {} tokens",
                player.level, player.tokens
            );
        }
        Ok(None) => {
            info!("[Save] No save file, starting fresh");
        }
        Err(e) => {
            // A corrupt save does not take the session down with it.
            warn!("[Save] Load failed, starting fresh: {}", e);
        }
    }
}

/// Write-through listener. The originating operation has already
/// committed; a failed write is logged, never rolled back.
fn handle_save_request(
    mut requests: EventReader<SaveGameEvent>,
    player: Res<PlayerState>,
    affinities: Res<Affinities>,
    history: Res<EventHistory>,
    clock: Res<GameClock>,
) {
    if requests.read().next().is_none() {
        return;
    }
    // Coalesce a burst of save requests from one frame into one write.
    requests.clear();

    let data = SaveData {
        version: SAVE_VERSION,
        player: player.clone(),
        affinities: affinities.clone(),
        history: history.clone(),
        clock_secs: clock.now(),
    };
    match write_save(&data) {
        Ok(()) => debug!("[Save] State persisted"),
        Err(e) => warn!("[Save] Write failed: {}", e),
    }
}
