//! Save schema versioning and forward migration.
//!
//! Migration runs over raw `serde_json::Value` so every step is pure and
//! total over the old shape: a step only inserts the fields its target
//! version introduced and never inspects fields it does not own. After the
//! chain runs, deserialization fills any still-missing fields from defaults
//! (schema enforcement).

use serde_json::{json, Map, Value};
use tracing::info;

use crate::error::SaveError;

/// Current schema version. Bump together with a new migration step.
pub const CURRENT_SAVE_VERSION: u32 = 3;

/// Applies the ordered migration chain to a raw save blob.
///
/// Blobs without a `version` field are treated as version 1 (the v1 schema
/// predates the field). Versions newer than [`CURRENT_SAVE_VERSION`]
/// are unmigratable and rejected; the caller keeps its prior state.
pub fn migrate_value(value: Value) -> Result<Value, SaveError> {
    let Value::Object(mut map) = value else {
        return Err(SaveError::CorruptSave(
            "save blob is not a JSON object".to_string(),
        ));
    };

    let mut version = match map.get("version") {
        None => 1,
        Some(v) => match v.as_u64() {
            Some(n) if n >= 1 && n <= u64::from(CURRENT_SAVE_VERSION) => n as u32,
            Some(n) => {
                return Err(SaveError::CorruptSave(format!(
                    "save version {n} is newer than supported version {CURRENT_SAVE_VERSION}"
                )));
            }
            None => {
                return Err(SaveError::CorruptSave(
                    "save version is not an integer".to_string(),
                ));
            }
        },
    };

    while version < CURRENT_SAVE_VERSION {
        let next = version + 1;
        info!(from = version, to = next, "migrating save schema");
        match next {
            2 => step_settings(&mut map),
            3 => step_daily_content(&mut map),
            // Unreachable while the version gate above holds; degrade
            // instead of aborting if a bump ever outruns the chain.
            _ => {
                return Err(SaveError::CorruptSave(format!(
                    "no migration step registered for version {next}"
                )));
            }
        }
        version = next;
    }

    map.insert("version".to_string(), json!(CURRENT_SAVE_VERSION));
    Ok(Value::Object(map))
}

/// 1 -> 2: introduce the user settings block.
fn step_settings(map: &mut Map<String, Value>) {
    if !map.contains_key("settings") {
        map.insert(
            "settings".to_string(),
            json!({ "ads_enabled": true, "muted": false }),
        );
    }
}

/// 2 -> 3: introduce daily content rotation and the ad gate counter.
fn step_daily_content(map: &mut Map<String, Value>) {
    if !map.contains_key("daily_quests") {
        map.insert(
            "daily_quests".to_string(),
            json!({ "date": 0, "quests": [] }),
        );
    }
    map.entry("daily_challenge").or_insert(Value::Null);
    map.entry("ad_gate_counter").or_insert(json!(0));
}
