//! Reversible text encoding of the save aggregate.
//!
//! The persisted/exported blob is base64 over the JSON form of `SaveData`.
//! This is a portability encoding, not protection: it carries no
//! confidentiality or tamper guarantee, and none is implied. Decoding
//! validates shape and bounds and is all-or-nothing: a malformed blob is
//! rejected without partially applying anything.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::data::SaveData;
use crate::error::{SaveError, SaveResult};
use crate::version::migrate_value;

/// Upper bound on entries per persisted set/map. Rejects absurd blobs before
/// they balloon memory.
pub const MAX_COLLECTION_ENTRIES: usize = 4096;

/// Upper bound on the daily quest list.
pub const MAX_QUESTS: usize = 64;

/// Upper bound on any persisted string field, in bytes.
pub const MAX_STRING_BYTES: usize = 1024;

/// Encodes the aggregate into the opaque blob format.
pub fn encode(data: &SaveData) -> SaveResult<String> {
    let json = serde_json::to_string(data).map_err(|e| SaveError::Serialization(e.to_string()))?;
    Ok(BASE64.encode(json.as_bytes()))
}

/// Decodes and validates a blob, migrating old schema versions forward.
///
/// Also accepts raw (unencoded) JSON, matching the legacy persisted format.
pub fn decode(blob: &str) -> SaveResult<SaveData> {
    let json = match BASE64.decode(blob.trim()) {
        Ok(bytes) => String::from_utf8(bytes)
            .map_err(|_| SaveError::CorruptSave("blob is not UTF-8 text".to_string()))?,
        // Legacy saves were stored as raw JSON.
        Err(_) => blob.to_string(),
    };

    let value: serde_json::Value = serde_json::from_str(&json)
        .map_err(|e| SaveError::CorruptSave(format!("invalid JSON: {e}")))?;

    let migrated = migrate_value(value)?;

    let data: SaveData = serde_json::from_value(migrated)
        .map_err(|e| SaveError::CorruptSave(format!("shape mismatch: {e}")))?;

    validate(&data)?;
    Ok(data)
}

/// Structural validation applied to every decoded blob.
///
/// Imported string fields (quest descriptions and the like) are *not*
/// sanitized here: they are stored verbatim and treated strictly as data by
/// every render path, never interpreted as markup.
pub fn validate(data: &SaveData) -> SaveResult<()> {
    if data.unlocked_items.len() > MAX_COLLECTION_ENTRIES {
        return Err(SaveError::CorruptSave("too many unlocked items".to_string()));
    }
    if data.achievements.len() > MAX_COLLECTION_ENTRIES {
        return Err(SaveError::CorruptSave("too many achievements".to_string()));
    }
    if data.high_scores.len() > MAX_COLLECTION_ENTRIES {
        return Err(SaveError::CorruptSave("too many high scores".to_string()));
    }
    if data.game_configs.len() > MAX_COLLECTION_ENTRIES {
        return Err(SaveError::CorruptSave("too many game configs".to_string()));
    }
    if data.daily_quests.quests.len() > MAX_QUESTS {
        return Err(SaveError::CorruptSave("too many daily quests".to_string()));
    }

    let oversized = |s: &str| s.len() > MAX_STRING_BYTES;
    if data.unlocked_items.iter().any(|i| oversized(i.as_str())) {
        return Err(SaveError::CorruptSave("item id too long".to_string()));
    }
    if data.achievements.iter().any(|a| oversized(a.as_str())) {
        return Err(SaveError::CorruptSave("achievement id too long".to_string()));
    }
    if data.high_scores.keys().any(|g| oversized(g.as_str())) {
        return Err(SaveError::CorruptSave("game id too long".to_string()));
    }
    if data.game_configs.keys().any(|g| oversized(g.as_str())) {
        return Err(SaveError::CorruptSave("game id too long".to_string()));
    }

    // Equipped values are covered by the membership rule below: anything
    // equipped must also appear in the bounded unlocked set.
    for (slot, item) in &data.equipped_items {
        if !data.unlocked_items.contains(item) {
            return Err(SaveError::CorruptSave(format!(
                "equipped item {item} in slot {} is not unlocked",
                slot.display_name()
            )));
        }
    }

    for quest in &data.daily_quests.quests {
        if oversized(quest.id.as_str()) {
            return Err(SaveError::CorruptSave("quest id too long".to_string()));
        }
        if oversized(&quest.description) {
            return Err(SaveError::CorruptSave("quest description too long".to_string()));
        }
        if quest.progress > quest.target_amount {
            return Err(SaveError::CorruptSave(format!(
                "quest {} progress exceeds target",
                quest.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcadia_common::{GameId, ItemId, SlotCategory};

    #[test]
    fn test_round_trip() {
        let mut data = SaveData::default();
        data.total_currency = 700;
        data.unlocked_items.insert(ItemId::new("theme-neon"));
        data.unlocked_items.insert(ItemId::new("avatar-astronaut"));
        data.equipped_items
            .insert(SlotCategory::Theme, ItemId::new("theme-neon"));

        let blob = encode(&data).expect("encode should succeed");
        let decoded = decode(&blob).expect("decode should succeed");

        assert_eq!(decoded.total_currency, 700);
        assert_eq!(decoded.unlocked_items, data.unlocked_items);
        assert_eq!(decoded.equipped_items, data.equipped_items);
    }

    #[test]
    fn test_blob_is_not_plaintext_json() {
        let blob = encode(&SaveData::default()).expect("encode should succeed");
        assert!(!blob.contains('{'));
    }

    #[test]
    fn test_legacy_raw_json_accepted() {
        let decoded = decode(r#"{"version": 1, "total_currency": 5}"#)
            .expect("raw JSON should decode");
        assert_eq!(decoded.total_currency, 5);
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(decode("!!!not a save!!!").is_err());
        assert!(decode(&BASE64.encode(b"still not json")).is_err());
    }

    #[test]
    fn test_equipped_without_unlock_rejected() {
        let mut data = SaveData::default();
        data.equipped_items
            .insert(SlotCategory::Theme, ItemId::new("theme-stolen"));
        let blob = encode(&data).expect("encode should succeed");
        assert!(matches!(decode(&blob), Err(SaveError::CorruptSave(_))));
    }

    #[test]
    fn test_oversized_collection_rejected() {
        let mut data = SaveData::default();
        for i in 0..=MAX_COLLECTION_ENTRIES {
            data.unlocked_items.insert(ItemId::new(format!("item-{i}")));
        }
        let blob = encode(&data).expect("encode should succeed");
        assert!(matches!(decode(&blob), Err(SaveError::CorruptSave(_))));
    }

    #[test]
    fn test_oversized_id_string_rejected() {
        let mut data = SaveData::default();
        data.unlocked_items
            .insert(ItemId::new("x".repeat(MAX_STRING_BYTES * 100)));
        let blob = encode(&data).expect("encode should succeed");
        assert!(matches!(decode(&blob), Err(SaveError::CorruptSave(_))));

        let mut data = SaveData::default();
        data.high_scores
            .insert(GameId::new("g".repeat(MAX_STRING_BYTES + 1)), 10);
        let blob = encode(&data).expect("encode should succeed");
        assert!(matches!(decode(&blob), Err(SaveError::CorruptSave(_))));
    }

    #[test]
    fn test_oversized_quest_description_rejected() {
        use crate::quest::{MatchKind, Quest};
        use arcadia_common::QuestId;

        let mut data = SaveData::default();
        data.daily_quests.quests.push(Quest {
            id: QuestId::new("padded-1"),
            description: "d".repeat(MAX_STRING_BYTES + 1),
            target_amount: 3,
            progress: 0,
            reward_currency: 10,
            claimed: false,
            match_kind: MatchKind::GamesPlayed,
        });
        let blob = encode(&data).expect("encode should succeed");
        assert!(matches!(decode(&blob), Err(SaveError::CorruptSave(_))));

        // Exactly at the bound is still accepted.
        data.daily_quests.quests[0].description = "d".repeat(MAX_STRING_BYTES);
        let blob = encode(&data).expect("encode should succeed");
        assert!(decode(&blob).is_ok());
    }

    #[test]
    fn test_markup_in_description_survives_as_data() {
        use crate::quest::{MatchKind, Quest};
        use arcadia_common::QuestId;

        let payload = "<img onerror=alert(1) src=x>";
        let mut data = SaveData::default();
        data.daily_quests.quests.push(Quest {
            id: QuestId::new("injected-1"),
            description: payload.to_string(),
            target_amount: 3,
            progress: 0,
            reward_currency: 10,
            claimed: false,
            match_kind: MatchKind::GamesPlayed,
        });

        let blob = encode(&data).expect("encode should succeed");
        let decoded = decode(&blob).expect("decode should succeed");
        // Stored, exported, and re-imported unchanged: it is a string, not markup.
        assert_eq!(decoded.daily_quests.quests[0].description, payload);
    }
}
