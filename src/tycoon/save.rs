//! Scam Tycoon セーブ/ロード機能。
//!
//! ## バージョニング方針
//!
//! - `SAVE_VERSION`: 現在のセーブ形式バージョン。フィールド追加時にインクリメントする。
//! - `MIN_COMPATIBLE_VERSION`: 互換性を維持できる最小バージョン。
//!   新フィールドの追加のみの場合はこの値を変えない。
//!   既存フィールドの意味変更や削除など破壊的変更を行った場合のみインクリメントし、
//!   合わせて `STORAGE_KEY` のサフィックスも上げる。
//!
//! ロード時は保存データをフィールド単位でデフォルト状態の上にマージする。
//! 壊れたフィールドだけがデフォルト値に戻り、全体のパースに失敗した場合は
//! 新規ゲームになる。

use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use super::state::GameState;

/// セーブデータのフォーマットバージョン。
pub const SAVE_VERSION: u32 = 13;

/// 互換性を維持できる最小バージョン。
pub const MIN_COMPATIBLE_VERSION: u32 = 1;

/// 保存先のキー。
pub const STORAGE_KEY: &str = "scam_tycoon_save_v13";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to serialize save: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage unavailable: {0}")]
    Storage(String),
}

#[derive(Serialize)]
struct SaveData<'a> {
    version: u32,
    game: &'a GameState,
}

/// GameState をバージョン付きの JSON に変換する。
pub fn encode(state: &GameState) -> Result<String, SaveError> {
    Ok(serde_json::to_string(&SaveData {
        version: SAVE_VERSION,
        game: state,
    })?)
}

/// JSON からゲーム状態を復元する。
///
/// `{version, game}` 形式と、バージョンなしで状態を直接保存した旧形式の両方を受け付ける。
/// パース不能、または `MIN_COMPATIBLE_VERSION` 未満なら `None`。
pub fn decode(json: &str) -> Option<GameState> {
    let root: Value = match serde_json::from_str(json) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "save data is not valid JSON, discarding");
            return None;
        }
    };
    let Value::Object(mut root) = root else {
        warn!("save data is not an object, discarding");
        return None;
    };

    let game = match (root.remove("version"), root.remove("game")) {
        (Some(version), Some(Value::Object(game))) => {
            let version = version.as_u64().unwrap_or(0);
            if version < MIN_COMPATIBLE_VERSION as u64 {
                warn!(version, min = MIN_COMPATIBLE_VERSION, "save too old, starting fresh");
                return None;
            }
            game
        }
        // 旧形式: 状態そのものがルート
        (version, game) => {
            if let Some(v) = version {
                root.insert("version".into(), v);
            }
            if let Some(g) = game {
                root.insert("game".into(), g);
            }
            root
        }
    };
    Some(merge_over_default(game))
}

/// 読み込んだフィールドを一つずつデフォルト状態に重ねる。
/// 型の合わないフィールドはデフォルト値のまま残す。
pub fn merge_over_default(loaded: Map<String, Value>) -> GameState {
    let Ok(Value::Object(mut merged)) = serde_json::to_value(GameState::default()) else {
        return GameState::default();
    };
    for (key, value) in loaded {
        if !merged.contains_key(&key) {
            continue;
        }
        let previous = merged.insert(key.clone(), value);
        if serde_json::from_value::<GameState>(Value::Object(merged.clone())).is_err() {
            warn!(field = %key, "dropping unreadable save field");
            if let Some(previous) = previous {
                merged.insert(key, previous);
            }
        }
    }
    serde_json::from_value(Value::Object(merged)).unwrap_or_default()
}

/// Where save blobs live. Implementors only move strings; versioning and
/// merging happen in [`SaveStore::load`] and [`SaveStore::save`].
pub trait SaveStore {
    fn read(&self) -> Result<Option<String>, SaveError>;
    fn write(&mut self, blob: &str) -> Result<(), SaveError>;
    fn clear(&mut self) -> Result<(), SaveError>;

    /// The stored game, or `None` when nothing usable is stored.
    fn load(&self) -> Option<GameState> {
        match self.read() {
            Ok(Some(json)) => decode(&json),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "failed to read save");
                None
            }
        }
    }

    fn save(&mut self, state: &GameState) -> Result<(), SaveError> {
        let json = encode(state)?;
        self.write(&json)
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub blob: Option<String>,
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            writes: 0,
        }
    }
}

impl SaveStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, SaveError> {
        Ok(self.blob.clone())
    }

    fn write(&mut self, blob: &str) -> Result<(), SaveError> {
        self.blob = Some(blob.to_string());
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        self.blob = None;
        Ok(())
    }
}

/// JSON file on disk. Writes go to a sibling temp file that is then renamed
/// over the target, so a crash never leaves a half-written save.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("save.json");
        self.path.with_file_name(format!("{name}.tmp"))
    }
}

impl SaveStore for FileStore {
    fn read(&self) -> Result<Option<String>, SaveError> {
        match std::fs::read_to_string(&self.path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, blob: &str) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.temp_path();
        std::fs::write(&tmp, blob)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// ブラウザの localStorage。WASM 環境でのみ動作。
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Debug)]
pub struct LocalStorageStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, SaveError> {
        web_sys::window()
            .ok_or_else(|| SaveError::Storage("no window".into()))?
            .local_storage()
            .map_err(|e| SaveError::Storage(format!("{e:?}")))?
            .ok_or_else(|| SaveError::Storage("localStorage disabled".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl SaveStore for LocalStorageStore {
    fn read(&self) -> Result<Option<String>, SaveError> {
        Self::storage()?
            .get_item(&self.key)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }

    fn write(&mut self, blob: &str) -> Result<(), SaveError> {
        Self::storage()?
            .set_item(&self.key, blob)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        Self::storage()?
            .remove_item(&self.key)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }
}
