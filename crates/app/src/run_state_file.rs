use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Snapshot of the current run, rewritten after every turn so an external
/// viewer (or a crash post-mortem) can see where the run stands.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RunStateFile {
    pub format_version: u32,
    pub run_seed: u64,
    pub snapshot_hash_hex: String,
    pub tick: u64,
    pub room_index: u32,
    pub room_kind: String,
    pub challenge_rating: u32,
    pub player_health: i32,
    pub updated_at_unix_ms: u64,
}

impl RunStateFile {
    pub const FORMAT_VERSION: u32 = 1;

    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "Warrens").map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("last_run_state.json");
            path
        })
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let state: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(state)
    }
}
