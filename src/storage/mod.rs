// Brief storage
//
// One pretty-printed JSON file per saved brief, named by a v4 uuid. Each
// record carries a SHA-256 of the brief's compact JSON, checked on load.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::brief::Brief;

/// Free-form labels stored next to a brief (source file, session id, ...)
pub type BriefMetadata = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredBrief {
    pub id: String,
    pub saved_at: DateTime<Utc>,
    pub content_hash: String,
    #[serde(default)]
    pub metadata: BriefMetadata,
    pub brief: Brief,
}

pub trait BriefStore: Send + Sync {
    /// Persist `brief` and return its new id
    fn save(&self, brief: &Brief, metadata: BriefMetadata) -> Result<String>;

    fn load(&self, id: &str) -> Result<StoredBrief>;
}

pub fn content_hash(brief: &Brief) -> Result<String> {
    let json = serde_json::to_string(brief).context("Failed to serialize brief")?;
    Ok(format!("{:x}", Sha256::digest(json.as_bytes())))
}

pub struct FileBriefStore {
    dir: PathBuf,
}

impl FileBriefStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

impl BriefStore for FileBriefStore {
    fn save(&self, brief: &Brief, metadata: BriefMetadata) -> Result<String> {
        let id = Uuid::new_v4();
        let record = StoredBrief {
            id: id.to_string(),
            saved_at: Utc::now(),
            content_hash: content_hash(brief)?,
            metadata,
            brief: brief.clone(),
        };

        let path = self.path_for(&id);
        let json = serde_json::to_string_pretty(&record).context("Failed to serialize stored brief")?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!("Saved brief {} to {}", record.id, path.display());
        Ok(record.id)
    }

    fn load(&self, id: &str) -> Result<StoredBrief> {
        // Parsing as a uuid also keeps ids from escaping the storage dir
        let uuid = Uuid::parse_str(id).with_context(|| format!("Invalid brief id: {id}"))?;
        let path = self.path_for(&uuid);

        let contents =
            fs::read_to_string(&path).with_context(|| format!("No saved brief with id {id}"))?;
        let record: StoredBrief = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let actual = content_hash(&record.brief)?;
        if actual != record.content_hash {
            bail!(
                "Saved brief {} is corrupted (content hash mismatch: expected {}, found {})",
                id,
                record.content_hash,
                actual
            );
        }

        Ok(record)
    }
}
