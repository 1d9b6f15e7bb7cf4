//! Scene file host.
//!
//! Stands in for the tabletop host when running headless: actors and placed
//! tokens are read from a JSON file, and token model updates are written
//! back to it. Token documents keep every field they were loaded with; the
//! model lives under the nested [`MODEL_FLAG_KEY`] path.
//!
//! ```json
//! {
//!   "actors": [{ "id": "a1", "name": "Aldric", "type": "character" }],
//!   "tokens": [{
//!     "id": "t1", "name": "Aldric", "actor_id": "a1",
//!     "flags": { "levels-3d-preview": { "model3d": "aldric.glb" } }
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokenswap_core::SwapError;
use tokenswap_core::error::Result;
use tokenswap_core::swap::{Actor, ActorDirectory, MODEL_FLAG_KEY, TokenHost, TokenInfo};
use tokio::sync::RwLock;

/// A token document as stored in the scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneToken {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,
    /// Every other document field, flags included.
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl SceneToken {
    /// Current model path, read from [`MODEL_FLAG_KEY`].
    pub fn model(&self) -> Option<&str> {
        lookup(&self.data, MODEL_FLAG_KEY).and_then(Value::as_str)
    }

    pub fn set_model(&mut self, model_path: &str) {
        assign(
            &mut self.data,
            MODEL_FLAG_KEY,
            Value::String(model_path.to_string()),
        );
    }

    fn info(&self) -> TokenInfo {
        TokenInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            actor_id: self.actor_id.clone(),
            model: self.model().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub actors: Vec<Actor>,
    #[serde(default)]
    pub tokens: Vec<SceneToken>,
}

// Follows a dotted document path, e.g. `flags.levels-3d-preview.model3d`.
fn lookup<'a>(data: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = data.get(segments.next()?)?;
    for segment in segments {
        current = current.get(segment)?;
    }
    Some(current)
}

// Writes `value` at a dotted path, creating or replacing intermediate objects.
fn assign(data: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let Some(last) = segments.pop() else {
        return;
    };

    let mut current = data;
    for segment in segments {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        let Value::Object(next) = entry else {
            return;
        };
        current = next;
    }
    current.insert(last.to_string(), value);
}

/// A host backed by a JSON scene file.
pub struct JsonSceneHost {
    path: PathBuf,
    scene: RwLock<SceneFile>,
}

impl JsonSceneHost {
    /// Opens `path`; a missing file is an empty scene.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let scene = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => SceneFile::default(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Scene file missing; starting empty");
                SceneFile::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            scene: RwLock::new(scene),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current in-memory scene.
    pub async fn snapshot(&self) -> SceneFile {
        self.scene.read().await.clone()
    }

    async fn persist(&self, scene: &SceneFile) -> Result<()> {
        let json = serde_json::to_string_pretty(scene)?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| SwapError::io("Scene path has no file name"))?;
        let tmp_path = self
            .path
            .with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl TokenHost for JsonSceneHost {
    async fn scene_tokens(&self) -> Result<Vec<TokenInfo>> {
        Ok(self.scene.read().await.tokens.iter().map(SceneToken::info).collect())
    }

    /// The in-memory scene only changes once the file write succeeded.
    async fn update_token_model(&self, token_id: &str, model_path: &str) -> Result<()> {
        let mut scene = self.scene.write().await;
        let mut updated = scene.clone();
        updated
            .tokens
            .iter_mut()
            .find(|t| t.id == token_id)
            .ok_or_else(|| SwapError::not_found("token", token_id))?
            .set_model(model_path);

        self.persist(&updated).await?;
        *scene = updated;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ActorDirectory for JsonSceneHost {
    async fn actors(&self) -> Result<Vec<Actor>> {
        Ok(self.scene.read().await.actors.clone())
    }
}
