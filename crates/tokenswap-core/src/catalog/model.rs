//! Catalog data model as returned by the remote figurine service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Where a catalog good came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Part of a named pack.
    Pack,
    /// Uploaded or designed by the account owner.
    User,
    /// Anything the service adds later.
    #[default]
    #[serde(other)]
    Other,
}

/// One catalog entry ("good") as delivered by `GET /v1/user/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Opaque identifier, unique within one account.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_other")]
    pub source_type: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(rename = "img_front", default)]
    pub portrait_url: Option<String>,
    #[serde(rename = "img_top", default)]
    pub token_image_url: Option<String>,
    #[serde(rename = "img_thumb", default)]
    pub thumbnail_url: Option<String>,
    #[serde(rename = "img_perspective", default)]
    pub perspective_url: Option<String>,
    #[serde(rename = "mesh", default)]
    pub mesh_reference: Option<String>,
    #[serde(rename = "gltf", default, skip_serializing_if = "Option::is_none")]
    pub downloadable_mesh_reference: Option<String>,
}

impl CatalogItem {
    /// Creates an item with only the identifying fields populated.
    pub fn new(id: impl Into<String>, name: impl Into<String>, source_type: SourceType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            source_type,
            source_name: None,
            portrait_url: None,
            token_image_url: None,
            thumbnail_url: None,
            perspective_url: None,
            mesh_reference: None,
            downloadable_mesh_reference: None,
        }
    }

    /// Marks the item as belonging to the named pack.
    pub fn in_pack(mut self, pack: impl Into<String>) -> Self {
        self.source_type = SourceType::Pack;
        self.source_name = Some(pack.into());
        self
    }

    pub fn with_mesh(mut self, mesh: impl Into<String>) -> Self {
        self.mesh_reference = Some(mesh.into());
        self
    }

    pub fn with_gltf(mut self, gltf: impl Into<String>) -> Self {
        self.downloadable_mesh_reference = Some(gltf.into());
        self
    }

    pub fn with_portrait(mut self, url: impl Into<String>) -> Self {
        self.portrait_url = Some(url.into());
        self
    }

    /// The best asset path for this good: the downloadable mesh when present,
    /// otherwise the generic mesh. Empty strings count as absent.
    pub fn asset_path(&self) -> Option<&str> {
        self.downloadable_mesh_reference
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.mesh_reference.as_deref().filter(|s| !s.is_empty()))
    }
}

/// Response body of the user-goods endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoodsResponse {
    #[serde(default)]
    pub goods: Vec<CatalogItem>,
}

/// The merged result of one catalog fetch across every configured account.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    /// Goods in token order, then server response order. Not deduplicated.
    pub goods: Vec<CatalogItem>,
    pub fetched_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn new(goods: Vec<CatalogItem>) -> Self {
        Self {
            goods,
            fetched_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.goods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goods.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&CatalogItem> {
        self.goods.iter().find(|good| good.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&CatalogItem> {
        self.goods.iter().find(|good| good.name == name)
    }
}

// The service has shipped both numeric and string ids.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Float(n) => n.to_string(),
    })
}

fn null_as_other<'de, D>(deserializer: D) -> Result<SourceType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<SourceType>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_goods_response() {
        let body = r#"{
            "goods": [
                {
                    "id": "abc",
                    "name": "Knight",
                    "img_front": "https://cdn/front.png",
                    "img_top": "https://cdn/top.png",
                    "img_thumb": "https://cdn/thumb.png",
                    "img_perspective": "https://cdn/persp.png",
                    "mesh": "https://cdn/knight.stl",
                    "gltf": "https://cdn/knight.glb",
                    "source_type": "pack",
                    "source_name": "Heroes Vol. 1"
                },
                {
                    "id": 42,
                    "name": "Rogue",
                    "mesh": "https://cdn/rogue.stl",
                    "source_type": "user"
                },
                {
                    "id": "x",
                    "name": "Gift",
                    "source_type": "gift"
                },
                {
                    "id": "y",
                    "name": "Legacy",
                    "source_type": null,
                    "source_name": null
                }
            ]
        }"#;

        let response: GoodsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.goods.len(), 4);

        let knight = &response.goods[0];
        assert_eq!(knight.source_type, SourceType::Pack);
        assert_eq!(knight.source_name.as_deref(), Some("Heroes Vol. 1"));
        assert_eq!(knight.portrait_url.as_deref(), Some("https://cdn/front.png"));
        assert_eq!(knight.asset_path(), Some("https://cdn/knight.glb"));

        let rogue = &response.goods[1];
        assert_eq!(rogue.id, "42");
        assert_eq!(rogue.source_type, SourceType::User);
        assert_eq!(rogue.asset_path(), Some("https://cdn/rogue.stl"));

        assert_eq!(response.goods[2].source_type, SourceType::Other);
        assert_eq!(response.goods[2].asset_path(), None);

        let legacy = &response.goods[3];
        assert_eq!(legacy.source_type, SourceType::Other);
        assert_eq!(legacy.source_name, None);
    }

    #[test]
    fn test_missing_goods_is_empty() {
        let response: GoodsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.goods.is_empty());
    }

    #[test]
    fn test_empty_gltf_falls_back_to_mesh() {
        let item = CatalogItem::new("1", "A", SourceType::User)
            .with_gltf("")
            .with_mesh("m.stl");
        assert_eq!(item.asset_path(), Some("m.stl"));
    }
}
