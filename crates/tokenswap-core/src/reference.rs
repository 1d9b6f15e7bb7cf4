//! Opaque catalog references and their resolution to asset paths.
//!
//! A reference has the form `[HeroForge]{<name>}{<id>}` and is stored in
//! places where the host expects a plain model path. Resolution looks the
//! reference up in a [`CatalogSnapshot`]; anything that cannot be resolved is
//! treated as a literal path and returned unchanged.

use crate::catalog::{CatalogCache, CatalogSnapshot};
use std::fmt;
use std::str::FromStr;

/// Literal tag that prefixes every reference string.
pub const REFERENCE_TAG: &str = "[HeroForge]";

const FIELD_SEPARATOR: &str = "}{";

/// A parsed `[HeroForge]{name}{id}` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpaqueReference {
    pub name: String,
    pub id: String,
}

impl OpaqueReference {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }

    /// Whether `value` looks like a reference rather than a plain path.
    pub fn is_reference(value: &str) -> bool {
        value.contains(REFERENCE_TAG)
    }

    /// Parses a reference. Returns `None` if the two braced fields are missing.
    pub fn parse(value: &str) -> Option<Self> {
        let body = value.replacen(REFERENCE_TAG, "", 1);
        let mut fields = body.split(FIELD_SEPARATOR);
        let name = fields.next()?.replacen('{', "", 1);
        let id = fields.next()?.replacen('}', "", 1);
        Some(Self { name, id })
    }
}

impl fmt::Display for OpaqueReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{REFERENCE_TAG}{{{}}}{{{}}}", self.name, self.id)
    }
}

impl FromStr for OpaqueReference {
    type Err = crate::SwapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::SwapError::not_found("reference", s))
    }
}

/// Resolves `reference` against `snapshot`.
///
/// An id match wins over a name match. The matched good's downloadable mesh
/// is preferred over its generic mesh. When nothing matches, or the match has
/// no mesh at all, the input is returned unchanged.
pub fn resolve(snapshot: Option<&CatalogSnapshot>, reference: &str) -> String {
    let Some(snapshot) = snapshot else {
        return reference.to_string();
    };
    let Some(parsed) = OpaqueReference::parse(reference) else {
        return reference.to_string();
    };

    snapshot
        .find_by_id(&parsed.id)
        .or_else(|| snapshot.find_by_name(&parsed.name))
        .and_then(|good| good.asset_path())
        .map(str::to_string)
        .unwrap_or_else(|| {
            tracing::debug!(reference, "Reference did not resolve; using it as a path");
            reference.to_string()
        })
}

/// Resolves `reference` against whatever the cache currently holds.
pub fn resolve_cached(cache: &CatalogCache, reference: &str) -> String {
    let snapshot = cache.current();
    resolve(snapshot.as_deref(), reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogItem, Normalizer, SourceType};

    fn snapshot() -> CatalogSnapshot {
        CatalogSnapshot::new(vec![
            CatalogItem::new("k1", "Knight", SourceType::User)
                .with_mesh("knight.stl")
                .with_gltf("knight.glb"),
            CatalogItem::new("r1", "Rogue", SourceType::Pack)
                .in_pack("Core")
                .with_mesh("rogue.stl"),
            CatalogItem::new("b1", "Bare", SourceType::User),
        ])
    }

    #[test]
    fn test_display_and_parse() {
        let reference = OpaqueReference::new("Knight", "k1");
        assert_eq!(reference.to_string(), "[HeroForge]{Knight}{k1}");
        assert_eq!(OpaqueReference::parse("[HeroForge]{Knight}{k1}"), Some(reference));
        assert!(OpaqueReference::is_reference("[HeroForge]{Knight}{k1}"));
        assert!(!OpaqueReference::is_reference("models/knight.glb"));
    }

    #[test]
    fn test_parse_rejects_plain_path() {
        assert_eq!(OpaqueReference::parse("models/knight.glb"), None);
        assert!("models/knight.glb".parse::<OpaqueReference>().is_err());
    }

    #[test]
    fn test_resolve_prefers_gltf() {
        let snap = snapshot();
        assert_eq!(resolve(Some(&snap), "[HeroForge]{Knight}{k1}"), "knight.glb");
        assert_eq!(resolve(Some(&snap), "[HeroForge]{Rogue}{r1}"), "rogue.stl");
    }

    #[test]
    fn test_id_takes_precedence_over_name() {
        let snap = snapshot();
        assert_eq!(resolve(Some(&snap), "[HeroForge]{Knight}{r1}"), "rogue.stl");
    }

    #[test]
    fn test_falls_back_to_name() {
        let snap = snapshot();
        assert_eq!(resolve(Some(&snap), "[HeroForge]{Rogue}{gone}"), "rogue.stl");
    }

    #[test]
    fn test_unresolvable_returns_input() {
        let snap = snapshot();
        let input = "[HeroForge]{Nobody}{nope}";
        assert_eq!(resolve(Some(&snap), input), input);
        assert_eq!(resolve(Some(&snap), "[HeroForge]{Bare}{b1}"), "[HeroForge]{Bare}{b1}");
        assert_eq!(resolve(None, "[HeroForge]{Knight}{k1}"), "[HeroForge]{Knight}{k1}");
        assert_eq!(resolve(Some(&snap), "plain/path.glb"), "plain/path.glb");
    }

    #[test]
    fn test_round_trip_through_normalizer() {
        let snap = snapshot();
        for item in Normalizer::default().normalize(&snap.goods) {
            let reference = item.reference().to_string();
            let expected = snap
                .find_by_id(&item.id)
                .and_then(|g| g.asset_path())
                .map(str::to_string)
                .unwrap_or_else(|| reference.clone());
            assert_eq!(resolve(Some(&snap), &reference), expected);
        }
    }

    #[test]
    fn test_resolve_cached() {
        let cache = CatalogCache::new();
        assert_eq!(resolve_cached(&cache, "[HeroForge]{Knight}{k1}"), "[HeroForge]{Knight}{k1}");
        cache.commit(snapshot());
        assert_eq!(resolve_cached(&cache, "[HeroForge]{Knight}{k1}"), "knight.glb");
    }
}
