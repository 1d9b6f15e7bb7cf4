//! Turns raw catalog goods into UI-ready, grouped and sorted entries.

use super::model::{CatalogItem, SourceType};
use crate::reference::OpaqueReference;
use crate::text::locale_compare;
use rand::Rng;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Background and border colors shared by every good of one pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackColors {
    pub background: String,
    pub border: String,
}

impl PackColors {
    /// Builds the translucent background / opaque border pair for a hue.
    pub fn from_hue(hue: f64) -> Self {
        Self {
            background: format!("hsl({hue}deg 46% 42% / 14%)"),
            border: format!("hsl({hue}deg 46% 42% / 100%)"),
        }
    }
}

/// How pack hues are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackColorPolicy {
    /// A fresh random hue per pack on every normalization pass.
    #[default]
    Random,
    /// A hue derived from the pack name, identical across passes.
    Stable,
}

/// A catalog good in the shape the browser renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedItem {
    pub id: String,
    pub name: String,
    pub portrait: Option<String>,
    pub token: Option<String>,
    pub thumb: Option<String>,
    pub perspective: Option<String>,
    pub mesh: Option<String>,
    pub is_pack: bool,
    pub is_user: bool,
    pub pack: Option<String>,
    pub pack_colors: Option<PackColors>,
}

impl NormalizedItem {
    fn from_item(item: &CatalogItem) -> Self {
        let is_pack = item.source_type == SourceType::Pack;
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            portrait: item.portrait_url.clone(),
            token: item.token_image_url.clone(),
            thumb: item.thumbnail_url.clone(),
            perspective: item.perspective_url.clone(),
            mesh: item.mesh_reference.clone(),
            is_pack,
            is_user: item.source_type == SourceType::User,
            pack: item
                .source_name
                .clone()
                .filter(|name| is_pack && !name.is_empty()),
            pack_colors: None,
        }
    }

    /// The reference string the browser hands back on selection.
    pub fn reference(&self) -> OpaqueReference {
        OpaqueReference::new(&self.name, &self.id)
    }
}

/// Stateless normalizer; the color policy is its only knob.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    policy: PackColorPolicy,
}

impl Normalizer {
    pub fn new(policy: PackColorPolicy) -> Self {
        Self { policy }
    }

    /// Normalizes with the thread-local RNG.
    pub fn normalize(&self, goods: &[CatalogItem]) -> Vec<NormalizedItem> {
        self.normalize_with_rng(goods, &mut rand::thread_rng())
    }

    /// Normalizes goods, assigning pack colors and applying the browser order.
    pub fn normalize_with_rng<R: Rng>(
        &self,
        goods: &[CatalogItem],
        rng: &mut R,
    ) -> Vec<NormalizedItem> {
        let mut packs: HashMap<String, PackColors> = HashMap::new();
        let mut items = Vec::with_capacity(goods.len());

        for good in goods {
            let mut item = NormalizedItem::from_item(good);
            if let Some(pack) = &item.pack {
                let colors = packs
                    .entry(pack.clone())
                    .or_insert_with(|| PackColors::from_hue(self.hue_for(pack, rng)));
                item.pack_colors = Some(colors.clone());
            }
            items.push(item);
        }

        sort_for_browser(&mut items);
        items
    }

    fn hue_for<R: Rng>(&self, pack: &str, rng: &mut R) -> f64 {
        match self.policy {
            PackColorPolicy::Random => rng.gen_range(0.0..360.0),
            PackColorPolicy::Stable => stable_hue(pack),
        }
    }
}

/// Applies the three successive stable sorts: by name, then packed goods
/// grouped by pack name ahead of unpacked ones, then non-pack goods first.
pub fn sort_for_browser(items: &mut [NormalizedItem]) {
    items.sort_by(|a, b| locale_compare(&a.name, &b.name));
    items.sort_by(|a, b| match (&a.pack, &b.pack) {
        (Some(pa), Some(pb)) => locale_compare(pa, pb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    // Last pass wins: every non-pack good ends up ahead of every pack good.
    items.sort_by_key(|item| item.is_pack);
}

// FNV-1a over the pack name, folded into [0, 360).
fn stable_hue(pack: &str) -> f64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in pack.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    (hash % 3600) as f64 / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn names(items: &[NormalizedItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_flags_and_pack_field() {
        let goods = vec![
            CatalogItem::new("1", "Mine", SourceType::User),
            CatalogItem::new("2", "Boxed", SourceType::User).in_pack("Core"),
            CatalogItem::new("3", "Odd", SourceType::Other),
        ];
        let items = Normalizer::default().normalize(&goods);

        let mine = items.iter().find(|i| i.id == "1").unwrap();
        assert!(mine.is_user && !mine.is_pack);
        assert_eq!(mine.pack, None);
        assert!(mine.pack_colors.is_none());

        let boxed = items.iter().find(|i| i.id == "2").unwrap();
        assert!(boxed.is_pack && !boxed.is_user);
        assert_eq!(boxed.pack.as_deref(), Some("Core"));
        assert!(boxed.pack_colors.is_some());

        let odd = items.iter().find(|i| i.id == "3").unwrap();
        assert!(!odd.is_pack && !odd.is_user);
    }

    #[test]
    fn test_empty_pack_name_is_no_pack() {
        let goods = vec![
            CatalogItem::new("1", "Anon", SourceType::Pack).in_pack(""),
            CatalogItem::new("2", "Named", SourceType::Pack).in_pack("Core"),
        ];
        let items = Normalizer::default().normalize(&goods);

        assert_eq!(names(&items), vec!["Named", "Anon"]);
        let anon = &items[1];
        assert!(anon.is_pack);
        assert_eq!(anon.pack, None);
        assert!(anon.pack_colors.is_none());
    }

    #[test]
    fn test_three_pass_order() {
        let goods = vec![
            CatalogItem::new("1", "B", SourceType::User),
            CatalogItem::new("2", "A", SourceType::Pack).in_pack("Pack1"),
            CatalogItem::new("3", "C", SourceType::Pack).in_pack("Pack1"),
            CatalogItem::new("4", "D", SourceType::User),
        ];
        let items = Normalizer::default().normalize(&goods);
        assert_eq!(names(&items), vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn test_pack_items_grouped_by_pack_then_name() {
        let goods = vec![
            CatalogItem::new("1", "Zombie", SourceType::Pack).in_pack("Undead"),
            CatalogItem::new("2", "Archer", SourceType::Pack).in_pack("Elves"),
            CatalogItem::new("3", "Mage", SourceType::User),
            CatalogItem::new("4", "Ghoul", SourceType::Pack).in_pack("Undead"),
            CatalogItem::new("5", "Bard", SourceType::Pack).in_pack("Elves"),
        ];
        let items = Normalizer::default().normalize(&goods);
        assert_eq!(
            names(&items),
            vec!["Mage", "Archer", "Bard", "Ghoul", "Zombie"]
        );
    }

    #[test]
    fn test_accented_names_and_packs_sort_by_base_letter() {
        let goods = vec![
            CatalogItem::new("1", "Zed", SourceType::User),
            CatalogItem::new("2", "Éowyn", SourceType::User),
            CatalogItem::new("3", "Wight", SourceType::Pack).in_pack("Zombies"),
            CatalogItem::new("4", "Sylph", SourceType::Pack).in_pack("Élémentaires"),
        ];
        let items = Normalizer::default().normalize(&goods);
        assert_eq!(names(&items), vec!["Éowyn", "Zed", "Sylph", "Wight"]);
    }

    #[test]
    fn test_pack_colors_shared_within_pack() {
        let goods = vec![
            CatalogItem::new("1", "A", SourceType::Pack).in_pack("P1"),
            CatalogItem::new("2", "B", SourceType::Pack).in_pack("P2"),
            CatalogItem::new("3", "C", SourceType::Pack).in_pack("P1"),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        let items = Normalizer::default().normalize_with_rng(&goods, &mut rng);

        let color = |id: &str| {
            items
                .iter()
                .find(|i| i.id == id)
                .and_then(|i| i.pack_colors.clone())
                .unwrap()
        };
        assert_eq!(color("1"), color("3"));
        assert_ne!(color("1"), color("2"));
        assert!(color("1").background.ends_with("/ 14%)"));
        assert!(color("1").border.ends_with("/ 100%)"));
    }

    #[test]
    fn test_stable_policy_repeats_across_passes() {
        let goods = vec![CatalogItem::new("1", "A", SourceType::Pack).in_pack("P1")];
        let normalizer = Normalizer::new(PackColorPolicy::Stable);
        let first = normalizer.normalize(&goods);
        let second = normalizer.normalize(&goods);
        assert_eq!(first[0].pack_colors, second[0].pack_colors);
    }

    #[test]
    fn test_hue_format() {
        let colors = PackColors::from_hue(120.5);
        assert_eq!(colors.background, "hsl(120.5deg 46% 42% / 14%)");
        assert_eq!(colors.border, "hsl(120.5deg 46% 42% / 100%)");
    }
}
