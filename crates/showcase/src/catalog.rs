use crate::config::CarouselName;
use carousel::{DisplayItem, ItemKey};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::collections::HashMap;
use strum::{Display as StrumDisplay, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Review,
    Product,
    #[default]
    Service,
    Category,
}

/// Anything the storefront puts in a carousel: a review, a product, a service
/// or a category tile.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoreItem {
    pub id: ItemKey,
    #[serde(default)]
    pub kind: ItemKind,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
}

impl StoreItem {
    pub fn new(id: &str, kind: ItemKind, title: &str) -> Self {
        Self {
            id: ItemKey::from(id),
            kind,
            title: title.to_string(),
            subtitle: None,
            rating: None,
        }
    }
}

impl DisplayItem for StoreItem {
    fn key(&self) -> ItemKey {
        self.id.clone()
    }
}

const DEFAULT_ITEMS: &str = include_str!("default_items.toml");

/// Bundled fallback lists, shown when a carousel's source is missing or fails.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    lists: HashMap<CarouselName, Vec<StoreItem>>,
}

impl Catalog {
    pub fn new(lists: HashMap<CarouselName, Vec<StoreItem>>) -> Self {
        Self { lists }
    }

    pub fn bundled() -> Self {
        match Self::parse(DEFAULT_ITEMS) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("Bundled items are malformed: {}", e);
                Self::default()
            }
        }
    }

    pub fn parse(toml: &str) -> Result<Self, config::ConfigError> {
        let lists: HashMap<String, Vec<StoreItem>> = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self::new(
            lists
                .into_iter()
                .map(|(name, items)| (CarouselName::new(name), items))
                .collect(),
        ))
    }

    /// The carousel's own defaults, or every bundled item for carousels the
    /// catalog does not know.
    pub fn fallback_for(&self, name: &CarouselName) -> Vec<StoreItem> {
        if let Some(items) = self.lists.get(name) {
            return items.clone();
        }

        let mut all: Vec<StoreItem> = self.lists.values().flatten().cloned().collect();
        all.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        all
    }
}
