use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Stable identity of a display item across rotations.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemKey(String);

crate::impl_string_newtype!(ItemKey);

/// Anything a carousel can show. The engine only ever looks at the key.
pub trait DisplayItem: Clone {
    fn key(&self) -> ItemKey;
}

impl DisplayItem for ItemKey {
    fn key(&self) -> ItemKey {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_newtype_conversions() {
        let key = ItemKey::from("review-1");
        assert_eq!(key.as_str(), "review-1");
        assert_eq!(key.key(), ItemKey::new("review-1".to_string()));
        assert_eq!(key.to_string(), "review-1");
    }
}
