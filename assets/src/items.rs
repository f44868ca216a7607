//! Consumable items and the between-battle shop stock

use serde::{Deserialize, Serialize};

pub type ItemId = u32;

pub const SMALL_HEAL: ItemId = 1;
pub const HEAL: ItemId = 2;
pub const BIG_HEAL: ItemId = 3;
pub const HEAL_MIRACLE: ItemId = 4;
pub const SPIRIT: ItemId = 5;
pub const FULL_SPIRIT: ItemId = 6;

/// What using an item does between battles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ItemEffect {
    #[serde(rename_all = "camelCase")]
    HealOne { amount: i32 },
    #[serde(rename_all = "camelCase")]
    HealParty { amount: i32 },
    #[serde(rename_all = "camelCase")]
    RestoreSpirit { amount: i32 },
    RestoreSpiritFull,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub effect: ItemEffect,
    pub price: u32,
}

fn item(id: ItemId, name: &str, effect: ItemEffect, price: u32) -> Item {
    Item {
        id,
        name: name.to_string(),
        effect,
        price,
    }
}

pub fn all_items() -> Vec<Item> {
    vec![
        item(SMALL_HEAL, "Small Heal", ItemEffect::HealOne { amount: 10 }, 20),
        item(HEAL, "Heal", ItemEffect::HealOne { amount: 40 }, 50),
        item(BIG_HEAL, "Big Heal", ItemEffect::HealOne { amount: 80 }, 100),
        item(
            HEAL_MIRACLE,
            "Heal Miracle",
            ItemEffect::HealParty { amount: 150 },
            120,
        ),
        item(SPIRIT, "Spirit", ItemEffect::RestoreSpirit { amount: 50 }, 80),
        item(FULL_SPIRIT, "Full Spirit", ItemEffect::RestoreSpiritFull, 140),
    ]
}

pub fn item_by_id(id: ItemId) -> Option<Item> {
    all_items().into_iter().find(|i| i.id == id)
}

/// What the breaking-room shop keeps on its shelf, as (item, count) pairs
pub fn shop_stock() -> Vec<(ItemId, u32)> {
    vec![(SMALL_HEAL, 10), (SPIRIT, 10)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_ids_are_unique() {
        let items = all_items();
        for (i, a) in items.iter().enumerate() {
            for b in items.iter().skip(i + 1) {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_shop_stock_resolves_to_items() {
        for (id, count) in shop_stock() {
            assert!(item_by_id(id).is_some(), "unknown item {}", id);
            assert!(count > 0);
        }
    }
}
