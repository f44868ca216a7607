//! Money, items, and the between-battle shop
//!
//! The wallet and bag live here so they survive each battle. Item effects
//! touch the party roster directly; nothing in this module talks to a
//! running battle.

use std::collections::BTreeMap;

use hantu_assets::items::{self, Item, ItemEffect, ItemId};
use hantu_battle::Unit;

use crate::error::{SessionError, SessionResult};

#[derive(Debug, Clone)]
pub struct Campaign {
    money: u32,
    inventory: BTreeMap<ItemId, u32>,
    shop: BTreeMap<ItemId, u32>,
}

impl Campaign {
    pub fn new() -> Self {
        Campaign {
            money: 0,
            inventory: BTreeMap::new(),
            shop: items::shop_stock().into_iter().collect(),
        }
    }

    pub fn money(&self) -> u32 {
        self.money
    }

    pub fn add_money(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }

    /// Item counts the party carries.
    pub fn inventory(&self) -> &BTreeMap<ItemId, u32> {
        &self.inventory
    }

    /// Remaining shop stock per item.
    pub fn shop(&self) -> &BTreeMap<ItemId, u32> {
        &self.shop
    }

    /// Shelf contents joined with the item table, for display.
    pub fn shop_catalog(&self) -> Vec<(Item, u32)> {
        self.shop
            .iter()
            .filter_map(|(&id, &stock)| items::item_by_id(id).map(|item| (item, stock)))
            .collect()
    }

    pub fn buy(&mut self, item_id: ItemId) -> SessionResult<()> {
        let item =
            items::item_by_id(item_id).ok_or(SessionError::UnknownItem { item: item_id })?;
        let stock = self.shop.get(&item_id).copied().unwrap_or(0);
        if stock == 0 {
            return Err(SessionError::SoldOut { item: item_id });
        }
        if self.money < item.price {
            return Err(SessionError::InsufficientFunds {
                have: self.money,
                need: item.price,
            });
        }
        self.money -= item.price;
        self.shop.insert(item_id, stock - 1);
        *self.inventory.entry(item_id).or_insert(0) += 1;
        log::debug!("bought {} for {}", item.name, item.price);
        Ok(())
    }

    /// Consumes one copy of the item on a living party member.
    ///
    /// Party-wide effects still name a target so every use reads the same;
    /// the target just anchors the validity checks.
    pub fn use_item(
        &mut self,
        item_id: ItemId,
        target_id: &str,
        party: &mut [Unit],
    ) -> SessionResult<()> {
        let item =
            items::item_by_id(item_id).ok_or(SessionError::UnknownItem { item: item_id })?;
        let owned = self.inventory.get(&item_id).copied().unwrap_or(0);
        if owned == 0 {
            return Err(SessionError::ItemNotOwned { item: item_id });
        }
        let target = party
            .iter_mut()
            .find(|unit| unit.id == target_id)
            .ok_or_else(|| SessionError::UnknownUnit {
                unit: target_id.to_string(),
            })?;
        if !target.is_alive() {
            return Err(SessionError::UnitDown {
                unit: target_id.to_string(),
            });
        }

        match item.effect {
            ItemEffect::HealOne { amount } => target.heal(amount),
            ItemEffect::RestoreSpirit { amount } => target.restore_spirit(amount),
            ItemEffect::RestoreSpiritFull => {
                let full = target.max_spirit_points;
                target.restore_spirit(full);
            }
            ItemEffect::HealParty { amount } => {
                for unit in party.iter_mut().filter(|unit| unit.is_alive()) {
                    unit.heal(amount);
                }
            }
        }

        if owned == 1 {
            self.inventory.remove(&item_id);
        } else {
            self.inventory.insert(item_id, owned - 1);
        }
        Ok(())
    }
}

impl Default for Campaign {
    fn default() -> Self {
        Campaign::new()
    }
}

/// Brings fallen party members back with a sliver of health.
///
/// Runs between battles so a loss of one fight never strands a dead
/// unit for the rest of the run.
pub fn revive_fallen(party: &mut [Unit]) {
    for unit in party.iter_mut() {
        if !unit.is_alive() {
            unit.hit_points = 1;
            log::debug!("{} limps back to their feet", unit.display_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hantu_assets::units;
    use hantu_battle::Side;

    fn funded_campaign(money: u32) -> Campaign {
        let mut campaign = Campaign::new();
        campaign.add_money(money);
        campaign
    }

    #[test]
    fn test_buying_moves_money_and_stock() {
        let mut campaign = funded_campaign(100);
        campaign.buy(items::SMALL_HEAL).expect("buy");
        assert_eq!(campaign.money(), 100 - 20);
        assert_eq!(campaign.inventory().get(&items::SMALL_HEAL), Some(&1));
        assert_eq!(campaign.shop().get(&items::SMALL_HEAL), Some(&9));
    }

    #[test]
    fn test_buying_without_funds_is_rejected() {
        let mut campaign = funded_campaign(5);
        let err = campaign.buy(items::SMALL_HEAL).unwrap_err();
        assert_eq!(err, SessionError::InsufficientFunds { have: 5, need: 20 });
        assert!(campaign.inventory().is_empty());
    }

    #[test]
    fn test_shop_only_sells_what_it_stocks() {
        let mut campaign = funded_campaign(1000);
        let err = campaign.buy(items::BIG_HEAL).unwrap_err();
        assert_eq!(err, SessionError::SoldOut { item: items::BIG_HEAL });
        let err = campaign.buy(999).unwrap_err();
        assert_eq!(err, SessionError::UnknownItem { item: 999 });
    }

    #[test]
    fn test_shelves_run_dry() {
        let mut campaign = funded_campaign(10_000);
        for _ in 0..10 {
            campaign.buy(items::SMALL_HEAL).expect("buy");
        }
        let err = campaign.buy(items::SMALL_HEAL).unwrap_err();
        assert_eq!(
            err,
            SessionError::SoldOut {
                item: items::SMALL_HEAL
            }
        );
    }

    #[test]
    fn test_heal_item_restores_one_unit() {
        let mut campaign = funded_campaign(100);
        campaign.buy(items::SMALL_HEAL).expect("buy");
        let mut party = units::starter_party();
        party[0].hit_points = 50;
        campaign
            .use_item(items::SMALL_HEAL, "p1", &mut party)
            .expect("use");
        assert_eq!(party[0].hit_points, 60);
        assert!(campaign.inventory().is_empty());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut campaign = funded_campaign(100);
        campaign.buy(items::SMALL_HEAL).expect("buy");
        let mut party = units::starter_party();
        party[0].hit_points = party[0].max_hit_points - 5;
        campaign
            .use_item(items::SMALL_HEAL, "p1", &mut party)
            .expect("use");
        assert_eq!(party[0].hit_points, party[0].max_hit_points);
    }

    #[test]
    fn test_party_heal_reaches_everyone_living() {
        let mut campaign = Campaign::new();
        campaign.inventory.insert(items::HEAL_MIRACLE, 1);
        let mut party = units::starter_party();
        party[0].hit_points = 10;
        party[1].hit_points = 0;
        campaign
            .use_item(items::HEAL_MIRACLE, "p1", &mut party)
            .expect("use");
        assert_eq!(party[0].hit_points, 100);
        assert_eq!(party[1].hit_points, 0, "the dead are beyond items");
    }

    #[test]
    fn test_spirit_items_restore_spirit() {
        let mut campaign = Campaign::new();
        campaign.inventory.insert(items::SPIRIT, 1);
        campaign.inventory.insert(items::FULL_SPIRIT, 1);
        let mut party = units::starter_party();
        party[0].spirit_points = 10;
        campaign
            .use_item(items::SPIRIT, "p1", &mut party)
            .expect("use");
        assert_eq!(party[0].spirit_points, 60);
        party[0].spirit_points = 3;
        campaign
            .use_item(items::FULL_SPIRIT, "p1", &mut party)
            .expect("use");
        assert_eq!(party[0].spirit_points, party[0].max_spirit_points);
    }

    #[test]
    fn test_using_an_item_you_do_not_own() {
        let mut campaign = Campaign::new();
        let mut party = units::starter_party();
        let err = campaign
            .use_item(items::SMALL_HEAL, "p1", &mut party)
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::ItemNotOwned {
                item: items::SMALL_HEAL
            }
        );
    }

    #[test]
    fn test_items_cannot_target_the_fallen() {
        let mut campaign = Campaign::new();
        campaign.inventory.insert(items::SMALL_HEAL, 1);
        let mut party = units::starter_party();
        party[0].hit_points = 0;
        let err = campaign
            .use_item(items::SMALL_HEAL, "p1", &mut party)
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::UnitDown {
                unit: "p1".to_string()
            }
        );
        assert_eq!(
            campaign.inventory().get(&items::SMALL_HEAL),
            Some(&1),
            "failed use keeps the item"
        );
    }

    #[test]
    fn test_revive_brings_everyone_to_one_point() {
        let mut party = units::starter_party();
        party[0].hit_points = 0;
        party[1].hit_points = 40;
        revive_fallen(&mut party);
        assert_eq!(party[0].hit_points, 1);
        assert_eq!(party[1].hit_points, 40, "the living keep their health");
    }

    #[test]
    fn test_revived_unit_is_a_spawn_target() {
        let mut party = vec![units::raka("p1", Side::Player)];
        party[0].hit_points = 0;
        revive_fallen(&mut party);
        assert!(party[0].is_alive());
    }
}
