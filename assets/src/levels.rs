//! The campaign's four encounters
//!
//! Each spawn names a template, a board cell in the enemy zone, and the
//! bounty paid when that enemy falls.

use hantu_battle::Position;
use serde::{Deserialize, Serialize};

use crate::units;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemySpawn {
    pub template: String,
    pub position: Position,
    pub reward: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub number: u32,
    pub name: String,
    pub spawns: Vec<EnemySpawn>,
}

fn spawn(template: &str, row: u8, col: u8, reward: u32) -> EnemySpawn {
    EnemySpawn {
        template: template.to_string(),
        position: Position::new(row, col),
        reward,
    }
}

pub fn campaign() -> Vec<Level> {
    vec![
        Level {
            number: 1,
            name: "Village Outskirts".to_string(),
            spawns: vec![spawn(units::TEMPLATE_TUYUL, 1, 3, 100)],
        },
        Level {
            number: 2,
            name: "Rice Fields".to_string(),
            spawns: vec![
                spawn(units::TEMPLATE_TUYUL, 1, 3, 210),
                spawn(units::TEMPLATE_TUYUL, 2, 3, 180),
            ],
        },
        Level {
            number: 3,
            name: "Old Graveyard".to_string(),
            spawns: vec![
                spawn(units::TEMPLATE_TUYUL, 1, 3, 200),
                spawn(units::TEMPLATE_POCONG, 2, 3, 300),
                spawn(units::TEMPLATE_POCONG, 2, 4, 300),
            ],
        },
        Level {
            number: 4,
            name: "Banyan Grove".to_string(),
            spawns: vec![
                spawn(units::TEMPLATE_TUYUL, 1, 3, 200),
                spawn(units::TEMPLATE_GENDERUWO, 2, 3, 300),
                spawn(units::TEMPLATE_POCONG, 2, 4, 300),
                spawn(units::TEMPLATE_TUYUL, 3, 3, 300),
            ],
        },
    ]
}

pub fn level(number: u32) -> Option<Level> {
    campaign().into_iter().find(|l| l.number == number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hantu_battle::Zone;

    #[test]
    fn test_four_levels_with_rising_headcount() {
        let levels = campaign();
        assert_eq!(levels.len(), 4);
        let counts: Vec<_> = levels.iter().map(|l| l.spawns.len()).collect();
        assert_eq!(counts, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_spawns_sit_in_the_enemy_zone() {
        for level in campaign() {
            for spawn in &level.spawns {
                assert_eq!(
                    spawn.position.zone(),
                    Zone::EnemyZone,
                    "level {} spawn at ({}, {})",
                    level.number,
                    spawn.position.row,
                    spawn.position.col
                );
            }
        }
    }

    #[test]
    fn test_spawn_templates_resolve() {
        use hantu_battle::Side;
        for level in campaign() {
            for spawn in &level.spawns {
                assert!(
                    units::spawn(&spawn.template, "x", Side::Enemy).is_some(),
                    "unknown template {}",
                    spawn.template
                );
            }
        }
    }

    #[test]
    fn test_lookup_by_number() {
        assert_eq!(level(1).map(|l| l.spawns.len()), Some(1));
        assert!(level(9).is_none());
    }
}
