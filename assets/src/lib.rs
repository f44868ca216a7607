//! Default game data: unit templates, the skill catalog, campaign levels,
//! and shop items.

pub mod items;
pub mod levels;
pub mod skills;
pub mod units;
