//! Campaign layer around the battle engine: level progression, the
//! between-battle shop, and the enemy command policy.

mod campaign;
mod error;
mod policy;
mod session;

pub use campaign::{revive_fallen, Campaign};
pub use error::{SessionError, SessionResult};
pub use policy::{CommandPolicy, RandomPolicy};
pub use session::{InventoryEntry, Session, SessionPhase, SessionView, ShopEntry};
