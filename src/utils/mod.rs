pub mod lift;
pub mod time;

pub use lift::{lift, lift_once};
pub use time::pause;
