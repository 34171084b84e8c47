pub mod form;
pub mod login;
pub mod notice;
pub mod signup;

use serde::{Deserialize, Serialize};

use crate::domain::notice::Notice;

/// Identifies one armed countdown. A fresh id is handed out every time a
/// flow arms, so ticks from a retired countdown can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

/// Side effects a reducer asks its screen to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify(Notice),
    ArmCountdown(TimerId),
    CancelCountdown(TimerId),
}
