//! What the deployer does, independent of how it talks to the network.

pub mod roster;
pub mod script;

pub use {
    roster::{Fighter, Roster},
    script::{Action, Confirmation, Deployer, Game, Report},
};
