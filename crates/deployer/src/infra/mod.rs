pub mod blockchain;
pub mod config;
pub mod observe;

pub use blockchain::Chain;
