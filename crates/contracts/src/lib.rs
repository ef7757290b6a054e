pub mod alloy;
pub mod artifact;

pub use artifact::Artifact;
