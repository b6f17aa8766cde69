pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
pub mod render;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding when moving falling piece")]
pub struct PieceCollisionError;

#[derive(Debug, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("`{name}` must be greater than zero")]
    ZeroInterval { name: &'static str },
}
