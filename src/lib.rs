pub mod boss;
pub mod combat;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod movement;
pub mod scores;
pub mod spawner;
