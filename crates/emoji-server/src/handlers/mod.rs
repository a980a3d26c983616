pub mod assets;
pub mod generate;
pub mod health;
