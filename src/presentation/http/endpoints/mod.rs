pub mod delivery;
pub mod health;
pub mod root;
pub mod webhook;
