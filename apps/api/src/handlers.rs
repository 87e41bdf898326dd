pub mod candidate;
pub mod health;
pub mod me;
pub mod organizations;
pub mod procedures;
pub mod roles;
