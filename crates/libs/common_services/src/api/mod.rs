pub mod auth;
pub mod dashboard;
pub mod search;
pub mod wardrobe;
