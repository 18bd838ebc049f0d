pub mod confirmation;
pub mod directory;
pub mod models;
