//! Values a token is made of

pub mod claim;
pub mod data_set;
pub mod signature;
