pub mod blame;
pub mod cache;
pub mod repository;

pub use repository::{GitRepository, SharedRepo};
