//! Treestore Core - In-memory hierarchy index
//!
//! This crate builds a read-only index over a flat list of records that
//! reference their parent by id, and answers parent/child/ancestor queries
//! against it without rescanning the list.

pub mod error;
pub mod id;
pub mod item;
pub mod limits;
pub mod store;
pub mod traversal;

pub use error::{Error, Result};
pub use id::{ItemId, ParentRef, ROOT_MARKER};
pub use item::{Attributes, Item};
pub use limits::ValidationError;
pub use store::{StoreStats, TreeStore};
