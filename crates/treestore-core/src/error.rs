//! Error types for Treestore Core

use crate::id::ItemId;
use crate::limits::ValidationError;
use thiserror::Error;

/// Result type alias using Treestore's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Query failures
///
/// Building a store never fails. These surface only when a query needs a
/// record that the input never supplied, or when a parent chain loops.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Item not found: {0}")]
    NotFound(ItemId),

    #[error("Item {0} is referenced as a parent but was never supplied")]
    MissingRecord(ItemId),

    #[error("Cyclic ancestry from {start}: {repeated} reached twice")]
    CyclicAncestry { start: ItemId, repeated: ItemId },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}
