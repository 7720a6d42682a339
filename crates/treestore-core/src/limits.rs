//! Traversal limits for resource protection

/// Maximum depth for a descendant walk (50)
pub const MAX_TRAVERSAL_DEPTH: u32 = 50;

/// Depth used when a caller does not pick one (10)
pub const DEFAULT_TRAVERSAL_DEPTH: u32 = 10;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    TraversalDepthTooLarge { depth: u32, max: u32 },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TraversalDepthTooLarge { depth, max } => {
                write!(f, "Traversal depth too large: {} (max {})", depth, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate traversal depth
pub fn validate_traversal_depth(depth: u32) -> Result<(), ValidationError> {
    if depth > MAX_TRAVERSAL_DEPTH {
        return Err(ValidationError::TraversalDepthTooLarge {
            depth,
            max: MAX_TRAVERSAL_DEPTH,
        });
    }
    Ok(())
}
