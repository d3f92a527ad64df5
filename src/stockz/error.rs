use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockzError {
    #[error("ID must be a positive number (got {0})")]
    InvalidId(u32),

    #[error("ID {0} already exists")]
    DuplicateId(u32),

    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),

    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Quantity must be between 1 and {max} (got {got})")]
    InvalidQuantity { got: usize, max: usize },

    #[error("Record with ID {0} not found")]
    NotFound(u32),

    #[error("No previous sort to reapply")]
    NoPriorSort,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

impl StockzError {
    /// True for errors caused by user input, which leave the inventory untouched
    /// and can be fixed by re-prompting.
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            StockzError::Io(_) | StockzError::Serialization(_) | StockzError::Store(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StockzError>;
