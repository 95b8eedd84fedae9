//! Storage layer errors

#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    NoActiveTransaction,
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::NoActiveTransaction => {
                write!(f, "No transaction is currently active")
            }
        }
    }
}

impl std::error::Error for StorageError {}
