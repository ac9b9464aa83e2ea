use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Cannot order by '{0}'; expected one of: co2_value, created_at")]
    InvalidOrderColumn(String),

    #[error("Invalid sort direction '{0}'; expected 'asc' or 'desc'")]
    InvalidSortDirection(String),

    #[error("Limit must be a positive integer, got {0}")]
    InvalidLimit(i64),

    #[error("Skip must be a non-negative integer, got {0}")]
    InvalidOffset(i64),
}

impl FilterError {
    /// Query parameter the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            FilterError::InvalidOrderColumn(_) => "order_by",
            FilterError::InvalidSortDirection(_) => "order",
            FilterError::InvalidLimit(_) => "limit",
            FilterError::InvalidOffset(_) => "skip",
        }
    }
}
