use thiserror::Error;

/// Everything a booking operation can fail with. All of these are
/// recoverable by the caller: re-prompt, re-pick a slot, or refresh.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("missing required field: {0}")]
    Validation(&'static str),
    #[error("the slot was booked in the meantime, please pick another one")]
    SlotTaken,
    #[error("no booking or service with id {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("data file is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}
