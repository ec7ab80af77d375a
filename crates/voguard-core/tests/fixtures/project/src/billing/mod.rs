pub mod invoice;

#[derive(Debug, thiserror::Error)]
#[error("amount must not be negative")]
pub struct AmountError;
