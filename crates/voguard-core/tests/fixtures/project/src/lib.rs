mod billing;

#[value_object(underlying = u64, conversions = "serde | display")]
pub struct CustomerId;

pub fn fallback() -> CustomerId {
    CustomerId::default()
}
