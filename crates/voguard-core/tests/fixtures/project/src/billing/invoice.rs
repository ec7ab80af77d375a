use super::AmountError;

#[value_object(underlying = Vec<u8>, throws = AmountError)]
#[instance(name = "Zero", value = 0)]
#[instance(value = 1)]
pub struct Amount;

impl Amount {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    fn validate(&self, value: i64) -> bool {
        value >= 0
    }
}

pub fn total() {
    #[value_object]
    struct LineTotal;
}
