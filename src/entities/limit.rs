use thiserror::Error;

pub const MAX_LIMIT: u32 = 100;
pub const DEFAULT_LIMIT: u32 = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CreateLimitError {
    #[error("Limit must be less than or equal to {}", MAX_LIMIT)]
    LimitTooLarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limit {
    value: u32,
}

impl Limit {
    pub fn new(value: u32) -> Result<Self, CreateLimitError> {
        if value > MAX_LIMIT {
            Err(CreateLimitError::LimitTooLarge)
        } else {
            Ok(Self { value })
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self {
            value: DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_above_maximum_is_rejected() {
        assert_eq!(Limit::new(MAX_LIMIT).unwrap().value(), MAX_LIMIT);
        assert_eq!(Limit::new(MAX_LIMIT + 1), Err(CreateLimitError::LimitTooLarge));
        assert_eq!(Limit::default().value(), 100);
    }
}
