use crate::error::DecodeError;
use std::fmt;

///
/// DecodeStatus
///
/// Accumulated decode problems. Statuses from many DTOs combine into one so
/// a registration pass reports everything at once; the caller decides
/// whether any of it is fatal.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DecodeStatus {
    errors: Vec<DecodeError>,
}

impl DecodeStatus {
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: DecodeError) {
        self.errors.push(error);
    }

    /// Append every error from `other`, keeping its order.
    pub fn combine(&mut self, other: Self) {
        self.errors.extend(other.errors);
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[DecodeError] {
        &self.errors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_valid() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for DecodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }

        Ok(())
    }
}

impl std::error::Error for DecodeStatus {}

impl From<DecodeError> for DecodeStatus {
    fn from(error: DecodeError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl FromIterator<DecodeError> for DecodeStatus {
    fn from_iter<I: IntoIterator<Item = DecodeError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found(method: &str) -> DecodeError {
        DecodeError::MethodNotFound {
            dto: "OrderDto".to_string(),
            method: method.to_string(),
            entity: "Order".to_string(),
        }
    }

    #[test]
    fn combine_keeps_every_error_in_order() {
        let mut status = DecodeStatus::new();
        status.add(not_found("A"));

        let other: DecodeStatus = [not_found("B"), not_found("C")].into_iter().collect();
        status.combine(other);

        assert_eq!(status.len(), 3);
        assert!(!status.is_valid());
        assert_eq!(status.errors()[2], not_found("C"));
        assert_eq!(status.to_string().lines().count(), 3);
    }

    #[test]
    fn empty_status_is_valid() {
        assert!(DecodeStatus::new().into_result().is_ok());
    }

    #[test]
    fn imperfect_match_names_closest_fit() {
        let with = DecodeError::ImperfectMatch {
            dto: "OrderDto".to_string(),
            method: "Order".to_string(),
            closest: Some("Order(int x)".to_string()),
        };
        let without = DecodeError::ImperfectMatch {
            dto: "OrderDto".to_string(),
            method: "Order".to_string(),
            closest: None,
        };

        assert!(with.to_string().ends_with("was found. Closest fit is Order(int x)"));
        assert!(without.to_string().ends_with("was found"));
    }
}
