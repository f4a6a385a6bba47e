/// Client-side draft validation.
///
/// These mirror the constraints a browser form enforces natively
/// (`required`, `min`/`max`, `type=email`) and run before any request is
/// built.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
    #[error("{0} must be a valid email address")]
    InvalidEmail(&'static str),
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field)
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidEmail(field) => field,
        }
    }
}

/// A draft field that can be checked for presence.
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for str {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Presence> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(Presence::is_present)
    }
}

macro_rules! always_present {
    ($($ty:ty),*) => {
        $(impl Presence for $ty {
            fn is_present(&self) -> bool {
                true
            }
        })*
    };
}

always_present!(bool, u8, u16, u32, u64, i32, i64, f64);

impl Presence for chrono::NaiveDateTime {
    fn is_present(&self) -> bool {
        true
    }
}

/// Fail with [`ValidationError::MissingField`] when `value` is absent or empty.
pub fn require<T: Presence + ?Sized>(field: &'static str, value: &T) -> Result<(), ValidationError> {
    if value.is_present() {
        Ok(())
    } else {
        Err(ValidationError::MissingField(field))
    }
}

/// Range check for an optional integer; absent values pass.
pub fn within<T>(field: &'static str, value: Option<T>, min: i64, max: i64) -> Result<(), ValidationError>
where
    T: Into<i64>,
{
    match value.map(Into::into) {
        Some(v) if v < min || v > max => Err(ValidationError::OutOfRange { field, min, max }),
        _ => Ok(()),
    }
}

/// Minimum check for an optional float; absent values pass.
pub fn non_negative(field: &'static str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if v < 0.0 || v.is_nan() => Err(ValidationError::OutOfRange {
            field,
            min: 0,
            max: i64::MAX,
        }),
        _ => Ok(()),
    }
}

/// Same acceptance rule as `<input type="email">`: one `@` with text on both sides.
pub fn email(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_empty() => match v.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
                Ok(())
            }
            _ => Err(ValidationError::InvalidEmail(field)),
        },
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_counts_as_missing() {
        let value = Some(String::new());
        assert_eq!(
            require("location", &value),
            Err(ValidationError::MissingField("location"))
        );
        assert!(require("location", &Some(" ".to_string())).is_ok());
        assert!(require::<Option<u8>>("rating", &None).is_err());
    }

    #[test]
    fn range_and_email_checks() {
        assert!(within("rating", Some(5u8), 1, 5).is_ok());
        assert_eq!(
            within("rating", Some(0u8), 1, 5).unwrap_err().field(),
            "rating"
        );
        assert!(within::<u8>("rating", None, 1, 5).is_ok());

        assert!(email("email", Some("ana@studio.io")).is_ok());
        assert!(email("email", Some("ana.studio.io")).is_err());
        assert!(email("email", Some("@studio.io")).is_err());
        assert!(non_negative("price", Some(-1.0)).is_err());
    }
}
