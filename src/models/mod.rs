use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub mod aggregate;
pub mod area;
pub mod artist;
pub mod listing;
pub mod record;
pub mod show;
pub mod venue;

/// An RFC 3339 timestamp as seen by GraphQL clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateTimeScalar(pub OffsetDateTime);

#[Scalar(name = "DateTime")]
impl ScalarType for DateTimeScalar {
    fn parse(value: Value) -> InputValueResult<Self> {
        if let Value::String(datetime_str) = &value {
            if let Ok(datetime) = OffsetDateTime::parse(datetime_str, &Rfc3339) {
                return Ok(DateTimeScalar(datetime));
            }
        }

        Err(InputValueError::expected_type(value))
    }

    fn to_value(&self) -> Value {
        self.0
            .format(&Rfc3339)
            .map(Value::String)
            .unwrap_or(Value::Null)
    }
}

impl From<OffsetDateTime> for DateTimeScalar {
    fn from(datetime: OffsetDateTime) -> Self {
        Self(datetime)
    }
}

/// Escape `ILIKE` wildcards in a search term and wrap it for a substring match.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');

    pattern
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn empty_term_matches_everything() {
        assert_eq!(like_pattern(""), "%%");
        assert_eq!(like_pattern("   "), "%%");
    }

    #[test]
    fn wildcards_match_literally() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }

    #[test]
    fn datetimes_round_trip_through_graphql() {
        let scalar = DateTimeScalar(datetime!(2035-04-01 20:00:00 UTC));
        let value = scalar.to_value();
        assert_eq!(value, Value::String("2035-04-01T20:00:00Z".to_owned()));
        assert_eq!(DateTimeScalar::parse(value).unwrap(), scalar);
    }

    #[test]
    fn malformed_datetimes_are_rejected() {
        assert!(DateTimeScalar::parse(Value::String("next friday".to_owned())).is_err());
        assert!(DateTimeScalar::parse(Value::Boolean(true)).is_err());
    }
}
