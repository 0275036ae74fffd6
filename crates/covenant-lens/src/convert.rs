//! Typed conversions for string-valued specs.
//!
//! Every spec over strings gains `int()`, `long()`, `double()`, `float()`,
//! `boolean()`, `uuid()`, `local_date()`, `date_time()` and
//! `zoned_date_time()`. Values that fail to parse make the bound lens report
//! `Invalid`; writing renders the value back in the same format it parses.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use crate::{BiDiLensSpec, BoxError};

const LOCAL_DATE: &str = "%Y-%m-%d";
const LOCAL_DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parses `true` or `false`, ignoring ASCII case. Anything else is rejected.
pub(crate) fn parse_boolean(value: String) -> Result<bool, BoxError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(format!("not a boolean: {value:?}").into())
    }
}

pub(crate) fn parse_local_date(value: String) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(&value, LOCAL_DATE)
}

pub(crate) fn format_local_date(value: NaiveDate) -> String {
    value.format(LOCAL_DATE).to_string()
}

pub(crate) fn parse_date_time(value: String) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(&value, LOCAL_DATE_TIME)
}

pub(crate) fn format_date_time(value: NaiveDateTime) -> String {
    value.format(LOCAL_DATE_TIME).to_string()
}

pub(crate) fn parse_zoned_date_time(value: String) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(&value)
}

pub(crate) fn format_zoned_date_time(value: DateTime<FixedOffset>) -> String {
    value.to_rfc3339()
}

/// Expands to the typed conversion methods inside an `impl` block of a spec
/// over `String` whose `try_map(parse, render)` returns `$spec<$($param,)* U>`.
macro_rules! string_conversions {
    ($spec:ident<$($param:ident),*>) => {
        /// Values as `i32`.
        #[must_use]
        pub fn int(&self) -> $spec<$($param,)* i32> {
            self.try_map(|v: String| v.parse::<i32>(), |v: i32| v.to_string())
        }

        /// Values as `i64`.
        #[must_use]
        pub fn long(&self) -> $spec<$($param,)* i64> {
            self.try_map(|v: String| v.parse::<i64>(), |v: i64| v.to_string())
        }

        /// Values as `f64`.
        #[must_use]
        pub fn double(&self) -> $spec<$($param,)* f64> {
            self.try_map(|v: String| v.parse::<f64>(), |v: f64| v.to_string())
        }

        /// Values as `f32`.
        #[must_use]
        pub fn float(&self) -> $spec<$($param,)* f32> {
            self.try_map(|v: String| v.parse::<f32>(), |v: f32| v.to_string())
        }

        /// Values as `bool`; only `true` and `false` (any case) are accepted.
        #[must_use]
        pub fn boolean(&self) -> $spec<$($param,)* bool> {
            self.try_map($crate::convert::parse_boolean, |v: bool| v.to_string())
        }

        /// Values as hyphenated UUIDs.
        #[must_use]
        pub fn uuid(&self) -> $spec<$($param,)* ::uuid::Uuid> {
            self.try_map(
                |v: String| ::uuid::Uuid::parse_str(&v),
                |v: ::uuid::Uuid| v.hyphenated().to_string(),
            )
        }

        /// Values as ISO-8601 dates, e.g. `2017-01-31`.
        #[must_use]
        pub fn local_date(&self) -> $spec<$($param,)* ::chrono::NaiveDate> {
            self.try_map(
                $crate::convert::parse_local_date,
                $crate::convert::format_local_date,
            )
        }

        /// Values as ISO-8601 local date-times, e.g. `2017-01-31T12:30:00`.
        #[must_use]
        pub fn date_time(&self) -> $spec<$($param,)* ::chrono::NaiveDateTime> {
            self.try_map(
                $crate::convert::parse_date_time,
                $crate::convert::format_date_time,
            )
        }

        /// Values as RFC 3339 date-times with offset, e.g.
        /// `2017-01-31T12:30:00+01:00`.
        #[must_use]
        pub fn zoned_date_time(&self) -> $spec<$($param,)* ::chrono::DateTime<::chrono::FixedOffset>> {
            self.try_map(
                $crate::convert::parse_zoned_date_time,
                $crate::convert::format_zoned_date_time,
            )
        }
    };
}

pub(crate) use string_conversions;

impl<M: 'static> BiDiLensSpec<M, String> {
    string_conversions!(BiDiLensSpec<M>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Failure, Location, With};
    use uuid::Uuid;

    type Pairs = Vec<(String, String)>;

    fn spec() -> BiDiLensSpec<Pairs, String> {
        BiDiLensSpec::new(
            Location::Query,
            |name: &str, pairs: &Pairs| {
                pairs
                    .iter()
                    .filter(|(n, _)| n == name)
                    .map(|(_, v)| v.clone())
                    .collect()
            },
            |name: &str, values: Vec<String>, pairs: Pairs| {
                let mut kept: Pairs = pairs.into_iter().filter(|(n, _)| n != name).collect();
                kept.extend(values.into_iter().map(|v| (name.to_string(), v)));
                kept
            },
        )
    }

    fn one(value: &str) -> Pairs {
        vec![("v".to_string(), value.to_string())]
    }

    #[test]
    fn test_numbers() {
        assert_eq!(spec().int().required("v").extract(&one("123")).unwrap(), 123);
        assert_eq!(spec().long().required("v").extract(&one("-9000000000")).unwrap(), -9_000_000_000);
        assert!((spec().double().required("v").extract(&one("1.5")).unwrap() - 1.5).abs() < f64::EPSILON);
        assert!((spec().float().required("v").extract(&one("2.25")).unwrap() - 2.25).abs() < f32::EPSILON);

        let lens = spec().int().required("v");
        assert_eq!(
            lens.extract(&one("1.5")).unwrap_err().into_failures(),
            vec![Failure::Invalid(lens.meta().clone())]
        );
    }

    #[test]
    fn test_boolean_is_strict_but_case_insensitive() {
        let lens = spec().boolean().required("v");
        assert!(lens.extract(&one("true")).unwrap());
        assert!(lens.extract(&one("TRUE")).unwrap());
        assert!(!lens.extract(&one("False")).unwrap());
        assert!(lens.extract(&one("yes")).is_err());
        assert!(lens.extract(&one("1")).is_err());
    }

    #[test]
    fn test_uuid() {
        let id = Uuid::now_v7();
        let lens = spec().uuid().required("v");
        let message = Pairs::new().with([lens.of(id)]);
        assert_eq!(message, one(&id.to_string()));
        assert_eq!(lens.extract(&message).unwrap(), id);
        assert!(lens.extract(&one("not-a-uuid")).is_err());
    }

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(2017, 1, 31).unwrap();
        let lens = spec().local_date().required("v");
        assert_eq!(lens.extract(&one("2017-01-31")).unwrap(), date);
        assert_eq!(lens.inject(date, Pairs::new()), one("2017-01-31"));
        assert!(lens.extract(&one("31/01/2017")).is_err());

        let lens = spec().date_time().required("v");
        let value = lens.extract(&one("2017-01-31T12:30:00")).unwrap();
        assert_eq!(value, date.and_hms_opt(12, 30, 0).unwrap());
        assert_eq!(lens.inject(value, Pairs::new()), one("2017-01-31T12:30:00"));

        let lens = spec().zoned_date_time().required("v");
        let value = lens.extract(&one("2017-01-31T12:30:00+01:00")).unwrap();
        assert_eq!(value.offset().local_minus_utc(), 3600);
        assert_eq!(lens.inject(value, Pairs::new()), one("2017-01-31T12:30:00+01:00"));
    }
}
