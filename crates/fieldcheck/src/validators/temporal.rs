//! Ordering checks for points in time.
//!
//! The rules only need `PartialOrd + Display`, so they work for
//! `chrono::DateTime<Tz>`, `NaiveDate`, `NaiveDateTime` and any other
//! ordered timestamp type.

use std::fmt::Display;

use crate::foundation::ValidationError;

crate::rule! {
    /// The value must be strictly earlier than `instant`.
    pub Before<T: PartialOrd + Display> { instant: T } for T;
    check(self, input) { *input < self.instant }
    fail(self, input) {
        ValidationError::new("before", format!("must be before {}", self.instant))
            .with_param("before", self.instant.to_string())
            .with_param("actual", input.to_string())
    }
    fn before(instant: T);
}

crate::rule! {
    /// The value must be strictly later than `instant`.
    pub After<T: PartialOrd + Display> { instant: T } for T;
    check(self, input) { *input > self.instant }
    fail(self, input) {
        ValidationError::new("after", format!("must be after {}", self.instant))
            .with_param("after", self.instant.to_string())
            .with_param("actual", input.to_string())
    }
    fn after(instant: T);
}

crate::rule! {
    /// The value must lie in `start..=end`.
    pub Between<T: PartialOrd + Display> { start: T, end: T } for T;
    check(self, input) { *input >= self.start && *input <= self.end }
    fail(self, input) {
        ValidationError::new("between", format!("must be between {} and {}", self.start, self.end))
            .with_param("start", self.start.to_string())
            .with_param("end", self.end.to_string())
    }
    fn between(start: T, end: T);
}

crate::rule! {
    pub SameInstant<T: PartialOrd + Display> { instant: T } for T;
    check(self, input) { *input == self.instant }
    fail(self, input) {
        ValidationError::new("same_instant", format!("must be equal to {}", self.instant))
            .with_param("instant", self.instant.to_string())
    }
    fn same_instant(instant: T);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Validate;
    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn before_and_after_are_strict() {
        let cutoff = day(2024, 6, 1);
        assert!(before(cutoff).validate(&day(2024, 5, 31)).is_ok());
        assert!(before(cutoff).validate(&cutoff).is_err());
        assert!(after(cutoff).validate(&day(2024, 6, 2)).is_ok());
        assert_eq!(
            after(cutoff).validate(&cutoff).unwrap_err().message,
            "must be after 2024-06-01"
        );
    }

    #[test]
    fn between_is_inclusive() {
        let window = between(day(2024, 1, 1), day(2024, 12, 31));
        assert!(window.validate(&day(2024, 1, 1)).is_ok());
        assert!(window.validate(&day(2024, 12, 31)).is_ok());
        assert_eq!(
            window.validate(&day(2025, 1, 1)).unwrap_err().message,
            "must be between 2024-01-01 and 2024-12-31"
        );
    }

    #[test]
    fn same_instant_with_zoned_times() {
        let launch = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert!(same_instant(launch).validate(&launch).is_ok());
        assert!(
            same_instant(launch)
                .validate(&Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 1).unwrap())
                .is_err()
        );
    }
}
