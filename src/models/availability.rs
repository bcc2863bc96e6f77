use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Availability {
    #[sqlx(rename = "availability_id")]
    pub id: i32,
    pub person_id: i32,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl Availability {
    pub fn covers(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.from_date <= from && self.to_date >= to
    }

    pub fn is_same_period(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.from_date == from && self.to_date == to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 1, d).unwrap()
    }

    #[test]
    fn covering_is_inclusive_on_both_ends() {
        let existing = Availability {
            id: 1,
            person_id: 1,
            from_date: date(10),
            to_date: date(14),
        };
        assert!(existing.covers(date(10), date(14)));
        assert!(existing.covers(date(11), date(13)));
        assert!(!existing.covers(date(9), date(13)));
        assert!(!existing.covers(date(11), date(15)));
        assert!(existing.is_same_period(date(10), date(14)));
        assert!(!existing.is_same_period(date(10), date(13)));
    }
}
