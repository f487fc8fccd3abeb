use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Exactly `HH:MM AM` or `HH:MM PM`.
    static ref TIME_SLOT_REGEX: Regex = Regex::new(r"^(\d{2}):(\d{2}) (AM|PM)$").unwrap();
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TimeSlotError {
    #[error("time must look like 02:30 PM, got {0:?}")]
    Malformed(String),

    #[error("time out of range: {0}")]
    OutOfRange(String),
}

/// Parse a 12-hour slot into a wall-clock time. 12 AM is midnight, 12 PM is noon.
pub fn parse_time_slot(slot: &str) -> Result<NaiveTime, TimeSlotError> {
    let caps = TIME_SLOT_REGEX
        .captures(slot)
        .ok_or_else(|| TimeSlotError::Malformed(slot.to_string()))?;

    let hour: u32 = caps[1]
        .parse()
        .map_err(|_| TimeSlotError::Malformed(slot.to_string()))?;
    let minute: u32 = caps[2]
        .parse()
        .map_err(|_| TimeSlotError::Malformed(slot.to_string()))?;
    let is_pm = &caps[3] == "PM";

    if !(1..=12).contains(&hour) || minute > 59 {
        return Err(TimeSlotError::OutOfRange(slot.to_string()));
    }

    NaiveTime::from_hms_opt(to_24_hour(hour, is_pm), minute, 0)
        .ok_or_else(|| TimeSlotError::OutOfRange(slot.to_string()))
}

pub fn to_24_hour(hour: u32, is_pm: bool) -> u32 {
    match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    }
}

/// Render a wall-clock time as the slot the edit form shows, e.g. `02:00 PM`.
pub fn format_time_slot(time: &NaiveTime) -> String {
    let (is_pm, hour) = time.hour12();
    format!(
        "{hour:02}:{:02} {}",
        time.minute(),
        if is_pm { "PM" } else { "AM" }
    )
}

/// Join a calendar date and a 12-hour slot into one UTC instant.
pub fn combine_date_and_slot(
    date: NaiveDate,
    slot: &str,
) -> Result<DateTime<Utc>, TimeSlotError> {
    let time = parse_time_slot(slot)?;
    Ok(date.and_time(time).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_afternoon_slot_round_trip() {
        let at = combine_date_and_slot(date(), "02:00 PM").unwrap();
        assert_eq!(at.hour(), 14);
        assert_eq!(format_time_slot(&at.time()), "02:00 PM");
    }

    #[test]
    fn test_midnight_and_noon() {
        assert_eq!(parse_time_slot("12:00 AM").unwrap().hour(), 0);
        assert_eq!(parse_time_slot("12:00 PM").unwrap().hour(), 12);
        assert_eq!(format_time_slot(&parse_time_slot("12:00 AM").unwrap()), "12:00 AM");
        assert_eq!(format_time_slot(&parse_time_slot("12:00 PM").unwrap()), "12:00 PM");
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in [
            "",
            "14:00",
            "2 PM",
            "02:0 PM",
            "02:00 XM",
            "noon",
            "9:05am",
            "2:00pm",
            "02:00PM",
            "02:00 pm",
            " 11:30 PM ",
        ] {
            assert!(
                matches!(parse_time_slot(bad), Err(TimeSlotError::Malformed(_))),
                "{bad:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        for bad in ["00:30 AM", "13:00 PM", "10:60 AM"] {
            assert!(
                matches!(parse_time_slot(bad), Err(TimeSlotError::OutOfRange(_))),
                "{bad:?} should be out of range"
            );
        }
    }

    #[test]
    fn test_combined_instant_is_utc() {
        let at = combine_date_and_slot(date(), "09:15 AM").unwrap();
        assert_eq!(at.to_rfc3339(), "2025-06-15T09:15:00+00:00");
    }
}
