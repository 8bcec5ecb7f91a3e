use chrono::{FixedOffset, NaiveDate, Offset, Utc};

/// Today's date at a fixed UTC offset.
///
/// Report requests are dated in America/Lima, which has stayed at UTC-05:00
/// without daylight saving since 1994. Offsets outside ±24h fall back to UTC.
pub fn today_at_offset(utc_offset_hours: i32) -> NaiveDate {
    let offset = utc_offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix());
    Utc::now().with_timezone(&offset).date_naive()
}
