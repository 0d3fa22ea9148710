use chrono::NaiveDate;
use js_sys::Date;
use shared::MonthYear;

/// The month the browser clock is in
pub fn current_month_year() -> MonthYear {
    let now = Date::new_0();
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let year = now.get_full_year() as i32;
    MonthYear::new(month, year).unwrap_or(MonthYear { month: 1, year })
}

/// Today by the browser clock
pub fn today() -> Option<NaiveDate> {
    let now = Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
}

/// Get current date in YYYY-MM-DD format
pub fn get_current_date() -> String {
    today()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Check if a day of the displayed month is today
pub fn is_today(period: MonthYear, day: u32) -> bool {
    today() == NaiveDate::from_ymd_opt(period.year, period.month, day)
}

/// Years offered by the month/year filter, centred on `around`
pub fn selectable_years(around: i32) -> Vec<i32> {
    ((around - 5)..=(around + 1)).collect()
}
