use chrono::{Local, NaiveDate, Utc};

pub fn current_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
