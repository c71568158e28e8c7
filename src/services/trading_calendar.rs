//! 交易日判断
//!
//! 只按星期判断（周一至周五为交易日），不考虑法定节假日

use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;

/// 指定时区的当前日期
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// 是否为交易日
pub fn is_trading_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 走势图的查询区间：截止日往前推 `days` 个自然日
pub fn history_window(end: NaiveDate, days: i64) -> (NaiveDate, NaiveDate) {
    let start = end.checked_sub_signed(Duration::days(days)).unwrap_or(end);
    (start, end)
}

/// ISO 日期字符串（YYYY-MM-DD）
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
