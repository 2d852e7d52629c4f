//! Display formatting for prices, sale status, and message times.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use crate::net::types::{ReportStatus, SaleStatus};

/// `150000` -> `150,000원`.
pub fn format_price(price: i64) -> String {
    let digits = price.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if price < 0 { "-" } else { "" };
    format!("{sign}{grouped}원")
}

pub fn sale_status_label(status: SaleStatus) -> &'static str {
    match status {
        SaleStatus::OnSale => "판매중",
        SaleStatus::Reserved => "예약중",
        SaleStatus::SoldOut => "거래완료",
    }
}

pub fn report_status_label(status: ReportStatus) -> &'static str {
    match status {
        ReportStatus::Pending => "대기",
        ReportStatus::Resolved => "처리 완료",
        ReportStatus::Rejected => "반려",
    }
}

/// Relative time for room-list rows: "방금 전", "5분 전", ... then a date.
pub fn relative_time(ts_ms: i64, now_ms: i64) -> String {
    const MINUTE: i64 = 60_000;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;

    let elapsed = (now_ms - ts_ms).max(0);
    if elapsed < MINUTE {
        "방금 전".to_owned()
    } else if elapsed < HOUR {
        format!("{}분 전", elapsed / MINUTE)
    } else if elapsed < DAY {
        format!("{}시간 전", elapsed / HOUR)
    } else if elapsed < 7 * DAY {
        format!("{}일 전", elapsed / DAY)
    } else {
        chrono::DateTime::from_timestamp_millis(ts_ms)
            .map(|dt| dt.format("%-m월 %-d일").to_string())
            .unwrap_or_default()
    }
}

/// `HH:MM` for message bubbles.
pub fn clock_time(ts_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ts_ms)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// Current wall-clock time in milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
