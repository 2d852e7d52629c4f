use super::*;

#[test]
fn format_price_groups_thousands() {
    assert_eq!(format_price(0), "0원");
    assert_eq!(format_price(999), "999원");
    assert_eq!(format_price(1000), "1,000원");
    assert_eq!(format_price(150_000), "150,000원");
    assert_eq!(format_price(12_345_678), "12,345,678원");
    assert_eq!(format_price(-5000), "-5,000원");
}

#[test]
fn sale_status_labels() {
    assert_eq!(sale_status_label(SaleStatus::OnSale), "판매중");
    assert_eq!(sale_status_label(SaleStatus::Reserved), "예약중");
    assert_eq!(sale_status_label(SaleStatus::SoldOut), "거래완료");
}

#[test]
fn relative_time_buckets() {
    let now = 1_735_776_000_000; // 2025-01-02T00:00:00Z
    assert_eq!(relative_time(now - 10_000, now), "방금 전");
    assert_eq!(relative_time(now - 5 * 60_000, now), "5분 전");
    assert_eq!(relative_time(now - 3 * 3_600_000, now), "3시간 전");
    assert_eq!(relative_time(now - 2 * 86_400_000, now), "2일 전");
    assert_eq!(relative_time(now - 30 * 86_400_000, now), "12월 3일");
}

#[test]
fn relative_time_clamps_future_timestamps() {
    assert_eq!(relative_time(2_000, 1_000), "방금 전");
}

#[test]
fn clock_time_formats_utc_hours() {
    assert_eq!(clock_time(1_735_776_000_000 + 9 * 3_600_000 + 5 * 60_000), "09:05");
}

#[test]
fn report_status_labels() {
    assert_eq!(report_status_label(ReportStatus::Pending), "대기");
    assert_eq!(report_status_label(ReportStatus::Resolved), "처리 완료");
    assert_eq!(report_status_label(ReportStatus::Rejected), "반려");
}
