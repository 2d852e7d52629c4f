use super::*;

#[test]
fn status_values_match_wire_tags() {
    assert_eq!(status_value(ReportStatus::Pending), "PENDING");
    assert_eq!(status_value(ReportStatus::Resolved), "RESOLVED");
    assert_eq!(status_value(ReportStatus::Rejected), "REJECTED");
}

#[test]
fn parse_status_reads_select_values() {
    assert_eq!(parse_status("RESOLVED"), Some(ReportStatus::Resolved));
    assert_eq!(parse_status("resolved"), None);
    assert_eq!(parse_status(""), None);
}

#[test]
fn filters_start_with_all() {
    assert_eq!(FILTERS[0], None);
    assert_eq!(FILTERS.len(), 4);
}
