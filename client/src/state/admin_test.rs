use super::*;

fn report(report_id: Id, status: ReportStatus) -> Report {
    Report {
        report_id,
        reporter_nickname: "신고자".to_owned(),
        target_type: "PRODUCT".to_owned(),
        target_id: 10,
        reason: "허위 매물".to_owned(),
        status,
        created_at: None,
    }
}

#[test]
fn visible_applies_status_filter() {
    let mut state = ReportsState::default();
    state.replace(vec![report(1, ReportStatus::Pending), report(2, ReportStatus::Resolved)]);
    assert_eq!(state.visible().len(), 2);
    state.filter = Some(ReportStatus::Pending);
    let visible = state.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].report_id, 1);
}

#[test]
fn set_status_returns_previous_for_rollback() {
    let mut state = ReportsState::default();
    state.replace(vec![report(1, ReportStatus::Pending)]);
    let previous = state.set_status(1, ReportStatus::Rejected);
    assert_eq!(previous, Some(ReportStatus::Pending));
    assert_eq!(state.pending_count(), 0);
    assert_eq!(state.set_status(99, ReportStatus::Resolved), None);
}
