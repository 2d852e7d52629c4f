//! Admin console: user reports with status changes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only admins may stay on this route; everyone else is sent home once the
//! session lookup settles. Status changes apply optimistically and roll back
//! when the backend rejects them.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::{Id, ReportStatus};
use crate::state::admin::ReportsState;
use crate::state::auth::AuthState;
use crate::state::toast::ToastState;
use crate::util::alive::AliveFlag;
use crate::util::auth::should_redirect_non_admin;
use crate::util::format::report_status_label;

const FILTERS: [Option<ReportStatus>; 4] =
    [None, Some(ReportStatus::Pending), Some(ReportStatus::Resolved), Some(ReportStatus::Rejected)];

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();
    let reports = RwSignal::new(ReportsState { loading: true, ..ReportsState::default() });

    Effect::new(move || {
        if should_redirect_non_admin(&auth.get()) {
            navigate("/", NavigateOptions::default());
        }
    });

    let alive = AliveFlag::new();
    on_cleanup({
        let alive = alive.clone();
        move || alive.cancel()
    });
    let alive = StoredValue::new(alive);

    #[cfg(feature = "hydrate")]
    let api = crate::app::use_api();

    // Fetch once the session is known to belong to an admin.
    Effect::new(move || {
        if !auth.with(AuthState::is_admin) {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let client = api.get_value();
            let alive = alive.get_value();
            leptos::task::spawn_local(async move {
                let result = crate::net::api::list_reports(&client).await;
                alive.deliver(result, |result| match result {
                    Ok(list) => reports.update(|r| r.replace(list)),
                    Err(e) => {
                        leptos::logging::warn!("report fetch failed: {e}");
                        reports.update(|r| {
                            r.loading = false;
                            r.error = Some(e.user_message());
                        });
                    }
                });
            });
        }
    });

    let change_status = move |report_id: Id, status: ReportStatus| {
        let mut previous = None;
        reports.update(|r| previous = r.set_status(report_id, status));
        let Some(previous) = previous else {
            return;
        };
        if previous == status {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let client = api.get_value();
            let alive = alive.get_value();
            leptos::task::spawn_local(async move {
                let result = crate::net::api::update_report_status(&client, report_id, status).await;
                alive.deliver(result, |result| {
                    if let Err(e) = result {
                        leptos::logging::warn!("report {report_id} status change failed: {e}");
                        reports.update(|r| {
                            r.set_status(report_id, previous);
                        });
                        toasts.update(|t| {
                            t.api_error(&e);
                        });
                    }
                });
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (alive, toasts);
    };

    view! {
        <div class="admin-page">
            <header class="admin-page__header">
                <h1>"신고 관리"</h1>
                <span class="badge">"대기 " {move || reports.with(ReportsState::pending_count)}</span>
            </header>

            <nav class="admin-page__filters">
                {FILTERS
                    .iter()
                    .map(|filter| {
                        let filter = *filter;
                        let label = filter.map_or("전체", report_status_label);
                        view! {
                            <button
                                class="btn"
                                class:btn--primary=move || reports.with(|r| r.filter == filter)
                                on:click=move |_| reports.update(|r| r.filter = filter)
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>

            <Show when=move || reports.with(|r| r.error.is_some())>
                <p class="admin-page__error">{move || reports.with(|r| r.error.clone().unwrap_or_default())}</p>
            </Show>

            <table class="report-table">
                <thead>
                    <tr>
                        <th>"신고자"</th>
                        <th>"대상"</th>
                        <th>"사유"</th>
                        <th>"상태"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || reports.with(ReportsState::visible)
                        key=|report| (report.report_id, report.status)
                        children=move |report| {
                            let id = report.report_id;
                            let current = report.status;
                            view! {
                                <tr>
                                    <td>{report.reporter_nickname.clone()}</td>
                                    <td>{format!("{} #{}", report.target_type, report.target_id)}</td>
                                    <td>{report.reason.clone()}</td>
                                    <td>
                                        <select on:change=move |ev| {
                                            if let Some(status) = parse_status(&event_target_value(&ev)) {
                                                change_status(id, status);
                                            }
                                        }>
                                            {[ReportStatus::Pending, ReportStatus::Resolved, ReportStatus::Rejected]
                                                .into_iter()
                                                .map(|status| {
                                                    let is_current = status == current;
                                                    view! {
                                                        <option value=status_value(status) selected=is_current>
                                                            {report_status_label(status)}
                                                        </option>
                                                    }
                                                })
                                                .collect_view()}
                                        </select>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}

fn status_value(status: ReportStatus) -> &'static str {
    match status {
        ReportStatus::Pending => "PENDING",
        ReportStatus::Resolved => "RESOLVED",
        ReportStatus::Rejected => "REJECTED",
    }
}

fn parse_status(value: &str) -> Option<ReportStatus> {
    [ReportStatus::Pending, ReportStatus::Resolved, ReportStatus::Rejected]
        .into_iter()
        .find(|status| status_value(*status) == value)
}
