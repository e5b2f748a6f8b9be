//! Plain-text rendering of presenter state

use audisense_common::time::format_iso8601;
use audisense_common::HearingTestView;
use chrono::{DateTime, Utc};

use crate::gateway::DataGateway;
use crate::item::HearingTestItem;
use crate::presentation::{HearingTestForm, HearingTestsPresenter, Mode};

pub fn render_list(items: &[HearingTestItem], now: DateTime<Utc>) -> String {
    let mut out = format!("Hearing Tests ({})\n", items.len());
    if items.is_empty() {
        out.push_str("  No hearing tests recorded\n");
        return out;
    }
    for item in items {
        out.push_str(&format!(
            "  #{:<4} {:<24} {}  ({})\n",
            item.id(),
            item.tester_name(),
            item.date_conducted_formatted(),
            item.days_ago(now)
        ));
        out.push_str(&format!("        {}\n", item.result_preview()));
    }
    out
}

pub fn render_form(form: &HearingTestForm) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", form.title()));
    out.push_str(&format!("  Tester name:    {}\n", form.tester_name));
    out.push_str(&format!("  Date conducted: {}\n", format_iso8601(&form.date_conducted)));
    out.push_str(&format!("  Result:         {}\n", form.result));
    out
}

pub fn render_detail(view: &HearingTestView) -> String {
    let mut out = String::new();
    out.push_str(&format!("Hearing test #{}\n", view.id));
    out.push_str(&format!("  Tester name:    {}\n", view.tester_name));
    out.push_str(&format!("  Date conducted: {}\n", format_iso8601(&view.date_conducted)));
    out.push_str(&format!("  Result:         {}\n", view.result));
    out
}

/// Current view followed by the status line
pub fn render_screen<G: DataGateway>(presenter: &HearingTestsPresenter<G>) -> String {
    let mut out = match presenter.mode() {
        Mode::ViewingList => render_list(presenter.items(), presenter.now()),
        Mode::Creating | Mode::Editing(_) => render_form(presenter.form()),
    };
    let loading = if presenter.is_loading() { " [loading]" } else { "" };
    out.push_str(&format!("Status: {}{}\n", presenter.status(), loading));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(
            render_list(&[], now()),
            "Hearing Tests (0)\n  No hearing tests recorded\n"
        );
    }

    #[test]
    fn test_render_list_rows() {
        let item = HearingTestItem::new(HearingTestView {
            id: 3,
            tester_name: "Dr. Johnson".to_string(),
            date_conducted: now() - Duration::days(3),
            result: String::new(),
        });
        let out = render_list(&[item], now());

        assert!(out.starts_with("Hearing Tests (1)\n"));
        assert!(out.contains("#3"));
        assert!(out.contains("Jun 07, 2024 09:30  (3 days ago)"));
        assert!(out.contains("No result"));
    }

    #[test]
    fn test_render_form() {
        let mut form = HearingTestForm::new(now());
        form.tester_name = "Dr. Smith".to_string();
        let out = render_form(&form);

        assert!(out.starts_with("New Hearing Test\n"));
        assert!(out.contains("Tester name:    Dr. Smith"));
        assert!(out.contains("Date conducted: 2024-06-10T09:30:00Z"));
    }

    #[test]
    fn test_render_detail() {
        let view = HearingTestView {
            id: 2,
            tester_name: "Dr. Johnson".to_string(),
            date_conducted: now(),
            result: "Mild hearing loss detected".to_string(),
        };

        assert_eq!(
            render_detail(&view),
            "Hearing test #2\n\
             \x20 Tester name:    Dr. Johnson\n\
             \x20 Date conducted: 2024-06-10T09:30:00Z\n\
             \x20 Result:         Mild hearing loss detected\n"
        );
    }
}
