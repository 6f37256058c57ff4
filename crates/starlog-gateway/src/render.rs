// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-rendered list page.
//!
//! The page carries the first page of rows plus the state a list controller
//! hydrates from: the filter values, the `data-has-more` sentinel flag and the
//! hidden forgery-token field.

use std::fmt::Write;

use starlog_core::routes::CSRF_FIELD;
use starlog_core::{FilterState, ObservationRow, ObservationType};
use strum::IntoEnumIterator;

/// Everything the list template needs.
#[derive(Debug, Clone)]
pub struct ListPage<'a> {
    pub list_path: &'a str,
    pub add_path: &'a str,
    pub csrf_token: &'a str,
    pub filters: &'a FilterState,
    pub session_slugs: &'a [String],
    pub rows: &'a [ObservationRow],
    pub total: usize,
    pub has_more: bool,
}

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn count_label(count: usize) -> &'static str {
    if count == 1 { "observation" } else { "observations" }
}

fn option(out: &mut String, value: &str, label: &str, selected: bool) {
    let _ = writeln!(
        out,
        r#"      <option value="{}"{}>{}</option>"#,
        escape_html(value),
        if selected { " selected" } else { "" },
        escape_html(label),
    );
}

fn filter_form(out: &mut String, page: &ListPage<'_>) {
    let filters = page.filters.normalized();
    let _ = writeln!(
        out,
        r#"  <form id="filter-form" method="get" action="{}">"#,
        escape_html(page.list_path)
    );

    out.push_str("    <select name=\"session\">\n");
    option(out, "", "All sessions", filters.session.is_none());
    for slug in page.session_slugs {
        option(out, slug, slug, filters.session.as_deref() == Some(slug.as_str()));
    }
    out.push_str("    </select>\n");

    out.push_str("    <select name=\"object_type\">\n");
    option(out, "", "All types", filters.object_type.is_none());
    for ty in ObservationType::iter() {
        option(out, ty.label(), ty.label(), filters.object_type.as_deref() == Some(ty.label()));
    }
    out.push_str("    </select>\n");

    let _ = writeln!(
        out,
        r#"    <input type="search" name="search" value="{}">"#,
        escape_html(filters.search.as_deref().unwrap_or_default())
    );
    out.push_str("  </form>\n");
}

fn row(out: &mut String, row: &ObservationRow) {
    let _ = writeln!(
        out,
        r#"    <li class="observation-row" data-id="{}" data-type-class="{}">"#,
        row.id,
        escape_html(&row.type_class)
    );
    match &row.detail_url {
        Some(url) => {
            let _ = writeln!(
                out,
                r#"      <a class="object-name" href="{}">{}</a>"#,
                escape_html(url),
                escape_html(&row.object_name)
            );
        }
        None => {
            let _ = writeln!(
                out,
                r#"      <span class="object-name">{}</span>"#,
                escape_html(&row.object_name)
            );
        }
    }
    let _ = writeln!(
        out,
        r#"      <span class="object-type">{}</span> <span class="session-date">{}</span> <time title="{}">{}</time>"#,
        escape_html(&row.object_type),
        escape_html(&row.session_date),
        escape_html(&row.created_display),
        escape_html(&row.created_relative),
    );
    out.push_str("    </li>\n");
}

/// Renders the full list page.
pub fn render_list_page(page: &ListPage<'_>) -> String {
    let mut out = String::from(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Observations</title></head>\n<body>\n",
    );
    let _ = writeln!(
        out,
        r#"  <input type="hidden" name="{CSRF_FIELD}" value="{}">"#,
        escape_html(page.csrf_token)
    );
    filter_form(&mut out, page);

    let _ = writeln!(
        out,
        r#"  <p id="observation-count">{} {}</p>"#,
        page.total,
        count_label(page.total)
    );

    if page.rows.is_empty() {
        let _ = writeln!(
            out,
            r#"  <p class="empty-state">No observations yet. <a href="{}">Add your first observation</a></p>"#,
            escape_html(page.add_path)
        );
    } else {
        out.push_str("  <ul id=\"observations\">\n");
        for r in page.rows {
            row(&mut out, r);
        }
        out.push_str("  </ul>\n");
    }

    let _ = writeln!(
        out,
        r#"  <div id="load-more-sentinel" data-has-more="{}"></div>"#,
        page.has_more
    );
    if !page.has_more && !page.rows.is_empty() {
        out.push_str("  <p class=\"end-of-list\">No more observations</p>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use starlog_core::ObservationSummary;

    fn sample_row(name: &str) -> ObservationRow {
        let at = Utc.with_ymd_and_hms(2026, 1, 5, 21, 0, 0).unwrap();
        let summary = ObservationSummary {
            id: 3,
            object_type: "Star".into(),
            object_name: name.into(),
            session_slug: "observer-2026-01-05".into(),
            created_at: at,
            date_time: at,
            type_class: "star".into(),
        };
        ObservationRow::from_summary(&summary, at)
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"M&M's"</b>"#),
            "&lt;b&gt;&quot;M&amp;M&#x27;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn page_embeds_controller_state() {
        let filters = FilterState::new("observer-2026-01-05", "Star", "veg");
        let rows = vec![sample_row("Vega <A>")];
        let sessions = vec!["observer-2026-01-05".to_string()];
        let html = render_list_page(&ListPage {
            list_path: "/observations/list/",
            add_path: "/observations/add/",
            csrf_token: "tok",
            filters: &filters,
            session_slugs: &sessions,
            rows: &rows,
            total: 1,
            has_more: true,
        });

        assert!(html.contains(r#"name="csrfmiddlewaretoken" value="tok""#));
        assert!(html.contains(r#"data-has-more="true""#));
        assert!(html.contains(r#"data-id="3" data-type-class="star""#));
        assert!(html.contains("Vega &lt;A&gt;"));
        assert!(html.contains(r#"<option value="Star" selected>"#));
        assert!(html.contains(r#"<option value="observer-2026-01-05" selected>"#));
        assert!(html.contains(r#"name="search" value="veg""#));
        assert!(html.contains("1 observation<"));
        assert!(!html.contains("No more observations"));
    }

    #[test]
    fn empty_page_links_to_add() {
        let filters = FilterState::default();
        let html = render_list_page(&ListPage {
            list_path: "/observations/list/",
            add_path: "/observations/add/",
            csrf_token: "tok",
            filters: &filters,
            session_slugs: &[],
            rows: &[],
            total: 0,
            has_more: false,
        });
        assert!(html.contains(r#"href="/observations/add/""#));
        assert!(html.contains("0 observations"));
        assert!(html.contains(r#"data-has-more="false""#));
    }
}
