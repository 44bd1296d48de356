use std::fmt::Write;

use chrono::{DateTime, Local, TimeZone, Utc};
use linklet_core::{
    AppViewModel, FormPhase, FormView, HealthState, LinkListView, Notice, NoticeLevel, StatsStatus,
    StatsView,
};

const RULE: &str = "------------------------------------------------------------------------";

pub const HELP: &str = "\
Commands:
  url <long url>          set the URL field
  code [custom code]      set or clear the custom code
  submit                  create a short link from the form
  shorten <url> [code]    fill the form and submit in one step
  use                     adopt the existing link after a duplicate warning
  list                    show your links (cached until something changes)
  refresh                 reload the link list from the service
  delete <code>           delete a link
  stats <code>            show click statistics for a code
  health                  check that the service is reachable
  dismiss                 clear the current notice
  help                    show this text
  quit                    exit";

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "linklet | service: {}", health_label(&view.health));
    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "{}", notice_line(notice));
    }
    let _ = writeln!(out, "{RULE}");
    render_form(&mut out, &view.form);
    let _ = writeln!(out, "{RULE}");
    render_links(&mut out, &view.links);
    if view.stats.code.is_some() {
        let _ = writeln!(out, "{RULE}");
        render_stats(&mut out, &view.stats);
    }
    out
}

fn health_label(health: &HealthState) -> String {
    match health {
        HealthState::Unknown => "unknown".to_string(),
        HealthState::Checking => "checking...".to_string(),
        HealthState::Up(report) if report.version.is_empty() => "up".to_string(),
        HealthState::Up(report) => format!("up (v{})", report.version),
        HealthState::Down(reason) => format!("down ({reason})"),
    }
}

fn notice_line(notice: &Notice) -> String {
    let tag = match notice.level {
        NoticeLevel::Success => "[ok]",
        NoticeLevel::Error => "[error]",
        NoticeLevel::Warning => "[warning]",
    };
    match &notice.detail {
        Some(detail) => format!("{tag} {}: {detail}", notice.text),
        None => format!("{tag} {}", notice.text),
    }
}

fn render_form(out: &mut String, form: &FormView) {
    let _ = writeln!(out, "URL:  {}", or_dash(&form.url));
    let _ = writeln!(
        out,
        "Code: {} ({}/{})",
        or_dash(&form.custom_code),
        form.code_length,
        form.code_limit
    );
    let _ = writeln!(out, "Preview: {}", form.preview_short_url);

    match &form.phase {
        FormPhase::Submitting { .. } => {
            let _ = writeln!(out, "Creating...");
        }
        FormPhase::DuplicateFound(existing) => {
            let _ = writeln!(
                out,
                "Already shortened as {}. Type 'use' to take it.",
                existing.short_url
            );
        }
        _ => {}
    }
    if let Some(message) = &form.error_message {
        let _ = writeln!(out, "! {message}");
    }
    if let Some(short_url) = &form.created_short_url {
        let _ = writeln!(out, "Short link: {short_url}");
    }
    if !form.submitting && !form.submit_enabled && !form.url.trim().is_empty() {
        let _ = writeln!(out, "(fix the fields above before submitting)");
    }
}

fn render_links(out: &mut String, links: &LinkListView) {
    let mut header = String::from("Your links");
    if links.loading {
        header.push_str(" (loading...)");
    } else if links.stale {
        header.push_str(" (outdated, type 'list')");
    }
    let _ = writeln!(out, "{header}");

    if let Some(error) = &links.error {
        let _ = writeln!(out, "! Failed to load links: {error}");
    }
    if links.rows.is_empty() {
        if !links.loading {
            let _ = writeln!(out, "  No links yet.");
        }
        return;
    }

    let _ = writeln!(
        out,
        "  {:<12} {:<50} {:>6}  {:<16}  {:<16}",
        "CODE", "ORIGINAL", "CLICKS", "LAST CLICKED", "CREATED"
    );
    for row in &links.rows {
        let code = if row.deleting {
            format!("{} (x)", row.short_code)
        } else {
            row.short_code.clone()
        };
        let _ = writeln!(
            out,
            "  {:<12} {:<50} {:>6}  {:<16}  {:<16}",
            code,
            row.display_url,
            row.total_clicks,
            format_date(row.last_clicked),
            format_date(Some(row.created_at)),
        );
    }
}

fn render_stats(out: &mut String, stats: &StatsView) {
    let title = stats.short_url.as_deref().unwrap_or_default();
    match &stats.status {
        StatsStatus::Idle => {}
        StatsStatus::Loading => {
            let _ = writeln!(out, "Stats for {title}: loading...");
        }
        StatsStatus::NotFound => {
            let _ = writeln!(out, "Stats for {title}: no such link");
        }
        StatsStatus::Failed(reason) => {
            let _ = writeln!(out, "Stats for {title}: failed ({reason})");
        }
        StatsStatus::Loaded(link) => {
            let _ = writeln!(out, "Stats for {title}");
            let _ = writeln!(out, "  Original:     {}", link.original_url);
            let _ = writeln!(out, "  Clicks:       {}", link.total_clicks);
            let _ = writeln!(out, "  Last clicked: {}", format_date(link.last_clicked));
            let _ = writeln!(out, "  Created:      {}", format_date(Some(link.created_at)));
        }
    }
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() {
        "-"
    } else {
        text
    }
}

fn format_date(value: Option<DateTime<Utc>>) -> String {
    format_in(value, &Local)
}

fn format_in<Tz: TimeZone>(value: Option<DateTime<Utc>>, zone: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match value {
        Some(at) => at.with_timezone(zone).format("%Y-%m-%d %H:%M").to_string(),
        None => "Never".to_string(),
    }
}
