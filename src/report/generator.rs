//! Markdown and JSON rendering of dashboard views.

use super::{view_subtitle, DashboardReport, InsightSection, MembersSection, OverviewSection};
use crate::analysis::stress_gauge;
use crate::app::ActionState;
use crate::cli::View;
use crate::models::{Member, MemberDetail, Status};
use anyhow::Result;

/// Width of the status distribution bars, in characters.
const BAR_WIDTH: usize = 20;

const QUICK_TIP: &str =
    "Engage your At-Risk members with a personalized 'Sleep Wellness' newsletter this week.";

/// Generate a complete Markdown rendering of the report's view.
pub fn generate_markdown_report(report: &DashboardReport) -> String {
    let mut output = String::new();

    let view = if report.members.is_some() {
        View::Members
    } else if report.insights.is_some() {
        View::Insights
    } else {
        View::Dashboard
    };

    // Title
    output.push_str(&format!("# {}\n\n", report.metadata.view));
    output.push_str(&format!("_{}_\n\n", view_subtitle(view)));

    if let Some(ref overview) = report.overview {
        output.push_str(&generate_overview_section(overview));
    }
    if let Some(ref members) = report.members {
        output.push_str(&generate_members_section(members));
    }
    if let Some(ref insights) = report.insights {
        output.push_str(&generate_insights_section(insights));
    }

    // Footer
    output.push_str(&generate_footer(report));

    output
}

/// Generate the dashboard tab: cards, trend, distribution, recent activity.
fn generate_overview_section(overview: &OverviewSection) -> String {
    let mut section = String::new();
    let stats = &overview.stats;

    section.push_str("## Overview\n\n");
    section.push_str("| Total Members | Active Members | Engagement Score | Top Interest |\n");
    section.push_str("|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {}% | {} |\n\n",
        stats.total_members,
        stats.active_participation,
        stats.avg_engagement_score,
        stats.top_condition_concern
    ));

    if !overview.trends.is_empty() {
        section.push_str("## Community Engagement Trend\n\n");
        section.push_str("| Day | Steps | Sleep | Engagement |\n");
        section.push_str("|:---|---:|---:|---:|\n");
        for point in &overview.trends {
            section.push_str(&format!(
                "| {} | {} | {}h | {} |\n",
                point.date,
                format_thousands(point.steps),
                point.sleep,
                point.engagement
            ));
        }
        section.push('\n');
    }

    section.push_str("## Status Distribution\n\n");
    section.push_str(&format!(
        "_{} members_\n\n",
        overview.distribution.total()
    ));
    section.push_str("| Status | Members | Share | |\n");
    section.push_str("|:---|:---:|---:|:---|\n");
    for (status, bucket) in overview.distribution.iter() {
        section.push_str(&format!(
            "| {} {} | {} members | {:.0}% | `{}` |\n",
            status.emoji(),
            status,
            bucket.count,
            bucket.percentage,
            percentage_bar(bucket.percentage, BAR_WIDTH)
        ));
    }
    section.push('\n');

    section.push_str(&format!("> **Quick Tip:** {}\n\n", QUICK_TIP));

    section.push_str("## Recent Activity\n\n");
    if overview.recent_activity.is_empty() {
        section.push_str("No members yet.\n\n");
        return section;
    }
    section.push_str("| Member | Last Activity | Daily Steps | Stress Level | Status |\n");
    section.push_str("|:---|:---|---:|:---|:---|\n");
    for member in &overview.recent_activity {
        section.push_str(&generate_activity_row(
            member,
            overview.stress_gauge_segments,
        ));
    }
    section.push('\n');

    section
}

fn generate_activity_row(member: &Member, gauge_segments: usize) -> String {
    format!(
        "| {} | {} | {} | `{}` | {} |\n",
        table_cell(&member.name),
        table_cell(&member.last_activity),
        format_thousands(member.metrics.avg_steps),
        gauge(member.metrics.stress_level, gauge_segments),
        status_badge(member.status)
    )
}

/// Generate the members tab: roster list, profile card and AI tip.
fn generate_members_section(members: &MembersSection) -> String {
    let mut section = String::new();

    section.push_str("## Community Members\n\n");
    let counts: Vec<String> = members
        .by_status
        .iter()
        .map(|(status, ids)| format!("{} {}: {}", status.emoji(), status, ids.len()))
        .collect();
    section.push_str(&format!("{}\n\n", counts.join(" • ")));
    if members.members.is_empty() {
        section.push_str("No members yet.\n\n");
    } else {
        section.push_str("| | Member | Email | Status |\n");
        section.push_str("|:---:|:---|:---|:---|\n");
        let selected_id = members.selected.as_ref().map(|d| d.id.as_str());
        for member in &members.members {
            let marker = if Some(member.id.as_str()) == selected_id {
                "▶"
            } else {
                ""
            };
            section.push_str(&format!(
                "| {} | {} (`{}`) | {} | {} |\n",
                marker,
                table_cell(&member.name),
                table_cell(&member.id),
                table_cell(&member.email),
                status_badge(member.status)
            ));
        }
        section.push('\n');
    }

    match members.selected {
        Some(ref detail) => {
            section.push_str(&generate_profile_card(detail));
            section.push_str(&generate_tip_block(&members.tip));
        }
        None => {
            section.push_str("_Select a member to view their profile and get AI insights._\n\n");
        }
    }

    section
}

fn generate_profile_card(detail: &MemberDetail) -> String {
    let mut card = String::new();

    card.push_str(&format!("## {}\n\n", table_cell(&detail.name)));
    card.push_str(&format!("{} years old • {}\n\n", detail.age, detail.status));
    card.push_str("| Steps | Sleep | Stress | Heart |\n");
    card.push_str("|:---:|:---:|:---:|:---:|\n");
    card.push_str(&format!(
        "| {} | {}h | {}/10 | {} bpm |\n\n",
        detail.avg_steps, detail.sleep_hours, detail.stress_level, detail.heart_rate
    ));

    card
}

fn generate_tip_block(tip: &InsightSection) -> String {
    match tip.state {
        ActionState::Idle => String::new(),
        ActionState::Loading => "_Generating AI care tip..._\n\n".to_string(),
        ActionState::Loaded { .. } | ActionState::Failed { .. } => {
            let mut block = String::from("### AI Care Tip\n\n");
            for paragraph in &tip.paragraphs {
                block.push_str(&format!("> _\"{}\"_\n", paragraph));
            }
            block.push('\n');
            block
        }
    }
}

/// Generate the insights tab: strategy report or preview cards.
fn generate_insights_section(insights: &InsightSection) -> String {
    let mut section = String::new();

    section.push_str("## AI Community Strategy\n\n");
    section.push_str(
        "Analyze patterns across your health community with a generative model. \
         Identify silent risks and discover opportunities for positive engagement.\n\n",
    );

    match insights.state {
        ActionState::Idle => {
            section.push_str("### Silent Burnout detection\n\n");
            section.push_str(
                "Analyzes step reduction and sleep irregularity to flag potential burnout before it happens.\n\n",
            );
            section.push_str("### Engagement Optimization\n\n");
            section.push_str(
                "Discover which days of the week your community is most receptive to health challenges.\n\n",
            );
            section.push_str("_Run with `--analyze` to generate a community report._\n\n");
        }
        ActionState::Loading => {
            section.push_str("_Running community analysis..._\n\n");
        }
        ActionState::Loaded { .. } | ActionState::Failed { .. } => {
            section.push_str("### AI Generated Strategy Report\n\n");
            for paragraph in &insights.paragraphs {
                section.push_str(paragraph);
                section.push_str("\n\n");
            }
        }
    }

    section
}

fn generate_footer(report: &DashboardReport) -> String {
    let mut footer = String::from("---\n\n");
    footer.push_str(&format!(
        "_Generated by WellPulse v{} on {}",
        env!("CARGO_PKG_VERSION"),
        report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if let Some(ref model) = report.metadata.model {
        footer.push_str(&format!(" • model `{}`", model));
    }
    footer.push_str("_\n");
    footer
}

/// Generate a JSON rendering of the report.
pub fn generate_json_report(report: &DashboardReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Make free text safe inside a single-line Markdown table cell.
fn table_cell(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace('|', "\\|")
}

fn status_badge(status: Status) -> String {
    format!("{} {}", status.emoji(), status)
}

/// Format an integer with comma thousands separators.
fn format_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn percentage_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn gauge(stress_level: u8, segments: usize) -> String {
    let filled = stress_gauge(stress_level, segments);
    format!("{}{}", "■".repeat(filled), "□".repeat(segments - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Dashboard;
    use crate::config::DashboardConfig;
    use crate::report::DashboardReport;
    use crate::roster::{seed_trends, RosterStore};

    fn offline_dashboard() -> Dashboard {
        Dashboard::new(
            RosterStore::seeded(),
            seed_trends(),
            DashboardConfig::default(),
            None,
        )
    }

    #[test]
    fn test_generate_dashboard_markdown() {
        let dashboard = offline_dashboard();
        let report = DashboardReport::from_dashboard(&dashboard);
        let md = generate_markdown_report(&report);

        assert!(md.starts_with("# Dashboard\n"));
        assert!(md.contains("| 5 | 3 | 84% | Sleep Hygiene |"));
        assert!(md.contains("| 🔴 At-Risk | 1 members | 20% |"));
        assert!(md.contains("| 🟢 Active | 3 members | 60% |"));
        assert!(md.contains("| Sarah Jenkins | 2 hours ago | 8,500 | `■■■□□` |"));
        assert!(md.contains("| Marcus Chen | 1 day ago | 2,100 | `■■■■■` |"));
        // Only the first four members appear in recent activity.
        assert!(!md.contains("Amara Okafor"));
        assert!(md.contains("| Sat | 11,000 | 8.5h | 95 |"));
    }

    #[test]
    fn test_generate_members_markdown() {
        let mut dashboard = offline_dashboard();
        dashboard.switch_view(View::Members);

        let md = generate_markdown_report(&DashboardReport::from_dashboard(&dashboard));
        assert!(md.contains("Select a member to view their profile"));

        dashboard.select_member("4").unwrap();
        let md = generate_markdown_report(&DashboardReport::from_dashboard(&dashboard));
        assert!(md.contains("## David Wilson"));
        assert!(md.contains("55 years old • Inactive"));
        assert!(md.contains("| 4500 | 6.5h | 5/10 | 75 bpm |"));
        assert!(md.contains("| ▶ | David Wilson (`4`)"));
        assert!(!md.contains("AI Care Tip"));
    }

    #[test]
    fn test_generate_insights_markdown_idle() {
        let mut dashboard = offline_dashboard();
        dashboard.switch_view(View::Insights);

        let md = generate_markdown_report(&DashboardReport::from_dashboard(&dashboard));
        assert!(md.contains("# Insights"));
        assert!(md.contains("### Silent Burnout detection"));
        assert!(!md.contains("AI Generated Strategy Report"));
    }

    #[test]
    fn test_insight_paragraphs_rendered() {
        let section = InsightSection::from(&ActionState::Loaded {
            text: "First point.\n\nSecond point.".to_string(),
        });
        let md = generate_insights_section(&section);

        assert!(md.contains("### AI Generated Strategy Report\n\nFirst point.\n\nSecond point.\n\n"));
    }

    #[test]
    fn test_generate_json_report() {
        let dashboard = offline_dashboard();
        let report = DashboardReport::from_dashboard(&dashboard);
        let json = generate_json_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["metadata"]["view"], "Dashboard");
        assert_eq!(value["overview"]["stats"]["total_members"], 5);
        assert_eq!(value["overview"]["distribution"]["at_risk"]["count"], 1);
        assert_eq!(
            value["overview"]["recent_activity"].as_array().map(|a| a.len()),
            Some(4)
        );
        assert!(value.get("members").is_none());
    }

    #[test]
    fn test_failed_tip_json_hides_reason() {
        let section = InsightSection::from(&ActionState::Failed {
            message: "Could not generate a tip at this moment.".to_string(),
            reason: "model API error 500: boom".to_string(),
        });
        let json = serde_json::to_value(&section).unwrap();

        assert_eq!(json["state"], "failed");
        assert_eq!(json["message"], "Could not generate a tip at this moment.");
        assert!(json.get("reason").is_none());
    }

    #[test]
    fn test_table_cells_escape_pipes_and_newlines() {
        let mut member = crate::roster::seed::seed_members().remove(0);
        member.name = "Ann | Lee\nSmith".to_string();
        member.last_activity = "today\r\n| later".to_string();

        let row = generate_activity_row(&member, 5);
        assert_eq!(row.matches('\n').count(), 1);
        assert!(row.starts_with("| Ann \\| Lee Smith | today \\| later | 8,500 |"));
    }

    #[test]
    fn test_members_table_escapes_email() {
        let mut store = RosterStore::seeded();
        let mut member = crate::roster::seed::seed_members().remove(1);
        member.email = "m|chen@example.com".to_string();
        store.upsert(member).unwrap();
        let mut dashboard =
            Dashboard::new(store, seed_trends(), DashboardConfig::default(), None);
        dashboard.switch_view(View::Members);

        let md = generate_markdown_report(&DashboardReport::from_dashboard(&dashboard));
        assert!(md.contains("| Marcus Chen (`2`) | m\\|chen@example.com |"));
    }

    #[test]
    fn test_members_view_counts_by_status() {
        let mut dashboard = offline_dashboard();
        dashboard.switch_view(View::Members);

        let md = generate_markdown_report(&DashboardReport::from_dashboard(&dashboard));
        assert!(md.contains("🟢 Active: 3 • 🔴 At-Risk: 1 • ⚪ Inactive: 1"));
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(8500), "8,500");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_percentage_bar() {
        assert_eq!(percentage_bar(0.0, 10), "░░░░░░░░░░");
        assert_eq!(percentage_bar(60.0, 10), "██████░░░░");
        assert_eq!(percentage_bar(100.0, 10), "██████████");
    }
}
