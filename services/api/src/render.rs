use admission_match::matching::{
    AdmissionRound, BrowseResult, CanonicalMatch, FitTier, StrategyReport,
};
use chrono::NaiveDate;

pub(crate) fn format_cutoffs(item: &CanonicalMatch) -> String {
    let rounds: Vec<String> = AdmissionRound::ordered()
        .into_iter()
        .map(|round| match item.cutoffs.get(round) {
            Some(value) => format!("{} {:.2}", round.label(), value),
            None => format!("{} -", round.label()),
        })
        .collect();
    rounds.join(", ")
}

pub(crate) fn browse_lines(result: &BrowseResult, student_score: f64) -> Vec<String> {
    let mut lines = vec![
        format!("Matches for score {:.2}", student_score),
        format!(
            "Showing {}-{} of {} (page {} of {}), {} eligible",
            result.page.first_index,
            result.page.last_index,
            result.page.total_count,
            result.page.current_page,
            result.page.total_pages,
            result.eligible_count
        ),
    ];

    if result.matches.is_empty() {
        lines.push("No matches for the current filters".to_string());
        return lines;
    }

    for (offset, item) in result.matches.iter().enumerate() {
        let marker = if item.eligible { "eligible" } else { "not eligible" };
        lines.push(format!(
            "{}. {} ({}) - {} [{}], {}: {}",
            result.page.first_index + offset,
            item.institution,
            item.city,
            item.program,
            item.category,
            marker,
            format_cutoffs(item)
        ));
    }

    lines
}

pub(crate) fn strategy_lines(report: &StrategyReport, today: NaiveDate) -> Vec<String> {
    let mut lines = vec![format!(
        "Admission strategy for score {:.2} (generated {})",
        report.student_score, today
    )];

    for tier in FitTier::ordered() {
        let matches = report.tier(tier);
        lines.push(String::new());
        lines.push(format!("{} ({})", tier.title(), matches.len()));
        lines.push(tier.description().to_string());

        for item in matches {
            let marker = if item.far_below {
                " [Too Low Cutoff for You]"
            } else {
                ""
            };
            lines.push(format!(
                "- {} - {}: cutoff {:.2}, gap {:+.2}, ratio {:.2}{}",
                item.canonical.institution,
                item.canonical.program,
                item.best_cutoff,
                item.cutoff_gap,
                item.quality_ratio,
                marker
            ));
        }
    }

    lines
}
