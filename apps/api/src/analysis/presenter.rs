//! Result Presenter: turns raw model markdown into dashboard data.
//!
//! Parsing is deliberately lenient: the input is model output, not a contract.
//! A missing marker yields an empty section and an unreadable score yields 0.
//! Nothing here returns an error.

use serde::Serialize;

use crate::analysis::prompts::{
    MARKER_MATCH_SCORE, MARKER_MISSING_KEYWORDS, MARKER_RECOMMENDATIONS, MARKER_RED_FLAGS,
    MARKER_STRENGTHS, MARKER_SUGGESTED_EDITS, SECTION_MARKERS,
};

/// Three-tier colour policy for the match score indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    /// score > 75
    Good,
    /// 50 < score ≤ 75
    Warning,
    /// score ≤ 50
    Poor,
}

impl ScoreTier {
    pub fn for_score(score: u32) -> Self {
        match score {
            s if s > 75 => ScoreTier::Good,
            s if s > 50 => ScoreTier::Warning,
            _ => ScoreTier::Poor,
        }
    }
}

/// The six labelled sections of an analysis, each possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSections {
    pub match_score: String,
    pub missing_keywords: String,
    pub recommendations: String,
    pub red_flags: String,
    pub strengths: String,
    pub suggested_edits: String,
}

/// Dashboard tab: score indicator plus the headline sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub match_score: u32,
    pub tier: ScoreTier,
    pub strengths: String,
    pub missing_keywords: String,
    pub sections: ReportSections,
    /// Full-report tab: the model output as returned.
    pub full_report: String,
}

pub fn present(result_markdown: &str) -> Dashboard {
    let sections = extract_sections(result_markdown);
    let match_score = parse_match_score(result_markdown);
    Dashboard {
        match_score,
        tier: ScoreTier::for_score(match_score),
        strengths: sections.strengths.clone(),
        missing_keywords: sections.missing_keywords.clone(),
        sections,
        full_report: result_markdown.to_string(),
    }
}

pub fn extract_sections(result_markdown: &str) -> ReportSections {
    ReportSections {
        match_score: extract_section(result_markdown, MARKER_MATCH_SCORE),
        missing_keywords: extract_section(result_markdown, MARKER_MISSING_KEYWORDS),
        recommendations: extract_section(result_markdown, MARKER_RECOMMENDATIONS),
        red_flags: extract_section(result_markdown, MARKER_RED_FLAGS),
        strengths: extract_section(result_markdown, MARKER_STRENGTHS),
        suggested_edits: extract_section(result_markdown, MARKER_SUGGESTED_EDITS),
    }
}

/// Text after `marker` up to the next section marker (or end of text), trimmed.
/// Empty when the marker is absent.
pub fn extract_section(result_markdown: &str, marker: &str) -> String {
    section_body(result_markdown, marker)
        .map(|body| body.trim().to_string())
        .unwrap_or_default()
}

/// Reads the digits immediately before the first `%` in the score section.
/// Anything unreadable scores 0; values above 100 (however many digits) are
/// capped at 100. Only the digits adjacent to `%` count, so `82.5%` reads as 5.
pub fn parse_match_score(result_markdown: &str) -> u32 {
    let Some(body) = section_body(result_markdown, MARKER_MATCH_SCORE) else {
        return 0;
    };
    let Some(pct) = body.find('%') else {
        return 0;
    };

    let before = body[..pct].trim_end();
    let digits_start = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i);

    match digits_start {
        // The run is all ASCII digits, so a parse failure can only be overflow.
        Some(start) => before[start..].parse::<u32>().map_or(100, |score| score.min(100)),
        None => 0,
    }
}

fn section_body<'a>(result_markdown: &'a str, marker: &str) -> Option<&'a str> {
    let start = result_markdown.find(marker)? + marker.len();
    let rest = &result_markdown[start..];
    let end = SECTION_MARKERS
        .iter()
        .filter_map(|m| rest.find(m))
        .min()
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_report() -> String {
        format!(
            "Suitable: Yes\n\n\
             {MARKER_MATCH_SCORE}\n82%\n\n\
             {MARKER_MISSING_KEYWORDS}\n- AWS\n- Docker\n\n\
             {MARKER_RECOMMENDATIONS}\nAdd cloud projects.\n\n\
             {MARKER_RED_FLAGS}\nNone\n\n\
             {MARKER_STRENGTHS}\n- 5 years Python\n\n\
             {MARKER_SUGGESTED_EDITS}\nBefore: some Azure\nAfter: Azure and AWS\n"
        )
    }

    #[test]
    fn test_all_sections_extracted_exactly() {
        let sections = extract_sections(&full_report());
        assert_eq!(sections.match_score, "82%");
        assert_eq!(sections.missing_keywords, "- AWS\n- Docker");
        assert_eq!(sections.recommendations, "Add cloud projects.");
        assert_eq!(sections.red_flags, "None");
        assert_eq!(sections.strengths, "- 5 years Python");
        assert_eq!(
            sections.suggested_edits,
            "Before: some Azure\nAfter: Azure and AWS"
        );
    }

    #[test]
    fn test_present_builds_dashboard() {
        let dashboard = present(&full_report());
        assert_eq!(dashboard.match_score, 82);
        assert_eq!(dashboard.tier, ScoreTier::Good);
        assert_eq!(dashboard.strengths, "- 5 years Python");
        assert_eq!(dashboard.missing_keywords, "- AWS\n- Docker");
        assert_eq!(dashboard.full_report, full_report());
    }

    #[test]
    fn test_missing_score_marker_scores_zero() {
        let md = format!("{MARKER_STRENGTHS}\nGreat at 90% of things");
        assert_eq!(parse_match_score(&md), 0);
    }

    #[test]
    fn test_non_numeric_score_is_zero() {
        let md = format!("{MARKER_MATCH_SCORE}\nabout high%\n");
        assert_eq!(parse_match_score(&md), 0);
    }

    #[test]
    fn test_score_without_percent_is_zero() {
        let md = format!("{MARKER_MATCH_SCORE}\n82\n{MARKER_MISSING_KEYWORDS}\nup 40% faster");
        assert_eq!(parse_match_score(&md), 0);
    }

    #[test]
    fn test_score_tolerates_prefix_and_space() {
        let md = format!("{MARKER_MATCH_SCORE}\n**Match: 67 %**");
        assert_eq!(parse_match_score(&md), 67);
    }

    #[test]
    fn test_score_above_hundred_is_capped() {
        let md = format!("{MARKER_MATCH_SCORE}\n140%");
        assert_eq!(parse_match_score(&md), 100);
    }

    #[test]
    fn test_overlong_score_saturates_at_hundred() {
        let md = format!("{MARKER_MATCH_SCORE}\n99999999999%");
        assert_eq!(parse_match_score(&md), 100);
    }

    #[test]
    fn test_decimal_score_reads_trailing_digits() {
        let md = format!("{MARKER_MATCH_SCORE}\n82.5%");
        assert_eq!(parse_match_score(&md), 5);
    }

    #[test]
    fn test_missing_markers_yield_empty_sections() {
        let sections = extract_sections("The model ignored the format entirely.");
        assert_eq!(sections, ReportSections::default());
    }

    #[test]
    fn test_out_of_order_sections_stop_at_next_marker() {
        let md = format!("{MARKER_STRENGTHS}\nfirst\n{MARKER_MATCH_SCORE}\n55%");
        assert_eq!(extract_section(&md, MARKER_STRENGTHS), "first");
        assert_eq!(extract_section(&md, MARKER_MATCH_SCORE), "55%");
        assert_eq!(parse_match_score(&md), 55);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ScoreTier::for_score(82), ScoreTier::Good);
        assert_eq!(ScoreTier::for_score(76), ScoreTier::Good);
        assert_eq!(ScoreTier::for_score(75), ScoreTier::Warning);
        assert_eq!(ScoreTier::for_score(60), ScoreTier::Warning);
        assert_eq!(ScoreTier::for_score(51), ScoreTier::Warning);
        assert_eq!(ScoreTier::for_score(50), ScoreTier::Poor);
        assert_eq!(ScoreTier::for_score(30), ScoreTier::Poor);
        assert_eq!(ScoreTier::for_score(0), ScoreTier::Poor);
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ScoreTier::Warning).unwrap(),
            "\"warning\""
        );
    }
}
