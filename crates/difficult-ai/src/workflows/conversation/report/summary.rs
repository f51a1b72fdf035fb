use super::super::evaluation::{
    CoachingFeedback, Evaluation, FeedbackBundle, LegacyFeedback, LegacyScores,
    PerformanceScores, ScoreSet,
};
use std::fmt;

/// Renders a plain-text scorecard for terminal output. The layout follows the scorecard's
/// schema; mismatched score and feedback shapes render whatever each side carries.
pub fn render_summary(evaluation: &Evaluation) -> String {
    ScorecardSummary(evaluation).to_string().trim_end().to_string()
}

/// Text view of an evaluation, one section per block.
pub struct ScorecardSummary<'a>(pub &'a Evaluation);

impl fmt::Display for ScorecardSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let evaluation = self.0;
        match &evaluation.scores {
            ScoreSet::V2(scores) => write_performance_scores(f, scores)?,
            ScoreSet::V1(scores) => write_legacy_scores(f, scores)?,
        }
        match &evaluation.feedback {
            FeedbackBundle::V2(feedback) => write_coaching(f, feedback)?,
            FeedbackBundle::V1(feedback) => write_legacy_feedback(f, feedback)?,
        }
        write_key_moments(f, evaluation.feedback.key_moments())
    }
}

fn write_performance_scores(f: &mut fmt::Formatter<'_>, scores: &PerformanceScores) -> fmt::Result {
    f.write_str("PERFORMANCE SCORECARD\n=====================\n\nSCORES (1-10 scale):\n")?;
    let rows = [
        ("Clarity:", scores.clarity),
        ("Confidence:", scores.confidence),
        ("Commitment:", scores.commitment),
        ("Adaptability:", scores.adaptability),
        ("Composure:", scores.composure),
        ("Effectiveness:", scores.effectiveness),
    ];
    for (label, value) in rows {
        writeln!(f, "  {label:<16}{value:.1}/10")?;
    }
    Ok(())
}

fn write_legacy_scores(f: &mut fmt::Formatter<'_>, scores: &LegacyScores) -> fmt::Result {
    f.write_str("PERFORMANCE EVALUATION\n======================\n\n")?;
    writeln!(f, "Overall Score: {:.1}/100\n", scores.overall)?;
    f.write_str("SCORES (0-100 scale):\n")?;
    let rows = [
        ("Clarity:", scores.clarity),
        ("Confidence:", scores.confidence),
        ("Commitment:", scores.commitment),
        ("Adaptability:", scores.adaptability),
    ];
    for (label, value) in rows {
        writeln!(f, "  {label:<16}{value:.1}/100")?;
    }
    Ok(())
}

fn write_coaching(f: &mut fmt::Formatter<'_>, feedback: &CoachingFeedback) -> fmt::Result {
    f.write_str("\nCOACHING POINTS:\n")?;
    for (index, point) in feedback.coaching_points.iter().enumerate() {
        writeln!(f, "  {}. {point}", index + 1)?;
    }
    Ok(())
}

fn write_legacy_feedback(f: &mut fmt::Formatter<'_>, feedback: &LegacyFeedback) -> fmt::Result {
    write_section(f, "STRENGTHS", &feedback.strengths)?;
    write_section(f, "WEAKNESSES", &feedback.weaknesses)?;
    write_section(f, "RECOMMENDATIONS", &feedback.recommendations)
}

fn write_section(f: &mut fmt::Formatter<'_>, title: &str, lines: &[String]) -> fmt::Result {
    writeln!(f, "\n{title}:")?;
    if lines.is_empty() {
        f.write_str("  • None noted\n")?;
    }
    for line in lines {
        writeln!(f, "  • {line}")?;
    }
    Ok(())
}

fn write_key_moments(f: &mut fmt::Formatter<'_>, moments: &[String]) -> fmt::Result {
    if moments.is_empty() {
        return Ok(());
    }
    f.write_str("\nKEY MOMENTS TO REVIEW:\n")?;
    for moment in moments {
        writeln!(f, "  • {moment}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::conversation::evaluation::{evaluate, ScoreSchema};
    use crate::workflows::conversation::metrics::SessionMetricsRecord;

    fn metrics() -> SessionMetricsRecord {
        SessionMetricsRecord {
            vague_response_count: 2,
            deflection_count: 1,
            commitments_made: 1,
            total_exchanges: 4,
            current_difficulty: 0.5,
            scenario_difficulty: 0.25,
        }
    }

    #[test]
    fn performance_report_lists_six_scores_and_three_points() {
        let report = render_summary(&evaluate(ScoreSchema::V2, metrics(), None));

        assert!(report.starts_with("PERFORMANCE SCORECARD"));
        assert!(report.contains("SCORES (1-10 scale):"));
        assert!(report.contains("  Clarity:        5.5/10"));
        assert_eq!(report.matches("/10\n").count(), 6);
        assert!(report.contains("  1. "));
        assert!(report.contains("  3. "));
        assert!(!report.contains("  4. "));
        assert!(report.contains("  • Review 2 instances of vague language"));
    }

    #[test]
    fn legacy_report_carries_overall_and_feedback_sections() {
        let report = render_summary(&evaluate(ScoreSchema::V1, metrics(), None));

        assert!(report.contains("PERFORMANCE EVALUATION"));
        assert!(report.contains("Overall Score"));
        assert!(report.contains("STRENGTHS"));
        assert!(report.contains("WEAKNESSES"));
        assert!(report.contains("RECOMMENDATIONS"));
        assert!(report.ends_with("Note 1 successful commitments made"));
    }

    #[test]
    fn display_view_matches_rendered_summary_before_trimming() {
        let evaluation = evaluate(ScoreSchema::V1, SessionMetricsRecord::default(), None);
        let displayed = ScorecardSummary(&evaluation).to_string();

        assert!(displayed.ends_with('\n'));
        assert_eq!(displayed.trim_end(), render_summary(&evaluation));
        assert!(displayed.contains("  • Few concrete commitments or deliverables\n"));
        assert!(displayed.contains("Review full transcript for improvement opportunities"));
    }
}
