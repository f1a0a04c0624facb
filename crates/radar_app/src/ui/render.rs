use std::fmt::Write;

use radar_core::{
    truncate_text, AnalyzerViewModel, BackendStatusView, Findings, FormView, InputType,
    ReportView, ScoreBand, ScoreView, SourceView, DEFAULT_TRUNCATE_LENGTH,
};

use super::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    pub color: bool,
}

/// Full screen for the interactive session: form, then error or report.
pub fn render(view: &AnalyzerViewModel, style: RenderStyle) -> String {
    let mut out = render_form(&view.form);
    if let BackendStatusView::Unavailable { reason } = &view.backend {
        let _ = writeln!(out, "Backend: unavailable ({reason})");
    }
    out.push_str(&render_outcome(view, style));
    out
}

/// Error line or analysis report; empty while neither is present.
pub fn render_outcome(view: &AnalyzerViewModel, style: RenderStyle) -> String {
    let mut out = String::new();
    if let Some(error) = &view.error {
        let _ = writeln!(out, "{}", paint(&format!("Error: {error}"), ANSI_RED, style));
    }
    if let Some(report) = &view.report {
        out.push_str(&render_report(report, style));
    }
    out
}

pub fn render_backend(backend: &BackendStatusView) -> String {
    match backend {
        BackendStatusView::Unknown => "Backend: unknown".to_string(),
        BackendStatusView::Available {
            model_name,
            model_version,
        } => format!(
            "Backend: available (model {} {})",
            model_name.as_deref().unwrap_or("unnamed"),
            model_version.as_deref().unwrap_or("unversioned")
        ),
        BackendStatusView::Unavailable { reason } => format!("Backend: unavailable ({reason})"),
    }
}

fn render_form(form: &FormView) -> String {
    let mut out = String::new();
    let input = match form.input_type {
        InputType::Text if form.input_content.is_empty() => "(empty)".to_string(),
        InputType::Text => truncate_text(&form.input_content, DEFAULT_TRUNCATE_LENGTH),
        InputType::Url if form.url.is_empty() => "(empty)".to_string(),
        InputType::Url => form.url.clone(),
    };
    let _ = writeln!(out, "[{}] {}", form.input_type, input);
    if form.is_analyzing {
        let _ = writeln!(out, "Analyzing...");
    }
    out
}

fn render_report(report: &ReportView, style: RenderStyle) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Analysis Results");
    let _ = writeln!(out);

    if let Some(source) = &report.source {
        out.push_str(&render_source(source));
        let _ = writeln!(out);
    }

    out.push_str(&render_score(&report.score, style));
    let _ = writeln!(out);

    match &report.findings {
        Findings::NoIssues => {
            let _ = writeln!(out, "{}", paint(NO_ISSUES_TITLE, ANSI_GREEN, style));
            let _ = writeln!(out, "{NO_ISSUES_MESSAGE}");
        }
        Findings::Segments(segments) => {
            let _ = writeln!(out, "Highlighted Segments");
            for (position, segment) in segments.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{}. {} ({} Confidence)",
                    position + 1,
                    paint(SEGMENT_TITLE, ANSI_RED, style),
                    segment.confidence_label
                );
                let _ = writeln!(out, "   \"{}\"", segment.text);
                let _ = writeln!(out, "   {}", paint(&segment.reason, ANSI_DIM, style));
            }
        }
    }
    out
}

fn render_source(source: &SourceView) -> String {
    let mut out = String::new();
    if let Some(title) = &source.title {
        let _ = writeln!(out, "{title}");
    }
    let _ = writeln!(out, "{}", source.url);
    let fields = [
        ("Published", &source.published_date),
        ("Author", &source.author),
        ("Source", &source.source),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            let _ = writeln!(out, "{label}: {value}");
        }
    }
    out
}

fn render_score(score: &ScoreView, style: RenderStyle) -> String {
    let color = band_color(score.band);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Credibility Score: {}",
        paint(
            &format!("{} - {}", score.percent_label, score.category.label()),
            color,
            style
        )
    );
    let _ = writeln!(out, "[{}]", paint(&score_bar(score.fill), color, style));
    out
}

fn score_bar(fill: f64) -> String {
    let filled = ((fill * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    let mut bar = String::with_capacity(BAR_WIDTH * BAR_FILLED.len_utf8());
    bar.extend(std::iter::repeat(BAR_FILLED).take(filled));
    bar.extend(std::iter::repeat(BAR_EMPTY).take(BAR_WIDTH - filled));
    bar
}

fn band_color(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::High => ANSI_GREEN,
        ScoreBand::Medium => ANSI_YELLOW,
        ScoreBand::Low => ANSI_RED,
    }
}

fn paint(text: &str, color: &str, style: RenderStyle) -> String {
    if style.color {
        format!("{color}{text}{ANSI_RESET}")
    } else {
        text.to_string()
    }
}
