//! Plain-text digest of an export envelope, rendered through Tera.

use serde::Serialize;
use tera::{Context, Tera};

use momentum_core::models::comparison::{ComparisonResult, Trend};
use momentum_core::models::export::{ExportEnvelope, ExportScope};
use momentum_core::models::score::Dimension;
use momentum_core::models::time_range::TimeRange;

use crate::error::ExportError;

const SUMMARY_TEMPLATE_NAME: &str = "summary.txt";

const SUMMARY_TEMPLATE: &str = "\
Comparison summary: {{ comparison_type }} ({{ scope }})
Generated: {{ generated_at }}
Data points: {{ data_points }}
{%- if time %}

Current window: {{ time.current_label }} ({{ time.current_count }} assessments)
Previous window: {{ time.previous_label }} ({{ time.previous_count }} assessments)
{% for row in time.rows -%}
- {{ row.dimension }}: {{ row.current }} vs {{ row.previous }} \
({{ row.difference }}, {{ row.change_rate }}%){% if row.significant %} [significant]{% endif %}
{% endfor -%}
{%- endif %}
{%- if patients %}

{% for row in patients -%}
#{{ row.rank }} {{ row.label }}: overall {{ row.overall }}, percentile {{ row.percentile }}, \
deviation {{ row.deviation }} ({{ row.record_count }} assessments)
{% endfor -%}
{%- endif %}
{%- if progress %}

{% for row in progress -%}
{{ row.patient_id }}: overall {{ row.overall_trend }} (slope {{ row.overall_slope }}), \
reliability {{ row.reliability }} over {{ row.assessment_count }} assessments
{% endfor -%}
{%- endif %}
{%- if not has_data %}

No comparison data was included in this export.
{% endif -%}
";

#[derive(Debug, Serialize)]
struct SummaryView {
    comparison_type: String,
    scope: &'static str,
    generated_at: String,
    data_points: usize,
    has_data: bool,
    time: Option<TimeView>,
    patients: Vec<PatientRow>,
    progress: Vec<ProgressRow>,
}

#[derive(Debug, Serialize)]
struct TimeView {
    current_label: String,
    previous_label: String,
    current_count: usize,
    previous_count: usize,
    rows: Vec<TimeRow>,
}

#[derive(Debug, Serialize)]
struct TimeRow {
    dimension: &'static str,
    current: String,
    previous: String,
    difference: String,
    change_rate: String,
    significant: bool,
}

#[derive(Debug, Serialize)]
struct PatientRow {
    rank: usize,
    label: String,
    overall: String,
    percentile: u32,
    deviation: String,
    record_count: usize,
}

#[derive(Debug, Serialize)]
struct ProgressRow {
    patient_id: String,
    overall_trend: &'static str,
    overall_slope: String,
    reliability: String,
    assessment_count: usize,
}

/// Render a human-readable summary of `envelope`.
pub fn render_summary(envelope: &ExportEnvelope) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(SUMMARY_TEMPLATE_NAME, SUMMARY_TEMPLATE)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let context = Context::from_serialize(summary_view(envelope))
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(SUMMARY_TEMPLATE_NAME, &context)?;
    Ok(rendered)
}

fn summary_view(envelope: &ExportEnvelope) -> SummaryView {
    let mut view = SummaryView {
        comparison_type: envelope.summary.comparison_type.to_string(),
        scope: match envelope.metadata.scope {
            ExportScope::All => "all patients",
            ExportScope::Selected => "selected patients",
        },
        generated_at: envelope.summary.generated_at.to_string(),
        data_points: envelope.summary.data_points,
        has_data: envelope.data.is_some(),
        time: None,
        patients: Vec::new(),
        progress: Vec::new(),
    };

    match &envelope.data {
        Some(ComparisonResult::Time(comparison)) => {
            let label = |range: &Option<TimeRange>| {
                range
                    .as_ref()
                    .map_or_else(|| "unspecified".to_string(), |r| r.label.clone())
            };
            view.time = Some(TimeView {
                current_label: label(&comparison.current_range),
                previous_label: label(&comparison.previous_range),
                current_count: comparison.current_count,
                previous_count: comparison.previous_count,
                rows: Dimension::ALL
                    .iter()
                    .map(|&d| TimeRow {
                        dimension: d.label(),
                        current: fixed(*comparison.current.get(d)),
                        previous: fixed(*comparison.previous.get(d)),
                        difference: signed(*comparison.difference.get(d)),
                        change_rate: signed_rate(*comparison.change_rate.get(d)),
                        significant: *comparison.significant.get(d),
                    })
                    .collect(),
            });
        }
        Some(ComparisonResult::Patients(rows)) => {
            view.patients = rows
                .iter()
                .map(|p| PatientRow {
                    rank: p.rank,
                    label: p.label.clone(),
                    overall: fixed(p.average.overall),
                    percentile: p.percentile,
                    deviation: signed(p.deviation.overall),
                    record_count: p.record_count,
                })
                .collect();
        }
        Some(ComparisonResult::Progress(rows)) => {
            view.progress = rows
                .iter()
                .map(|a| ProgressRow {
                    patient_id: a.patient_id.to_string(),
                    overall_trend: trend_label(a.trends.overall.trend),
                    overall_slope: format!("{:+.3}", a.trends.overall.slope),
                    reliability: fixed(a.reliability),
                    assessment_count: a.assessment_count,
                })
                .collect();
        }
        None => {}
    }

    view
}

fn trend_label(trend: Trend) -> &'static str {
    match trend {
        Trend::Improving => "improving",
        Trend::Declining => "declining",
        Trend::Stable => "stable",
    }
}

fn fixed(value: f64) -> String {
    format!("{value:.2}")
}

fn signed(value: f64) -> String {
    format!("{value:+.2}")
}

fn signed_rate(value: f64) -> String {
    format!("{value:+.1}")
}
