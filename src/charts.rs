//! Chart-ready record derivation for the doctor-facing report.
//!
//! The renderer is a black box that consumes these finalized records; this
//! module only transforms questionnaire data. Severity colors follow the
//! report's traffic-light buckets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{HealthMetrics, PatientQuestionnaire, Symptom};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub severity: u8,
    pub symptom: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapRow {
    pub location: String,
    pub intensity: u8,
    pub episodes: u32,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarAxis {
    pub dimension: String,
    pub score: u8,
    pub max_score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeBar {
    pub week: String,
    pub episodes: u32,
    pub severity: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub symptom_timeline: Vec<TimelinePoint>,
    pub pain_heatmap: Vec<HeatmapRow>,
    pub health_radar: Vec<RadarAxis>,
    pub episodes_by_week: Vec<EpisodeBar>,
}

/// Severity color buckets: ≤3 green, ≤6 yellow, ≤8 orange, else red.
pub fn severity_color(severity: u8) -> &'static str {
    match severity {
        0..=3 => "#10B981",
        4..=6 => "#F59E0B",
        7..=8 => "#F97316",
        _ => "#DC2626",
    }
}

pub fn symptom_timeline(symptoms: &[Symptom], date: NaiveDate) -> Vec<TimelinePoint> {
    symptoms
        .iter()
        .filter(|s| s.has_type())
        .map(|s| TimelinePoint {
            date,
            severity: s.severity,
            symptom: s.symptom_type.clone(),
        })
        .collect()
}

pub fn pain_heatmap(symptoms: &[Symptom]) -> Vec<HeatmapRow> {
    symptoms
        .iter()
        .filter(|s| s.has_type())
        .map(|s| HeatmapRow {
            location: s.symptom_type.clone(),
            intensity: s.severity,
            episodes: 1,
            color: severity_color(s.severity).to_string(),
        })
        .collect()
}

/// Six radar axes; anxiety and stress are inverted so that higher is better
/// on every axis.
pub fn health_radar(metrics: &HealthMetrics) -> Vec<RadarAxis> {
    let axis = |dimension: &str, score: u8| RadarAxis {
        dimension: dimension.to_string(),
        score,
        max_score: 10,
    };
    vec![
        axis("Sleep Quality", metrics.sleep.quality),
        axis("Mood", metrics.mood.overall),
        axis("Energy Level", metrics.energy.level),
        axis("Appetite", metrics.appetite.level),
        axis("Anxiety (Inverted)", 11 - metrics.mood.anxiety),
        axis("Stress (Inverted)", 11 - metrics.mood.stress),
    ]
}

/// Distribute symptoms round-robin over four display weeks, with the
/// average severity of each bucket.
pub fn episodes_by_week(symptoms: &[Symptom]) -> Vec<EpisodeBar> {
    let typed: Vec<&Symptom> = symptoms.iter().filter(|s| s.has_type()).collect();
    (0..4)
        .map(|week| {
            let bucket: Vec<&&Symptom> =
                typed.iter().skip(week).step_by(4).collect();
            let episodes = bucket.len() as u32;
            let severity = if bucket.is_empty() {
                0.0
            } else {
                bucket.iter().map(|s| s.severity as f32).sum::<f32>() / episodes as f32
            };
            EpisodeBar {
                week: format!("Week {}", week + 1),
                episodes,
                severity,
            }
        })
        .collect()
}

/// Weighted overall health score, 1..=10: sleep 0.30, mood 0.25,
/// energy 0.25, appetite 0.20.
pub fn health_score(metrics: &HealthMetrics) -> u8 {
    let weighted = metrics.sleep.quality as f32 * 0.30
        + metrics.mood.overall as f32 * 0.25
        + metrics.energy.level as f32 * 0.25
        + metrics.appetite.level as f32 * 0.20;
    weighted.round() as u8
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymptomTrends {
    pub improving: Vec<String>,
    pub worsening: Vec<String>,
    pub stable: Vec<String>,
}

/// Classify each symptom by comparing the average severity of its last
/// seven points against its first seven; changes beyond ±1 count as a
/// trend, anything shorter or flatter is stable.
pub fn symptom_trends(timeline: &[TimelinePoint]) -> SymptomTrends {
    use std::collections::BTreeMap;

    let mut grouped: BTreeMap<&str, Vec<&TimelinePoint>> = BTreeMap::new();
    for point in timeline {
        grouped.entry(&point.symptom).or_default().push(point);
    }

    let mut trends = SymptomTrends::default();
    for (symptom, mut points) in grouped {
        points.sort_by_key(|p| p.date);
        let recent: Vec<&&TimelinePoint> = points.iter().rev().take(7).collect();
        let earlier: Vec<&&TimelinePoint> = points.iter().take(7).collect();
        if recent.len() < 2 || earlier.len() < 2 {
            trends.stable.push(symptom.to_string());
            continue;
        }
        let avg = |set: &[&&TimelinePoint]| {
            set.iter().map(|p| p.severity as f32).sum::<f32>() / set.len() as f32
        };
        let change = avg(&recent) - avg(&earlier);
        if change < -1.0 {
            trends.improving.push(symptom.to_string());
        } else if change > 1.0 {
            trends.worsening.push(symptom.to_string());
        } else {
            trends.stable.push(symptom.to_string());
        }
    }
    trends
}

/// Everything the report renderer needs, derived in one pass.
pub fn build_chart_data(questionnaire: &PatientQuestionnaire) -> ChartData {
    let date = questionnaire.submission_date.date_naive();
    ChartData {
        symptom_timeline: symptom_timeline(&questionnaire.symptoms, date),
        pain_heatmap: pain_heatmap(&questionnaire.symptoms),
        health_radar: health_radar(&questionnaire.health_metrics),
        episodes_by_week: episodes_by_week(&questionnaire.symptoms),
    }
}
