use actix_web::{web, HttpResponse, Responder};
use chrono::{DateTime, Duration, Utc};
use common::language::Locale;
use common::model::alert::{Alert, AlertStatus, Severity};
use common::requests::admin::{FetchAlertsQuery, FetchAlertsResponse};
use log::debug;
use std::collections::BTreeMap;

const DEFAULT_LIMIT: usize = 50;

/// `GET /api/alerts`
///
/// # Returns
/// - `200 OK` with `{alerts, message?}`. `message` is set, in the requested
///   language, only when no alert matches.
/// - `400 Bad Request` for an unknown severity or status.
pub async fn process(query: web::Query<FetchAlertsQuery>) -> impl Responder {
    HttpResponse::Ok().json(fetch_alerts(&query, Utc::now()))
}

pub fn fetch_alerts(query: &FetchAlertsQuery, now: DateTime<Utc>) -> FetchAlertsResponse {
    debug!("Fetching alerts with {query:?}");
    let source = query.source.as_deref().filter(|s| !s.is_empty());
    let limit = query.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT);

    let alerts: Vec<Alert> = sample_alerts(now)
        .into_iter()
        .filter(|a| source.map_or(true, |s| a.source == s))
        .filter(|a| query.severity.map_or(true, |s| a.severity == s))
        .filter(|a| query.status.map_or(true, |s| a.status == s))
        .take(limit)
        .collect();

    let message = alerts.is_empty().then(|| {
        let filtered = source.is_some() || query.severity.is_some() || query.status.is_some();
        let locale = Locale::from_code(query.language.as_deref().unwrap_or_default());
        no_alerts_message(locale, filtered)
    });
    FetchAlertsResponse { alerts, message }
}

fn no_alerts_message(locale: Locale, filtered: bool) -> String {
    let (base, criteria) = match locale {
        Locale::Spanish => ("No se encontraron alertas", " que coincidan con sus criterios"),
        Locale::Portuguese => ("Nenhum alerta encontrado", " correspondente aos seus critérios"),
        Locale::English => ("No alerts found", " matching your criteria"),
    };
    if filtered {
        format!("{base}{criteria}.")
    } else {
        format!("{base}.")
    }
}

fn sample_alerts(now: DateTime<Utc>) -> Vec<Alert> {
    let alert = |id: &str,
                 hours_ago: i64,
                 severity: Severity,
                 description: &str,
                 source: &str,
                 status: AlertStatus,
                 details: &[(&str, &str)]| Alert {
        id: id.to_string(),
        timestamp: now - Duration::hours(hours_ago),
        severity,
        description: description.to_string(),
        source: source.to_string(),
        status,
        details: (!details.is_empty()).then(|| {
            details
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>()
        }),
    };
    vec![
        alert(
            "alert-001",
            0,
            Severity::High,
            "Unauthorized access detected at Main Entrance.",
            "cam-001",
            AlertStatus::New,
            &[("location", "Building A, Floor 1")],
        ),
        alert(
            "alert-002",
            1,
            Severity::Medium,
            "Perimeter breach on West Fence.",
            "cam-005",
            AlertStatus::Acknowledged,
            &[("zone", "Zone D")],
        ),
        alert(
            "alert-003",
            2,
            Severity::Low,
            "Low battery on sensor S-102.",
            "sensor-S-102",
            AlertStatus::New,
            &[],
        ),
        alert(
            "alert-004",
            3,
            Severity::Critical,
            "System offline: Core Processing Unit.",
            "system-cpu-1",
            AlertStatus::Resolved,
            &[("resolutionNotes", "Restarted unit.")],
        ),
        alert(
            "alert-005",
            4,
            Severity::High,
            "Unattended package found in Lobby.",
            "cam-002",
            AlertStatus::New,
            &[("packageType", "Backpack")],
        ),
    ]
}
