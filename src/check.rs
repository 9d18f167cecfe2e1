use std::collections::HashSet;
use std::fmt::Write;
use std::path::Path;

use serde_json::Value;

use crate::coerce::is_malformed;
use crate::config;
use crate::data::read_collection;
use crate::models::Category;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Unavailable {
        file: &'static str,
        reason: String,
    },
    DuplicateSeason {
        file: &'static str,
        season_id: String,
    },
    MalformedNumber {
        file: &'static str,
        season_id: String,
        name: String,
        field: &'static str,
    },
}

const ATTENDANCE_NUMERIC: &[&str] = &["present", "total"];

fn contribution_numeric() -> Vec<&'static str> {
    Category::ALL.iter().map(|category| category.key()).collect()
}

fn check_seasons(file: &'static str, seasons: &[Value], numeric: &[&'static str]) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut seen = HashSet::new();

    for season in seasons {
        let season_id = season
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        if !seen.insert(season_id.clone()) {
            findings.push(Finding::DuplicateSeason {
                file,
                season_id: season_id.clone(),
            });
        }

        let records = season
            .get("records")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for record in records {
            let name = record
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default();
            for field in numeric.iter().copied() {
                if record.get(field).is_some_and(is_malformed) {
                    findings.push(Finding::MalformedNumber {
                        file,
                        season_id: season_id.clone(),
                        name: name.to_string(),
                        field,
                    });
                }
            }
        }
    }

    findings
}

async fn check_file(
    path: &Path,
    file: &'static str,
    numeric: &[&'static str],
    findings: &mut Vec<Finding>,
) {
    match read_collection::<Value>(path).await {
        Ok(seasons) => findings.extend(check_seasons(file, &seasons, numeric)),
        Err(err) => findings.push(Finding::Unavailable {
            file,
            reason: err.to_string(),
        }),
    }
}

/// Inspect the data directory for problems that rendering silently absorbs.
pub async fn check_data(data_dir: &Path) -> Vec<Finding> {
    let mut findings = Vec::new();

    if let Err(err) = read_collection::<Value>(&config::members_path(data_dir)).await {
        findings.push(Finding::Unavailable {
            file: config::MEMBERS_FILE,
            reason: err.to_string(),
        });
    }

    check_file(
        &config::attendance_path(data_dir),
        config::ATTENDANCE_FILE,
        ATTENDANCE_NUMERIC,
        &mut findings,
    )
    .await;
    check_file(
        &config::contribution_path(data_dir),
        config::CONTRIBUTION_FILE,
        &contribution_numeric(),
        &mut findings,
    )
    .await;

    findings
}

pub fn format_findings(findings: &[Finding]) -> String {
    let mut output = String::new();
    if findings.is_empty() {
        let _ = writeln!(output, "Data files look good.");
        return output;
    }

    for finding in findings {
        let _ = match finding {
            Finding::Unavailable { file, reason } => {
                writeln!(output, "- {file}: unavailable ({reason})")
            }
            Finding::DuplicateSeason { file, season_id } => {
                writeln!(output, "- {file}: duplicate season id {season_id}")
            }
            Finding::MalformedNumber {
                file,
                season_id,
                name,
                field,
            } => writeln!(
                output,
                "- {file}: {season_id} / {name}: `{field}` is not a number, counted as 0"
            ),
        };
    }
    output
}
