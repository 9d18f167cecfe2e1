use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::config;
use crate::error::Result;
use crate::models::{
    AttendanceRecord, AttendanceSeason, ContributionRecord, ContributionSeason, Member, Season,
};

/// Everything the site renders, loaded once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteData {
    pub members: Vec<Member>,
    pub attendance: Vec<AttendanceSeason>,
    pub contribution: Vec<ContributionSeason>,
}

/// Read and parse one JSON array resource.
pub async fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let contents = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&contents)?)
}

/// Like [`read_collection`], but any failure degrades to an empty collection.
pub async fn load_collection<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    match read_collection(path).await {
        Ok(items) => {
            info!(path = %path.display(), count = items.len(), "loaded");
            items
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "data unavailable, using empty collection");
            Vec::new()
        }
    }
}

pub async fn load_site_data(data_dir: &Path) -> SiteData {
    let members_path = config::members_path(data_dir);
    let attendance_path = config::attendance_path(data_dir);
    let contribution_path = config::contribution_path(data_dir);

    let (members, attendance, contribution) = tokio::join!(
        load_collection::<Member>(&members_path),
        load_collection::<AttendanceSeason>(&attendance_path),
        load_collection::<ContributionSeason>(&contribution_path),
    );

    SiteData {
        members,
        attendance,
        contribution,
    }
}

pub async fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut contents = serde_json::to_string_pretty(items)?;
    contents.push('\n');
    tokio::fs::write(path, contents).await?;
    Ok(())
}

/// Season collection from disk; a missing file counts as no seasons.
async fn read_seasons_or_empty<R: DeserializeOwned>(path: &Path) -> Result<Vec<Season<R>>> {
    match read_collection(path).await {
        Ok(seasons) => Ok(seasons),
        Err(crate::error::SiteError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}

/// Append CSV rows to a season of `data_path`, creating the season if needed.
///
/// CSV headers use the same names as the JSON record keys. Returns the
/// number of rows appended.
pub async fn import_csv<R>(data_path: &Path, csv_path: &Path, season_id: &str) -> Result<usize>
where
    R: DeserializeOwned + Serialize,
{
    let mut seasons: Vec<Season<R>> = read_seasons_or_empty(data_path).await?;

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize::<R>() {
        rows.push(result?);
    }
    let inserted = rows.len();

    match seasons.iter_mut().find(|season| season.id == season_id) {
        Some(season) => season.records.extend(rows),
        None => {
            let mut season = Season::new(season_id);
            season.title_zh = Some(season_id.to_string());
            season.title_en = Some(season_id.to_string());
            season.records = rows;
            seasons.push(season);
        }
    }

    write_collection(data_path, &seasons).await?;
    Ok(inserted)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RecordKind {
    Attendance,
    Contribution,
}

pub async fn import_records(
    data_dir: &Path,
    kind: RecordKind,
    csv_path: &Path,
    season_id: &str,
) -> Result<usize> {
    match kind {
        RecordKind::Attendance => {
            import_csv::<AttendanceRecord>(&config::attendance_path(data_dir), csv_path, season_id)
                .await
        }
        RecordKind::Contribution => {
            import_csv::<ContributionRecord>(
                &config::contribution_path(data_dir),
                csv_path,
                season_id,
            )
            .await
        }
    }
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn member(name: &str, role_zh: &str, role_en: &str) -> Member {
    Member {
        name: name.to_string(),
        role_zh: text(role_zh),
        role_en: text(role_en),
    }
}

fn attendance(name: &str, present: f64, total: f64, note: (&str, &str)) -> AttendanceRecord {
    AttendanceRecord {
        name: name.to_string(),
        present,
        total,
        note_zh: text(note.0),
        note_en: text(note.1),
    }
}

fn contribution(
    name: &str,
    scores: [f64; 6],
    tier: &str,
    note: (&str, &str),
) -> ContributionRecord {
    ContributionRecord {
        name: name.to_string(),
        road: scores[0],
        city: scores[1],
        merit: scores[2],
        flip: scores[3],
        violation: scores[4],
        special: scores[5],
        tier_zh: text(tier),
        tier_en: text(tier),
        note_zh: text(note.0),
        note_en: text(note.1),
    }
}

fn season<R>(id: &str, title: (&str, &str), archived: bool, records: Vec<R>) -> Season<R> {
    Season {
        id: id.to_string(),
        title_zh: text(title.0),
        title_en: text(title.1),
        archived,
        records,
    }
}

pub fn sample_data() -> SiteData {
    let s1 = ("S1 赛季（2026）", "Season S1 (2026)");
    let s2 = ("S2 赛季（进行中）", "Season S2 (Ongoing)");

    SiteData {
        members: vec![
            member("九州丨奉孝", "会长", "Guild Leader"),
            member("九州丨子龙", "路队队长", "Road team lead"),
            member("九州丨XX", "成员", "Member"),
        ],
        attendance: vec![
            season(
                "S1-2026",
                s1,
                true,
                vec![
                    attendance("九州丨奉孝", 18.0, 20.0, ("全勤奖候选", "Near-perfect")),
                    attendance("九州丨子龙", 16.0, 20.0, ("正常", "Normal")),
                    attendance("九州丨XX", 10.0, 20.0, ("需提升", "Needs improvement")),
                ],
            ),
            season(
                "S2-2026",
                s2,
                false,
                vec![
                    attendance("九州丨奉孝", 7.0, 8.0, ("优秀", "Excellent")),
                    attendance("九州丨子龙", 6.0, 8.0, ("正常", "Normal")),
                    attendance("九州丨XX", 3.0, 8.0, ("待改进", "Improve")),
                ],
            ),
        ],
        contribution: vec![
            season(
                "S1-2026",
                s1,
                true,
                vec![
                    contribution(
                        "九州丨奉孝",
                        [400.0, 500.0, 200.0, 100.0, 0.0, 0.0],
                        "A",
                        ("稳定输出", "Consistent"),
                    ),
                    contribution(
                        "九州丨子龙",
                        [500.0, 200.0, 100.0, 60.0, 0.0, 0.0],
                        "B",
                        ("正常", "Normal"),
                    ),
                    contribution(
                        "九州丨XX",
                        [150.0, 100.0, 50.0, 20.0, -20.0, 0.0],
                        "C",
                        ("需提升", "Needs improvement"),
                    ),
                ],
            ),
            season(
                "S2-2026",
                s2,
                false,
                vec![
                    contribution(
                        "九州丨奉孝",
                        [120.0, 200.0, 80.0, 20.0, 0.0, 0.0],
                        "A",
                        ("优秀", "Excellent"),
                    ),
                    contribution(
                        "九州丨子龙",
                        [180.0, 50.0, 30.0, 0.0, 0.0, 0.0],
                        "B",
                        ("正常", "Normal"),
                    ),
                    contribution(
                        "九州丨XX",
                        [60.0, 20.0, 10.0, 10.0, -10.0, 0.0],
                        "C",
                        ("待改进", "Improve"),
                    ),
                ],
            ),
        ],
    }
}

/// Write the sample data files. Existing files are kept unless `force`.
pub async fn seed(data_dir: &Path, force: bool) -> Result<Vec<PathBuf>> {
    let data = sample_data();
    let mut written = Vec::new();

    let members_path = config::members_path(data_dir);
    if force || !tokio::fs::try_exists(&members_path).await? {
        write_collection(&members_path, &data.members).await?;
        written.push(members_path);
    }

    let attendance_path = config::attendance_path(data_dir);
    if force || !tokio::fs::try_exists(&attendance_path).await? {
        write_collection(&attendance_path, &data.attendance).await?;
        written.push(attendance_path);
    }

    let contribution_path = config::contribution_path(data_dir);
    if force || !tokio::fs::try_exists(&contribution_path).await? {
        write_collection(&contribution_path, &data.contribution).await?;
        written.push(contribution_path);
    }

    Ok(written)
}
