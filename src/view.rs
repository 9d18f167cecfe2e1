//! Composition of ranking, filtering and projection into display rows.
//!
//! Attendance and contribution tables run through the same pipeline,
//! parameterized by [`SeasonRecord`]. Rendering is pure: identical inputs
//! always produce identical views, and the season data is only borrowed.

use crate::coerce::{displays_negative, format_number};
use crate::filter::{filter_by_name, Named};
use crate::i18n::{self, Binding};
use crate::models::{
    AttendanceRecord, Category, ContributionRecord, Language, Member, Season,
};
use crate::roles::{classify, RoleCategory};
use crate::scoring::{attendance_rate, rank};

/// Per-view controls: chosen season and search keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub season_id: Option<String>,
    pub keyword: String,
}

impl Selection {
    pub fn new(season_id: Option<&str>, keyword: &str) -> Self {
        Selection {
            season_id: season_id.map(str::to_string),
            keyword: keyword.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonOption {
    pub index: usize,
    pub id: String,
    pub title: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub negative: bool,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Cell {
            text: text.into(),
            negative: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub name: String,
    pub rank: Option<usize>,
    pub top: bool,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub season_options: Vec<SeasonOption>,
    pub selected: Option<String>,
    pub archive_hint: String,
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
    pub empty_hint: Option<String>,
}

/// A record in its season's display order, carrying any rank it earned.
#[derive(Debug, Clone, PartialEq)]
pub struct Placed<'a, R> {
    pub rank: Option<usize>,
    pub top: bool,
    pub total: Option<f64>,
    pub record: &'a R,
}

impl<R: Named> Named for Placed<'_, R> {
    fn name(&self) -> &str {
        self.record.name()
    }
}

/// A record kind that can be shown in a season table.
pub trait SeasonRecord: Named + Sized {
    const COLUMNS: &'static [Binding];

    /// Order the full season. Runs before any keyword filter.
    fn place(records: &[Self]) -> Vec<Placed<'_, Self>>;

    fn cells(placed: &Placed<'_, Self>, lang: Language) -> Vec<Cell>;
}

const ATTENDANCE_COLUMNS: &[Binding] = &[
    i18n::COL_NAME,
    i18n::COL_PRESENT,
    i18n::COL_SESSIONS,
    i18n::COL_RATE,
    i18n::COL_NOTE,
];

impl SeasonRecord for AttendanceRecord {
    const COLUMNS: &'static [Binding] = ATTENDANCE_COLUMNS;

    fn place(records: &[Self]) -> Vec<Placed<'_, Self>> {
        records
            .iter()
            .map(|record| Placed {
                rank: None,
                top: false,
                total: None,
                record,
            })
            .collect()
    }

    fn cells(placed: &Placed<'_, Self>, lang: Language) -> Vec<Cell> {
        let record = placed.record;
        vec![
            Cell::plain(record.name.as_str()),
            Cell::plain(format_number(record.present)),
            Cell::plain(format_number(record.total)),
            Cell::plain(format!("{}%", attendance_rate(record))),
            Cell::plain(record.note().project(lang)),
        ]
    }
}

const CONTRIBUTION_COLUMNS: &[Binding] = &[
    i18n::COL_RANK,
    i18n::COL_NAME,
    Binding {
        key: "col.road",
        text: Category::Road.label(),
        target: i18n::BindingTarget::Text,
    },
    Binding {
        key: "col.city",
        text: Category::City.label(),
        target: i18n::BindingTarget::Text,
    },
    Binding {
        key: "col.merit",
        text: Category::Merit.label(),
        target: i18n::BindingTarget::Text,
    },
    Binding {
        key: "col.flip",
        text: Category::Flip.label(),
        target: i18n::BindingTarget::Text,
    },
    Binding {
        key: "col.violation",
        text: Category::Violation.label(),
        target: i18n::BindingTarget::Text,
    },
    Binding {
        key: "col.special",
        text: Category::Special.label(),
        target: i18n::BindingTarget::Text,
    },
    i18n::COL_TOTAL,
    i18n::COL_TIER,
    i18n::COL_NOTE,
];

impl SeasonRecord for ContributionRecord {
    const COLUMNS: &'static [Binding] = CONTRIBUTION_COLUMNS;

    fn place(records: &[Self]) -> Vec<Placed<'_, Self>> {
        rank(records)
            .into_iter()
            .map(|ranked| Placed {
                rank: Some(ranked.rank),
                top: ranked.top,
                total: Some(ranked.total),
                record: ranked.record,
            })
            .collect()
    }

    fn cells(placed: &Placed<'_, Self>, lang: Language) -> Vec<Cell> {
        let record = placed.record;
        let mut cells = Vec::with_capacity(CONTRIBUTION_COLUMNS.len());
        cells.push(Cell::plain(
            placed.rank.map(|rank| rank.to_string()).unwrap_or_default(),
        ));
        cells.push(Cell::plain(record.name.as_str()));
        for category in Category::ALL {
            let value = record.category(category);
            cells.push(Cell {
                text: format_number(value),
                negative: category.is_penalty() && displays_negative(value),
            });
        }
        cells.push(Cell::plain(format_number(placed.total.unwrap_or_default())));
        cells.push(Cell::plain(record.tier().project(lang)));
        cells.push(Cell::plain(record.note().project(lang)));
        cells
    }
}

/// Season used when the requested id matches nothing: the first.
pub fn default_season<R>(seasons: &[Season<R>]) -> Option<usize> {
    (!seasons.is_empty()).then_some(0)
}

/// Season shown before the viewer has picked one: the latest.
pub fn initial_season<R>(seasons: &[Season<R>]) -> Option<usize> {
    seasons.len().checked_sub(1)
}

/// Position of the season a selection shows. Duplicate ids resolve to the
/// first occurrence.
pub fn resolve_season<R>(seasons: &[Season<R>], season_id: Option<&str>) -> Option<usize> {
    match season_id {
        Some(id) => seasons
            .iter()
            .position(|season| season.id == id)
            .or_else(|| default_season(seasons)),
        None => initial_season(seasons),
    }
}

/// Options for the season picker; only the option at `selected` is marked.
pub fn season_options<R>(
    seasons: &[Season<R>],
    selected: Option<usize>,
    lang: Language,
) -> Vec<SeasonOption> {
    seasons
        .iter()
        .enumerate()
        .map(|(index, season)| SeasonOption {
            index,
            id: season.id.clone(),
            title: season.title().project(lang).to_string(),
            selected: selected == Some(index),
        })
        .collect()
}

pub fn render_season_view<R: SeasonRecord>(
    seasons: &[Season<R>],
    selection: &Selection,
    lang: Language,
) -> RenderedView {
    let index = resolve_season(seasons, selection.season_id.as_deref());
    render_season_at(seasons, index, &selection.keyword, lang)
}

/// Render the season at a known position, bypassing id lookup.
pub fn render_season_at<R: SeasonRecord>(
    seasons: &[Season<R>],
    index: Option<usize>,
    keyword: &str,
    lang: Language,
) -> RenderedView {
    let headers = R::COLUMNS
        .iter()
        .map(|column| column.text.project(lang).to_string())
        .collect();

    let Some((index, season)) = index.and_then(|idx| seasons.get(idx).map(|season| (idx, season)))
    else {
        return RenderedView {
            season_options: Vec::new(),
            selected: None,
            archive_hint: String::new(),
            headers,
            rows: Vec::new(),
            empty_hint: Some(i18n::empty_hint(lang).to_string()),
        };
    };

    let placed = filter_by_name(R::place(&season.records), keyword);
    let rows: Vec<Row> = placed
        .iter()
        .map(|entry| Row {
            name: entry.name().to_string(),
            rank: entry.rank,
            top: entry.top,
            cells: R::cells(entry, lang),
        })
        .collect();

    let empty_hint = rows
        .is_empty()
        .then(|| i18n::empty_hint(lang).to_string());

    RenderedView {
        season_options: season_options(seasons, Some(index), lang),
        selected: Some(season.id.clone()),
        archive_hint: i18n::archive_hint(season.archived, lang).to_string(),
        headers,
        rows,
        empty_hint,
    }
}

pub fn render_attendance(
    seasons: &[Season<AttendanceRecord>],
    selection: &Selection,
    lang: Language,
) -> RenderedView {
    render_season_view(seasons, selection, lang)
}

pub fn render_contribution(
    seasons: &[Season<ContributionRecord>],
    selection: &Selection,
    lang: Language,
) -> RenderedView {
    render_season_view(seasons, selection, lang)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRow {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberGroup {
    pub category: RoleCategory,
    pub title: String,
    pub members: Vec<MemberRow>,
}

fn group_title(category: RoleCategory) -> Binding {
    match category {
        RoleCategory::Officer => i18n::GROUP_OFFICERS,
        RoleCategory::RoadTeam => i18n::GROUP_ROAD_TEAM,
        RoleCategory::General => i18n::GROUP_GENERAL,
    }
}

/// Members split into officer, road team and general groups, input order kept.
pub fn render_members(members: &[Member], lang: Language) -> Vec<MemberGroup> {
    RoleCategory::ALL
        .iter()
        .map(|category| MemberGroup {
            category: *category,
            title: group_title(*category).text.project(lang).to_string(),
            members: members
                .iter()
                .filter(|member| classify(member) == *category)
                .map(|member| MemberRow {
                    name: member.name.clone(),
                    role: member.role().project(lang).to_string(),
                })
                .collect(),
        })
        .collect()
}
