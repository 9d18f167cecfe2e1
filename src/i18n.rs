//! Bilingual text selection for static page text and rendered labels.
//!
//! Every piece of visible text is stored as a zh/en pair. Projection picks
//! one side for the active [`Language`] and never substitutes the other side
//! when the requested one is missing.

use crate::models::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bilingual<'a> {
    pub zh: Option<&'a str>,
    pub en: Option<&'a str>,
}

impl<'a> Bilingual<'a> {
    pub const fn new(zh: Option<&'a str>, en: Option<&'a str>) -> Self {
        Bilingual { zh, en }
    }

    pub const fn fixed(zh: &'a str, en: &'a str) -> Self {
        Bilingual {
            zh: Some(zh),
            en: Some(en),
        }
    }

    pub fn project(&self, lang: Language) -> &'a str {
        let side = match lang {
            Language::Zh => self.zh,
            Language::En => self.en,
        };
        side.unwrap_or("")
    }
}

pub const ARCHIVED_HINT: Bilingual<'static> =
    Bilingual::fixed("已归档赛季（仅查阅）", "Archived season (read-only)");
pub const ONGOING_HINT: Bilingual<'static> = Bilingual::fixed("进行中赛季", "Ongoing season");
pub const EMPTY_HINT: Bilingual<'static> = Bilingual::fixed(
    "没有匹配记录。试试搜索你的游戏名。",
    "No matching record. Try searching your in-game name.",
);

pub fn archive_hint(archived: bool, lang: Language) -> &'static str {
    if archived {
        ARCHIVED_HINT.project(lang)
    } else {
        ONGOING_HINT.project(lang)
    }
}

pub fn empty_hint(lang: Language) -> &'static str {
    EMPTY_HINT.project(lang)
}

/// Where a resolved binding lands on its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingTarget {
    Text,
    Placeholder,
    Title,
    DocumentTitle,
}

/// Declarative bilingual text attached to one page element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub key: &'static str,
    pub text: Bilingual<'static>,
    pub target: BindingTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedText {
    pub key: &'static str,
    pub target: BindingTarget,
    pub text: String,
}

pub fn resolve_binding(binding: &Binding, lang: Language) -> ResolvedText {
    ResolvedText {
        key: binding.key,
        target: binding.target,
        text: binding.text.project(lang).to_string(),
    }
}

const fn bind(key: &'static str, zh: &'static str, en: &'static str, target: BindingTarget) -> Binding {
    Binding {
        key,
        text: Bilingual::fixed(zh, en),
        target,
    }
}

pub const SITE_NAME: Binding = bind("site.name", "九州", "Jiuzhou", BindingTarget::Text);
pub const NAV_MEMBERS: Binding = bind("nav.members", "成员", "Members", BindingTarget::Text);
pub const NAV_ATTENDANCE: Binding = bind("nav.attendance", "出勤", "Attendance", BindingTarget::Text);
pub const NAV_CONTRIBUTION: Binding =
    bind("nav.contribution", "贡献", "Contribution", BindingTarget::Text);
pub const LANG_TOGGLE: Binding = bind("lang.toggle", "English", "中文", BindingTarget::Text);
pub const SEARCH_PLACEHOLDER: Binding = bind(
    "search.placeholder",
    "搜索游戏名",
    "Search in-game name",
    BindingTarget::Placeholder,
);
pub const SEASON_SELECT: Binding = bind("season.select", "选择赛季", "Select season", BindingTarget::Title);

pub const MEMBERS_TITLE: Binding =
    bind("page.members", "九州 · 成员", "Jiuzhou · Members", BindingTarget::DocumentTitle);
pub const ATTENDANCE_TITLE: Binding =
    bind("page.attendance", "九州 · 出勤", "Jiuzhou · Attendance", BindingTarget::DocumentTitle);
pub const CONTRIBUTION_TITLE: Binding = bind(
    "page.contribution",
    "九州 · 贡献",
    "Jiuzhou · Contribution",
    BindingTarget::DocumentTitle,
);

pub const GROUP_OFFICERS: Binding = bind("group.officer", "管理层", "Officers", BindingTarget::Text);
pub const GROUP_ROAD_TEAM: Binding = bind("group.road", "路队", "Road team", BindingTarget::Text);
pub const GROUP_GENERAL: Binding = bind("group.general", "成员", "Members", BindingTarget::Text);

pub const COL_RANK: Binding = bind("col.rank", "排名", "Rank", BindingTarget::Text);
pub const COL_NAME: Binding = bind("col.name", "游戏名", "Name", BindingTarget::Text);
pub const COL_PRESENT: Binding = bind("col.present", "出勤", "Present", BindingTarget::Text);
pub const COL_SESSIONS: Binding = bind("col.total", "总场次", "Sessions", BindingTarget::Text);
pub const COL_RATE: Binding = bind("col.rate", "出勤率", "Rate", BindingTarget::Text);
pub const COL_TOTAL: Binding = bind("col.score", "总分", "Total", BindingTarget::Text);
pub const COL_TIER: Binding = bind("col.tier", "评级", "Tier", BindingTarget::Text);
pub const COL_NOTE: Binding = bind("col.note", "备注", "Note", BindingTarget::Text);
