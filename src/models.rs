use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coerce::{lenient, lenient_flag, lenient_list, lenient_name, lenient_text};
use crate::error::SiteError;
use crate::filter::Named;
use crate::i18n::Bilingual;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Language {
    #[default]
    Zh,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Zh, Language::En];

    pub fn code(self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }

    /// Stored or user-supplied code, falling back to the default language.
    pub fn from_code_or_default(code: Option<&str>) -> Language {
        code.and_then(|value| value.parse().ok()).unwrap_or_default()
    }

    pub fn toggled(self) -> Language {
        match self {
            Language::Zh => Language::En,
            Language::En => Language::Zh,
        }
    }
}

impl FromStr for Language {
    type Err = SiteError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "zh" => Ok(Language::Zh),
            "en" => Ok(Language::En),
            other => Err(SiteError::UnknownLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(deserialize = "R: serde::de::DeserializeOwned")
)]
pub struct Season<R> {
    #[serde(default, deserialize_with = "lenient_name")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title_zh: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title_en: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub archived: bool,
    #[serde(default = "Vec::new", deserialize_with = "lenient_list")]
    pub records: Vec<R>,
}

impl<R> Season<R> {
    pub fn new(id: impl Into<String>) -> Self {
        Season {
            id: id.into(),
            title_zh: None,
            title_en: None,
            archived: false,
            records: Vec::new(),
        }
    }

    pub fn title(&self) -> Bilingual<'_> {
        Bilingual::new(self.title_zh.as_deref(), self.title_en.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub present: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub total: f64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub note_zh: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub note_en: Option<String>,
}

impl AttendanceRecord {
    pub fn note(&self) -> Bilingual<'_> {
        Bilingual::new(self.note_zh.as_deref(), self.note_en.as_deref())
    }
}

/// The six scored columns of a contribution record, in summation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Road,
    City,
    Merit,
    Flip,
    Violation,
    Special,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Road,
        Category::City,
        Category::Merit,
        Category::Flip,
        Category::Violation,
        Category::Special,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Road => "road",
            Category::City => "city",
            Category::Merit => "merit",
            Category::Flip => "flip",
            Category::Violation => "violation",
            Category::Special => "special",
        }
    }

    pub const fn label(self) -> Bilingual<'static> {
        let (zh, en) = match self {
            Category::Road => ("修路", "Road"),
            Category::City => ("攻城", "City"),
            Category::Merit => ("战功", "Merit"),
            Category::Flip => ("翻地", "Flip"),
            Category::Violation => ("违规", "Violation"),
            Category::Special => ("特殊贡献", "Special"),
        };
        Bilingual::new(Some(zh), Some(en))
    }

    /// Penalty columns get negative-value emphasis when rendered.
    pub fn is_penalty(self) -> bool {
        matches!(self, Category::Violation)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionRecord {
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub road: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub city: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub merit: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub flip: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub violation: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub special: f64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub tier_zh: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub tier_en: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub note_zh: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub note_en: Option<String>,
}

impl ContributionRecord {
    pub fn category(&self, category: Category) -> f64 {
        match category {
            Category::Road => self.road,
            Category::City => self.city,
            Category::Merit => self.merit,
            Category::Flip => self.flip,
            Category::Violation => self.violation,
            Category::Special => self.special,
        }
    }

    pub fn tier(&self) -> Bilingual<'_> {
        Bilingual::new(self.tier_zh.as_deref(), self.tier_en.as_deref())
    }

    pub fn note(&self) -> Bilingual<'_> {
        Bilingual::new(self.note_zh.as_deref(), self.note_en.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub role_zh: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub role_en: Option<String>,
}

impl Member {
    pub fn role(&self) -> Bilingual<'_> {
        Bilingual::new(self.role_zh.as_deref(), self.role_en.as_deref())
    }
}

impl Named for AttendanceRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for ContributionRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

pub type AttendanceSeason = Season<AttendanceRecord>;
pub type ContributionSeason = Season<ContributionRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes_parse_and_default() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!(" zh ".parse::<Language>().unwrap(), Language::Zh);
        assert!("fr".parse::<Language>().is_err());
        assert_eq!(Language::from_code_or_default(None), Language::Zh);
        assert_eq!(Language::from_code_or_default(Some("EN")), Language::Zh);
        assert_eq!(Language::from_code_or_default(Some("en")), Language::En);
        assert_eq!(Language::Zh.toggled(), Language::En);
    }

    #[test]
    fn contribution_record_tolerates_malformed_fields() {
        let record: ContributionRecord = serde_json::from_str(
            r#"{"name": "九州丨子龙", "road": "50", "city": null, "merit": "lots",
                "flip": 5, "violation": -10, "noteZh": "正常"}"#,
        )
        .unwrap();

        assert_eq!(record.road, 50.0);
        assert_eq!(record.city, 0.0);
        assert_eq!(record.merit, 0.0);
        assert_eq!(record.flip, 5.0);
        assert_eq!(record.violation, -10.0);
        assert_eq!(record.special, 0.0);
        assert_eq!(record.note_zh.as_deref(), Some("正常"));
        assert_eq!(record.tier_en, None);
    }

    #[test]
    fn season_envelope_defaults_missing_fields() {
        let season: AttendanceSeason =
            serde_json::from_str(r#"{"id": "S1", "titleEn": "Season 1"}"#).unwrap();
        assert_eq!(season.id, "S1");
        assert!(!season.archived);
        assert!(season.records.is_empty());
        assert_eq!(season.title_zh, None);
    }

    #[test]
    fn out_of_range_number_costs_only_that_field() {
        let seasons: Vec<ContributionSeason> = serde_json::from_str(
            r#"[{"id":"S1","records":[{"name":"A","road":1e400},{"name":"B","road":5}]}]"#,
        )
        .unwrap();
        let records = &seasons[0].records;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].road, 0.0);
        assert_eq!(records[1].road, 5.0);
    }

    #[test]
    fn wrongly_typed_text_and_flags_do_not_fail_the_season() {
        let seasons: Vec<ContributionSeason> = serde_json::from_str(
            r#"[{"id":"S1","titleZh":7,"archived":"yes","records":[
                {"name":null,"road":5,"tierEn":["x"]},
                {"name":123,"noteZh":false},
                {"name":"C","road":1}
            ]}]"#,
        )
        .unwrap();
        let season = &seasons[0];
        assert_eq!(season.title_zh.as_deref(), Some("7"));
        assert!(!season.archived);
        let names: Vec<&str> = season.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["", "123", "C"]);
        assert_eq!(season.records[0].road, 5.0);
        assert_eq!(season.records[0].tier_en, None);
        assert_eq!(season.records[1].note_zh.as_deref(), Some("false"));
    }

    #[test]
    fn unusable_record_lists_read_as_empty() {
        let seasons: Vec<AttendanceSeason> = serde_json::from_str(
            r#"[{"id":"S1","records":null},{"id":"S2","records":[1,{"name":"A","present":3}]}]"#,
        )
        .unwrap();
        assert!(seasons[0].records.is_empty());
        assert_eq!(seasons[1].records.len(), 1);
        assert_eq!(seasons[1].records[0].present, 3.0);

        let members: Vec<Member> =
            serde_json::from_str(r#"[{"name":"九州丨子龙","roleZh":null,"roleEn":42}]"#).unwrap();
        assert_eq!(members[0].role_zh, None);
        assert_eq!(members[0].role_en.as_deref(), Some("42"));
    }

    #[test]
    fn categories_are_in_summation_order() {
        let keys: Vec<&str> = Category::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(
            keys,
            ["road", "city", "merit", "flip", "violation", "special"]
        );
        assert!(Category::Violation.is_penalty());
        assert!(!Category::Road.is_penalty());
    }
}
