use crate::models::Member;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleCategory {
    Officer,
    RoadTeam,
    General,
}

impl RoleCategory {
    /// Display order of the member groups.
    pub const ALL: [RoleCategory; 3] = [
        RoleCategory::Officer,
        RoleCategory::RoadTeam,
        RoleCategory::General,
    ];
}

const OFFICER_ZH: &[&str] = &["会长", "盟主", "副会长", "指挥", "管理", "官员"];
const OFFICER_EN: &[&str] = &["leader", "officer", "commander", "admin", "captain"];
const ROAD_TEAM_ZH: &[&str] = &["路队", "修路"];
const ROAD_TEAM_EN: &[&str] = &["road"];

fn any_keyword(text: Option<&str>, keywords: &[&str], fold_case: bool) -> bool {
    let Some(text) = text else {
        return false;
    };
    if fold_case {
        let lowered = text.to_lowercase();
        keywords.iter().any(|keyword| lowered.contains(keyword))
    } else {
        keywords.iter().any(|keyword| text.contains(keyword))
    }
}

/// Classify a role; officer wins over road team, anything else is general.
pub fn classify_role(role_zh: Option<&str>, role_en: Option<&str>) -> RoleCategory {
    if any_keyword(role_zh, OFFICER_ZH, false) || any_keyword(role_en, OFFICER_EN, true) {
        RoleCategory::Officer
    } else if any_keyword(role_zh, ROAD_TEAM_ZH, false) || any_keyword(role_en, ROAD_TEAM_EN, true)
    {
        RoleCategory::RoadTeam
    } else {
        RoleCategory::General
    }
}

pub fn classify(member: &Member) -> RoleCategory {
    classify_role(member.role_zh.as_deref(), member.role_en.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn officer_keywords_match_either_language() {
        assert_eq!(classify_role(Some("会长"), None), RoleCategory::Officer);
        assert_eq!(classify_role(None, Some("Guild Leader")), RoleCategory::Officer);
        assert_eq!(
            classify_role(Some("成员"), Some("Field Commander")),
            RoleCategory::Officer
        );
    }

    #[test]
    fn officer_beats_road_team() {
        assert_eq!(
            classify_role(Some("路队指挥"), Some("Road team commander")),
            RoleCategory::Officer
        );
    }

    #[test]
    fn road_team_is_detected() {
        assert_eq!(classify_role(Some("路队"), None), RoleCategory::RoadTeam);
        assert_eq!(classify_role(None, Some("Road crew")), RoleCategory::RoadTeam);
    }

    #[test]
    fn unmatched_or_missing_roles_are_general() {
        assert_eq!(classify_role(Some("成员"), Some("Member")), RoleCategory::General);
        assert_eq!(classify_role(None, None), RoleCategory::General);
        assert_eq!(classify_role(Some(""), Some("")), RoleCategory::General);
    }
}
