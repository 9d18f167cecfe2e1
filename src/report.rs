use std::fmt::Write;

use crate::i18n::{self, Binding};
use crate::models::Language;
use crate::view::{Cell, MemberGroup, RenderedView};

fn markdown_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn emphasized(cell: &Cell) -> String {
    let text = markdown_cell(&cell.text);
    if cell.negative && !text.is_empty() {
        format!("**{text}**")
    } else {
        text
    }
}

/// Markdown rendering of a season table, for terminals and notes.
pub fn build_table_report(title: &Binding, view: &RenderedView, lang: Language) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# {}", title.text.project(lang));
    if let Some(option) = view.season_options.iter().find(|option| option.selected) {
        let _ = writeln!(output, "{} ({})", option.title, view.archive_hint);
    }
    let _ = writeln!(output);

    if let Some(hint) = &view.empty_hint {
        let _ = writeln!(output, "{hint}");
        return output;
    }

    let _ = writeln!(output, "| {} |", view.headers.join(" | "));
    let _ = writeln!(
        output,
        "|{}",
        view.headers.iter().map(|_| "---|").collect::<String>()
    );

    for row in &view.rows {
        let mut cells: Vec<String> = row.cells.iter().map(emphasized).collect();
        if row.top {
            if let Some(first) = cells.first_mut() {
                *first = format!("★ {first}");
            }
        }
        let _ = writeln!(output, "| {} |", cells.join(" | "));
    }

    output
}

pub fn build_members_report(groups: &[MemberGroup], lang: Language) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# {}", i18n::MEMBERS_TITLE.text.project(lang));

    for group in groups {
        let _ = writeln!(output);
        let _ = writeln!(output, "## {} ({})", group.title, group.members.len());
        for member in &group.members {
            if member.role.is_empty() {
                let _ = writeln!(output, "- {}", member.name);
            } else {
                let _ = writeln!(output, "- {} · {}", member.name, member.role);
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_data;
    use crate::view::{render_contribution, render_members, Selection};

    #[test]
    fn contribution_report_marks_top_and_penalties() {
        let data = sample_data();
        let view = render_contribution(
            &data.contribution,
            &Selection::new(Some("S1-2026"), ""),
            Language::En,
        );
        let report = build_table_report(&i18n::CONTRIBUTION_TITLE, &view, Language::En);

        assert!(report.starts_with("# Jiuzhou · Contribution\n"));
        assert!(report.contains("Season S1 (2026) (Archived season (read-only))"));
        assert!(report.contains("| ★ 1 | 九州丨奉孝 |"));
        assert!(report.contains("**-20**"));
    }

    #[test]
    fn empty_view_prints_hint_only() {
        let data = sample_data();
        let view = render_contribution(
            &data.contribution,
            &Selection::new(Some("S2-2026"), "nobody"),
            Language::Zh,
        );
        let report = build_table_report(&i18n::CONTRIBUTION_TITLE, &view, Language::Zh);
        assert!(report.contains("没有匹配记录"));
        assert!(!report.contains("| "));
    }

    #[test]
    fn members_report_lists_groups() {
        let groups = render_members(&sample_data().members, Language::Zh);
        let report = build_members_report(&groups, Language::Zh);
        assert!(report.contains("## 管理层 (1)"));
        assert!(report.contains("- 九州丨子龙 · 路队队长"));
    }
}
