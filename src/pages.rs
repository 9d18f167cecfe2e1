//! Static HTML output.
//!
//! Every bilingual element carries `data-i18n`, `data-zh` and `data-en`
//! attributes next to its resolved text, so a page generated in one
//! language still describes both.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::info;

use crate::context::Site;
use crate::error::Result;
use crate::i18n::{self, resolve_binding, Binding, BindingTarget};
use crate::models::{Language, Season};
use crate::store::KeyValueStore;
use crate::view::{
    render_members, render_season_at, render_season_view, MemberGroup, RenderedView,
    SeasonRecord, Selection,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Members,
    Attendance,
    Contribution,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Members, Page::Attendance, Page::Contribution];

    pub fn stem(self) -> &'static str {
        match self {
            Page::Members => "index",
            Page::Attendance => "attendance",
            Page::Contribution => "contribution",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.html", self.stem())
    }

    /// Page showing the season at `index` of a season view. The position
    /// keeps names distinct when ids repeat or slug to the same text.
    pub fn season_file_name(self, index: usize, season_id: &str) -> String {
        format!("{}-{}-{}.html", self.stem(), index + 1, slug(season_id))
    }

    pub fn title(self) -> Binding {
        match self {
            Page::Members => i18n::MEMBERS_TITLE,
            Page::Attendance => i18n::ATTENDANCE_TITLE,
            Page::Contribution => i18n::CONTRIBUTION_TITLE,
        }
    }

    fn nav(self) -> Binding {
        match self {
            Page::Members => i18n::NAV_MEMBERS,
            Page::Attendance => i18n::NAV_ATTENDANCE,
            Page::Contribution => i18n::NAV_CONTRIBUTION,
        }
    }
}

fn slug(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn binding_attrs(binding: &Binding) -> String {
    format!(
        " data-i18n=\"{}\" data-zh=\"{}\" data-en=\"{}\"",
        binding.key,
        encode_double_quoted_attribute(binding.text.project(Language::Zh)),
        encode_double_quoted_attribute(binding.text.project(Language::En)),
    )
}

/// Place a binding on an element according to its target.
pub fn bound_element(tag: &str, binding: &Binding, lang: Language, extra_attrs: &str) -> String {
    let resolved = resolve_binding(binding, lang);
    let attrs = binding_attrs(binding);
    match resolved.target {
        BindingTarget::Text | BindingTarget::DocumentTitle => format!(
            "<{tag}{extra_attrs}{attrs}>{}</{tag}>",
            encode_text(&resolved.text)
        ),
        BindingTarget::Placeholder => format!(
            "<{tag}{extra_attrs}{attrs} placeholder=\"{}\">",
            encode_double_quoted_attribute(&resolved.text)
        ),
        BindingTarget::Title => format!(
            "<{tag}{extra_attrs}{attrs} title=\"{}\">",
            encode_double_quoted_attribute(&resolved.text)
        ),
    }
}

/// Hides rows whose `data-name` lacks the trimmed keyword, and shows the
/// empty hint when none remain. Case-sensitive, like the CLI filter.
const SEARCH_SCRIPT: &str = "var k=this.value.trim(),n=0;\
document.querySelectorAll('tbody tr').forEach(function(r){\
var h=k!==''&&r.dataset.name.indexOf(k)<0;r.hidden=h;if(!h)n++;});\
document.getElementById('empty-hint').hidden=n>0;";

pub fn table_body_html(view: &RenderedView) -> String {
    let mut output = String::new();
    for row in &view.rows {
        let name_attr = encode_double_quoted_attribute(&row.name);
        if row.top {
            let _ = writeln!(output, "<tr class=\"top\" data-name=\"{name_attr}\">");
        } else {
            let _ = writeln!(output, "<tr data-name=\"{name_attr}\">");
        }
        for cell in &row.cells {
            if cell.negative {
                let _ = writeln!(output, "  <td class=\"neg\">{}</td>", encode_text(&cell.text));
            } else {
                let _ = writeln!(output, "  <td>{}</td>", encode_text(&cell.text));
            }
        }
        let _ = writeln!(output, "</tr>");
    }
    output
}

fn season_select_html(page: Page, view: &RenderedView, lang: Language) -> String {
    let mut output = bound_element(
        "select",
        &i18n::SEASON_SELECT,
        lang,
        " id=\"season\" onchange=\"location.href=this.value\"",
    );
    output.push('\n');
    for option in &view.season_options {
        let selected = if option.selected { " selected" } else { "" };
        let _ = writeln!(
            output,
            "  <option value=\"{}\"{selected}>{}</option>",
            encode_double_quoted_attribute(&page.season_file_name(option.index, &option.id)),
            encode_text(&option.title),
        );
    }
    output.push_str("</select>\n");
    output
}

/// Body of a season page: controls, hints and the ranked table.
pub fn season_section_html(page: Page, columns: &[Binding], view: &RenderedView, lang: Language) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "<section class=\"controls\">");
    output.push_str(&season_select_html(page, view, lang));
    let search_attrs = format!(
        " id=\"search\" type=\"search\" oninput=\"{}\"",
        encode_double_quoted_attribute(SEARCH_SCRIPT)
    );
    let _ = writeln!(
        output,
        "{}",
        bound_element("input", &i18n::SEARCH_PLACEHOLDER, lang, &search_attrs)
    );
    let _ = writeln!(
        output,
        "<p id=\"archive-hint\">{}</p>",
        encode_text(&view.archive_hint)
    );
    let _ = writeln!(output, "</section>");

    let _ = writeln!(output, "<table>");
    let _ = writeln!(output, "<thead><tr>");
    for column in columns {
        let _ = writeln!(output, "  {}", bound_element("th", column, lang, ""));
    }
    let _ = writeln!(output, "</tr></thead>");
    let _ = writeln!(output, "<tbody>");
    output.push_str(&table_body_html(view));
    let _ = writeln!(output, "</tbody>");
    let _ = writeln!(output, "</table>");

    let hidden = if view.empty_hint.is_some() { "" } else { " hidden" };
    let _ = writeln!(
        output,
        "<p id=\"empty-hint\"{hidden}>{}</p>",
        encode_text(i18n::empty_hint(lang))
    );
    output
}

pub fn members_section_html(groups: &[MemberGroup]) -> String {
    let mut output = String::new();
    for group in groups {
        let _ = writeln!(output, "<section class=\"group\">");
        let _ = writeln!(output, "<h2>{}</h2>", encode_text(&group.title));
        let _ = writeln!(output, "<ul>");
        for member in &group.members {
            let _ = writeln!(
                output,
                "  <li><span class=\"name\">{}</span> <span class=\"role\">{}</span></li>",
                encode_text(&member.name),
                encode_text(&member.role)
            );
        }
        let _ = writeln!(output, "</ul>");
        let _ = writeln!(output, "</section>");
    }
    output
}

/// Full document around a page body, with navigation and language switch.
pub fn page_html(page: Page, file_name: &str, lang: Language, body: &str) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "<!DOCTYPE html>");
    let _ = writeln!(output, "<html lang=\"{}\">", lang.code());
    let _ = writeln!(output, "<head>");
    let _ = writeln!(output, "<meta charset=\"utf-8\">");
    let _ = writeln!(output, "{}", bound_element("title", &page.title(), lang, ""));
    let _ = writeln!(output, "</head>");
    let _ = writeln!(output, "<body>");
    let _ = writeln!(output, "<nav>");
    let _ = writeln!(
        output,
        "  {}",
        bound_element("strong", &i18n::SITE_NAME, lang, "")
    );
    for target in Page::ALL {
        let current = if target == page { " class=\"current\"" } else { "" };
        let href = format!(" href=\"{}\"{current}", target.file_name());
        let _ = writeln!(output, "  {}", bound_element("a", &target.nav(), lang, &href));
    }
    let other = format!(" href=\"../{}/{}\"", lang.toggled().code(), file_name);
    let _ = writeln!(output, "  {}", bound_element("a", &i18n::LANG_TOGGLE, lang, &other));
    let _ = writeln!(output, "</nav>");
    let _ = writeln!(output, "<main>");
    output.push_str(body);
    let _ = writeln!(output, "</main>");
    let _ = writeln!(output, "</body>");
    let _ = writeln!(output, "</html>");
    output
}

async fn write_page(dir: &Path, file_name: &str, contents: String, written: &mut Vec<PathBuf>) -> Result<()> {
    let path = dir.join(file_name);
    tokio::fs::write(&path, contents).await?;
    written.push(path);
    Ok(())
}

async fn write_season_pages<R: SeasonRecord>(
    page: Page,
    seasons: &[Season<R>],
    lang: Language,
    dir: &Path,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let initial = render_season_view(seasons, &Selection::default(), lang);
    let pages = std::iter::once((page.file_name(), initial)).chain(
        seasons.iter().enumerate().map(|(index, season)| {
            (
                page.season_file_name(index, &season.id),
                render_season_at(seasons, Some(index), "", lang),
            )
        }),
    );

    for (file_name, view) in pages {
        let body = season_section_html(page, R::COLUMNS, &view, lang);
        let html = page_html(page, &file_name, lang, &body);
        write_page(dir, &file_name, html, written).await?;
    }
    Ok(())
}

/// Write every page in both languages under `out_dir/<lang>/`.
pub async fn build_site<S: KeyValueStore>(site: &Site<S>, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let data = site.data();
    let mut written = Vec::new();

    for lang in Language::ALL {
        let dir = out_dir.join(lang.code());
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = Page::Members.file_name();
        let body = members_section_html(&render_members(&data.members, lang));
        let html = page_html(Page::Members, &file_name, lang, &body);
        write_page(&dir, &file_name, html, &mut written).await?;

        write_season_pages(Page::Attendance, &data.attendance, lang, &dir, &mut written).await?;
        write_season_pages(Page::Contribution, &data.contribution, lang, &dir, &mut written).await?;
    }

    info!(pages = written.len(), out = %out_dir.display(), "site built");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_data;
    use crate::store::MemoryStore;
    use crate::models::ContributionRecord;
    use crate::view::render_contribution;

    #[test]
    fn placeholder_binding_lands_in_attribute() {
        let html = bound_element("input", &i18n::SEARCH_PLACEHOLDER, Language::En, " id=\"search\"");
        assert!(html.starts_with("<input id=\"search\" data-i18n=\"search.placeholder\""));
        assert!(html.contains("data-zh=\"搜索游戏名\""));
        assert!(html.ends_with("placeholder=\"Search in-game name\">"));
    }

    #[test]
    fn table_rows_escape_names_and_mark_classes() {
        let mut data = sample_data();
        data.contribution[0].records[2].name = "<b>九州丨XX</b>".to_string();
        let view = render_contribution(
            &data.contribution,
            &Selection::new(Some("S1-2026"), ""),
            Language::Zh,
        );
        let body = table_body_html(&view);
        assert_eq!(body.matches("<tr class=\"top\"").count(), 3);
        assert!(body.contains("&lt;b&gt;九州丨XX&lt;/b&gt;"));
        assert!(body.contains("<td class=\"neg\">-20</td>"));
    }

    #[test]
    fn page_links_to_other_language() {
        let html = page_html(Page::Contribution, "contribution.html", Language::Zh, "");
        assert!(html.contains("<html lang=\"zh\">"));
        assert!(html.contains("href=\"../en/contribution.html\""));
        assert!(html.contains(">九州 · 贡献</title>"));
    }

    #[test]
    fn season_file_names_are_slugged() {
        assert_eq!(
            Page::Attendance.season_file_name(0, "S1 2026/x"),
            "attendance-1-S1_2026_x.html"
        );
        assert_eq!(Page::Members.file_name(), "index.html");
    }

    #[tokio::test]
    async fn colliding_season_ids_get_separate_pages() {
        let dir = tempfile::tempdir().unwrap();
        let mut data = sample_data();
        data.attendance[0].id = "S1 2026".to_string();
        data.attendance[1].id = "S1_2026".to_string();
        let site = Site::setup(data, MemoryStore::new());

        build_site(&site, dir.path()).await.unwrap();
        let zh = dir.path().join("zh");
        let first = std::fs::read_to_string(zh.join("attendance-1-S1_2026.html")).unwrap();
        let second = std::fs::read_to_string(zh.join("attendance-2-S1_2026.html")).unwrap();
        assert_ne!(first, second);
        assert!(second.contains("<option value=\"attendance-2-S1_2026.html\" selected>"));
        assert!(first.contains("<td>90%</td>"));
        assert!(second.contains("<td>88%</td>"));
    }

    #[test]
    fn search_box_filters_rows_by_name() {
        let data = sample_data();
        let view = render_contribution(&data.contribution, &Selection::default(), Language::Zh);
        let html = season_section_html(Page::Contribution, ContributionRecord::COLUMNS, &view, Language::Zh);

        assert!(html.contains(" oninput=\""));
        assert!(html.contains("r.dataset.name.indexOf(k)"));
        assert!(html.contains("&amp;&amp;"));
        for row in &view.rows {
            assert!(html.contains(&format!("data-name=\"{}\"", row.name)));
        }
        assert!(html.contains("<p id=\"empty-hint\" hidden>"));
    }

    #[test]
    fn quotes_in_names_stay_inside_the_row_attribute() {
        let mut data = sample_data();
        data.contribution[0].records[0].name = "a\"b".to_string();
        let view = render_contribution(
            &data.contribution,
            &Selection::new(Some("S1-2026"), ""),
            Language::En,
        );
        assert!(table_body_html(&view).contains("data-name=\"a&quot;b\""));
    }

    #[tokio::test]
    async fn build_writes_every_page_in_both_languages() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::setup(sample_data(), MemoryStore::new());

        let written = build_site(&site, dir.path()).await.unwrap();
        // index, attendance + 2 seasons, contribution + 2 seasons, per language
        assert_eq!(written.len(), 14);

        let en = std::fs::read_to_string(dir.path().join("en").join("contribution.html")).unwrap();
        assert!(en.contains("Season S2 (Ongoing)"));
        assert!(en.contains("<option value=\"contribution-2-S2-2026.html\" selected>"));

        let first = std::fs::read_to_string(dir.path().join("zh").join("attendance-1-S1-2026.html")).unwrap();
        build_site(&site, dir.path()).await.unwrap();
        let second = std::fs::read_to_string(dir.path().join("zh").join("attendance-1-S1-2026.html")).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("<td>90%</td>"));
    }
}
