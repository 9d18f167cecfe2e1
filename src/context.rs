use tracing::info;

use crate::data::SiteData;
use crate::error::Result;
use crate::models::Language;
use crate::store::{load_language, save_language, KeyValueStore};
use crate::view::{self, MemberGroup, RenderedView, Selection};

/// Application context handed to every renderer.
///
/// Created once by [`Site::setup`] after the data load, released by
/// [`Site::teardown`]. Language changes re-render from the same data.
pub struct Site<S: KeyValueStore> {
    data: SiteData,
    store: S,
    lang: Language,
}

impl<S: KeyValueStore> Site<S> {
    pub fn setup(data: SiteData, store: S) -> Self {
        let lang = load_language(&store);
        info!(
            lang = %lang,
            members = data.members.len(),
            attendance_seasons = data.attendance.len(),
            contribution_seasons = data.contribution.len(),
            "site ready"
        );
        Site { data, store, lang }
    }

    pub fn teardown(self) -> S {
        self.store
    }

    pub fn data(&self) -> &SiteData {
        &self.data
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// Switch language for this session only.
    pub fn use_language(&mut self, lang: Language) {
        self.lang = lang;
    }

    /// Switch language and persist it.
    pub fn set_language(&mut self, lang: Language) -> Result<()> {
        save_language(&mut self.store, lang)?;
        self.lang = lang;
        Ok(())
    }

    pub fn toggle_language(&mut self) -> Result<Language> {
        let next = self.lang.toggled();
        self.set_language(next)?;
        Ok(next)
    }

    pub fn attendance(&self, selection: &Selection) -> RenderedView {
        view::render_attendance(&self.data.attendance, selection, self.lang)
    }

    pub fn contribution(&self, selection: &Selection) -> RenderedView {
        view::render_contribution(&self.data.contribution, selection, self.lang)
    }

    pub fn members(&self) -> Vec<MemberGroup> {
        view::render_members(&self.data.members, self.lang)
    }
}
