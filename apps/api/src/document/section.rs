use serde::{Deserialize, Serialize};

use crate::document::model::ResumeDocument;

/// A named, independently-hideable block of a rendered template, backed by one
/// document sub-collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Experience,
    Skills,
    Education,
    Projects,
    Certifications,
    Languages,
    Interests,
}

impl SectionKind {
    pub const ALL: [SectionKind; 8] = [
        SectionKind::Summary,
        SectionKind::Experience,
        SectionKind::Skills,
        SectionKind::Education,
        SectionKind::Projects,
        SectionKind::Certifications,
        SectionKind::Languages,
        SectionKind::Interests,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Skills => "skills",
            SectionKind::Education => "education",
            SectionKind::Projects => "projects",
            SectionKind::Certifications => "certifications",
            SectionKind::Languages => "languages",
            SectionKind::Interests => "interests",
        }
    }
}

impl ResumeDocument {
    /// True when the section has something to show. A rendered heading implies
    /// this returned true.
    pub fn has_section(&self, kind: SectionKind) -> bool {
        match kind {
            SectionKind::Summary => !self.profile.summary.trim().is_empty(),
            SectionKind::Experience => !self.work_experience.is_empty(),
            SectionKind::Skills => !self.skills.is_empty(),
            SectionKind::Education => !self.education.is_empty(),
            SectionKind::Projects => !self.projects.is_empty(),
            SectionKind::Certifications => !self.certifications.is_empty(),
            SectionKind::Languages => !self.languages.is_empty(),
            SectionKind::Interests => self.visible_interests().next().is_some(),
        }
    }

    /// Interests with blank entries (left behind by the editor's "add" button) removed.
    pub fn visible_interests(&self) -> impl Iterator<Item = &str> {
        self.interests
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
    }
}
