use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::prefs::Locale;

/// Bilingual résumé shipped with the binary.
const EMBEDDED_RESUME_JSON: &str = include_str!("../../data/resume.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeHeader {
    pub name: String,
    pub location: String,
    pub phone: String,
    pub email: String,
    pub linkedin: String,
    pub github: String,
}

/// A titled block of free text (objective, summary).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSection {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCategory {
    pub title: String,
    pub skills: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsSection {
    pub title: String,
    pub categories: Vec<SkillCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub organization: String,
    pub location: String,
    pub date: String,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsSection {
    pub title: String,
    pub items: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub position: String,
    pub company: String,
    pub location: String,
    pub date: String,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceSection {
    pub title: String,
    pub items: Vec<ExperienceEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub date: String,
    pub courses: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationSection {
    pub title: String,
    pub items: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificationsSection {
    pub title: String,
    pub items: Vec<String>,
}

/// Structured résumé content for one locale. All fields are plain text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub header: ResumeHeader,
    pub objective: TextSection,
    pub summary: TextSection,
    pub skills: SkillsSection,
    pub projects: ProjectsSection,
    pub experience: ExperienceSection,
    pub education: EducationSection,
    pub certifications: CertificationsSection,
}

/// Résumé variants keyed by locale.
#[derive(Debug, Clone)]
pub struct ResumeCatalog {
    documents: HashMap<Locale, ResumeDocument>,
}

impl ResumeCatalog {
    /// Parses the dataset compiled into the binary.
    pub fn embedded() -> Result<Self, serde_json::Error> {
        Self::from_json(EMBEDDED_RESUME_JSON)
    }

    /// Parses a `{ "<locale>": ResumeDocument, ... }` map. Unknown locale keys are skipped.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, ResumeDocument> = serde_json::from_str(json)?;
        let documents = raw
            .into_iter()
            .filter_map(|(key, doc)| key.parse::<Locale>().ok().map(|locale| (locale, doc)))
            .collect();
        Ok(Self { documents })
    }

    /// Returns the document for `locale`, or the English one if that locale is missing.
    pub fn get(&self, locale: Locale) -> Option<&ResumeDocument> {
        self.documents
            .get(&locale)
            .or_else(|| self.documents.get(&Locale::En))
    }

    pub fn locales(&self) -> Vec<Locale> {
        let mut locales: Vec<Locale> = self.documents.keys().copied().collect();
        locales.sort();
        locales
    }
}
