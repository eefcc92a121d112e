//! Document properties and the export file name.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::model::RenderConfig;

pub const DEFAULT_AUTHOR: &str = "Vademecum Editor";
pub const CREATOR: &str = "Vademecum Editor - Sistema de Marcação Estatística";
pub const KEYWORDS: &str = "vademecum, leis, artigos, concurso, marcação";

/// Values written to the PDF info dictionary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub subject: String,
    pub author: String,
    pub creator: String,
    pub keywords: String,
    pub producer: String,
    pub created: NaiveDate,
}

impl DocumentMetadata {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            title: config.title.clone(),
            subject: format!("Vademecum para {}", config.contest().unwrap_or("Concurso")),
            author: config.author().unwrap_or(DEFAULT_AUTHOR).to_string(),
            creator: CREATOR.to_string(),
            keywords: KEYWORDS.to_string(),
            producer: format!("Vademecum Press {}", env!("CARGO_PKG_VERSION")),
            created: config.generated_on.unwrap_or_else(|| Local::now().date_naive()),
        }
    }
}

/// File name the finished document is saved under.
///
/// Every character outside ASCII letters and digits becomes `-`, one for
/// one, and `.pdf` is appended.
pub fn export_file_name(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '-' })
        .collect();
    format!("{}.pdf", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("Lei nº 8.078/1990!"), "Lei-n--8-078-1990-.pdf");
        assert_eq!(export_file_name("Vademecum OAB"), "Vademecum-OAB.pdf");
        assert_eq!(export_file_name("Ação"), "A--o.pdf");
    }

    #[test]
    fn test_defaults_without_contest_or_author() {
        let meta = DocumentMetadata::from_config(&RenderConfig::new("Vade"));
        assert_eq!(meta.subject, "Vademecum para Concurso");
        assert_eq!(meta.author, DEFAULT_AUTHOR);
        assert_eq!(meta.creator, CREATOR);
        assert_eq!(meta.keywords, KEYWORDS);
    }

    #[test]
    fn test_contest_and_author() {
        let mut config = RenderConfig::new("Vade");
        config.contest = Some("OAB XL".to_string());
        config.author = Some("  Ana  ".to_string());
        config.generated_on = NaiveDate::from_ymd_opt(2025, 1, 2);
        let meta = DocumentMetadata::from_config(&config);
        assert_eq!(meta.subject, "Vademecum para OAB XL");
        assert_eq!(meta.author, "Ana");
        assert_eq!(meta.created, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
    }
}
