//! # Document Model
//!
//! The validated input of a render pass: an ordered list of laws, each an
//! ordered list of clauses, plus the configuration record that drives the
//! front matter and the layout options.
//!
//! The model is plain data. Everything here is produced by the editor (or by
//! hand-written JSON) and stays immutable while the engine runs.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A complete compilation ready for rendering: what the editor hands over.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compilation {
    /// Bodies of law in the order they should appear.
    #[serde(default)]
    pub laws: Vec<Law>,
    pub config: RenderConfig,
}

/// A named, ordered collection of clauses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Law {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub clauses: Vec<Clause>,
    /// Free-form category label ("Constitucional", "Penal", ...).
    #[serde(default)]
    pub category: String,
}

/// A single numbered unit of legal text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clause {
    #[serde(default)]
    pub id: u64,
    /// Sort key within the law. Clauses render in ascending order of this key.
    pub order: u32,
    /// Display label, e.g. "Art. 12".
    pub label: String,
    pub text: String,
    #[serde(default)]
    pub highlighted: bool,
    /// Palette key ("verde", "azul", ...). Unknown keys render unhighlighted.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub annotation: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub importance: Importance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited: Option<DateTime<Utc>>,
}

impl Clause {
    /// The palette color this clause should be painted with, if any.
    ///
    /// A clause is painted only when it is flagged as highlighted AND its
    /// color key is one of the six palette keys.
    pub fn highlight(&self) -> Option<HighlightColor> {
        if !self.highlighted {
            return None;
        }
        let key = self.color.as_deref()?;
        let color = HighlightColor::from_key(key);
        if color.is_none() {
            tracing::warn!(clause = %self.label, key, "Unknown highlight color, rendering unhighlighted");
        }
        color
    }
}

impl Law {
    /// Clauses sorted by their order key. Equal keys keep input order.
    pub fn ordered_clauses(&self) -> Vec<&Clause> {
        let mut clauses: Vec<&Clause> = self.clauses.iter().collect();
        clauses.sort_by_key(|c| c.order);
        clauses
    }

    /// Number of clauses flagged as highlighted, regardless of color validity.
    pub fn highlighted_count(&self) -> usize {
        self.clauses.iter().filter(|c| c.highlighted).count()
    }
}

/// Importance rating from 1 (low) to 5 (very high).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Importance(u8);

impl Importance {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Build a rating, clamping into `1..=5`.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Importance {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for Importance {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!("importance must be between 1 and 5, got {}", value))
        }
    }
}

impl From<Importance> for u8 {
    fn from(value: Importance) -> Self {
        value.0
    }
}

/// The six fixed palette keys a clause can be highlighted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HighlightColor {
    #[serde(rename = "verde", alias = "green")]
    Green,
    #[serde(rename = "azul", alias = "blue")]
    Blue,
    #[serde(rename = "amarelo", alias = "yellow")]
    Yellow,
    #[serde(rename = "laranja", alias = "orange")]
    Orange,
    #[serde(rename = "roxo", alias = "purple")]
    Purple,
    #[serde(rename = "cinza", alias = "gray")]
    Gray,
}

impl HighlightColor {
    /// Palette order, as listed on the statistics and legend pages.
    pub const ALL: [HighlightColor; 6] = [
        HighlightColor::Green,
        HighlightColor::Blue,
        HighlightColor::Yellow,
        HighlightColor::Orange,
        HighlightColor::Purple,
        HighlightColor::Gray,
    ];

    /// Resolve a palette key. Accepts the canonical Portuguese keys and their
    /// English aliases, case-insensitively.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "verde" | "green" => Some(Self::Green),
            "azul" | "blue" => Some(Self::Blue),
            "amarelo" | "yellow" => Some(Self::Yellow),
            "laranja" | "orange" => Some(Self::Orange),
            "roxo" | "purple" => Some(Self::Purple),
            "cinza" | "gray" | "grey" => Some(Self::Gray),
            _ => None,
        }
    }

    /// The canonical palette key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Green => "verde",
            Self::Blue => "azul",
            Self::Yellow => "amarelo",
            Self::Orange => "laranja",
            Self::Purple => "roxo",
            Self::Gray => "cinza",
        }
    }

    fn default_description(self) -> &'static str {
        match self {
            Self::Green => "Artigos mais cobrados",
            Self::Blue => "Jurisprudência relevante",
            Self::Yellow => "Alterações recentes",
            Self::Orange => "Doutrina importante",
            Self::Purple => "Súmulas vinculantes",
            Self::Gray => "Observações gerais",
        }
    }
}

/// Human-readable meaning of each palette color.
///
/// Keys are resolved like clause colors: aliases and any case are accepted,
/// unknown keys are dropped with a warning.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ColorLegend(BTreeMap<HighlightColor, String>);

impl<'de> Deserialize<'de> for ColorLegend {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut entries = BTreeMap::new();
        for (key, text) in raw {
            match HighlightColor::from_key(&key) {
                Some(color) => {
                    entries.insert(color, text);
                }
                None => tracing::warn!(key = %key, "Unknown legend color, ignoring"),
            }
        }
        Ok(Self(entries))
    }
}

impl ColorLegend {
    pub fn new(entries: impl IntoIterator<Item = (HighlightColor, String)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Legend text for a color, falling back to the stock description.
    pub fn describe(&self, color: HighlightColor) -> &str {
        self.0
            .get(&color)
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| color.default_description())
    }
}

/// Everything besides the laws that shapes the rendered document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    pub title: String,
    /// Contest or exam the compilation targets.
    #[serde(default)]
    pub contest: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    /// Code or ISBN-like identifier.
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub edition: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub notices: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub transition_title: Option<String>,
    #[serde(default)]
    pub transition_subtitle: Option<String>,
    #[serde(default)]
    pub color_legend: ColorLegend,
    /// Date printed on the cover. Defaults to today.
    #[serde(default)]
    pub generated_on: Option<NaiveDate>,
    #[serde(default)]
    pub options: LayoutOptions,
}

impl RenderConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Non-empty, trimmed value of an optional field.
    pub(crate) fn field(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn notices(&self) -> Option<&str> {
        Self::field(&self.notices)
    }

    pub fn comments(&self) -> Option<&str> {
        Self::field(&self.comments)
    }

    pub fn contest(&self) -> Option<&str> {
        Self::field(&self.contest)
    }

    pub fn author(&self) -> Option<&str> {
        Self::field(&self.author)
    }
}

/// Knobs of the layout engine that are not part of the printed content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    pub continuation_policy: ContinuationPolicy,
    pub toc_strategy: TocStrategy,
    /// Print each clause's annotation under its text.
    pub export_annotations: bool,
    /// Print each clause's tags under its text.
    pub export_tags: bool,
    /// Print each clause's importance rating under its text.
    pub show_importance: bool,
    /// Text of the discreet header on content pages.
    pub running_header_text: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            continuation_policy: ContinuationPolicy::default(),
            toc_strategy: TocStrategy::default(),
            export_annotations: false,
            export_tags: false,
            show_importance: false,
            running_header_text: "VADEMECUM JURÍDICO".to_string(),
        }
    }
}

/// When a clause is split across a column or page boundary, whether the
/// resumed text is preceded by a "[...continuação Art. N]" marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContinuationPolicy {
    /// Only clauses laid out on the oversized path get markers.
    #[default]
    ForcedLongOnly,
    /// Every mid-clause break gets a marker.
    ///
    /// Clauses on the normal branch are moved whole to the next column or
    /// page before drawing and always fit there, so in practice only the
    /// long branch breaks mid-clause and this renders the same as
    /// `ForcedLongOnly`.
    Always,
}

/// How the table of contents learns each law's opening page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TocStrategy {
    /// Run the flow engine once without output and record real opening pages.
    #[default]
    Exact,
    /// Approximate two pages per preceding law.
    Estimated,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(order: u32, highlighted: bool, color: Option<&str>) -> Clause {
        Clause {
            id: order as u64,
            order,
            label: format!("Art. {}", order),
            text: "Texto".to_string(),
            highlighted,
            color: color.map(str::to_string),
            annotation: String::new(),
            tags: BTreeSet::new(),
            importance: Importance::default(),
            last_edited: None,
        }
    }

    #[test]
    fn test_ordered_clauses_sorts_by_order_key() {
        let law = Law {
            id: 1,
            name: "CDC".to_string(),
            clauses: vec![clause(3, false, None), clause(1, false, None), clause(2, false, None)],
            category: String::new(),
        };
        let orders: Vec<u32> = law.ordered_clauses().iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn test_ordered_clauses_is_stable_for_equal_keys() {
        let mut a = clause(5, false, None);
        a.label = "Art. 5".to_string();
        let mut b = clause(5, false, None);
        b.label = "Art. 5-A".to_string();
        let law = Law {
            id: 1,
            name: "CF".to_string(),
            clauses: vec![a, b, clause(4, false, None)],
            category: String::new(),
        };
        let labels: Vec<&str> = law.ordered_clauses().iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Art. 4", "Art. 5", "Art. 5-A"]);
    }

    #[test]
    fn test_unknown_color_degrades_to_unhighlighted() {
        assert_eq!(clause(1, true, Some("magenta")).highlight(), None);
        assert_eq!(clause(1, true, Some("azul")).highlight(), Some(HighlightColor::Blue));
        assert_eq!(clause(1, false, Some("azul")).highlight(), None);
        assert_eq!(clause(1, true, None).highlight(), None);
    }

    #[test]
    fn test_color_key_aliases() {
        assert_eq!(HighlightColor::from_key("Verde"), Some(HighlightColor::Green));
        assert_eq!(HighlightColor::from_key("purple"), Some(HighlightColor::Purple));
        assert_eq!(HighlightColor::from_key("grey"), Some(HighlightColor::Gray));
        assert_eq!(HighlightColor::from_key(""), None);
    }

    #[test]
    fn test_legend_falls_back_to_defaults() {
        let legend = ColorLegend::new([(HighlightColor::Blue, "STF".to_string())]);
        assert_eq!(legend.describe(HighlightColor::Blue), "STF");
        assert_eq!(legend.describe(HighlightColor::Green), "Artigos mais cobrados");
    }

    #[test]
    fn test_legend_keys_resolve_like_clause_colors() {
        let legend: ColorLegend =
            serde_json::from_str(r#"{"verde": "x", "rosa": "y", "Grey": "z", "AZUL": "w"}"#).unwrap();
        assert_eq!(legend.describe(HighlightColor::Green), "x");
        assert_eq!(legend.describe(HighlightColor::Gray), "z");
        assert_eq!(legend.describe(HighlightColor::Blue), "w");
        assert_eq!(legend.describe(HighlightColor::Purple), "Súmulas vinculantes");
        assert_eq!(legend, ColorLegend::new([
            (HighlightColor::Green, "x".to_string()),
            (HighlightColor::Blue, "w".to_string()),
            (HighlightColor::Gray, "z".to_string()),
        ]));
    }

    #[test]
    fn test_legend_serializes_canonical_keys() {
        let legend = ColorLegend::new([(HighlightColor::Gray, "obs".to_string())]);
        assert_eq!(serde_json::to_string(&legend).unwrap(), r#"{"cinza":"obs"}"#);
    }

    #[test]
    fn test_importance_rejects_out_of_range() {
        assert!(serde_json::from_str::<Importance>("6").is_err());
        assert!(serde_json::from_str::<Importance>("0").is_err());
        assert_eq!(serde_json::from_str::<Importance>("4").unwrap().get(), 4);
        assert_eq!(Importance::new(9).get(), 5);
    }

    #[test]
    fn test_compilation_from_json() {
        let json = r#"{
            "laws": [{
                "name": "Código de Defesa do Consumidor",
                "clauses": [
                    { "order": 2, "label": "Art. 2", "text": "Consumidor é...", "highlighted": true, "color": "verde", "tags": ["cdc"], "importance": 5 },
                    { "order": 1, "label": "Art. 1", "text": "O presente código..." }
                ]
            }],
            "config": {
                "title": "Vademecum CDC",
                "colorLegend": { "verde": "Mais cobrados" },
                "options": { "continuationPolicy": "Always", "tocStrategy": "Estimated" }
            }
        }"#;
        let compilation: Compilation = serde_json::from_str(json).unwrap();
        assert_eq!(compilation.laws[0].clauses.len(), 2);
        assert_eq!(compilation.laws[0].highlighted_count(), 1);
        assert_eq!(compilation.config.color_legend.describe(HighlightColor::Green), "Mais cobrados");
        assert_eq!(compilation.config.options.continuation_policy, ContinuationPolicy::Always);
        assert_eq!(compilation.config.options.toc_strategy, TocStrategy::Estimated);
        assert_eq!(compilation.config.options.running_header_text, "VADEMECUM JURÍDICO");
    }
}
