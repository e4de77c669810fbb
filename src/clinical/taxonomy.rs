use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{AttributeKind, BodySystem};

use super::helpers::normalize;

// ---------------------------------------------------------------------------
// Runtime taxonomy entries
// ---------------------------------------------------------------------------

/// An attribute a symptom is expected to be characterized by, with the
/// pattern-specific phrases that show it was described.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedAttribute {
    pub kind: AttributeKind,
    #[serde(default)]
    pub cues: Vec<String>,
    /// When set, any cue of this attribute also confirms the symptom itself
    /// ("hormigueo" confirms "parestesias").
    #[serde(default)]
    pub implies_pattern: bool,
}

/// One symptom pattern of the taxonomy. Immutable once the taxonomy is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomPattern {
    pub system: BodySystem,
    pub name: String,
    pub aliases: Vec<String>,
    pub expected_attributes: Vec<ExpectedAttribute>,
    /// Ids of this system's red-flag templates relevant to the pattern.
    pub red_flags: Vec<String>,
    pub suggested_exam: Vec<String>,
    pub suggested_studies: Vec<String>,
    pub considerations: Vec<String>,
}

impl SymptomPattern {
    pub fn key(&self) -> PatternKey {
        PatternKey {
            system: self.system,
            name: self.name.clone(),
        }
    }

    pub fn expected_kinds(&self) -> impl Iterator<Item = AttributeKind> + '_ {
        self.expected_attributes.iter().map(|a| a.kind)
    }

    /// Position of an attribute in this pattern's expected order.
    pub fn attribute_position(&self, kind: AttributeKind) -> Option<usize> {
        self.expected_attributes.iter().position(|a| a.kind == kind)
    }
}

/// Identity of a pattern: `(system, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatternKey {
    pub system: BodySystem,
    pub name: String,
}

/// A key phrase of a red-flag template. The label is reported when any
/// variant (or the label itself) occurs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPhrase {
    pub label: String,
    #[serde(default)]
    pub variants: Vec<String>,
}

impl KeyPhrase {
    pub fn forms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.label.as_str()).chain(self.variants.iter().map(String::as_str))
    }
}

/// A pre-authored red-flag phrase combination and the action it calls for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedFlagTemplate {
    pub id: String,
    pub system: BodySystem,
    pub description: String,
    pub key_phrases: Vec<KeyPhrase>,
    pub recommended_action: String,
}

/// Everything the taxonomy knows about one body system.
#[derive(Debug, Clone)]
pub struct SystemCatalog {
    pub system: BodySystem,
    /// Presentations known to be associated with red flags.
    pub red_flag_patterns: Vec<String>,
    pub red_flags: Vec<RedFlagTemplate>,
    pub patterns: Vec<Arc<SymptomPattern>>,
}

/// Generic cues that show an attribute was described, whatever the symptom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub kind: AttributeKind,
    pub cues: Vec<String>,
}

// ---------------------------------------------------------------------------
// Serialized taxonomy document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyDocument {
    pub systems: Vec<SystemDocument>,
    #[serde(default)]
    pub attribute_lexicon: Vec<LexiconEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemDocument {
    pub system: BodySystem,
    #[serde(default)]
    pub red_flag_patterns: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<RedFlagDocument>,
    pub patterns: Vec<PatternDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternDocument {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub expected_attributes: Vec<ExpectedAttribute>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub suggested_exam: Vec<String>,
    #[serde(default)]
    pub suggested_studies: Vec<String>,
    #[serde(default)]
    pub considerations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedFlagDocument {
    pub id: String,
    pub description: String,
    pub key_phrases: Vec<KeyPhrase>,
    pub recommended_action: String,
}

// ---------------------------------------------------------------------------
// TaxonomyError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("Taxonomy contains no symptom patterns")]
    Empty,

    #[error("System declared more than once: {0}")]
    DuplicateSystem(BodySystem),

    #[error("Pattern declared more than once: {system}/{name}")]
    DuplicatePattern { system: BodySystem, name: String },

    #[error("Pattern with a blank name in system {0}")]
    BlankName(BodySystem),

    #[error("Pattern '{0}' has no expected attributes")]
    NoExpectedAttributes(String),

    #[error("Pattern '{pattern}' lists attribute '{attribute}' more than once")]
    DuplicateAttribute {
        pattern: String,
        attribute: AttributeKind,
    },

    #[error("Red-flag template declared more than once: {0}")]
    DuplicateRedFlag(String),

    #[error("Pattern '{pattern}' references unknown red-flag template '{id}'")]
    UnknownRedFlag { pattern: String, id: String },

    #[error("Red-flag template '{0}' needs at least two key phrases")]
    InsufficientKeyPhrases(String),

    #[error("Taxonomy load failed ({0}): {1}")]
    Load(String, String),

    #[error("Taxonomy parse failed ({0}): {1}")]
    Parse(String, String),
}

// ---------------------------------------------------------------------------
// Taxonomy
// ---------------------------------------------------------------------------

/// Validated, read-only catalog: body system → symptom pattern → expected
/// attributes, red-flag templates and suggested exam steps.
/// System declaration order is the order alerts and patterns are reported in.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    systems: Vec<SystemCatalog>,
    attribute_lexicon: Vec<LexiconEntry>,
}

impl Taxonomy {
    /// The bundled Spanish-language taxonomy.
    pub fn builtin() -> Self {
        Self::from_document(super::builtin::document()).expect("built-in taxonomy is valid")
    }

    /// Parse a taxonomy from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, TaxonomyError> {
        let document: TaxonomyDocument = serde_json::from_str(json)
            .map_err(|e| TaxonomyError::Parse("taxonomy document".into(), e.to_string()))?;
        Self::from_document(document)
    }

    /// Load a taxonomy JSON file.
    pub fn load(path: &Path) -> Result<Self, TaxonomyError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| TaxonomyError::Load(path.display().to_string(), e.to_string()))?;
        let document: TaxonomyDocument = serde_json::from_str(&json)
            .map_err(|e| TaxonomyError::Parse(path.display().to_string(), e.to_string()))?;
        Self::from_document(document)
    }

    /// Validate a document and build the runtime catalog.
    pub fn from_document(document: TaxonomyDocument) -> Result<Self, TaxonomyError> {
        let mut seen_systems = HashSet::new();
        let mut seen_red_flags = HashSet::new();
        let mut systems = Vec::with_capacity(document.systems.len());

        for system_doc in document.systems {
            let system = system_doc.system;
            if !seen_systems.insert(system) {
                return Err(TaxonomyError::DuplicateSystem(system));
            }

            let mut red_flags = Vec::with_capacity(system_doc.red_flags.len());
            for flag in system_doc.red_flags {
                if !seen_red_flags.insert(flag.id.clone()) {
                    return Err(TaxonomyError::DuplicateRedFlag(flag.id));
                }
                if flag.key_phrases.len() < 2 {
                    return Err(TaxonomyError::InsufficientKeyPhrases(flag.id));
                }
                red_flags.push(RedFlagTemplate {
                    id: flag.id,
                    system,
                    description: flag.description,
                    key_phrases: flag.key_phrases,
                    recommended_action: flag.recommended_action,
                });
            }

            let mut seen_names = HashSet::new();
            let mut patterns = Vec::with_capacity(system_doc.patterns.len());
            for pattern_doc in system_doc.patterns {
                let normalized_name = normalize(&pattern_doc.name).trim().to_string();
                if normalized_name.is_empty() {
                    return Err(TaxonomyError::BlankName(system));
                }
                if !seen_names.insert(normalized_name) {
                    return Err(TaxonomyError::DuplicatePattern {
                        system,
                        name: pattern_doc.name,
                    });
                }
                if pattern_doc.expected_attributes.is_empty() {
                    return Err(TaxonomyError::NoExpectedAttributes(pattern_doc.name));
                }
                let mut kinds = HashSet::new();
                for attribute in &pattern_doc.expected_attributes {
                    if !kinds.insert(attribute.kind) {
                        return Err(TaxonomyError::DuplicateAttribute {
                            pattern: pattern_doc.name.clone(),
                            attribute: attribute.kind,
                        });
                    }
                }
                if let Some(id) = pattern_doc
                    .red_flags
                    .iter()
                    .find(|id| !red_flags.iter().any(|f| &f.id == *id))
                {
                    return Err(TaxonomyError::UnknownRedFlag {
                        pattern: pattern_doc.name.clone(),
                        id: id.clone(),
                    });
                }

                patterns.push(Arc::new(SymptomPattern {
                    system,
                    name: pattern_doc.name,
                    aliases: pattern_doc.aliases,
                    expected_attributes: pattern_doc.expected_attributes,
                    red_flags: pattern_doc.red_flags,
                    suggested_exam: pattern_doc.suggested_exam,
                    suggested_studies: pattern_doc.suggested_studies,
                    considerations: pattern_doc.considerations,
                }));
            }

            systems.push(SystemCatalog {
                system,
                red_flag_patterns: system_doc.red_flag_patterns,
                red_flags,
                patterns,
            });
        }

        if systems.iter().all(|s| s.patterns.is_empty()) {
            return Err(TaxonomyError::Empty);
        }

        Ok(Self {
            systems,
            attribute_lexicon: document.attribute_lexicon,
        })
    }

    pub fn systems(&self) -> &[SystemCatalog] {
        &self.systems
    }

    pub fn catalog(&self, system: BodySystem) -> Option<&SystemCatalog> {
        self.systems.iter().find(|s| s.system == system)
    }

    /// All patterns in declaration order.
    pub fn patterns(&self) -> impl Iterator<Item = &Arc<SymptomPattern>> {
        self.systems.iter().flat_map(|s| s.patterns.iter())
    }

    pub fn pattern_count(&self) -> usize {
        self.systems.iter().map(|s| s.patterns.len()).sum()
    }

    /// Look up a pattern by system and name (case and accents ignored).
    pub fn find_pattern(&self, system: BodySystem, name: &str) -> Option<&Arc<SymptomPattern>> {
        let wanted = normalize(name);
        self.catalog(system)?
            .patterns
            .iter()
            .find(|p| normalize(&p.name) == wanted)
    }

    /// Position of a pattern in declaration order.
    pub fn pattern_position(&self, pattern: &SymptomPattern) -> Option<usize> {
        self.patterns()
            .position(|p| p.system == pattern.system && p.name == pattern.name)
    }

    /// All red-flag templates in system declaration order.
    pub fn red_flags(&self) -> impl Iterator<Item = &RedFlagTemplate> {
        self.systems.iter().flat_map(|s| s.red_flags.iter())
    }

    pub fn red_flag(&self, id: &str) -> Option<&RedFlagTemplate> {
        self.red_flags().find(|f| f.id == id)
    }

    /// Generic cues for an attribute kind.
    pub fn generic_cues(&self, kind: AttributeKind) -> &[String] {
        self.attribute_lexicon
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.cues.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the pattern is one of its system's red-flag-associated
    /// presentations. An entry matches when it names the pattern or is a
    /// word-bounded refinement of it ("cefalea súbita intensa" refines
    /// "cefalea"), or the other way round.
    pub fn is_red_flag_associated(&self, pattern: &SymptomPattern) -> bool {
        let Some(catalog) = self.catalog(pattern.system) else {
            return false;
        };
        let name = normalize(&pattern.name);
        let name = name.trim();
        catalog.red_flag_patterns.iter().any(|entry| {
            let entry = normalize(entry);
            let entry = entry.trim();
            refines(name, entry) || refines(entry, name)
        })
    }
}

/// `narrower` equals `broader` or extends it by whole words.
fn refines(broader: &str, narrower: &str) -> bool {
    narrower == broader
        || narrower
            .strip_prefix(broader)
            .is_some_and(|rest| rest.starts_with(' '))
}
