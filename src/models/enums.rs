use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field} value: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form is also the serde representation.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(
    /// Body system a symptom pattern belongs to.
    BodySystem {
        Neurological => "neurological",
        Cardiopulmonary => "cardiopulmonary",
        Digestive => "digestive",
        Musculoskeletal => "musculoskeletal",
        General => "general",
    }
);

str_enum!(
    /// A characterizing attribute a symptom is expected to carry.
    /// Declaration order is irrelevant; taxonomy order governs output.
    AttributeKind {
        Intensity => "intensity",
        Duration => "duration",
        Location => "location",
        ModifyingFactors => "modifyingFactors",
        Progression => "progression",
        Frequency => "frequency",
        /// Character of the symptom (pulsating, oppressive, tingling...).
        Quality => "quality",
        Radiation => "radiation",
        Onset => "onset",
        Triggers => "triggers",
        AssociatedSymptoms => "associatedSymptoms",
    }
);

impl AttributeKind {
    /// Attributes that are always high-value missing information.
    pub const ESSENTIAL: [AttributeKind; 4] = [
        AttributeKind::Intensity,
        AttributeKind::Duration,
        AttributeKind::ModifyingFactors,
        AttributeKind::Progression,
    ];

    pub fn is_essential(&self) -> bool {
        Self::ESSENTIAL.contains(self)
    }
}

str_enum!(
    /// Priority tier for a missing piece of information.
    /// Ordering follows urgency: `High < Medium < Low`.
    PriorityTier {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
);

str_enum!(
    /// Language used to render follow-up questions.
    Language {
        En => "en",
        Es => "es",
    }
);

impl Default for Language {
    fn default() -> Self {
        Self::En
    }
}

str_enum!(Sex {
    Female => "female",
    Male => "male",
});

str_enum!(
    /// What the narrative says about current medications.
    MedicationStatus {
        NotMentioned => "notMentioned",
        /// Explicitly denied ("niega medicamentos").
        Denied => "denied",
        /// Medication use stated without names or doses.
        Unspecified => "unspecified",
        /// At least one dose is stated.
        Detailed => "detailed",
    }
);

impl Default for MedicationStatus {
    fn default() -> Self {
        Self::NotMentioned
    }
}

str_enum!(
    /// Clinical-history item asked about independently of any symptom.
    HistoryItem {
        Age => "age",
        Sex => "sex",
        Medications => "medications",
    }
);
