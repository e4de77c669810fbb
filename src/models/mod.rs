pub mod enums;

pub use enums::{
    AttributeKind, BodySystem, HistoryItem, InvalidEnum, Language, MedicationStatus, PriorityTier,
    Sex,
};
