//! Schema for PIP identity documents.
//!
//! The schema is a static, declared-order registry of preference
//! sub-sections and their fields. Both the validator and the normalizer
//! walk the same tables, so allowed values and defaults cannot drift
//! apart.

use serde_json::Value;

/// Validation rule for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Value must be one of a fixed set of strings.
    OneOf(&'static [&'static str]),
    /// Value must be a JSON boolean.
    Bool,
    /// Value must be a list of notification channels from a fixed set.
    /// Invalid entries are reported as one aggregate error.
    Channels(&'static [&'static str]),
    /// Value must be an ISO 639-1 language tag (optional region).
    Language,
    /// Value must be an ISO 4217 currency code.
    Currency,
    /// Value must be a non-negative number. Checked by JSON type,
    /// never by truthiness, so booleans are rejected.
    NonNegativeNumber,
    /// Free-form value, never validated.
    Any,
}

/// Default value for a field, if the schema declares one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Str(&'static str),
    Bool(bool),
    StrList(&'static [&'static str]),
    None,
}

impl FieldDefault {
    /// Materialize the default as a JSON value.
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Self::Str(s) => Some(Value::String((*s).to_string())),
            Self::Bool(b) => Some(Value::Bool(*b)),
            Self::StrList(entries) => Some(Value::Array(
                entries
                    .iter()
                    .map(|s| Value::String((*s).to_string()))
                    .collect(),
            )),
            Self::None => None,
        }
    }
}

/// A single field within a sub-section.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Field name as it appears in the document
    pub name: &'static str,
    /// Rule applied when the field is present
    pub rule: FieldRule,
    /// Default applied when the field is absent
    pub default: FieldDefault,
}

/// A canonical preference sub-section.
#[derive(Debug, Clone, Copy)]
pub struct SectionSpec {
    /// Sub-section name under `preferences`
    pub name: &'static str,
    /// Fields in declared order
    pub fields: &'static [FieldSpec],
}

impl SectionSpec {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

const fn field(name: &'static str, rule: FieldRule, default: FieldDefault) -> FieldSpec {
    FieldSpec {
        name,
        rule,
        default,
    }
}

/// Canonical preference sub-sections in declared order.
///
/// Caller-defined sub-sections outside this list pass through
/// validation and normalization untouched.
pub const PREFERENCE_SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        name: "ui",
        fields: &[
            field(
                "theme",
                FieldRule::OneOf(&["light", "dark", "auto", "high-contrast"]),
                FieldDefault::Str("auto"),
            ),
            field(
                "density",
                FieldRule::OneOf(&["compact", "comfortable", "spacious"]),
                FieldDefault::Str("comfortable"),
            ),
            field(
                "fontSize",
                FieldRule::OneOf(&["small", "medium", "large", "xlarge"]),
                FieldDefault::Str("medium"),
            ),
            field("colorBlindMode", FieldRule::Bool, FieldDefault::Bool(false)),
            field("reducedMotion", FieldRule::Bool, FieldDefault::Bool(false)),
        ],
    },
    SectionSpec {
        name: "interaction",
        fields: &[
            field(
                "tone",
                FieldRule::OneOf(&["formal", "casual", "friendly", "professional", "minimal"]),
                FieldDefault::Str("friendly"),
            ),
            field(
                "verbosity",
                FieldRule::OneOf(&["minimal", "moderate", "detailed", "verbose"]),
                FieldDefault::Str("moderate"),
            ),
            field(
                "confirmationStyle",
                FieldRule::OneOf(&["always", "destructive-only", "never"]),
                FieldDefault::Str("destructive-only"),
            ),
            field("keyboardShortcuts", FieldRule::Bool, FieldDefault::Bool(true)),
        ],
    },
    SectionSpec {
        name: "automation",
        fields: &[
            field(
                "level",
                FieldRule::OneOf(&["none", "suggestions", "auto-approve-safe", "aggressive"]),
                FieldDefault::Str("suggestions"),
            ),
            field("aiSuggestions", FieldRule::Bool, FieldDefault::Bool(true)),
            field("autoSave", FieldRule::Bool, FieldDefault::Bool(true)),
            field("predictiveActions", FieldRule::Bool, FieldDefault::Bool(false)),
            field(
                "maxAutomationScope",
                FieldRule::OneOf(&["local", "session", "account", "global"]),
                FieldDefault::Str("session"),
            ),
        ],
    },
    SectionSpec {
        name: "notifications",
        fields: &[
            field("enabled", FieldRule::Bool, FieldDefault::Bool(true)),
            field(
                "frequency",
                FieldRule::OneOf(&["realtime", "batched", "digest", "off"]),
                FieldDefault::Str("batched"),
            ),
            field(
                "channels",
                FieldRule::Channels(&["in-app", "email", "push", "sms"]),
                FieldDefault::StrList(&["in-app"]),
            ),
        ],
    },
    SectionSpec {
        name: "content",
        fields: &[
            field("language", FieldRule::Language, FieldDefault::Str("en")),
            field(
                "dateFormat",
                FieldRule::OneOf(&["ISO", "US", "EU", "relative"]),
                FieldDefault::Str("ISO"),
            ),
            field(
                "timeFormat",
                FieldRule::OneOf(&["12h", "24h"]),
                FieldDefault::Str("24h"),
            ),
            field("currency", FieldRule::Currency, FieldDefault::Str("USD")),
            field("contentFilter", FieldRule::Any, FieldDefault::Str("moderate")),
        ],
    },
    SectionSpec {
        name: "privacy",
        fields: &[
            field(
                "dataSharing",
                FieldRule::OneOf(&["none", "anonymized", "full"]),
                FieldDefault::Str("anonymized"),
            ),
            field("analytics", FieldRule::Bool, FieldDefault::Bool(true)),
            field("personalization", FieldRule::Bool, FieldDefault::Bool(true)),
        ],
    },
    SectionSpec {
        name: "accessibility",
        fields: &[
            field("screenReader", FieldRule::Bool, FieldDefault::Bool(false)),
            field("highContrast", FieldRule::Bool, FieldDefault::Bool(false)),
            field(
                "focusIndicators",
                FieldRule::OneOf(&["minimal", "standard", "enhanced"]),
                FieldDefault::Str("standard"),
            ),
        ],
    },
    SectionSpec {
        name: "risk",
        fields: &[
            field(
                "tolerance",
                FieldRule::OneOf(&["conservative", "moderate", "aggressive"]),
                FieldDefault::Str("moderate"),
            ),
            field(
                "maxTransactionAmount",
                FieldRule::NonNegativeNumber,
                FieldDefault::None,
            ),
            field("requireConfirmation", FieldRule::Bool, FieldDefault::Bool(true)),
        ],
    },
];

/// Known `behaviors` fields. No defaults are declared for behaviors.
pub const BEHAVIOR_FIELDS: &[FieldSpec] = &[
    field(
        "workflow",
        FieldRule::OneOf(&["linear", "exploratory", "task-focused", "multi-tasking"]),
        FieldDefault::None,
    ),
    field(
        "learningStyle",
        FieldRule::OneOf(&["tutorial", "examples", "trial-and-error", "documentation"]),
        FieldDefault::None,
    ),
    field(
        "decisionSpeed",
        FieldRule::OneOf(&["deliberate", "balanced", "quick"]),
        FieldDefault::None,
    ),
];

/// Look up a canonical sub-section by name.
pub fn section(name: &str) -> Option<&'static SectionSpec> {
    PREFERENCE_SECTIONS.iter().find(|s| s.name == name)
}

/// Check whether a `preferences` key names a canonical sub-section.
pub fn is_canonical_section(name: &str) -> bool {
    section(name).is_some()
}
