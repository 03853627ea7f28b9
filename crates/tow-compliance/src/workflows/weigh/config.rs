use serde::{Deserialize, Serialize};

/// How a GCM printed on a weighbridge summary competes with `GTM + GVM(hitched)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GcmPolicy {
    /// Use `GTM + GVM(hitched)` when both are known; the supplied figure is a fallback.
    #[default]
    PreferDerived,
    /// Use the supplied figure when present; the derived sum is a fallback.
    PreferSupplied,
}

impl GcmPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "derived" | "prefer_derived" => Some(Self::PreferDerived),
            "supplied" | "prefer_supplied" => Some(Self::PreferSupplied),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PreferDerived => "GTM + GVM (hitched)",
            Self::PreferSupplied => "supplied reading",
        }
    }
}

/// Engine settings shared by every weigh the service evaluates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub gcm_policy: GcmPolicy,
}
