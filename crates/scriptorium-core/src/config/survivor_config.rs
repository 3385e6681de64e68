//! Survivor-set engine configuration.

use serde::{Deserialize, Serialize};

/// Which slots a record's legal vocabulary is allowed to borrow from zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LegalityMode {
    /// All three legal sets are exactly the record's own values.
    #[default]
    Strict,
    /// MIDDLE set is expanded through the zone index; prefix/suffix stay strict.
    ZoneUnion,
}

/// Granularity of AZC zones used for MIDDLE expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ZoneGranularity {
    /// One zone per AZC folio.
    #[default]
    Folio,
    /// One zone per (AZC folio, placement family), e.g. `R1`/`R2` share `R`.
    Placement,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SurvivorConfig {
    /// Legality mode. Default: strict.
    pub mode: Option<LegalityMode>,
    /// Zone granularity for zone_union mode. Default: folio.
    pub zone_granularity: Option<ZoneGranularity>,
    /// Worker threads for batch computation. Default: rayon's global pool.
    pub threads: Option<usize>,
}

impl SurvivorConfig {
    pub fn effective_mode(&self) -> LegalityMode {
        self.mode.unwrap_or_default()
    }

    pub fn effective_zone_granularity(&self) -> ZoneGranularity {
        self.zone_granularity.unwrap_or_default()
    }
}
