// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, Weekday};

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseStatus {
    New,
    Discovery,
    Proposal,
    Contract,
    Active,
    Observation,
}

impl CaseStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Discovery => "discovery",
            Self::Proposal => "proposal",
            Self::Contract => "contract",
            Self::Active => "active",
            Self::Observation => "observation",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(Self::New),
            "discovery" => Some(Self::Discovery),
            "proposal" => Some(Self::Proposal),
            "contract" => Some(Self::Contract),
            "active" => Some(Self::Active),
            "observation" => Some(Self::Observation),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Probability {
    High,
    Medium,
    Low,
}

impl Probability {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// The three intake offerings. Fees are fixed per treatment and feed the
/// proposal calculator as the pre-discount treatment cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreatmentKind {
    InvisalignComplete,
    ComprehensiveBraces,
    Phase1Early,
}

impl TreatmentKind {
    pub const ALL: [Self; 3] = [
        Self::InvisalignComplete,
        Self::ComprehensiveBraces,
        Self::Phase1Early,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::InvisalignComplete => "Invisalign Complete",
            Self::ComprehensiveBraces => "Comprehensive Braces",
            Self::Phase1Early => "Phase 1 Early Treatment",
        }
    }

    pub const fn fee_cents(self) -> i64 {
        match self {
            Self::InvisalignComplete => 550_000,
            Self::ComprehensiveBraces => 480_000,
            Self::Phase1Early => 320_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub insurance_carrier: String,
    pub treatment: Option<TreatmentKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub id: CaseId,
    pub patient_id: PatientId,
    pub patient_name: String,
    pub status: CaseStatus,
    pub last_touched: OffsetDateTime,
    pub total_value_cents: i64,
    pub assigned_to: String,
    pub next_task: Option<String>,
    pub observation_reason: Option<String>,
    pub recall_date: Option<Date>,
    pub probability: Option<Probability>,
}

/// One weekday of the revenue/starts series on the dashboard chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub day: Weekday,
    pub revenue_cents: i64,
    pub starts: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KpiSummary {
    pub cash_collected_mtd_cents: i64,
    pub cash_delta_percent: i32,
    pub time_to_signature_hours: i32,
    pub time_to_signature_delta_hours: i32,
    pub conversion_rate_percent: i32,
    pub conversion_target_percent: i32,
    pub recall_queue_size: usize,
    pub recall_overdue: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewKind {
    Dashboard,
    CaseWorkflow,
    Team,
    Settings,
}

impl ViewKind {
    pub const ALL: [Self; 4] = [
        Self::Dashboard,
        Self::CaseWorkflow,
        Self::Team,
        Self::Settings,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::CaseWorkflow => "case",
            Self::Team => "team",
            Self::Settings => "settings",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dashboard" => Some(Self::Dashboard),
            "case" => Some(Self::CaseWorkflow),
            "team" => Some(Self::Team),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }

    /// Team and settings ship as Phase 2 placeholders.
    pub const fn is_placeholder(self) -> bool {
        matches!(self, Self::Team | Self::Settings)
    }
}

#[cfg(test)]
mod tests {
    use super::{CaseStatus, Probability, TreatmentKind, ViewKind};

    #[test]
    fn case_status_round_trips_through_str() {
        for status in [
            CaseStatus::New,
            CaseStatus::Discovery,
            CaseStatus::Proposal,
            CaseStatus::Contract,
            CaseStatus::Active,
            CaseStatus::Observation,
        ] {
            assert_eq!(CaseStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(CaseStatus::parse("archived"), None);
    }

    #[test]
    fn probability_round_trips_through_str() {
        for probability in [Probability::High, Probability::Medium, Probability::Low] {
            assert_eq!(Probability::parse(probability.as_str()), Some(probability));
        }
    }

    #[test]
    fn treatment_fees_match_the_offer_sheet() {
        assert_eq!(TreatmentKind::InvisalignComplete.fee_cents(), 550_000);
        assert_eq!(TreatmentKind::ComprehensiveBraces.fee_cents(), 480_000);
        assert_eq!(TreatmentKind::Phase1Early.fee_cents(), 320_000);
    }

    #[test]
    fn view_parse_accepts_labels_and_rejects_unknown() {
        for view in ViewKind::ALL {
            assert_eq!(ViewKind::parse(view.label()), Some(view));
        }
        assert_eq!(ViewKind::parse("reports"), None);
        assert!(ViewKind::Team.is_placeholder());
        assert!(!ViewKind::Dashboard.is_placeholder());
    }
}
