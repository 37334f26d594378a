// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Deterministic demo caseload for the practice cockpit. The demo runtime
//! serves these rows in place of a backend case/patient API, and the TUI
//! tests lean on them for fixtures.

use coco_app::{
    Case, CaseId, CaseStatus, KpiSummary, Patient, PatientId, Probability, RevenuePoint,
    TreatmentKind,
};
use time::macros::datetime;
use time::{Date, Duration, OffsetDateTime, Weekday};

/// Fixed clock anchor so relative labels ("10m ago", "overdue") are stable
/// in tests and demos.
pub fn demo_now() -> OffsetDateTime {
    datetime!(2026-02-13 09:00 UTC)
}

pub fn demo_patient() -> Patient {
    Patient {
        id: PatientId::new(1),
        name: "Sarah Mitchell".to_owned(),
        email: "sarah.mitchell@example.com".to_owned(),
        phone: "555-0123-4567".to_owned(),
        insurance_carrier: "Delta Dental PPO".to_owned(),
        treatment: Some(TreatmentKind::InvisalignComplete),
    }
}

/// The two deals currently in play on the dashboard.
pub fn demo_active_negotiations() -> Vec<Case> {
    let now = demo_now();
    vec![
        Case {
            id: CaseId::new(1),
            patient_id: PatientId::new(1),
            patient_name: "Sarah Mitchell".to_owned(),
            status: CaseStatus::Proposal,
            last_touched: now - Duration::minutes(10),
            total_value_cents: 550_000,
            assigned_to: "Sarah T.".to_owned(),
            next_task: None,
            observation_reason: None,
            recall_date: None,
            probability: Some(Probability::High),
        },
        Case {
            id: CaseId::new(2),
            patient_id: PatientId::new(2),
            patient_name: "John Desmond".to_owned(),
            status: CaseStatus::Discovery,
            last_touched: now - Duration::hours(1),
            total_value_cents: 620_000,
            assigned_to: "Dr. Ramzi".to_owned(),
            next_task: None,
            observation_reason: None,
            recall_date: None,
            probability: Some(Probability::Medium),
        },
    ]
}

/// Observation cases due for recall. Emma is due today; Mike slipped past
/// his date.
pub fn demo_recall_queue() -> Vec<Case> {
    let now = demo_now();
    vec![
        Case {
            id: CaseId::new(3),
            patient_id: PatientId::new(3),
            patient_name: "Emma Kline".to_owned(),
            status: CaseStatus::Observation,
            last_touched: now - Duration::days(30),
            total_value_cents: 480_000,
            assigned_to: "Sarah T.".to_owned(),
            next_task: Some("recall call".to_owned()),
            observation_reason: Some("Spouse Consult".to_owned()),
            recall_date: Some(now.date()),
            probability: None,
        },
        Case {
            id: CaseId::new(4),
            patient_id: PatientId::new(4),
            patient_name: "Mike Ross".to_owned(),
            status: CaseStatus::Observation,
            last_touched: now - Duration::days(45),
            total_value_cents: 580_000,
            assigned_to: "Sarah T.".to_owned(),
            next_task: Some("recall call".to_owned()),
            observation_reason: Some("Insurance Waiting".to_owned()),
            recall_date: Some(now.date() - Duration::days(3)),
            probability: None,
        },
    ]
}

pub fn demo_revenue_week() -> Vec<RevenuePoint> {
    vec![
        RevenuePoint {
            day: Weekday::Monday,
            revenue_cents: 420_000,
            starts: 2,
        },
        RevenuePoint {
            day: Weekday::Tuesday,
            revenue_cents: 680_000,
            starts: 3,
        },
        RevenuePoint {
            day: Weekday::Wednesday,
            revenue_cents: 540_000,
            starts: 2,
        },
        RevenuePoint {
            day: Weekday::Thursday,
            revenue_cents: 920_000,
            starts: 5,
        },
        RevenuePoint {
            day: Weekday::Friday,
            revenue_cents: 810_000,
            starts: 4,
        },
    ]
}

pub fn demo_kpi_summary() -> KpiSummary {
    KpiSummary {
        cash_collected_mtd_cents: 14_250_000,
        cash_delta_percent: 12,
        time_to_signature_hours: 28,
        time_to_signature_delta_hours: -4,
        conversion_rate_percent: 68,
        conversion_target_percent: 70,
        recall_queue_size: 6,
        recall_overdue: 3,
    }
}

/// Minimal case builder for tests that only care about a couple of fields.
pub fn sample_case(id: i64, patient_name: &str, status: CaseStatus) -> Case {
    Case {
        id: CaseId::new(id),
        patient_id: PatientId::new(id),
        patient_name: patient_name.to_owned(),
        status,
        last_touched: demo_now(),
        total_value_cents: 500_000,
        assigned_to: "Sarah T.".to_owned(),
        next_task: None,
        observation_reason: None,
        recall_date: None,
        probability: None,
    }
}

pub fn overdue_recall_date() -> Date {
    demo_now().date() - Duration::days(3)
}
