// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use coco_app::{Case, KpiSummary, Patient, RevenuePoint};
use time::OffsetDateTime;

/// Serves the canned demo caseload in place of a practice-management
/// backend. Timestamps are rebased from the demo anchor onto the real
/// clock so relative labels stay truthful.
pub struct DemoRuntime {
    now: OffsetDateTime,
}

impl DemoRuntime {
    pub fn new() -> Self {
        Self::with_clock(OffsetDateTime::now_utc())
    }

    pub fn with_clock(now: OffsetDateTime) -> Self {
        Self { now }
    }

    fn rebase(&self, mut case: Case) -> Case {
        let anchor = coco_testkit::demo_now();
        case.last_touched += self.now - anchor;
        if let Some(date) = case.recall_date {
            case.recall_date = Some(date + (self.now.date() - anchor.date()));
        }
        case
    }
}

impl coco_tui::AppRuntime for DemoRuntime {
    fn load_kpi_summary(&mut self) -> Result<KpiSummary> {
        Ok(coco_testkit::demo_kpi_summary())
    }

    fn load_revenue_week(&mut self) -> Result<Vec<RevenuePoint>> {
        Ok(coco_testkit::demo_revenue_week())
    }

    fn load_active_negotiations(&mut self) -> Result<Vec<Case>> {
        Ok(coco_testkit::demo_active_negotiations()
            .into_iter()
            .map(|case| self.rebase(case))
            .collect())
    }

    fn load_recall_queue(&mut self) -> Result<Vec<Case>> {
        Ok(coco_testkit::demo_recall_queue()
            .into_iter()
            .map(|case| self.rebase(case))
            .collect())
    }

    fn load_workflow_patient(&mut self) -> Result<Patient> {
        Ok(coco_testkit::demo_patient())
    }
}
