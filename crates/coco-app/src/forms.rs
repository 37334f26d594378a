// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::TreatmentKind;

/// The intake step form. The treatment selection fixes the pre-discount
/// cost the proposal builder works from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeForm {
    pub first_name: String,
    pub last_name: String,
    pub treatment: TreatmentKind,
}

impl Default for IntakeForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            treatment: TreatmentKind::InvisalignComplete,
        }
    }
}

impl IntakeForm {
    pub fn validate(&self) -> Result<()> {
        if self.first_name.trim().is_empty() {
            bail!("patient first name is required -- enter a first name and retry");
        }
        if self.last_name.trim().is_empty() {
            bail!("patient last name is required -- enter a last name and retry");
        }
        Ok(())
    }

    pub fn patient_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    pub fn treatment_cost_cents(&self) -> i64 {
        self.treatment.fee_cents()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    CreditCard,
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [Self; 2] = [Self::CreditCard, Self::BankTransfer];

    pub const fn label(self) -> &'static str {
        match self {
            Self::CreditCard => "credit card",
            Self::BankTransfer => "bank transfer",
        }
    }

    pub const fn detail(self) -> &'static str {
        match self {
            Self::CreditCard => "Stripe secure checkout",
            Self::BankTransfer => "ACH / eCheck",
        }
    }
}
