// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

/// Flat courtesy discount for paying the full balance up front.
pub const PAY_IN_FULL_DISCOUNT_PERCENT: i64 = 5;

/// Slider ranges for the builder inputs. Inputs are clamped here so every
/// reachable state is a valid domain for the evaluation.
pub const DOWN_PAYMENT_STEP_CENTS: i64 = 10_000;
pub const INSURANCE_STEP_CENTS: i64 = 10_000;
pub const INSURANCE_MAX_CENTS: i64 = 300_000;
pub const TERM_MIN_MONTHS: i32 = 1;
pub const TERM_MAX_MONTHS: i32 = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresetColor {
    Emerald,
    Blue,
    Amber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialPreset {
    pub name: &'static str,
    pub min_down_percent: i64,
    pub max_term_months: i32,
    pub min_monthly_cents: i64,
    pub color: PresetColor,
}

const CONSERVATIVE: FinancialPreset = FinancialPreset {
    name: "Conservative",
    min_down_percent: 30,
    max_term_months: 12,
    min_monthly_cents: 20_000,
    color: PresetColor::Emerald,
};

const BALANCED: FinancialPreset = FinancialPreset {
    name: "Balanced",
    min_down_percent: 20,
    max_term_months: 18,
    min_monthly_cents: 15_000,
    color: PresetColor::Blue,
};

const AGGRESSIVE: FinancialPreset = FinancialPreset {
    name: "Aggressive",
    min_down_percent: 10,
    max_term_months: 24,
    min_monthly_cents: 10_000,
    color: PresetColor::Amber,
};

/// The three fixed lending policies the deal-consistency engine validates
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresetKind {
    Conservative,
    Balanced,
    Aggressive,
}

impl PresetKind {
    pub const ALL: [Self; 3] = [Self::Conservative, Self::Balanced, Self::Aggressive];

    pub const fn preset(self) -> &'static FinancialPreset {
        match self {
            Self::Conservative => &CONSERVATIVE,
            Self::Balanced => &BALANCED,
            Self::Aggressive => &AGGRESSIVE,
        }
    }

    pub const fn label(self) -> &'static str {
        self.preset().name
    }
}

/// The builder's live input state. Mutations go through the setters so the
/// slider clamps and the verification reset cannot be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalInputs {
    pub treatment_cost_cents: i64,
    pub preset: PresetKind,
    pub down_payment_cents: i64,
    pub term_months: i32,
    pub insurance_cents: i64,
    pub insurance_verified: bool,
    pub pay_in_full: bool,
}

impl ProposalInputs {
    /// Fresh inputs for a treatment cost, seeded at the preset's floor down
    /// payment and ceiling term.
    pub fn for_preset(treatment_cost_cents: i64, preset: PresetKind) -> Self {
        Self {
            treatment_cost_cents,
            preset,
            down_payment_cents: min_down_cents(treatment_cost_cents, preset),
            term_months: preset.preset().max_term_months,
            insurance_cents: 0,
            insurance_verified: false,
            pay_in_full: false,
        }
    }

    /// Switching strategy resets down payment and term to the new preset's
    /// minimum and maximum.
    pub fn select_preset(&mut self, preset: PresetKind) {
        self.preset = preset;
        self.down_payment_cents = min_down_cents(self.treatment_cost_cents, preset);
        self.term_months = preset.preset().max_term_months;
    }

    pub fn set_down_payment(&mut self, cents: i64) {
        self.down_payment_cents = cents.clamp(0, self.treatment_cost_cents);
    }

    pub fn set_term_months(&mut self, months: i32) {
        self.term_months = months.clamp(TERM_MIN_MONTHS, TERM_MAX_MONTHS);
    }

    /// Any change to the estimate invalidates a prior manual verification.
    pub fn set_insurance(&mut self, cents: i64) {
        let clamped = cents.clamp(0, INSURANCE_MAX_CENTS);
        if clamped != self.insurance_cents {
            self.insurance_verified = false;
        }
        self.insurance_cents = clamped;
    }

    pub fn toggle_verified(&mut self) {
        self.insurance_verified = !self.insurance_verified;
    }

    pub fn set_pay_in_full(&mut self, pay_in_full: bool) {
        self.pay_in_full = pay_in_full;
    }

    pub fn evaluate(&self) -> Evaluation {
        evaluate(self)
    }

    /// The upward notification payload: `Some` exactly when the deal passes
    /// the consistency engine.
    pub fn proposal(&self) -> Option<Proposal> {
        let evaluation = self.evaluate();
        if !evaluation.is_valid() {
            return None;
        }

        Some(Proposal {
            treatment_cost_cents: evaluation.effective_cost_cents,
            down_payment_cents: evaluation.due_today_cents,
            term_months: if self.pay_in_full { 0 } else { self.term_months },
            insurance_estimate_cents: self.insurance_cents,
            discount_cents: if self.pay_in_full {
                evaluation.discount_cents
            } else {
                0
            },
            apr_percent: 0,
            pay_in_full: self.pay_in_full,
            insurance_verified: self.insurance_verified,
        })
    }
}

/// A fully derived financing proposal, constructed fresh on every valid
/// recalculation. `treatment_cost_cents` is the post-discount figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub treatment_cost_cents: i64,
    pub down_payment_cents: i64,
    pub term_months: i32,
    pub insurance_estimate_cents: i64,
    pub discount_cents: i64,
    pub apr_percent: i32,
    pub pay_in_full: bool,
    pub insurance_verified: bool,
}

impl Proposal {
    pub fn monthly_payment_cents(&self) -> i64 {
        if self.pay_in_full || self.term_months <= 0 {
            return 0;
        }
        let remaining =
            self.treatment_cost_cents - self.down_payment_cents - self.insurance_estimate_cents;
        divide_rounded(remaining.max(0), i64::from(self.term_months))
    }
}

/// Everything the builder surface needs: derived amounts plus the three
/// deal-consistency verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub effective_cost_cents: i64,
    pub discount_cents: i64,
    pub due_today_cents: i64,
    pub monthly_payment_cents: i64,
    pub min_down_cents: i64,
    pub down_ok: bool,
    pub term_ok: bool,
    pub monthly_ok: bool,
}

impl Evaluation {
    pub const fn is_valid(&self) -> bool {
        self.down_ok && self.term_ok && self.monthly_ok
    }
}

/// 5% of the treatment cost, rounded to the nearest dollar.
pub fn pay_in_full_discount_cents(treatment_cost_cents: i64) -> i64 {
    let dollars = (treatment_cost_cents * PAY_IN_FULL_DISCOUNT_PERCENT + 5_000) / 10_000;
    dollars * 100
}

pub fn min_down_cents(treatment_cost_cents: i64, preset: PresetKind) -> i64 {
    treatment_cost_cents * preset.preset().min_down_percent / 100
}

pub fn evaluate(inputs: &ProposalInputs) -> Evaluation {
    let preset = inputs.preset.preset();
    let discount_cents = pay_in_full_discount_cents(inputs.treatment_cost_cents);
    let effective_cost_cents = if inputs.pay_in_full {
        inputs.treatment_cost_cents - discount_cents
    } else {
        inputs.treatment_cost_cents
    };

    let monthly_payment_cents = if !inputs.pay_in_full && inputs.term_months > 0 {
        let remaining =
            effective_cost_cents - inputs.down_payment_cents - inputs.insurance_cents;
        divide_rounded(remaining.max(0), i64::from(inputs.term_months))
    } else {
        0
    };

    let due_today_cents = if inputs.pay_in_full {
        effective_cost_cents - inputs.insurance_cents
    } else {
        inputs.down_payment_cents
    };

    // The consistency checks only bind financed deals.
    let min_down = min_down_cents(inputs.treatment_cost_cents, inputs.preset);
    let down_ok = inputs.pay_in_full || inputs.down_payment_cents >= min_down;
    let term_ok = inputs.pay_in_full || inputs.term_months <= preset.max_term_months;
    let monthly_ok = inputs.pay_in_full || monthly_payment_cents >= preset.min_monthly_cents;

    Evaluation {
        effective_cost_cents,
        discount_cents: if inputs.pay_in_full { discount_cents } else { 0 },
        due_today_cents,
        monthly_payment_cents,
        min_down_cents: min_down,
        down_ok,
        term_ok,
        monthly_ok,
    }
}

fn divide_rounded(numerator: i64, denominator: i64) -> i64 {
    (numerator + denominator / 2) / denominator
}
