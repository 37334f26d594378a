// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

/// The objections the coach has a canned response for. A fixed table, not a
/// runtime-extensible dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectionKind {
    Price,
    Spouse,
    Timing,
    Competitor,
}

impl ObjectionKind {
    pub const ALL: [Self; 4] = [Self::Price, Self::Spouse, Self::Timing, Self::Competitor];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Spouse => "spouse",
            Self::Timing => "timing",
            Self::Competitor => "competitor",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "price" => Some(Self::Price),
            "spouse" => Some(Self::Spouse),
            "timing" => Some(Self::Timing),
            "competitor" => Some(Self::Competitor),
            _ => None,
        }
    }

    pub const fn script(self) -> &'static str {
        match self {
            Self::Price => {
                "I understand budget is a priority. Many patients find that when we break it \
                 down to the monthly investment of $200, it becomes much more manageable, less \
                 than a daily coffee. Plus, locking in this rate today avoids future fee \
                 increases."
            }
            Self::Spouse => {
                "That makes perfect sense; it's a big decision. I can print out a specific \
                 'Partner Summary' for you that highlights the clinical necessity and the \
                 financial options we discussed. Would 5 PM be a good time for a quick 3-way \
                 call to answer their questions?"
            }
            Self::Timing => {
                "Life is definitely busy. However, clinical evidence suggests that waiting \
                 often complicates the treatment, potentially increasing the duration later. If \
                 we scan today, we can at least lock in your treatment plan validity for 30 \
                 days."
            }
            Self::Competitor => {
                "I appreciate you doing your research. Dr. Ramzi specializes in complex aligner \
                 cases that others might treat with braces. Our fee is all-inclusive, retainers \
                 and refinements included, which often come as hidden costs elsewhere."
            }
        }
    }
}
