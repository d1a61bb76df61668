use entity::{weighted_amount, Deal, DealStatus};

/// Weighted-amount floor for the hot tier.
pub const HOT_WEIGHTED_MIN: i64 = 500_000;
/// Weighted-amount floor for the warm tier.
pub const WARM_WEIGHTED_MIN: i64 = 100_000;
/// Open deals rotting at least this long are critical.
pub const CRITICAL_ROTTING_DAYS: u32 = 14;
/// Open deals rotting at least this long carry a warning.
pub const WARNING_ROTTING_DAYS: u32 = 9;

/// Forecast-driven attention tier. Variant order doubles as board-column
/// ordering: hot cards sort before warm, warm before normal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Priority {
    Hot,
    Warm,
    Normal,
}

impl Priority {
    /// Tier from amount and close probability. Total; no failure modes.
    pub fn classify(amount: i64, probability: i16) -> Self {
        let weighted = weighted_amount(amount, probability);
        if weighted >= HOT_WEIGHTED_MIN {
            Priority::Hot
        } else if weighted >= WARM_WEIGHTED_MIN {
            Priority::Warm
        } else {
            Priority::Normal
        }
    }

    pub fn of(deal: &Deal) -> Self {
        Self::classify(deal.amount, deal.probability)
    }
}

/// Stagnation severity derived from rotting days.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Staleness {
    None,
    Warning,
    Critical,
}

impl Staleness {
    /// Severity for a deal. Decided deals never rot, whatever their count says.
    pub fn classify(rotting_days: u32, status: DealStatus) -> Self {
        if status != DealStatus::Open {
            return Staleness::None;
        }
        if rotting_days >= CRITICAL_ROTTING_DAYS {
            Staleness::Critical
        } else if rotting_days >= WARNING_ROTTING_DAYS {
            Staleness::Warning
        } else {
            Staleness::None
        }
    }

    pub fn of(deal: &Deal) -> Self {
        Self::classify(deal.rotting_days, deal.status)
    }
}
