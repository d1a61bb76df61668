use std::collections::HashMap;

use chrono::NaiveDate;
use entity::{Deal, DealStatus};
use uuid::Uuid;

/// Rotting-day floor for the `Rotting` quick filter. One day above the
/// staleness warning boundary; the two thresholds shipped that way and are
/// kept distinct on purpose.
pub const ROTTING_FILTER_MIN_DAYS: u32 = 10;
/// Amount floor for the `HighValue` quick filter.
pub const HIGH_VALUE_MIN_AMOUNT: i64 = 500_000;
/// Window for the `Closing` quick filter, inclusive of today.
pub const CLOSING_WINDOW_DAYS: i64 = 30;

/// Mutually exclusive filter preset; exactly one is active at a time.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum QuickFilter {
    #[default]
    All,
    Mine,
    Rotting,
    HighValue,
    Closing,
}

/// Independently toggled criteria; an unset field disables its check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdvancedFilters {
    pub owner_id: Option<Uuid>,
    /// `None` means "all statuses".
    pub status: Option<DealStatus>,
    pub amount_min: Option<i64>,
    pub amount_max: Option<i64>,
    pub rotting_min: Option<u32>,
}

impl AdvancedFilters {
    pub fn matches(&self, deal: &Deal) -> bool {
        if let Some(owner_id) = self.owner_id {
            if deal.owner_id != owner_id {
                return false;
            }
        }
        if let Some(status) = self.status {
            if deal.status != status {
                return false;
            }
        }
        if let (Some(min), Some(max)) = (self.amount_min, self.amount_max) {
            // An inverted range is a caller mistake; match nothing, never fail.
            if min > max {
                return false;
            }
        }
        if let Some(min) = self.amount_min {
            if deal.amount < min {
                return false;
            }
        }
        if let Some(max) = self.amount_max {
            if deal.amount > max {
                return false;
            }
        }
        if let Some(min) = self.rotting_min {
            if deal.rotting_days < min {
                return false;
            }
        }
        true
    }
}

/// Complete filter selection owned by the presentation layer and passed in
/// as plain values. All active criteria combine with logical AND.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DealFilter {
    pub search: Option<String>,
    pub quick: QuickFilter,
    pub advanced: AdvancedFilters,
}

/// Caller-supplied lookups the engine cannot derive from a deal alone:
/// who is asking, what day it is, and display names for ids.
#[derive(Clone, Debug)]
pub struct ViewContext {
    pub current_user: Uuid,
    pub today: NaiveDate,
    pub account_names: HashMap<Uuid, String>,
    pub owner_names: HashMap<Uuid, String>,
}

impl DealFilter {
    pub fn matches(&self, deal: &Deal, ctx: &ViewContext) -> bool {
        self.matches_search(deal, ctx) && self.matches_quick(deal, ctx) && self.advanced.matches(deal)
    }

    fn matches_search(&self, deal: &Deal, ctx: &ViewContext) -> bool {
        let Some(raw) = self.search.as_deref() else {
            return true;
        };
        let needle = raw.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        if deal.title.to_lowercase().contains(&needle) {
            return true;
        }
        if let Some(account_id) = deal.account_id {
            if let Some(name) = ctx.account_names.get(&account_id) {
                if name.to_lowercase().contains(&needle) {
                    return true;
                }
            }
        }
        ctx.owner_names
            .get(&deal.owner_id)
            .map(|name| name.to_lowercase().contains(&needle))
            .unwrap_or(false)
    }

    fn matches_quick(&self, deal: &Deal, ctx: &ViewContext) -> bool {
        match self.quick {
            QuickFilter::All => true,
            QuickFilter::Mine => deal.owner_id == ctx.current_user,
            QuickFilter::Rotting => {
                deal.status == DealStatus::Open && deal.rotting_days >= ROTTING_FILTER_MIN_DAYS
            }
            QuickFilter::HighValue => deal.amount >= HIGH_VALUE_MIN_AMOUNT,
            QuickFilter::Closing => match deal.expected_close_date {
                // A deal without a close date never matches this preset.
                Some(date) => {
                    let offset = (date - ctx.today).num_days();
                    (0..=CLOSING_WINDOW_DAYS).contains(&offset)
                }
                None => false,
            },
        }
    }
}

/// Clone the deals that pass `filter`. Callers own the result; the canonical
/// collection is never mutated through a view.
pub fn filter_deals(deals: &[Deal], filter: &DealFilter, ctx: &ViewContext) -> Vec<Deal> {
    deals
        .iter()
        .filter(|deal| filter.matches(deal, ctx))
        .cloned()
        .collect()
}
