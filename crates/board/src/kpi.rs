use entity::{Deal, DealStatus};
use serde::Serialize;

use crate::filter::ROTTING_FILTER_MIN_DAYS;

/// Aggregate figures for the header strip above both views.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PipelineKpis {
    pub open_amount: i64,
    /// Forecast value: weighted amount summed over open deals.
    pub weighted_open_amount: i64,
    pub won_amount: i64,
    /// `won / (won + lost)`; 0 when nothing has been decided yet.
    pub win_rate: f64,
    /// Mean rotting days across open deals; 0 when none are open.
    pub avg_rotting_days: f64,
    /// Open deals at or past the rotting quick-filter boundary.
    pub rotting_count: usize,
}

pub fn compute_kpis(deals: &[Deal]) -> PipelineKpis {
    let mut kpis = PipelineKpis::default();
    let mut open = 0usize;
    let mut won = 0usize;
    let mut lost = 0usize;
    let mut rotting_total = 0u64;

    for deal in deals {
        match deal.status {
            DealStatus::Open => {
                open += 1;
                kpis.open_amount += deal.amount;
                kpis.weighted_open_amount += deal.weighted_amount();
                rotting_total += u64::from(deal.rotting_days);
                if deal.rotting_days >= ROTTING_FILTER_MIN_DAYS {
                    kpis.rotting_count += 1;
                }
            }
            DealStatus::Won => {
                won += 1;
                kpis.won_amount += deal.amount;
            }
            DealStatus::Lost => lost += 1,
        }
    }

    if won + lost > 0 {
        kpis.win_rate = won as f64 / (won + lost) as f64;
    }
    if open > 0 {
        kpis.avg_rotting_days = rotting_total as f64 / open as f64;
    }
    kpis
}
