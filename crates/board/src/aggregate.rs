use entity::{Deal, Stage};
use serde::Serialize;

use crate::classify::{Priority, Staleness};

/// Cards surfaced per column before the overflow indicator takes over.
pub const DEFAULT_STAGE_CAP: usize = 8;

/// One kanban column: a stage, its metrics, and the capped card list.
#[derive(Clone, Debug, Serialize)]
pub struct BoardColumn {
    pub stage: Stage,
    /// Cards actually surfaced, at most the cap, in column order.
    pub deals: Vec<Deal>,
    /// Deals in the stage before the cap.
    pub count: usize,
    pub total_amount: i64,
    pub critical_count: usize,
    pub hot_count: usize,
    /// Deals hidden below the cap, for the "N more" indicator.
    pub overflow: usize,
}

/// Group a filtered deal set by stage, in stage-ordinal order.
pub fn build_board(deals: &[Deal], stages: &[Stage], cap: usize) -> Vec<BoardColumn> {
    let mut ordered: Vec<&Stage> = stages.iter().collect();
    ordered.sort_by_key(|stage| stage.position);
    ordered
        .into_iter()
        .map(|stage| build_column(deals, stage, cap))
        .collect()
}

fn build_column(deals: &[Deal], stage: &Stage, cap: usize) -> BoardColumn {
    let mut members: Vec<Deal> = deals
        .iter()
        .filter(|deal| deal.stage_id == stage.id)
        .cloned()
        .collect();
    let count = members.len();
    let total_amount = members.iter().map(|deal| deal.amount).sum();
    let critical_count = members
        .iter()
        .filter(|deal| Staleness::of(deal) == Staleness::Critical)
        .count();
    let hot_count = members
        .iter()
        .filter(|deal| Priority::of(deal) == Priority::Hot)
        .count();

    // Column order is fixed: hotter tiers first, then larger amounts. It
    // overrides whatever sort the table view has active.
    members.sort_by(|a, b| {
        Priority::of(a)
            .cmp(&Priority::of(b))
            .then_with(|| b.amount.cmp(&a.amount))
    });
    members.truncate(cap);
    let overflow = count - members.len();

    BoardColumn {
        stage: stage.clone(),
        deals: members,
        count,
        total_amount,
        critical_count,
        hot_count,
        overflow,
    }
}
