use std::cmp::Ordering;
use std::collections::HashMap;

use entity::{Deal, DealStatus, Stage};
use uuid::Uuid;

/// The single active sort field for the table view.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SortField {
    Amount,
    RottingDays,
    ExpectedCloseDate,
    Title,
    Owner,
    Stage,
    Status,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Stable in-place sort of the filtered set.
///
/// Stage ordering uses each deal's stage probability as a funnel-position
/// proxy; two stages sharing a probability compare equal and stability
/// keeps their deals in input order.
pub fn sort_deals(
    deals: &mut [Deal],
    field: SortField,
    direction: SortDirection,
    stages: &[Stage],
    owner_names: &HashMap<Uuid, String>,
) {
    let stage_probability: HashMap<Uuid, i16> = stages
        .iter()
        .map(|stage| (stage.id, stage.probability))
        .collect();
    deals.sort_by(|a, b| compare(a, b, field, direction, &stage_probability, owner_names));
}

fn compare(
    a: &Deal,
    b: &Deal,
    field: SortField,
    direction: SortDirection,
    stage_probability: &HashMap<Uuid, i16>,
    owner_names: &HashMap<Uuid, String>,
) -> Ordering {
    let ordering = match field {
        SortField::Amount => a.amount.cmp(&b.amount),
        SortField::RottingDays => a.rotting_days.cmp(&b.rotting_days),
        SortField::ExpectedCloseDate => {
            // Deals without a close date stay last whichever direction is
            // active; direction only flips the order of present dates.
            return match (a.expected_close_date, b.expected_close_date) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(lhs), Some(rhs)) => direction.apply(lhs.cmp(&rhs)),
            };
        }
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortField::Owner => owner_key(a, owner_names).cmp(&owner_key(b, owner_names)),
        SortField::Stage => stage_key(a, stage_probability).cmp(&stage_key(b, stage_probability)),
        SortField::Status => status_rank(a.status).cmp(&status_rank(b.status)),
    };
    direction.apply(ordering)
}

fn owner_key(deal: &Deal, owner_names: &HashMap<Uuid, String>) -> String {
    owner_names
        .get(&deal.owner_id)
        .map(|name| name.to_lowercase())
        .unwrap_or_default()
}

fn stage_key(deal: &Deal, stage_probability: &HashMap<Uuid, i16>) -> i16 {
    stage_probability.get(&deal.stage_id).copied().unwrap_or(0)
}

fn status_rank(status: DealStatus) -> u8 {
    match status {
        DealStatus::Won => 0,
        DealStatus::Open => 1,
        DealStatus::Lost => 2,
    }
}
