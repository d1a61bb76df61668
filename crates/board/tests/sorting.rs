mod common;

use board::sort::{sort_deals, SortDirection, SortField};
use chrono::NaiveDate;
use common::Fixture;
use entity::DealStatus;

fn titles(deals: &[entity::Deal]) -> Vec<&str> {
    deals.iter().map(|deal| deal.title.as_str()).collect()
}

fn date(s: &str) -> NaiveDate {
    s.parse().expect("date literal")
}

#[test]
fn amount_sort_both_directions() {
    let fx = Fixture::new();
    let ctx = fx.ctx();
    let mut deals = vec![
        fx.deal("Mid", 200, "Proposal"),
        fx.deal("Low", 100, "Proposal"),
        fx.deal("High", 300, "Proposal"),
    ];
    sort_deals(&mut deals, SortField::Amount, SortDirection::Ascending, &fx.stages, &ctx.owner_names);
    assert_eq!(titles(&deals), ["Low", "Mid", "High"]);
    sort_deals(&mut deals, SortField::Amount, SortDirection::Descending, &fx.stages, &ctx.owner_names);
    assert_eq!(titles(&deals), ["High", "Mid", "Low"]);
}

#[test]
fn sort_is_stable_on_equal_keys() {
    let fx = Fixture::new();
    let ctx = fx.ctx();
    let mut deals = vec![
        fx.deal("First", 100, "Proposal"),
        fx.deal("Second", 100, "Proposal"),
        fx.deal("Third", 100, "Proposal"),
    ];
    for direction in [SortDirection::Ascending, SortDirection::Descending] {
        sort_deals(&mut deals, SortField::Amount, direction, &fx.stages, &ctx.owner_names);
        assert_eq!(titles(&deals), ["First", "Second", "Third"]);
    }
}

#[test]
fn missing_close_dates_always_sort_last() {
    let fx = Fixture::new();
    let ctx = fx.ctx();
    let mut early = fx.deal("Early", 100, "Proposal");
    early.expected_close_date = Some(date("2026-03-10"));
    let mut late = fx.deal("Late", 100, "Proposal");
    late.expected_close_date = Some(date("2026-06-01"));
    let dateless = fx.deal("Dateless", 100, "Proposal");
    let mut deals = vec![dateless.clone(), late.clone(), early.clone()];

    sort_deals(&mut deals, SortField::ExpectedCloseDate, SortDirection::Ascending, &fx.stages, &ctx.owner_names);
    assert_eq!(titles(&deals), ["Early", "Late", "Dateless"]);

    // Direction flips present dates but never promotes the dateless deal.
    sort_deals(&mut deals, SortField::ExpectedCloseDate, SortDirection::Descending, &fx.stages, &ctx.owner_names);
    assert_eq!(titles(&deals), ["Late", "Early", "Dateless"]);
}

#[test]
fn title_sort_is_case_insensitive() {
    let fx = Fixture::new();
    let ctx = fx.ctx();
    let mut deals = vec![
        fx.deal("banana", 100, "Proposal"),
        fx.deal("Apple", 100, "Proposal"),
        fx.deal("cherry", 100, "Proposal"),
    ];
    sort_deals(&mut deals, SortField::Title, SortDirection::Ascending, &fx.stages, &ctx.owner_names);
    assert_eq!(titles(&deals), ["Apple", "banana", "cherry"]);
}

#[test]
fn owner_sort_treats_missing_name_as_empty() {
    let fx = Fixture::new();
    let ctx = fx.ctx();
    let mut unknown = fx.deal("Unknown owner", 100, "Proposal");
    unknown.owner_id = uuid::Uuid::new_v4();
    let mut ada = fx.deal("Ada's", 100, "Proposal");
    ada.owner_id = fx.other_owner;
    let sam = fx.deal("Sam's", 100, "Proposal");
    let mut deals = vec![sam, ada, unknown];
    sort_deals(&mut deals, SortField::Owner, SortDirection::Ascending, &fx.stages, &ctx.owner_names);
    // "" < "ada admin" < "sales sam"
    assert_eq!(titles(&deals), ["Unknown owner", "Ada's", "Sam's"]);
}

#[test]
fn stage_sort_uses_stage_probability() {
    let fx = Fixture::new();
    let ctx = fx.ctx();
    let mut deals = vec![
        fx.deal("Closing deal", 100, "Closing"),
        fx.deal("Early deal", 100, "Prospecting"),
        fx.deal("Mid deal", 100, "Proposal"),
    ];
    sort_deals(&mut deals, SortField::Stage, SortDirection::Ascending, &fx.stages, &ctx.owner_names);
    assert_eq!(titles(&deals), ["Early deal", "Mid deal", "Closing deal"]);
}

#[test]
fn status_sort_uses_fixed_semantic_order() {
    let fx = Fixture::new();
    let ctx = fx.ctx();
    let mut won = fx.deal("Won deal", 100, "Closing");
    won.status = DealStatus::Won;
    let mut lost = fx.deal("Lost deal", 100, "Proposal");
    lost.status = DealStatus::Lost;
    let open = fx.deal("Open deal", 100, "Proposal");
    let mut deals = vec![lost.clone(), open.clone(), won.clone()];

    sort_deals(&mut deals, SortField::Status, SortDirection::Ascending, &fx.stages, &ctx.owner_names);
    assert_eq!(titles(&deals), ["Won deal", "Open deal", "Lost deal"]);

    sort_deals(&mut deals, SortField::Status, SortDirection::Descending, &fx.stages, &ctx.owner_names);
    assert_eq!(titles(&deals), ["Lost deal", "Open deal", "Won deal"]);
}

#[test]
fn rotting_sort_ascending() {
    let fx = Fixture::new();
    let ctx = fx.ctx();
    let mut stale = fx.deal("Stale", 100, "Proposal");
    stale.rotting_days = 15;
    let fresh = fx.deal("Fresh", 100, "Proposal");
    let mut mild = fx.deal("Mild", 100, "Proposal");
    mild.rotting_days = 5;
    let mut deals = vec![stale, fresh, mild];
    sort_deals(&mut deals, SortField::RottingDays, SortDirection::Ascending, &fx.stages, &ctx.owner_names);
    assert_eq!(titles(&deals), ["Fresh", "Mild", "Stale"]);
}
