mod common;

use board::aggregate::{build_board, DEFAULT_STAGE_CAP};
use board::kpi::compute_kpis;
use common::Fixture;
use entity::DealStatus;

#[test]
fn columns_follow_stage_ordinal_order() {
    let fx = Fixture::new();
    let deals = vec![fx.deal("Only", 100, "Proposal")];
    let columns = build_board(&deals, &fx.stages, DEFAULT_STAGE_CAP);
    let names: Vec<&str> = columns.iter().map(|c| c.stage.name.as_str()).collect();
    assert_eq!(names, ["Prospecting", "Proposal", "Closing"]);
}

#[test]
fn column_metrics_count_criticals_and_hots() {
    let fx = Fixture::new();
    // Proposal is 50%: 1.2M weighs 600k (hot), 300k weighs 150k (warm).
    let hot = fx.deal("Hot", 1_200_000, "Proposal");
    let mut critical = fx.deal("Critical", 300_000, "Proposal");
    critical.rotting_days = 14;
    let mut decided = fx.deal("Won", 400_000, "Proposal");
    decided.status = DealStatus::Won;
    decided.rotting_days = 20;
    let deals = vec![hot, critical, decided];

    let columns = build_board(&deals, &fx.stages, DEFAULT_STAGE_CAP);
    let proposal = &columns[1];
    assert_eq!(proposal.count, 3);
    assert_eq!(proposal.total_amount, 1_900_000);
    assert_eq!(proposal.hot_count, 1);
    // The won deal rots on paper but never counts as critical.
    assert_eq!(proposal.critical_count, 1);
    assert_eq!(proposal.overflow, 0);
}

#[test]
fn column_orders_by_tier_then_amount_desc() {
    let fx = Fixture::new();
    // All in Proposal (50%): weighted 600k / 250k / 175k / 40k.
    let deals = vec![
        fx.deal("Warm small", 350_000, "Proposal"),
        fx.deal("Normal", 80_000, "Proposal"),
        fx.deal("Hot", 1_200_000, "Proposal"),
        fx.deal("Warm big", 500_000, "Proposal"),
    ];
    let columns = build_board(&deals, &fx.stages, DEFAULT_STAGE_CAP);
    let titles: Vec<&str> = columns[1].deals.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, ["Hot", "Warm big", "Warm small", "Normal"]);
}

#[test]
fn cap_limits_cards_and_reports_overflow() {
    let fx = Fixture::new();
    let deals: Vec<_> = (0..11)
        .map(|i| fx.deal(&format!("Deal {i}"), 1_000 * (i + 1), "Prospecting"))
        .collect();
    let columns = build_board(&deals, &fx.stages, DEFAULT_STAGE_CAP);
    let prospecting = &columns[0];
    assert_eq!(prospecting.count, 11);
    assert_eq!(prospecting.deals.len(), DEFAULT_STAGE_CAP);
    assert_eq!(prospecting.overflow, 3);

    let tight = build_board(&deals, &fx.stages, 2);
    assert_eq!(tight[0].deals.len(), 2);
    assert_eq!(tight[0].overflow, 9);
}

#[test]
fn kpis_roll_up_by_status() {
    let fx = Fixture::new();
    let mut open_a = fx.deal("Open A", 1_000_000, "Proposal");
    open_a.rotting_days = 12;
    let mut open_b = fx.deal("Open B", 200_000, "Prospecting");
    open_b.rotting_days = 4;
    let mut won = fx.deal("Won", 300_000, "Closing");
    won.status = DealStatus::Won;
    let mut lost_a = fx.deal("Lost A", 150_000, "Proposal");
    lost_a.status = DealStatus::Lost;
    let mut lost_b = fx.deal("Lost B", 50_000, "Proposal");
    lost_b.status = DealStatus::Lost;
    let deals = vec![open_a, open_b, won, lost_a, lost_b];

    let kpis = compute_kpis(&deals);
    assert_eq!(kpis.open_amount, 1_200_000);
    // 1M @ 50% + 200k @ 10%.
    assert_eq!(kpis.weighted_open_amount, 520_000);
    assert_eq!(kpis.won_amount, 300_000);
    assert!((kpis.win_rate - 1.0 / 3.0).abs() < 1e-9);
    assert!((kpis.avg_rotting_days - 8.0).abs() < 1e-9);
    assert_eq!(kpis.rotting_count, 1);
}

#[test]
fn kpis_on_empty_pipeline_are_zero() {
    let kpis = compute_kpis(&[]);
    assert_eq!(kpis.open_amount, 0);
    assert_eq!(kpis.win_rate, 0.0);
    assert_eq!(kpis.avg_rotting_days, 0.0);
    assert_eq!(kpis.rotting_count, 0);
}
