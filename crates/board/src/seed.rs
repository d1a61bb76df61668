//! Demo pipeline fixture used by the CLI and the integration tests.

use std::collections::{BTreeSet, HashMap};

use chrono::{Duration, NaiveDate, Utc};
use entity::{Deal, DealStatus, Stage};
use uuid::Uuid;

use crate::filter::ViewContext;

/// Seeded records with lookup helpers, so callers can address deals and
/// stages by name instead of generated ids.
#[derive(Clone, Debug)]
pub struct SeededBoard {
    pub pipeline_id: Uuid,
    pub current_user: Uuid,
    pub stages: Vec<Stage>,
    pub deals: Vec<Deal>,
    pub owner_names: HashMap<Uuid, String>,
    pub account_names: HashMap<Uuid, String>,
}

impl SeededBoard {
    pub fn stage_named(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|stage| stage.name == name)
    }

    pub fn deal_titled(&self, title: &str) -> Option<&Deal> {
        self.deals.iter().find(|deal| deal.title == title)
    }

    pub fn view_context(&self, today: NaiveDate) -> ViewContext {
        ViewContext {
            current_user: self.current_user,
            today,
            account_names: self.account_names.clone(),
            owner_names: self.owner_names.clone(),
        }
    }
}

/// A small but representative pipeline: five stages, two owners, deals on
/// both sides of the priority and staleness boundaries, one won, one lost.
pub fn demo_board() -> SeededBoard {
    let pipeline_id = Uuid::new_v4();
    let sam = Uuid::new_v4();
    let ada = Uuid::new_v4();
    let acme = Uuid::new_v4();
    let globex = Uuid::new_v4();

    let mut owner_names = HashMap::new();
    owner_names.insert(sam, "Sales Sam".to_string());
    owner_names.insert(ada, "Ada Admin".to_string());
    let mut account_names = HashMap::new();
    account_names.insert(acme, "Acme Corp".to_string());
    account_names.insert(globex, "Globex".to_string());

    let names = ["Prospecting", "Qualified", "Proposal", "Negotiation", "Closing"];
    let probabilities = [10, 25, 50, 70, 90];
    let colors = ["#94a3b8", "#60a5fa", "#a78bfa", "#f59e0b", "#34d399"];
    let stages: Vec<Stage> = names
        .iter()
        .zip(probabilities)
        .zip(colors)
        .enumerate()
        .map(|(position, ((name, probability), color))| Stage {
            id: Uuid::new_v4(),
            pipeline_id,
            name: (*name).to_string(),
            probability,
            color: color.to_string(),
            position: position as i16,
        })
        .collect();

    let today = Utc::now().date_naive();
    let mut deals = Vec::new();
    let mut push = |title: &str,
                    amount: i64,
                    stage: &Stage,
                    owner: Uuid,
                    account: Option<Uuid>,
                    status: DealStatus,
                    close_in_days: Option<i64>,
                    rotting_days: u32| {
        let now = Utc::now();
        deals.push(Deal {
            id: Uuid::new_v4(),
            title: title.to_string(),
            amount,
            probability: stage.probability,
            stage_id: stage.id,
            pipeline_id,
            owner_id: owner,
            account_id: account,
            status,
            expected_close_date: close_in_days.map(|days| today + Duration::days(days)),
            created_at: now - Duration::days(60),
            updated_at: now,
            last_stage_change_at: now - Duration::days(i64::from(rotting_days)),
            tags: BTreeSet::new(),
            lost_reason: (status == DealStatus::Lost).then(|| "Went with a competitor".to_string()),
            rotting_days,
        });
    };

    push("Acme expansion", 1_200_000, &stages[4], sam, Some(acme), DealStatus::Open, Some(12), 3);
    push("Globex platform", 1_000_000, &stages[2], sam, Some(globex), DealStatus::Open, Some(25), 11);
    push("Acme renewal", 600_000, &stages[2], ada, Some(acme), DealStatus::Open, Some(45), 9);
    push("Starter bundle", 90_000, &stages[0], sam, None, DealStatus::Open, None, 16);
    push("Globex add-on", 250_000, &stages[1], ada, Some(globex), DealStatus::Open, Some(8), 2);
    push("Pilot program", 45_000, &stages[1], sam, Some(acme), DealStatus::Open, None, 10);
    push("Legacy migration", 800_000, &stages[3], ada, Some(globex), DealStatus::Open, Some(3), 14);
    push("Support contract", 150_000, &stages[4], sam, Some(acme), DealStatus::Won, Some(-10), 0);
    push("Tooling refresh", 70_000, &stages[1], ada, None, DealStatus::Lost, None, 0);

    SeededBoard {
        pipeline_id,
        current_user: sam,
        stages,
        deals,
        owner_names,
        account_names,
    }
}
