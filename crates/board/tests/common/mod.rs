#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};

use board::filter::ViewContext;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use entity::{Deal, DealStatus, Stage};
use uuid::Uuid;

/// One pipeline with the three canonical stages and two owners.
pub struct Fixture {
    pub pipeline_id: Uuid,
    pub owner: Uuid,
    pub other_owner: Uuid,
    pub account: Uuid,
    pub stages: Vec<Stage>,
}

pub const TODAY: &str = "2026-03-02";

impl Fixture {
    pub fn new() -> Self {
        let pipeline_id = Uuid::new_v4();
        let stages = [("Prospecting", 10), ("Proposal", 50), ("Closing", 90)]
            .into_iter()
            .enumerate()
            .map(|(position, (name, probability))| Stage {
                id: Uuid::new_v4(),
                pipeline_id,
                name: name.to_string(),
                probability,
                color: "#888888".to_string(),
                position: position as i16,
            })
            .collect();
        Self {
            pipeline_id,
            owner: Uuid::new_v4(),
            other_owner: Uuid::new_v4(),
            account: Uuid::new_v4(),
            stages,
        }
    }

    pub fn stage(&self, name: &str) -> &Stage {
        self.stages
            .iter()
            .find(|stage| stage.name == name)
            .unwrap_or_else(|| panic!("no stage named {name}"))
    }

    pub fn deal(&self, title: &str, amount: i64, stage_name: &str) -> Deal {
        let stage = self.stage(stage_name);
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        Deal {
            id: Uuid::new_v4(),
            title: title.to_string(),
            amount,
            probability: stage.probability,
            stage_id: stage.id,
            pipeline_id: self.pipeline_id,
            owner_id: self.owner,
            account_id: Some(self.account),
            status: DealStatus::Open,
            expected_close_date: None,
            created_at: now - Duration::days(30),
            updated_at: now,
            last_stage_change_at: now,
            tags: BTreeSet::new(),
            lost_reason: None,
            rotting_days: 0,
        }
    }

    pub fn today(&self) -> NaiveDate {
        TODAY.parse().expect("fixture date")
    }

    pub fn ctx(&self) -> ViewContext {
        let mut owner_names = HashMap::new();
        owner_names.insert(self.owner, "Sales Sam".to_string());
        owner_names.insert(self.other_owner, "Ada Admin".to_string());
        let mut account_names = HashMap::new();
        account_names.insert(self.account, "Acme Corp".to_string());
        ViewContext {
            current_user: self.owner,
            today: self.today(),
            account_names,
            owner_names,
        }
    }
}
