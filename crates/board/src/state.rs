use entity::{Deal, Stage};
use thiserror::Error;
use tracing::{error, info, info_span, warn};
use uuid::Uuid;

use crate::aggregate::{build_board, BoardColumn};
use crate::filter::{filter_deals, DealFilter, ViewContext};
use crate::kpi::{compute_kpis, PipelineKpis};
use crate::sort::{sort_deals, SortDirection, SortField};
use crate::store::{DealStore, StoreError};

/// The drag gesture, modelled explicitly rather than as a loose flag.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        deal_id: Uuid,
    },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("no drag in progress")]
    NotDragging,
    #[error("another drag is already in progress")]
    DragInProgress,
    #[error("unknown deal {0}")]
    UnknownDeal(Uuid),
    #[error("unknown target stage {0}")]
    UnknownStage(Uuid),
    #[error("stage {stage_id} belongs to another pipeline")]
    CrossPipelineStage { stage_id: Uuid },
    #[error("stage move failed: {source}")]
    MoveFailed {
        #[source]
        source: StoreError,
    },
}

/// What a completed drop did.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MoveOutcome {
    /// Target stage equalled the current one; nothing changed, no store call.
    Unchanged,
    /// Optimistic move applied and confirmed by the store.
    Moved,
}

/// Canonical board state for one pipeline: the deal and stage collections,
/// the drag state machine, and the load sequencing that keeps slow responses
/// from clobbering newer snapshots.
///
/// Views never mutate; the collections change only through an applied
/// snapshot or the optimistic step of [`BoardState::drop_on_stage`].
pub struct BoardState<S: DealStore> {
    store: S,
    pipeline_id: Uuid,
    deals: Vec<Deal>,
    stages: Vec<Stage>,
    drag: DragState,
    /// Newest sequence number handed to a fetch.
    issued_seq: u64,
    /// Sequence number of the newest applied snapshot.
    applied_seq: u64,
}

impl<S: DealStore> BoardState<S> {
    pub fn new(store: S, pipeline_id: Uuid) -> Self {
        Self {
            store,
            pipeline_id,
            deals: Vec::new(),
            stages: Vec::new(),
            drag: DragState::Idle,
            issued_seq: 0,
            applied_seq: 0,
        }
    }

    pub fn pipeline_id(&self) -> Uuid {
        self.pipeline_id
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reserve the sequence number for a fetch about to be issued. Responses
    /// must be applied in issue order, not resolution order.
    pub fn begin_load(&mut self) -> u64 {
        self.issued_seq += 1;
        self.issued_seq
    }

    /// Install a completed fetch unless a later one already landed. Returns
    /// whether the snapshot was taken.
    pub fn apply_snapshot(&mut self, seq: u64, deals: Vec<Deal>, stages: Vec<Stage>) -> bool {
        if seq <= self.applied_seq {
            info!(seq, newest = self.applied_seq, "discarding stale load response");
            return false;
        }
        for deal in &deals {
            let stage_ok = stages
                .iter()
                .any(|stage| stage.id == deal.stage_id && stage.pipeline_id == deal.pipeline_id);
            if !stage_ok {
                // Cannot happen with correct upstream data; not user-recoverable.
                error!(
                    deal = %deal.id,
                    stage = %deal.stage_id,
                    "deal references a stage outside its pipeline"
                );
            }
        }
        self.applied_seq = seq;
        self.deals = deals;
        self.stages = stages;
        true
    }

    /// Fetch deals and stages and install them, subject to the sequence guard.
    pub async fn load(&mut self) -> Result<(), StoreError> {
        let seq = self.begin_load();
        let deals = self.store.list_deals(self.pipeline_id).await?;
        let stages = self.store.list_stages(self.pipeline_id).await?;
        self.apply_snapshot(seq, deals, stages);
        Ok(())
    }

    /// Replace local state wholesale with the store's authoritative view.
    pub async fn resync(&mut self) -> Result<(), StoreError> {
        self.load().await
    }

    /// Flat filtered and sorted deal list for the table view.
    pub fn table_view(
        &self,
        filter: &DealFilter,
        field: SortField,
        direction: SortDirection,
        ctx: &ViewContext,
    ) -> Vec<Deal> {
        let span = info_span!(
            "board.table",
            quick = ?filter.quick,
            field = ?field,
            direction = ?direction,
            total = self.deals.len()
        );
        let _guard = span.enter();
        let mut rows = filter_deals(&self.deals, filter, ctx);
        sort_deals(&mut rows, field, direction, &self.stages, &ctx.owner_names);
        rows
    }

    /// Per-stage grouped structure for the kanban view.
    pub fn board_view(&self, filter: &DealFilter, cap: usize, ctx: &ViewContext) -> Vec<BoardColumn> {
        let span = info_span!(
            "board.columns",
            quick = ?filter.quick,
            cap,
            total = self.deals.len()
        );
        let _guard = span.enter();
        let rows = filter_deals(&self.deals, filter, ctx);
        build_board(&rows, &self.stages, cap)
    }

    pub fn kpis(&self) -> PipelineKpis {
        compute_kpis(&self.deals)
    }

    /// Gesture start. Only one deal may be dragging at a time; a second
    /// request while one is active is rejected rather than silently replacing.
    pub fn begin_drag(&mut self, deal_id: Uuid) -> Result<(), TransitionError> {
        if let DragState::Dragging { deal_id: active } = self.drag {
            warn!(%deal_id, %active, "drag requested while another is active");
            return Err(TransitionError::DragInProgress);
        }
        if !self.deals.iter().any(|deal| deal.id == deal_id) {
            return Err(TransitionError::UnknownDeal(deal_id));
        }
        self.drag = DragState::Dragging { deal_id };
        Ok(())
    }

    /// Gesture abandoned outside any column.
    pub fn cancel_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Drop the dragged deal onto `stage_id`.
    ///
    /// Applies the mutation locally first, confirms asynchronously with one
    /// store call, and on any failure resyncs wholesale from the store;
    /// there is no field-level rollback. The gesture ends whatever happens.
    pub async fn drop_on_stage(&mut self, stage_id: Uuid) -> Result<MoveOutcome, TransitionError> {
        let DragState::Dragging { deal_id } = self.drag else {
            return Err(TransitionError::NotDragging);
        };
        self.drag = DragState::Idle;

        let Some(stage) = self.stages.iter().find(|stage| stage.id == stage_id).cloned() else {
            return Err(TransitionError::UnknownStage(stage_id));
        };
        let Some(deal) = self.deals.iter_mut().find(|deal| deal.id == deal_id) else {
            return Err(TransitionError::UnknownDeal(deal_id));
        };
        if stage.pipeline_id != deal.pipeline_id {
            error!(%stage_id, deal = %deal_id, "target stage belongs to another pipeline");
            return Err(TransitionError::CrossPipelineStage { stage_id });
        }
        if deal.stage_id == stage_id {
            return Ok(MoveOutcome::Unchanged);
        }

        deal.stage_id = stage_id;
        deal.probability = stage.probability;
        info!(
            deal = %deal_id,
            stage = %stage_id,
            probability = stage.probability,
            weighted = deal.weighted_amount(),
            "optimistic stage move"
        );

        match self.store.move_deal_to_stage(deal_id, stage_id).await {
            Ok(()) => Ok(MoveOutcome::Moved),
            Err(source) => {
                warn!(deal = %deal_id, error = %source, "stage move failed; resyncing from store");
                if let Err(err) = self.resync().await {
                    error!(error = %err, "resync after failed move also failed");
                }
                Err(TransitionError::MoveFailed { source })
            }
        }
    }
}
