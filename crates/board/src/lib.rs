//! Pipeline board engine.
//!
//! Classifies, filters, sorts, and groups deals across pipeline stages, and
//! coordinates optimistic stage transitions against an external deal store.
//! Everything except the store calls is synchronous pure computation over
//! the canonical deal collection held by [`state::BoardState`].

pub mod aggregate;
pub mod classify;
pub mod filter;
pub mod kpi;
pub mod seed;
pub mod sort;
pub mod state;
pub mod store;

pub use aggregate::{build_board, BoardColumn, DEFAULT_STAGE_CAP};
pub use classify::{Priority, Staleness};
pub use filter::{AdvancedFilters, DealFilter, QuickFilter, ViewContext};
pub use kpi::{compute_kpis, PipelineKpis};
pub use sort::{sort_deals, SortDirection, SortField};
pub use state::{BoardState, DragState, MoveOutcome, TransitionError};
pub use store::{DealStore, MemoryDealStore, StoreError};
