use std::collections::HashMap;

use anyhow::{anyhow, Result};
use board::seed::{demo_board, SeededBoard};
use board::{
    AdvancedFilters, BoardState, DealFilter, MemoryDealStore, QuickFilter, SortDirection,
    SortField, StoreError, ViewContext, DEFAULT_STAGE_CAP,
};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use platform_obs::{init_tracing, ObsConfig};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "board-cli", version, about = "Pipeline board engine demo over seeded data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the kanban columns with per-stage metrics
    Board {
        #[command(flatten)]
        view: ViewArgs,
        /// Cards shown per column before the overflow indicator
        #[arg(long, default_value_t = DEFAULT_STAGE_CAP)]
        cap: usize,
        #[arg(long)]
        json: bool,
    },
    /// Print the flat filtered and sorted deal list
    Table {
        #[command(flatten)]
        view: ViewArgs,
        #[arg(long, value_enum, default_value = "amount")]
        sort: SortArg,
        #[arg(long, value_enum, default_value = "desc")]
        dir: DirArg,
        #[arg(long)]
        json: bool,
    },
    /// Print aggregate pipeline figures
    Kpis {
        #[arg(long)]
        json: bool,
    },
    /// Drag a seeded deal onto a stage and persist the move
    Move {
        /// Deal title as seeded
        #[arg(long)]
        deal: String,
        /// Target stage name
        #[arg(long)]
        stage: String,
        /// Script a transient store failure to watch the resync
        #[arg(long)]
        fail: bool,
    },
}

#[derive(Args, Debug, Default)]
struct ViewArgs {
    /// Free-text search over title, account, and owner
    #[arg(long)]
    q: Option<String>,
    #[arg(long, value_enum, default_value = "all")]
    quick: QuickArg,
    /// Minimum amount, inclusive
    #[arg(long)]
    min_amount: Option<i64>,
    /// Maximum amount, inclusive
    #[arg(long)]
    max_amount: Option<i64>,
}

impl ViewArgs {
    fn filter(&self) -> DealFilter {
        DealFilter {
            search: self.q.clone(),
            quick: self.quick.into(),
            advanced: AdvancedFilters {
                amount_min: self.min_amount,
                amount_max: self.max_amount,
                ..AdvancedFilters::default()
            },
        }
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, Default)]
enum QuickArg {
    #[default]
    All,
    Mine,
    Rotting,
    Highvalue,
    Closing,
}

impl From<QuickArg> for QuickFilter {
    fn from(value: QuickArg) -> Self {
        match value {
            QuickArg::All => QuickFilter::All,
            QuickArg::Mine => QuickFilter::Mine,
            QuickArg::Rotting => QuickFilter::Rotting,
            QuickArg::Highvalue => QuickFilter::HighValue,
            QuickArg::Closing => QuickFilter::Closing,
        }
    }
}

#[derive(ValueEnum, Copy, Clone, Debug)]
enum SortArg {
    Amount,
    Rotting,
    CloseDate,
    Title,
    Owner,
    Stage,
    Status,
}

impl From<SortArg> for SortField {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Amount => SortField::Amount,
            SortArg::Rotting => SortField::RottingDays,
            SortArg::CloseDate => SortField::ExpectedCloseDate,
            SortArg::Title => SortField::Title,
            SortArg::Owner => SortField::Owner,
            SortArg::Stage => SortField::Stage,
            SortArg::Status => SortField::Status,
        }
    }
}

#[derive(ValueEnum, Copy, Clone, Debug)]
enum DirArg {
    Asc,
    Desc,
}

impl From<DirArg> for SortDirection {
    fn from(value: DirArg) -> Self {
        match value {
            DirArg::Asc => SortDirection::Ascending,
            DirArg::Desc => SortDirection::Descending,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(ObsConfig::default())?;
    let cli = Cli::parse();

    let seeded = demo_board();
    let ctx = seeded.view_context(Utc::now().date_naive());
    let store = MemoryDealStore::new(seeded.deals.clone(), seeded.stages.clone());
    let mut state = BoardState::new(store, seeded.pipeline_id);
    state.load().await.map_err(|err| anyhow!("initial load failed: {err}"))?;
    tracing::info!(deals = state.deals().len(), stages = state.stages().len(), "demo pipeline loaded");

    match cli.command {
        Commands::Board { view, cap, json } => print_board(&state, &view.filter(), cap, &ctx, json)?,
        Commands::Table { view, sort, dir, json } => {
            print_table(&state, &view.filter(), sort.into(), dir.into(), &ctx, json)?
        }
        Commands::Kpis { json } => print_kpis(&state, json)?,
        Commands::Move { deal, stage, fail } => run_move(&mut state, &seeded, &deal, &stage, fail).await?,
    }

    Ok(())
}

fn print_board(
    state: &BoardState<MemoryDealStore>,
    filter: &DealFilter,
    cap: usize,
    ctx: &ViewContext,
    json: bool,
) -> Result<()> {
    let columns = state.board_view(filter, cap, ctx);
    if json {
        println!("{}", serde_json::to_string_pretty(&columns)?);
        return Ok(());
    }
    for column in columns {
        println!(
            "{} ({}%): {} deals, total {}, {} hot, {} critical",
            column.stage.name,
            column.stage.probability,
            column.count,
            column.total_amount,
            column.hot_count,
            column.critical_count
        );
        for deal in &column.deals {
            println!(
                "  {:<20} {:>10}  {:>3}%  weighted {:>10}",
                deal.title,
                deal.amount,
                deal.probability,
                deal.weighted_amount()
            );
        }
        if column.overflow > 0 {
            println!("  … {} more below", column.overflow);
        }
    }
    Ok(())
}

fn print_table(
    state: &BoardState<MemoryDealStore>,
    filter: &DealFilter,
    field: SortField,
    direction: SortDirection,
    ctx: &ViewContext,
    json: bool,
) -> Result<()> {
    let rows = state.table_view(filter, field, direction, ctx);
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    let stage_names: HashMap<Uuid, &str> = state
        .stages()
        .iter()
        .map(|stage| (stage.id, stage.name.as_str()))
        .collect();
    for deal in &rows {
        println!(
            "{:<20} {:<12} {:>10}  {:>3}%  {:?}  rotting {}d",
            deal.title,
            stage_names.get(&deal.stage_id).copied().unwrap_or("?"),
            deal.amount,
            deal.probability,
            deal.status,
            deal.rotting_days
        );
    }
    println!("{} deals", rows.len());
    Ok(())
}

fn print_kpis(state: &BoardState<MemoryDealStore>, json: bool) -> Result<()> {
    let kpis = state.kpis();
    if json {
        println!("{}", serde_json::to_string_pretty(&kpis)?);
        return Ok(());
    }
    println!("open amount      {}", kpis.open_amount);
    println!("weighted (open)  {}", kpis.weighted_open_amount);
    println!("won amount       {}", kpis.won_amount);
    println!("win rate         {:.0}%", kpis.win_rate * 100.0);
    println!("avg rotting      {:.1}d", kpis.avg_rotting_days);
    println!("rotting deals    {}", kpis.rotting_count);
    Ok(())
}

async fn run_move(
    state: &mut BoardState<MemoryDealStore>,
    seeded: &SeededBoard,
    deal_title: &str,
    stage_name: &str,
    fail: bool,
) -> Result<()> {
    let deal = seeded
        .deal_titled(deal_title)
        .ok_or_else(|| anyhow!("no seeded deal titled {deal_title:?}"))?;
    let stage = seeded
        .stage_named(stage_name)
        .ok_or_else(|| anyhow!("no stage named {stage_name:?}"))?;
    if fail {
        state
            .store()
            .fail_next_move(StoreError::Transient("scripted failure".into()));
    }

    state.begin_drag(deal.id)?;
    match state.drop_on_stage(stage.id).await {
        Ok(outcome) => println!("{outcome:?}"),
        Err(err) => println!("move rejected: {err}"),
    }

    let current = state
        .deals()
        .iter()
        .find(|d| d.id == deal.id)
        .ok_or_else(|| anyhow!("deal disappeared after move"))?;
    println!(
        "{}: probability {}%, weighted {}",
        current.title,
        current.probability,
        current.weighted_amount()
    );
    Ok(())
}
