pub mod deal;
pub mod stage;

pub use deal::{weighted_amount, Deal, DealStatus};
pub use stage::Stage;
