mod filter_bar;
mod loading;
mod metrics_table;
mod pagination;
mod stat_card;
mod user_header;

pub use filter_bar::FilterBar;
pub use loading::Loading;
pub use metrics_table::MetricsTable;
pub use pagination::PaginationControls;
pub use stat_card::StatCard;
pub use user_header::UserHeader;
