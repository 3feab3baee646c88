pub mod csv_bars;
pub mod mock;
pub mod news;
