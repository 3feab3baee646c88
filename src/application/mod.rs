pub mod backtest;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod policy;
pub mod sentiment;
