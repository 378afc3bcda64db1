//! Visualization and plotting

pub mod bar_chart;
pub mod layout;

pub use bar_chart::BarChartPlotter;
pub use layout::{Bar, BarLayout};
