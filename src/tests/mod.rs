use super::*;

mod reveal_behavior;
mod stats_chart;
