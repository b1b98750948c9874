//! Reusable UI component modules.

pub mod lineup_board;
pub mod player_table;
pub mod team_picker;
