//! The cell taxonomy: what can occupy a grid location.

pub mod cell;
pub mod liquid;
