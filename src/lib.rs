//! Month calendar widget rendering into a pluggable element surface, plus the
//! settings, terminal view and commands of the `monthcal` binary.

pub mod calc;
pub mod cmd;
pub mod data;
pub mod ui;
pub mod widget;
