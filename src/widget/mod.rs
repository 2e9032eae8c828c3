//! The month calendar widget and the surface abstraction it renders through.

pub mod calendar;
pub mod cell;
pub mod error;
pub mod hooks;
pub mod node_tree;
pub mod options;
pub mod store;
pub mod surface;

pub use calendar::{CalendarWidget, WidgetState};
pub use cell::DayCell;
pub use error::{CalendarError, CalendarResult};
pub use hooks::{CellContext, CellHook, ViewContext, ViewHook};
pub use node_tree::{NodeId, NodeTree};
pub use options::CalendarOptions;
pub use store::DataStore;
pub use surface::{NavAction, Surface};
