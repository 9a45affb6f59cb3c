//! Interactive console shell.

mod backend;
mod input;
mod session;

pub use backend::PipelineBackend;
pub use input::{
    InspectCommand, MenuChoice, Selection, SelectionError, parse_inspect, parse_menu, parse_pick,
    parse_selection,
};
pub use session::{Backend, Session, State};
