pub mod board;
pub mod error;
pub mod selection;
pub mod store;

pub use board::{Action, Board, Card, Effect};
pub use error::BoardError;
pub use selection::{Chip, SelectionState, Transition, VariantSelector};
pub use store::{load_products, save_products};
