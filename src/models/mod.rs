mod holding;
mod position;
mod user;

pub use holding::HoldingRow;
pub use position::{AddStockForm, NewPosition, Position, PositionView};
pub use user::User;
