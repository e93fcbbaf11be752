pub mod event;
pub mod orbit;
