pub mod apply_event;
pub mod controller;
pub mod engine;
pub mod protocol;
pub mod ticker;
