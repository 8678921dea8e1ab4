pub mod control;
pub mod dispatcher;
