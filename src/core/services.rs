pub mod edit;
pub mod poll;
