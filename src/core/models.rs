pub mod common;
pub mod edit;
pub mod option;
pub mod poll;
