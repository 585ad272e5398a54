pub mod once;
pub mod preview;
pub mod run;
