pub mod choir;
