pub mod attacks;
pub mod execute;
pub mod magic;
pub mod movegen;
pub mod perft;
pub mod rays;
pub mod tables;
pub mod types;
