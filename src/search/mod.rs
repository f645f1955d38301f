pub mod eval;
pub mod ordering;
pub mod pst;
pub mod timeout;
pub mod tt;
