//! Module for additional helpers
pub mod test_helper;
pub mod uom_macros;
