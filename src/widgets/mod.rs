//! UI widgets - modular, reusable components
//!
//! Each widget communicates with the host through dispatch closures.

pub mod planner;
