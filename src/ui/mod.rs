//! Stable UI facade over the terminal implementation in `crate::tui`.

pub mod render;
