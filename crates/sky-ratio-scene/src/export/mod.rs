//! Triangle soup export formats.

pub mod stl;
