//! Chart record types

mod record;

#[cfg(test)]
mod tests;

pub use record::{ChartEdit, MedicalChart, SkinConcern, SkinType, UserId};
