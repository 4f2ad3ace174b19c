//! Readers and writers for field plot data.

pub mod plot_csv;
