//! Vegetation plot ecology: observations, diversity indices, species-area fits.

pub mod diversity;
pub mod observation;
pub mod project;
pub mod species_area;
