pub mod labels;
pub mod density;
pub mod centromere;
pub mod region_fraction;
