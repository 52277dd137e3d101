pub mod region_variants;
pub mod chromosome_map;
pub mod window_counts;
pub mod centromeres;
pub mod sv_tables;
