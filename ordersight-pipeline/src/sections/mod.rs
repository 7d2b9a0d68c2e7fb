pub mod client_segmentation;
pub mod client_tiers;
pub mod employees;
pub mod kpi;
pub mod temporal;
