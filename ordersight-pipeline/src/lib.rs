pub mod analysis_pipeline;
pub mod charts;
pub mod components;
pub mod dataset;
pub mod filter;
pub mod labeler;
pub mod report;
pub mod scorer;
pub mod sections;
pub mod selector;
pub mod side_effect;
pub mod source;
pub mod types;
pub mod util;
