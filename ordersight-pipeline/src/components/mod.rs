pub mod adaptive_category_labeler;
pub mod delivered_scorer;
pub mod fixed_category_labeler;
pub mod order_facts_source;
pub mod summary_log_side_effect;
pub mod top_n_selector;
pub mod volume_floor_filter;
pub mod volume_scorer;
