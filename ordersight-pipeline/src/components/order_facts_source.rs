use ordersight_core::aggregate;

use crate::dataset::Dataset;
use crate::source::Source;
use crate::types::{AnalysisQuery, EntityCandidate};

/// Source that aggregates the fact table by the query's grouping dimension
/// and emits one candidate per distinct entity.
///
/// The grouping itself is the kernel's pure fold; this component only
/// bridges the dataset into the pipeline's candidate model.
pub struct OrderFactsSource {
    dataset: Dataset,
}

impl OrderFactsSource {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl Source<AnalysisQuery, EntityCandidate> for OrderFactsSource {
    fn enable(&self, query: &AnalysisQuery) -> bool {
        self.dataset.has_column(query.grouping.column())
    }

    fn candidates(&self, query: &AnalysisQuery) -> Result<Vec<EntityCandidate>, String> {
        let facts = self
            .dataset
            .facts(query.grouping)
            .map_err(|e| e.to_string())?;
        let groups = aggregate(&facts);
        Ok(groups
            .into_values()
            .map(EntityCandidate::from_aggregate)
            .collect())
    }
}
