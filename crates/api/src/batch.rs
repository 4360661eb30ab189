//! Batch query evaluation
//!
//! Evaluates many independent queries against one index, in parallel
//! across queries. Each query runs the sequential ranking path; the fan-out
//! here is per query, not per term. Any invalid query fails the whole
//! batch, matching the single-query contract.

use quarry_core::{Document, Result};
use quarry_search::SearchIndex;
use rayon::prelude::*;
use tracing::debug;

/// Evaluate every query, preserving input order
///
/// Returns one result list per query. Fails with the first query error
/// encountered.
pub fn process_queries(index: &SearchIndex, queries: &[String]) -> Result<Vec<Vec<Document>>> {
    let results = queries
        .par_iter()
        .map(|raw_query| index.find_top_documents(raw_query))
        .collect::<Result<Vec<_>>>()?;
    debug!(queries = queries.len(), "batch processed");
    Ok(results)
}

/// Evaluate every query and flatten the results in query order
pub fn process_queries_joined(index: &SearchIndex, queries: &[String]) -> Result<Vec<Document>> {
    Ok(process_queries(index, queries)?
        .into_iter()
        .flatten()
        .collect())
}
