//! Validator cases under comparison
//!
//! Every case checks the same contract against the same sample:
//! - `name`: string
//! - `age`: number in `1..=100`
//! - `email`, `url`: strings in e-mail / URI format
//! - `status`: one of `A`, `I`, `D`, `N`
//! - `address`: `street`, `city`, `zip` strings
//!
//! Schemas and regexes are compiled when a case is built; only the
//! validate call is timed.

pub mod deferred;
pub mod derived;
pub mod json_schema;
pub mod typed;

use serde_json::{json, Value};
use std::sync::Arc;

use crate::bench::BenchmarkSuite;
use crate::types::BenchmarkCase;

/// The fixed input every case validates
pub fn sample_user() -> Value {
    json!({
        "name": "John Doe",
        "age": 30,
        "email": "john.doe@example.com",
        "url": "https://example.com",
        "status": "D",
        "address": {
            "street": "123 Main St",
            "city": "New York",
            "zip": "10001",
        },
    })
}

/// All cases, in reporting order
pub fn registered_cases(sample: Arc<Value>) -> anyhow::Result<Vec<BenchmarkCase>> {
    Ok(vec![
        json_schema::case(sample.clone())?,
        json_schema::is_valid_case(sample.clone())?,
        derived::case(sample.clone())?,
        typed::case(sample.clone())?,
        deferred::case(sample)?,
    ])
}

/// Suite holding every registered case
pub fn default_suite(sample: Arc<Value>) -> anyhow::Result<BenchmarkSuite> {
    let mut suite = BenchmarkSuite::new("validators");
    for case in registered_cases(sample)? {
        suite.add(case)?;
    }
    Ok(suite)
}
