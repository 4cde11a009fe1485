//! Async validation awaited inside the timed window
//!
//! The case owns a current-thread runtime and blocks until the
//! validation future resolves, so each timed call covers the full
//! deferred cost rather than just scheduling it.

use anyhow::Context;
use serde_json::Value;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

use super::typed::UserValidator;
use crate::types::BenchmarkCase;

pub const NAME: &str = "serde (async)";

/// Resolves on a later poll, like a promise-returning validator
pub async fn validate_deferred(validator: &UserValidator, value: &Value) -> anyhow::Result<()> {
    tokio::task::yield_now().await;
    validator.validate(value).map(|_| ())
}

fn runtime() -> anyhow::Result<Runtime> {
    Builder::new_current_thread()
        .build()
        .context("building validation runtime")
}

pub fn case(sample: Arc<Value>) -> anyhow::Result<BenchmarkCase> {
    let runtime = runtime()?;
    let validator = UserValidator::new()?;
    Ok(BenchmarkCase::new(NAME, move || {
        runtime.block_on(validate_deferred(&validator, &sample))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cases::sample_user;
    use serde_json::json;

    #[tokio::test]
    async fn test_deferred_accepts_sample() {
        let validator = UserValidator::new().unwrap();
        validate_deferred(&validator, &sample_user()).await.unwrap();
    }

    #[tokio::test]
    async fn test_deferred_propagates_rejection() {
        let validator = UserValidator::new().unwrap();
        let mut sample = sample_user();
        sample["status"] = json!("Z");

        let err = validate_deferred(&validator, &sample).await.unwrap_err();
        assert!(format!("{err:#}").contains("decoding user"));
    }

    #[test]
    fn test_case_waits_for_completion() {
        let mut sample = sample_user();
        sample["age"] = json!(0);
        let mut case = case(Arc::new(sample)).unwrap();

        // The rejection only exists once the future has resolved
        assert!(case.call().is_err());
    }
}
