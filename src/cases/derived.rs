//! `validator` crate case: `#[derive(Validate)]` rules on a decoded struct

use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

use super::typed::Status;
use crate::types::BenchmarkCase;

pub const NAME: &str = "validator";

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct User {
    pub name: String,
    #[validate(range(min = 1.0, max = 100.0))]
    pub age: f64,
    #[validate(email)]
    pub email: String,
    #[validate(url)]
    pub url: String,
    pub status: Status,
    pub address: Address,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zip: String,
}

/// Decode the sample and run the derived rules
pub fn validate(value: &Value) -> anyhow::Result<User> {
    let user = User::deserialize(value).context("decoding user")?;
    user.validate().context("validating user")?;
    Ok(user)
}

pub fn case(sample: Arc<Value>) -> anyhow::Result<BenchmarkCase> {
    Ok(BenchmarkCase::new(NAME, move || validate(&sample).map(|_| ())))
}
