//! Typed `serde` decoding followed by field checks

use anyhow::{ensure, Context};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

use crate::types::BenchmarkCase;

pub const NAME: &str = "serde";

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$";

/// Borrowed view of the sample; decoding does not copy strings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct User<'a> {
    pub name: &'a str,
    pub age: f64,
    pub email: &'a str,
    pub url: &'a str,
    pub status: Status,
    #[serde(borrow)]
    pub address: Address<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Status {
    A,
    I,
    D,
    N,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Address<'a> {
    pub street: &'a str,
    pub city: &'a str,
    pub zip: &'a str,
}

/// Decode-then-check validator
#[derive(Debug, Clone)]
pub struct UserValidator {
    email: Regex,
}

impl UserValidator {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            email: Regex::new(EMAIL_PATTERN).context("compiling email pattern")?,
        })
    }

    pub fn validate<'a>(&self, value: &'a Value) -> anyhow::Result<User<'a>> {
        let user = User::deserialize(value).context("decoding user")?;

        ensure!(
            (1.0..=100.0).contains(&user.age),
            "age {} outside 1..=100",
            user.age
        );
        ensure!(self.email.is_match(user.email), "invalid email {:?}", user.email);
        Url::parse(user.url).with_context(|| format!("invalid url {:?}", user.url))?;

        Ok(user)
    }
}

pub fn case(sample: Arc<Value>) -> anyhow::Result<BenchmarkCase> {
    let validator = UserValidator::new()?;
    Ok(BenchmarkCase::new(NAME, move || {
        validator.validate(&sample).map(|_| ())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cases::sample_user;
    use serde_json::json;

    #[test]
    fn test_decodes_sample() {
        let validator = UserValidator::new().unwrap();
        let sample = sample_user();

        let user = validator.validate(&sample).unwrap();
        assert_eq!(user.name, "John Doe");
        assert_eq!(user.status, Status::D);
        assert_eq!(user.address.zip, "10001");
    }

    #[test]
    fn test_age_bounds_inclusive() {
        let validator = UserValidator::new().unwrap();
        for (age, ok) in [(1, true), (100, true), (0, false), (101, false)] {
            let mut sample = sample_user();
            sample["age"] = json!(age);
            assert_eq!(validator.validate(&sample).is_ok(), ok, "age {age}");
        }
    }

    #[test]
    fn test_rejects_wrong_types() {
        let validator = UserValidator::new().unwrap();

        let mut sample = sample_user();
        sample["age"] = json!("thirty");
        assert!(validator.validate(&sample).is_err());

        let mut sample = sample_user();
        sample["address"]["city"] = json!(42);
        assert!(validator.validate(&sample).is_err());
    }

    #[test]
    fn test_rejects_bad_formats() {
        let validator = UserValidator::new().unwrap();

        let mut sample = sample_user();
        sample["email"] = json!("john.doe@");
        let err = validator.validate(&sample).unwrap_err();
        assert!(err.to_string().contains("invalid email"));

        let mut sample = sample_user();
        sample["url"] = json!("example dot com");
        let err = validator.validate(&sample).unwrap_err();
        assert!(err.to_string().contains("invalid url"));
    }
}
