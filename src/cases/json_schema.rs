//! `jsonschema` crate cases

use anyhow::anyhow;
use jsonschema::Validator;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::types::BenchmarkCase;

pub const NAME: &str = "jsonschema";
pub const IS_VALID_NAME: &str = "jsonschema (is_valid)";

/// Draft 2020-12 schema for the sample user
pub fn user_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "age": { "type": "number", "minimum": 1, "maximum": 100 },
            "email": { "type": "string", "format": "email" },
            "url": { "type": "string", "format": "uri" },
            "status": { "type": "string", "enum": ["A", "I", "D", "N"] },
            "address": {
                "type": "object",
                "properties": {
                    "street": { "type": "string" },
                    "city": { "type": "string" },
                    "zip": { "type": "string" },
                },
                "required": ["street", "city", "zip"],
            },
        },
        "required": ["name", "age", "email", "url", "status", "address"],
        "additionalProperties": false,
    })
}

/// Compile the user schema with format assertions switched on
pub fn compile() -> anyhow::Result<Validator> {
    jsonschema::options()
        .should_validate_formats(true)
        .build(&user_schema())
        .map_err(|e| anyhow!("compiling user schema: {e}"))
}

/// Full validation, reporting the first violation
pub fn case(sample: Arc<Value>) -> anyhow::Result<BenchmarkCase> {
    let validator = compile()?;
    Ok(BenchmarkCase::new(NAME, move || {
        match validator.iter_errors(&sample).next() {
            Some(err) => Err(anyhow!("{err}")),
            None => Ok(()),
        }
    }))
}

/// Boolean fast path
pub fn is_valid_case(sample: Arc<Value>) -> anyhow::Result<BenchmarkCase> {
    let validator = compile()?;
    Ok(BenchmarkCase::new(IS_VALID_NAME, move || {
        if validator.is_valid(&sample) {
            Ok(())
        } else {
            Err(anyhow!("sample does not match user schema"))
        }
    }))
}
