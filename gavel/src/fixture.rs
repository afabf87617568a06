//! Fixture records and the JSON files they are read from.
//!
//! Fixtures are produced ahead of a run (see [`crate::generate`] and the
//! `gavel generate` subcommand) and are strictly read-only while workers are
//! executing.

use std::{fs, io, path::Path};

use gavel_macros::record;
use serde::de::DeserializeOwned;

use crate::error::FixtureError;

/// Default location of the user fixture file.
pub const USERS_FILE: &str = "test_users.json";
/// Default location of the question fixture file.
pub const QUESTIONS_FILE: &str = "test_questions.json";

/// A synthetic account the target service accepts credentials for.
#[record]
pub struct TestUser {
    pub email: String,
    pub password: String,
}

/// A pre-generated question with a canned answer to submit against it.
#[record]
pub struct TestQuestion {
    pub id: String,
    pub text: String,
    pub sample_answer: String,
    pub category: String,
    pub difficulty: String,
}

pub fn load_users(path: &Path) -> Result<Vec<TestUser>, FixtureError> {
    load(path)
}

pub fn load_questions(path: &Path) -> Result<Vec<TestQuestion>, FixtureError> {
    load(path)
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, FixtureError> {
    let display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            FixtureError::NotFound { path: display.clone() }
        } else {
            FixtureError::Io { path: display.clone(), source }
        }
    })?;
    let entries: Vec<T> = serde_json::from_str(&raw).map_err(|source| FixtureError::Parse {
        path: display.clone(),
        source,
    })?;
    if entries.is_empty() {
        return Err(FixtureError::Empty { path: display });
    }
    Ok(entries)
}
