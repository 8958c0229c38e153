//! Shared fixtures for unit tests

use tracing_subscriber::EnvFilter;

use crate::{Mappable, Mapper, RawBacked, Result};

/// Route traced events to the test harness so they show up with `RUST_LOG=trace` and
/// `--nocapture`. Safe to call from every test.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, RawBacked)]
pub(crate) enum Suit {
    Spades,
    Clubs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, RawBacked)]
#[raw_backed(repr = "i64")]
pub(crate) enum Priority {
    Low = 1,
    High = 5,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Person {
    pub name: String,
    pub age:  Option<u32>,
}

impl Mappable for Person {
    fn from_map(map: &Mapper<'_>) -> Result<Self> {
        Ok(Self {
            name: map.required("name")?,
            age:  map.optional("age"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Team {
    pub lead:    Person,
    pub members: Vec<Person>,
}

impl Mappable for Team {
    fn from_map(map: &Mapper<'_>) -> Result<Self> {
        Ok(Self {
            lead:    map.required_nested("lead")?,
            members: map.optional_lenient_vec("members").unwrap_or_default(),
        })
    }
}
