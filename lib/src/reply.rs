use std::{fmt, str::from_utf8};

use bytes::Bytes;

use serde_json::{Map, Value};

use crate::{error::Error, query::QueryType};

/// The first frame of a looking glass reply, announcing the number of results that follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    query_type: i64,
    results: u64,
    raw: String,
}

impl Summary {
    /// Parse a reply summary.
    ///
    /// # Errors
    ///
    /// Fails if `raw` is not a JSON object with integer `query_type` and non-negative integer
    /// `results` elements.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let value: Value = serde_json::from_str(raw)?;
        let obj = value.as_object().ok_or(Error::NotAnObject)?;
        let query_type = field(obj, "query_type")?
            .as_i64()
            .ok_or(Error::InvalidField("query_type"))?;
        let results = field(obj, "results")?
            .as_u64()
            .ok_or(Error::InvalidField("results"))?;
        Ok(Self {
            query_type,
            results,
            raw: raw.to_string(),
        })
    }

    pub(crate) fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::parse(from_utf8(bytes)?)
    }

    /// The query type code echoed by the looking glass.
    #[must_use]
    pub const fn query_type(&self) -> i64 {
        self.query_type
    }

    /// The echoed query type, if it is one this client knows about.
    #[must_use]
    pub const fn kind(&self) -> Option<QueryType> {
        QueryType::from_code(self.query_type)
    }

    /// The number of result frames that follow the summary.
    #[must_use]
    pub const fn results(&self) -> u64 {
        self.results
    }

    /// The summary exactly as received.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn field<'a>(obj: &'a Map<String, Value>, name: &'static str) -> Result<&'a Value, Error> {
    obj.get(name).ok_or(Error::MissingField(name))
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A single result frame, kept exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record(Bytes);

impl Record {
    pub(crate) const fn new(bytes: Bytes) -> Self {
        Self(bytes)
    }

    /// The raw record contents.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}
