// DNS record rows and the record/node type vocabulary

use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::io::Read;

/// Columns every input file must carry
pub const REQUIRED_COLUMNS: [&str; 3] = ["domain", "record_type", "target"];

/// One row of the input CSV. Extra columns are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Record {
    pub domain: String,
    pub record_type: String,
    pub target: String,
}

impl Record {
    pub fn new(domain: &str, record_type: &str, target: &str) -> Self {
        Self {
            domain: domain.to_string(),
            record_type: record_type.to_string(),
            target: target.to_string(),
        }
    }

    /// Record type after trimming and case folding
    pub fn kind(&self) -> RecordType {
        RecordType::from_str(&self.record_type)
    }
}

/// Semantic type shared by edges (the record that produced them) and nodes
/// (what the node was inferred to be).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    Domain,
    Ns,
    Mx,
    A,
    Txt,
    Cname,
    /// Unrecognized type, stored lower-cased
    Other(String),
}

impl RecordType {
    /// Known types in palette order
    pub const KNOWN: [RecordType; 6] = [
        RecordType::Domain,
        RecordType::Ns,
        RecordType::Mx,
        RecordType::A,
        RecordType::Txt,
        RecordType::Cname,
    ];

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "domain" => RecordType::Domain,
            "ns" => RecordType::Ns,
            "mx" => RecordType::Mx,
            "a" => RecordType::A,
            "txt" => RecordType::Txt,
            "cname" => RecordType::Cname,
            other => RecordType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RecordType::Domain => "domain",
            RecordType::Ns => "ns",
            RecordType::Mx => "mx",
            RecordType::A => "a",
            RecordType::Txt => "txt",
            RecordType::Cname => "cname",
            RecordType::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, RecordType::Other(_))
    }
}

impl Serialize for RecordType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read every record from a CSV source with a header row.
///
/// A missing required column or a malformed row fails the whole read.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(GraphError::MissingColumn(column));
        }
    }

    rdr.deserialize::<Record>()
        .map(|row| row.map_err(GraphError::from))
        .collect()
}
