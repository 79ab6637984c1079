//! Response adapter: loosely typed JSON records to typed results.
//!
//! The learnings endpoint reports assertions in one of two shapes:
//!
//! - **Legacy**: `{id, statement, confidence, status, ...}` where the
//!   statement is a single pre-formatted string.
//! - **Structured**: `{id, subject_text, predicate, object_text, confidence,
//!   status, project_id?, formatted_statement?}`.
//!
//! A record is treated as structured when any triple field holds a non-null
//! value. Subject and object may be absent or null; the predicate may not.
//! Every required field is checked by name and type; the first
//! problem aborts the whole decode with an error naming the record index
//! and field. There is no partial result.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use condensate_types::{Assertion, MemoryRecord};

use crate::error::{ClientError, FieldProblem};

/// One assertion record as reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub enum LearningRecord {
    Legacy {
        id: String,
        statement: String,
        confidence: f64,
        status: String,
    },
    Structured {
        id: String,
        project_id: Option<String>,
        subject_text: String,
        predicate: String,
        object_text: String,
        confidence: f64,
        status: String,
        formatted: Option<String>,
    },
}

const TRIPLE_FIELDS: [&str; 3] = ["subject_text", "predicate", "object_text"];

impl LearningRecord {
    /// Validate one record object field by field.
    pub fn from_object(index: usize, object: &Map<String, Value>) -> Result<Self, ClientError> {
        let fields = Fields { index, object };

        let is_structured = TRIPLE_FIELDS
            .iter()
            .any(|f| !matches!(object.get(*f), None | Some(Value::Null)));
        if !is_structured {
            return Ok(LearningRecord::Legacy {
                id: fields.required_str("id")?,
                statement: fields.required_str("statement")?,
                confidence: fields.required_f64("confidence")?,
                status: fields.required_str("status")?,
            });
        }

        let formatted = match fields.optional_str("formatted_statement")? {
            Some(formatted) => Some(formatted),
            None => fields.optional_str("statement")?,
        };

        Ok(LearningRecord::Structured {
            id: fields.required_str("id")?,
            project_id: fields.optional_str("project_id")?,
            subject_text: fields.optional_str("subject_text")?.unwrap_or_default(),
            predicate: fields.required_str("predicate")?,
            object_text: fields.optional_str("object_text")?.unwrap_or_default(),
            confidence: fields.required_f64("confidence")?,
            status: fields.required_str("status")?,
            formatted,
        })
    }
}

impl From<LearningRecord> for Assertion {
    fn from(record: LearningRecord) -> Self {
        match record {
            // Legacy records carry no triple; those fields stay empty.
            LearningRecord::Legacy {
                id,
                statement,
                confidence,
                status,
            } => Assertion {
                id,
                confidence,
                status,
                formatted: Some(statement),
                ..Default::default()
            },
            LearningRecord::Structured {
                id,
                project_id,
                subject_text,
                predicate,
                object_text,
                confidence,
                status,
                formatted,
            } => Assertion {
                id,
                project_id: project_id.unwrap_or_default(),
                subject_text,
                predicate,
                object_text,
                confidence,
                status,
                formatted,
            },
        }
    }
}

/// Decode a learnings response body into assertions, preserving order.
pub fn decode_assertions(body: &[u8]) -> Result<Vec<Assertion>, ClientError> {
    decode_objects(body)?
        .iter()
        .enumerate()
        .map(|(index, object)| LearningRecord::from_object(index, object).map(Assertion::from))
        .collect()
}

/// Decode a memories response body into memory records, preserving order.
pub fn decode_memories(body: &[u8]) -> Result<Vec<MemoryRecord>, ClientError> {
    decode_objects(body)?
        .iter()
        .enumerate()
        .map(|(index, object)| {
            let fields = Fields { index, object };
            Ok(MemoryRecord {
                id: fields.required_str("id")?,
                content: fields.required_str("content")?,
                project_id: fields.optional_str("project_id")?.unwrap_or_default(),
                created_at: fields.optional_str("created_at")?.unwrap_or_default(),
                source: fields.optional_str("type")?.unwrap_or_default(),
            })
        })
        .collect()
}

/// Decode a body that must be a single JSON object into `T`.
///
/// Arrays and scalars are rejected up front; serde would otherwise accept a
/// sequence for a struct with defaulted fields.
pub fn decode_object<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T, ClientError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        ClientError::decode(format!("{} response is not valid JSON: {}", what, e))
    })?;

    if !value.is_object() {
        return Err(ClientError::decode(format!(
            "{} response: expected a JSON object, found {}",
            what,
            json_kind(&value)
        )));
    }

    serde_json::from_value(value)
        .map_err(|e| ClientError::decode(format!("{} response: {}", what, e)))
}

/// Parse a body that must be a JSON array of objects.
fn decode_objects(body: &[u8]) -> Result<Vec<Map<String, Value>>, ClientError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ClientError::decode(format!("response is not valid JSON: {}", e)))?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ClientError::decode(format!(
                "expected a JSON array, found {}",
                json_kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(object) => Ok(object),
            other => Err(ClientError::decode(format!(
                "record {} is {}, expected an object",
                index,
                json_kind(&other)
            ))),
        })
        .collect()
}

/// Field accessors for one record, attributing failures to its index.
struct Fields<'a> {
    index: usize,
    object: &'a Map<String, Value>,
}

impl Fields<'_> {
    fn error(&self, field: &'static str, problem: FieldProblem) -> ClientError {
        ClientError::FieldType {
            index: self.index,
            field,
            problem,
        }
    }

    fn required_str(&self, field: &'static str) -> Result<String, ClientError> {
        match self.object.get(field) {
            Some(Value::String(s)) => Ok(s.clone()),
            None | Some(Value::Null) => Err(self.error(field, FieldProblem::Missing)),
            Some(other) => Err(self.error(
                field,
                FieldProblem::WrongType {
                    expected: "string",
                    found: json_kind(other),
                },
            )),
        }
    }

    /// Absent and null are both `None`; any other non-string is an error.
    fn optional_str(&self, field: &'static str) -> Result<Option<String>, ClientError> {
        match self.object.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.error(
                field,
                FieldProblem::WrongType {
                    expected: "string",
                    found: json_kind(other),
                },
            )),
        }
    }

    fn required_f64(&self, field: &'static str) -> Result<f64, ClientError> {
        match self.object.get(field) {
            Some(Value::Number(n)) => n.as_f64().ok_or_else(|| {
                self.error(
                    field,
                    FieldProblem::WrongType {
                        expected: "number",
                        found: "number",
                    },
                )
            }),
            None | Some(Value::Null) => Err(self.error(field, FieldProblem::Missing)),
            Some(other) => Err(self.error(
                field,
                FieldProblem::WrongType {
                    expected: "number",
                    found: json_kind(other),
                },
            )),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
