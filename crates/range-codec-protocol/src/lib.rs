//! Shared protocol types for moving encoded range data between a client and
//! a process that owns the spreadsheet.
//!
//! The protocol is JSON-over-stdio: one JSON object per line in each
//! direction. Range contents always travel as a single encoded string (see
//! [`range_codec`]), never as nested JSON arrays.

mod dispatch;

pub use dispatch::{handle_request, RangeHost, SheetHost};

use serde::{Deserialize, Serialize};

/// A command sent from the client to the host process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Monotonically increasing request ID for correlating responses.
    pub id: u64,
    /// The command to execute.
    #[serde(flatten)]
    pub command: Command,
}

/// Commands the client can send to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "params")]
pub enum Command {
    /// Read a range (e.g. "A1:E2") and return its values as encoded range data.
    ReadRange { sheet: SheetRef, range: String },

    /// Decode `data` and write it into a range of the same size.
    WriteRange {
        sheet: SheetRef,
        range: String,
        data: String,
    },

    /// Report the row and column count of a range.
    Dimensions { sheet: SheetRef, range: String },

    /// Stop serving requests.
    Shutdown,
}

/// Reference to a worksheet — by 0-based index or by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SheetRef {
    Index(u32),
    Name(String),
}

impl std::fmt::Display for SheetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetRef::Index(i) => write!(f, "#{i}"),
            SheetRef::Name(name) => write!(f, "{name}"),
        }
    }
}

/// A response sent from the host back to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// The request ID this response corresponds to.
    pub id: u64,
    /// The result of the command.
    #[serde(flatten)]
    pub result: ResponseResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ResponseResult {
    #[serde(rename = "ok")]
    Ok {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<ResponseData>,
    },
    #[serde(rename = "error")]
    Error { message: String },
}

/// Data returned in successful responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    /// Encoded range data.
    Range { encoded: String },
    /// Size of a range.
    Dimensions { rows: usize, cols: usize },
}

impl Response {
    /// A successful response, optionally carrying data
    pub fn ok(id: u64, data: Option<ResponseData>) -> Self {
        Self {
            id,
            result: ResponseResult::Ok { data },
        }
    }

    /// An error response
    pub fn error(id: u64, message: impl Into<String>) -> Self {
        Self {
            id,
            result: ResponseResult::Error {
                message: message.into(),
            },
        }
    }

    /// True for `status: ok`
    pub fn is_ok(&self) -> bool {
        matches!(self.result, ResponseResult::Ok { .. })
    }

    /// Encoded range data carried by this response, if any
    pub fn range_data(&self) -> Option<&str> {
        match &self.result {
            ResponseResult::Ok {
                data: Some(ResponseData::Range { encoded }),
            } => Some(encoded),
            _ => None,
        }
    }
}

/// Errors turning a protocol line into a [`Request`].
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("empty request line")]
    Empty,
}

/// Parse one request line
pub fn parse_request(line: &str) -> Result<Request, ProtocolError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ProtocolError::Empty);
    }
    Ok(serde_json::from_str(line)?)
}

/// Serialize a response as one line (no trailing newline)
pub fn response_line(response: &Response) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(response)?)
}
