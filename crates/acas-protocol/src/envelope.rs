use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Outcome class of an invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Success, with or without payload.
    Ok,
    /// Generic failure; the message says why.
    Error,
    /// The requested content does not exist. Distinct from `Error`.
    NotFound,
}

impl Status {
    /// HTTP-style numeric code.
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Error => 500,
            Self::NotFound => 404,
        }
    }

    pub fn from_code(code: u16) -> Result<Self, ProtocolError> {
        match code {
            200 => Ok(Self::Ok),
            500 => Ok(Self::Error),
            404 => Ok(Self::NotFound),
            other => Err(ProtocolError::UnknownStatus(other)),
        }
    }
}

/// Uniform response envelope returned by every invocation.
///
/// `message` is empty on success; `payload` is present only when the
/// operation produced one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: Status,
    pub message: String,
    pub payload: Option<Vec<u8>>,
}

impl Response {
    /// Success carrying `payload`.
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: Status::Ok,
            message: String::new(),
            payload: Some(payload),
        }
    }

    /// Success without payload.
    pub fn success_empty() -> Self {
        Self {
            status: Status::Ok,
            message: String::new(),
            payload: None,
        }
    }

    /// Generic failure.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            payload: None,
        }
    }

    /// Distinguished not-found outcome.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: Status::NotFound,
            message: message.into(),
            payload: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}
