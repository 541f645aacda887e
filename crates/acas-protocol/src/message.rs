use serde::{Deserialize, Serialize};

use crate::envelope::Response;

pub const PROTOCOL_VERSION: u32 = 1;
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024 * 1024;
/// Length of the frame prefix: 4 bytes length + 1 byte tag.
pub const FRAME_HEADER_SIZE: usize = 5;

/// A function request: positional byte-array arguments, the first of
/// which names the function.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub args: Vec<Vec<u8>>,
}

impl Invocation {
    /// Build an invocation of `function` with the given arguments.
    pub fn new(function: &str, args: impl IntoIterator<Item = Vec<u8>>) -> Self {
        let mut all = vec![function.as_bytes().to_vec()];
        all.extend(args);
        Self { args: all }
    }

    /// Wrap raw positional arguments as received.
    pub fn from_args(args: Vec<Vec<u8>>) -> Self {
        Self { args }
    }

    /// The function name, if present and valid UTF-8.
    pub fn function_name(&self) -> Option<&str> {
        self.args.first().and_then(|a| std::str::from_utf8(a).ok())
    }
}

/// All message types carried on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireMessage {
    Invoke(Invocation),
    Result(Response),
}

impl WireMessage {
    pub fn type_tag(&self) -> u8 {
        match self {
            Self::Invoke(_) => 1,
            Self::Result(_) => 2,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Invoke(_) => "Invoke",
            Self::Result(_) => "Result",
        }
    }
}
