use std::fmt;

/// The closed set of invocable functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    WriteContent,
    ReadContent,
    WriteAnchor,
    AnchorBatch,
    Warmup,
}

impl Function {
    pub const ALL: [Function; 5] = [
        Function::WriteContent,
        Function::ReadContent,
        Function::WriteAnchor,
        Function::AnchorBatch,
        Function::Warmup,
    ];

    /// Name used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Self::WriteContent => "writeContent",
            Self::ReadContent => "readContent",
            Self::WriteAnchor => "writeAnchor",
            Self::AnchorBatch => "anchorBatch",
            Self::Warmup => "warmup",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
