//! Request dispatcher for the anchored content store (ACAS).
//!
//! The [`Dispatcher`] is the single entry point: it receives a function
//! name plus positional byte-array arguments, routes to one of a fixed set
//! of operations, and always answers with a well-formed
//! [`Response`](acas_protocol::Response) envelope, even when a handler
//! panics.
//!
//! | Function       | Args                | Success payload |
//! |----------------|---------------------|-----------------|
//! | `writeContent` | `[content]`         | address         |
//! | `readContent`  | `[address]`         | content         |
//! | `writeAnchor`  | `[address]`         | none            |
//! | `anchorBatch`  | `[batch, anchor]`   | none            |
//! | `warmup`       | `[]`                | none            |

pub mod batch;
pub mod context;
pub mod dispatcher;
pub mod function;
mod handlers;
mod panic_hook;

pub use batch::{anchor_batch, BatchError};
pub use context::TxContext;
pub use dispatcher::{Dispatcher, FUNCTION_REQUIRED, PANIC_MESSAGE};
pub use function::Function;
