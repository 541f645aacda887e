use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use acas_ledger::{AnchorLedger, InMemoryLedger, LedgerStore};
use acas_protocol::Response;
use acas_store::{BlobStore, CasClient, InMemoryBlobStore};
use tracing::{debug, error};

use crate::context::TxContext;
use crate::function::Function;
use crate::handlers::{self, Handler};
use crate::panic_hook;

/// Message returned when the argument list is empty.
pub const FUNCTION_REQUIRED: &str = "function name is required";

/// Message returned when a handler panicked. Details go to the log only.
pub const PANIC_MESSAGE: &str = "panic: check server logs";

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Routes invocations to handlers and turns every outcome, including a
/// panic, into a [`Response`].
///
/// The dispatcher holds no per-request state. One instance serves
/// concurrent invocations; all shared state lives behind the store and
/// ledger.
pub struct Dispatcher {
    cas: CasClient,
    anchors: AnchorLedger,
    functions: HashMap<&'static str, Handler>,
}

impl Dispatcher {
    /// Build a dispatcher over the given collaborators.
    pub fn new(store: Arc<dyn BlobStore>, ledger: Arc<dyn LedgerStore>) -> Self {
        panic_hook::install();

        let mut functions: HashMap<&'static str, Handler> = HashMap::new();
        for function in Function::ALL {
            functions.insert(function.name(), handler_for(function));
        }

        Self {
            cas: CasClient::new(store),
            anchors: AnchorLedger::new(ledger),
            functions,
        }
    }

    /// Dispatcher over fresh in-memory collaborators.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryBlobStore::new()),
            Arc::new(InMemoryLedger::new()),
        )
    }

    pub fn cas(&self) -> &CasClient {
        &self.cas
    }

    pub fn anchors(&self) -> &AnchorLedger {
        &self.anchors
    }

    /// Registered function names, in no particular order.
    pub fn function_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.keys().copied()
    }

    /// Handle one invocation. `args[0]` names the function; the rest are
    /// its positional arguments.
    ///
    /// Never panics and never returns an error: every outcome is a
    /// `Response`.
    pub fn invoke(&self, ctx: &TxContext, args: &[Vec<u8>]) -> Response {
        let span = ctx.span();
        let _entered = span.enter();

        panic_hook::clear();
        match panic::catch_unwind(AssertUnwindSafe(|| self.route(ctx, args))) {
            Ok(response) => response,
            Err(payload) => {
                let message = panic_hook::payload_message(payload.as_ref());
                match panic_hook::take() {
                    Some(report) => error!(
                        tx_id = %ctx.tx_id(),
                        panic = message,
                        location = %report.location,
                        "recovered from panic in handler\n{}",
                        report.backtrace
                    ),
                    None => error!(
                        tx_id = %ctx.tx_id(),
                        panic = message,
                        "recovered from panic in handler"
                    ),
                }
                Response::error(PANIC_MESSAGE)
            }
        }
    }

    fn route(&self, ctx: &TxContext, args: &[Vec<u8>]) -> Response {
        let Some((name, rest)) = args.split_first() else {
            debug!(tx_id = %ctx.tx_id(), "{FUNCTION_REQUIRED}");
            return Response::error(FUNCTION_REQUIRED);
        };
        let name = String::from_utf8_lossy(name);
        debug!(tx_id = %ctx.tx_id(), function = %name, "invoke");

        let Some(handler) = self.functions.get(name.as_ref()) else {
            let message = format!(
                "Invalid invoke function [{name}]. Expecting one of: {}",
                self.expected_functions()
            );
            debug!(tx_id = %ctx.tx_id(), "{message}");
            return Response::error(message);
        };
        handler(self, ctx, rest)
    }

    fn expected_functions(&self) -> String {
        self.function_names()
            .map(|name| format!("\"{name}\""))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("functions", &self.functions.len())
            .finish_non_exhaustive()
    }
}

fn handler_for(function: Function) -> Handler {
    match function {
        Function::WriteContent => handlers::write_content,
        Function::ReadContent => handlers::read_content,
        Function::WriteAnchor => handlers::write_anchor,
        Function::AnchorBatch => handlers::anchor_batch,
        Function::Warmup => handlers::warmup,
    }
}
