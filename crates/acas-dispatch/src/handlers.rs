//! One function per invocable operation.
//!
//! Handlers receive the arguments after the function name. Missing
//! positional arguments read as empty, which the adapters reject as caller
//! errors before any store or ledger is touched.

use std::fmt::Display;

use acas_ledger::AnchorError;
use acas_protocol::Response;
use acas_store::CasError;
use tracing::{debug, error};

use crate::batch::anchor_batch as run_batch;
use crate::context::TxContext;
use crate::dispatcher::Dispatcher;

/// Handler signature shared by every table entry.
pub(crate) type Handler = fn(&Dispatcher, &TxContext, &[Vec<u8>]) -> Response;

/// Errors a handler turns into an `Error` envelope.
trait HandlerError: Display {
    fn is_caller_error(&self) -> bool;
}

impl HandlerError for CasError {
    fn is_caller_error(&self) -> bool {
        CasError::is_caller_error(self)
    }
}

impl HandlerError for AnchorError {
    fn is_caller_error(&self) -> bool {
        AnchorError::is_caller_error(self)
    }
}

fn arg(args: &[Vec<u8>], index: usize) -> &[u8] {
    args.get(index).map(Vec::as_slice).unwrap_or_default()
}

/// Caller errors carry their own message; collaborator errors are
/// prefixed with `context`.
fn fail(ctx: &TxContext, context: &str, err: &impl HandlerError) -> Response {
    if err.is_caller_error() {
        report(ctx, err.to_string(), true)
    } else {
        report(ctx, format!("{context}: {err}"), false)
    }
}

fn report(ctx: &TxContext, message: String, caller_error: bool) -> Response {
    if caller_error {
        debug!(tx_id = %ctx.tx_id(), "{message}");
    } else {
        error!(tx_id = %ctx.tx_id(), "{message}");
    }
    Response::error(message)
}

pub(crate) fn write_content(d: &Dispatcher, ctx: &TxContext, args: &[Vec<u8>]) -> Response {
    match d.cas().write(arg(args, 0)) {
        Ok(address) => Response::success(address.into_bytes()),
        Err(e) => fail(ctx, "failed to write content", &e),
    }
}

pub(crate) fn read_content(d: &Dispatcher, ctx: &TxContext, args: &[Vec<u8>]) -> Response {
    match d.cas().read(arg(args, 0)) {
        Ok(Some(content)) => Response::success(content),
        Ok(None) => {
            debug!(tx_id = %ctx.tx_id(), "content not found");
            Response::not_found("content not found")
        }
        Err(e) => fail(ctx, "failed to read content", &e),
    }
}

pub(crate) fn write_anchor(d: &Dispatcher, ctx: &TxContext, args: &[Vec<u8>]) -> Response {
    match d.anchors().record_anchor(arg(args, 0)) {
        Ok(_) => Response::success_empty(),
        Err(e) => fail(ctx, "failed to write anchor address", &e),
    }
}

pub(crate) fn anchor_batch(d: &Dispatcher, ctx: &TxContext, args: &[Vec<u8>]) -> Response {
    match run_batch(d.cas(), d.anchors(), arg(args, 0), arg(args, 1)) {
        Ok(address) => {
            debug!(tx_id = %ctx.tx_id(), address = %address.short(), "batch anchored");
            Response::success_empty()
        }
        Err(e) => report(ctx, e.to_string(), e.is_caller_error()),
    }
}

pub(crate) fn warmup(_d: &Dispatcher, _ctx: &TxContext, _args: &[Vec<u8>]) -> Response {
    Response::success_empty()
}
