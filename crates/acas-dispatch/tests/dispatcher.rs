use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use acas_dispatch::{Dispatcher, TxContext, PANIC_MESSAGE};
use acas_ledger::{InMemoryLedger, LedgerStore, WalConfig, WalLedger, ANCHOR_KEY_PREFIX};
use acas_protocol::{Response, Status};
use acas_store::{BlobStore, FsBlobStore, InMemoryBlobStore, StoreError, StoreResult};
use acas_types::ContentAddress;
use proptest::prelude::*;

struct Harness {
    store: Arc<InMemoryBlobStore>,
    ledger: Arc<InMemoryLedger>,
    dispatcher: Dispatcher,
}

impl Harness {
    fn new() -> Self {
        let store = Arc::new(InMemoryBlobStore::new());
        let ledger = Arc::new(InMemoryLedger::new());
        let dispatcher = Dispatcher::new(store.clone(), ledger.clone());
        Self {
            store,
            ledger,
            dispatcher,
        }
    }

    fn call(&self, args: &[&[u8]]) -> Response {
        let args: Vec<Vec<u8>> = args.iter().map(|a| a.to_vec()).collect();
        self.dispatcher.invoke(&TxContext::generate(), &args)
    }

    fn anchor_keys(&self) -> Vec<String> {
        self.ledger
            .scan(ANCHOR_KEY_PREFIX)
            .unwrap()
            .into_iter()
            .map(|(key, _)| key)
            .collect()
    }
}

#[test]
fn hello_batch_scenario() {
    let h = Harness::new();

    let written = h.call(&[b"writeContent", b"hello"]);
    assert_eq!(written.status, Status::Ok);
    let address = written.payload.clone().unwrap();
    assert!(!address.is_empty());

    let read = h.call(&[b"readContent", &address]);
    assert_eq!(read.status, Status::Ok);
    assert_eq!(read.payload.as_deref(), Some(&b"hello"[..]));

    let missing = h.call(&[b"readContent", b"nonexistent"]);
    assert_eq!(missing.status, Status::NotFound);
    assert_eq!(missing.message, "content not found");
    assert!(missing.payload.is_none());

    let batch = h.call(&[b"anchorBatch", b"batchdata", b"anchordata"]);
    assert_eq!(batch, Response::success_empty());

    let anchor_address = h.call(&[b"writeContent", b"anchordata"]).payload.unwrap();
    let batch_address = h.call(&[b"writeContent", b"batchdata"]).payload.unwrap();
    let expected = format!(
        "{ANCHOR_KEY_PREFIX}{}",
        String::from_utf8(anchor_address.clone()).unwrap()
    );
    assert_eq!(h.anchor_keys(), vec![expected.clone()]);
    assert_eq!(h.ledger.get(&expected).unwrap(), Some(anchor_address));

    // hello, batchdata, anchordata; the re-writes above were no-ops.
    assert_eq!(h.store.len(), 3);
    let batch_content = h.call(&[b"readContent", &batch_address]);
    assert_eq!(batch_content.payload.as_deref(), Some(&b"batchdata"[..]));
}

#[test]
fn not_found_is_distinct_from_error() {
    let h = Harness::new();
    let absent = h.call(&[b"readContent", b"nonexistent"]);
    let invalid = h.call(&[b"readContent", b""]);
    assert_eq!(absent.status, Status::NotFound);
    assert_eq!(invalid.status, Status::Error);
    assert_ne!(absent.message, invalid.message);
}

#[test]
fn anchoring_twice_is_harmless() {
    let h = Harness::new();
    let address = h.call(&[b"writeContent", b"anchordata"]).payload.unwrap();

    assert!(h.call(&[b"writeAnchor", &address]).is_ok());
    assert!(h.call(&[b"writeAnchor", &address]).is_ok());
    assert_eq!(h.anchor_keys().len(), 1);
}

#[test]
fn anchor_does_not_require_stored_content() {
    let h = Harness::new();
    assert!(h.call(&[b"writeAnchor", b"never-stored"]).is_ok());
    assert_eq!(h.anchor_keys(), vec!["sidetreetxn_never-stored".to_string()]);
}

#[test]
fn repeated_batches_converge() {
    let h = Harness::new();
    for _ in 0..3 {
        assert!(h.call(&[b"anchorBatch", b"batchdata", b"anchordata"]).is_ok());
    }
    assert_eq!(h.store.len(), 2);
    assert_eq!(h.anchor_keys().len(), 1);
}

#[test]
fn invalid_input_leaves_state_untouched() {
    let h = Harness::new();
    let cases: [&[&[u8]]; 6] = [
        &[b"writeContent"],
        &[b"writeContent", b""],
        &[b"writeAnchor"],
        &[b"anchorBatch", b"", b"anchordata"],
        &[b"anchorBatch", b"batchdata"],
        &[b"readContent", &[0xff, 0xfe]],
    ];
    for args in cases {
        let r = h.call(args);
        assert_eq!(r.status, Status::Error, "args: {args:?}");
        assert!(!r.message.is_empty());
    }
    assert!(h.store.is_empty());
    assert!(h.ledger.is_empty());
}

#[test]
fn unknown_function_is_rejected_without_side_effects() {
    let h = Harness::new();
    let r = h.call(&[b"putContent", b"hello"]);
    assert_eq!(r.status, Status::Error);
    assert!(r.message.contains("[putContent]"));
    assert!(r.message.contains("\"writeContent\""));
    assert!(h.store.is_empty());
}

struct PanickingStore;

impl BlobStore for PanickingStore {
    fn write(&self, _content: &[u8]) -> StoreResult<ContentAddress> {
        panic!("simulated store crash");
    }

    fn read(&self, _address: &ContentAddress) -> StoreResult<Option<Vec<u8>>> {
        panic!("simulated store crash");
    }
}

#[test]
fn panics_are_contained_per_invocation() {
    let ledger = Arc::new(InMemoryLedger::new());
    let d = Dispatcher::new(Arc::new(PanickingStore), ledger.clone());
    let ctx = TxContext::generate();

    let r = d.invoke(&ctx, &[b"writeContent".to_vec(), b"hello".to_vec()]);
    assert_eq!(r, Response::error(PANIC_MESSAGE));

    let r = d.invoke(
        &ctx,
        &[b"anchorBatch".to_vec(), b"b".to_vec(), b"a".to_vec()],
    );
    assert_eq!(r, Response::error(PANIC_MESSAGE));
    assert!(ledger.is_empty());

    // Unaffected functions keep working after a panic.
    assert!(d.invoke(&ctx, &[b"warmup".to_vec()]).is_ok());
    assert!(d.invoke(&ctx, &[b"writeAnchor".to_vec(), b"abc".to_vec()]).is_ok());
}

/// In-memory store whose writes start failing after `healthy_writes`.
struct DegradingStore {
    inner: InMemoryBlobStore,
    writes: AtomicUsize,
    healthy_writes: usize,
}

impl DegradingStore {
    fn new(healthy_writes: usize) -> Self {
        Self {
            inner: InMemoryBlobStore::new(),
            writes: AtomicUsize::new(0),
            healthy_writes,
        }
    }
}

impl BlobStore for DegradingStore {
    fn write(&self, content: &[u8]) -> StoreResult<ContentAddress> {
        if self.writes.fetch_add(1, Ordering::SeqCst) >= self.healthy_writes {
            return Err(StoreError::Unavailable("disk full".into()));
        }
        self.inner.write(content)
    }

    fn read(&self, address: &ContentAddress) -> StoreResult<Option<Vec<u8>>> {
        self.inner.read(address)
    }
}

#[test]
fn store_failures_carry_the_step_that_failed() {
    let ledger = Arc::new(InMemoryLedger::new());
    let d = Dispatcher::new(Arc::new(DegradingStore::new(0)), ledger.clone());
    let ctx = TxContext::generate();

    let r = d.invoke(&ctx, &[b"writeContent".to_vec(), b"hello".to_vec()]);
    assert_eq!(r.status, Status::Error);
    assert_eq!(r.message, "failed to write content: store unavailable: disk full");
    assert!(r.payload.is_none());

    let r = d.invoke(
        &ctx,
        &[
            b"anchorBatch".to_vec(),
            b"batchdata".to_vec(),
            b"anchordata".to_vec(),
        ],
    );
    assert_eq!(
        r.message,
        "failed to write batch content: store unavailable: disk full"
    );
    assert!(ledger.is_empty());
}

#[test]
fn anchor_file_failure_keeps_batch_without_anchoring() {
    let store = Arc::new(DegradingStore::new(1));
    let ledger = Arc::new(InMemoryLedger::new());
    let d = Dispatcher::new(store.clone(), ledger.clone());

    let r = d.invoke(
        &TxContext::generate(),
        &[
            b"anchorBatch".to_vec(),
            b"batchdata".to_vec(),
            b"anchordata".to_vec(),
        ],
    );
    assert_eq!(r.status, Status::Error);
    assert_eq!(
        r.message,
        "failed to write anchor content: store unavailable: disk full"
    );

    let stored = store.inner.all_addresses();
    assert_eq!(stored.len(), 1);
    let read = d.invoke(
        &TxContext::generate(),
        &[b"readContent".to_vec(), stored[0].as_bytes().to_vec()],
    );
    assert_eq!(read.payload.as_deref(), Some(&b"batchdata"[..]));
    assert!(ledger.is_empty());
}

#[test]
fn concurrent_writers_agree_on_address() {
    let h = Arc::new(Harness::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let h = Arc::clone(&h);
            thread::spawn(move || h.call(&[b"writeContent", b"shared"]).payload.unwrap())
        })
        .collect();
    let addresses: Vec<_> = handles.into_iter().map(|t| t.join().unwrap()).collect();
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(h.store.len(), 1);
}

#[test]
fn durable_backends_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let ledger_path = dir.path().join("ledger.wal");

    let address = {
        let store = Arc::new(FsBlobStore::open(dir.path(), "dcas").unwrap());
        let ledger = Arc::new(WalLedger::open(&ledger_path, WalConfig::default()).unwrap());
        let d = Dispatcher::new(store, ledger);
        let ctx = TxContext::generate();
        let batch = d.invoke(
            &ctx,
            &[
                b"anchorBatch".to_vec(),
                b"batchdata".to_vec(),
                b"anchordata".to_vec(),
            ],
        );
        assert!(batch.is_ok());
        d.invoke(&ctx, &[b"writeContent".to_vec(), b"anchordata".to_vec()])
            .payload
            .unwrap()
    };

    let store = Arc::new(FsBlobStore::open(dir.path(), "dcas").unwrap());
    let ledger = Arc::new(WalLedger::open(&ledger_path, WalConfig::default()).unwrap());
    let d = Dispatcher::new(store, ledger);
    let read = d.invoke(
        &TxContext::generate(),
        &[b"readContent".to_vec(), address.clone()],
    );
    assert_eq!(read.payload.as_deref(), Some(&b"anchordata"[..]));

    let anchored = ContentAddress::from_utf8(&address).unwrap();
    assert!(d.anchors().is_anchored(&anchored).unwrap());
}

proptest! {
    #[test]
    fn write_is_idempotent_and_round_trips(content in proptest::collection::vec(any::<u8>(), 1..512)) {
        let h = Harness::new();
        let first = h.call(&[b"writeContent", &content]);
        let second = h.call(&[b"writeContent", &content]);
        prop_assert!(first.is_ok());
        prop_assert_eq!(&first.payload, &second.payload);
        prop_assert_eq!(h.store.len(), 1);

        let address = first.payload.unwrap();
        let read = h.call(&[b"readContent", &address]);
        prop_assert_eq!(read.payload, Some(content));
    }
}
