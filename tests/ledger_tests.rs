use signbridge::kernel::ledger::{GlossLedger, SharedLedger};

#[test]
fn test_pop_last_on_empty_ledger_is_noop() {
    let mut ledger = GlossLedger::new();
    assert_eq!(ledger.pop_last(), None);
    assert!(ledger.is_empty());

    let shared = SharedLedger::new();
    assert_eq!(shared.pop_last(), None);
    assert!(shared.is_empty());
}

#[test]
fn test_append_pop_clear_keep_order() {
    let mut ledger = GlossLedger::new();
    ledger.append("HOLA");
    ledger.append("COMO");
    ledger.append("ESTAR");

    assert_eq!(ledger.pop_last().as_deref(), Some("ESTAR"));
    assert_eq!(ledger.entries(), ["HOLA", "COMO"]);
    assert_eq!(ledger.display(), "HOLA COMO");

    ledger.clear();
    assert!(ledger.is_empty());
}

#[test]
fn test_snapshot_is_detached_from_live_ledger() {
    let ledger = SharedLedger::new();
    ledger.append("HOLA");
    ledger.append("MUNDO");

    let snapshot = ledger.snapshot();
    ledger.clear();
    ledger.append("OTRO");

    assert_eq!(snapshot, vec!["HOLA".to_string(), "MUNDO".to_string()]);
    assert_eq!(ledger.snapshot(), vec!["OTRO".to_string()]);
}

#[test]
fn test_concurrent_appends_are_serialized() {
    let ledger = SharedLedger::new();
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let ledger = ledger.clone();
            std::thread::spawn(move || {
                for i in 0..250 {
                    ledger.append(format!("G{}_{}", t, i));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(ledger.len(), 1_000);
    // Per-writer order is preserved.
    let snap = ledger.snapshot();
    let from_zero: Vec<_> = snap.iter().filter(|g| g.starts_with("G0_")).collect();
    assert_eq!(from_zero.first().map(|s| s.as_str()), Some("G0_0"));
    assert_eq!(from_zero.last().map(|s| s.as_str()), Some("G0_249"));
}
