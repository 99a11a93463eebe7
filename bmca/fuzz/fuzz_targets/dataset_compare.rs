#![no_main]

use bmca::{
    compare_dataset,
    config::{ClockAccuracy, ClockIdentity, ClockQuality},
    Dataset, PortIdentity,
};
use libfuzzer_sys::fuzz_target;

const DATASET_LEN: usize = 36;

fn identity(data: &[u8]) -> ClockIdentity {
    let mut bytes = [0; 8];
    bytes.copy_from_slice(&data[..8]);
    ClockIdentity(bytes)
}

fn port_identity(data: &[u8]) -> PortIdentity {
    PortIdentity {
        clock_identity: identity(&data[..8]),
        port_number: u16::from_be_bytes([data[8], data[9]]),
    }
}

fn dataset(data: &[u8]) -> Dataset {
    Dataset {
        identity: identity(&data[0..8]),
        priority_1: data[8],
        priority_2: data[9],
        quality: ClockQuality {
            clock_class: data[10],
            clock_accuracy: ClockAccuracy(data[11]),
            offset_scaled_log_variance: u16::from_be_bytes([data[12], data[13]]),
        },
        steps_removed: u16::from_be_bytes([data[14], data[15]]),
        sender: port_identity(&data[16..26]),
        receiver: port_identity(&data[26..36]),
    }
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 1 + 2 * DATASET_LEN {
        return;
    }

    let flags = data[0];
    let a = dataset(&data[1..]);
    let mut b = dataset(&data[1 + DATASET_LEN..]);

    // Make the interesting topology cases reachable
    if flags & 1 != 0 {
        b.identity = a.identity;
    }
    if flags & 2 != 0 {
        b.sender = a.sender;
    }
    if flags & 4 != 0 {
        b.steps_removed = a.steps_removed.wrapping_add(1);
    }

    let forward = compare_dataset(Some(&a), Some(&b));
    let backward = compare_dataset(Some(&b), Some(&a));
    assert_eq!(forward, backward.mirror());

    assert!(compare_dataset(Some(&a), None).is_better());
    assert!(!compare_dataset(None, Some(&a)).is_better());
    assert!(!compare_dataset(Some(&a), Some(&a)).is_better());
});
