// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use tnetcodec::{TnetMap, TnetValue};
use uuid::Uuid;

// ============================================================================
// Sample Values
// ============================================================================

/// A record touching every value type, with keys out of alphabetical order.
pub fn sample_record() -> TnetValue {
    let created = NaiveDate::from_ymd_opt(2023, 11, 5)
        .unwrap()
        .and_hms_milli_opt(8, 30, 0, 250)
        .unwrap();
    TnetValue::dict([
        ("name", TnetValue::from("sensor-α")),
        ("id", TnetValue::Int(-42)),
        ("gain", TnetValue::Float(0.125)),
        ("enabled", TnetValue::Bool(true)),
        ("created", TnetValue::datetime(created)),
        ("guid", TnetValue::Guid(Uuid::nil())),
        ("raw", TnetValue::bytes(vec![0x00, 0x7f, 0xff])),
        ("notes", TnetValue::Null),
        (
            "history",
            TnetValue::list([TnetValue::Int(1), TnetValue::from(""), TnetValue::Null]),
        ),
        ("empty", TnetValue::Dict(TnetMap::new())),
    ])
}

/// A list nested `depth` levels deep, innermost empty.
pub fn nested_list(depth: usize) -> TnetValue {
    let mut value = TnetValue::List(vec![]);
    for _ in 1..depth {
        value = TnetValue::List(vec![value]);
    }
    value
}

/// Wire text for a list nested `depth` levels deep, innermost empty.
pub fn nested_list_wire(depth: usize) -> Vec<u8> {
    let mut wire = b"0:]".to_vec();
    for _ in 1..depth {
        let mut outer = format!("{}:", wire.len()).into_bytes();
        outer.extend_from_slice(&wire);
        outer.push(b']');
        wire = outer;
    }
    wire
}

// ============================================================================
// Temporary Files
// ============================================================================

/// Removes a temporary test directory when dropped.
#[derive(Debug)]
pub struct CleanupGuard(pub PathBuf);

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

/// Create a unique temporary directory for one test.
pub fn temp_dir(prefix: &str) -> (PathBuf, CleanupGuard) {
    let dir = std::env::temp_dir().join(format!(
        "tnetcodec_{prefix}_{}_{}",
        std::process::id(),
        Uuid::new_v4().simple()
    ));
    fs::create_dir_all(&dir).unwrap();
    let guard = CleanupGuard(dir.clone());
    (dir, guard)
}
