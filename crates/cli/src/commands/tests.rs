use super::*;
use tempfile::tempdir;

// -------------------- Helpers --------------------

/// Runs each line through `execute` and returns everything written.
fn run(da: &mut RamDataAccess, script: &str) -> String {
    let mut out = Vec::new();
    for line in script.lines() {
        if execute(da, line, &mut out).unwrap() == Flow::Exit {
            break;
        }
    }
    String::from_utf8(out).unwrap()
}

fn allocated(ints: u64) -> RamDataAccess {
    let mut da = RamDataAccess::new("unused.bin");
    da.ensure_capacity(ints * 4);
    da
}

// -------------------- Basic commands --------------------

#[test]
fn set_then_get() {
    let mut da = allocated(10);
    let out = run(&mut da, "SET 3 -17\nGET 3\nGET 4\n");
    assert_eq!(out, "OK\n-17\n0\n");
}

#[test]
fn commands_are_case_insensitive() {
    let mut da = allocated(2);
    let out = run(&mut da, "set 1 5\nget 1\n");
    assert_eq!(out, "OK\n5\n");
}

#[test]
fn blank_lines_are_ignored() {
    let mut da = allocated(2);
    assert_eq!(run(&mut da, "\n   \n"), "");
}

#[test]
fn ensure_reports_capacity_and_grows() {
    let mut da = allocated(10);
    let out = run(&mut da, "ENSURE 40\nENSURE 44\n");
    assert_eq!(out, "OK (capacity=10)\nOK (capacity=16)\n");
}

#[test]
fn dump_prints_range() {
    let mut da = allocated(4);
    let out = run(&mut da, "SET 1 9\nDUMP 1 3\n");
    assert_eq!(out, "OK\n1 -> 9\n2 -> 0\n(2 entries)\n");
}

#[test]
fn dump_clamps_to_capacity() {
    let mut da = allocated(2);
    let out = run(&mut da, "DUMP 5 100\nDUMP\n");
    assert_eq!(out, "(empty)\n0 -> 0\n1 -> 0\n(2 entries)\n");
}

#[test]
fn exit_stops_processing() {
    let mut da = allocated(1);
    let out = run(&mut da, "EXIT\nGET 0\n");
    assert_eq!(out, "bye\n");
}

#[test]
fn unknown_command() {
    let mut da = allocated(1);
    assert_eq!(run(&mut da, "FROB\n"), "unknown command: FROB\n");
}

// -------------------- Guards --------------------

#[test]
fn out_of_range_index_is_reported_not_panicking() {
    let mut da = allocated(2);
    let out = run(&mut da, "SET 2 1\nGET 99\n");
    assert!(out.contains("ERR index 2 out of range (capacity=2)"));
    assert!(out.contains("ERR index 99 out of range"));
}

#[test]
fn malformed_arguments_are_reported() {
    let mut da = allocated(2);
    let out = run(&mut da, "SET x 1\nSET 0 y\nGET\nENSURE lots\nSET 0\n");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "ERR invalid index: x",
            "ERR invalid value: y",
            "ERR usage: GET index",
            "ERR invalid byte count: lots",
            "ERR usage: SET index value",
        ]
    );
}

#[test]
fn closed_store_refuses_access() {
    let mut da = allocated(2);
    let out = run(&mut da, "CLOSE\nGET 0\nENSURE 8\nLOAD\nDUMP\n");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "OK",
            "ERR store is not allocated",
            "ERR store is closed",
            "(not loaded)",
            "ERR store is not allocated",
        ]
    );
}

// -------------------- Persistence --------------------

#[test]
fn flush_and_load_through_commands() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shell.bin");

    let mut da = RamDataAccess::new(&path);
    let out = run(&mut da, "ENSURE 40\nSET 9 42\nFLUSH\n");
    assert!(out.ends_with("OK (40 bytes)\n"));

    let mut fresh = RamDataAccess::new(&path);
    let out = run(&mut fresh, "LOAD\nGET 9\nLOAD\n");
    assert_eq!(out, "OK (capacity=10)\n42\n(not loaded)\n");
}

#[test]
fn flush_failure_is_reported_with_cause() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("shell.bin");

    let mut da = RamDataAccess::new(&path);
    let out = run(&mut da, "ENSURE 4\nFLUSH\n");
    assert!(out.contains("ERR flush failed: couldn't store integers to"));
}

#[test]
fn flush_unallocated_is_reported() {
    let mut da = RamDataAccess::new("unused.bin");
    let out = run(&mut da, "FLUSH\n");
    assert!(out.starts_with("ERR flush failed: no integers allocated"));
}

#[test]
fn info_shows_debug_view() {
    let mut da = allocated(3);
    let out = run(&mut da, "INFO\n");
    assert!(out.contains("RamDataAccess"));
    assert!(out.contains("capacity: 3"));
}
