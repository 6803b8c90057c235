use std::time::Duration;

use wrapcall::utils::profiler::Profiler;

#[test]
fn profiler_records_named_phases() {
    let mut profiler = Profiler::new();
    profiler.record_phase("dummy", || std::thread::sleep(Duration::from_millis(1)));
    assert_eq!(profiler.phases().len(), 1);
    assert_eq!(profiler.phases()[0].name, "dummy");
    assert!(profiler.phases()[0].duration >= Duration::from_millis(1));
}

#[test]
fn profiler_returns_closure_output() {
    let mut profiler = Profiler::new();
    let value = profiler.record_phase("compute", || 6 * 7);
    assert_eq!(value, 42);
}

#[test]
fn profiler_totals_pushed_phases() {
    let mut profiler = Profiler::new();
    profiler.push_phase("first", Duration::from_millis(3));
    profiler.push_phase("second", Duration::from_millis(4));
    assert_eq!(profiler.total(), Duration::from_millis(7));
}
