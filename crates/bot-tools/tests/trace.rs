use bot_tools::{TraceEvent, TraceLog, TraceSink, VecTraceSink};

#[test]
fn log_records_events_in_order() {
    let mut log = TraceLog::default();
    log.push(TraceEvent::new(1, "first").with_a(10).with_b(20));
    log.push(TraceEvent::new(2, "second"));

    assert_eq!(log.events.len(), 2);
    assert_eq!(log.events[0].tag, "first");
    assert_eq!(log.events[0].a, 10);
    assert_eq!(log.events[0].b, 20);
    assert_eq!(log.events[1].tick, 2);
}

#[test]
fn drain_empties_the_log() {
    let mut log = TraceLog::default();
    log.push(TraceEvent::new(1, "only"));

    let drained = log.drain();
    assert_eq!(drained.len(), 1);
    assert!(log.events.is_empty());
}

#[test]
fn forward_moves_events_into_a_sink() {
    let mut log = TraceLog::default();
    log.push(TraceEvent::new(3, "a"));
    log.push(TraceEvent::new(4, "b"));

    let mut sink = VecTraceSink::default();
    log.forward(&mut sink);

    assert!(log.events.is_empty());
    assert_eq!(sink.events.len(), 2);
    assert_eq!(sink.events[1].tag, "b");
}

#[test]
fn null_sink_discards() {
    let mut sink = bot_tools::NullTraceSink;
    sink.emit(TraceEvent::new(1, "dropped"));
}
