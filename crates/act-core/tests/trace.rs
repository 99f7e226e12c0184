use std::cell::RefCell;
use std::rc::Rc;

use act_core::{tags, NullTraceSink, TraceEvent, TraceLog, TraceSink};

#[derive(Clone, Default)]
struct RcSink(Rc<RefCell<Vec<TraceEvent>>>);

impl TraceSink for RcSink {
    fn emit(&mut self, event: TraceEvent) {
        self.0.borrow_mut().push(event);
    }
}

#[test]
fn trace_log_filters_by_tag_and_node() {
    let mut log = TraceLog::default();
    assert!(log.is_empty());
    log.record(1, tags::NODE_START, Some(0));
    log.record(1, tags::NODE_START, Some(1));
    log.emit(TraceEvent::new(3, tags::NODE_END).with_node(1));
    log.record(3, tags::SCRIPT_FINISH, None);

    assert_eq!(log.nodes_tagged(tags::NODE_START), vec![0, 1]);
    assert_eq!(log.nodes_tagged(tags::NODE_END), vec![1]);
    assert_eq!(log.count(tags::NODE_END, 1), 1);
    assert_eq!(log.count(tags::NODE_END, 0), 0);
    assert_eq!(log.events[3].tag, "script.finish");
    assert_eq!(log.events[3].node, None);
}

#[test]
fn sinks_receive_events_in_order() {
    let handle = RcSink::default();
    let shared = handle.0.clone();
    let mut sink: Box<dyn TraceSink> = Box::new(handle);

    sink.emit(TraceEvent::new(2, "a"));
    sink.emit(TraceEvent::new(3, "b").with_node(4));

    let events = shared.borrow();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].tag, "a");
    assert_eq!(events[1].node, Some(4));

    let mut null: Box<dyn TraceSink> = Box::new(NullTraceSink);
    null.emit(TraceEvent::new(9, "c"));
}
