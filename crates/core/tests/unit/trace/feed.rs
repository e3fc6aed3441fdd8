//! In-Memory Feed Tests

use superpipe_core::trace::{InstructionFeed, MemoryFeed, OpType};

use crate::common::builder::RecordBuilder;

#[test]
fn yields_records_in_order_then_none() {
    let mut feed: MemoryFeed = [RecordBuilder::load().build(), RecordBuilder::store().build()]
        .into_iter()
        .collect();

    assert_eq!(feed.remaining(), 2);
    assert_eq!(feed.next_record().unwrap().map(|r| r.op_type), Some(OpType::Load));
    assert_eq!(feed.next_record().unwrap().map(|r| r.op_type), Some(OpType::Store));
    assert!(feed.next_record().unwrap().is_none());
    assert!(feed.next_record().unwrap().is_none());
    assert_eq!(feed.requests(), 4);
    assert_eq!(feed.remaining(), 0);
}

#[test]
fn boxed_feed_forwards_requests() {
    let mut feed: Box<dyn InstructionFeed> = Box::new(MemoryFeed::new(vec![RecordBuilder::other().build()]));
    assert_eq!(feed.next_record().unwrap().map(|r| r.op_type), Some(OpType::Other));
    assert!(feed.next_record().unwrap().is_none());
}
