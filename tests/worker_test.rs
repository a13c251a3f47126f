//! Integration tests for the worker offload channel

use head_scroll::frame::PixelBuffer;
use head_scroll::region_scorer;
use head_scroll::worker::DetectionWorker;

fn frame_with_subject(y0: u32) -> PixelBuffer {
    let mut buf = PixelBuffer::blank(200, 200);
    for y in y0..y0 + 30 {
        for x in 65..95 {
            buf.set_rgb(x, y, 180, 120, 90);
        }
    }
    buf
}

/// The worker produces exactly the synchronous scorer's result
#[test]
fn test_offloaded_result_matches_synchronous_scoring() {
    let mut worker = DetectionWorker::spawn().expect("spawn worker");
    for y0 in [30u32, 60, 90, 120] {
        let frame = frame_with_subject(y0);
        let expected = region_scorer::score(&frame);
        let offloaded = worker.submit(frame).wait();
        assert_eq!(offloaded, expected, "mismatch for subject at y0={y0}");
    }
}

/// A long run of sequential submissions resolves each id exactly once
#[test]
fn test_many_sequential_submissions() {
    let mut worker = DetectionWorker::spawn().expect("spawn worker");
    for i in 0..50u32 {
        let y0 = 30 + (i % 8) * 15;
        let result = worker.submit(frame_with_subject(y0)).wait();
        assert_eq!(result, Some(f64::from(y0) + 15.0), "iteration {i}");
    }
}

/// Replies to abandoned submissions never leak into later results
#[test]
fn test_stale_replies_are_dropped() {
    let mut worker = DetectionWorker::spawn().expect("spawn worker");
    // Abandon several pending detections in a row.
    for _ in 0..3 {
        drop(worker.submit(frame_with_subject(30)));
    }
    let result = worker.submit(frame_with_subject(120)).wait();
    assert_eq!(result, Some(135.0));
}

/// Undetectable frames resolve to none, not an error
#[test]
fn test_miss_is_not_an_error() {
    let mut worker = DetectionWorker::spawn().expect("spawn worker");
    assert_eq!(worker.submit(PixelBuffer::blank(64, 64)).wait(), None);
    // The channel stays usable afterwards.
    assert_eq!(worker.submit(frame_with_subject(60)).wait(), Some(75.0));
}

/// Dropping the handle shuts the worker thread down cleanly
#[test]
fn test_drop_joins_worker() {
    let mut worker = DetectionWorker::spawn().expect("spawn worker");
    let _ = worker.submit(frame_with_subject(30)).wait();
    drop(worker);
    // Nothing to assert beyond not hanging; drop blocks until the thread
    // has exited.
}
