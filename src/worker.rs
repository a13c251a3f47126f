//! Worker offload channel: runs the region scorer on a dedicated thread.
//!
//! Buffers are moved into the worker, never shared; the only cross-thread
//! traffic is the transferred frame and a small correlation-tagged result
//! message. The frame driver issues at most one submission per frame and
//! waits for it, so the pending set is effectively bounded to one id.

use crate::frame::PixelBuffer;
use crate::region_scorer;
use crate::{Error, Result};
use crossbeam_channel::{Receiver, Sender};
use log::{debug, warn};
use std::thread::JoinHandle;

/// A scoring job moved to the worker thread.
struct Job {
    id: u64,
    buffer: PixelBuffer,
}

/// The worker's answer for one job.
struct Reply {
    id: u64,
    result: Option<f64>,
}

/// Handle to the detection worker thread.
///
/// Dropping the handle closes the job channel and joins the thread.
pub struct DetectionWorker {
    job_tx: Option<Sender<Job>>,
    reply_rx: Receiver<Reply>,
    next_id: u64,
    handle: Option<JoinHandle<()>>,
}

impl DetectionWorker {
    /// Spawn the worker thread.
    pub fn spawn() -> Result<Self> {
        let (job_tx, job_rx) = crossbeam_channel::bounded::<Job>(1);
        let (reply_tx, reply_rx) = crossbeam_channel::bounded::<Reply>(4);

        let handle = std::thread::Builder::new()
            .name("head-scroll-detector".to_string())
            .spawn(move || {
                for job in job_rx {
                    let result = region_scorer::score(&job.buffer);
                    if reply_tx.send(Reply { id: job.id, result }).is_err() {
                        break;
                    }
                }
                debug!("detection worker shutting down");
            })
            .map_err(|e| Error::WorkerChannel(format!("failed to spawn worker: {e}")))?;

        Ok(Self {
            job_tx: Some(job_tx),
            reply_rx,
            next_id: 0,
            handle: Some(handle),
        })
    }

    /// Move a buffer to the worker for scoring.
    ///
    /// The returned pending handle resolves exactly once for this
    /// submission's correlation id; replies to older, abandoned submissions
    /// are drained and discarded on the way.
    pub fn submit(&mut self, buffer: PixelBuffer) -> PendingDetection<'_> {
        self.next_id += 1;
        let id = self.next_id;
        let sent = match &self.job_tx {
            Some(tx) => tx.send(Job { id, buffer }).is_ok(),
            None => false,
        };
        if !sent {
            warn!("detection worker unavailable, submission {id} dropped");
        }
        PendingDetection {
            reply_rx: &self.reply_rx,
            id,
            sent,
        }
    }
}

impl Drop for DetectionWorker {
    fn drop(&mut self) {
        // Closing the job channel ends the worker loop.
        self.job_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// A single in-flight detection awaiting its result.
pub struct PendingDetection<'a> {
    reply_rx: &'a Receiver<Reply>,
    id: u64,
    sent: bool,
}

impl PendingDetection<'_> {
    /// Block until the reply matching this submission arrives.
    ///
    /// Resolves to `None` when the submission never reached the worker or
    /// the worker has shut down. Stale replies carry a lower id and are
    /// dropped without being surfaced.
    pub fn wait(self) -> Option<f64> {
        if !self.sent {
            return None;
        }
        loop {
            match self.reply_rx.recv() {
                Ok(reply) if reply.id == self.id => return reply.result,
                Ok(reply) => {
                    debug!("discarding stale worker reply {}", reply.id);
                }
                Err(_) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skin_frame(y0: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::blank(200, 200);
        for y in y0..y0 + 30 {
            for x in 50..80 {
                buf.set_rgb(x, y, 180, 120, 90);
            }
        }
        buf
    }

    #[test]
    fn test_submit_and_wait() {
        let mut worker = DetectionWorker::spawn().expect("spawn worker");
        let result = worker.submit(skin_frame(30)).wait();
        assert_eq!(result, Some(45.0));
    }

    #[test]
    fn test_blank_frame_resolves_none() {
        let mut worker = DetectionWorker::spawn().expect("spawn worker");
        let result = worker.submit(PixelBuffer::blank(200, 200)).wait();
        assert_eq!(result, None);
    }

    #[test]
    fn test_sequential_submissions_keep_correlation() {
        let mut worker = DetectionWorker::spawn().expect("spawn worker");
        assert_eq!(worker.submit(skin_frame(30)).wait(), Some(45.0));
        assert_eq!(worker.submit(skin_frame(60)).wait(), Some(75.0));
    }

    #[test]
    fn test_abandoned_submission_reply_is_discarded() {
        let mut worker = DetectionWorker::spawn().expect("spawn worker");
        // Drop the pending handle without waiting; the reply goes stale.
        drop(worker.submit(skin_frame(30)));
        // The next submission must skip the stale reply and resolve its own.
        assert_eq!(worker.submit(skin_frame(90)).wait(), Some(105.0));
    }
}
