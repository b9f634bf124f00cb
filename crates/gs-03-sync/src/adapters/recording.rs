//! Queueing channel adapters.
//!
//! Frames are held until the owner drains them. The loopback transport is
//! built on these, and tests use them to inspect exactly what was sent.

use parking_lot::Mutex;
use serde::de::DeserializeOwned;

use crate::errors::SyncResult;
use crate::ipc::codec;
use crate::ports::{ClientChannel, ServerChannel};

/// Where a server frame is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    One(String),
    All,
}

/// One frame sent by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub target: Target,
    pub frame: Vec<u8>,
}

impl Delivery {
    /// Decode the frame; `None` if it does not decode.
    pub fn decode<T: DeserializeOwned>(&self, version: u16) -> Option<T> {
        codec::decode(&self.frame, version).ok()
    }
}

/// Server-side channel that queues every delivery in send order.
#[derive(Debug, Default)]
pub struct QueuedClientChannel {
    deliveries: Mutex<Vec<Delivery>>,
}

impl QueuedClientChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything sent so far.
    pub fn take(&self) -> Vec<Delivery> {
        std::mem::take(&mut *self.deliveries.lock())
    }

    pub fn len(&self) -> usize {
        self.deliveries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.lock().is_empty()
    }
}

impl ClientChannel for QueuedClientChannel {
    fn send_to(&self, guid: &str, frame: Vec<u8>) -> SyncResult<()> {
        self.deliveries.lock().push(Delivery {
            target: Target::One(guid.to_string()),
            frame,
        });
        Ok(())
    }

    fn broadcast(&self, frame: Vec<u8>) -> SyncResult<()> {
        self.deliveries.lock().push(Delivery {
            target: Target::All,
            frame,
        });
        Ok(())
    }
}

/// Client-side channel that queues frames bound for the server.
#[derive(Debug, Default)]
pub struct QueuedServerChannel {
    frames: Mutex<Vec<Vec<u8>>>,
}

impl QueuedServerChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Vec<u8>> {
        std::mem::take(&mut *self.frames.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.frames.lock().is_empty()
    }
}

impl ServerChannel for QueuedServerChannel {
    fn send(&self, frame: Vec<u8>) -> SyncResult<()> {
        self.frames.lock().push(frame);
        Ok(())
    }
}
