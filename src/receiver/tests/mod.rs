use std::sync::Mutex;

use super::AudioSink;

mod sequence_tracker;
mod transport;
mod udp_receiver;

/// Sink that remembers everything it was given
#[derive(Default)]
pub(super) struct RecordingSink {
    pub audio: Mutex<Vec<(u16, Vec<u8>)>>,
    pub chunks: Mutex<Vec<Vec<u8>>>,
}

impl RecordingSink {
    pub fn audio(&self) -> Vec<(u16, Vec<u8>)> {
        self.audio.lock().unwrap().clone()
    }

    pub fn chunks(&self) -> Vec<Vec<u8>> {
        self.chunks.lock().unwrap().clone()
    }
}

impl AudioSink for RecordingSink {
    fn submit_audio(&self, sequence: u16, payload: &[u8]) {
        self.audio.lock().unwrap().push((sequence, payload.to_vec()));
    }

    fn submit_stream_chunk(&self, payload: &[u8]) {
        self.chunks.lock().unwrap().push(payload.to_vec());
    }
}
