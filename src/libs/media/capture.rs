use crate::libs::core::models::AudioClip;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_AUDIO_MIME_TYPE: &str = "audio/webm";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Microphone access denied or unavailable.")]
    DeviceUnavailable,
    #[error("Already recording.")]
    AlreadyRecording,
    #[error("Not recording.")]
    NotRecording,
}

/// Platform audio input. `open` acquires the device, `next_chunk` yields whatever
/// data has been captured so far, `close` releases the device.
pub trait AudioSource {
    fn open(&mut self) -> Result<(), CaptureError>;
    fn next_chunk(&mut self) -> Option<Vec<u8>>;
    fn close(&mut self);
}

/// Source for hosts without a microphone. Every request is refused.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAudioSource;

impl AudioSource for NoAudioSource {
    fn open(&mut self) -> Result<(), CaptureError> {
        Err(CaptureError::DeviceUnavailable)
    }

    fn next_chunk(&mut self) -> Option<Vec<u8>> {
        None
    }

    fn close(&mut self) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
}

pub struct AudioRecorder<S: AudioSource> {
    source: S,
    state: RecorderState,
    chunks: Vec<Vec<u8>>,
    pending: Option<AudioClip>,
    mime_type: String,
}

impl<S: AudioSource> AudioRecorder<S> {
    pub fn new(source: S) -> Self {
        Self::with_mime_type(source, DEFAULT_AUDIO_MIME_TYPE)
    }

    pub fn with_mime_type(source: S, mime_type: impl Into<String>) -> Self {
        Self {
            source,
            state: RecorderState::Idle,
            chunks: Vec::new(),
            pending: None,
            mime_type: mime_type.into(),
        }
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    pub fn pending(&self) -> Option<&AudioClip> {
        self.pending.as_ref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn start(&mut self) -> Result<(), CaptureError> {
        if self.is_recording() {
            return Err(CaptureError::AlreadyRecording);
        }
        if let Err(err) = self.source.open() {
            warn!(error = %err, "audio capture request refused");
            return Err(err);
        }
        self.chunks.clear();
        self.state = RecorderState::Recording;
        info!("audio recording started");
        Ok(())
    }

    /// Pulls the chunks captured since the last call. Returns how many arrived.
    pub fn pump(&mut self) -> usize {
        if !self.is_recording() {
            return 0;
        }
        let mut received = 0;
        while let Some(chunk) = self.source.next_chunk() {
            self.chunks.push(chunk);
            received += 1;
        }
        if received > 0 {
            debug!(received, total = self.chunks.len(), "audio chunks buffered");
        }
        received
    }

    /// Finalizes the buffered chunks into the pending clip, replacing any earlier one.
    pub fn stop(&mut self) -> Result<&AudioClip, CaptureError> {
        if !self.is_recording() {
            return Err(CaptureError::NotRecording);
        }
        self.pump();
        self.source.close();
        self.state = RecorderState::Idle;

        let data: Vec<u8> = self.chunks.drain(..).flatten().collect();
        info!(bytes = data.len(), "audio recording finalized");
        Ok(self.pending.insert(AudioClip {
            mime_type: self.mime_type.clone(),
            data,
        }))
    }

    pub fn take_pending(&mut self) -> Option<AudioClip> {
        self.pending.take()
    }

    /// Drops the pending clip and abandons a running recording.
    pub fn discard(&mut self) {
        if self.is_recording() {
            self.source.close();
            self.state = RecorderState::Idle;
            debug!("audio recording abandoned");
        }
        self.chunks.clear();
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Scripted {
        chunks: VecDeque<Vec<u8>>,
        open: bool,
        closed: usize,
    }

    impl AudioSource for Scripted {
        fn open(&mut self) -> Result<(), CaptureError> {
            self.open = true;
            Ok(())
        }

        fn next_chunk(&mut self) -> Option<Vec<u8>> {
            self.chunks.pop_front()
        }

        fn close(&mut self) {
            self.open = false;
            self.closed += 1;
        }
    }

    #[test]
    fn stop_concatenates_chunks_in_order() {
        let mut recorder = AudioRecorder::new(Scripted::default());
        recorder.start().unwrap();
        recorder.source.chunks.push_back(vec![1, 2]);
        assert_eq!(recorder.pump(), 1);
        recorder.source.chunks.push_back(vec![3]);

        let clip = recorder.stop().unwrap().clone();

        assert_eq!(clip.data, vec![1, 2, 3]);
        assert_eq!(clip.mime_type, DEFAULT_AUDIO_MIME_TYPE);
        assert_eq!(recorder.state(), RecorderState::Idle);
        assert!(!recorder.source().open);
        assert_eq!(recorder.pending(), Some(&clip));
    }

    #[test]
    fn refused_device_leaves_recorder_idle() {
        let mut recorder = AudioRecorder::new(NoAudioSource);
        assert_eq!(recorder.start(), Err(CaptureError::DeviceUnavailable));
        assert_eq!(recorder.state(), RecorderState::Idle);
        assert_eq!(recorder.stop().err(), Some(CaptureError::NotRecording));
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut recorder = AudioRecorder::new(Scripted::default());
        recorder.start().unwrap();
        assert_eq!(recorder.start(), Err(CaptureError::AlreadyRecording));
    }

    #[test]
    fn next_recording_replaces_pending_clip() {
        let mut recorder = AudioRecorder::with_mime_type(Scripted::default(), "audio/ogg");
        recorder.start().unwrap();
        recorder.source.chunks.push_back(vec![9]);
        recorder.stop().unwrap();

        recorder.start().unwrap();
        recorder.source.chunks.push_back(vec![7, 7]);
        recorder.stop().unwrap();

        let clip = recorder.take_pending().unwrap();
        assert_eq!(clip.data, vec![7, 7]);
        assert_eq!(clip.mime_type, "audio/ogg");
        assert!(recorder.take_pending().is_none());
    }

    #[test]
    fn discard_releases_a_running_device() {
        let mut recorder = AudioRecorder::new(Scripted::default());
        recorder.start().unwrap();
        recorder.discard();
        assert!(!recorder.is_recording());
        assert_eq!(recorder.source().closed, 1);
        assert!(recorder.pending().is_none());
    }
}
