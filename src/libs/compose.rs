use crate::libs::core::models::{MessageContent, OutgoingMessage};
use crate::libs::media::attachment::FilePicker;
use crate::libs::media::capture::{AudioRecorder, AudioSource, CaptureError};

/// Input area of a chat view: draft text, emoji picker, attachments and the voice recorder.
pub struct Composer<S: AudioSource> {
    draft: String,
    emoji_picker_open: bool,
    recorder: AudioRecorder<S>,
}

impl<S: AudioSource> Composer<S> {
    pub fn new(recorder: AudioRecorder<S>) -> Self {
        Self {
            draft: String::new(),
            emoji_picker_open: false,
            recorder,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn emoji_picker_open(&self) -> bool {
        self.emoji_picker_open
    }

    pub fn toggle_emoji_picker(&mut self) {
        self.emoji_picker_open = !self.emoji_picker_open;
    }

    pub fn insert_emoji(&mut self, emoji: &str) {
        self.draft.push_str(emoji);
        self.emoji_picker_open = false;
    }

    /// Trimmed draft as a message, or `None` when blank. The draft is kept until
    /// `clear_draft` so a rejected send does not lose it.
    pub fn text_message(&self) -> Option<OutgoingMessage> {
        let trimmed = self.draft.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(OutgoingMessage::text(trimmed))
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    pub fn attach(&mut self, picker: &mut impl FilePicker) -> Option<OutgoingMessage> {
        picker
            .pick()
            .map(|file| OutgoingMessage::new(MessageContent::File(file)))
    }

    pub fn recorder(&self) -> &AudioRecorder<S> {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut AudioRecorder<S> {
        &mut self.recorder
    }

    /// Mic button: starts when idle, stops when recording. Returns whether a recording is running.
    pub fn toggle_recording(&mut self) -> Result<bool, CaptureError> {
        if self.recorder.is_recording() {
            self.recorder.stop()?;
            Ok(false)
        } else {
            self.recorder.start()?;
            Ok(true)
        }
    }

    pub fn audio_message(&mut self) -> Option<OutgoingMessage> {
        self.recorder
            .take_pending()
            .map(|clip| OutgoingMessage::new(MessageContent::Audio(clip)))
    }

    /// Back to a blank input area, as on a fresh view.
    pub fn reset(&mut self) {
        self.draft.clear();
        self.emoji_picker_open = false;
        self.recorder.discard();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::core::models::FileAttachment;
    use crate::libs::media::capture::NoAudioSource;

    fn composer() -> Composer<NoAudioSource> {
        Composer::new(AudioRecorder::new(NoAudioSource))
    }

    #[test]
    fn blank_drafts_produce_nothing() {
        let mut composer = composer();
        assert!(composer.text_message().is_none());
        composer.set_draft("   \n");
        assert!(composer.text_message().is_none());
    }

    #[test]
    fn drafts_are_trimmed() {
        let mut composer = composer();
        composer.set_draft("  hello there ");
        assert_eq!(
            composer.text_message().map(|m| m.content),
            Some(MessageContent::text("hello there"))
        );
        assert_eq!(composer.draft(), "  hello there ");
        composer.clear_draft();
        assert_eq!(composer.draft(), "");
    }

    #[test]
    fn emoji_appends_and_closes_picker() {
        let mut composer = composer();
        composer.set_draft("hi ");
        composer.toggle_emoji_picker();
        assert!(composer.emoji_picker_open());
        composer.insert_emoji("😊");
        assert_eq!(composer.draft(), "hi 😊");
        assert!(!composer.emoji_picker_open());
    }

    #[test]
    fn cancelled_pick_is_a_no_op() {
        let mut composer = composer();
        let mut cancelled = || -> Option<FileAttachment> { None };
        assert!(composer.attach(&mut cancelled).is_none());

        let mut picked = || Some(FileAttachment::new("notes.txt", "text/plain", b"x".to_vec()));
        let message = composer.attach(&mut picked).unwrap();
        assert_eq!(message.content.kind(), "file");
    }

    #[test]
    fn microphone_refusal_surfaces_capture_error() {
        let mut composer = composer();
        assert_eq!(
            composer.toggle_recording(),
            Err(CaptureError::DeviceUnavailable)
        );
        assert!(composer.audio_message().is_none());
    }
}
