#![allow(dead_code)]

use gchat_lib::libs::core::confirmation::{Confirm, ConfirmationRequest, Decision};
use gchat_lib::libs::core::models::{ConversationKey, FileAttachment};
use gchat_lib::libs::media::attachment::FilePicker;
use gchat_lib::libs::media::capture::{AudioSource, CaptureError};
use gchat_lib::{ChatApp, ChatConfig};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Microphone fed by the test. Chunks pushed through the handle show up on the next pump.
#[derive(Clone, Default)]
pub struct ScriptedAudioSource {
    pub inner: Rc<RefCell<ScriptedAudioState>>,
}

#[derive(Default)]
pub struct ScriptedAudioState {
    pub deny: bool,
    pub open: bool,
    pub opened: usize,
    pub closed: usize,
    pub chunks: VecDeque<Vec<u8>>,
}

impl ScriptedAudioSource {
    pub fn denying() -> Self {
        let source = Self::default();
        source.inner.borrow_mut().deny = true;
        source
    }

    pub fn push(&self, chunk: &[u8]) {
        self.inner.borrow_mut().chunks.push_back(chunk.to_vec());
    }

    pub fn is_open(&self) -> bool {
        self.inner.borrow().open
    }
}

impl AudioSource for ScriptedAudioSource {
    fn open(&mut self) -> Result<(), CaptureError> {
        let mut state = self.inner.borrow_mut();
        if state.deny {
            return Err(CaptureError::DeviceUnavailable);
        }
        state.open = true;
        state.opened += 1;
        Ok(())
    }

    fn next_chunk(&mut self) -> Option<Vec<u8>> {
        self.inner.borrow_mut().chunks.pop_front()
    }

    fn close(&mut self) {
        let mut state = self.inner.borrow_mut();
        state.open = false;
        state.closed += 1;
    }
}

pub struct FixedFilePicker(pub Option<FileAttachment>);

impl FilePicker for FixedFilePicker {
    fn pick(&mut self) -> Option<FileAttachment> {
        self.0.take()
    }
}

/// Answers every prompt with the same decision and remembers what was asked.
pub struct ScriptedConfirm {
    pub decision: Decision,
    pub prompts: Vec<String>,
}

impl ScriptedConfirm {
    pub fn accepting() -> Self {
        Self {
            decision: Decision::Confirm,
            prompts: Vec::new(),
        }
    }

    pub fn declining() -> Self {
        Self {
            decision: Decision::Cancel,
            prompts: Vec::new(),
        }
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, request: &ConfirmationRequest) -> Decision {
        self.prompts.push(request.prompt.clone());
        self.decision
    }
}

pub type TestApp = ChatApp<ScriptedAudioSource>;

pub fn sample_app() -> (TestApp, ScriptedAudioSource) {
    let source = ScriptedAudioSource::default();
    let app = ChatApp::new(ChatConfig::default(), source.clone()).expect("sample config is valid");
    (app, source)
}

pub fn key_of(app: &TestApp, name: &str) -> ConversationKey {
    app.directory()
        .find_by_name(name)
        .unwrap_or_else(|| panic!("{} should be in the directory", name))
        .key()
}

pub fn member_names(app: &TestApp, group: &str) -> Vec<String> {
    let key = key_of(app, group);
    app.directory()
        .group(&key)
        .expect("group exists")
        .members()
        .to_vec()
}
