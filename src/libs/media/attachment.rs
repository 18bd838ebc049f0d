use crate::libs::core::models::FileAttachment;

/// Local file selection dialog. `None` means the user dismissed it.
pub trait FilePicker {
    fn pick(&mut self) -> Option<FileAttachment>;
}

impl<F> FilePicker for F
where
    F: FnMut() -> Option<FileAttachment>,
{
    fn pick(&mut self) -> Option<FileAttachment> {
        self()
    }
}
