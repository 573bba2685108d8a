use crate::gui::{
    error_modal::ErrorModal,
    file_modal::FileModal,
    image_modal::ImageModal,
    pronunciation_modal::PronunciationModal,
    settings_modal::SettingsModal,
};

pub struct Modals {
    pub file: FileModal,
    pub error: ErrorModal,
    pub image: ImageModal,
    pub pronunciation: PronunciationModal,
    pub settings: SettingsModal,
}

impl Default for Modals {
    fn default() -> Self {
        Self {
            file: FileModal::new(),
            error: ErrorModal::new(),
            image: ImageModal::new(),
            pronunciation: PronunciationModal::new(),
            settings: SettingsModal::new(),
        }
    }
}
