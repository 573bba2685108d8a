use crate::{
    api::Pronunciation,
    core::{
        availability::ServerStatus,
        loader::DeckLoadResult,
        Directory,
        QuizError,
    },
};

#[derive(Debug)]
pub enum TaskResult {
    /// `deck_load` is the generation of the deck load that reported it, if any.
    ServerStatus { deck_load: Option<u64>, status: ServerStatus },
    KeepAlive(Result<(), String>),

    FileList { directory: Directory, result: Result<Vec<String>, QuizError> },
    Upload { file_name: String, result: Result<(), QuizError> },

    DeckLoaded(DeckLoadResult),
    Pronunciation { scientific_name: String, result: Result<Pronunciation, QuizError> },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::ServerStatus { .. } => "server_status",
            TaskResult::KeepAlive(_) => "keep_alive",
            TaskResult::FileList { .. } => "file_list",
            TaskResult::Upload { .. } => "upload",
            TaskResult::DeckLoaded(_) => "deck_loaded",
            TaskResult::Pronunciation { .. } => "pronunciation",
        }
    }
}
