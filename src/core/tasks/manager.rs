use std::{
    path::PathBuf,
    sync::{
        mpsc,
        Arc,
    },
};

use eframe::egui;
use tokio::runtime::Runtime;

use super::TaskResult;
use crate::{
    api::FlashcardApi,
    core::{
        availability::{
            AvailabilityMonitor,
            ServerStatus,
        },
        loader::{
            fetch_deck,
            DeckRequest,
        },
        Directory,
        QuizError,
    },
};

/// Runs backend calls on a tokio runtime and queues their results for the UI
/// thread, which drains them once per frame. Nothing here touches session state.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    api: Arc<dyn FlashcardApi>,
    repaint: Option<egui::Context>,
}

type TaskContext =
    (mpsc::Sender<TaskResult>, Arc<Runtime>, Arc<dyn FlashcardApi>, Option<egui::Context>);

fn send(sender: &mpsc::Sender<TaskResult>, repaint: &Option<egui::Context>, result: TaskResult) {
    let task_type = result.task_type();
    if sender.send(result).is_err() {
        log::debug!("Dropped {} result, receiver is gone", task_type);
    }
    if let Some(ctx) = repaint {
        ctx.request_repaint();
    }
}

fn status_reporter(
    sender: mpsc::Sender<TaskResult>,
    repaint: Option<egui::Context>,
    deck_load: Option<u64>,
) -> impl FnMut(ServerStatus) + Send {
    move |status| send(&sender, &repaint, TaskResult::ServerStatus { deck_load, status })
}

impl TaskManager {
    pub fn new(api: Arc<dyn FlashcardApi>) -> Result<Self, QuizError> {
        let runtime = Arc::new(Runtime::new()?);

        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, receiver, sender, api, repaint: None })
    }

    /// Wakes the UI whenever a result is queued.
    pub fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    pub fn set_api(&mut self, api: Arc<dyn FlashcardApi>) {
        self.api = api;
    }

    pub fn api(&self) -> &Arc<dyn FlashcardApi> {
        &self.api
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> TaskContext {
        (self.sender.clone(), self.runtime.clone(), self.api.clone(), self.repaint.clone())
    }

    /// Fire-and-forget ping that keeps a sleeping backend from idling out.
    pub fn keep_alive(&self) {
        let (sender, runtime, api, repaint) = self.task_context();

        runtime.spawn(async move {
            let result = api.wakeup().await.map_err(|e| e.to_string());
            match &result {
                Ok(()) => log::info!("Server wakeup call successful"),
                Err(e) => log::warn!("Error calling /wakeup: {}", e),
            }
            send(&sender, &repaint, TaskResult::KeepAlive(result));
        });
    }

    pub fn list_files(&self, directory: Directory, monitor: Option<AvailabilityMonitor>) {
        let (sender, runtime, api, repaint) = self.task_context();

        runtime.spawn(async move {
            let result = async {
                if let Some(monitor) = monitor {
                    let reporter = status_reporter(sender.clone(), repaint.clone(), None);
                    monitor.ensure_available(api.as_ref(), reporter).await?;
                }
                api.list_files(directory).await
            }
            .await;

            send(&sender, &repaint, TaskResult::FileList { directory, result });
        });
    }

    pub fn upload_csv(&self, path: PathBuf, directory: Directory) {
        let (sender, runtime, api, repaint) = self.task_context();

        runtime.spawn(async move {
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("upload.csv")
                .to_string();

            log::info!("Uploading {} to {}", path.display(), directory.as_str());
            let result = async {
                let contents = tokio::fs::read(&path).await?;
                api.upload_csv(file_name.clone(), contents, directory).await
            }
            .await;

            send(&sender, &repaint, TaskResult::Upload { file_name, result });
        });
    }

    pub fn load_deck(&self, request: DeckRequest, monitor: Option<AvailabilityMonitor>) {
        let (sender, runtime, api, repaint) = self.task_context();

        runtime.spawn(async move {
            log::info!(
                "Loading deck #{}: {}/{}",
                request.generation,
                request.directory.as_str(),
                request.filename
            );
            let reporter = status_reporter(sender.clone(), repaint.clone(), Some(request.generation));
            let loaded = fetch_deck(api.as_ref(), monitor, request, reporter).await;

            send(&sender, &repaint, TaskResult::DeckLoaded(loaded));
        });
    }

    pub fn fetch_pronunciation(&self, scientific_name: String, monitor: Option<AvailabilityMonitor>) {
        let (sender, runtime, api, repaint) = self.task_context();

        runtime.spawn(async move {
            let result = async {
                if let Some(monitor) = monitor {
                    let reporter = status_reporter(sender.clone(), repaint.clone(), None);
                    monitor.ensure_available(api.as_ref(), reporter).await?;
                }
                api.pronounce_name(&scientific_name).await
            }
            .await;

            send(&sender, &repaint, TaskResult::Pronunciation { scientific_name, result });
        });
    }
}
