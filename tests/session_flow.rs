use std::{
    collections::HashMap,
    sync::{
        atomic::{
            AtomicU32,
            Ordering,
        },
        Arc,
        Mutex,
    },
    time::{
        Duration,
        Instant,
    },
};

use async_trait::async_trait;
use taxacards::{
    api::{
        FlashcardApi,
        Pronunciation,
    },
    core::{
        availability::{
            AvailabilityMonitor,
            RetryPolicy,
            ServerStatus,
        },
        game::{
            Grade,
            Phase,
        },
        loader::{
            fetch_deck,
            DeckLoader,
            LoadOutcome,
        },
        tasks::{
            TaskManager,
            TaskResult,
        },
        Card,
        Directory,
        QuizError,
        QuizSession,
    },
};

/// In-memory backend whose first `cold_probes` wakeups fail.
struct FakeBackend {
    decks: Mutex<HashMap<(Directory, String), Vec<Card>>>,
    cold_probes: u32,
    probes: AtomicU32,
}

impl FakeBackend {
    fn new(cold_probes: u32) -> Self {
        let mut decks = HashMap::new();
        decks.insert(
            (Directory::MmaForays, "autumn-foray.csv".to_string()),
            vec![
                Card::new("Amanita muscaria", "https://img/amanita.jpg")
                    .with_common_name("Fly Agaric")
                    .with_taxa_url("https://www.inaturalist.org/taxa/48715"),
                Card::new("Boletus edulis", "https://img/boletus.jpg"),
            ],
        );
        decks.insert((Directory::Uploads, "empty.csv".to_string()), vec![]);

        Self { decks: Mutex::new(decks), cold_probes, probes: AtomicU32::new(0) }
    }
}

#[async_trait]
impl FlashcardApi for FakeBackend {
    async fn wakeup(&self) -> Result<(), QuizError> {
        let n = self.probes.fetch_add(1, Ordering::SeqCst);
        if n < self.cold_probes {
            Err(QuizError::Http { status: 503, url: "http://fake/wakeup".to_string() })
        } else {
            Ok(())
        }
    }

    async fn list_files(&self, directory: Directory) -> Result<Vec<String>, QuizError> {
        let decks = self.decks.lock().unwrap();
        let mut files: Vec<String> =
            decks.keys().filter(|(dir, _)| *dir == directory).map(|(_, name)| name.clone()).collect();
        files.sort();
        Ok(files)
    }

    async fn upload_csv(
        &self,
        file_name: String,
        _contents: Vec<u8>,
        directory: Directory,
    ) -> Result<(), QuizError> {
        self.decks.lock().unwrap().insert((directory, file_name), vec![]);
        Ok(())
    }

    async fn load_cards(&self, filename: &str, directory: Directory) -> Result<Vec<Card>, QuizError> {
        self.decks
            .lock()
            .unwrap()
            .get(&(directory, filename.to_string()))
            .cloned()
            .ok_or_else(|| QuizError::Http { status: 404, url: filename.to_string() })
    }

    async fn pronounce_name(&self, scientific_name: &str) -> Result<Pronunciation, QuizError> {
        Ok(Pronunciation::from_text(format!("{{\"name\": \"{}\"}}", scientific_name)))
    }

    fn image_url(&self, url: &str) -> String {
        format!("http://fake/get_image?url={}", url)
    }
}

#[tokio::test]
async fn test_loaded_deck_can_be_played_through() {
    let api = FakeBackend::new(0);
    let mut loader = DeckLoader::new();
    let mut session = QuizSession::new(3);

    let request = loader.begin("autumn-foray.csv", Directory::MmaForays);
    let load = fetch_deck(&api, None, request, |_| {}).await;

    match loader.apply(&mut session, load) {
        LoadOutcome::Applied { name, cards } => {
            assert_eq!(name, "autumn-foray");
            assert_eq!(cards, 2);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(session.hints(), ["Amanita muscaria", "Boletus edulis"]);

    let first = session.current_card().unwrap().scientific_name.clone();
    assert_eq!(session.submit_answer(&format!("  {}  ", first.to_uppercase())), Grade::Correct);
    assert!(session.game().pronounce_enabled());

    session.next_card().unwrap();
    assert_eq!(session.game().attempts(), 0);
    assert!(session.game().feedback().is_empty());

    assert_eq!(session.submit_answer("Russula"), Grade::IncorrectRetry);
    assert_eq!(session.submit_answer("Russula"), Grade::IncorrectRetry);
    assert_eq!(session.submit_answer("Russula"), Grade::IncorrectFinal);
    assert_eq!(session.game().phase(), Phase::IncorrectFinal);

    let second = session.current_card().unwrap().scientific_name.clone();
    assert_ne!(first, second);
    assert!(session.game().feedback().text().contains(&second));
}

#[tokio::test(start_paused = true)]
async fn test_deck_load_waits_for_warming_server() {
    let api = FakeBackend::new(2);
    let mut loader = DeckLoader::new();
    let mut statuses = Vec::new();

    let request = loader.begin("autumn-foray.csv", Directory::MmaForays);
    let monitor = AvailabilityMonitor::new(RetryPolicy::default());
    let load = fetch_deck(&api, Some(monitor), request, |s| statuses.push(s)).await;

    assert!(load.result.is_ok());
    assert_eq!(
        statuses,
        vec![
            ServerStatus::Checking,
            ServerStatus::WarmingUp { attempt: 1, max_attempts: 5 },
            ServerStatus::WarmingUp { attempt: 2, max_attempts: 5 },
            ServerStatus::Available,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_offline_server_leaves_session_untouched() {
    let api = FakeBackend::new(u32::MAX);
    let mut loader = DeckLoader::new();
    let mut session = QuizSession::new(3);
    session.replace_deck(&[Card::new("Trametes versicolor", "https://img/t.jpg")], "local").unwrap();

    let request = loader.begin("autumn-foray.csv", Directory::MmaForays);
    let monitor = AvailabilityMonitor::new(RetryPolicy::default());
    let load = fetch_deck(&api, Some(monitor), request, |_| {}).await;

    match loader.apply(&mut session, load) {
        LoadOutcome::Failed(QuizError::NetworkUnavailable { attempts }) => assert_eq!(attempts, 5),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(session.deck_name(), "local");
    assert_eq!(session.current_card().unwrap().scientific_name, "Trametes versicolor");
}

#[tokio::test]
async fn test_empty_deck_is_rejected() {
    let api = FakeBackend::new(0);
    let mut loader = DeckLoader::new();
    let mut session = QuizSession::new(3);

    let request = loader.begin("empty.csv", Directory::Uploads);
    let load = fetch_deck(&api, None, request, |_| {}).await;

    assert!(matches!(loader.apply(&mut session, load), LoadOutcome::Failed(QuizError::EmptyDeck)));
    assert!(session.current_card().is_none());
}

fn wait_for<F>(manager: &mut TaskManager, mut matches: F) -> TaskResult
where
    F: FnMut(&TaskResult) -> bool,
{
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if let Some(result) = manager.poll_results().into_iter().find(|r| matches(r)) {
            return result;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("timed out waiting for task result");
}

#[test]
fn test_task_manager_delivers_results_to_ui_thread() {
    let mut manager = TaskManager::new(Arc::new(FakeBackend::new(0))).unwrap();

    manager.list_files(Directory::MmaForays, None);
    match wait_for(&mut manager, |r| matches!(r, TaskResult::FileList { .. })) {
        TaskResult::FileList { directory, result } => {
            assert_eq!(directory, Directory::MmaForays);
            assert_eq!(result.unwrap(), vec!["autumn-foray.csv"]);
        }
        _ => unreachable!(),
    }

    manager.fetch_pronunciation("Boletus edulis".to_string(), None);
    match wait_for(&mut manager, |r| matches!(r, TaskResult::Pronunciation { .. })) {
        TaskResult::Pronunciation { scientific_name, result } => {
            assert_eq!(scientific_name, "Boletus edulis");
            assert!(result.unwrap().display_text().contains("Boletus edulis"));
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_task_manager_reports_warmup_progress() {
    let policy = RetryPolicy { max_attempts: 3, delay_secs: 0 };
    let mut manager = TaskManager::new(Arc::new(FakeBackend::new(1))).unwrap();

    manager.list_files(Directory::Uploads, Some(AvailabilityMonitor::new(policy)));

    let mut statuses = Vec::new();
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut listed = None;
    while listed.is_none() && Instant::now() < deadline {
        for result in manager.poll_results() {
            match result {
                TaskResult::ServerStatus { deck_load, status } => {
                    assert_eq!(deck_load, None);
                    statuses.push(status);
                }
                TaskResult::FileList { result, .. } => listed = Some(result),
                _ => {}
            }
        }
        std::thread::sleep(Duration::from_millis(10));
    }

    assert_eq!(listed.unwrap().unwrap(), vec!["empty.csv"]);
    assert_eq!(statuses.first(), Some(&ServerStatus::Checking));
    assert_eq!(statuses.last(), Some(&ServerStatus::Available));
    assert!(statuses.iter().any(|s| s.is_warming_up()));
}
