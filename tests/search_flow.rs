//! End-to-end flows through the public API: engine scenarios, the event loop
//! against a live worker thread, preference persistence, and rendered frames.

use std::time::Duration;

use vcfinder::app::{Action, AppState, Event, Focus, SuggestionCursor};
use vcfinder::domain::{Corpus, Firm};
use vcfinder::engine::{search, suggest};
use vcfinder::preferences::THEME_KEY;
use vcfinder::storage::{JsonPreferences, PreferenceStore};
use vcfinder::worker::{InMemoryBackend, SearchWorker, WorkerHandle, WorkerResponse};
use vcfinder::{handle_event, Config, ThemeMode, ThemePreference};

const RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);

fn sample(id: &str, industries: &[&str]) -> Firm {
    Firm {
        id: id.to_string(),
        name: format!("Firm {id}"),
        industries: industries.iter().map(|s| (*s).to_string()).collect(),
        website: format!("https://firm{id}.example.com"),
        email: format!("deals@firm{id}.example.com"),
        email_validated: true,
        last_validated: "2025-01-15".to_string(),
        country: "United States".to_string(),
        description: "Early-stage investor.".to_string(),
        founded: "2010".to_string(),
        aum: "$500M".to_string(),
    }
}

fn two_firm_corpus() -> Corpus {
    Corpus::new(vec![sample("1", &["fintech", "SaaS"]), sample("2", &["healthcare"])])
}

fn ids(firms: &[Firm]) -> Vec<&str> {
    firms.iter().map(|f| f.id.as_str()).collect()
}

fn spawn_worker(corpus: Corpus, store: Option<Box<dyn PreferenceStore>>) -> WorkerHandle {
    SearchWorker::new(Box::new(InMemoryBackend::new(corpus, Duration::ZERO)), store)
        .spawn()
        .unwrap()
}

/// Sends every `PostToWorker` action and feeds the responses back in.
fn run_actions(state: &mut AppState, worker: &WorkerHandle, actions: Vec<Action>) {
    for action in actions {
        if let Action::PostToWorker(message) = action {
            worker.post(message).unwrap();
            let response = worker.recv_timeout(RESPONSE_TIMEOUT).unwrap().expect("worker response");
            let (_, follow_up) = handle_event(state, &Event::WorkerResponse(response)).unwrap();
            assert!(follow_up.is_empty());
        }
    }
}

fn type_query(state: &mut AppState, query: &str) {
    for c in query.chars() {
        handle_event(state, &Event::Char(c)).unwrap();
    }
}

#[test]
fn search_matches_tags_case_insensitively_in_corpus_order() {
    let corpus = Corpus::new(vec![
        sample("a", &["Consumer"]),
        sample("b", &["healthcare"]),
        sample("c", &["consumer", "SaaS"]),
    ]);

    assert_eq!(ids(&search("CONSUMER", &corpus)), vec!["a", "c"]);
    assert_eq!(search("sume", &corpus), search("sume", &corpus));
}

#[test]
fn two_firm_scenario() {
    let corpus = two_firm_corpus();
    assert_eq!(ids(&search("fin", &corpus)), vec!["1"]);
    assert!(search("xyz", &corpus).is_empty());
}

#[test]
fn suggestions_are_sorted_and_capped() {
    let corpus = Corpus::new(vec![sample("1", &["fintech", "FinOps", "healthcare"])]);
    assert_eq!(suggest("fin", &corpus), vec!["FinOps", "fintech"]);
    assert!(suggest("", &corpus).is_empty());

    let many: Vec<String> = (0..12).map(|i| format!("tag{i:02}")).collect();
    let refs: Vec<&str> = many.iter().map(String::as_str).collect();
    let wide = Corpus::new(vec![sample("1", &refs)]);
    let suggestions = suggest("TAG", &wide);
    assert_eq!(suggestions.len(), 8);
    assert_eq!(suggestions.first().map(String::as_str), Some("tag00"));
    assert_eq!(suggestions.last().map(String::as_str), Some("tag07"));
}

#[test]
fn typing_confirming_and_receiving_results() {
    let corpus = two_firm_corpus();
    let worker = spawn_worker(corpus.clone(), None);
    let mut state = AppState::new(corpus, ThemePreference::default());

    type_query(&mut state, "fin");
    assert!(state.suggestions_visible());
    assert_eq!(state.suggestions, vec!["fintech"]);

    let (_, actions) = handle_event(&mut state, &Event::Confirm).unwrap();
    assert!(state.is_loading);
    assert!(!state.suggestions_visible());

    run_actions(&mut state, &worker, actions);
    assert!(!state.is_loading);
    assert!(state.has_searched);
    assert_eq!(ids(&state.results), vec!["1"]);

    worker.shutdown();
}

#[test]
fn navigating_suggestions_wraps_and_confirm_uses_selection() {
    let corpus = Corpus::new(vec![
        sample("1", &["fintech"]),
        sample("2", &["FinOps"]),
        sample("3", &["finance"]),
    ]);
    let worker = spawn_worker(corpus.clone(), None);
    let mut state = AppState::new(corpus, ThemePreference::default());

    type_query(&mut state, "fin");
    assert_eq!(state.suggestions.len(), 3);

    let mut visited = Vec::new();
    for _ in 0..4 {
        handle_event(&mut state, &Event::SuggestionNext).unwrap();
        visited.push(state.suggestion_cursor);
    }
    assert_eq!(
        visited,
        vec![
            SuggestionCursor::Selected(0),
            SuggestionCursor::Selected(1),
            SuggestionCursor::Selected(2),
            SuggestionCursor::Selected(0),
        ]
    );

    // Sorted universe: "FinOps", "finance", "fintech".
    handle_event(&mut state, &Event::SuggestionNext).unwrap();
    let (_, actions) = handle_event(&mut state, &Event::Confirm).unwrap();
    assert_eq!(state.query, "finance");

    run_actions(&mut state, &worker, actions);
    assert_eq!(ids(&state.results), vec!["3"]);

    worker.shutdown();
}

#[test]
fn no_results_is_a_settled_state() {
    let corpus = two_firm_corpus();
    let worker = spawn_worker(corpus.clone(), None);
    let mut state = AppState::new(corpus, ThemePreference::default());

    type_query(&mut state, "xyz");
    let (_, actions) = handle_event(&mut state, &Event::Confirm).unwrap();
    run_actions(&mut state, &worker, actions);

    assert!(state.has_searched);
    assert!(state.results.is_empty());
    assert!(vcfinder::ui::render(&state, 30, 100).contains("No VCs found for \"xyz\""));

    worker.shutdown();
}

#[test]
fn clearing_after_search_returns_to_pre_search() {
    let corpus = two_firm_corpus();
    let worker = spawn_worker(corpus.clone(), None);
    let mut state = AppState::new(corpus, ThemePreference::default());

    type_query(&mut state, "health");
    let (_, actions) = handle_event(&mut state, &Event::Confirm).unwrap();
    run_actions(&mut state, &worker, actions);
    assert_eq!(ids(&state.results), vec!["2"]);

    let (_, actions) = handle_event(&mut state, &Event::ClearQuery).unwrap();
    assert!(actions.is_empty());
    assert!(!state.has_searched);
    assert!(!state.is_loading);
    assert!(state.results.is_empty());
    assert!(vcfinder::ui::render(&state, 30, 100).contains("Ready to find your perfect VC match?"));

    worker.shutdown();
}

#[test]
fn clearing_during_search_discards_the_late_result() {
    let corpus = two_firm_corpus();
    let worker = spawn_worker(corpus.clone(), None);
    let mut state = AppState::new(corpus, ThemePreference::default());

    type_query(&mut state, "fin");
    let (_, actions) = handle_event(&mut state, &Event::Confirm).unwrap();
    handle_event(&mut state, &Event::ClearQuery).unwrap();

    for action in actions {
        if let Action::PostToWorker(message) = action {
            worker.post(message).unwrap();
        }
    }
    let response = worker.recv_timeout(RESPONSE_TIMEOUT).unwrap().expect("worker response");
    assert!(matches!(response, WorkerResponse::SearchCompleted { .. }));

    let (render, _) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
    assert!(!render);
    assert!(!state.has_searched);
    assert!(state.results.is_empty());

    worker.shutdown();
}

#[test]
fn popular_industry_runs_a_search_and_cards_render() {
    let corpus = Corpus::new(vec![sample("1", &["fintech"]), sample("2", &["SaaS", "AI"])]);
    let worker = spawn_worker(corpus.clone(), None);
    let mut state = AppState::new(corpus, ThemePreference::default());

    handle_event(&mut state, &Event::FocusResults).unwrap();
    // Third popular choice is "SaaS".
    let (_, actions) = handle_event(&mut state, &Event::PickPopular(2)).unwrap();
    assert_eq!(state.query, "SaaS");
    run_actions(&mut state, &worker, actions);
    assert_eq!(ids(&state.results), vec!["2"]);
    assert_eq!(state.focus, Focus::Browsing);

    let frame = vcfinder::ui::render(&state, 30, 100);
    assert!(frame.contains("1 Venture Capital Firm found for \"SaaS\""));
    assert!(frame.contains("deals@firm2.example.com"));
    assert!(frame.contains("Verified Email"));

    worker.shutdown();
}

#[test]
fn theme_toggle_is_persisted_by_the_worker() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    let config = Config {
        data_dir: Some(dir.path().to_path_buf()),
        ..Config::default()
    };
    assert_eq!(config.preferences_path(), path);

    let store = JsonPreferences::new(path.clone()).unwrap();
    let mut state = vcfinder::initialize(&config, &store).unwrap();
    assert_eq!(state.theme.mode(), ThemeMode::Light);

    let worker = spawn_worker(state.corpus.clone(), Some(Box::new(store)));
    let (_, actions) = handle_event(&mut state, &Event::ToggleTheme).unwrap();
    assert_eq!(state.theme.mode(), ThemeMode::Dark);
    run_actions(&mut state, &worker, actions);
    worker.shutdown();

    let reopened = JsonPreferences::new(path).unwrap();
    assert_eq!(reopened.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    assert_eq!(vcfinder::initialize(&config, &reopened).unwrap().theme.mode(), ThemeMode::Dark);
}

#[test]
fn embedded_corpus_is_well_formed() {
    let corpus = Corpus::embedded().unwrap();
    assert!(!corpus.is_empty());

    let mut seen = std::collections::HashSet::new();
    for firm in corpus.firms() {
        assert!(seen.insert(firm.id.as_str()), "duplicate firm id {}", firm.id);
        assert!(!firm.industries.is_empty(), "firm {} has no industries", firm.id);
    }
    assert!(!search("fintech", &corpus).is_empty());
}
