// tests/quiz_tests.rs

use std::sync::{Arc, Mutex};
use std::time::Duration;

use fanportal::models::question::Question;
use fanportal::quiz::{
    QuizEngine, QuizError, QuizSession, QuizState, SessionRegistry, SubmitOutcome,
    TRIVIA_QUESTIONS, Verdict,
};
use fanportal::utils::sound::{FeedbackSink, SoundEffect};

/// Records every signal so tests can assert on them.
#[derive(Default)]
struct RecordingSink {
    effects: Mutex<Vec<SoundEffect>>,
}

impl RecordingSink {
    fn effects(&self) -> Vec<SoundEffect> {
        self.effects.lock().unwrap().clone()
    }
}

impl FeedbackSink for RecordingSink {
    fn emit(&self, effect: SoundEffect) {
        self.effects.lock().unwrap().push(effect);
    }
}

static TWO_QUESTIONS: [Question; 2] = [
    Question::new("First?", ["a", "b", "c", "d"], 0),
    Question::new("Second?", ["a", "b", "c", "d"], 3),
];

fn engine() -> (QuizEngine, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let engine = QuizEngine::new(&TRIVIA_QUESTIONS, sink.clone()).unwrap();
    (engine, sink)
}

/// Answers the current question and immediately applies the advance.
fn answer_and_advance(engine: &mut QuizEngine, choice: usize) -> bool {
    match engine.submit(choice).unwrap() {
        SubmitOutcome::Answered { correct, ticket } => {
            assert!(engine.advance(ticket));
            correct
        }
        SubmitOutcome::Ignored => panic!("answer was ignored"),
    }
}

fn wrong_choice(question: &Question) -> usize {
    (question.correct_index + 1) % question.options.len()
}

#[test]
fn new_engine_starts_at_first_question() {
    let (engine, sink) = engine();

    assert_eq!(engine.state(), QuizState::INITIAL);
    assert_eq!(engine.total(), 10);
    assert_eq!(engine.current_question(), Some(&TRIVIA_QUESTIONS[0]));
    assert_eq!(sink.effects(), vec![SoundEffect::Start]);
}

#[test]
fn empty_bank_is_rejected() {
    static EMPTY: [Question; 0] = [];
    let result = QuizEngine::new(&EMPTY, Arc::new(RecordingSink::default()));

    assert_eq!(result.unwrap_err(), QuizError::EmptyQuestionBank);
}

#[test]
fn nine_correct_then_one_wrong_finishes_with_nine() {
    let (mut engine, sink) = engine();

    for question in &TRIVIA_QUESTIONS[..9] {
        assert!(answer_and_advance(&mut engine, question.correct_index));
    }
    let last = &TRIVIA_QUESTIONS[9];
    assert!(!answer_and_advance(&mut engine, wrong_choice(last)));

    assert_eq!(engine.state(), QuizState::Finished { score: 9 });
    assert_eq!(engine.current_question(), None);

    let effects = sink.effects();
    assert_eq!(effects.first(), Some(&SoundEffect::Start));
    assert_eq!(effects.iter().filter(|e| **e == SoundEffect::Correct).count(), 9);
    assert_eq!(effects.iter().filter(|e| **e == SoundEffect::Incorrect).count(), 1);
    assert_eq!(effects.last(), Some(&SoundEffect::End));

    let snapshot = engine.snapshot();
    assert!(snapshot.finished);
    assert_eq!(snapshot.current_index, 10);
    assert_eq!(snapshot.verdict, Some(Verdict::Roadie));
}

#[test]
fn second_submit_on_same_question_is_ignored() {
    let (mut engine, sink) = engine();
    let correct = TRIVIA_QUESTIONS[0].correct_index;

    let first = engine.submit(wrong_choice(&TRIVIA_QUESTIONS[0])).unwrap();
    assert!(matches!(first, SubmitOutcome::Answered { correct: false, .. }));
    let before = engine.state();

    // Even the right answer does not count the second time.
    assert_eq!(engine.submit(correct).unwrap(), SubmitOutcome::Ignored);
    assert_eq!(engine.state(), before);
    assert_eq!(sink.effects(), vec![SoundEffect::Start, SoundEffect::Incorrect]);
}

#[test]
fn out_of_range_choice_is_an_error_and_changes_nothing() {
    let (mut engine, _) = engine();

    let err = engine.submit(4).unwrap_err();

    assert_eq!(
        err,
        QuizError::ChoiceOutOfRange {
            choice: 4,
            option_count: 4
        }
    );
    assert_eq!(engine.state(), QuizState::INITIAL);
}

#[test]
fn submit_after_finish_is_ignored() {
    static ONE: [Question; 1] = [Question::new("Only?", ["a", "b", "c", "d"], 2)];
    let mut engine = QuizEngine::new(&ONE, Arc::new(RecordingSink::default())).unwrap();

    answer_and_advance(&mut engine, 2);
    assert_eq!(engine.state(), QuizState::Finished { score: 1 });

    assert_eq!(engine.submit(2).unwrap(), SubmitOutcome::Ignored);
    assert_eq!(engine.state(), QuizState::Finished { score: 1 });
}

#[test]
fn score_counts_only_correct_answers() {
    let (mut engine, _) = engine();
    let mut expected = 0;

    for (i, question) in TRIVIA_QUESTIONS.iter().enumerate() {
        let choice = if i % 3 == 0 {
            expected += 1;
            question.correct_index
        } else {
            wrong_choice(question)
        };
        answer_and_advance(&mut engine, choice);

        let score = engine.snapshot().score;
        assert!(score <= engine.total());
    }

    assert_eq!(engine.state(), QuizState::Finished { score: expected });
}

#[test]
fn restart_from_finished_returns_to_initial_state() {
    let mut engine = QuizEngine::new(&TWO_QUESTIONS, Arc::new(RecordingSink::default())).unwrap();
    answer_and_advance(&mut engine, 0);
    answer_and_advance(&mut engine, 3);
    assert_eq!(engine.state(), QuizState::Finished { score: 2 });

    engine.restart();

    assert_eq!(engine.state(), QuizState::INITIAL);
    assert!(!engine.snapshot().finished);
}

#[test]
fn advance_with_stale_ticket_is_ignored_after_restart() {
    let sink = Arc::new(RecordingSink::default());
    let mut engine = QuizEngine::new(&TWO_QUESTIONS, sink.clone()).unwrap();

    let SubmitOutcome::Answered { ticket, .. } = engine.submit(0).unwrap() else {
        panic!("answer was ignored");
    };
    engine.restart();

    assert!(!engine.advance(ticket));
    assert_eq!(engine.state(), QuizState::INITIAL);
}

#[test]
fn ticket_can_only_be_used_once() {
    let mut engine = QuizEngine::new(&TWO_QUESTIONS, Arc::new(RecordingSink::default())).unwrap();

    let SubmitOutcome::Answered { ticket, .. } = engine.submit(0).unwrap() else {
        panic!("answer was ignored");
    };
    assert!(engine.advance(ticket));
    assert!(!engine.advance(ticket));

    assert_eq!(
        engine.state(),
        QuizState::InProgress {
            current_index: 1,
            score: 1,
            selected: None
        }
    );
}

#[test]
fn verdict_thresholds() {
    assert_eq!(Verdict::for_score(10, 10), Verdict::Legend);
    assert_eq!(Verdict::for_score(6, 10), Verdict::Roadie);
    assert_eq!(Verdict::for_score(5, 10), Verdict::Rookie);
    assert_eq!(Verdict::for_score(0, 10), Verdict::Rookie);
}

#[tokio::test]
async fn session_advances_after_delay() {
    let session = QuizSession::start(&TWO_QUESTIONS, Duration::from_millis(20)).unwrap();

    session.submit(0).unwrap();
    let answered = session.snapshot();
    assert_eq!(answered.current_index, 0);
    assert_eq!(answered.selected, Some(0));
    assert!(session.has_pending_advance());

    tokio::time::sleep(Duration::from_millis(150)).await;

    let advanced = session.snapshot();
    assert_eq!(advanced.current_index, 1);
    assert_eq!(advanced.selected, None);
    assert_eq!(advanced.score, 1);
}

#[tokio::test]
async fn session_signals_are_drained_once() {
    let session = QuizSession::start(&TWO_QUESTIONS, Duration::from_millis(10)).unwrap();
    session.submit(1).unwrap();

    assert_eq!(
        session.drain_signals(),
        vec![SoundEffect::Start, SoundEffect::Incorrect]
    );
    assert!(session.drain_signals().is_empty());
}

#[tokio::test]
async fn final_advance_emits_end_signal() {
    let session = QuizSession::start(&TWO_QUESTIONS, Duration::from_millis(10)).unwrap();

    session.submit(0).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    session.submit(3).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let snapshot = session.snapshot();
    assert!(snapshot.finished);
    assert_eq!(snapshot.score, 2);
    assert_eq!(snapshot.verdict, Some(Verdict::Legend));
    assert_eq!(session.drain_signals().last(), Some(&SoundEffect::End));
}

#[tokio::test]
async fn restart_cancels_pending_advance() {
    let session = QuizSession::start(&TWO_QUESTIONS, Duration::from_millis(50)).unwrap();

    session.submit(0).unwrap();
    session.restart();
    assert!(!session.has_pending_advance());

    tokio::time::sleep(Duration::from_millis(150)).await;

    let snapshot = session.snapshot();
    assert_eq!(snapshot.current_index, 0);
    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.selected, None);
}

#[tokio::test]
async fn ending_a_session_suppresses_its_advance() {
    let registry = SessionRegistry::new(&TWO_QUESTIONS, Duration::from_millis(50), 8);
    let session = registry.start().unwrap();
    let id = session.id();

    session.submit(0).unwrap();
    assert!(registry.end(&id));
    assert!(registry.get(&id).is_none());

    tokio::time::sleep(Duration::from_millis(150)).await;

    // The handle we still hold shows the run frozen where it was torn down.
    let snapshot = session.snapshot();
    assert_eq!(snapshot.current_index, 0);
    assert_eq!(snapshot.selected, Some(0));
}

#[tokio::test]
async fn registry_evicts_oldest_session_when_full() {
    let registry = SessionRegistry::new(&TWO_QUESTIONS, Duration::from_millis(10), 2);

    let first = registry.start().unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = registry.start().unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let third = registry.start().unwrap();

    assert_eq!(registry.len(), 2);
    assert!(registry.get(&first.id()).is_none());
    assert!(registry.get(&second.id()).is_some());
    assert!(registry.get(&third.id()).is_some());
}

#[tokio::test]
async fn registry_keeps_recently_used_session_when_full() {
    let registry = SessionRegistry::new(&TWO_QUESTIONS, Duration::from_millis(10), 2);

    let playing = registry.start().unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let idle = registry.start().unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;

    // Playing the older run makes it the most recently used.
    playing.submit(0).unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let newest = registry.start().unwrap();

    assert_eq!(registry.len(), 2);
    assert!(registry.get(&idle.id()).is_none());
    assert!(registry.get(&playing.id()).is_some());
    assert!(registry.get(&newest.id()).is_some());
}

#[tokio::test]
async fn looking_up_a_session_marks_it_used() {
    let registry = SessionRegistry::new(&TWO_QUESTIONS, Duration::from_millis(10), 8);
    let session = registry.start().unwrap();
    let started = session.last_touched();
    tokio::time::sleep(Duration::from_millis(5)).await;

    registry.get(&session.id()).unwrap();

    assert!(session.last_touched() > started);
}

#[tokio::test]
async fn unknown_session_cannot_be_ended() {
    let registry = SessionRegistry::new(&TWO_QUESTIONS, Duration::from_millis(10), 2);

    assert!(!registry.end(&uuid::Uuid::new_v4()));
    assert!(registry.is_empty());
}
