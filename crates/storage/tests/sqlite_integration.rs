use chrono::{Duration, NaiveDate};
use pilot_core::model::{Category, Problem, ProblemDraft, ProblemId, ProblemResult, SessionId, SessionStats};
use pilot_core::streak::StreakState;
use pilot_core::time::fixed_now;
use storage::ExportBundle;
use storage::repository::{AttemptStore, RESULT_LIMIT, SESSION_LIMIT};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

fn build_result(category: Category, is_correct: bool, timestamp: i64) -> ProblemResult {
    let problem = Problem::from_draft(
        ProblemId::generate(),
        category,
        ProblemDraft::new("Q", 20.0, 2.0, "knots"),
    );
    let answer = if is_correct { Some(20.0) } else { None };
    ProblemResult::new(&problem, answer, is_correct, 6, timestamp)
}

fn build_session(offset_minutes: i64, results: &[ProblemResult]) -> SessionStats {
    SessionStats::from_results(
        SessionId::generate(),
        fixed_now() + Duration::minutes(offset_minutes),
        900,
        results,
    )
    .unwrap()
}

#[tokio::test]
async fn sqlite_roundtrip_keeps_every_field() {
    let repo = connect("memdb_roundtrip").await;
    let results = vec![
        build_result(Category::Crosswind, true, 1_000),
        build_result(Category::FuelDumping, false, 2_000),
    ];
    let session = build_session(0, &results);

    repo.append_results(&results).await.unwrap();
    repo.append_session(&session).await.unwrap();

    let listed = repo.list_results().await.unwrap();
    assert_eq!(listed.len(), 2);
    // newest first
    assert_eq!(listed[0], results[1]);
    assert_eq!(listed[1], results[0]);
    assert_eq!(listed[0].user_answer, None);

    let sessions = repo.list_sessions().await.unwrap();
    assert_eq!(sessions, vec![session]);
    assert_eq!(
        sessions[0].category_breakdown()[&Category::FuelDumping].attempted,
        1
    );
}

#[tokio::test]
async fn sqlite_lists_newest_capped() {
    let repo = connect("memdb_capped").await;

    let results: Vec<ProblemResult> = (0..1005)
        .map(|i| build_result(Category::TurnRadius, i % 2 == 0, i))
        .collect();
    repo.append_results(&results).await.unwrap();

    let listed = repo.list_results().await.unwrap();
    assert_eq!(listed.len(), RESULT_LIMIT);
    assert_eq!(listed[0].timestamp, 1004);
    assert_eq!(listed[RESULT_LIMIT - 1].timestamp, 5);

    let one = [build_result(Category::TurnRadius, true, 1)];
    let sessions: Vec<SessionStats> = (0..103).map(|i| build_session(i, &one)).collect();
    repo.append_sessions(&sessions).await.unwrap();

    let listed = repo.list_sessions().await.unwrap();
    assert_eq!(listed.len(), SESSION_LIMIT);
    assert_eq!(listed[0].id(), sessions[102].id());
}

#[tokio::test]
async fn sqlite_ignores_duplicate_ids() {
    let repo = connect("memdb_duplicates").await;
    let result = build_result(Category::GlideDistance, true, 5);
    let session = build_session(0, std::slice::from_ref(&result));

    repo.append_result(&result).await.unwrap();
    repo.append_result(&result).await.unwrap();
    repo.append_sessions(&[session.clone(), session]).await.unwrap();

    assert_eq!(repo.list_results().await.unwrap().len(), 1);
    assert_eq!(repo.list_sessions().await.unwrap().len(), 1);
}

#[tokio::test]
async fn sqlite_streak_upserts_single_row() {
    let repo = connect("memdb_streak").await;
    assert_eq!(repo.streak_state().await.unwrap(), StreakState::default());

    let first = StreakState {
        current_streak: 1,
        longest_streak: 1,
        last_practice_date: NaiveDate::from_ymd_opt(2024, 6, 1),
    };
    let second = StreakState {
        current_streak: 2,
        longest_streak: 2,
        last_practice_date: NaiveDate::from_ymd_opt(2024, 6, 2),
    };
    repo.save_streak_state(&first).await.unwrap();
    repo.save_streak_state(&second).await.unwrap();

    assert_eq!(repo.streak_state().await.unwrap(), second);
}

#[tokio::test]
async fn sqlite_clear_then_import_bundle() {
    let repo = connect("memdb_import").await;
    repo.append_result(&build_result(Category::SlantRange, true, 1))
        .await
        .unwrap();

    let results = vec![build_result(Category::CompassMath, true, 10)];
    let bundle = ExportBundle {
        sessions: vec![build_session(3, &results)],
        results,
        streak: StreakState {
            current_streak: 4,
            longest_streak: 9,
            last_practice_date: NaiveDate::from_ymd_opt(2023, 11, 14),
        },
        exported_at: fixed_now(),
    };
    bundle.restore(&repo).await.unwrap();

    let back = ExportBundle::capture(&repo, fixed_now()).await.unwrap();
    assert_eq!(back, bundle);
}
