use axum::extract::{Json, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, patch, post};
use axum::Router;
use chrono::NaiveDate;
use skin_tracker::api::types::{
    DailyLog, DailyLogRequest, GoalRecord, ProductRecord, SkinCondition, SkinType, UserProfile,
    WeeklyPlan,
};
use skin_tracker::models::{GoalStatus, GoalType, ProductCategory};
use skin_tracker::{ApiClient, ApiConfig, ApiError, Navigator, Session};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

struct RecordingNavigator {
    redirects: AtomicUsize,
}

impl Navigator for RecordingNavigator {
    fn go_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct Recorded {
    auth: Mutex<Vec<Option<String>>>,
    query: Mutex<Vec<HashMap<String, String>>>,
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind random port");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_for(base_url: &str) -> (ApiClient, Arc<Session>, Arc<RecordingNavigator>) {
    let session = Arc::new(Session::new());
    let navigator = Arc::new(RecordingNavigator {
        redirects: AtomicUsize::new(0),
    });
    let client = ApiClient::new(
        ApiConfig::new(base_url),
        Arc::clone(&session),
        navigator.clone() as Arc<dyn Navigator>,
    )
    .expect("build client");
    (client, session, navigator)
}

async fn record_products(
    State(recorded): State<Arc<Recorded>>,
    headers: HeaderMap,
) -> Json<Vec<ProductRecord>> {
    let auth = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    recorded.auth.lock().unwrap().push(auth);
    Json(Vec::new())
}

#[tokio::test]
async fn bearer_token_is_attached_while_logged_in_and_dropped_after_logout() {
    let recorded = Arc::new(Recorded::default());
    let router = Router::new()
        .route("/products", get(record_products))
        .with_state(Arc::clone(&recorded));
    let base_url = serve(router).await;
    let (client, session, _) = client_for(&base_url);

    session.log_in("token-123").await;
    client.products().await.unwrap();

    session.log_out().await;
    client.products().await.unwrap();

    let seen = recorded.auth.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![Some("Bearer token-123".to_string()), None]
    );
}

#[tokio::test]
async fn a_401_clears_the_session_and_routes_to_login_exactly_once() {
    let router = Router::new().route(
        "/goals",
        get(|| async { (StatusCode::UNAUTHORIZED, "token expired") }),
    );
    let base_url = serve(router).await;
    let (client, session, navigator) = client_for(&base_url);
    session.log_in("stale-token").await;

    let err = client.goals().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
    assert!(!session.is_authenticated().await);
    assert_eq!(navigator.redirects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn other_failures_propagate_and_leave_the_session_alone() {
    let router = Router::new().route(
        "/analytics/weekly-summary",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "correlation engine offline") }),
    );
    let base_url = serve(router).await;
    let (client, session, navigator) = client_for(&base_url);
    session.log_in("good-token").await;

    match client.weekly_summary().await.unwrap_err() {
        ApiError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "correlation engine offline");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(session.token().await.as_deref(), Some("good-token"));
    assert_eq!(navigator.redirects.load(Ordering::SeqCst), 0);
}

async fn echo_daily_log(Json(request): Json<DailyLogRequest>) -> Json<DailyLog> {
    Json(DailyLog {
        id: 41,
        user_id: 7,
        log_date: request.log_date,
        skin_condition: request.skin_condition,
        water_intake: request.water_intake,
        sleep_hours: request.sleep_hours,
        diet_quality: request.diet_quality,
        stress_level: request.stress_level,
        notes: request.notes,
        created_at: "2024-01-05T08:30:00".to_string(),
        updated_at: "2024-01-05T08:30:00".to_string(),
    })
}

#[tokio::test]
async fn daily_log_round_trips_through_the_typed_surface() {
    let router = Router::new().route("/daily-log", post(echo_daily_log));
    let base_url = serve(router).await;
    let (client, _, _) = client_for(&base_url);

    let request = DailyLogRequest {
        log_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        skin_condition: SkinCondition::Breakout,
        water_intake: Some(6.0),
        sleep_hours: Some(7.5),
        diet_quality: None,
        stress_level: None,
        notes: Some("new serum yesterday".to_string()),
        routine: None,
    };

    let log = client.create_daily_log(&request).await.unwrap();
    assert_eq!(log.id, 41);
    assert_eq!(log.log_date, request.log_date);
    assert_eq!(log.skin_condition, SkinCondition::Breakout);
    assert_eq!(log.sleep_hours, Some(7.5));
    assert_eq!(log.notes.as_deref(), Some("new serum yesterday"));
}

async fn record_history(
    State(recorded): State<Arc<Recorded>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<DailyLog>> {
    recorded.query.lock().unwrap().push(params);
    Json(Vec::new())
}

#[tokio::test]
async fn absent_history_bounds_are_omitted_from_the_query() {
    let recorded = Arc::new(Recorded::default());
    let router = Router::new()
        .route("/daily-log/history", get(record_history))
        .with_state(Arc::clone(&recorded));
    let base_url = serve(router).await;
    let (client, _, _) = client_for(&base_url);

    let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    client.daily_log_history(Some(from), None).await.unwrap();
    client.daily_log_history(None, None).await.unwrap();

    let seen = recorded.query.lock().unwrap().clone();
    assert_eq!(seen[0].get("from").map(String::as_str), Some("2024-01-01"));
    assert!(!seen[0].contains_key("to"));
    assert!(seen[1].is_empty());
}

#[tokio::test]
async fn delete_accepts_an_empty_no_content_response() {
    let router = Router::new().route(
        "/daily-log/:id",
        delete(|Path(_id): Path<i64>| async { StatusCode::NO_CONTENT }),
    );
    let base_url = serve(router).await;
    let (client, _, _) = client_for(&base_url);

    client.delete_daily_log(7).await.unwrap();
}

fn goal_record(current_value: f64) -> GoalRecord {
    GoalRecord {
        id: 3,
        user_id: 7,
        goal_type: GoalType::WaterIntake,
        target_value: 8.0,
        current_value,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: None,
        status: GoalStatus::Active,
        created_at: "2024-01-01T00:00:00".to_string(),
    }
}

async fn apply_progress(
    Path(_id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> Json<GoalRecord> {
    let increment = body["increment"].as_f64().unwrap_or_default();
    Json(goal_record(2.0 + increment))
}

#[tokio::test]
async fn progress_increments_are_posted_to_the_goal_resource() {
    let router = Router::new().route("/goals/:id/progress", post(apply_progress));
    let base_url = serve(router).await;
    let (client, _, _) = client_for(&base_url);

    let updated = client.record_progress(3, 1.5).await.unwrap();
    assert_eq!(updated.current_value, 3.5);
    assert_eq!(updated.goal_type, GoalType::WaterIntake);
}

async fn toggle_product(Path(id): Path<i64>) -> Json<ProductRecord> {
    Json(ProductRecord {
        id,
        user_id: 7,
        name: "Mineral Sunscreen".to_string(),
        category: ProductCategory::Sunscreen,
        brand: None,
        key_ingredients: None,
        started_date: None,
        frequency: None,
        notes: None,
        active: false,
        created_at: "2024-01-01T00:00:00".to_string(),
        updated_at: "2024-01-06T00:00:00".to_string(),
    })
}

#[tokio::test]
async fn toggle_active_patches_the_flip_endpoint() {
    let router = Router::new().route("/products/:id/toggle-active", patch(toggle_product));
    let base_url = serve(router).await;
    let (client, _, _) = client_for(&base_url);

    let product = client.toggle_product_active(5).await.unwrap();
    assert_eq!(product.id, 5);
    assert!(!product.active);
}

fn sample_profile() -> UserProfile {
    UserProfile {
        skin_type: SkinType::Combination,
        age: 29,
        skin_condition: "BREAKOUT".to_string(),
        concerns: vec!["acne".to_string()],
        current_products: vec!["Gentle Cleanser".to_string()],
        goals: vec!["clear skin".to_string()],
        budget: None,
        climate: Some("humid".to_string()),
    }
}

async fn generate_plan(Json(profile): Json<UserProfile>) -> Json<Vec<WeeklyPlan>> {
    Json(vec![WeeklyPlan {
        week_number: 1,
        focus: "Barrier repair".to_string(),
        morning_routine: Vec::new(),
        evening_routine: Vec::new(),
        product_recommendations: Vec::new(),
        tips: vec![format!("Address {} first", profile.concerns.join(", "))],
        warnings: Vec::new(),
        expected_results: "Less irritation".to_string(),
    }])
}

async fn advice(Json(body): Json<serde_json::Value>) -> Json<serde_json::Value> {
    let question = body["question"].as_str().unwrap_or_default().to_string();
    Json(serde_json::json!({
        "advice": format!("Regarding '{question}': wear sunscreen daily."),
    }))
}

#[tokio::test]
async fn recommendation_surface_decodes_plans_and_advice() {
    let router = Router::new()
        .route("/recommendations/generate-plan", post(generate_plan))
        .route("/recommendations/ai-advice", post(advice));
    let base_url = serve(router).await;
    let (client, _, _) = client_for(&base_url);

    let plans = client.generate_weekly_plan(&sample_profile()).await.unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].week_number, 1);
    assert_eq!(plans[0].tips, vec!["Address acne first".to_string()]);

    let advice = client
        .ai_advice(&sample_profile(), "Do I need SPF indoors?")
        .await
        .unwrap();
    assert!(advice.contains("Do I need SPF indoors?"));
}
