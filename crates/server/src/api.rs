//! Storefront REST API
//!
//! JSON in and out with camelCase fields. Failures travel
//! `ApplicationError -> InterfaceError -> (StatusCode, Json<ApiError>)` and carry a
//! per-request correlation id.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use neuroboutique_core::assessment::run_assessment;
use neuroboutique_core::checkout::{summarize, CheckoutSummary};
use neuroboutique_core::config::AppConfig;
use neuroboutique_core::domain::cognitive::CognitiveProfile;
use neuroboutique_core::domain::order::{NewOrder, Order, OrderId, OrderStatus};
use neuroboutique_core::domain::product::{Category, Product, ProductId};
use neuroboutique_core::domain::reward::{ActivityType, NewReward, UserReward};
use neuroboutique_core::domain::user::{NewUser, User, UserId};
use neuroboutique_core::errors::{ApplicationError, DomainError, InterfaceError};
use neuroboutique_core::loyalty::{points_for_purchase, LoyaltyTier, PointsSummary};
use neuroboutique_core::offers::{best_offer_price, BundleListing, OfferListing};
use neuroboutique_core::recommendations::{
    explain, PersonalizedSelector, Recommendation, RecommendationSelector,
};
use neuroboutique_core::scoring::CartLine;
use neuroboutique_db::Storefront;

#[derive(Clone)]
pub struct ApiState {
    pub store: Storefront,
    pub selector: Arc<dyn RecommendationSelector>,
    pub recommendation_limit: usize,
    pub points_per_dollar: u32,
    pub assessment_points: u64,
}

impl ApiState {
    pub fn new(store: Storefront, config: &AppConfig) -> Self {
        Self {
            store,
            selector: Arc::new(PersonalizedSelector),
            recommendation_limit: config.storefront.recommendation_limit,
            points_per_dollar: config.loyalty.points_per_dollar,
            assessment_points: config.loyalty.assessment_points,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub error: String,
    pub correlation_id: String,
}

type Rejection = (StatusCode, Json<ApiError>);
type ApiResult<T> = Result<Json<T>, Rejection>;

fn correlation_id() -> String {
    format!("req-{}", Uuid::new_v4().simple())
}

fn reject(error: impl Into<ApplicationError>, correlation_id: &str) -> Rejection {
    let interface = error.into().into_interface(correlation_id);
    let status = match interface {
        InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        InterfaceError::NotFound { .. } => StatusCode::NOT_FOUND,
        InterfaceError::Conflict { .. } => StatusCode::CONFLICT,
        InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    warn!(
        event_name = "storefront.request.rejected",
        correlation_id,
        status = status.as_u16(),
        error = %interface,
        "request rejected"
    );
    (
        status,
        Json(ApiError {
            error: interface.public_message(),
            correlation_id: interface.correlation_id().to_string(),
        }),
    )
}

fn not_found(resource: &str, correlation_id: &str) -> Rejection {
    reject(ApplicationError::NotFound(resource.to_string()), correlation_id)
}

fn required(field: &str, value: &str, correlation_id: &str) -> Result<(), Rejection> {
    if value.trim().is_empty() {
        return Err(reject(
            DomainError::InvariantViolation(format!("{field} is required")),
            correlation_id,
        ));
    }
    Ok(())
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/users", post(create_user))
        .route("/api/users/{id}", get(get_user))
        .route("/api/users/{id}/profile", put(update_profile))
        .route("/api/users/{id}/recommendations", get(recommendations))
        .route("/api/users/{id}/recommendations/insights", get(recommendation_insights))
        .route("/api/users/{id}/bundles", get(personalized_bundles))
        .route("/api/users/{id}/orders", get(user_orders))
        .route("/api/users/{id}/rewards", get(user_rewards))
        .route("/api/users/{id}/points", get(user_points))
        .route("/api/users/{id}/cognitive-assessment", post(cognitive_assessment))
        .route("/api/products", get(list_products))
        .route("/api/products/{id}", get(get_product))
        .route("/api/bundles", get(list_bundles))
        .route("/api/orders", post(create_order))
        .route("/api/orders/{id}/status", put(update_order_status))
        .route("/api/offers", get(active_offers))
        .route("/api/offers/flash-deals", get(flash_deals))
        .route("/api/checkout/preview", post(checkout_preview))
        .with_state(state)
}

// users

#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn create_user(
    State(state): State<ApiState>,
    Json(body): Json<CreateUserRequest>,
) -> ApiResult<User> {
    let cid = correlation_id();
    required("username", &body.username, &cid)?;
    required("email", &body.email, &cid)?;
    required("password", &body.password, &cid)?;

    let user = state
        .store
        .users
        .create(NewUser {
            username: body.username,
            email: body.email,
            password: SecretString::from(body.password),
        })
        .await
        .map_err(|error| reject(error, &cid))?;

    info!(
        event_name = "storefront.user.created",
        correlation_id = %cid,
        user_id = %user.id,
        "user registered"
    );
    Ok(Json(user))
}

pub async fn get_user(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<User> {
    let cid = correlation_id();
    let user = state
        .store
        .users
        .find_by_id(&UserId(id))
        .await
        .map_err(|error| reject(error, &cid))?
        .ok_or_else(|| not_found("User", &cid))?;
    Ok(Json(user))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub cognitive_profile: CognitiveProfile,
}

pub async fn update_profile(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateProfileRequest>,
) -> ApiResult<User> {
    let cid = correlation_id();
    let user = state
        .store
        .users
        .update_profile(&UserId(id), body.cognitive_profile)
        .await
        .map_err(|error| reject(error, &cid))?;

    info!(
        event_name = "storefront.user.profile_updated",
        correlation_id = %cid,
        user_id = %user.id,
        "cognitive profile replaced"
    );
    Ok(Json(user))
}

// catalog

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
}

pub async fn list_products(
    State(state): State<ApiState>,
    Query(query): Query<ProductQuery>,
) -> ApiResult<Vec<Product>> {
    let cid = correlation_id();
    let products = match query.category.as_deref() {
        Some(raw) => {
            let category: Category = raw.parse().map_err(|error| reject(error, &cid))?;
            state.store.products.list_by_category(category).await
        }
        None => state.store.products.list().await,
    };
    products.map(Json).map_err(|error| reject(error, &cid))
}

pub async fn get_product(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Product> {
    let cid = correlation_id();
    let product = state
        .store
        .products
        .find_by_id(&ProductId(id))
        .await
        .map_err(|error| reject(error, &cid))?
        .ok_or_else(|| not_found("Product", &cid))?;
    Ok(Json(product))
}

/// Catalog and profile for a recommendation request. Unknown users have no profile.
async fn recommendation_inputs(
    state: &ApiState,
    user_id: UserId,
    cid: &str,
) -> Result<(Vec<Product>, Option<CognitiveProfile>), Rejection> {
    let profile = state
        .store
        .users
        .find_by_id(&user_id)
        .await
        .map_err(|error| reject(error, cid))?
        .and_then(|user| user.cognitive_profile);
    let catalog = state.store.products.list().await.map_err(|error| reject(error, cid))?;
    Ok((catalog, profile))
}

pub async fn recommendations(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Product>> {
    let cid = correlation_id();
    let (catalog, profile) = recommendation_inputs(&state, UserId(id.clone()), &cid).await?;
    let recommended =
        state.selector.recommend(&catalog, profile.as_ref(), state.recommendation_limit);

    info!(
        event_name = "storefront.recommendations.served",
        correlation_id = %cid,
        user_id = %id,
        personalized = profile.is_some(),
        count = recommended.len(),
        "recommendations served"
    );
    Ok(Json(recommended))
}

pub async fn recommendation_insights(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Recommendation>> {
    let cid = correlation_id();
    let (catalog, profile) = recommendation_inputs(&state, UserId(id), &cid).await?;
    Ok(Json(explain(&catalog, profile.as_ref(), state.recommendation_limit)))
}

pub async fn list_bundles(State(state): State<ApiState>) -> ApiResult<Vec<BundleListing>> {
    let cid = correlation_id();
    let bundles = state.store.bundles.list().await.map_err(|error| reject(error, &cid))?;
    Ok(Json(bundles.into_iter().map(BundleListing::from).collect()))
}

pub async fn personalized_bundles(
    State(state): State<ApiState>,
    Path(_id): Path<String>,
) -> ApiResult<Vec<BundleListing>> {
    let cid = correlation_id();
    let bundles = state.store.bundles.list_active().await.map_err(|error| reject(error, &cid))?;
    Ok(Json(bundles.into_iter().map(BundleListing::from).collect()))
}

// orders

pub async fn create_order(
    State(state): State<ApiState>,
    Json(body): Json<NewOrder>,
) -> ApiResult<Order> {
    let cid = correlation_id();
    body.validate().map_err(|error| reject(error, &cid))?;
    if let Some(user_id) = &body.user_id {
        state
            .store
            .users
            .find_by_id(user_id)
            .await
            .map_err(|error| reject(error, &cid))?
            .ok_or_else(|| not_found("User", &cid))?;
    }

    let order = state.store.orders.create(body).await.map_err(|error| reject(error, &cid))?;
    info!(
        event_name = "storefront.order.created",
        correlation_id = %cid,
        order_id = %order.id.0,
        total_amount = %order.total_amount,
        "order placed"
    );

    if let Some(user_id) = order.user_id.clone() {
        let points_earned = points_for_purchase(order.total_amount, state.points_per_dollar);
        if points_earned > 0 {
            state
                .store
                .rewards
                .add(NewReward {
                    user_id: user_id.clone(),
                    activity_type: ActivityType::Purchase,
                    points_earned,
                    description: format!("Purchase order {}", order.id.0),
                })
                .await
                .map_err(|error| reject(error, &cid))?;
            info!(
                event_name = "storefront.reward.credited",
                correlation_id = %cid,
                user_id = %user_id,
                points_earned,
                "purchase points credited"
            );
        }
    }

    Ok(Json(order))
}

pub async fn user_orders(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Order>> {
    let cid = correlation_id();
    state
        .store
        .orders
        .list_for_user(&UserId(id))
        .await
        .map(Json)
        .map_err(|error| reject(error, &cid))
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

pub async fn update_order_status(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateOrderStatusRequest>,
) -> ApiResult<Order> {
    let cid = correlation_id();
    let order = state
        .store
        .orders
        .update_status(&OrderId(id), body.status)
        .await
        .map_err(|error| reject(error, &cid))?;

    info!(
        event_name = "storefront.order.status_changed",
        correlation_id = %cid,
        order_id = %order.id.0,
        status = ?order.status,
        "order status updated"
    );
    Ok(Json(order))
}

// offers

pub async fn active_offers(State(state): State<ApiState>) -> ApiResult<Vec<OfferListing>> {
    let cid = correlation_id();
    let now = Utc::now();
    let offers = state.store.offers.list_active(now).await.map_err(|error| reject(error, &cid))?;
    Ok(Json(offers.into_iter().map(|offer| OfferListing::at(offer, now)).collect()))
}

pub async fn flash_deals(State(state): State<ApiState>) -> ApiResult<Vec<OfferListing>> {
    let cid = correlation_id();
    let now = Utc::now();
    let offers =
        state.store.offers.list_flash_deals(now).await.map_err(|error| reject(error, &cid))?;
    Ok(Json(offers.into_iter().map(|offer| OfferListing::at(offer, now)).collect()))
}

// loyalty

pub async fn user_rewards(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<UserReward>> {
    let cid = correlation_id();
    state
        .store
        .rewards
        .list_for_user(&UserId(id))
        .await
        .map(Json)
        .map_err(|error| reject(error, &cid))
}

/// Balance and tier standing. Unknown users report an empty bronze balance.
pub async fn user_points(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<PointsSummary> {
    let cid = correlation_id();
    let points = state
        .store
        .users
        .find_by_id(&UserId(id))
        .await
        .map_err(|error| reject(error, &cid))?
        .map_or(0, |user| user.neural_points);
    Ok(Json(PointsSummary::for_points(points)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponse {
    pub cognitive_profile: CognitiveProfile,
    pub user: User,
}

pub async fn cognitive_assessment(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<AssessmentResponse> {
    let cid = correlation_id();
    let user_id = UserId(id);
    let cognitive_profile = run_assessment(&mut rand::thread_rng());

    state
        .store
        .users
        .update_profile(&user_id, cognitive_profile)
        .await
        .map_err(|error| reject(error, &cid))?;
    state
        .store
        .rewards
        .add(NewReward {
            user_id: user_id.clone(),
            activity_type: ActivityType::Challenge,
            points_earned: state.assessment_points,
            description: "Completed cognitive assessment".to_string(),
        })
        .await
        .map_err(|error| reject(error, &cid))?;
    let user = state
        .store
        .users
        .find_by_id(&user_id)
        .await
        .map_err(|error| reject(error, &cid))?
        .ok_or_else(|| not_found("User", &cid))?;

    info!(
        event_name = "storefront.assessment.completed",
        correlation_id = %cid,
        user_id = %user_id,
        points_earned = state.assessment_points,
        "cognitive assessment recorded"
    );
    Ok(Json(AssessmentResponse { cognitive_profile, user }))
}

// checkout

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPreviewRequest {
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub items: Vec<CheckoutItem>,
}

/// Prices a cart without placing it. Guests and unknown users check out at bronze.
pub async fn checkout_preview(
    State(state): State<ApiState>,
    Json(body): Json<CheckoutPreviewRequest>,
) -> ApiResult<CheckoutSummary> {
    let cid = correlation_id();
    let now = Utc::now();
    let offers = state.store.offers.list_active(now).await.map_err(|error| reject(error, &cid))?;

    let mut products = Vec::with_capacity(body.items.len());
    for item in &body.items {
        let mut product = state
            .store
            .products
            .find_by_id(&item.product_id)
            .await
            .map_err(|error| reject(error, &cid))?
            .ok_or_else(|| not_found("Product", &cid))?;
        product.price = best_offer_price(&offers, &product.id, product.price, now);
        products.push((product, item.quantity));
    }

    let tier = match &body.user_id {
        Some(user_id) => state
            .store
            .users
            .find_by_id(user_id)
            .await
            .map_err(|error| reject(error, &cid))?
            .map_or(LoyaltyTier::Bronze, |user| user.tier_level),
        None => LoyaltyTier::Bronze,
    };

    let lines: Vec<CartLine<'_>> =
        products.iter().map(|(product, quantity)| CartLine::new(product, *quantity)).collect();
    Ok(Json(summarize(&lines, tier, state.points_per_dollar)))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    use neuroboutique_core::domain::order::OrderItem;

    use super::*;

    async fn state() -> ApiState {
        let store = Storefront::demo("demo-user").await.expect("seed demo store");
        ApiState::new(store, &AppConfig::default())
    }

    fn demo_order(user_id: Option<&str>) -> NewOrder {
        NewOrder {
            user_id: user_id.map(|id| UserId(id.to_string())),
            items: vec![OrderItem {
                product_id: ProductId("1".to_string()),
                quantity: 3,
                price: Decimal::new(4_999, 2),
            }],
            total_amount: Decimal::new(11_047, 2),
            predicted_brain_impact: None,
        }
    }

    #[tokio::test]
    async fn create_user_hides_password_and_rejects_duplicates() {
        let state = state().await;
        let request = || CreateUserRequest {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
        };

        let Json(user) =
            create_user(State(state.clone()), Json(request())).await.expect("create user");
        let json = serde_json::to_string(&user).expect("serialize");
        assert!(!json.contains("hunter2"));
        assert_eq!(user.cognitive_profile, Some(CognitiveProfile::BASELINE));

        let (status, Json(error)) =
            create_user(State(state), Json(request())).await.expect_err("duplicate email");
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(error.correlation_id.starts_with("req-"));
    }

    #[tokio::test]
    async fn create_user_requires_every_field() {
        let state = state().await;

        let (status, Json(error)) = create_user(
            State(state),
            Json(CreateUserRequest { username: "ada".to_string(), ..CreateUserRequest::default() }),
        )
        .await
        .expect_err("missing email");

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error.error.contains("email is required"));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (status, Json(error)) = get_user(State(state().await), Path("ghost".to_string()))
            .await
            .expect_err("unknown user");

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error.error, "User not found");
    }

    #[tokio::test]
    async fn recommendations_personalize_for_known_users() {
        let state = state().await;

        let Json(products) = recommendations(State(state.clone()), Path("demo-user".to_string()))
            .await
            .expect("recommendations");
        let ids: Vec<_> = products.iter().map(|product| product.id.0.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
        assert_eq!(products[3].ai_score, Some(87.0));

        let Json(fallback) = recommendations(State(state), Path("nobody".to_string()))
            .await
            .expect("fallback recommendations");
        assert_eq!(fallback.len(), 4);
        assert_eq!(fallback[0].ai_score, Some(94.0));
    }

    #[tokio::test]
    async fn profile_update_changes_recommendations() {
        let state = state().await;
        let profile =
            CognitiveProfile { memory: 95.0, focus: 95.0, sleep: 40.0, energy: 95.0, mood: 95.0 };

        update_profile(
            State(state.clone()),
            Path("demo-user".to_string()),
            Json(UpdateProfileRequest { cognitive_profile: profile }),
        )
        .await
        .expect("update profile");

        let Json(insights) =
            recommendation_insights(State(state), Path("demo-user".to_string()))
                .await
                .expect("insights");
        assert_eq!(insights[0].product_id, ProductId("4".to_string()));
        assert_eq!(insights[0].badge, "Sleep Enhancer for Tonight");
    }

    #[tokio::test]
    async fn unknown_category_is_a_bad_request() {
        let (status, _) = list_products(
            State(state().await),
            Query(ProductQuery { category: Some("telepathy".to_string()) }),
        )
        .await
        .expect_err("unknown category");

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn order_awards_purchase_points() {
        let state = state().await;

        let Json(order) = create_order(State(state.clone()), Json(demo_order(Some("demo-user"))))
            .await
            .expect("create order");
        assert_eq!(order.status, OrderStatus::Pending);

        let Json(points) = user_points(State(state.clone()), Path("demo-user".to_string()))
            .await
            .expect("points");
        assert_eq!(points.points, 1_104);
        assert_eq!(points.tier, LoyaltyTier::Silver);

        let Json(rewards) = user_rewards(State(state), Path("demo-user".to_string()))
            .await
            .expect("rewards");
        assert_eq!(rewards.len(), 1);
        assert_eq!(rewards[0].description, format!("Purchase order {}", order.id.0));
    }

    #[tokio::test]
    async fn out_of_range_totals_are_rejected_before_storing() {
        let state = state().await;
        let mut huge = demo_order(Some("demo-user"));
        huge.total_amount = Decimal::MAX;

        let (status, Json(error)) =
            create_order(State(state.clone()), Json(huge)).await.expect_err("huge total");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error.error.contains("exceeds"));

        let Json(orders) = user_orders(State(state.clone()), Path("demo-user".to_string()))
            .await
            .expect("orders");
        assert!(orders.is_empty());
        let Json(points) =
            user_points(State(state), Path("demo-user".to_string())).await.expect("points");
        assert_eq!(points.points, 0);
    }

    #[tokio::test]
    async fn malformed_items_are_rejected() {
        let state = state().await;

        let mut no_quantity = demo_order(Some("demo-user"));
        no_quantity.items[0].quantity = 0;
        let (status, Json(error)) =
            create_order(State(state.clone()), Json(no_quantity)).await.expect_err("quantity 0");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error.error.contains("zero quantity"));

        let mut negative_price = demo_order(Some("demo-user"));
        negative_price.items[0].price = Decimal::new(-100, 2);
        let (status, Json(error)) =
            create_order(State(state), Json(negative_price)).await.expect_err("negative price");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error.error.contains("negative price"));
    }

    #[tokio::test]
    async fn guest_orders_earn_nothing_and_empty_orders_fail() {
        let state = state().await;

        create_order(State(state.clone()), Json(demo_order(None))).await.expect("guest order");

        let mut empty = demo_order(Some("demo-user"));
        empty.items.clear();
        let (status, _) =
            create_order(State(state.clone()), Json(empty)).await.expect_err("empty order");
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = create_order(State(state), Json(demo_order(Some("ghost"))))
            .await
            .expect_err("unknown user");
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_status_transition_is_a_bad_request() {
        let state = state().await;
        let Json(order) = create_order(State(state.clone()), Json(demo_order(None)))
            .await
            .expect("create order");

        let (status, _) = update_order_status(
            State(state.clone()),
            Path(order.id.0.clone()),
            Json(UpdateOrderStatusRequest { status: OrderStatus::Delivered }),
        )
        .await
        .expect_err("pending -> delivered");
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = update_order_status(
            State(state),
            Path("missing".to_string()),
            Json(UpdateOrderStatusRequest { status: OrderStatus::Confirmed }),
        )
        .await
        .expect_err("unknown order");
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn assessment_stores_profile_and_awards_points() {
        let state = state().await;

        let Json(response) =
            cognitive_assessment(State(state.clone()), Path("demo-user".to_string()))
                .await
                .expect("assessment");

        assert_eq!(response.user.cognitive_profile, Some(response.cognitive_profile));
        assert_eq!(response.user.neural_points, 100);
        assert!((70.0..100.0).contains(&response.cognitive_profile.memory));

        let (status, _) = cognitive_assessment(State(state), Path("ghost".to_string()))
            .await
            .expect_err("unknown user");
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn checkout_preview_prices_and_scores_the_cart() {
        let state = state().await;
        let request = |product_id: &str| CheckoutPreviewRequest {
            user_id: Some(UserId("demo-user".to_string())),
            items: vec![
                CheckoutItem { product_id: ProductId(product_id.to_string()), quantity: 1 },
                CheckoutItem { product_id: ProductId("2".to_string()), quantity: 2 },
            ],
        };

        let Json(summary) = checkout_preview(State(state.clone()), Json(request("1")))
            .await
            .expect("preview");
        assert_eq!(summary.subtotal, Decimal::new(10_997, 2));
        assert_eq!(summary.tier, LoyaltyTier::Bronze);
        assert_eq!(summary.wellness_score, Some(14));

        let (status, Json(error)) = checkout_preview(State(state.clone()), Json(request("99")))
            .await
            .expect_err("unknown product");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error.error, "Product not found");
    }

    #[tokio::test]
    async fn checkout_preview_applies_live_offers() {
        let request = CheckoutPreviewRequest {
            user_id: None,
            items: vec![CheckoutItem { product_id: ProductId("3".to_string()), quantity: 1 }],
        };

        let Json(summary) =
            checkout_preview(State(state().await), Json(request)).await.expect("preview");

        // 34.99 less the 33% flash deal
        assert_eq!(summary.subtotal, Decimal::new(2_344, 2));
    }

    #[tokio::test]
    async fn listings_carry_savings_and_countdowns() {
        let state = state().await;

        let Json(bundles) = list_bundles(State(state.clone())).await.expect("bundles");
        assert_eq!(bundles[0].bundle.id.0, "bundle1");
        assert_eq!(bundles[0].savings, Decimal::new(3_198, 2));
        assert_eq!(bundles[0].savings_pct, 25);

        let Json(personalized) =
            personalized_bundles(State(state.clone()), Path("demo-user".to_string()))
                .await
                .expect("personalized bundles");
        assert!(personalized.iter().all(|listing| listing.savings_pct > 0));

        let Json(deals) = flash_deals(State(state)).await.expect("flash deals");
        let remaining = deals[0].time_remaining.expect("flash deal expires");
        assert!(remaining.hours <= 2);
        assert!(remaining.hours > 0 || remaining.minutes > 0);
    }

    #[tokio::test]
    async fn router_serves_filtered_catalog() {
        let app = router(state().await);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/products?category=sleep")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let products: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(products[0]["name"], "SleepSync Smart Mask");
        assert_eq!(products[0]["inStock"], true);

        let response = app
            .oneshot(
                Request::builder().uri("/api/offers/flash-deals").body(Body::empty()).expect("req"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let deals: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(deals[0]["id"], "flash1");
        assert_eq!(deals[0]["discountType"], "bundle");
        assert!(deals[0]["timeRemaining"]["hours"].is_number());
    }

    #[tokio::test]
    async fn router_maps_missing_product_to_404() {
        let response = router(state().await)
            .oneshot(Request::builder().uri("/api/products/99").body(Body::empty()).expect("req"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let error: ApiError = serde_json::from_slice(&body).expect("json");
        assert_eq!(error.error, "Product not found");
    }
}
