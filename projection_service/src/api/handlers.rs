use axum::{
    extract::{Path, State},
    Json,
};
use health_projector::{project, PositionAction, PositionDelta};
use tracing::{info, instrument, warn};

use super::{
    error::ApiError,
    models::{ProjectionRequest, ProjectionResponse},
    AppState,
};

pub async fn health() -> &'static str {
    "OK"
}

/// Projects the caller's health factor after the requested action.
///
/// The raw account data is normalized with the configured fixed-point scale,
/// the token amount is priced with the reserve, and the projected health
/// factor is classified and formatted for display.
#[instrument("PROJECTION", skip(state, request))]
pub async fn project_position(
    State(state): State<AppState>,
    Path(action): Path<PositionAction>,
    Json(request): Json<ProjectionRequest>,
) -> Result<Json<ProjectionResponse>, ApiError> {
    let result = build_projection(&state, action, &request);

    match &result {
        Ok(response) => info!(
            "Projected {:?} of {}: {} -> {} ({:?})",
            action,
            request.amount,
            response.current_display,
            response.projected_display,
            response.status
        ),
        Err(e) => warn!("Rejected {:?} projection: {}", action, e),
    }

    result.map(Json)
}

fn build_projection(
    state: &AppState,
    action: PositionAction,
    request: &ProjectionRequest,
) -> Result<ProjectionResponse, ApiError> {
    let position = request
        .account
        .to_raw()?
        .normalize(state.config.fixed_point_scale())?;
    let reserve = request.reserve.to_parameters()?;

    let projection = project(
        &position,
        &reserve,
        PositionDelta::new(action, request.amount),
    )?;

    Ok(ProjectionResponse::new(
        position.health_factor,
        projection,
        state.config.at_risk_health_factor,
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{http::StatusCode, response::IntoResponse};
    use health_projector::{HealthFactor, HealthStatus};
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;
    use crate::config::LocalConfig;

    fn state() -> AppState {
        AppState::new(Arc::new(LocalConfig::default()))
    }

    // 1000 collateral, 500 debt, 80% threshold, health factor 1.6
    fn request(amount: &str, enabled: bool) -> ProjectionRequest {
        serde_json::from_value(json!({
            "account": {
                "total_collateral_base": "100000000000",
                "total_debt_base": "50000000000",
                "current_liquidation_threshold": "8000",
                "ltv": "7500",
                "health_factor": "1600000000000000000"
            },
            "reserve": {
                "price": "2",
                "liquidation_threshold_bps": 8000,
                "usage_as_collateral_enabled": enabled
            },
            "amount": amount
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_project_supply() {
        let Json(response) = project_position(
            State(state()),
            Path(PositionAction::Supply),
            Json(request("250", true)),
        )
        .await
        .unwrap();

        assert_eq!(response.current, HealthFactor::Finite(dec!(1.6)));
        assert_eq!(response.projected, HealthFactor::Finite(dec!(2.4)));
        assert_eq!(response.projected_display, "2.40");
        assert_eq!(response.status, HealthStatus::Healthy);
        assert_eq!(response.collateral_base, dec!(1500));
    }

    #[tokio::test]
    async fn test_project_withdraw_everything() {
        let Json(response) = project_position(
            State(state()),
            Path(PositionAction::Withdraw),
            Json(request("500", true)),
        )
        .await
        .unwrap();

        assert_eq!(response.projected, HealthFactor::ZERO);
        assert_eq!(response.status, HealthStatus::Liquidatable);
        assert_eq!(response.liquidation_threshold, None);
    }

    #[tokio::test]
    async fn test_project_borrow_to_at_risk() {
        // 800 / (500 + 150 * 2) = 1
        let Json(response) = project_position(
            State(state()),
            Path(PositionAction::Borrow),
            Json(request("150", true)),
        )
        .await
        .unwrap();

        assert_eq!(response.projected, HealthFactor::Finite(dec!(1)));
        assert_eq!(response.status, HealthStatus::AtRisk);
    }

    #[tokio::test]
    async fn test_overdrawn_withdraw_is_bad_request() {
        let err = project_position(
            State(state()),
            Path(PositionAction::Withdraw),
            Json(request("501", true)),
        )
        .await
        .unwrap_err();

        assert_eq!(err.error_code(), "invalid_input");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_account_field_is_rejected() {
        let mut request = request("1", true);
        request.account.health_factor = "not-a-number".to_string();

        let err = project_position(State(state()), Path(PositionAction::Repay), Json(request))
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "invalid_field");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(health().await, "OK");
    }
}
