//! Address, city, and country listings.

use axum::{Json, extract::State};

use crate::db::LocationRepository;
use crate::error::Result;
use crate::models::{AddressSummary, CitySummary, CountrySummary};
use crate::state::AppState;

/// `GET /addresses`
pub async fn addresses(State(state): State<AppState>) -> Result<Json<Vec<AddressSummary>>> {
    Ok(Json(LocationRepository::new(state.pool()).addresses().await?))
}

/// `GET /cities`
pub async fn cities(State(state): State<AppState>) -> Result<Json<Vec<CitySummary>>> {
    Ok(Json(LocationRepository::new(state.pool()).cities().await?))
}

/// `GET /countries`
pub async fn countries(State(state): State<AppState>) -> Result<Json<Vec<CountrySummary>>> {
    Ok(Json(LocationRepository::new(state.pool()).countries().await?))
}
