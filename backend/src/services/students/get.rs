//! Read-only record endpoints: list, search and single lookup.

use super::StudentView;
use crate::state::AppState;
use crate::store::{StoreError, StudentOrder};
use actix_web::{web, HttpResponse};
use common::model::student::StudentRecord;
use common::requests::SearchQuery;
use log::error;

fn views(state: &AppState, records: Vec<StudentRecord>) -> Vec<StudentView> {
    records
        .into_iter()
        .map(|record| StudentView::new(record, &state.photos))
        .collect()
}

fn store_failure(e: StoreError) -> HttpResponse {
    error!("Record store error: {}", e);
    HttpResponse::ServiceUnavailable().body(e.to_string())
}

/// `GET /api/students`: newest first.
pub async fn list(state: web::Data<AppState>) -> HttpResponse {
    match state.store.select_all(StudentOrder::Newest) {
        Ok(records) => HttpResponse::Ok().json(views(&state, records)),
        Err(e) => store_failure(e),
    }
}

/// `GET /api/students/search?name=`. A blank query lists everyone by name.
pub async fn search(state: web::Data<AppState>, query: web::Query<SearchQuery>) -> HttpResponse {
    let name = query.name.trim();
    let found = if name.is_empty() {
        state.store.select_all(StudentOrder::Name)
    } else {
        state.store.search_by_name(name)
    };
    match found {
        Ok(records) => HttpResponse::Ok().json(views(&state, records)),
        Err(e) => store_failure(e),
    }
}

/// `GET /api/students/{id}`.
pub async fn process(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    match state.store.get(id) {
        Ok(Some(record)) => HttpResponse::Ok().json(StudentView::new(record, &state.photos)),
        Ok(None) => HttpResponse::NotFound().body(StoreError::NotFound(id).to_string()),
        Err(e) => store_failure(e),
    }
}
