use crate::state::AppState;
use actix_web::{web, HttpResponse};
use log::error;

/// `DELETE /api/students/{id}`. Deleting an unknown id is not an error.
pub async fn process(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    match web::block(move || state.store.delete(id)).await {
        Ok(Ok(())) => HttpResponse::NoContent().finish(),
        Ok(Err(e)) => {
            error!("Deleting student {} failed: {}", id, e);
            HttpResponse::ServiceUnavailable().body(e.to_string())
        }
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}
