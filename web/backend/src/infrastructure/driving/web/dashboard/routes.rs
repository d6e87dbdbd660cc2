use actix_web::web;

use super::handlers::{analyze_upload, dashboard_index, ANALYZE_PATH};
use crate::application::ports::inbound::AnalyzeTransactionsUseCase;

pub fn dashboard_routes<T: AnalyzeTransactionsUseCase + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(dashboard_index::<T>))
        .route(ANALYZE_PATH, web::post().to(analyze_upload::<T>));
}
