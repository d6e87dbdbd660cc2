use actix_web::{web, Scope};

use super::handlers::analyze_csv;
use crate::application::ports::inbound::AnalyzeTransactionsUseCase;

pub fn api_routes<T: AnalyzeTransactionsUseCase + 'static>() -> Scope {
    web::scope("/api").route("/analyze", web::post().to(analyze_csv::<T>))
}
