use actix_web::{web, HttpResponse, Responder};
use tracing::error;

use crate::application::ports::inbound::{AnalysisError, AnalyzeTransactionsUseCase};
use crate::infrastructure::driving::web::AppState;

// Raw CSV in, analysis JSON out
pub async fn analyze_csv<T>(data: web::Data<AppState<T>>, body: web::Bytes) -> impl Responder
where
    T: AnalyzeTransactionsUseCase,
{
    match data.analysis_service.analyze(body.to_vec()).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(AnalysisError::Load(e)) => HttpResponse::BadRequest().json(serde_json::json!({
            "error": e.to_string()
        })),
        Err(e) => {
            error!("Analysis failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            }))
        }
    }
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use fraudshield::config::RenderConfig;
    use fraudshield::LoadError;
    use pretty_assertions::assert_eq;

    use super::super::api_routes;
    use super::*;
    use crate::application::ports::inbound::MockAnalyzeTransactionsUseCase;
    use crate::infrastructure::config::UploadConfig;

    fn app_state(mock: MockAnalyzeTransactionsUseCase) -> web::Data<AppState<MockAnalyzeTransactionsUseCase>> {
        web::Data::new(AppState {
            analysis_service: Arc::new(mock),
            upload: UploadConfig { max_file_bytes: 1024 },
            render: RenderConfig::default(),
        })
    }

    #[actix_web::test]
    async fn returns_analysis_json() {
        let mut mock = MockAnalyzeTransactionsUseCase::new();
        mock.expect_analyze()
            .times(1)
            .returning(|csv| Ok(fraudshield::analyze(csv.as_slice()).unwrap()));
        let app = test::init_service(
            App::new()
                .app_data(app_state(mock))
                .service(api_routes::<MockAnalyzeTransactionsUseCase>()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/analyze")
            .set_payload("sender,receiver,amount\nA,B,10\nB,C,20\nA,C,5\n")
            .to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(json["report"]["flagged"], serde_json::json!(["B"]));
        assert_eq!(json["statistics"]["total_transactions"], 3);
        assert_eq!(json["top_suspicious"][0]["account"], "B");
    }

    #[actix_web::test]
    async fn load_error_is_bad_request() {
        let mut mock = MockAnalyzeTransactionsUseCase::new();
        mock.expect_analyze()
            .times(1)
            .returning(|_| Err(AnalysisError::Load(LoadError::MissingHeader)));
        let app = test::init_service(
            App::new()
                .app_data(app_state(mock))
                .service(api_routes::<MockAnalyzeTransactionsUseCase>()),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/analyze").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["error"], LoadError::MissingHeader.to_string());
    }

    #[actix_web::test]
    async fn health_reports_ok() {
        let app = test::init_service(App::new().route("/health", web::get().to(health))).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(json, serde_json::json!({ "status": "ok" }));
    }
}
