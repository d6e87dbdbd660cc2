use actix_multipart::{Multipart, MultipartError};
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use fraudshield::render::DashboardPage;
use futures::TryStreamExt;
use tracing::{error, info, warn};

use crate::application::ports::inbound::{AnalysisError, AnalyzeTransactionsUseCase};
use crate::infrastructure::driving::web::AppState;

pub const ANALYZE_PATH: &str = "/analyze";

/// Name of the form field carrying the CSV file.
const FILE_FIELD: &str = "file";

enum Upload {
    Missing,
    TooLarge,
    File(Vec<u8>),
}

// Landing page: upload form plus the idle prompt
pub async fn dashboard_index<T>(data: web::Data<AppState<T>>) -> impl Responder
where
    T: AnalyzeTransactionsUseCase,
{
    let page = DashboardPage::new(&data.render, Some(ANALYZE_PATH));
    html(StatusCode::OK, page.idle())
}

// Form upload handler
pub async fn analyze_upload<T>(data: web::Data<AppState<T>>, payload: Multipart) -> impl Responder
where
    T: AnalyzeTransactionsUseCase,
{
    let page = DashboardPage::new(&data.render, Some(ANALYZE_PATH));
    let max_bytes = data.upload.max_file_bytes;

    let csv = match read_upload(payload, max_bytes).await {
        Ok(Upload::File(csv)) => csv,
        Ok(Upload::Missing) => return html(StatusCode::OK, page.idle()),
        Ok(Upload::TooLarge) => {
            warn!("Upload rejected: larger than {} bytes", max_bytes);
            let message = format!("The file is larger than the {} byte upload limit", max_bytes);
            return html(StatusCode::PAYLOAD_TOO_LARGE, page.error(&message));
        }
        Err(e) => {
            warn!("Unreadable multipart upload: {}", e);
            return html(StatusCode::BAD_REQUEST, page.error(&e.to_string()));
        }
    };
    info!("Received upload of {} bytes", csv.len());

    let result = match data.analysis_service.analyze(csv).await {
        Ok(result) => result,
        Err(AnalysisError::Load(e)) => return html(StatusCode::BAD_REQUEST, page.error(&e.to_string())),
        Err(e) => {
            error!("Analysis failed: {}", e);
            return html(StatusCode::INTERNAL_SERVER_ERROR, page.error(&e.to_string()));
        }
    };

    match page.analysis(&result) {
        Ok(body) => html(StatusCode::OK, body),
        Err(e) => {
            error!("Failed to render dashboard: {}", e);
            html(StatusCode::INTERNAL_SERVER_ERROR, page.error(&e.to_string()))
        }
    }
}

/// Pulls the `file` field out of the form. Other fields are skipped. A form
/// submitted without choosing a file carries a part with no filename, which
/// counts as no file at all; a named file is passed on even when it is empty.
async fn read_upload(mut payload: Multipart, max_bytes: usize) -> Result<Upload, MultipartError> {
    while let Some(mut field) = payload.try_next().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let has_filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .is_some_and(|name| !name.is_empty());

        let mut csv = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if csv.len() + chunk.len() > max_bytes {
                return Ok(Upload::TooLarge);
            }
            csv.extend_from_slice(&chunk);
        }

        return Ok(if has_filename { Upload::File(csv) } else { Upload::Missing });
    }
    Ok(Upload::Missing)
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status).content_type(ContentType::html()).body(body)
}
