use actix_web::{
    HttpResponse, get,
    http::header::{
        Charset, ContentDisposition, ContentType, DispositionParam, DispositionType,
        ExtendedValue,
    },
    web,
};
use serde_json::json;
use tokio::{fs, task};
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::{
    AppState,
    classify::classify,
    error::{AppError, io_error, join_error},
    models::files::{FileEntry, FileInfo, FileListResponse},
    resolve::resolve,
    scan::scan,
};

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(health)
        .service(list_files)
        .service(download_file);
}

#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "File Picker API",
        "endpoints": {
            "/files": "List all files",
            "/files/{fileId}": "Download a specific file"
        }
    }))
}

#[get("/healthz")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "file-picker",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/files")]
async fn list_files(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let root = state.files_root.clone();
    let entries = task::spawn_blocking(move || scan(&root))
        .await
        .map_err(join_error)??;

    let listing = classify(entries);
    debug!(
        available = listing.available.len(),
        unavailable = listing.unavailable.len(),
        "listed files"
    );

    Ok(HttpResponse::Ok().json(FileListResponse {
        available_files: listing.available.into_iter().map(to_file_info).collect(),
        not_available_files: listing.unavailable.into_iter().map(to_file_info).collect(),
    }))
}

// the tail pattern lets multi-segment identifiers reach the resolver
#[get("/files/{file_id:.*}")]
async fn download_file(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let identifier = path.into_inner();
    let root = state.files_root.clone();
    let resolved = task::spawn_blocking(move || resolve(&root, &identifier))
        .await
        .map_err(join_error)??;

    let file = fs::File::open(&resolved.path).await.map_err(io_error)?;
    let len = file.metadata().await.map_err(io_error)?.len();

    Ok(HttpResponse::Ok()
        .content_type(ContentType::octet_stream())
        .insert_header(attachment(resolved.file_name))
        .no_chunking(len)
        .streaming(ReaderStream::new(file)))
}

// names outside printable ASCII go in `filename*` with an ASCII fallback,
// a raw control byte would not form a valid header value
fn attachment(file_name: String) -> ContentDisposition {
    let printable = |ch: char| (' '..='~').contains(&ch);
    let mut parameters = Vec::new();
    if file_name.chars().all(printable) {
        parameters.push(DispositionParam::Filename(file_name));
    } else {
        let fallback: String = file_name
            .chars()
            .map(|ch| if printable(ch) { ch } else { '_' })
            .collect();
        parameters.push(DispositionParam::Filename(fallback));
        parameters.push(DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext("UTF-8".into()),
            language_tag: None,
            value: file_name.into_bytes(),
        }));
    }
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters,
    }
}

fn to_file_info(entry: FileEntry) -> FileInfo {
    FileInfo {
        id: entry.id,
        name: entry.name,
        size: entry.size_bytes,
        created_at: entry.created_at,
    }
}
