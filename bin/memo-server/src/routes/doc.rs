use crate::routes::{health, notes};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "memo-server",
    description = "memo-server API",
    version = "0.1.0",
    contact(name = "memo-rs", url = "https://github.com/Cyberhan123/memo.rs")
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(notes::NotesApi::openapi());
    root
}
