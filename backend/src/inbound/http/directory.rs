//! Directory page handlers.
//!
//! ```text
//! GET /   summary view (production): usernames only
//! GET /   detail view (development): usernames, names, passwords
//! ```
//!
//! Only one of the two handlers is mounted, chosen at startup from the
//! configured [`ViewMode`].

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, web};

use crate::domain::{DetailPage, SummaryPage, ViewMode};
use crate::inbound::http::error::PageResult;
use crate::inbound::http::state::HttpState;

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

/// Render the sorted list of usernames.
pub async fn summary_page(state: web::Data<HttpState>) -> PageResult<HttpResponse> {
    let usernames = state.directory.list_usernames().await?;
    let page = SummaryPage::from_usernames(usernames);
    let body = state.templates.render_summary(&page, state.chrome())?;
    Ok(html(body))
}

/// Render every user record, sorted by username.
pub async fn detail_page(state: web::Data<HttpState>) -> PageResult<HttpResponse> {
    let directory = state.directory.fetch_all_records().await?;
    let page = DetailPage::from_directory(directory);
    let body = state.templates.render_detail(&page, state.chrome())?;
    Ok(html(body))
}

/// Mount the handler for `mode` at `/`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_directory::domain::ViewMode;
/// use user_directory::inbound::http::directory::directory_routes;
///
/// let _app = App::new().configure(directory_routes(ViewMode::Summary));
/// ```
pub fn directory_routes(mode: ViewMode) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg| {
        match mode {
            ViewMode::Summary => cfg.route("/", web::get().to(summary_page)),
            ViewMode::Detail => cfg.route("/", web::get().to(detail_page)),
        };
    }
}
