//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use user_directory::Trace;
use user_directory::domain::ViewMode;
use user_directory::inbound::http::directory::directory_routes;
use user_directory::inbound::http::state::HttpState;

fn build_app(
    http_state: web::Data<HttpState>,
    mode: ViewMode,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(http_state)
        .wrap(Trace)
        .configure(directory_routes(mode))
}

/// Construct an Actix HTTP server serving the configured directory page.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(http_state: HttpState, config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig { bind_addr, mode } = config;
    let http_state = web::Data::new(http_state);

    let server = HttpServer::new(move || build_app(http_state.clone(), mode))
        .bind(bind_addr)?
        .run();
    Ok(server)
}
