use actix_web::{
    middleware::{Compress, Logger},
    web, App, HttpServer,
};
use clap::Parser;
use dotenv::dotenv;

use studies_portal::{
    api,
    config::Config,
    database::CredentialStore,
    middleware::SecurityHeaders,
    services::CredentialService,
    views::{self, ViewRenderer},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::parse();

    log::info!("🚀 Starting Studies Portal...");
    log::info!("📂 Credentials file: {}", config.data_file.display());
    log::info!("🔑 Password scheme: {:?}", config.password_scheme);

    match views::provision_templates(&config.templates_dir) {
        Ok(written) => {
            for path in written {
                log::info!("🖼️  Wrote default view {}", path.display());
            }
        }
        Err(e) => log::warn!(
            "⚠️  Could not provision {}: {} (built-in views will be used)",
            config.templates_dir.display(),
            e
        ),
    }

    let views_data = web::Data::new(ViewRenderer::from_dir(&config.templates_dir));
    let credentials_data = web::Data::new(CredentialService::new(
        CredentialStore::new(&config.data_file),
        config.password_scheme,
    ));

    let (host, port) = config.bind_address();
    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(credentials_data.clone())
            .app_data(views_data.clone())
            .wrap(SecurityHeaders)
            .wrap(Compress::default())
            .wrap(Logger::default())
            .configure(api::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
