use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use campus_portal::api::{ApiClient, HttpApiClient};
use campus_portal::config::PortalConfig;
use campus_portal::error::AppError;
use campus_portal::list::{Entity, ListController};
use campus_portal::models::{ClassEntity, Department, Lecturer, Semester, Teaching, User};
use campus_portal::portal::StudentPortal;
use campus_portal::session::Session;
use campus_portal::shell::{HeadlessShell, Shell};

const USAGE: &str = "usage: campus-portal list <resource> [query] | campus-portal timetable [semester]";

struct Context {
    api: Arc<dyn ApiClient>,
    shell: Arc<dyn Shell>,
    session: Arc<Session>,
}

async fn list<E: Entity>(ctx: &Context, query: &str) -> Result<Value, AppError> {
    let controller =
        ListController::<E>::new(ctx.api.clone(), ctx.shell.clone(), ctx.session.clone());
    let total = controller.activate().await?;
    controller.apply_filter(query);
    let filtered = controller.filtered();
    info!("{}: {} of {} records match", E::RESOURCE, filtered.len(), total);
    Ok(serde_json::to_value(filtered)?)
}

async fn run(ctx: &Context, config: &PortalConfig, args: &[String]) -> Result<Value, AppError> {
    let arg = |i: usize| args.get(i).map(String::as_str);
    match arg(0) {
        Some("list") => {
            let query = arg(2).unwrap_or_default();
            match arg(1) {
                Some("classes") => list::<ClassEntity>(ctx, query).await,
                Some("departments") => list::<Department>(ctx, query).await,
                Some("semesters") => list::<Semester>(ctx, query).await,
                Some("lecturers") => list::<Lecturer>(ctx, query).await,
                Some("teachings") => list::<Teaching>(ctx, query).await,
                Some("user" | "users") => list::<User>(ctx, query).await,
                Some(other) => Err(AppError::NotFound(format!("unknown resource {}", other))),
                None => Err(AppError::Config(USAGE.to_string())),
            }
        }
        Some("timetable") => {
            let semester = arg(1).unwrap_or(&config.default_semester);
            let portal = StudentPortal::new(ctx.api.clone(), ctx.shell.clone());
            let timetable = portal.schedule(semester).await?;
            Ok(serde_json::to_value(timetable.events)?)
        }
        _ => Err(AppError::Config(USAGE.to_string())),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "campus_portal=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = PortalConfig::new_from_env()?;
    info!("using API at {}", config.api_base_url);

    let session = Arc::new(Session::new());
    if let Ok(token) = std::env::var("PORTAL_TOKEN") {
        session.set_token(token);
    }

    let ctx = Context {
        api: Arc::new(HttpApiClient::new(&config, session.clone())?),
        shell: Arc::new(HeadlessShell { auto_confirm: false }),
        session,
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&ctx, &config, &args).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e.into())
        }
    }
}
