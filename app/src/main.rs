use students_app::{console, Session, UreqTransport};
use tracing_subscriber::EnvFilter;

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "students_app=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let base_url =
        std::env::var("STUDENTS_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
    tracing::info!(%base_url, "starting student-records client");

    let session = Session::new(&base_url, UreqTransport::new(), console::ConsoleIo);
    console::run(session)
}
