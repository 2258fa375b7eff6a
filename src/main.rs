//! Autolot client demo binary
//!
//! Drives the login and vehicle submission flows from the command line
//! against a running marketplace backend.

use anyhow::{anyhow, Result};
use autolot_client::{
    BufferedSink, ClientConfig, FileTokenStore, HttpSubmissionClient, InMemoryTokenStore,
    LoginFlow, Navigator, Severity, StagedFile, SubmissionOutcome, TokenStore, VehicleFlow,
};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Prints scheduled navigations instead of switching screens
struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&self, route: &str) {
        println!("-> navigating to {route}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "autolot_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::load()?;
    let credentials: Arc<dyn TokenStore> = match FileTokenStore::default_location() {
        Some(store) => Arc::new(store),
        None => Arc::new(InMemoryTokenStore::default()),
    };
    let api = HttpSubmissionClient::new(&config, credentials.clone())?;
    let sink = Arc::new(BufferedSink::default());

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("login") => {
            let [_, email, password] = args.as_slice() else {
                return Err(anyhow!("usage: autolot login <email> <password>"));
            };
            let mut flow = LoginFlow::new(
                api,
                credentials,
                sink.clone(),
                Arc::new(PrintNavigator),
            );
            flow.set_email(email);
            flow.set_password(password);
            report(flow.submit().await, &sink);
            if let Some(navigation) = flow.take_navigation() {
                // Let the scheduled navigation fire before exiting.
                let _ = navigation.await;
            }
        }
        Some("vehicle") => {
            let [_, model, price, city, phone, files @ ..] = args.as_slice() else {
                return Err(anyhow!(
                    "usage: autolot vehicle <model> <price> <city> <phone> [picture...]"
                ));
            };
            let mut flow = VehicleFlow::new(api, sink.clone());
            flow.set_car_model(model);
            flow.set_price(price.parse()?);
            flow.set_city(city);
            flow.set_phone(phone);
            if !files.is_empty() {
                flow.set_max_pictures(files.len() as u32);
                flow.add_pictures(stage(files)?)?;
            }
            report(flow.submit().await, &sink);
        }
        _ => {
            eprintln!("usage: autolot <login|vehicle> ...");
            std::process::exit(2);
        }
    }

    Ok(())
}

/// Read picture files from disk into staged attachments
fn stage(paths: &[String]) -> Result<Vec<StagedFile>> {
    paths
        .iter()
        .map(|path| {
            let bytes = std::fs::read(path)?;
            let name = Path::new(path)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("picture");
            Ok(StagedFile::new(name, content_type(name), bytes))
        })
        .collect()
}

fn content_type(file_name: &str) -> &'static str {
    match Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Print the outcome and drain pending toasts
fn report(outcome: SubmissionOutcome, sink: &BufferedSink) {
    if let SubmissionOutcome::Invalid(errors) = &outcome {
        for (field, message) in errors.iter() {
            eprintln!("{field}: {message}");
        }
    }
    while let Some(toast) = sink.pop() {
        match toast.severity {
            Severity::Success => println!("{}", toast.message),
            Severity::Error => eprintln!("{}", toast.message),
        }
    }
}
