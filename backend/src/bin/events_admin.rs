//! Terminal front-end for the admin events page.
//!
//! Each subcommand performs one page action (list, add, delete) against a
//! running events server, then prints the notifications and the grouped list.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use events_backend::admin::client::{EventsApi, HttpEventsApi};
use events_backend::admin::controller::AdminController;
use events_backend::admin::form::FormField;
use events_backend::admin::page::{AdminPage, NotificationKind};
use events_backend::config::AdminConfig;
use events_backend::database::models::{EventFilter, EventType};
use events_backend::services::image_upload::{CloudinaryUploader, ImageFile};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "events-admin", about = "Manage events from the terminal")]
struct Cli {
    /// Events API location (overrides EVENTS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token of an admin session (overrides EVENTS_API_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and print an access token
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Show events grouped by academic year
    List {
        /// Only fetch events of one filter, e.g. Year2023to2024
        #[arg(long)]
        filter: Option<EventFilter>,
    },
    /// Upload an image and create an event
    Add(AddArgs),
    /// Delete an event by id
    Delete { id: i64 },
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    name: String,
    /// Event date as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long, default_value_t = 0)]
    attended: i64,
    #[arg(long = "type", default_value = "Workshop")]
    event_type: EventType,
    #[arg(long)]
    organizer: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value = "Year2022to2023")]
    filter: EventFilter,
    /// Path of the image to upload
    #[arg(long)]
    image: PathBuf,
}

impl AddArgs {
    fn into_fields(self, image: ImageFile) -> Vec<FormField> {
        let mut fields = vec![
            FormField::Name(self.name),
            FormField::Attended(self.attended),
            FormField::Type(self.event_type),
            FormField::Organizer(self.organizer),
            FormField::Description(self.description),
            FormField::Filter(self.filter),
            FormField::Image(image),
        ];
        if let Some(date) = self.date {
            fields.push(FormField::Date(date));
        }
        fields
    }
}

fn print_notifications(page: &mut AdminPage) {
    for notification in page.drain_notifications() {
        match notification.kind {
            NotificationKind::Success => println!("[ok] {}", notification.message),
            NotificationKind::Error => eprintln!("[error] {}", notification.message),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AdminConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(token) = cli.token {
        config.api_token = Some(token);
    }

    let api = HttpEventsApi::new(config.api_url.as_str(), config.api_token.clone());
    let mut page = AdminPage::new();

    match cli.command {
        Command::Login { username, password } => {
            let login = api.login(&username, &password).await?;
            println!("{}", login.access_token);
            return Ok(());
        }
        Command::List { filter: Some(filter) } => {
            page.set_events(api.list_by_filter(filter).await?);
        }
        Command::List { filter: None } => {
            AdminController::without_uploader(api)
                .refresh(&mut page)
                .await?;
        }
        Command::Add(args) => {
            let uploader = CloudinaryUploader::new(
                config.image_host_base_url.as_str(),
                config.require_cloud_name()?,
            );
            let image = ImageFile::read(&args.image)
                .await
                .with_context(|| format!("Failed to read image {}", args.image.display()))?;

            let controller = AdminController::new(api, uploader);
            controller.refresh(&mut page).await?;
            page.open_form(Local::now().date_naive());
            for field in args.into_fields(image) {
                page.edit(field);
            }

            let result = controller.submit(&mut page).await;
            print_notifications(&mut page);
            result?;
        }
        Command::Delete { id } => {
            let controller = AdminController::without_uploader(api);
            controller.refresh(&mut page).await?;
            let result = controller.delete(&mut page, id).await;
            print_notifications(&mut page);
            result?;
        }
    }

    print!("{}", page.render());
    Ok(())
}
