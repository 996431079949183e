use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use shared::domain::ContactField;
use site_controller::{HttpRelayClient, SiteController, SubmitOutcome};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a contact message the same way the site's form does.
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let transport = HttpRelayClient::new(&cli.server_url)?;

    match cli.command {
        Command::Send {
            name,
            email,
            phone,
            subject,
            message,
        } => {
            let mut page = SiteController::default();
            let form = page.form_mut();
            form.set(ContactField::Name, name);
            form.set(ContactField::Email, email);
            form.set(ContactField::Phone, phone);
            form.set(ContactField::Subject, subject);
            form.set(ContactField::Message, message);

            let outcome = page.submit_contact_form(&transport).await;
            if let Some(notification) = page.notifications().latest() {
                println!("{}", notification.message);
            }

            match outcome {
                SubmitOutcome::Sent => {}
                SubmitOutcome::Invalid => {
                    let blank: Vec<&str> = page
                        .form()
                        .invalid_fields()
                        .map(ContactField::as_str)
                        .collect();
                    bail!("blank fields: {}", blank.join(", "));
                }
                SubmitOutcome::Failed => {
                    bail!("relay at {} did not deliver the message", cli.server_url)
                }
            }
        }
    }

    Ok(())
}
