use anyhow::{Context, bail};
use clap::Parser;
use listening_dialoguer_wizard::{DialoguerBackend, RunOutcome, summarize};
use listening_survey::{SubmitOutcome, SurveyController, SurveyPage, TestKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod store;

use cli::{Cli, Command};
use config::{Settings, load_settings};
use store::{JsonFileLoader, JsonFileSubmitter, read_response};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let backend = if settings.colorful && !cli.plain {
        DialoguerBackend::new()
    } else {
        DialoguerBackend::plain()
    };

    match cli.command {
        Command::Take { kind, id } => take(&backend, &settings, cli.no_redirect, kind, &id),
        Command::Review { file } => {
            let page = SurveyPage::review(read_response(&file)?);
            let survey = page.into_result().map_err(anyhow::Error::msg)?;
            backend.review(&survey)?;
            Ok(())
        }
        Command::Check { kind, id } => check(&settings, kind, &id),
    }
}

fn take(
    backend: &DialoguerBackend,
    settings: &Settings,
    no_redirect: bool,
    kind: TestKind,
    id: &str,
) -> anyhow::Result<()> {
    let loader = JsonFileLoader::new(&settings.data_dir);
    let page = SurveyPage::open(&loader, kind, id);
    let mut survey = page
        .into_result()
        .map_err(anyhow::Error::msg)?
        .with_no_redirect(no_redirect || settings.no_redirect);

    let mut submitter = JsonFileSubmitter::new(&settings.output_dir);
    match backend.run(&mut survey, &mut submitter)? {
        RunOutcome::Submitted(SubmitOutcome::Finished(ack)) => {
            info!(response = ?ack.response_id, "survey finished");
            println!("Thank you! Your response has been recorded.");
        }
        RunOutcome::Submitted(SubmitOutcome::StayOnPage(ack)) => {
            println!(
                "Response {} recorded.",
                ack.response_id.as_deref().unwrap_or("-")
            );
            print_answers(&survey);
        }
        RunOutcome::Reviewed => {}
    }
    Ok(())
}

fn print_answers(survey: &SurveyController) {
    for item in survey.questionnaire().items() {
        println!("{}", item.title);
        for line in summarize(item) {
            println!("    {line}");
        }
    }
}

fn check(settings: &Settings, kind: TestKind, id: &str) -> anyhow::Result<()> {
    let loader = JsonFileLoader::new(&settings.data_dir);
    let survey = SurveyPage::open(&loader, kind, id)
        .into_result()
        .map_err(anyhow::Error::msg)?;

    match survey.first_invalid() {
        Some((index, message)) => {
            let title = survey
                .item(index)
                .map(|item| item.title.as_str())
                .unwrap_or_default();
            warn!(index, title, %message, "questionnaire does not validate");
            bail!("{title}: {message}");
        }
        None => {
            println!("ok");
            Ok(())
        }
    }
}
