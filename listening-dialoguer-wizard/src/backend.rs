//! Dialoguer front-end driving a [`SurveyController`].

use dialoguer::{
    Confirm, Input, MultiSelect, Select,
    theme::{ColorfulTheme, SimpleTheme, Theme},
};
use listening_survey::{
    AudioFile, ControlKind, Dialog, Item, ItemKind, ItemRenderer, PanelAction, SubmitOutcome,
    Submitter, SurveyController, SurveyControl, SurveyError,
};
use thiserror::Error;
use tracing::{debug, warn};

/// Error type for the Dialoguer front-end.
#[derive(Debug, Error)]
pub enum DialoguerError {
    /// User cancelled the survey (e.g., pressed Ctrl+C or Escape).
    #[error("Survey cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// The questionnaire has nothing to answer.
    #[error("Questionnaire has no items")]
    Empty,

    /// The survey controller refused an action.
    #[error(transparent)]
    Survey(#[from] SurveyError),
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn prompt_error(err: dialoguer::Error) -> DialoguerError {
    if is_cancelled(&err) {
        DialoguerError::Cancelled
    } else {
        DialoguerError::Dialoguer(err)
    }
}

/// How a terminal session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The questionnaire was submitted.
    Submitted(SubmitOutcome),
    /// A read-only response was walked through.
    Reviewed,
}

/// Dialoguer front-end for taking surveys in a terminal.
///
/// Individual surveys are walked item by item after a cover step;
/// accordion surveys show a menu of panel headers.
#[derive(Debug, Default, Clone)]
pub struct DialoguerBackend {
    /// Use colorful theme for prompts.
    colorful: bool,
}

impl DialoguerBackend {
    /// Create a new Dialoguer front-end with default (colorful) theme.
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Create a front-end with plain (no color) theme.
    pub fn plain() -> Self {
        Self { colorful: false }
    }

    /// The renderer used for items.
    pub fn renderer(&self) -> TerminalRenderer {
        TerminalRenderer {
            colorful: self.colorful,
        }
    }

    fn theme(&self) -> Box<dyn Theme> {
        if self.colorful {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        }
    }

    /// Run a survey session to its end.
    ///
    /// Interactive surveys end once the submitter accepted the response;
    /// read-only surveys end after every item was shown.
    pub fn run(
        &self,
        survey: &mut SurveyController,
        submitter: &mut dyn Submitter,
    ) -> Result<RunOutcome, DialoguerError> {
        if survey.questionnaire().is_empty() {
            return Err(DialoguerError::Empty);
        }

        if survey.is_read_only() {
            self.review(survey)?;
            return Ok(RunOutcome::Reviewed);
        }

        let mut renderer = self.renderer();
        let mut dialog = TerminalDialog;

        if survey.settings().is_individual {
            self.run_individual(survey, submitter, &mut renderer, &mut dialog)
        } else {
            self.run_accordion(survey, submitter, &mut renderer, &mut dialog)
        }
    }

    /// Print every item with its recorded answers, without prompting.
    pub fn review(&self, survey: &SurveyController) -> Result<(), DialoguerError> {
        let mut renderer = self.renderer();
        print_cover(survey);
        for item in survey.questionnaire().items() {
            renderer.render(item, false)?;
        }
        Ok(())
    }

    fn run_individual(
        &self,
        survey: &mut SurveyController,
        submitter: &mut dyn Submitter,
        renderer: &mut TerminalRenderer,
        dialog: &mut TerminalDialog,
    ) -> Result<RunOutcome, DialoguerError> {
        print_cover(survey);
        if !self.confirm("Next")? {
            return Err(DialoguerError::Cancelled);
        }
        survey.next(dialog)?;

        loop {
            let Some(index) = survey.opened_panel().index() else {
                return Err(DialoguerError::Empty);
            };
            answer(survey, renderer)?;

            match survey.action_for(index) {
                Some(PanelAction::Next) => {
                    survey.next(dialog)?;
                }
                Some(PanelAction::Submit { .. }) => {
                    if let Some(outcome) = self.try_submit(survey, submitter, dialog)? {
                        return Ok(RunOutcome::Submitted(outcome));
                    }
                }
                None => return Err(SurveyError::NoSuchItem(index).into()),
            }
        }
    }

    fn run_accordion(
        &self,
        survey: &mut SurveyController,
        submitter: &mut dyn Submitter,
        renderer: &mut TerminalRenderer,
        dialog: &mut TerminalDialog,
    ) -> Result<RunOutcome, DialoguerError> {
        print_cover(survey);
        let theme = self.theme();

        loop {
            let opened = survey.opened_panel().index();
            let mut entries: Vec<String> = survey
                .questionnaire()
                .items()
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    let marker = if opened == Some(index) { "▾" } else { "▸" };
                    format!("{marker} {}", item.title)
                })
                .collect();

            // The submit button lives in the last panel's action slot.
            let submit_entry = entries.len();
            let last_open = opened.is_some() && opened == survey.questionnaire().last_index();
            if last_open {
                entries.push("Submit".to_string());
            }

            let choice = Select::with_theme(theme.as_ref())
                .with_prompt("Open a panel")
                .items(&entries)
                .default(opened.unwrap_or(0))
                .interact_opt()
                .map_err(prompt_error)?
                .ok_or(DialoguerError::Cancelled)?;

            if last_open && choice == submit_entry {
                if let Some(outcome) = self.try_submit(survey, submitter, dialog)? {
                    return Ok(RunOutcome::Submitted(outcome));
                }
            } else if opened == Some(choice) {
                answer(survey, renderer)?;
            } else if survey.toggle(choice, dialog)?.is_transition() {
                answer(survey, renderer)?;
            }
        }
    }

    /// Submit, keeping the session alive on recoverable failures.
    fn try_submit(
        &self,
        survey: &mut SurveyController,
        submitter: &mut dyn Submitter,
        dialog: &mut TerminalDialog,
    ) -> Result<Option<SubmitOutcome>, DialoguerError> {
        match survey.submit(submitter, dialog) {
            Ok(outcome) => Ok(Some(outcome)),
            Err(SurveyError::Invalid { .. }) => Ok(None),
            Err(SurveyError::Rejected(err)) => {
                println!("Error: {err}");
                if self.confirm("Try submitting again?")? {
                    Ok(None)
                } else {
                    Err(SurveyError::Rejected(err).into())
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    fn confirm(&self, prompt: &str) -> Result<bool, DialoguerError> {
        let theme = self.theme();
        Confirm::with_theme(theme.as_ref())
            .with_prompt(prompt)
            .default(true)
            .interact()
            .map_err(prompt_error)
    }
}

fn print_cover(survey: &SurveyController) {
    let questionnaire = survey.questionnaire();
    println!("{}", questionnaire.name);
    if !questionnaire.description.is_empty() {
        println!("{}", questionnaire.description);
    }
    println!();
}

/// Answer the open item, keeping prompt failures (cancellation included)
/// as the front-end's own errors.
fn answer(
    survey: &mut SurveyController,
    renderer: &mut TerminalRenderer,
) -> Result<(), DialoguerError> {
    survey.collect_open(renderer).map(drop).map_err(unwrap_renderer_error)
}

fn unwrap_renderer_error(err: SurveyError) -> DialoguerError {
    match err {
        SurveyError::Backend(err) => match err.downcast::<DialoguerError>() {
            Ok(err) => err,
            Err(err) => SurveyError::Backend(err).into(),
        },
        err => err.into(),
    }
}

/// [`Dialog`] that prints blocking messages before the next prompt.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalDialog;

impl Dialog for TerminalDialog {
    fn show_blocking(&mut self, message: &str, title: &str) {
        warn!(title, message, "blocking dialog");
        eprintln!("{title}: {message}");
    }
}

/// [`ItemRenderer`] prompting for answers with dialoguer.
#[derive(Debug, Default, Clone)]
pub struct TerminalRenderer {
    colorful: bool,
}

impl TerminalRenderer {
    fn theme(&self) -> Box<dyn Theme> {
        if self.colorful {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        }
    }

    fn ask_control(&self, control: &mut SurveyControl) -> Result<(), DialoguerError> {
        let theme = self.theme();
        let prompt = control.question.clone();

        match control.kind {
            ControlKind::Description => {
                println!("{prompt}");
            }
            ControlKind::Radio => {
                let default = control
                    .answer()
                    .and_then(|answer| control.options.iter().position(|o| o == answer))
                    .unwrap_or(0);
                let selection = Select::with_theme(theme.as_ref())
                    .with_prompt(&prompt)
                    .items(&control.options)
                    .default(default)
                    .interact_opt()
                    .map_err(prompt_error)?
                    .ok_or(DialoguerError::Cancelled)?;
                control.value = control.options.get(selection).cloned();
            }
            ControlKind::Checkbox => {
                let defaults: Vec<bool> = control
                    .options
                    .iter()
                    .map(|option| control.checked().any(|entry| entry == option))
                    .collect();
                let selections = MultiSelect::with_theme(theme.as_ref())
                    .with_prompt(&prompt)
                    .items(&control.options)
                    .defaults(&defaults)
                    .interact()
                    .map_err(prompt_error)?;
                let picked: Vec<&str> = selections
                    .iter()
                    .filter_map(|&index| control.options.get(index).map(String::as_str))
                    .collect();
                control.value = Some(picked.join(", "));
            }
            ControlKind::Text => {
                let value: String = Input::with_theme(theme.as_ref())
                    .with_prompt(&prompt)
                    .with_initial_text(control.value.clone().unwrap_or_default())
                    .allow_empty(!control.required)
                    .interact_text()
                    .map_err(prompt_error)?;
                control.value = Some(value);
            }
            ControlKind::Slider => {
                let value: f64 = Input::with_theme(theme.as_ref())
                    .with_prompt(&prompt)
                    .interact_text()
                    .map_err(prompt_error)?;
                control.value = Some(value.to_string());
            }
        }
        Ok(())
    }

    fn ask_score(&self, audio: &mut AudioFile) -> Result<(), DialoguerError> {
        let theme = self.theme();
        loop {
            let mut builder = Input::<f64>::with_theme(theme.as_ref())
                .with_prompt(format!("Score for {} (1-5)", audio.filename));
            if let Some(score) = audio.score {
                builder = builder.default(score);
            }

            let score = builder.interact_text().map_err(prompt_error)?;
            if !(1.0..=5.0).contains(&score) {
                println!("Error: Score must be between 1 and 5");
                continue;
            }
            audio.score = Some(score);
            return Ok(());
        }
    }

    fn ask_fields(&self, fields: &mut [SurveyControl]) -> Result<(), DialoguerError> {
        for control in fields {
            self.ask_control(control)?;
        }
        Ok(())
    }
}

impl ItemRenderer for TerminalRenderer {
    type Error = DialoguerError;

    fn render(&mut self, item: &Item, active: bool) -> Result<(), Self::Error> {
        let marker = if active { "▾" } else { "▸" };
        println!("{marker} {}", item.title);
        if !active {
            for line in summarize(item) {
                println!("    {line}");
            }
        }
        Ok(())
    }

    fn collect(&mut self, item: &mut Item) -> Result<(), Self::Error> {
        debug!(item = %item.id, "collecting answers");
        match item.kind_mut() {
            ItemKind::Question { control } => self.ask_control(control),
            ItemKind::AcrExample { example } => {
                if let Some(reference) = &example.audio_ref {
                    println!("Reference: {}", reference.url);
                }
                for audio in &mut example.audios {
                    println!("Sample: {}", audio.url);
                    self.ask_score(audio)?;
                }
                self.ask_fields(&mut example.fields)
            }
            ItemKind::AbExample { example } => {
                if let Some(reference) = &example.audio_ref {
                    println!("Reference: {}", reference.url);
                }
                let names: Vec<&str> = example
                    .audios
                    .iter()
                    .map(|audio| audio.filename.as_str())
                    .collect();
                let theme = self.theme();
                let choice = Select::with_theme(theme.as_ref())
                    .with_prompt("Which sample do you prefer?")
                    .items(&names)
                    .default(example.choice.unwrap_or(0))
                    .interact_opt()
                    .map_err(prompt_error)?
                    .ok_or(DialoguerError::Cancelled)?;
                example.choice = Some(choice);
                self.ask_fields(&mut example.fields)
            }
            ItemKind::Training { example } => {
                for audio in &example.audios {
                    println!("Sample: {}", audio.url);
                }
                self.ask_fields(&mut example.fields)
            }
        }
    }
}

/// One line per recorded answer of an item, for read-only display.
pub fn summarize(item: &Item) -> Vec<String> {
    let mut lines = Vec::new();
    match item.kind() {
        ItemKind::Question { .. } | ItemKind::Training { .. } => {}
        ItemKind::AcrExample { example } => {
            for audio in &example.audios {
                let score = audio
                    .score
                    .map_or_else(|| "-".to_string(), |score| score.to_string());
                lines.push(format!("{}: {score}", audio.filename));
            }
        }
        ItemKind::AbExample { example } => {
            let chosen = example
                .choice
                .and_then(|choice| example.audios.get(choice))
                .map_or("-", |audio| audio.filename.as_str());
            lines.push(format!("Preferred: {chosen}"));
        }
    }
    for control in item.kind().fields() {
        if control.kind != ControlKind::Description {
            lines.push(format!("{}: {}", control.question, control.answer().unwrap_or("-")));
        }
    }
    if let Some(time) = item.time {
        lines.push(format!("Time: {time:.1}s"));
    }
    lines
}
