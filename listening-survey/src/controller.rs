//! The survey-taking state machine.

use std::{cmp::Ordering, collections::HashMap, fmt};

use listening_survey_types::{
    Ack, Clock, Dialog, Item, ItemRenderer, Questionnaire, Settings, SubmitError, Submitter,
    SurveyError, SystemClock, TestKind, Validator, validate_item,
};
use tracing::{debug, info, warn};

use crate::{OpenedPanel, PanelAction, PanelChange};

/// Title of the dialog shown when navigation is blocked.
const REQUIRED_TITLE: &str = "Required";

/// Whether a survey is being taken or reviewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Answers can change and the questionnaire can be submitted.
    Interactive(TestKind),
    /// A pre-filled response is shown; submitting is disabled.
    ReadOnly,
}

/// Progress of the submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    /// Handed to the submitter, no answer yet.
    InFlight,
    /// The submitter accepted the response.
    Accepted,
    /// The submitter refused; submitting again is allowed.
    Rejected(String),
}

/// What the caller should do after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Leave the survey for the finish page.
    Finished(Ack),
    /// Stay on the page (no-redirect mode), e.g. to inspect the payload.
    StayOnPage(Ack),
}

/// A questionnaire handed out for submission, awaiting its result.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub kind: TestKind,
    /// Snapshot of the questionnaire with answers and times.
    pub payload: Questionnaire,
}

impl SubmitOutcome {
    pub fn ack(&self) -> &Ack {
        match self {
            Self::Finished(ack) | Self::StayOnPage(ack) => ack,
        }
    }
}

/// Controller for one survey session.
///
/// Owns the questionnaire while it is being taken, the open panel, the
/// time each item was opened at, and the submission state.
pub struct SurveyController {
    questionnaire: Questionnaire,
    mode: Mode,
    opened: OpenedPanel,
    /// Item index -> wall-clock millis the item was last opened at.
    start_time: HashMap<usize, i64>,
    submit_state: SubmitState,
    no_redirect: bool,
    validator: Validator,
    clock: Box<dyn Clock>,
}

impl fmt::Debug for SurveyController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurveyController")
            .field("name", &self.questionnaire.name)
            .field("mode", &self.mode)
            .field("opened", &self.opened)
            .field("start_time", &self.start_time)
            .field("submit_state", &self.submit_state)
            .field("no_redirect", &self.no_redirect)
            .finish_non_exhaustive()
    }
}

impl SurveyController {
    /// Start taking a questionnaire of the given test kind.
    pub fn interactive(questionnaire: Questionnaire, kind: TestKind) -> Self {
        Self::new(questionnaire, Mode::Interactive(kind))
    }

    /// Review a submitted response. Answers are frozen and submit is disabled.
    pub fn read_only(questionnaire: Questionnaire) -> Self {
        Self::new(questionnaire, Mode::ReadOnly)
    }

    fn new(questionnaire: Questionnaire, mode: Mode) -> Self {
        let opened = if questionnaire.settings.is_individual {
            OpenedPanel::Cover
        } else if questionnaire.is_empty() {
            OpenedPanel::Closed
        } else {
            OpenedPanel::Item(0)
        };

        let mut controller = Self {
            questionnaire,
            mode,
            opened,
            start_time: HashMap::new(),
            submit_state: SubmitState::Idle,
            no_redirect: false,
            validator: Box::new(validate_item),
            clock: Box::new(SystemClock),
        };
        controller.start_initial_clock();
        controller
    }

    /// Replace the validator used for navigation and submit.
    pub fn with_validator(
        mut self,
        validator: impl Fn(&Item) -> Result<(), String> + 'static,
    ) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Use another clock for item timing.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self.start_time.clear();
        self.start_initial_clock();
        self
    }

    /// Stay on the page after a successful submission.
    pub fn with_no_redirect(mut self, no_redirect: bool) -> Self {
        self.no_redirect = no_redirect;
        self
    }

    /// The accordion opens on the first item without a transition, so its
    /// clock has to start here.
    fn start_initial_clock(&mut self) {
        if let OpenedPanel::Item(index) = self.opened
            && self.questionnaire.settings.is_timed
        {
            self.start_time.insert(index, self.clock.now_millis());
        }
    }

    // === Accessors ===

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    /// Give up the session and return the questionnaire with its answers.
    pub fn into_questionnaire(self) -> Questionnaire {
        self.questionnaire
    }

    pub fn settings(&self) -> Settings {
        self.questionnaire.settings
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_read_only(&self) -> bool {
        self.mode == Mode::ReadOnly
    }

    pub fn opened_panel(&self) -> OpenedPanel {
        self.opened
    }

    pub fn submit_state(&self) -> &SubmitState {
        &self.submit_state
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.questionnaire.item(index)
    }

    /// Mutable access for renderers. `None` in read-only mode and while a
    /// submission is in flight.
    pub fn item_mut(&mut self, index: usize) -> Option<&mut Item> {
        if self.submit_state == SubmitState::InFlight {
            return None;
        }
        match self.mode {
            Mode::Interactive(_) => self.questionnaire.items.get_mut(index),
            Mode::ReadOnly => None,
        }
    }

    /// Mutable access to the open item, if any.
    pub fn opened_item_mut(&mut self) -> Option<&mut Item> {
        let index = self.opened.index()?;
        self.item_mut(index)
    }

    /// Wall-clock millis at which the item was last opened (timed surveys).
    pub fn started_at(&self, index: usize) -> Option<i64> {
        self.start_time.get(&index).copied()
    }

    // === Presentation ===

    /// Check if the title and description are shown.
    pub fn cover_visible(&self) -> bool {
        !self.questionnaire.settings.is_individual || self.opened == OpenedPanel::Cover
    }

    /// Check if the panel at `index` is shown at all.
    pub fn is_visible(&self, index: usize) -> bool {
        index < self.questionnaire.len()
            && (!self.questionnaire.settings.is_individual || self.opened.index() == Some(index))
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.opened.index() == Some(index)
    }

    /// The button in the action slot of the panel at `index`.
    pub fn action_for(&self, index: usize) -> Option<PanelAction> {
        let last = self.questionnaire.last_index()?;
        match index.cmp(&last) {
            Ordering::Less => Some(PanelAction::Next),
            Ordering::Equal => Some(PanelAction::Submit {
                enabled: self.submit_enabled(),
            }),
            Ordering::Greater => None,
        }
    }

    /// Check if the submit action can be used.
    pub fn submit_enabled(&self) -> bool {
        matches!(self.mode, Mode::Interactive(_))
            && matches!(
                self.submit_state,
                SubmitState::Idle | SubmitState::Rejected(_)
            )
    }

    /// Stepper position and step count.
    pub fn progress(&self) -> (Option<i64>, usize) {
        (self.opened.step(), self.questionnaire.len())
    }

    // === Navigation ===

    /// Request opening `target` (`want_open`) or collapsing the open panel.
    ///
    /// The open item is validated first, whatever the direction. If it fails,
    /// a blocking dialog is shown and the panel stays where it is.
    pub fn request_open(
        &mut self,
        target: usize,
        want_open: bool,
        dialog: &mut dyn Dialog,
    ) -> Result<PanelChange, SurveyError> {
        if want_open && target >= self.questionnaire.len() {
            return Err(SurveyError::NoSuchItem(target));
        }

        let individual = self.questionnaire.settings.is_individual;
        if individual && want_open && self.opened.successor() != Some(target) {
            debug!(
                from = ?self.opened,
                target,
                "ignoring non-forward request in individual mode"
            );
            return Ok(PanelChange::Unchanged);
        }

        if let Some(index) = self.opened.index()
            && let Err(message) = (self.validator)(&self.questionnaire.items[index])
        {
            info!(
                index,
                title = %self.questionnaire.items[index].title,
                %message,
                "navigation blocked by validation"
            );
            dialog.show_blocking(&message, REQUIRED_TITLE);
            return Ok(PanelChange::Blocked { index, message });
        }

        if want_open {
            let from = self.opened;
            self.opened = OpenedPanel::Item(target);
            if self.questionnaire.settings.is_timed {
                self.record_timing(from, target);
            }
            debug!(?from, to = target, "panel opened");
            Ok(PanelChange::Opened { from, to: target })
        } else if individual {
            Ok(PanelChange::Unchanged)
        } else {
            let index = self.opened.index();
            self.opened = OpenedPanel::Closed;
            debug!(?index, "panel collapsed");
            Ok(PanelChange::Collapsed { index })
        }
    }

    fn record_timing(&mut self, from: OpenedPanel, to: usize) {
        let now = self.clock.now_millis();
        self.start_time.insert(to, now);
        if let Some(previous) = from.index() {
            self.stop_clock(previous, now);
        }
    }

    fn stop_clock(&mut self, index: usize, now: i64) {
        let Some(started) = self.start_time.get(&index).copied() else {
            return;
        };
        let seconds = (now - started) as f64 / 1000.0;
        if let Some(item) = self.questionnaire.items.get_mut(index) {
            debug!(index, seconds, "item timed");
            item.time = Some(seconds);
        }
    }

    /// The "Next" button of the open panel.
    pub fn next(&mut self, dialog: &mut dyn Dialog) -> Result<PanelChange, SurveyError> {
        match self.opened.successor() {
            Some(target) => self.request_open(target, true, dialog),
            None => Ok(PanelChange::Unchanged),
        }
    }

    /// A click on the header of the panel at `index`.
    pub fn toggle(&mut self, index: usize, dialog: &mut dyn Dialog) -> Result<PanelChange, SurveyError> {
        let want_open = !self.is_open(index);
        self.request_open(index, want_open, dialog)
    }

    // === Answering ===

    /// Let `renderer` show the open item and collect its answers.
    ///
    /// Returns the index of the answered item, or `None` when no item panel
    /// is open. Renderer failures surface as [`SurveyError::Backend`].
    pub fn collect_open<R: ItemRenderer>(
        &mut self,
        renderer: &mut R,
    ) -> Result<Option<usize>, SurveyError> {
        let Some(index) = self.opened.index() else {
            return Ok(None);
        };
        if self.is_read_only() {
            return Err(SurveyError::ReadOnly);
        }
        if self.submit_state == SubmitState::InFlight {
            return Err(SurveyError::InFlight);
        }

        let item = self
            .questionnaire
            .items
            .get_mut(index)
            .ok_or(SurveyError::NoSuchItem(index))?;
        renderer.render(item, true).map_err(SurveyError::backend)?;
        renderer.collect(item).map_err(SurveyError::backend)?;
        debug!(index, "answers collected");
        Ok(Some(index))
    }

    // === Submission ===

    /// Validate every item and hand the questionnaire to the submitter.
    ///
    /// Equivalent to [`begin_submit`](Self::begin_submit), a call to the
    /// submitter and [`complete_submit`](Self::complete_submit).
    pub fn submit(
        &mut self,
        submitter: &mut dyn Submitter,
        dialog: &mut dyn Dialog,
    ) -> Result<SubmitOutcome, SurveyError> {
        let submission = self.begin_submit(dialog)?;
        let result = submitter.submit(submission.kind, &submission.payload);
        self.complete_submit(result)
    }

    /// Start a submission and return the payload to send.
    ///
    /// In individual mode this is only possible from the last item. Stops at
    /// the first invalid item, showing a dialog titled with the item's title.
    /// Refuses while another submission is in flight or after one was
    /// accepted. Answers are frozen until [`complete_submit`](Self::complete_submit).
    pub fn begin_submit(&mut self, dialog: &mut dyn Dialog) -> Result<Submission, SurveyError> {
        let kind = match self.mode {
            Mode::Interactive(kind) => kind,
            Mode::ReadOnly => return Err(SurveyError::ReadOnly),
        };
        match self.submit_state {
            SubmitState::InFlight => return Err(SurveyError::InFlight),
            SubmitState::Accepted => return Err(SurveyError::AlreadySubmitted),
            SubmitState::Idle | SubmitState::Rejected(_) => {}
        }
        if !self.at_submit_slot() {
            debug!(opened = ?self.opened, "submit requested away from the last item");
            return Err(SurveyError::NotAtLastItem);
        }

        for item in &self.questionnaire.items {
            if let Err(message) = (self.validator)(item) {
                let title = format!("{} Required", item.title);
                info!(item = %item.id, %message, "submission blocked by validation");
                dialog.show_blocking(&message, &title);
                return Err(SurveyError::Invalid { title, message });
            }
        }

        // The terminal item is left by submitting, not by a panel change.
        if self.questionnaire.settings.is_timed
            && let Some(index) = self.opened.index()
        {
            let now = self.clock.now_millis();
            self.stop_clock(index, now);
        }

        self.submit_state = SubmitState::InFlight;
        info!(%kind, items = self.questionnaire.len(), "submitting response");
        Ok(Submission {
            kind,
            payload: self.questionnaire.clone(),
        })
    }

    /// Record the submitter's answer to the outstanding submission.
    pub fn complete_submit(
        &mut self,
        result: Result<Ack, SubmitError>,
    ) -> Result<SubmitOutcome, SurveyError> {
        if self.submit_state != SubmitState::InFlight {
            return Err(SurveyError::NothingInFlight);
        }
        match result {
            Ok(ack) => {
                self.submit_state = SubmitState::Accepted;
                info!(response = ?ack.response_id, "response accepted");
                if self.no_redirect {
                    Ok(SubmitOutcome::StayOnPage(ack))
                } else {
                    Ok(SubmitOutcome::Finished(ack))
                }
            }
            Err(err) => {
                warn!(error = %err, "response rejected");
                self.submit_state = SubmitState::Rejected(err.to_string());
                Err(SurveyError::Rejected(err))
            }
        }
    }

    /// Individual surveys submit from the last item's action slot; accordion
    /// surveys from anywhere. A survey without items has no slot.
    fn at_submit_slot(&self) -> bool {
        match self.questionnaire.last_index() {
            None => false,
            Some(last) => {
                !self.questionnaire.settings.is_individual || self.opened == OpenedPanel::Item(last)
            }
        }
    }

    /// Check every item without showing anything. Returns the first failure
    /// as `(index, message)`.
    pub fn first_invalid(&self) -> Option<(usize, String)> {
        self.questionnaire
            .items
            .iter()
            .enumerate()
            .find_map(|(index, item)| (self.validator)(item).err().map(|message| (index, message)))
    }
}

#[cfg(test)]
mod tests {
    use listening_survey_types::SurveyControl;

    use super::*;
    use crate::{ManualClock, RecordingDialog, RecordingSubmitter};

    fn questionnaire(settings: Settings, answered: &[bool]) -> Questionnaire {
        let items = answered
            .iter()
            .enumerate()
            .map(|(i, &answered)| {
                let control = SurveyControl::text(format!("Question {}", i + 1));
                let control = if answered { control.answered("yes") } else { control };
                Item::question(format!("q{i}"), format!("Item {}", i + 1), control)
            })
            .collect();
        Questionnaire::new("Test", items).with_settings(settings)
    }

    #[test]
    fn initial_panel_depends_on_mode() {
        let survey = SurveyController::interactive(
            questionnaire(Settings::new().individual(), &[true]),
            TestKind::AcrTest,
        );
        assert_eq!(survey.opened_panel(), OpenedPanel::Cover);
        assert!(survey.cover_visible());
        assert!(!survey.is_visible(0));

        let survey =
            SurveyController::interactive(questionnaire(Settings::new(), &[true]), TestKind::AcrTest);
        assert_eq!(survey.opened_panel(), OpenedPanel::Item(0));
        assert!(survey.cover_visible());
        assert!(survey.is_visible(0));

        let survey = SurveyController::interactive(questionnaire(Settings::new(), &[]), TestKind::AcrTest);
        assert_eq!(survey.opened_panel(), OpenedPanel::Closed);
    }

    #[test]
    fn collapse_in_accordion_closes_panel() {
        let mut dialog = RecordingDialog::new();
        let mut survey =
            SurveyController::interactive(questionnaire(Settings::new(), &[true, true]), TestKind::AbTest);

        let change = survey.toggle(0, &mut dialog).unwrap();
        assert_eq!(change, PanelChange::Collapsed { index: Some(0) });
        assert_eq!(survey.opened_panel(), OpenedPanel::Closed);

        // Nothing open, nothing to validate.
        let change = survey.toggle(1, &mut dialog).unwrap();
        assert_eq!(
            change,
            PanelChange::Opened {
                from: OpenedPanel::Closed,
                to: 1
            }
        );
        assert!(dialog.is_empty());
    }

    #[test]
    fn collapse_in_individual_mode_is_ignored() {
        let mut dialog = RecordingDialog::new();
        let mut survey = SurveyController::interactive(
            questionnaire(Settings::new().individual(), &[true, true]),
            TestKind::AbTest,
        );
        survey.next(&mut dialog).unwrap();

        let change = survey.toggle(0, &mut dialog).unwrap();
        assert_eq!(change, PanelChange::Unchanged);
        assert_eq!(survey.opened_panel(), OpenedPanel::Item(0));
    }

    #[test]
    fn collapse_still_validates_open_item() {
        let mut dialog = RecordingDialog::new();
        let mut survey =
            SurveyController::interactive(questionnaire(Settings::new(), &[false]), TestKind::AbTest);

        let change = survey.toggle(0, &mut dialog).unwrap();
        assert!(change.is_blocked());
        assert_eq!(survey.opened_panel(), OpenedPanel::Item(0));
        assert_eq!(dialog.shown()[0].1, "Required");
    }

    #[test]
    fn out_of_range_target_is_an_error() {
        let mut dialog = RecordingDialog::new();
        let mut survey =
            SurveyController::interactive(questionnaire(Settings::new(), &[true]), TestKind::AbTest);
        assert!(matches!(
            survey.request_open(5, true, &mut dialog),
            Err(SurveyError::NoSuchItem(5))
        ));
    }

    #[test]
    fn accordion_first_item_is_timed_from_construction() {
        let clock = ManualClock::new(10_000);
        let mut dialog = RecordingDialog::new();
        let mut survey = SurveyController::interactive(
            questionnaire(Settings::new().timed(), &[true, true]),
            TestKind::AcrTest,
        )
        .with_clock(clock.clone());

        assert_eq!(survey.started_at(0), Some(10_000));
        clock.advance(2_500);
        survey.toggle(1, &mut dialog).unwrap();
        assert_eq!(survey.item(0).unwrap().time, Some(2.5));
    }

    #[test]
    fn submit_times_the_terminal_item() {
        let clock = ManualClock::new(0);
        let mut dialog = RecordingDialog::new();
        let mut submitter = RecordingSubmitter::new();
        let mut survey = SurveyController::interactive(
            questionnaire(Settings::new().individual().timed(), &[true, true]),
            TestKind::AcrTest,
        )
        .with_clock(clock.clone());

        survey.next(&mut dialog).unwrap();
        clock.advance(1_000);
        survey.next(&mut dialog).unwrap();
        clock.advance(4_000);
        survey.submit(&mut submitter, &mut dialog).unwrap();

        let payload = &submitter.payloads()[0].1;
        assert_eq!(payload.items[0].time, Some(1.0));
        assert_eq!(payload.items[1].time, Some(4.0));
    }

    #[test]
    fn action_slots() {
        let survey =
            SurveyController::interactive(questionnaire(Settings::new(), &[true, true]), TestKind::AbTest);
        assert_eq!(survey.action_for(0), Some(PanelAction::Next));
        assert_eq!(survey.action_for(1), Some(PanelAction::Submit { enabled: true }));
        assert_eq!(survey.action_for(2), None);

        let review = SurveyController::read_only(questionnaire(Settings::new(), &[true, true]));
        assert_eq!(review.action_for(1), Some(PanelAction::Submit { enabled: false }));
    }

    #[test]
    fn custom_validator_is_used() {
        let mut dialog = RecordingDialog::new();
        let mut survey =
            SurveyController::interactive(questionnaire(Settings::new(), &[true, true]), TestKind::AbTest)
                .with_validator(|item| {
                    if item.id == "q0" {
                        Err("always wrong".to_string())
                    } else {
                        Ok(())
                    }
                });

        let change = survey.next(&mut dialog).unwrap();
        assert_eq!(
            change,
            PanelChange::Blocked {
                index: 0,
                message: "always wrong".into()
            }
        );
        assert_eq!(survey.first_invalid(), Some((0, "always wrong".to_string())));
    }

    #[test]
    fn individual_submit_needs_the_last_item() {
        let mut dialog = RecordingDialog::new();
        let mut submitter = RecordingSubmitter::new();
        let mut survey = SurveyController::interactive(
            questionnaire(Settings::new().individual(), &[true, true, true]),
            TestKind::AbTest,
        );

        // Cover, then a middle item.
        for _ in 0..2 {
            assert!(matches!(
                survey.submit(&mut submitter, &mut dialog),
                Err(SurveyError::NotAtLastItem)
            ));
            survey.next(&mut dialog).unwrap();
        }
        assert_eq!(survey.opened_panel(), OpenedPanel::Item(1));
        assert!(matches!(
            survey.submit(&mut submitter, &mut dialog),
            Err(SurveyError::NotAtLastItem)
        ));
        assert!(submitter.payloads().is_empty());
        assert!(dialog.is_empty());

        survey.next(&mut dialog).unwrap();
        survey.submit(&mut submitter, &mut dialog).unwrap();
        assert_eq!(submitter.payloads().len(), 1);
    }

    #[test]
    fn empty_questionnaire_cannot_be_submitted() {
        let mut dialog = RecordingDialog::new();
        let mut submitter = RecordingSubmitter::new();
        for settings in [Settings::new(), Settings::new().individual()] {
            let mut survey = SurveyController::interactive(questionnaire(settings, &[]), TestKind::AbTest);
            assert!(matches!(
                survey.submit(&mut submitter, &mut dialog),
                Err(SurveyError::NotAtLastItem)
            ));
        }
        assert!(submitter.payloads().is_empty());
    }

    #[test]
    fn accordion_submits_from_any_panel() {
        let mut dialog = RecordingDialog::new();
        let mut submitter = RecordingSubmitter::new();
        let mut survey =
            SurveyController::interactive(questionnaire(Settings::new(), &[true, true]), TestKind::AbTest);
        assert_eq!(survey.opened_panel(), OpenedPanel::Item(0));
        survey.submit(&mut submitter, &mut dialog).unwrap();
        assert_eq!(survey.submit_state(), &SubmitState::Accepted);
    }

    #[test]
    fn outstanding_submission_blocks_a_second_one() {
        let mut dialog = RecordingDialog::new();
        let mut submitter = RecordingSubmitter::new();
        let mut survey =
            SurveyController::interactive(questionnaire(Settings::new(), &[true]), TestKind::AcrTest);

        let submission = survey.begin_submit(&mut dialog).unwrap();
        assert_eq!(submission.kind, TestKind::AcrTest);
        assert_eq!(survey.submit_state(), &SubmitState::InFlight);
        assert!(!survey.submit_enabled());
        assert!(survey.item_mut(0).is_none());

        assert!(matches!(
            survey.submit(&mut submitter, &mut dialog),
            Err(SurveyError::InFlight)
        ));
        assert!(submitter.payloads().is_empty());

        let outcome = survey
            .complete_submit(Ok(Ack {
                response_id: Some("r1".into()),
            }))
            .unwrap();
        assert!(matches!(outcome, SubmitOutcome::Finished(_)));
        assert!(matches!(
            survey.complete_submit(Ok(Ack::default())),
            Err(SurveyError::NothingInFlight)
        ));
    }

    #[test]
    fn rejected_completion_reopens_submit() {
        let mut dialog = RecordingDialog::new();
        let mut survey =
            SurveyController::interactive(questionnaire(Settings::new(), &[true]), TestKind::AbTest);

        survey.begin_submit(&mut dialog).unwrap();
        let err = survey
            .complete_submit(Err(SubmitError::Refused("quota reached".into())))
            .unwrap_err();
        assert!(matches!(err, SurveyError::Rejected(_)));
        assert!(survey.submit_enabled());
        assert!(survey.item_mut(0).is_some());
        assert!(survey.begin_submit(&mut dialog).is_ok());
    }

    /// Answers every item with "ok", or fails once `broken` is set.
    #[derive(Default)]
    struct ScriptedRenderer {
        rendered: Vec<(String, bool)>,
        broken: bool,
    }

    impl ItemRenderer for ScriptedRenderer {
        type Error = std::io::Error;

        fn render(&mut self, item: &Item, active: bool) -> Result<(), Self::Error> {
            self.rendered.push((item.id.clone(), active));
            Ok(())
        }

        fn collect(&mut self, item: &mut Item) -> Result<(), Self::Error> {
            if self.broken {
                return Err(std::io::Error::other("terminal closed"));
            }
            for control in item.kind_mut().fields_mut() {
                control.value = Some("ok".into());
            }
            Ok(())
        }
    }

    #[test]
    fn collect_open_fills_the_open_item() {
        let mut dialog = RecordingDialog::new();
        let mut renderer = ScriptedRenderer::default();
        let mut survey = SurveyController::interactive(
            questionnaire(Settings::new().individual(), &[false, false]),
            TestKind::AbTest,
        );

        assert_eq!(survey.collect_open(&mut renderer).unwrap(), None);
        survey.next(&mut dialog).unwrap();
        assert_eq!(survey.collect_open(&mut renderer).unwrap(), Some(0));
        assert_eq!(renderer.rendered, [("q0".to_string(), true)]);
        assert!(survey.next(&mut dialog).unwrap().is_transition());
    }

    #[test]
    fn renderer_failure_becomes_backend_error() {
        let mut renderer = ScriptedRenderer {
            broken: true,
            ..ScriptedRenderer::default()
        };
        let mut survey =
            SurveyController::interactive(questionnaire(Settings::new(), &[false]), TestKind::AbTest);

        let err = survey.collect_open(&mut renderer).unwrap_err();
        assert!(matches!(err, SurveyError::Backend(_)));
        assert_eq!(err.to_string(), "Backend error: terminal closed");

        let mut review = SurveyController::read_only(questionnaire(Settings::new(), &[false]));
        assert!(matches!(
            review.collect_open(&mut renderer),
            Err(SurveyError::ReadOnly)
        ));
    }
}
