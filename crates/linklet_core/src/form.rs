use std::fmt;

use crate::link::{CreateLinkRequest, CreateLinkResult, LinkSummary, SubmissionId};
use crate::validate::{validate_custom_code, validate_url, CodeError};

/// Shown for any creation failure whose cause the client cannot infer.
pub const GENERIC_CREATE_FAILURE: &str = "Failed to create link. Please try again.";
/// Shown for a 400 that carried no message of its own.
pub const INVALID_INPUT_FALLBACK: &str = "Invalid input data";

const INVALID_URL_MESSAGE: &str = "Please enter a valid URL";
const CODE_TAKEN_MESSAGE: &str = "This custom code is already taken. Please try a different one.";

/// Why a submission ended in [`FormPhase::Failed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Local: the URL field is not an absolute URL.
    InvalidUrl,
    /// Local: the custom code failed format or length checks.
    InvalidCode(CodeError),
    /// Remote: the service refused the input, message shown verbatim.
    Rejected(String),
    /// Remote: the custom code belongs to another link.
    CodeTaken,
}

impl Failure {
    pub fn message(&self) -> &str {
        match self {
            Failure::InvalidUrl => INVALID_URL_MESSAGE,
            Failure::InvalidCode(err) => err.message(),
            Failure::Rejected(reason) => reason,
            Failure::CodeTaken => CODE_TAKEN_MESSAGE,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting {
        submission: SubmissionId,
    },
    Succeeded,
    Failed(Failure),
    DuplicateFound(LinkSummary),
}

pub(crate) enum SubmitAttempt {
    Started {
        submission: SubmissionId,
        request: CreateLinkRequest,
    },
    Invalid(Failure),
    /// A submission is already in flight.
    Busy,
}

pub(crate) enum Finished {
    Created,
    Duplicate,
    Failed(String),
}

/// The link creation form and its submission state machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    url: String,
    custom_code: String,
    phase: FormPhase,
    created_short_url: Option<String>,
    last_submission: SubmissionId,
}

impl FormState {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn custom_code(&self) -> &str {
        &self.custom_code
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// Short URL of the last success; survives edits until the next submission.
    pub fn created_short_url(&self) -> Option<&str> {
        self.created_short_url.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, FormPhase::Submitting { .. })
    }

    pub fn code_error(&self) -> Option<CodeError> {
        validate_custom_code(&self.custom_code)
    }

    pub fn can_submit(&self) -> bool {
        !self.url.is_empty() && self.code_error().is_none() && !self.is_submitting()
    }

    pub(crate) fn edit_url(&mut self, value: String) {
        self.url = value;
        self.return_to_idle();
    }

    pub(crate) fn edit_custom_code(&mut self, value: String) {
        self.custom_code = value;
        self.return_to_idle();
    }

    // Inputs are locked while a submission is in flight, so editing then only
    // updates the text.
    fn return_to_idle(&mut self) {
        if !self.is_submitting() {
            self.phase = FormPhase::Idle;
        }
    }

    pub(crate) fn submit(&mut self) -> SubmitAttempt {
        if self.is_submitting() {
            return SubmitAttempt::Busy;
        }
        let failure = if !validate_url(&self.url) {
            Some(Failure::InvalidUrl)
        } else {
            validate_custom_code(&self.custom_code).map(Failure::InvalidCode)
        };
        if let Some(failure) = failure {
            self.phase = FormPhase::Failed(failure.clone());
            return SubmitAttempt::Invalid(failure);
        }

        self.last_submission += 1;
        let submission = self.last_submission;
        self.phase = FormPhase::Submitting { submission };
        self.created_short_url = None;
        SubmitAttempt::Started {
            submission,
            request: CreateLinkRequest::from_input(&self.url, &self.custom_code),
        }
    }

    /// Applies a creation result. Returns `None` when the result does not
    /// belong to the in-flight submission and was discarded.
    pub(crate) fn finish(
        &mut self,
        submission: SubmissionId,
        result: CreateLinkResult,
    ) -> Option<Finished> {
        match self.phase {
            FormPhase::Submitting { submission: pending } if pending == submission => {}
            _ => return None,
        }

        let finished = match result {
            CreateLinkResult::Created(link) => {
                self.succeed_with(link.short_url);
                Finished::Created
            }
            CreateLinkResult::DuplicateUrl { existing_link } => {
                self.phase = FormPhase::DuplicateFound(existing_link);
                Finished::Duplicate
            }
            CreateLinkResult::CodeTaken => self.fail(Failure::CodeTaken),
            CreateLinkResult::ValidationFailed { reason } => self.fail(Failure::Rejected(reason)),
        };
        Some(finished)
    }

    /// Adopts the link offered by a duplicate-URL conflict.
    pub(crate) fn adopt_existing(&mut self) -> bool {
        match std::mem::take(&mut self.phase) {
            FormPhase::DuplicateFound(existing) => {
                self.succeed_with(existing.short_url);
                true
            }
            other => {
                self.phase = other;
                false
            }
        }
    }

    fn succeed_with(&mut self, short_url: String) {
        self.created_short_url = Some(short_url);
        self.url.clear();
        self.custom_code.clear();
        self.phase = FormPhase::Succeeded;
    }

    fn fail(&mut self, failure: Failure) -> Finished {
        let message = failure.message().to_string();
        self.phase = FormPhase::Failed(failure);
        Finished::Failed(message)
    }
}
