//! Calculator session: recompute on every parameter change, gate the full
//! schedule behind a contact request
//!
//! States run Idle -> Computed -> AwaitingContactInfo -> ScheduleRevealed.
//! The engine runs once per parameter change. Later transitions only change
//! what is visible and never recompute.

use serde::{Deserialize, Serialize};

use crate::error::{ParameterError, WorkflowError};
use crate::loan::LoanParameters;
use crate::schedule::{ScheduleEngine, ScheduleResult};

/// Where the session is in the reveal flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No usable schedule
    Idle,
    /// Schedule computed, summary visible
    Computed,
    /// Full schedule requested, waiting for contact details
    AwaitingContactInfo,
    /// Contact details received, full schedule visible
    ScheduleRevealed,
}

/// Latest calculation held by the session
#[derive(Debug, Clone, PartialEq)]
pub enum Calculation {
    /// Nothing has been computed yet
    NotComputed,
    /// The last parameters produced no schedule
    Invalid(ParameterError),
    Ready(ScheduleResult),
}

/// Details submitted to unlock the full schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

impl ContactInfo {
    /// Check the required fields are filled in
    pub fn validate(&self) -> Result<(), WorkflowError> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("service", &self.service),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(WorkflowError::IncompleteContact { field });
            }
        }
        Ok(())
    }
}

/// Receiver for contact submissions
pub trait ContactSink {
    fn submit(&mut self, contact: &ContactInfo) -> anyhow::Result<()>;
}

/// Sink that only logs the submission
#[derive(Debug, Clone, Copy, Default)]
pub struct LogContactSink;

impl ContactSink for LogContactSink {
    fn submit(&mut self, contact: &ContactInfo) -> anyhow::Result<()> {
        log::info!(
            "contact submitted: name={:?} email={:?} service={:?}",
            contact.name,
            contact.email,
            contact.service
        );
        Ok(())
    }
}

/// One user's calculator session
#[derive(Debug, Clone)]
pub struct CalculatorSession {
    engine: ScheduleEngine,
    params: LoanParameters,
    calculation: Calculation,
    state: SessionState,
}

impl CalculatorSession {
    pub fn new(engine: ScheduleEngine) -> Self {
        Self {
            engine,
            params: LoanParameters::default(),
            calculation: Calculation::NotComputed,
            state: SessionState::Idle,
        }
    }

    /// Session with the default parameters already computed
    pub fn with_defaults(engine: ScheduleEngine) -> Self {
        let mut session = Self::new(engine);
        session.set_parameters(LoanParameters::default());
        session
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn parameters(&self) -> &LoanParameters {
        &self.params
    }

    pub fn calculation(&self) -> &Calculation {
        &self.calculation
    }

    /// Replace the parameters and recompute from scratch
    ///
    /// A reveal already granted survives a recompute; an invalid parameter
    /// set drops the session back to Idle.
    pub fn set_parameters(&mut self, params: LoanParameters) -> &Calculation {
        self.calculation = match self.engine.try_compute(&params) {
            Ok(result) => Calculation::Ready(result),
            Err(e) => Calculation::Invalid(e),
        };
        self.params = params;

        let previous = self.state;
        self.state = match (&self.calculation, previous) {
            (Calculation::Ready(_), SessionState::Idle) => SessionState::Computed,
            (Calculation::Ready(_), kept) => kept,
            _ => SessionState::Idle,
        };
        if previous != self.state {
            log::info!("session {:?} -> {:?}", previous, self.state);
        }

        &self.calculation
    }

    /// Computed result, visible from Computed onwards
    pub fn result(&self) -> Option<&ScheduleResult> {
        match &self.calculation {
            Calculation::Ready(result) => Some(result),
            _ => None,
        }
    }

    /// Full schedule, visible only after contact details were submitted
    pub fn revealed_schedule(&self) -> Option<&ScheduleResult> {
        match self.state {
            SessionState::ScheduleRevealed => self.result(),
            _ => None,
        }
    }

    /// Ask for the full schedule
    pub fn request_full_schedule(&mut self) -> Result<SessionState, WorkflowError> {
        match self.state {
            SessionState::Idle => return Err(WorkflowError::NoSchedule),
            SessionState::Computed => {
                self.state = SessionState::AwaitingContactInfo;
                log::info!("session Computed -> AwaitingContactInfo");
            }
            SessionState::AwaitingContactInfo | SessionState::ScheduleRevealed => {}
        }
        Ok(self.state)
    }

    /// Submit contact details and reveal the schedule
    ///
    /// On any failure the state and the computed result stay as they were.
    pub fn submit_contact<S: ContactSink>(
        &mut self,
        contact: &ContactInfo,
        sink: &mut S,
    ) -> Result<SessionState, WorkflowError> {
        if self.state != SessionState::AwaitingContactInfo {
            return Err(WorkflowError::UnexpectedState { state: self.state });
        }
        contact.validate()?;

        if let Err(e) = sink.submit(contact) {
            log::warn!("contact submission failed: {:#}", e);
            return Err(WorkflowError::Submission(e));
        }

        self.state = SessionState::ScheduleRevealed;
        log::info!("session AwaitingContactInfo -> ScheduleRevealed");
        Ok(self.state)
    }
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new(ScheduleEngine::default())
    }
}
