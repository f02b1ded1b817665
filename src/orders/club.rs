//! Southern Sweets Club signup workflow
//!
//! Same shape as the order workflow without the store: a valid signup is
//! composed and dispatched, then always redirected.

use super::workflow::notify;
use crate::core::events::{EventBus, Flow, WorkflowEvent};
use crate::core::validation::{ClubForm, ClubSignup, FieldErrors};
use crate::notifications::{Composer, DispatchReport, Dispatcher};

/// Terminal state of a club signup
#[derive(Debug, Clone)]
pub enum ClubOutcome {
    Rejected { form: ClubForm, errors: FieldErrors },
    Joined {
        signup: ClubSignup,
        dispatch: DispatchReport,
    },
}

#[derive(Clone)]
pub struct ClubWorkflow {
    composer: Composer,
    dispatcher: Dispatcher,
    events: EventBus,
}

impl ClubWorkflow {
    pub fn new(composer: Composer, dispatcher: Dispatcher, events: EventBus) -> Self {
        Self {
            composer,
            dispatcher,
            events,
        }
    }

    pub async fn join(&self, form: ClubForm) -> ClubOutcome {
        let signup = match ClubSignup::validate(&form) {
            Ok(signup) => signup,
            Err(errors) => {
                let fields: Vec<String> = errors.fields().map(str::to_string).collect();
                tracing::debug!(?fields, "club signup rejected");
                self.events.publish(WorkflowEvent::SubmissionRejected {
                    flow: Flow::Club,
                    fields,
                });
                return ClubOutcome::Rejected { form, errors };
            }
        };

        tracing::info!("club signup received");
        self.events.publish(WorkflowEvent::ClubJoined);

        let dispatch = notify(
            &self.dispatcher,
            &self.events,
            self.composer.compose_club(&signup),
            Flow::Club,
            None,
        )
        .await;

        ClubOutcome::Joined { signup, dispatch }
    }
}
