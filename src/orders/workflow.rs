//! Order submission workflow
//!
//! One pass per POST: validate, persist, compose, dispatch, then report the
//! outcome. The workflow keeps no state between requests.
//!
//! ```text
//! Received -> Rejected                       (validation failed, nothing stored)
//! Received -> Validated -> Failed            (store failed, nothing sent)
//! Received -> Validated -> Persisted -> Accepted
//!                           (dispatch faults are reported, never fatal)
//! ```

use crate::core::error::{DispatchFault, HoneybeeError};
use crate::core::events::{EventBus, Flow, WorkflowEvent};
use crate::core::order::Order;
use crate::core::service::OrderStore;
use crate::core::validation::{FieldErrors, OrderForm, OrderValidator};
use crate::notifications::{ComposedMessages, Composer, DispatchReport, Dispatcher, TemplateError};
use std::sync::Arc;
use uuid::Uuid;

/// Terminal state of an order submission that did not fail internally
#[derive(Debug, Clone)]
pub enum SubmissionOutcome {
    /// The form is shown again with the submitted values and per-field errors
    Rejected { form: OrderForm, errors: FieldErrors },
    /// The order exists; the customer is sent to the confirmation page
    Accepted {
        order: Order,
        dispatch: DispatchReport,
    },
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted { .. })
    }
}

/// Drives an order from raw form input to a terminal outcome
#[derive(Clone)]
pub struct OrderWorkflow {
    store: Arc<dyn OrderStore>,
    validator: OrderValidator,
    composer: Composer,
    dispatcher: Dispatcher,
    events: EventBus,
}

impl OrderWorkflow {
    pub fn new(
        store: Arc<dyn OrderStore>,
        composer: Composer,
        dispatcher: Dispatcher,
        events: EventBus,
    ) -> Self {
        Self {
            store,
            validator: OrderValidator::new(),
            composer,
            dispatcher,
            events,
        }
    }

    pub fn store(&self) -> &Arc<dyn OrderStore> {
        &self.store
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Process one submission.
    ///
    /// Returns `Err` only when the order could not be stored. In that case no
    /// message was composed or sent.
    pub async fn submit(&self, form: OrderForm) -> Result<SubmissionOutcome, HoneybeeError> {
        let new_order = match self.validator.validate(&form) {
            Ok(new_order) => new_order,
            Err(errors) => {
                let fields: Vec<String> = errors.fields().map(str::to_string).collect();
                tracing::debug!(?fields, "order submission rejected");
                self.events.publish(WorkflowEvent::SubmissionRejected {
                    flow: Flow::Order,
                    fields,
                });
                return Ok(SubmissionOutcome::Rejected { form, errors });
            }
        };

        let order = match self.store.create(new_order).await {
            Ok(order) => order,
            Err(e) => {
                tracing::error!(error = %e, "failed to persist order");
                self.events.publish(WorkflowEvent::PersistenceFailed {
                    message: e.to_string(),
                });
                return Err(e.into());
            }
        };

        tracing::info!(
            order_id = %order.id,
            choice = order.choice.code(),
            date_needed = %order.date_needed,
            "order saved"
        );
        self.events.publish(WorkflowEvent::OrderAccepted {
            order_id: order.id,
            choice: order.choice,
            date_needed: order.date_needed,
        });

        let dispatch = notify(
            &self.dispatcher,
            &self.events,
            self.composer.compose(&order),
            Flow::Order,
            Some(order.id),
        )
        .await;

        Ok(SubmissionOutcome::Accepted { order, dispatch })
    }
}

/// Send composed messages and publish one event per undelivered message.
///
/// A compose failure counts as a fault for both recipients.
pub(crate) async fn notify(
    dispatcher: &Dispatcher,
    events: &EventBus,
    composed: Result<ComposedMessages, TemplateError>,
    flow: Flow,
    order_id: Option<Uuid>,
) -> DispatchReport {
    let report = match composed {
        Ok(messages) => dispatcher.dispatch(&messages).await,
        Err(e) => {
            tracing::warn!(
                ?flow,
                order_id = ?order_id,
                error = %e,
                "failed to compose notifications"
            );
            DispatchReport::not_sent(DispatchFault::Compose {
                message: e.to_string(),
            })
        }
    };

    for (recipient, fault) in report.faults() {
        events.publish(WorkflowEvent::DispatchFailed {
            flow,
            order_id,
            recipient,
            fault: fault.clone(),
        });
    }
    report
}
