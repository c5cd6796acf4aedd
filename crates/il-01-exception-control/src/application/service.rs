//! Exception Dispatch Service
//!
//! Main service implementing `ExceptionDispatchApi` and `HandlerOrderingApi`.

use crate::algorithms::{order_handlers, unwrap_causes};
use crate::application::registry::HandlerRegistry;
use crate::config::ExceptionControlConfig;
use crate::domain::entities::{DispatchOutcome, HandlerDescriptor, HandlerOutcome, ThrownException};
use crate::domain::errors::ExceptionControlError;
use crate::domain::value_objects::{ExceptionType, Qualifiers};
use crate::ports::inbound::{ExceptionDispatchApi, HandlerOrderingApi};
use async_trait::async_trait;

use interlock_telemetry::log_exception_event;
use tracing::{debug, info};

/// Exception Dispatcher
///
/// Orchestrates the dispatch pipeline:
/// 1. Unwrap the cause chain (root cause first)
/// 2. Resolve and order handlers for each exception in the stack
/// 3. Invoke handlers until one claims, aborts or rethrows
pub struct ExceptionDispatcher {
    registry: HandlerRegistry,
    config: ExceptionControlConfig,
}

impl ExceptionDispatcher {
    /// Create a new dispatcher with default config
    pub fn new(registry: HandlerRegistry) -> Self {
        Self {
            registry,
            config: ExceptionControlConfig::default(),
        }
    }

    /// Create a new dispatcher with custom config
    pub fn with_config(registry: HandlerRegistry, config: ExceptionControlConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }
}

impl HandlerOrderingApi for ExceptionDispatcher {
    fn order(&self, handlers: Vec<HandlerDescriptor>) -> Vec<HandlerDescriptor> {
        order_handlers(handlers, self.registry.hierarchy())
    }

    fn resolve(&self, exception_type: &ExceptionType, qualifiers: &Qualifiers) -> Vec<HandlerDescriptor> {
        self.registry.resolve(exception_type, qualifiers)
    }
}

#[async_trait]
impl ExceptionDispatchApi for ExceptionDispatcher {
    async fn dispatch(
        &self,
        exception: &ThrownException,
        qualifiers: &Qualifiers,
    ) -> Result<DispatchOutcome, ExceptionControlError> {
        // 1. Unwrap
        let stack = unwrap_causes(exception, self.config.max_cause_depth)?;
        let mut outcome = DispatchOutcome::default();

        log_exception_event!(
            info,
            "Dispatching exception",
            exception.exception_type,
            stack_depth = stack.len()
        );

        'stack: for mut event in stack {
            event.handled = outcome.handled;

            // 2. Resolve
            let handlers = self.registry.resolve(&event.exception_type, qualifiers);
            debug!(
                exception_type = %event.exception_type,
                handler_count = handlers.len(),
                "Resolved handlers"
            );

            // 3. Invoke
            for descriptor in handlers {
                let Some(handler) = self.registry.handler(descriptor.sequence) else {
                    continue;
                };

                if self.config.log_handler_invocations {
                    debug!(
                        handler = %descriptor.name,
                        exception_type = %event.exception_type,
                        "Invoking handler"
                    );
                }

                let result = handler.handle(&event).await?;
                outcome.handlers_invoked += 1;
                outcome.invoked.push(descriptor.name.clone());

                match result {
                    HandlerOutcome::Handled => {
                        outcome.handled = true;
                        break 'stack;
                    }
                    HandlerOutcome::MarkHandled => {
                        outcome.handled = true;
                        event.handled = true;
                    }
                    HandlerOutcome::Proceed => {}
                    HandlerOutcome::ProceedToCause => continue 'stack,
                    HandlerOutcome::Abort => {
                        outcome.aborted = true;
                        break 'stack;
                    }
                    HandlerOutcome::Rethrow => {
                        log_exception_event!(
                            warn,
                            "Handler requested rethrow",
                            event.exception_type,
                            handler = %descriptor.name
                        );
                        return Err(ExceptionControlError::Rethrown {
                            exception_type: exception.exception_type.to_string(),
                        });
                    }
                }
            }
        }

        if !outcome.handled && !outcome.aborted && self.config.rethrow_unhandled {
            return Err(ExceptionControlError::Unhandled {
                exception_type: exception.exception_type.to_string(),
                message: exception.message.clone(),
            });
        }

        info!(
            handled = outcome.handled,
            aborted = outcome.aborted,
            handlers_invoked = outcome.handlers_invoked,
            "Exception dispatch complete"
        );

        Ok(outcome)
    }
}
