//! # Transactional Work Flows
//!
//! Interceptor, delegate wrapper and synchronizations working together, with
//! failed work handed to the exception dispatcher the way a bean container
//! would do it.

#[cfg(test)]
mod tests {
    use il_01_exception_control::{
        standard_hierarchy, ExceptionDispatchApi, ExceptionDispatcher, HandlerDescriptor,
        HandlerRegistry, LoggingHandler, Qualifiers, ThrownException,
    };
    use il_02_transaction::{
        InMemoryUserTransaction, InvocationTarget, LocalSynchronizations, PropagationMode,
        Synchronization, SynchronizationContext, TransactionAttribute, TransactionConfig,
        TransactionError, TransactionInterceptor, TransactionManagerSynchronizations,
        TransactionMetadataRegistry, TransactionPropagationApi, TransactionStatus, UtTransaction,
        Work,
    };
    use parking_lot::Mutex;
    use std::sync::Arc;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    #[derive(Debug, thiserror::Error)]
    enum AppError {
        #[error("{}: {}", .0.exception_type, .0.message)]
        Thrown(ThrownException),
        #[error(transparent)]
        Transaction(#[from] TransactionError),
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl Synchronization for Recorder {
        fn before_completion(&self) {
            self.events.lock().push("before".to_string());
        }

        fn after_completion(&self, status: TransactionStatus) {
            self.events.lock().push(format!("after:{status:?}"));
        }
    }

    fn metadata() -> Arc<TransactionMetadataRegistry> {
        let mut metadata = TransactionMetadataRegistry::new();
        metadata.register_bean(
            "OrderService",
            TransactionAttribute::Transactional(PropagationMode::Required),
        );
        metadata.register_method(
            "OrderService",
            "lookup",
            TransactionAttribute::Transactional(PropagationMode::Supports),
        );
        metadata.register_method(
            "OrderService",
            "confirm",
            TransactionAttribute::Transactional(PropagationMode::Mandatory),
        );
        metadata.register_bean("ReportBean", TransactionAttribute::Ejb("NEVER".to_string()));
        metadata.register_bean("ArchiveBean", TransactionAttribute::Ejb("NOT_SUPPORTED".to_string()));
        Arc::new(metadata)
    }

    fn local_interceptor(config: TransactionConfig) -> (Arc<InMemoryUserTransaction>, TransactionInterceptor) {
        let delegate = Arc::new(InMemoryUserTransaction::new());
        let transaction = UtTransaction::new(delegate.clone(), Arc::new(LocalSynchronizations::new()));
        (
            delegate,
            TransactionInterceptor::new(metadata(), transaction, Work::new(config)),
        )
    }

    fn register_then<T: Send + 'static>(
        transaction: UtTransaction,
        sync: Arc<Recorder>,
        result: Result<T, AppError>,
    ) -> impl FnOnce(&mut SynchronizationContext) -> std::future::Ready<Result<T, AppError>> {
        move |ctx| {
            let outcome = transaction
                .register_synchronization(ctx, sync)
                .map_err(AppError::from)
                .and(result);
            std::future::ready(outcome)
        }
    }

    // =============================================================================
    // LOCAL SYNCHRONIZATIONS
    // =============================================================================

    #[tokio::test]
    async fn test_required_method_commits_and_notifies() {
        interlock_telemetry::init_for_tests();
        let (delegate, interceptor) = local_interceptor(TransactionConfig::for_testing());
        let mut ctx = SynchronizationContext::new();
        let sync = Arc::new(Recorder::default());
        let target = InvocationTarget::new("OrderService", "place");

        let order = interceptor
            .around_invoke(
                &target,
                &mut ctx,
                register_then(interceptor.transaction().clone(), sync.clone(), Ok("order-7")),
            )
            .await
            .unwrap();

        assert_eq!(order, "order-7");
        assert_eq!(*sync.events.lock(), vec!["before", "after:Committed"]);
        assert_eq!(delegate.counts().committed, 1);
        assert_eq!(delegate.timeout_secs(), Some(5));
        assert!(ctx.is_empty());
    }

    #[tokio::test]
    async fn test_failed_work_rolls_back_and_dispatches() {
        let (delegate, interceptor) = local_interceptor(TransactionConfig::default());
        let mut ctx = SynchronizationContext::new();
        let sync = Arc::new(Recorder::default());
        let target = InvocationTarget::new("OrderService", "place");
        let thrown = ThrownException::new("RuntimeException", "place failed")
            .caused_by(ThrownException::new("IllegalArgumentException", "negative quantity"));

        let result: Result<(), AppError> = interceptor
            .around_invoke(
                &target,
                &mut ctx,
                register_then(interceptor.transaction().clone(), sync.clone(), Err(AppError::Thrown(thrown))),
            )
            .await;

        let Err(AppError::Thrown(thrown)) = result else {
            panic!("expected the work's exception");
        };
        assert_eq!(*sync.events.lock(), vec!["after:RolledBack"]);
        assert_eq!(delegate.counts().rolled_back, 1);
        assert!(ctx.is_empty());

        // Container hands the exception to the registered handlers
        let mut registry = HandlerRegistry::new(standard_hierarchy().unwrap());
        registry.register(
            HandlerDescriptor::new("invalid-input", "IllegalArgumentException"),
            Arc::new(LoggingHandler::claiming()),
        );
        registry.register(
            HandlerDescriptor::new("fallback", "Throwable"),
            Arc::new(LoggingHandler::new()),
        );
        let dispatcher = ExceptionDispatcher::new(registry);

        let outcome = dispatcher.dispatch(&thrown, &Qualifiers::new()).await.unwrap();
        assert!(outcome.handled);
        assert_eq!(outcome.invoked, vec!["invalid-input", "fallback", "fallback"]);
    }

    #[tokio::test]
    async fn test_methods_join_caller_transaction() {
        let (delegate, interceptor) = local_interceptor(TransactionConfig::default());
        let mut ctx = SynchronizationContext::new();
        interceptor.transaction().begin(&mut ctx).await.unwrap();

        for method in ["place", "lookup", "confirm"] {
            let target = InvocationTarget::new("OrderService", method);
            interceptor
                .around_invoke(&target, &mut ctx, |_| async { Ok::<_, AppError>(()) })
                .await
                .unwrap();
        }

        assert_eq!(delegate.counts().begun, 1);
        assert_eq!(delegate.counts().committed, 0);
        assert_eq!(ctx.depth(), 1);

        interceptor.transaction().commit(&mut ctx).await.unwrap();
        assert_eq!(delegate.counts().committed, 1);
        assert!(ctx.is_empty());
    }

    #[tokio::test]
    async fn test_mode_violations_fail_before_work() {
        let (delegate, interceptor) = local_interceptor(TransactionConfig::default());
        let mut ctx = SynchronizationContext::new();

        let confirm = InvocationTarget::new("OrderService", "confirm");
        let result = interceptor
            .around_invoke(&confirm, &mut ctx, |_| async { Ok::<_, AppError>(()) })
            .await;
        assert!(matches!(result, Err(AppError::Transaction(TransactionError::IllegalState(_)))));

        interceptor.transaction().begin(&mut ctx).await.unwrap();
        let report = InvocationTarget::new("ReportBean", "render");
        let result = interceptor
            .around_invoke(&report, &mut ctx, |_| async { Ok::<_, AppError>(()) })
            .await;
        assert!(matches!(result, Err(AppError::Transaction(TransactionError::IllegalState(_)))));

        assert_eq!(delegate.counts().begun, 1);
    }

    #[test]
    fn test_suspending_ejb_attribute_rejected() {
        let (_, interceptor) = local_interceptor(TransactionConfig::default());
        let target = InvocationTarget::new("ArchiveBean", "store");

        for active in [false, true] {
            assert!(matches!(
                interceptor.is_new_transaction_required(&target, active),
                Err(TransactionError::UnsupportedPropagation {
                    mode: PropagationMode::NotSupported
                })
            ));
        }
    }

    #[tokio::test]
    async fn test_rollback_only_work_is_not_committed() {
        let (delegate, interceptor) = local_interceptor(TransactionConfig::default());
        let mut ctx = SynchronizationContext::new();
        let sync = Arc::new(Recorder::default());
        let target = InvocationTarget::new("OrderService", "place");
        let transaction = interceptor.transaction().clone();
        let registered = sync.clone();

        interceptor
            .around_invoke(&target, &mut ctx, move |ctx| {
                let registration = transaction.register_synchronization(ctx, registered);
                async move {
                    registration?;
                    transaction.set_rollback_only().await?;
                    Ok::<_, AppError>(())
                }
            })
            .await
            .unwrap();

        assert_eq!(delegate.counts().committed, 0);
        assert_eq!(delegate.counts().rolled_back, 1);
        assert_eq!(*sync.events.lock(), vec!["after:RolledBack"]);
    }

    // =============================================================================
    // TRANSACTION MANAGER SYNCHRONIZATIONS
    // =============================================================================

    fn manager_interceptor() -> (Arc<InMemoryUserTransaction>, TransactionInterceptor) {
        let delegate = Arc::new(InMemoryUserTransaction::new());
        let synchronizations = Arc::new(TransactionManagerSynchronizations::new(delegate.clone()));
        let transaction = UtTransaction::new(delegate.clone(), synchronizations);
        (
            delegate,
            TransactionInterceptor::new(metadata(), transaction, Work::default()),
        )
    }

    #[tokio::test]
    async fn test_manager_synchronizations_follow_manager_callbacks() {
        let (delegate, interceptor) = manager_interceptor();
        let mut ctx = SynchronizationContext::new();
        let sync = Arc::new(Recorder::default());
        let target = InvocationTarget::new("OrderService", "place");

        interceptor
            .around_invoke(
                &target,
                &mut ctx,
                register_then(interceptor.transaction().clone(), sync.clone(), Ok(())),
            )
            .await
            .unwrap();

        assert_eq!(*sync.events.lock(), vec!["before", "after:Committed"]);
        assert!(ctx.is_empty());
        assert_eq!(delegate.counts().committed, 1);
    }

    #[tokio::test]
    async fn test_manager_rollback_reaches_synchronization() {
        let (delegate, interceptor) = manager_interceptor();
        let mut ctx = SynchronizationContext::new();
        let sync = Arc::new(Recorder::default());
        let target = InvocationTarget::new("OrderService", "place");

        let result: Result<(), AppError> = interceptor
            .around_invoke(
                &target,
                &mut ctx,
                register_then(
                    interceptor.transaction().clone(),
                    sync.clone(),
                    Err(AppError::Thrown(ThrownException::new("IOException", "disk full"))),
                ),
            )
            .await;

        assert!(matches!(result, Err(AppError::Thrown(_))));
        assert_eq!(*sync.events.lock(), vec!["after:RolledBack"]);
        assert!(ctx.is_empty());
        assert_eq!(delegate.counts().rolled_back, 1);
    }

    #[tokio::test]
    async fn test_consecutive_manager_transactions_each_notified() {
        let (delegate, interceptor) = manager_interceptor();
        let mut ctx = SynchronizationContext::new();
        let target = InvocationTarget::new("OrderService", "place");
        let syncs: Vec<Arc<Recorder>> = (0..3).map(|_| Arc::new(Recorder::default())).collect();

        for sync in &syncs {
            interceptor
                .around_invoke(
                    &target,
                    &mut ctx,
                    register_then(interceptor.transaction().clone(), sync.clone(), Ok(())),
                )
                .await
                .unwrap();
            assert!(ctx.is_empty());
        }

        for sync in &syncs {
            assert_eq!(*sync.events.lock(), vec!["before", "after:Committed"]);
        }
        assert_eq!(delegate.counts().committed, 3);
    }
}
