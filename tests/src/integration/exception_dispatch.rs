//! # Exception Dispatch Flows
//!
//! Registry, handler ordering and cause-chain dispatch working together
//! through the public `il-01-exception-control` API.

#[cfg(test)]
mod tests {
    use il_01_exception_control::{
        standard_hierarchy, CaughtException, ExceptionControlConfig, ExceptionControlError,
        ExceptionDispatchApi, ExceptionDispatcher, FnHandler, HandlerDescriptor, HandlerError,
        HandlerOrderingApi, HandlerOutcome, HandlerRegistry, LoggingHandler, Qualifier, Qualifiers,
        ThrownException, TraversalMode,
    };
    use parking_lot::Mutex;
    use proptest::prelude::*;
    use std::sync::Arc;

    type Seen = Arc<Mutex<Vec<String>>>;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn recording(
        name: &str,
        outcome: HandlerOutcome,
        seen: &Seen,
    ) -> Arc<FnHandler<impl Fn(&CaughtException) -> Result<HandlerOutcome, HandlerError> + Send + Sync>> {
        let seen = seen.clone();
        let name = name.to_string();
        Arc::new(FnHandler::new(move |event: &CaughtException| {
            seen.lock().push(format!("{}@{}", name, event.exception_type));
            Ok(outcome)
        }))
    }

    fn register(
        registry: &mut HandlerRegistry,
        descriptor: HandlerDescriptor,
        outcome: HandlerOutcome,
        seen: &Seen,
    ) {
        let handler = recording(&descriptor.name, outcome, seen);
        registry.register(descriptor, handler);
    }

    fn qualifiers(names: &[&str]) -> Qualifiers {
        names.iter().map(|name| Qualifier::from(*name)).collect()
    }

    fn names(descriptors: &[HandlerDescriptor]) -> Vec<&str> {
        descriptors.iter().map(|d| d.name.as_str()).collect()
    }

    // =============================================================================
    // ORDERING THROUGH THE REGISTRY
    // =============================================================================

    #[test]
    fn test_resolution_orders_specific_types_first() {
        interlock_telemetry::init_for_tests();
        let seen = Seen::default();
        let mut registry = HandlerRegistry::new(standard_hierarchy().unwrap());
        register(&mut registry, HandlerDescriptor::new("exception", "Exception"), HandlerOutcome::Proceed, &seen);
        register(&mut registry, HandlerDescriptor::new("io", "IOException"), HandlerOutcome::Proceed, &seen);
        register(&mut registry, HandlerDescriptor::new("fnf", "FileNotFoundException"), HandlerOutcome::Proceed, &seen);
        register(&mut registry, HandlerDescriptor::new("npe", "NullPointerException"), HandlerOutcome::Proceed, &seen);

        let dispatcher = ExceptionDispatcher::new(registry);
        let resolved = dispatcher.resolve(&"FileNotFoundException".into(), &Qualifiers::new());

        assert_eq!(names(&resolved), vec!["fnf", "io", "exception"]);
    }

    #[test]
    fn test_same_type_traversal_and_precedence() {
        let seen = Seen::default();
        let mut registry = HandlerRegistry::new(standard_hierarchy().unwrap());
        register(
            &mut registry,
            HandlerDescriptor::new("breadth-low", "IOException")
                .with_traversal_mode(TraversalMode::BreadthFirst)
                .with_precedence(-10),
            HandlerOutcome::Proceed,
            &seen,
        );
        register(
            &mut registry,
            HandlerDescriptor::new("depth-high", "IOException").with_precedence(10),
            HandlerOutcome::Proceed,
            &seen,
        );
        register(
            &mut registry,
            HandlerDescriptor::new("breadth-high", "IOException")
                .with_traversal_mode(TraversalMode::BreadthFirst)
                .with_precedence(10),
            HandlerOutcome::Proceed,
            &seen,
        );
        register(
            &mut registry,
            HandlerDescriptor::new("depth-low", "IOException").with_precedence(-10),
            HandlerOutcome::Proceed,
            &seen,
        );

        let dispatcher = ExceptionDispatcher::new(registry);
        let resolved = dispatcher.resolve(&"IOException".into(), &Qualifiers::new());

        assert_eq!(
            names(&resolved),
            vec!["depth-low", "depth-high", "breadth-high", "breadth-low"]
        );
    }

    #[test]
    fn test_qualified_handlers_selected_by_qualifiers() {
        let seen = Seen::default();
        let mut registry = HandlerRegistry::new(standard_hierarchy().unwrap());
        register(&mut registry, HandlerDescriptor::new("plain", "IOException"), HandlerOutcome::Proceed, &seen);
        register(
            &mut registry,
            HandlerDescriptor::new("web", "IOException").with_qualifier("web"),
            HandlerOutcome::Proceed,
            &seen,
        );
        register(
            &mut registry,
            HandlerDescriptor::new("rest", "IOException").with_qualifier("rest"),
            HandlerOutcome::Proceed,
            &seen,
        );
        let dispatcher = ExceptionDispatcher::new(registry);

        let unqualified = dispatcher.resolve(&"IOException".into(), &Qualifiers::new());
        assert_eq!(names(&unqualified), vec!["plain"]);

        let web = dispatcher.resolve(&"IOException".into(), &qualifiers(&["web"]));
        assert_eq!(names(&web), vec!["plain", "web"]);

        let both = dispatcher.resolve(&"IOException".into(), &qualifiers(&["web", "rest"]));
        assert_eq!(names(&both), vec!["plain", "web", "rest"]);
    }

    #[test]
    fn test_unqualified_duplicates_collapse_to_first_registered() {
        let dispatcher = ExceptionDispatcher::new(HandlerRegistry::new(standard_hierarchy().unwrap()));

        let ordered = dispatcher.order(vec![
            HandlerDescriptor::new("first", "IOException").with_sequence(0),
            HandlerDescriptor::new("second", "IOException").with_sequence(1),
            HandlerDescriptor::new("qualified", "IOException")
                .with_qualifier("web")
                .with_sequence(2),
        ]);

        assert_eq!(names(&ordered), vec!["first", "qualified"]);
    }

    // =============================================================================
    // DISPATCH
    // =============================================================================

    #[tokio::test]
    async fn test_cause_chain_dispatched_root_first() {
        interlock_telemetry::init_for_tests();
        let seen = Seen::default();
        let mut registry = HandlerRegistry::new(standard_hierarchy().unwrap());
        register(&mut registry, HandlerDescriptor::new("runtime", "RuntimeException"), HandlerOutcome::Proceed, &seen);
        register(&mut registry, HandlerDescriptor::new("io", "IOException"), HandlerOutcome::Proceed, &seen);
        register(&mut registry, HandlerDescriptor::new("exception", "Exception"), HandlerOutcome::Proceed, &seen);
        registry.register(HandlerDescriptor::new("log", "Throwable"), Arc::new(LoggingHandler::new()));

        let dispatcher = ExceptionDispatcher::new(registry);
        let thrown = ThrownException::new("RuntimeException", "wrapped")
            .caused_by(ThrownException::new("FileNotFoundException", "missing.txt"));

        let outcome = dispatcher.dispatch(&thrown, &Qualifiers::new()).await.unwrap();

        assert!(!outcome.handled);
        assert_eq!(
            *seen.lock(),
            vec![
                "io@FileNotFoundException",
                "exception@FileNotFoundException",
                "runtime@RuntimeException",
                "exception@RuntimeException",
            ]
        );
        assert_eq!(outcome.invoked, vec!["io", "exception", "log", "runtime", "exception", "log"]);
        assert_eq!(outcome.handlers_invoked, 6);
    }

    #[tokio::test]
    async fn test_handled_root_cause_stops_wrapper_dispatch() {
        let seen = Seen::default();
        let mut registry = HandlerRegistry::new(standard_hierarchy().unwrap());
        register(&mut registry, HandlerDescriptor::new("io", "IOException"), HandlerOutcome::Handled, &seen);
        register(&mut registry, HandlerDescriptor::new("runtime", "RuntimeException"), HandlerOutcome::Proceed, &seen);

        let dispatcher = ExceptionDispatcher::new(registry);
        let thrown = ThrownException::new("RuntimeException", "wrapped")
            .caused_by(ThrownException::new("IOException", "disk"));

        let outcome = dispatcher.dispatch(&thrown, &Qualifiers::new()).await.unwrap();

        assert!(outcome.handled);
        assert_eq!(*seen.lock(), vec!["io@IOException"]);
    }

    #[tokio::test]
    async fn test_unhandled_rethrown_with_testing_config() {
        let dispatcher = ExceptionDispatcher::with_config(
            HandlerRegistry::new(standard_hierarchy().unwrap()),
            ExceptionControlConfig::for_testing(),
        );

        let result = dispatcher
            .dispatch(&ThrownException::new("IllegalStateException", "boom"), &Qualifiers::new())
            .await;

        assert!(matches!(result, Err(ExceptionControlError::Unhandled { .. })));
    }

    #[tokio::test]
    async fn test_custom_type_registered_at_runtime() {
        let seen = Seen::default();
        let mut registry = HandlerRegistry::new(standard_hierarchy().unwrap());
        registry
            .register_type("OrderRejectedException", ["IllegalStateException"])
            .unwrap();
        register(&mut registry, HandlerDescriptor::new("state", "IllegalStateException"), HandlerOutcome::Proceed, &seen);
        register(&mut registry, HandlerDescriptor::new("order", "OrderRejectedException"), HandlerOutcome::MarkHandled, &seen);

        let dispatcher = ExceptionDispatcher::new(registry);
        let outcome = dispatcher
            .dispatch(&ThrownException::new("OrderRejectedException", "no stock"), &Qualifiers::new())
            .await
            .unwrap();

        assert!(outcome.handled);
        assert_eq!(
            *seen.lock(),
            vec!["order@OrderRejectedException", "state@OrderRejectedException"]
        );
    }

    // =============================================================================
    // PROPERTIES
    // =============================================================================

    fn handler_set() -> Vec<HandlerDescriptor> {
        vec![
            HandlerDescriptor::new("throwable", "Throwable").with_sequence(0),
            HandlerDescriptor::new("io", "IOException").with_sequence(1),
            HandlerDescriptor::new("io-web", "IOException").with_qualifier("web").with_sequence(2),
            HandlerDescriptor::new("io-rest", "IOException").with_qualifier("rest").with_sequence(3),
            HandlerDescriptor::new("npe", "NullPointerException").with_sequence(4),
            HandlerDescriptor::new("iae", "IllegalArgumentException")
                .with_traversal_mode(TraversalMode::BreadthFirst)
                .with_precedence(3)
                .with_sequence(5),
            HandlerDescriptor::new("iae-first", "IllegalArgumentException")
                .with_precedence(-3)
                .with_sequence(6),
        ]
    }

    proptest! {
        #[test]
        fn prop_order_independent_of_registration_order(
            shuffled in Just(handler_set()).prop_shuffle()
        ) {
            let dispatcher = ExceptionDispatcher::new(HandlerRegistry::new(standard_hierarchy().unwrap()));
            let expected = dispatcher.order(handler_set());
            let actual = dispatcher.order(shuffled);
            prop_assert_eq!(names(&actual), names(&expected));
        }
    }
}
