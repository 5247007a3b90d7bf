use std::io::Write;
use std::sync::{Arc, Mutex};

use tracing_subscriber::prelude::*;
use traveler_ast::{AstArena, NodeType};
use traveler_core::{ChildRegistry, RegistryConfig, Traversal};

struct MessageRecorder(Arc<Mutex<Vec<String>>>);

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for MessageRecorder {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.0.lock().unwrap().push(visitor.0);
    }
}

struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            use std::fmt::Write;
            let _ = write!(self.0, "{:?}", value);
        }
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0.push_str(value);
        }
    }
}

#[test]
fn test_registry_and_traversal_events() {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(MessageRecorder(messages.clone()));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "rules": {{ "ChainExpression": ["expression"] }} }}"#).unwrap();

    tracing::subscriber::with_default(subscriber, || {
        let config = RegistryConfig::from_file(file.path()).unwrap();
        let mut registry = config.build_registry().unwrap();
        registry.register_fields("NewExpression", ["callee"]).unwrap();
        assert!(registry.unregister("NewExpression"));

        let arena = AstArena::new();
        let stmt = arena.node(NodeType::EmptyStatement).finish();
        let program = arena.node(NodeType::Program).list("body", &[stmt]).finish();
        assert_eq!(Traversal::new(program, &registry).count(), 2);
    });

    let messages = messages.lock().unwrap();
    assert_eq!(
        *messages,
        vec![
            "loaded registry config",
            "registered child rule",
            "registered child rule",
            "unregistered child rule",
            "starting traversal",
            "traversal done",
        ]
    );
}
