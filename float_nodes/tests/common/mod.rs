//! Shared helpers for integration tests
// Consumed selectively by the integration test files.
#![allow(dead_code)]

use std::sync::Mutex;

use float_nodes::prelude::*;

/// One call observed by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub receiver: Value,
    pub method: String,
    pub args: Vec<Value>,
}

impl Call {
    pub fn new(receiver: Value, method: &str, args: Vec<Value>) -> Self {
        Self {
            receiver,
            method: method.to_string(),
            args,
        }
    }
}

type Responder = Box<dyn Fn(&Value, &str, &[Value]) -> RuntimeResult<Value> + Send + Sync>;

/// Dispatch and complex collaborator that records every call and answers
/// through a closure.
pub struct RecordingHost {
    calls: Mutex<Vec<Call>>,
    respond: Responder,
}

impl RecordingHost {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&Value, &str, &[Value]) -> RuntimeResult<Value> + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        }
    }

    /// Host that raises NoMethodError for every call.
    pub fn silent() -> Self {
        Self::new(|receiver, method, _| Err(RuntimeError::no_method(method, receiver.class_name())))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn context(&self) -> FloatContext<'_> {
        FloatContext::new(self, self)
    }
}

impl Dispatch for RecordingHost {
    fn call(&self, receiver: &Value, method: &str, args: &[Value]) -> RuntimeResult<Value> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::new(receiver.clone(), method, args.to_vec()));
        (self.respond)(receiver, method, args)
    }
}

impl ComplexCollaborator for RecordingHost {
    fn promote(&self, real: f64) -> RuntimeResult<Value> {
        self.call(&Value::Float(real), "to_c", &[])
    }

    fn pow(&self, base: &Value, exponent: f64) -> RuntimeResult<Value> {
        self.call(base, "**", &[Value::Float(exponent)])
    }
}

/// Opaque user-defined object.
#[derive(Debug)]
pub struct Widget;

impl HostObject for Widget {
    fn class_name(&self) -> &str {
        "Widget"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

pub fn widget() -> Value {
    Value::object(Widget)
}

/// Unwrap a Float result.
pub fn float(result: RuntimeResult<Value>) -> f64 {
    match result {
        Ok(Value::Float(f)) => f,
        other => panic!("expected Float, got {:?}", other),
    }
}
