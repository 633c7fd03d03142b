use std::sync::LazyLock;

use indexmap::IndexMap;

use crate::{sink::Sink, value::Value};

/// A built-in callable by name from a `Reference` token. Takes one operand.
#[derive(Clone, Copy)]
pub struct NativeFunction {
    pub name: &'static str,
    pub callback: fn(Value, &mut dyn Sink) -> Value,
}

impl NativeFunction {
    pub fn call(&self, argument: Value, sink: &mut dyn Sink) -> Value {
        (self.callback)(argument, sink)
    }
}

static PRELUDE: LazyLock<IndexMap<&'static str, NativeFunction>> = LazyLock::new(|| {
    let mut table = IndexMap::new();
    install(&mut table, native("log", io_log));
    table
});

fn install(table: &mut IndexMap<&'static str, NativeFunction>, function: NativeFunction) {
    table.insert(function.name, function);
}

fn native(name: &'static str, callback: fn(Value, &mut dyn Sink) -> Value) -> NativeFunction {
    NativeFunction { name, callback }
}

pub fn lookup(name: &str) -> Option<&'static NativeFunction> {
    PRELUDE.get(name)
}

/// Built-in names in registration order.
pub fn names() -> impl Iterator<Item = &'static str> {
    PRELUDE.keys().copied()
}

fn io_log(argument: Value, sink: &mut dyn Sink) -> Value {
    if let Some(text) = argument.render() {
        sink.emit(&text);
    }
    Value::Empty
}
