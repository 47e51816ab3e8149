//! Demo command implementation.
//!
//! Builds a small `Animal` / `Dog` hierarchy and runs each composition
//! helper against it, reporting what happened at every step.

use blessed_core::{
    assert_implements, bless, extend, mixin, unbind_at, ArgPosition, Function, Object, Value,
};
use clap::Parser;
use serde::Serialize;
use tracing::debug;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Walk through extend, mixin, bless and delegate construction
#[derive(Debug, Parser)]
pub struct DemoCommand {
    /// Receiver position for delegates (an index or `last`); defaults to
    /// `delegation.default_position` from the config
    #[arg(short, long)]
    pub position: Option<ArgPosition>,
}

#[derive(Debug, Serialize)]
struct DemoStep {
    operation: &'static str,
    ok: bool,
    outcome: String,
}

#[derive(Debug, Serialize)]
struct DemoReport {
    position: String,
    steps: Vec<DemoStep>,
}

impl DemoReport {
    fn record(&mut self, operation: &'static str, outcome: blessed_core::Result<String>) {
        let step = match outcome {
            Ok(outcome) => DemoStep {
                operation,
                ok: true,
                outcome,
            },
            Err(e) => DemoStep {
                operation,
                ok: false,
                outcome: e.to_string(),
            },
        };
        debug!(operation, ok = step.ok, "demo step");
        self.steps.push(step);
    }
}

impl FormattedOutput for DemoReport {
    fn format_text(&self) -> String {
        let mut lines = vec![format!("delegate position: {}", self.position)];
        for step in &self.steps {
            let mark = if step.ok { "ok " } else { "err" };
            lines.push(format!("[{mark}] {:<17} {}", step.operation, step.outcome));
        }
        lines.join("\n")
    }
}

impl DemoCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let position = match self.position {
            Some(position) => position,
            None => ctx.config.delegation.position().ok_or_else(|| {
                CliError::validation(
                    "delegation.default_position",
                    ctx.config.delegation.default_position.clone(),
                )
            })?,
        };

        let report = run(position)?;
        print_output(ctx, &report)
    }
}

fn run(position: ArgPosition) -> Result<DemoReport, CliError> {
    let mut report = DemoReport {
        position: position.to_string(),
        steps: Vec::new(),
    };

    let animal = animal();
    let dog = dog(&animal);
    let animal_value = Value::from(animal.clone());
    let dog_value = Value::from(dog.clone());

    report.record(
        "extend",
        extend(&dog_value, &animal_value).map(|()| {
            let parent = dog
                .super_constructor()
                .map(|f| f.name().to_string())
                .unwrap_or_default();
            format!("Dog.prototype now inherits from {parent}.prototype")
        }),
    );
    report.record(
        "extend (again)",
        extend(&dog_value, &animal_value).map(|()| "relinked".to_string()),
    );

    dog.prototype().set(
        "fetch",
        Function::new("fetch", 1, |this, args| {
            let item = args.first().cloned().unwrap_or_default();
            Ok(Value::from(format!("{} fetches the {item}", this.get("name"))))
        }),
    );

    let rex_value = Value::from(dog.construct(&[Value::from("Rex")])?);
    report.record("construct", call_method(&rex_value, "speak", &[]));

    let walker = Object::from_entries([
        (
            "walk",
            Value::from(Function::new("walk", 0, |this, _| {
                Ok(Value::from(format!("{} walks on {} legs", this.get("name"), this.get("legs"))))
            })),
        ),
        ("legs", Value::from(4)),
    ]);
    let before = dog.prototype().own_keys();
    report.record(
        "mixin",
        mixin(&dog_value, &[Value::Null, Value::from(walker)]).map(|_| {
            let gained: Vec<_> = dog
                .prototype()
                .own_keys()
                .into_iter()
                .filter(|key| !before.contains(key))
                .collect();
            format!("Dog.prototype gained {}", gained.join(", "))
        }),
    );
    report.record("call mixed in", call_method(&rex_value, "walk", &[]));

    let pet = Object::from_entries([("speak", Value::Null), ("walk", Value::Null)]);
    report.record(
        "assert_implements",
        assert_implements(&rex_value, &Value::from(pet)).map(|()| "Rex is a pet".to_string()),
    );
    let bird = Object::from_entries([("speak", Value::Null), ("fly", Value::Null)]);
    report.record(
        "assert_implements",
        assert_implements(&rex_value, &Value::from(bird)).map(|()| "Rex is a bird".to_string()),
    );

    let helpers = Object::from_entries([
        ("describe", Value::from(describe())),
        ("kind", Value::from("dog")),
    ]);
    let helpers_value = Value::from(helpers);
    report.record(
        "unbind_at",
        unbind_at(&helpers_value, &Value::from("describe"), position)
            .and_then(|delegate| delegate.call(&rex_value, &[Value::from("loyal")]))
            .map(|value| value.to_string()),
    );

    report.record(
        "bless",
        bless(&rex_value, &helpers_value, position)
            .map(|installed| format!("installed {installed} members on Rex")),
    );
    report.record(
        "call blessed",
        call_method(&rex_value, "describe", &[Value::from("good")]),
    );

    Ok(report)
}

fn animal() -> Function {
    let animal = Function::new("Animal", 1, |this, args| {
        if let Some(instance) = this.as_object() {
            instance.set("name", args.first().cloned().unwrap_or_default());
        }
        Ok(Value::Undefined)
    });
    animal.prototype().set(
        "speak",
        Function::new("speak", 0, |this, _| {
            Ok(Value::from(format!("{} makes a sound", this.get("name"))))
        }),
    );
    animal
}

fn dog(parent: &Function) -> Function {
    let parent = parent.clone();
    Function::new("Dog", 1, move |this, args| parent.call(this, args))
}

/// `describe(...)` lists its arguments, naming objects by their `name`.
fn describe() -> Function {
    Function::new("describe", 2, |_, args| {
        let parts: Vec<String> = args
            .iter()
            .map(|arg| match arg.as_object() {
                Some(object) => object.get("name").to_string(),
                None => arg.to_string(),
            })
            .collect();
        Ok(Value::from(format!("describe({})", parts.join(", "))))
    })
}

fn call_method(receiver: &Value, name: &str, args: &[Value]) -> blessed_core::Result<String> {
    let method = receiver.get(name);
    let Some(function) = method.as_function() else {
        return Err(blessed_core::BlessedError::not_a_function(name, &method));
    };
    Ok(function.call(receiver, args)?.to_string())
}
