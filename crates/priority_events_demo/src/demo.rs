//! Order pipeline scenario driven through the priority emitter.
//!
//! A validator at high priority rejects orders with a non-positive amount by
//! stopping dispatch. A once-listener greets the first accepted order, the
//! fulfilment listener re-emits `order.fulfilled`, and a configurable number of
//! audit listeners run last.

use crate::config::DemoSettings;
use priority_events::{
    EmitterConfig, EmitterStats, EventArgs, EventError, Listener, PriorityEmitter, NEW_LISTENER,
    REMOVE_LISTENER,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info, trace};

pub const ORDER_PLACED: &str = "order.placed";
pub const ORDER_FULFILLED: &str = "order.fulfilled";

/// Outcome of a scenario run
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub orders_emitted: u32,
    pub orders_accepted: u32,
    pub orders_rejected: u32,
    pub fulfilment_notices: u32,
    pub welcome_messages: u32,
    pub listeners_remaining: usize,
    pub event_names: Vec<String>,
    pub stats: EmitterStats,
}

#[derive(Default)]
struct Counters {
    accepted: Cell<u32>,
    rejected: Cell<u32>,
    fulfilled: Cell<u32>,
    welcomed: Cell<u32>,
}

fn bump(cell: &Cell<u32>) {
    cell.set(cell.get() + 1);
}

fn amount(order: &Value) -> i64 {
    order.get("amount").and_then(Value::as_i64).unwrap_or(0)
}

/// Builds the pipeline on a fresh emitter and emits `settings.orders` orders.
pub fn run(settings: &DemoSettings, emitter_config: &EmitterConfig) -> Result<DemoReport, EventError> {
    let emitter = PriorityEmitter::<Value>::with_config(emitter_config);
    let counters = Rc::new(Counters::default());

    let watcher = Listener::new(|_: &PriorityEmitter<Value>, args| match args {
        EventArgs::NewListener { event_name, priority, .. } => {
            debug!("➕ Listener registered on {} at priority {}", event_name, priority);
        }
        EventArgs::RemoveListener { event_name, priority, .. } => {
            debug!("➖ Listener removed from {} at priority {}", event_name, priority);
        }
        EventArgs::Payload(_) => {}
    });
    emitter
        .on(NEW_LISTENER, &watcher)?
        .on(REMOVE_LISTENER, &watcher)?;

    let validator = {
        let counters = counters.clone();
        Listener::new(move |_: &PriorityEmitter<Value>, args| {
            let valid = args.payload().map_or(false, |order| amount(order) > 0);
            if !valid {
                bump(&counters.rejected);
                info!("🚫 Rejected order {:?}", args.payload().and_then(|o| o.get("id")));
            }
            valid
        })
    };

    let welcome = {
        let counters = counters.clone();
        Listener::new(move |_: &PriorityEmitter<Value>, args| {
            bump(&counters.welcomed);
            info!("🎉 First accepted order: {:?}", args.payload());
        })
    };

    let fulfil = {
        let counters = counters.clone();
        Listener::new(move |emitter: &PriorityEmitter<Value>, args| {
            bump(&counters.accepted);
            if let Some(order) = args.payload() {
                emitter.emit(ORDER_FULFILLED, order);
            }
        })
    };

    let notifier = {
        let counters = counters.clone();
        Listener::new(move |_: &PriorityEmitter<Value>, _| bump(&counters.fulfilled))
    };

    emitter
        .on_with_priority(ORDER_PLACED, &validator, 100.0)?
        .once_with_priority(ORDER_PLACED, &welcome, 50.0)?
        .on_with_priority(ORDER_PLACED, &fulfil, 10.0)?
        .on(ORDER_FULFILLED, &notifier)?;

    for index in 0..settings.extra_auditors {
        let auditor = Listener::new(move |_: &PriorityEmitter<Value>, args| {
            trace!("📋 Auditor {} saw {:?}", index, args.payload());
        });
        emitter.on_with_priority(ORDER_PLACED, &auditor, 0.0)?;
    }

    for id in 1..=settings.orders {
        let total = if id % 4 == 0 { -1 } else { i64::from(id) * 10 };
        emitter.emit(ORDER_PLACED, &json!({ "id": id, "amount": total }));
    }

    emitter.off(ORDER_PLACED, &validator);

    Ok(DemoReport {
        orders_emitted: settings.orders,
        orders_accepted: counters.accepted.get(),
        orders_rejected: counters.rejected.get(),
        fulfilment_notices: counters.fulfilled.get(),
        welcome_messages: counters.welcomed.get(),
        listeners_remaining: emitter.listener_count(ORDER_PLACED),
        event_names: emitter.event_names(),
        stats: emitter.stats(),
    })
}
