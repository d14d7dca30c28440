//! Shared fakes for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use slashroute_core::{
    BoundArgs, Choice, CommandError, ConcurrencyLimiter, FnBody, FnErrorHandler, Interaction,
    InteractionResponder,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub type Log = Arc<Mutex<Vec<String>>>;

pub fn log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn recording_body(label: &'static str, log: &Log) -> FnBody {
    let log = log.clone();
    FnBody::new(move |_, args: BoundArgs| {
        let log = log.clone();
        async move {
            log.lock()
                .push(format!("{} {}", label, serde_json::Value::Object(args.into_map())));
            Ok(())
        }
    })
}

pub fn recording_handler(label: &'static str, log: &Log) -> FnErrorHandler {
    let log = log.clone();
    FnErrorHandler::new(move |_, err: CommandError| {
        let log = log.clone();
        async move {
            log.lock().push(format!("{} handled {}", label, err.error_code()));
            Ok(())
        }
    })
}

/// Responder that records everything sent through it
#[derive(Default)]
pub struct RecordingResponder {
    pub messages: Mutex<Vec<(String, bool)>>,
    pub choices: Mutex<Vec<Vec<Choice>>>,
}

#[async_trait]
impl InteractionResponder for RecordingResponder {
    async fn send_message(&self, content: &str, ephemeral: bool) -> anyhow::Result<()> {
        self.messages.lock().push((content.to_string(), ephemeral));
        Ok(())
    }

    async fn send_autocomplete(&self, choices: Vec<Choice>) -> anyhow::Result<()> {
        self.choices.lock().push(choices);
        Ok(())
    }
}

/// Limiter that only counts acquire and release calls
#[derive(Default)]
pub struct CountingLimiter {
    acquired: AtomicUsize,
    released: AtomicUsize,
}

impl CountingLimiter {
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConcurrencyLimiter for CountingLimiter {
    async fn acquire(&self, _interaction: &Interaction) -> Result<(), CommandError> {
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn release(&self, _interaction: &Interaction) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}
