//! Mock implementations for testing
//!
//! Provides a mockall license gate and entry points that record every call
//! into a shared journal instead of touching a real host.

#![allow(dead_code)]

use async_trait::async_trait;
use mockall::mock;
use modhost_lifecycle::{
    BootHost, InitAfterContext, InitContext, LicenseGate, ModuleInit, ModuleInitAfter,
};
use std::sync::{Arc, Mutex};

mock! {
    pub Gate {}

    #[async_trait]
    impl LicenseGate for Gate {
        async fn is_licensed(&self, module: &str) -> bool;
    }
}

/// Host with unit handles
pub struct TestHost;

impl BootHost for TestHost {
    type Mount = ();
    type Server = ();
    type Auth = ();
    type Env = ();
}

/// Ordered record of entry point calls, as `"{module}:{phase}"`
#[derive(Clone, Default)]
pub struct Journal {
    calls: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

/// Entry point that records its call and optionally fails
pub struct RecordingEntry {
    journal: Journal,
    fail: bool,
}

impl RecordingEntry {
    pub fn ok(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            fail: false,
        }
    }

    pub fn failing(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            fail: true,
        }
    }

    fn finish(&self) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("entry point failed");
        }
        Ok(())
    }
}

#[async_trait]
impl ModuleInit<TestHost> for RecordingEntry {
    async fn init(&self, ctx: InitContext<'_, TestHost>) -> anyhow::Result<()> {
        self.journal.record(format!("{}:init", ctx.module));
        self.finish()
    }
}

#[async_trait]
impl ModuleInitAfter<TestHost> for RecordingEntry {
    async fn init_after(&self, ctx: InitAfterContext<'_, TestHost>) -> anyhow::Result<()> {
        self.journal.record(format!("{}:initAfter", ctx.module));
        self.finish()
    }
}
