use futures::future::{FutureExt, LocalBoxFuture};
use std::any::Any;
use std::fmt::Debug;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use thiserror::Error;
use tracing::{info, warn};

/// Outcome of one registered case
pub type CaseResult = anyhow::Result<()>;

type CaseFn = Box<dyn Fn() -> LocalBoxFuture<'static, CaseResult>>;

/// Raised by the `assert_*` helpers when a check does not hold
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AssertionFailure {
    message: String,
}

impl AssertionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

struct TestCase {
    name: String,
    case: CaseFn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFailure {
    pub name: String,
    pub message: String,
}

/// Sequential runner for named async cases.
///
/// Cases run one at a time in registration order. A case fails by returning
/// an error or by panicking; either way the run continues with the next one.
/// Counters accumulate across runs of the same runner.
#[derive(Default)]
pub struct TestRunner {
    tests: Vec<TestCase>,
    passed: usize,
    failed: usize,
    failures: Vec<CaseFailure>,
}

impl TestRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a case. Nothing runs until [`TestRunner::run`].
    pub fn test<F, Fut>(&mut self, name: impl Into<String>, case: F) -> &mut Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = CaseResult> + 'static,
    {
        self.tests.push(TestCase {
            name: name.into(),
            case: Box::new(move || case().boxed_local()),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn failures(&self) -> &[CaseFailure] {
        &self.failures
    }

    /// Run every case; true when none failed
    pub async fn run(&mut self) -> bool {
        info!("Running tests...");

        for test in &self.tests {
            let outcome = AssertUnwindSafe(async { (test.case)().await })
                .catch_unwind()
                .await;
            let result = match outcome {
                Ok(result) => result.map_err(|e| format!("{e:#}")),
                Err(payload) => Err(panic_message(payload.as_ref())),
            };

            match result {
                Ok(()) => {
                    self.passed += 1;
                    info!("✓ {}", test.name);
                }
                Err(message) => {
                    self.failed += 1;
                    warn!("✗ {}", test.name);
                    warn!("  Error: {}", message);
                    self.failures.push(CaseFailure {
                        name: test.name.clone(),
                        message,
                    });
                }
            }
        }

        info!("Test Results: {} passed, {} failed", self.passed, self.failed);
        self.failed == 0
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "case panicked".to_string()
    }
}

/// Fail with `message`, or `Assertion failed`, unless `condition` holds
pub fn assert_that(condition: bool, message: Option<&str>) -> Result<(), AssertionFailure> {
    if condition {
        Ok(())
    } else {
        Err(AssertionFailure::new(message.unwrap_or("Assertion failed")))
    }
}

/// Fail unless `actual == expected`
pub fn assert_equal<A, E>(
    actual: A,
    expected: E,
    message: Option<&str>,
) -> Result<(), AssertionFailure>
where
    A: PartialEq<E> + Debug,
    E: Debug,
{
    if actual == expected {
        return Ok(());
    }
    Err(AssertionFailure::new(match message {
        Some(message) => message.to_string(),
        None => format!("Expected {expected:?}, got {actual:?}"),
    }))
}

/// Fail unless `text` contains `substring` literally
pub fn assert_contains(
    text: &str,
    substring: &str,
    message: Option<&str>,
) -> Result<(), AssertionFailure> {
    if text.contains(substring) {
        return Ok(());
    }
    Err(AssertionFailure::new(match message {
        Some(message) => message.to_string(),
        None => format!("Expected \"{text}\" to contain \"{substring}\""),
    }))
}
