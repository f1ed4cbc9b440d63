// Assertion-based harness that drives the feed pipeline against test doubles

pub mod mocks;
pub mod runner;
pub mod suite;

pub use mocks::{MockDom, MockElement, MockItem, MockNetworkClient};
pub use runner::{
    assert_contains, assert_equal, assert_that, AssertionFailure, CaseFailure, CaseResult,
    TestRunner,
};
pub use suite::{feed_suite, run_feed_suite};
