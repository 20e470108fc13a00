pub mod mocks;

pub use mocks::{test_helpers, MockHttpClient, MockReply};
