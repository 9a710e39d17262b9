//! Construction traits generalized from `rs-zephyr-env`'s `ZephyrStandard` /
//! `ZephyrMock` pair: every piece of process-wide state in this crate knows
//! how to build its "real" empty form and, separately, a form suitable for
//! unit tests that never see a real host process.

use anyhow::Result;

/// Returns the object's standard, empty-but-valid starting state.
pub trait Bootstrap {
    /// Builds the standard object.
    fn bootstrap() -> Result<Self>
    where
        Self: Sized;
}

/// Returns an object pre-populated with data suitable for tests, standing in
/// for state a real host process would otherwise provide.
pub trait Mocked {
    /// Builds the mocked object.
    fn mocked() -> Result<Self>
    where
        Self: Sized;
}
