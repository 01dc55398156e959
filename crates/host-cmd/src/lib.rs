//! Host Command Execution
//!
//! A thin, mockable layer over the host commands and filesystem operations
//! the StorageOps node controllers depend on. Commands run to completion,
//! non-zero exits become errors carrying the captured output, and every
//! operation goes through the [`HostRunner`] trait so unit tests can script
//! the host instead of touching it.
//!
//! # Example
//!
//! ```no_run
//! use host_cmd::{HostCmd, HostRunner};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let runner = HostCmd::new();
//!
//! // List the live mount table
//! let mount_table = runner.checked_output("mount", &[]).await?;
//!
//! for line in mount_table.lines() {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod runner;
#[path = "trait.rs"]
pub mod host_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use error::CmdError;
pub use host_trait::HostRunner;
pub use runner::HostCmd;
#[cfg(feature = "test-util")]
pub use mock::MockHostRunner;
