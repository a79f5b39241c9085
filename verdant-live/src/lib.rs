//! # Verdant Live
//!
//! Async runtime for Verdant live views. A [`LiveView`] owns a
//! [`verdant::LiveState`] and a single scheduler task that runs the
//! state's mutation tasks at their configured cadence until the view is
//! unmounted or dropped.
//!
//! ```rust,no_run
//! use verdant::{LiveConfig, LiveState};
//! use verdant_live::LiveView;
//!
//! # async fn demo() -> verdant_live::Result<()> {
//! let anchor = chrono::Local::now().naive_local();
//! let state = LiveState::new(LiveConfig::default().with_seed(1), anchor)?;
//! let view = LiveView::mount(state);
//! tokio::time::sleep(std::time::Duration::from_secs(5)).await;
//! println!("{:?}", view.snapshot().await);
//! view.unmount().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod scheduler;

pub use config::load_config;
pub use error::{LiveError, Result};
pub use scheduler::LiveView;
