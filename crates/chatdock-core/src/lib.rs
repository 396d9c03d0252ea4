//! Client-side logic for chatdock.
//!
//! This crate defines the `WidgetApi` port that the infrastructure layer
//! implements, plus everything that runs on top of it: the training status
//! poller, the setup wizard, bot selection, the health indicator and the
//! widget helpers. It depends only on `chatdock-types` -- never on
//! `chatdock-infra` or any HTTP crate.

pub mod api;
pub mod health;
pub mod poller;
pub mod selection;
pub mod widget;
pub mod wizard;

#[cfg(test)]
pub(crate) mod testing;
