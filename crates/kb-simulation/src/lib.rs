//! Frame-driven physics for a throw of five knucklebones.
//!
//! The [`RoundController`] owns five [`Body`] values and, once per rendered
//! frame, integrates them under gravity, resolves contacts, detects when
//! each has come to rest, reads the face pointing up, snaps onto it, and
//! scores the round with the rules from [`kb_mechanics`]. A timeout forces
//! any straggler onto its best face so every round terminates.

/// Face anchor directions and their values.
pub mod anchor;
/// Per-body kinematic state.
pub mod body;
/// The playable floor rectangle.
pub mod bounds;
/// Host timestamps to clamped physics steps.
pub mod clock;
/// Pairwise contact between bodies.
pub mod collision;
/// Configuration types for the simulation.
pub mod config;
/// Mutable context passed to each stage of a frame.
pub mod context;
/// Error types for the simulation crate.
pub mod error;
/// Round event types and the event log.
pub mod event;
/// Face selection and edge nudges.
pub mod face;
/// Timeout-driven forced resolution.
pub mod fallback;
/// Gravity, floor, walls, and friction.
pub mod integrator;
/// Start positions for thrown and idle bodies.
pub mod layout;
/// The throw-to-score state machine.
pub mod round;
/// Rest detection.
pub mod settle;
/// The dice setup document.
pub mod setup;
/// Snap-to-face animation.
pub mod snap;

/// Re-exports of [`anchor::AnchorSet`] and [`anchor::FaceAnchor`].
pub use anchor::{AnchorSet, FaceAnchor};
/// Re-exports of [`body::Body`], [`body::BodyPose`], and [`body::BODY_COUNT`].
pub use body::{BODY_COUNT, Body, BodyPose};
/// Re-exports of [`bounds::TableBounds`] and [`bounds::ViewSpec`].
pub use bounds::{TableBounds, ViewSpec};
/// Re-export of [`clock::FrameClock`].
pub use clock::FrameClock;
/// Re-exports of [`config::SimConfig`] and [`config::ThrowConfig`].
pub use config::{SimConfig, ThrowConfig};
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::RoundEvent`], and [`event::RoundEventKind`].
pub use event::{EventLog, RoundEvent, RoundEventKind};
/// Re-exports of [`round::Phase`], [`round::Round`], and [`round::RoundController`].
pub use round::{Phase, Round, RoundController};
/// Re-export of [`setup::DiceSetup`].
pub use setup::DiceSetup;
