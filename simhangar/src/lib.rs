//! SimHangar - aircraft package indexing for Microsoft Flight Simulator
//!
//! This library discovers installed aircraft packages across both product
//! generations (2020/2024) and all distribution channels (Steam, Microsoft
//! Store, Xbox), parses their vendor-authored manifest.json and
//! aircraft.cfg files, and resolves runtime telemetry titles to rich
//! package metadata through a normalized title index.
//!
//! The entry point is [`AircraftIndex`]: call
//! [`initialize`](AircraftIndex::initialize) to discover content roots and
//! build the index, then [`find_by_title`](AircraftIndex::find_by_title)
//! to resolve titles. Lookups fall through three tiers — exact index
//! match, partial index match, and a full on-demand filesystem re-scan —
//! so a title can be resolved even when the index missed its package.
//!
//! Nothing in the public surface fails hard: discovery failure is a
//! boolean, parse failures degrade to empty fields, and a lookup miss is
//! `None`.

pub mod cfg;
pub mod discovery;
pub mod index;
pub mod manifest;
pub mod response;
pub mod scanner;

pub use index::{normalize_title, AircraftIndex, PathsInfo};
pub use scanner::IndexedAircraft;
