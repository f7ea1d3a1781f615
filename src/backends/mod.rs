// SPDX-License-Identifier: MPL-2.0

//! Backend abstraction layer for camera devices
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               Capture Pipeline               │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                   │
//! │  ┌──────────────────┐  ┌─────────────────┐  │
//! │  │ Camera (trait +  │  │ Virtual Camera  │  │
//! │  │  session owner)  │  │   (software)    │  │
//! │  └──────────────────┘  └─────────────────┘  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`camera`]: Device trait, shared types and session ownership
//! - [`virtual_camera`]: Software device rendering a synthetic scene

pub mod camera;
pub mod virtual_camera;
