// SPDX-License-Identifier: MPL-2.0

//! Capture pipelines
//!
//! # Pipeline Architecture
//!
//! ```text
//! ┌──────────────┐     ┌────────────────────────┐     ┌──────────────┐
//! │ CaptureCall  │ ──▶ │  Capture Orchestrator  │ ──▶ │  JPEG File   │
//! │ (filter xml, │     │  - Bind camera         │     │  or failure  │
//! │  flash, zoom,│     │  - Torch / zoom        │     │              │
//! │  facing,     │     │  - Filter compile      │     │              │
//! │  timer)      │     │  - Delay, capture      │     │              │
//! └──────────────┘     └────────────────────────┘     └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`capture`]: Per-request capture state machine

pub mod capture;
