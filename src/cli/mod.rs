// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem for the cellgrid generator

pub mod naming;
pub mod progress;
pub mod reporter;

pub use naming::descriptive_file_name;
pub use progress::BarProgress;
pub use reporter::Reporter;
