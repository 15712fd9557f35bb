// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod client;
pub mod coerce;
pub mod commands;
pub mod db;
pub mod error;
pub mod models;
pub mod report;
pub mod utils;
pub mod wire;
