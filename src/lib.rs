// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregates;
pub mod backup;
pub mod cli;
pub mod commands;
pub mod integrity;
pub mod models;
pub mod ordering;
pub mod store;
pub mod utils;
pub mod views;
