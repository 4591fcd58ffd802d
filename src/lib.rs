/*
 * This file is part of Rampage.
 *
 * Copyright (C) 2025 Rampage contributors
 *
 * Rampage is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Rampage is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Rampage. If not, see <https://www.gnu.org/licenses/>.
 */

//! Rampage - named presets for float and color ramps
//!
//! This library provides the command-line host for the preset store: ramp
//! files standing in for ramp parameters, terminal prompts, command handlers
//! and an optional JSON event log.

pub mod cli;
pub mod handlers;
pub mod logger;
pub mod prompt;
pub mod ramp_file;
