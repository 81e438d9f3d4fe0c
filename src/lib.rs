// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

pub mod app;
pub mod config;
pub mod currencies;
pub mod db;
pub mod errors;
pub mod fixtures;
pub mod models;
pub mod search;
