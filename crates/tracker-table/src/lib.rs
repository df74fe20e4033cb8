// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod catalog;
pub mod config;
pub mod surface;
pub mod table;
pub mod value;

pub use config::*;
pub use surface::*;
pub use table::*;
