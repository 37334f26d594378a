// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod coach;
pub mod forms;
pub mod ids;
pub mod model;
pub mod proposal;
pub mod state;
pub mod workflow;

pub use coach::*;
pub use forms::*;
pub use ids::*;
pub use model::*;
pub use proposal::*;
pub use state::*;
pub use workflow::*;
