mod cli;
mod driver;
mod engine;
mod error;
mod plan;

pub use cli::{report_unknown_options, split_unknown_options, Args};
pub use driver::run;
pub use engine::{engine_params, min_array_size, GeneratorEngine, Width};
pub use error::{GenError, GenResult};
pub use plan::{resolve, GenerationPlan, GenerationRequest, SeedMode, Strategy, DEFAULT_SEED_ARRAY};
