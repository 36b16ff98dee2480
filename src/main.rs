//! env-steward: merge and validate KEY=VALUE environment files
//!
//! Deployment-pipeline companion: carries values forward from an old env file
//! into a new one without clobbering anything already set, and checks that
//! required keys are present and non-empty before a rollout proceeds.

use anyhow::Result;

fn main() -> Result<()> {
    env_steward::cli::run()
}
