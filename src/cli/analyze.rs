//! Analyze/brief command implementation

use crate::config::{Config, Region};
use crate::feed::{FredClient, FredConfig, StooqClient, StooqConfig};
use crate::pipeline::{Pipeline, Snapshot};
use crate::report;
use clap::Args;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Region to analyze
    #[arg(short, long, value_enum, default_value = "us")]
    pub region: Region,
}

impl AnalyzeArgs {
    async fn run_pipeline(&self, config: &Config) -> anyhow::Result<Snapshot> {
        let timeout = Duration::from_secs(config.feed.timeout_secs);

        let fred = FredClient::new(FredConfig {
            base_url: config.feed.fred_base_url.clone(),
            api_key: config.feed.fred_api_key.clone(),
            timeout,
        });
        let stooq = StooqClient::new(StooqConfig {
            base_url: config.feed.stooq_base_url.clone(),
            timeout,
        });

        let pipeline = Pipeline::new(fred, stooq, config);
        let snapshot = pipeline.run(self.region).await?;
        Ok(snapshot)
    }

    /// Run the pipeline and print the snapshot table
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let snapshot = self.run_pipeline(config).await?;
        println!("{}", report::format_snapshot(&snapshot));
        Ok(())
    }

    /// Run the pipeline and print the narrative brief
    pub async fn execute_brief(&self, config: &Config) -> anyhow::Result<()> {
        let snapshot = self.run_pipeline(config).await?;
        println!("{}", report::brief(&snapshot));
        Ok(())
    }
}
