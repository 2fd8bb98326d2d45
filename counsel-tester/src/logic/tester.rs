use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::TesterAssets;
use super::scenarios::{ScenarioCtx, run_scenario};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
}

pub struct ScenarioTester<'a> {
    assets: &'a TesterAssets,
    verbose: bool,
}

impl<'a> ScenarioTester<'a> {
    #[must_use]
    pub const fn new(assets: &'a TesterAssets, verbose: bool) -> Self {
        Self { assets, verbose }
    }

    /// Run `key` once per seed, `iterations` times each. Returns `None` for
    /// an unknown scenario.
    pub async fn run(&self, key: &str, seeds: &[u64], iterations: usize) -> Option<Vec<ScenarioResult>> {
        super::scenarios::describe(key)?;
        let mut results = Vec::with_capacity(seeds.len());
        for &seed in seeds {
            if self.verbose {
                println!("🧪 Testing scenario: {} (seed: {seed})", key.bright_white());
            }
            results.push(self.run_seed(key, seed, iterations).await);
        }
        Some(results)
    }

    async fn run_seed(&self, key: &str, seed: u64, iterations: usize) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut timings = Vec::with_capacity(iterations);

        for i in 0..iterations {
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
            let ctx = ScenarioCtx {
                assets: self.assets,
                seed: iteration_seed,
                verbose: self.verbose,
            };
            let start = Instant::now();
            let outcome = run_scenario(key, &ctx).await;
            timings.push(start.elapsed());
            match outcome {
                Some(Ok(())) => successes += 1,
                Some(Err(err)) => {
                    failures.push(format!("Iteration {} (seed {iteration_seed}): {err:#}", i + 1));
                }
                None => failures.push(format!("Iteration {}: no such scenario", i + 1)),
            }
        }

        let average_duration = if timings.is_empty() {
            Duration::ZERO
        } else {
            timings.iter().sum::<Duration>() / u32::try_from(timings.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: key.to_string(),
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}
